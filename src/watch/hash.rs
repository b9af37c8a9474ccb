// src/watch/hash.rs

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use blake3::Hasher;

/// Compute the content hash of a single file.
///
/// Streamed in fixed-size chunks, so memory use is independent of file
/// size. The resulting hex digest is only ever compared for equality
/// across poll cycles; it is not exposed as an identifier to anything
/// else.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    let mut file =
        File::open(path).with_context(|| format!("opening file for hashing: {:?}", path))?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file
            .read(&mut buf)
            .with_context(|| format!("reading file for hashing: {:?}", path))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}
