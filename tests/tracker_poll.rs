use std::error::Error;

use pollwatch::watch::{ChangeKind, ChangeTracker, ExclusionPolicy};
use pollwatch_test_utils::{init_tracing, TempTree};

type TestResult = Result<(), Box<dyn Error>>;

fn tracker_for(tree: &TempTree) -> ChangeTracker {
    ChangeTracker::new(tree.root(), ExclusionPolicy::allow_all())
}

#[test]
fn initialize_then_quiet_poll_is_empty() -> TestResult {
    init_tracing();

    let tree = TempTree::new()?;
    tree.write("a.txt", "alpha")?;
    tree.write("sub/b.txt", "beta")?;

    let tracker = tracker_for(&tree);
    let mut state = tracker.initialize()?;
    assert_eq!(state.len(), 2);
    assert!(state.contains("a.txt"));
    assert!(state.contains("sub/b.txt"));

    let changes = tracker.poll(&mut state)?;
    assert!(changes.is_empty(), "quiet poll must report nothing");

    Ok(())
}

#[test]
fn created_file_reported_added_exactly_once() -> TestResult {
    init_tracing();

    let tree = TempTree::new()?;
    tree.write("existing.txt", "old")?;

    let tracker = tracker_for(&tree);
    let mut state = tracker.initialize()?;

    tree.write("fresh.txt", "new")?;

    let changes = tracker.poll(&mut state)?;
    assert_eq!(changes.len(), 1);
    assert_eq!(changes.kind_of("fresh.txt"), Some(ChangeKind::Added));
    assert!(state.contains("fresh.txt"));

    // Second poll with no further writes: nothing to report.
    let changes = tracker.poll(&mut state)?;
    assert!(changes.is_empty());

    Ok(())
}

#[test]
fn modified_file_reported_once_and_hash_updates() -> TestResult {
    init_tracing();

    let tree = TempTree::new()?;
    tree.write("notes.txt", "v1")?;

    let tracker = tracker_for(&tree);
    let mut state = tracker.initialize()?;
    let before = state.hash_of("notes.txt").unwrap().to_string();

    tree.write("notes.txt", "v2")?;

    let changes = tracker.poll(&mut state)?;
    assert_eq!(changes.len(), 1);
    assert_eq!(changes.kind_of("notes.txt"), Some(ChangeKind::Modified));

    let after = state.hash_of("notes.txt").unwrap().to_string();
    assert_ne!(before, after, "stored hash must follow the new content");

    let changes = tracker.poll(&mut state)?;
    assert!(changes.is_empty());

    Ok(())
}

#[test]
fn byte_identical_rewrite_produces_no_report() -> TestResult {
    init_tracing();

    let tree = TempTree::new()?;
    tree.write("same.txt", "unchanged")?;

    let tracker = tracker_for(&tree);
    let mut state = tracker.initialize()?;

    // Re-save with identical bytes: mtime moves, content does not.
    tree.write("same.txt", "unchanged")?;

    let changes = tracker.poll(&mut state)?;
    assert!(
        changes.is_empty(),
        "hash equality must suppress timestamp-only changes"
    );

    Ok(())
}

#[test]
fn deleted_file_reported_and_untracked() -> TestResult {
    init_tracing();

    let tree = TempTree::new()?;
    tree.write("doomed.txt", "bye")?;
    tree.write("keeper.txt", "hi")?;

    let tracker = tracker_for(&tree);
    let mut state = tracker.initialize()?;

    tree.remove_file("doomed.txt")?;

    let changes = tracker.poll(&mut state)?;
    assert_eq!(changes.len(), 1);
    assert_eq!(changes.kind_of("doomed.txt"), Some(ChangeKind::Deleted));
    assert!(!state.contains("doomed.txt"));
    assert!(state.contains("keeper.txt"));

    Ok(())
}

#[test]
fn deleted_directory_reports_files_underneath() -> TestResult {
    init_tracing();

    let tree = TempTree::new()?;
    tree.write("gone/one.txt", "1")?;
    tree.write("gone/two.txt", "2")?;
    tree.write("stays.txt", "3")?;

    let tracker = tracker_for(&tree);
    let mut state = tracker.initialize()?;

    tree.remove_dir_all("gone")?;

    let changes = tracker.poll(&mut state)?;
    assert_eq!(changes.len(), 2);
    assert_eq!(changes.kind_of("gone/one.txt"), Some(ChangeKind::Deleted));
    assert_eq!(changes.kind_of("gone/two.txt"), Some(ChangeKind::Deleted));
    assert_eq!(state.len(), 1);

    Ok(())
}

#[test]
fn file_replaced_by_directory_is_delete_plus_add() -> TestResult {
    init_tracing();

    let tree = TempTree::new()?;
    tree.write("swap", "was a file")?;

    let tracker = tracker_for(&tree);
    let mut state = tracker.initialize()?;

    tree.remove_file("swap")?;
    tree.write("swap/inner.txt", "now a file below a directory")?;

    let changes = tracker.poll(&mut state)?;
    assert_eq!(changes.kind_of("swap"), Some(ChangeKind::Deleted));
    assert_eq!(changes.kind_of("swap/inner.txt"), Some(ChangeKind::Added));
    assert!(!state.contains("swap"));
    assert!(state.contains("swap/inner.txt"));

    Ok(())
}

#[test]
fn empty_directories_are_never_reported() -> TestResult {
    init_tracing();

    let tree = TempTree::new()?;
    tree.mkdir("empty/nested/deeper")?;

    let tracker = tracker_for(&tree);
    let mut state = tracker.initialize()?;
    assert!(state.is_empty());

    let changes = tracker.poll(&mut state)?;
    assert!(changes.is_empty());

    Ok(())
}

/// The walk-through scenario: one tracked file next to a hidden directory,
/// through its whole modify/delete lifecycle.
#[test]
fn tracked_lifecycle_next_to_hidden_dir() -> TestResult {
    init_tracing();

    let tree = TempTree::new()?;
    tree.write("a.txt", "1")?;
    tree.write(".git/x", "object")?;

    let policy = ExclusionPolicy::new(
        vec![".git".to_string()],
        Vec::<String>::new(),
        true,
    );
    let tracker = ChangeTracker::new(tree.root(), policy);

    let mut state = tracker.initialize()?;
    assert_eq!(state.len(), 1);
    assert!(state.contains("a.txt"));

    tree.write("a.txt", "12")?;
    let changes = tracker.poll(&mut state)?;
    assert_eq!(changes.len(), 1);
    assert_eq!(changes.kind_of("a.txt"), Some(ChangeKind::Modified));

    tree.remove_file("a.txt")?;
    let changes = tracker.poll(&mut state)?;
    assert_eq!(changes.len(), 1);
    assert_eq!(changes.kind_of("a.txt"), Some(ChangeKind::Deleted));
    assert!(state.is_empty());

    Ok(())
}

#[test]
fn hundred_file_batch_tracks_every_file() -> TestResult {
    init_tracing();

    let tree = TempTree::new()?;
    for i in 0..100 {
        tree.write(&format!("batch/f{i:03}.txt"), format!("content {i}"))?;
    }

    let tracker = tracker_for(&tree);
    let mut state = tracker.initialize()?;
    assert_eq!(state.len(), 100);

    let changes = tracker.poll(&mut state)?;
    assert!(changes.is_empty());

    Ok(())
}

/// Two trackers over two roots share nothing: state is an explicit value,
/// not hidden instance state.
#[test]
fn independent_roots_do_not_interfere() -> TestResult {
    init_tracing();

    let left = TempTree::new()?;
    let right = TempTree::new()?;
    left.write("only-left.txt", "l")?;
    right.write("only-right.txt", "r")?;

    let left_tracker = tracker_for(&left);
    let right_tracker = tracker_for(&right);
    let mut left_state = left_tracker.initialize()?;
    let mut right_state = right_tracker.initialize()?;

    left.write("later.txt", "new on the left")?;

    let left_changes = left_tracker.poll(&mut left_state)?;
    let right_changes = right_tracker.poll(&mut right_state)?;

    assert_eq!(left_changes.kind_of("later.txt"), Some(ChangeKind::Added));
    assert!(right_changes.is_empty());
    assert!(!right_state.contains("later.txt"));

    Ok(())
}
