use proptest::prelude::*;

use pollwatch::watch::ExclusionPolicy;

// Pure-logic properties of the exclusion rules; the filesystem-facing
// behaviour is covered by the integration tests.

proptest! {
    #[test]
    fn hidden_names_always_skipped(name in "[a-z][a-z0-9]{0,7}") {
        let policy = ExclusionPolicy::new(Vec::<String>::new(), Vec::<String>::new(), true);
        let hidden = format!(".{name}");

        prop_assert!(policy.skips_entry(&hidden, false));
        prop_assert!(policy.skips_entry(&hidden, true));
        prop_assert!(!policy.skips_entry(&name, false));
        prop_assert!(!policy.skips_entry(&name, true));
    }

    #[test]
    fn excluded_dir_names_prune_only_directories(name in "[a-z][a-z0-9]{0,7}") {
        let policy = ExclusionPolicy::new(
            vec![name.clone()],
            Vec::<String>::new(),
            true,
        );

        prop_assert!(policy.skips_entry(&name, true));
        prop_assert!(!policy.skips_entry(&name, false));
    }

    #[test]
    fn extension_exclusion_ignores_case(
        stem in "[a-z][a-z0-9]{0,7}",
        ext in "[a-z]{1,4}",
    ) {
        let policy = ExclusionPolicy::new(
            Vec::<String>::new(),
            vec![format!(".{ext}")],
            true,
        );

        let lower = format!("{}.{}", stem, ext);
        let upper = format!("{}.{}", stem, ext.to_uppercase());
        prop_assert!(policy.skips_file(&lower));
        prop_assert!(policy.skips_file(&upper));
    }

    #[test]
    fn unrelated_extensions_are_kept(
        stem in "[a-z][a-z0-9]{0,7}",
        ext in "[a-z]{1,4}",
    ) {
        let policy = ExclusionPolicy::new(
            Vec::<String>::new(),
            vec![format!(".{ext}x")],
            true,
        );

        let name = format!("{}.{}", stem, ext);
        prop_assert!(!policy.skips_file(&name));
    }

    #[test]
    fn allow_all_policy_skips_nothing(
        name in "[a-z][a-z0-9.]{0,12}",
    ) {
        let policy = ExclusionPolicy::allow_all();

        prop_assert!(!policy.skips_entry(&name, true));
        prop_assert!(!policy.skips_entry(&name, false));
        prop_assert!(!policy.skips_file(&name));
    }
}
