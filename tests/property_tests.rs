use std::collections::HashSet;
use std::path::PathBuf;

use proptest::prelude::*;
use svgdupe::duplicates::enumerate_pairs;

proptest! {
    #[test]
    fn pair_count_is_n_choose_2(n in 0usize..40) {
        let files: Vec<PathBuf> = (0..n).map(|i| PathBuf::from(format!("f{i}.svg"))).collect();
        let pairs = enumerate_pairs(&files, |_| {});
        prop_assert_eq!(pairs.len(), n * n.saturating_sub(1) / 2);
    }

    #[test]
    fn pairs_are_unique_and_never_self(n in 0usize..40) {
        let files: Vec<PathBuf> = (0..n).map(|i| PathBuf::from(format!("f{i}.svg"))).collect();
        let pairs = enumerate_pairs(&files, |_| {});

        let mut seen = HashSet::new();
        for pair in &pairs {
            prop_assert_ne!(&pair.left, &pair.right);
            // Normalize orientation to catch (a,b)/(b,a) duplicates.
            let key = if pair.left < pair.right {
                (pair.left.clone(), pair.right.clone())
            } else {
                (pair.right.clone(), pair.left.clone())
            };
            prop_assert!(seen.insert(key), "duplicate pair {:?}", pair);
        }
    }

    #[test]
    fn pair_orientation_follows_input_order(n in 2usize..20) {
        let files: Vec<PathBuf> = (0..n).map(|i| PathBuf::from(format!("f{i:02}.svg"))).collect();
        let index_of = |p: &PathBuf| files.iter().position(|f| f == p).unwrap();

        for pair in enumerate_pairs(&files, |_| {}) {
            prop_assert!(index_of(&pair.left) < index_of(&pair.right));
        }
    }
}
