//! Property-based tests for search ranking

use aigm::shared::search::{rank, score, Candidate};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    index: usize,
    username: String,
    display_name: Option<String>,
}

impl Candidate for Entry {
    fn username(&self) -> &str {
        &self.username
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

fn entries() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec(("[a-c]{1,4}", proptest::option::of("[a-c ]{1,6}")), 0..20).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(index, (username, display_name))| Entry {
                index,
                username,
                display_name,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn test_rank_is_a_permutation(entries in entries(), query in "[a-c]{1,3}") {
        let ranked = rank(entries.clone(), &query);
        let mut indices: Vec<usize> = ranked.iter().map(|e| e.index).collect();
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..entries.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_scores_descend_and_ties_keep_order(entries in entries(), query in "[a-c]{1,3}") {
        let ranked = rank(entries, &query);
        for pair in ranked.windows(2) {
            let (a, b) = (score(&pair[0], &query), score(&pair[1], &query));
            prop_assert!(a >= b);
            if a == b {
                prop_assert!(pair[0].index < pair[1].index);
            }
        }
    }

    #[test]
    fn test_exact_username_ranks_first(mut entries in entries(), query in "[a-c]{1,3}") {
        let index = entries.len();
        entries.push(Entry { index, username: query.clone(), display_name: None });

        let ranked = rank(entries, &query);
        prop_assert_eq!(ranked[0].username.as_str(), query.as_str());
    }
}
