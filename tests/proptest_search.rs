use hubsets::search::{rank_summaries, search_datasets, SearchOptions};
use proptest::prelude::*;

mod common;
mod proptest_helpers;

use common::MockRegistry;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn shown_count_is_min_of_results_and_limit(
        summaries in proptest_helpers::arb_summaries(40),
        limit in 0usize..50
    ) {
        let total = summaries.len();
        let registry = MockRegistry { summaries, ..MockRegistry::default() };
        let report = search_datasets(&registry, &SearchOptions {
            keyword: "any".to_string(),
            limit,
            show_files: false,
        });

        let expected = if limit == 0 { total } else { total.min(limit) };
        prop_assert_eq!(report.entries.len(), expected);
        prop_assert_eq!(report.total, total);
    }

    #[test]
    fn shown_entries_never_increase_in_downloads(
        summaries in proptest_helpers::arb_summaries(40),
        limit in 0usize..50
    ) {
        let registry = MockRegistry { summaries, ..MockRegistry::default() };
        let report = search_datasets(&registry, &SearchOptions {
            keyword: "any".to_string(),
            limit,
            show_files: false,
        });

        for pair in report.entries.windows(2) {
            prop_assert!(pair[0].summary.downloads >= pair[1].summary.downloads);
        }
    }

    #[test]
    fn ties_keep_registry_order(summaries in proptest_helpers::arb_summaries(40)) {
        let ranked = rank_summaries(summaries.clone());
        prop_assert_eq!(ranked.len(), summaries.len());

        for pair in ranked.windows(2) {
            if pair[0].downloads == pair[1].downloads {
                prop_assert!(
                    proptest_helpers::registry_index(&pair[0].id)
                        < proptest_helpers::registry_index(&pair[1].id)
                );
            }
        }
    }

    #[test]
    fn shown_entries_are_the_most_downloaded(
        summaries in proptest_helpers::arb_summaries(40),
        limit in 1usize..10
    ) {
        let registry = MockRegistry { summaries: summaries.clone(), ..MockRegistry::default() };
        let report = search_datasets(&registry, &SearchOptions {
            keyword: "any".to_string(),
            limit,
            show_files: false,
        });

        if let Some(last) = report.entries.last() {
            let shown: Vec<&str> = report.ids();
            for hidden in summaries.iter().filter(|s| !shown.contains(&s.id.as_str())) {
                prop_assert!(hidden.downloads <= last.summary.downloads);
            }
        }
    }
}
