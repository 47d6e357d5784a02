//! Search report rendering
//!
//! Results from every query share one counter so a reader can refer to
//! "result 7" unambiguously across the whole report.

use crate::kagi::{OrganicResult, QueryResultSet};

const PUBLISHED_PLACEHOLDER: &str = "Not Available";

/// Render a report with one section per query
///
/// `result_sets[i]` must belong to `queries[i]`. Only organic results are
/// rendered; related-search items are dropped.
pub fn format_search_results<Q: AsRef<str>>(queries: &[Q], result_sets: &[QueryResultSet]) -> String {
    let mut next_number = 1usize;

    let sections: Vec<String> = queries
        .iter()
        .zip(result_sets)
        .map(|(query, items)| {
            let blocks: Vec<String> = items
                .iter()
                .filter_map(|item| item.as_organic())
                .map(|result| {
                    let block = format_result(next_number, result);
                    next_number += 1;
                    block
                })
                .collect();

            format!(
                "-----\nResults for search query \"{}\":\n-----\n{}",
                query.as_ref(),
                blocks.join("\n\n")
            )
        })
        .collect();

    sections.join("\n\n")
}

fn format_result(number: usize, result: &OrganicResult) -> String {
    format!(
        "{}: {}\n{}\nPublished Date: {}\n{}",
        number,
        result.title,
        result.url,
        result.published.as_deref().unwrap_or(PUBLISHED_PLACEHOLDER),
        result.snippet
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kagi::SearchItem;

    fn related() -> SearchItem {
        SearchItem::Related(vec!["something else".to_string()])
    }

    /// Numbers at the start of result blocks, in report order
    fn result_numbers(report: &str) -> Vec<usize> {
        report
            .lines()
            .filter_map(|line| line.split_once(": "))
            .filter_map(|(n, _)| n.parse().ok())
            .collect()
    }

    #[test]
    fn test_single_result_layout() {
        let sets = vec![vec![SearchItem::organic(
            "Test Result",
            "https://example.com",
            "This is a test result snippet.",
            Some("2023-05-01"),
        )]];

        let report = format_search_results(&["test query"], &sets);

        assert_eq!(
            report,
            "-----\nResults for search query \"test query\":\n-----\n\
             1: Test Result\nhttps://example.com\nPublished Date: 2023-05-01\nThis is a test result snippet."
        );
    }

    #[test]
    fn test_numbering_continues_across_queries() {
        let sets = vec![
            vec![
                SearchItem::organic("A1", "https://a/1", "", None),
                related(),
                SearchItem::organic("A2", "https://a/2", "", None),
            ],
            vec![SearchItem::organic("B1", "https://b/1", "", None)],
            vec![
                SearchItem::organic("C1", "https://c/1", "", None),
                SearchItem::organic("C2", "https://c/2", "", None),
            ],
        ];

        let report = format_search_results(&["a", "b", "c"], &sets);

        assert_eq!(result_numbers(&report), vec![1, 2, 3, 4, 5]);
        assert_eq!(report.matches("Results for search query").count(), 3);
        assert!(report.contains("3: B1"));
        assert!(report.contains("5: C2"));
    }

    #[test]
    fn test_related_items_never_rendered() {
        let sets = vec![vec![
            related(),
            SearchItem::organic("Kept", "https://kept", "", None),
            related(),
        ]];

        let report = format_search_results(&["q"], &sets);

        assert!(!report.contains("something else"));
        assert_eq!(result_numbers(&report), vec![1]);
    }

    #[test]
    fn test_unknown_items_skipped_without_gaps() {
        let sets = vec![
            vec![
                SearchItem::organic("A", "https://a", "", None),
                SearchItem::Other(2),
            ],
            vec![
                SearchItem::Other(9),
                SearchItem::organic("B", "https://b", "", None),
            ],
        ];

        let report = format_search_results(&["a", "b"], &sets);

        assert_eq!(result_numbers(&report), vec![1, 2]);
        assert!(report.contains("2: B"));
    }

    #[test]
    fn test_missing_published_uses_placeholder() {
        let sets = vec![vec![SearchItem::organic("T", "https://t", "s", None)]];
        let report = format_search_results(&["q"], &sets);
        assert!(report.contains("Published Date: Not Available\n"));
    }

    #[test]
    fn test_query_without_organic_results_keeps_header() {
        let sets = vec![
            vec![SearchItem::organic("X", "https://x", "snip", None), related()],
            vec![],
        ];

        let report = format_search_results(&["a", "b"], &sets);

        assert!(report.contains("1: X\n"));
        assert!(!report.contains("2: "));
        assert!(report.ends_with("-----\nResults for search query \"b\":\n-----\n"));
    }

    #[test]
    fn test_query_is_quoted_verbatim() {
        let sets = vec![vec![]];
        let report = format_search_results(&["rust \"async\" traits"], &sets);
        assert!(report.contains("Results for search query \"rust \"async\" traits\":"));
    }
}
