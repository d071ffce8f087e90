//! Client-side search, status filtering and date sorting
//!
//! Every list page narrows its collection the same way: a case-insensitive
//! substring match on one designated text field, an optional status equality
//! check and an optional date ordering. Items describe those fields through
//! [`Searchable`]; [`apply`] does the rest without copying the items.

use chrono::NaiveDateTime;
use std::cmp::Ordering;

/// Fields a list item exposes to filtering
pub trait Searchable {
    /// Text matched against the search query
    fn search_text(&self) -> &str;

    /// Status compared against a [`StatusFilter`], if the item has one
    fn status(&self) -> Option<&str> {
        None
    }

    /// Date used for ordering; undated items sort last in either direction
    fn sort_key(&self) -> Option<NaiveDateTime> {
        None
    }
}

/// Date ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep the order the feed returned
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortOrder {
    /// Cycles none → ascending → descending → none
    pub fn next(self) -> Self {
        match self {
            SortOrder::None => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::None => "feed order",
            SortOrder::Ascending => "oldest first",
            SortOrder::Descending => "newest first",
        }
    }
}

/// Status restriction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    /// Moves to the next entry of `choices`, wrapping back to [`StatusFilter::All`]
    pub fn cycle(&self, choices: &[&str]) -> Self {
        let next_index = match self {
            StatusFilter::All => 0,
            StatusFilter::Only(current) => choices
                .iter()
                .position(|c| *c == current.as_str())
                .map_or(choices.len(), |i| i + 1),
        };
        choices
            .get(next_index)
            .map_or(StatusFilter::All, |c| StatusFilter::Only(c.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status,
        }
    }

    fn matches(&self, status: Option<&str>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == Some(wanted.as_str()),
        }
    }
}

/// Everything a page can narrow a list by
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub status: StatusFilter,
    pub order: SortOrder,
}

/// Returns the items matching `query`, ordered as requested
///
/// An empty query yields every item in its original order. Sorting is stable,
/// so items with equal dates keep their relative order.
pub fn apply<'a, T: Searchable>(items: &'a [T], query: &Query) -> Vec<&'a T> {
    let needle = query.search.to_lowercase();

    let mut matched: Vec<&T> = items
        .iter()
        .filter(|item| needle.is_empty() || item.search_text().to_lowercase().contains(&needle))
        .filter(|item| query.status.matches(item.status()))
        .collect();

    if query.order != SortOrder::None {
        matched.sort_by(|a, b| compare_dates(a.sort_key(), b.sort_key(), query.order));
    }

    matched
}

fn compare_dates(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Descending => b.cmp(&a),
            _ => a.cmp(&b),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Debug, PartialEq)]
    struct Item {
        name: &'static str,
        status: Option<&'static str>,
        day: Option<u32>,
    }

    impl Searchable for Item {
        fn search_text(&self) -> &str {
            self.name
        }

        fn status(&self) -> Option<&str> {
            self.status
        }

        fn sort_key(&self) -> Option<NaiveDateTime> {
            NaiveDate::from_ymd_opt(2024, 1, self.day?)?.and_hms_opt(0, 0, 0)
        }
    }

    fn item(name: &'static str, status: Option<&'static str>, day: Option<u32>) -> Item {
        Item { name, status, day }
    }

    fn names(items: Vec<&Item>) -> Vec<&'static str> {
        items.into_iter().map(|i| i.name).collect()
    }

    fn fixture() -> Vec<Item> {
        vec![
            item("Curiosity", Some("active"), Some(20)),
            item("Spirit", Some("complete"), Some(5)),
            item("Opportunity", Some("complete"), Some(10)),
            item("Perseverance", Some("active"), Some(10)),
            item("Unnamed", None, None),
        ]
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let items = fixture();
        let result = apply(&items, &Query::default());
        assert_eq!(
            names(result),
            vec!["Curiosity", "Spirit", "Opportunity", "Perseverance", "Unnamed"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let items = fixture();
        let query = Query {
            search: "RIT".to_string(),
            ..Default::default()
        };
        assert_eq!(names(apply(&items, &query)), vec!["Spirit"]);

        let query = Query {
            search: "er".to_string(),
            ..Default::default()
        };
        assert_eq!(names(apply(&items, &query)), vec!["Perseverance"]);
    }

    #[test]
    fn test_search_keeps_surrounding_whitespace() {
        let items = vec![
            item("Kepler-22 c", None, None),
            item("Gliese-581c", None, None),
        ];
        let query = Query {
            search: " c".to_string(),
            ..Default::default()
        };
        assert_eq!(names(apply(&items, &query)), vec!["Kepler-22 c"]);
    }

    #[test]
    fn test_search_without_match_is_empty() {
        let items = fixture();
        let query = Query {
            search: "voyager".to_string(),
            ..Default::default()
        };
        assert!(apply(&items, &query).is_empty());
    }

    #[test]
    fn test_status_filter() {
        let items = fixture();
        let query = Query {
            status: StatusFilter::Only("complete".to_string()),
            ..Default::default()
        };
        assert_eq!(names(apply(&items, &query)), vec!["Spirit", "Opportunity"]);
    }

    #[test]
    fn test_status_filter_is_exact() {
        let items = fixture();
        let query = Query {
            status: StatusFilter::Only("Complete".to_string()),
            ..Default::default()
        };
        assert!(apply(&items, &query).is_empty());
    }

    #[test]
    fn test_sort_ascending_is_stable() {
        let items = fixture();
        let query = Query {
            order: SortOrder::Ascending,
            ..Default::default()
        };
        assert_eq!(
            names(apply(&items, &query)),
            vec!["Spirit", "Opportunity", "Perseverance", "Curiosity", "Unnamed"]
        );
    }

    #[test]
    fn test_sort_descending_is_stable_and_undated_last() {
        let items = fixture();
        let query = Query {
            order: SortOrder::Descending,
            ..Default::default()
        };
        assert_eq!(
            names(apply(&items, &query)),
            vec!["Curiosity", "Opportunity", "Perseverance", "Spirit", "Unnamed"]
        );
    }

    #[test]
    fn test_filters_combine() {
        let items = fixture();
        let query = Query {
            search: "o".to_string(),
            status: StatusFilter::Only("complete".to_string()),
            order: SortOrder::Descending,
        };
        assert_eq!(names(apply(&items, &query)), vec!["Opportunity"]);
    }

    #[test]
    fn test_status_filter_cycles_through_choices() {
        let choices = ["active", "complete"];
        let first = StatusFilter::All.cycle(&choices);
        assert_eq!(first, StatusFilter::Only("active".to_string()));
        let second = first.cycle(&choices);
        assert_eq!(second, StatusFilter::Only("complete".to_string()));
        assert_eq!(second.cycle(&choices), StatusFilter::All);
    }

    #[test]
    fn test_sort_order_cycles() {
        assert_eq!(SortOrder::None.next(), SortOrder::Ascending);
        assert_eq!(SortOrder::Ascending.next(), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.next(), SortOrder::None);
    }
}
