use crate::record::{FieldValue, Record, Stats};
use std::collections::BTreeMap;

/// A structured filter over a record collection
///
/// All parts are ANDed together. The search term alone is an OR across
/// the searched fields.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Case-insensitive substring; blank means "match everything"
    pub search_term: String,
    /// Overrides `Record::search_fields` when set
    pub search_fields: Option<Vec<String>>,
    /// Field name -> expected value. Empty text values are wildcards.
    pub equality_filters: BTreeMap<String, FieldValue>,
    /// Boolean field name -> required value
    pub boolean_flags: BTreeMap<String, bool>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn search_in<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.equality_filters.insert(field.into(), value.into());
        self
    }

    pub fn flag(mut self, field: impl Into<String>, value: bool) -> Self {
        self.boolean_flags.insert(field.into(), value);
        self
    }

    /// True when no part of the query constrains anything
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.equality_filters.values().all(FieldValue::is_wildcard)
            && self.boolean_flags.is_empty()
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.matches_search(record) && self.matches_filters(record) && self.matches_flags(record)
    }

    fn matches_search<R: Record>(&self, record: &R) -> bool {
        if self.search_term.trim().is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();

        let hit = |name: &str| {
            record
                .field(name)
                .map(|value| value.to_string().to_lowercase().contains(&needle))
                .unwrap_or(false)
        };

        match &self.search_fields {
            Some(fields) => fields.iter().any(|f| hit(f.as_str())),
            None => R::search_fields().iter().any(|f| hit(*f)),
        }
    }

    fn matches_filters<R: Record>(&self, record: &R) -> bool {
        self.equality_filters.iter().all(|(name, expected)| {
            if expected.is_wildcard() {
                return true;
            }
            let expected = R::canonical_filter(name, expected);
            // Unknown fields fail closed
            record
                .field(name)
                .map(|actual| actual.matches(&expected))
                .unwrap_or(false)
        })
    }

    fn matches_flags<R: Record>(&self, record: &R) -> bool {
        self.boolean_flags.iter().all(|(name, expected)| {
            record
                .field(name)
                .and_then(|value| value.as_bool())
                .map(|actual| actual == *expected)
                .unwrap_or(false)
        })
    }
}

/// Matching records plus collection-wide counters
#[derive(Debug, Clone)]
pub struct QueryResult<'a, R> {
    /// Borrowed from the input, in input order
    pub matched: Vec<&'a R>,
    /// Computed over the unfiltered collection
    pub stats: Stats,
}

impl<'a, R: Record> QueryResult<'a, R> {
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.matched.iter().map(|r| r.id()).collect()
    }
}

/// Filter a collection and summarize it.
///
/// Stats never depend on `q`, so counters stay put while the visible
/// list changes.
pub fn query<'a, R: Record>(records: &'a [R], q: &Query) -> QueryResult<'a, R> {
    let matched: Vec<&R> = records.iter().filter(|r| q.matches(*r)).collect();

    tracing::debug!(
        total = records.len(),
        matched = matched.len(),
        search = %q.search_term,
        "query evaluated"
    );

    QueryResult {
        matched,
        stats: R::summarize(records),
    }
}

/// Distinct rendered values of a field, in first-seen order
///
/// Drives filter drop-downs like the brand selector.
pub fn distinct_values<R: Record>(records: &[R], field: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for value in records.iter().filter_map(|r| r.field(field)) {
        let value = value.to_string();
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u64,
        label: String,
        tag: String,
        done: bool,
    }

    impl Record for Item {
        fn id(&self) -> u64 {
            self.id
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "id" => Some(FieldValue::Int(self.id as i64)),
                "label" => Some(self.label.as_str().into()),
                "tag" => Some(self.tag.as_str().into()),
                "done" => Some(self.done.into()),
                _ => None,
            }
        }

        fn search_fields() -> &'static [&'static str] {
            &["label"]
        }

        fn summarize(records: &[Self]) -> Stats {
            Stats::new()
                .with("total", records.len())
                .with("done", records.iter().filter(|r| r.done).count())
        }
    }

    fn item(id: u64, label: &str, tag: &str, done: bool) -> Item {
        Item {
            id,
            label: label.to_string(),
            tag: tag.to_string(),
            done,
        }
    }

    fn items() -> Vec<Item> {
        vec![
            item(1, "Blue Shirt", "tops", false),
            item(2, "Red Jacket", "outer", true),
            item(3, "blue jeans", "bottoms", false),
        ]
    }

    #[test]
    fn test_empty_query_is_identity() {
        let records = items();
        let result = query(&records, &Query::new());
        assert_eq!(result.ids(), vec![1, 2, 3]);
        assert!(Query::new().is_empty());
    }

    #[test]
    fn test_search_uses_default_fields() {
        let records = items();
        let result = query(&records, &Query::new().search("BLUE"));
        assert_eq!(result.ids(), vec![1, 3]);

        // "outer" only appears in tag, which isn't searched by default
        let result = query(&records, &Query::new().search("outer"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_search_field_override() {
        let records = items();
        let result = query(&records, &Query::new().search("outer").search_in(["tag"]));
        assert_eq!(result.ids(), vec![2]);
    }

    #[test]
    fn test_whitespace_search_matches_everything() {
        let records = items();
        let result = query(&records, &Query::new().search("   "));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_filters_and_flags_are_conjunctive() {
        let records = items();
        let q = Query::new().search("blue").filter("tag", "bottoms").flag("done", false);
        assert_eq!(query(&records, &q).ids(), vec![3]);

        let q = Query::new().search("blue").flag("done", true);
        assert!(query(&records, &q).is_empty());
    }

    #[test]
    fn test_empty_filter_value_is_wildcard() {
        let records = items();
        let q = Query::new().filter("tag", "");
        assert_eq!(query(&records, &q).len(), 3);
        assert!(q.is_empty());
    }

    #[test]
    fn test_unknown_fields_fail_closed() {
        let records = items();
        assert!(query(&records, &Query::new().filter("colour", "blue")).is_empty());
        assert!(query(&records, &Query::new().flag("archived", false)).is_empty());
    }

    #[test]
    fn test_flag_on_non_boolean_field_fails_closed() {
        let records = items();
        assert!(query(&records, &Query::new().flag("label", true)).is_empty());
    }

    #[test]
    fn test_stats_ignore_query() {
        let records = items();
        let all = query(&records, &Query::new());
        let some = query(&records, &Query::new().search("jacket"));
        assert_eq!(all.stats, some.stats);
        assert_eq!(some.stats.get("total"), 3);
        assert_eq!(some.stats.get("done"), 1);
    }

    #[test]
    fn test_empty_collection() {
        let records: Vec<Item> = Vec::new();
        let result = query(&records, &Query::new().search("x"));
        assert!(result.is_empty());
        assert_eq!(result.stats.get("total"), 0);
        assert_eq!(result.stats.get("done"), 0);
    }

    #[test]
    fn test_distinct_values_first_seen_order() {
        let mut records = items();
        records.push(item(4, "Green Shirt", "tops", true));
        assert_eq!(
            distinct_values(&records, "tag"),
            vec!["tops", "outer", "bottoms"]
        );
        assert!(distinct_values(&records, "nope").is_empty());
    }
}
