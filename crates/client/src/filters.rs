//! Query filter encoding for collection endpoints.
//!
//! The remote API takes list filters as a JSON array of single-key objects
//! in one `filters` query parameter:
//! `[{"subject": {"operator": "~", "values": ["fix"]}}, ...]`.
//! Multiple criteria are conjunctive.

use serde_json::{Map, Value};

/// A single filter criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    field: String,
    operator: String,
    values: Vec<String>,
}

impl Filter {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        values: Vec<String>,
    ) -> Self {
        Self { field: field.into(), operator: operator.into(), values }
    }

    /// Exact-match criterion (`=`).
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, "=", vec![value.into()])
    }

    /// Substring-match criterion (`~`).
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, "~", vec![value.into()])
    }

    /// Date lower bound (`>=d`).
    pub fn on_or_after(field: impl Into<String>, date: impl Into<String>) -> Self {
        Self::new(field, ">=d", vec![date.into()])
    }

    /// Date upper bound (`<=d`).
    pub fn on_or_before(field: impl Into<String>, date: impl Into<String>) -> Self {
        Self::new(field, "<=d", vec![date.into()])
    }

    fn to_value(&self) -> Value {
        let mut criterion = Map::new();
        criterion.insert("operator".to_owned(), Value::String(self.operator.clone()));
        criterion.insert(
            "values".to_owned(),
            Value::Array(self.values.iter().cloned().map(Value::String).collect()),
        );

        let mut outer = Map::new();
        outer.insert(self.field.clone(), Value::Object(criterion));
        Value::Object(outer)
    }
}

/// Conjunctive set of criteria, serialized as one query-parameter value.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with(mut self, filter: Filter) -> Self {
        self.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// The JSON-array encoding passed as the `filters` query parameter.
    pub fn to_query_value(&self) -> String {
        Value::Array(self.filters.iter().map(Filter::to_value).collect()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_criterion_encodes_as_single_key_object() {
        let filters = FilterSet::new().with(Filter::equals("project", "4"));

        assert_eq!(
            filters.to_query_value(),
            r#"[{"project":{"operator":"=","values":["4"]}}]"#
        );
    }

    #[test]
    fn criteria_are_conjunctive_and_keep_insertion_order() {
        let filters = FilterSet::new()
            .with(Filter::contains("subject", "login bug"))
            .with(Filter::equals("project", "12"));

        assert_eq!(
            filters.to_query_value(),
            r#"[{"subject":{"operator":"~","values":["login bug"]}},{"project":{"operator":"=","values":["12"]}}]"#
        );
    }

    #[test]
    fn date_bounds_use_date_operators() {
        let filters = FilterSet::new()
            .with(Filter::on_or_after("spent_on", "2026-01-01"))
            .with(Filter::on_or_before("spent_on", "2026-01-31"));

        let encoded = filters.to_query_value();
        assert!(encoded.contains(r#""operator":">=d""#));
        assert!(encoded.contains(r#""operator":"<=d""#));
    }

    #[test]
    fn empty_set_encodes_as_empty_array() {
        let filters = FilterSet::new();
        assert!(filters.is_empty());
        assert_eq!(filters.to_query_value(), "[]");
    }
}
