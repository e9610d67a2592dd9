//! # Filter Model
//!
//! The per-request `FilterSpec` and the pieces it is made of.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ?filter-nome=like.João&sort=-nome&limit=10                            │
//! │       │                                                                 │
//! │       ▼  parse_filter(params, Supplier::ATTRIBUTES)                    │
//! │  FilterSpec {                                                          │
//! │      conditions: { nome: like "João" },                                │
//! │      sorts:      [ -nome ],                                            │
//! │      offset:     None,                                                 │
//! │      limit:      Some(10),                                             │
//! │  }                                                                     │
//! │       │                                                                 │
//! │       ▼  FilteredQuery::new(base, "f", &spec)                          │
//! │  SQL + bound values ──► store ──► discarded with the request          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::operator::{Operator, ValueKind};

// =============================================================================
// Filter Value
// =============================================================================

/// A typed value bound into a query.
///
/// Also used for the pagination binds, which are always `Int`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
}

impl FilterValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            FilterValue::Text(_) => ValueKind::Text,
            FilterValue::Int(_) => ValueKind::Int,
            FilterValue::Float(_) => ValueKind::Float,
            FilterValue::Date(_) => ValueKind::Date,
        }
    }

    /// Coerces a raw query-string value to `kind`.
    ///
    /// ## Returns
    /// * `Ok(FilterValue)` - value of the requested kind
    /// * `Err(reason)` - human-readable coercion failure
    pub fn coerce(kind: ValueKind, raw: &str) -> Result<Self, String> {
        match kind {
            ValueKind::Text => Ok(FilterValue::Text(raw.to_string())),
            ValueKind::Int => raw
                .parse::<i64>()
                .map(FilterValue::Int)
                .map_err(|_| format!("`{}` is not an integer", raw)),
            ValueKind::Float => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(FilterValue::Float(v)),
                _ => Err(format!("`{}` is not a number", raw)),
            },
            ValueKind::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(FilterValue::Date)
                .map_err(|_| format!("`{}` is not a YYYY-MM-DD date", raw)),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Float(v)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(v: NaiveDate) -> Self {
        FilterValue::Date(v)
    }
}

// =============================================================================
// Condition
// =============================================================================

/// One `<operator>.<value>` pair for an attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub operator: Operator,
    pub value: FilterValue,
}

impl Condition {
    pub fn new(operator: Operator, value: impl Into<FilterValue>) -> Self {
        Condition {
            operator,
            value: value.into(),
        }
    }
}

// =============================================================================
// Sort Directive
// =============================================================================

/// An ORDER BY entry. Displays as written in the query string (`-nome`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortDirective {
    pub attribute: String,
    pub descending: bool,
}

impl SortDirective {
    pub fn ascending(attribute: impl Into<String>) -> Self {
        SortDirective {
            attribute: attribute.into(),
            descending: false,
        }
    }

    pub fn descending(attribute: impl Into<String>) -> Self {
        SortDirective {
            attribute: attribute.into(),
            descending: true,
        }
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.attribute)
        } else {
            f.write_str(&self.attribute)
        }
    }
}

// =============================================================================
// Filter Spec
// =============================================================================

/// Conditions, sorts and pagination for one list request.
///
/// Conditions are keyed by attribute name; inserting twice for the same
/// attribute keeps the last pair. Iteration is in attribute-name order, which
/// fixes placeholder numbering for a given spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSpec {
    pub conditions: BTreeMap<String, Condition>,
    pub sorts: Vec<SortDirective>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl FilterSpec {
    /// Creates an empty spec (no clauses).
    pub fn new() -> Self {
        FilterSpec::default()
    }

    /// Sets the condition for `attribute`, replacing any previous one.
    pub fn set_condition(&mut self, attribute: impl Into<String>, condition: Condition) {
        self.conditions.insert(attribute.into(), condition);
    }

    /// Builder form of [`FilterSpec::set_condition`].
    pub fn with_condition(
        mut self,
        attribute: impl Into<String>,
        operator: Operator,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.set_condition(attribute, Condition::new(operator, value));
        self
    }

    /// Appends a sort directive.
    pub fn with_sort(mut self, sort: SortDirective) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of `$n` placeholders the compiler emits for this spec.
    pub fn placeholder_count(&self) -> usize {
        let paging = [self.offset, self.limit]
            .iter()
            .filter(|v| matches!(v, Some(n) if *n > 0))
            .count();
        self.conditions.len() + paging
    }
}

// =============================================================================
// Attribute
// =============================================================================

/// An allow-listed column: its name (as used in the query string and in SQL)
/// and its declared kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: ValueKind,
}

impl Attribute {
    pub const fn text(name: &'static str) -> Self {
        Attribute { name, kind: ValueKind::Text }
    }

    pub const fn int(name: &'static str) -> Self {
        Attribute { name, kind: ValueKind::Int }
    }

    pub const fn float(name: &'static str) -> Self {
        Attribute { name, kind: ValueKind::Float }
    }

    pub const fn date(name: &'static str) -> Self {
        Attribute { name, kind: ValueKind::Date }
    }
}

/// Finds `name` in an allow-list.
pub fn find_attribute(attributes: &[Attribute], name: &str) -> Option<Attribute> {
    attributes.iter().copied().find(|a| a.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_values() {
        assert_eq!(
            FilterValue::coerce(ValueKind::Float, "10.5"),
            Ok(FilterValue::Float(10.5))
        );
        assert_eq!(FilterValue::coerce(ValueKind::Int, "42"), Ok(FilterValue::Int(42)));
        assert_eq!(
            FilterValue::coerce(ValueKind::Date, "2024-02-29"),
            Ok(FilterValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()))
        );
        assert_eq!(
            FilterValue::coerce(ValueKind::Text, "João"),
            Ok(FilterValue::Text("João".to_string()))
        );

        assert!(FilterValue::coerce(ValueKind::Int, "4.2").is_err());
        assert!(FilterValue::coerce(ValueKind::Float, "abc").is_err());
        assert!(FilterValue::coerce(ValueKind::Float, "NaN").is_err());
        assert!(FilterValue::coerce(ValueKind::Float, "inf").is_err());
        assert!(FilterValue::coerce(ValueKind::Date, "2023-02-29").is_err());
    }

    #[test]
    fn test_condition_overwrites() {
        let spec = FilterSpec::new()
            .with_condition("nome", Operator::Eq, "a")
            .with_condition("nome", Operator::Like, "b");

        assert_eq!(spec.conditions.len(), 1);
        assert_eq!(spec.conditions["nome"], Condition::new(Operator::Like, "b"));
    }

    #[test]
    fn test_sort_display() {
        assert_eq!(SortDirective::descending("nome").to_string(), "-nome");
        assert_eq!(SortDirective::ascending("cnpj").to_string(), "cnpj");
    }

    #[test]
    fn test_placeholder_count_ignores_zero_paging() {
        let spec = FilterSpec::new()
            .with_condition("nome", Operator::Eq, "a")
            .with_offset(0)
            .with_limit(10);
        assert_eq!(spec.placeholder_count(), 2);
    }
}
