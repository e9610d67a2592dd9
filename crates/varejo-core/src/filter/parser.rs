//! # Query Parser
//!
//! Turns raw query parameters plus an entity allow-list into a [`FilterSpec`].
//!
//! ## Accepted Parameters
//! ```text
//! ┌────────────────────┬──────────────────────────────────────────────────┐
//! │  Key               │  Value                                           │
//! ├────────────────────┼──────────────────────────────────────────────────┤
//! │  offset, limit     │  unsigned 32-bit integer                         │
//! │  sort              │  attr[,-attr...]   (`-` = descending)            │
//! │  filter-<attr>     │  <operator>.<value>  (split on the FIRST `.`)    │
//! └────────────────────┴──────────────────────────────────────────────────┘
//! ```
//!
//! Parsing fails closed: any attribute outside the allow-list, any operator
//! outside the attribute's vocabulary and any value that does not coerce to
//! the declared kind rejects the whole request. The store is never touched.

use super::model::{find_attribute, Attribute, Condition, FilterSpec, FilterValue, SortDirective};
use super::operator::Operator;
use super::params::QueryParams;
use crate::error::{CoreError, CoreResult};

/// Prefix of per-attribute filter keys.
pub const FILTER_PREFIX: &str = "filter-";

/// Parses `params` against `attributes`.
///
/// ## Example
/// ```
/// use varejo_core::filter::{parse_filter, Attribute, Operator, QueryParams};
///
/// let attrs = [Attribute::text("nome"), Attribute::float("preco_venda")];
/// let params = QueryParams::from_pairs([("filter-preco_venda", "gt.10.5")]);
/// let spec = parse_filter(&params, &attrs).unwrap();
/// assert_eq!(spec.conditions["preco_venda"].operator, Operator::Gt);
/// ```
pub fn parse_filter(params: &QueryParams, attributes: &[Attribute]) -> CoreResult<FilterSpec> {
    let mut spec = FilterSpec::new();

    spec.offset = parse_bound(params, "offset")?;
    spec.limit = parse_bound(params, "limit")?;

    if let Some(raw) = params.get("sort") {
        spec.sorts = parse_sort(raw, attributes)?;
    }

    for attribute in attributes {
        let key = format!("{}{}", FILTER_PREFIX, attribute.name);
        if let Some(raw) = params.get(&key) {
            let condition = parse_condition(&key, raw, attribute)?;
            spec.set_condition(attribute.name, condition);
        }
    }

    for key in params.keys() {
        if let Some(name) = key.strip_prefix(FILTER_PREFIX) {
            if find_attribute(attributes, name).is_none() {
                return Err(CoreError::invalid_parameter(key, "unknown attribute"));
            }
        }
    }

    Ok(spec)
}

fn parse_bound(params: &QueryParams, key: &str) -> CoreResult<Option<u32>> {
    params
        .get(key)
        .map(|raw| {
            parse_unsigned(raw)
                .ok_or_else(|| CoreError::invalid_parameter(key, "must be an unsigned integer"))
        })
        .transpose()
}

/// Parses plain ASCII digits as a `u32`. Signs and whitespace are rejected.
pub fn parse_unsigned(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_sort(raw: &str, attributes: &[Attribute]) -> CoreResult<Vec<SortDirective>> {
    raw.split(',')
        .map(|entry| {
            let (descending, name) = match entry.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, entry),
            };
            match find_attribute(attributes, name) {
                Some(attr) => Ok(SortDirective {
                    attribute: attr.name.to_string(),
                    descending,
                }),
                None => Err(CoreError::invalid_parameter(
                    "sort",
                    format!("cannot sort by `{}`", entry),
                )),
            }
        })
        .collect()
}

fn parse_condition(key: &str, raw: &str, attribute: &Attribute) -> CoreResult<Condition> {
    let (tag, value) = raw
        .split_once('.')
        .ok_or_else(|| CoreError::invalid_parameter(key, "expected `<operator>.<value>`"))?;

    if tag.is_empty() {
        return Err(CoreError::invalid_parameter(key, "missing operator"));
    }

    let operator = Operator::from_tag(tag)
        .filter(|op| attribute.kind.accepts(*op))
        .ok_or_else(|| CoreError::invalid_operator(key, tag))?;

    let value = FilterValue::coerce(attribute.kind, value)
        .map_err(|reason| CoreError::invalid_parameter(key, reason))?;

    Ok(Condition { operator, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const PRODUCT_ATTRS: &[Attribute] = &[
        Attribute::text("nome"),
        Attribute::text("categoria"),
        Attribute::float("preco_venda"),
        Attribute::date("validade"),
        Attribute::int("quantidade"),
    ];

    fn parse(pairs: &[(&str, &str)]) -> CoreResult<FilterSpec> {
        parse_filter(&QueryParams::from_pairs(pairs.iter().copied()), PRODUCT_ATTRS)
    }

    #[test]
    fn test_like_sort_and_paging() {
        let spec = parse(&[
            ("filter-nome", "like.João"),
            ("sort", "-nome"),
            ("offset", "0"),
            ("limit", "10"),
        ])
        .unwrap();

        assert_eq!(spec.conditions.len(), 1);
        assert_eq!(spec.conditions["nome"], Condition::new(Operator::Like, "João"));
        assert_eq!(spec.sorts, vec![SortDirective::descending("nome")]);
        assert_eq!(spec.offset, Some(0));
        assert_eq!(spec.limit, Some(10));
    }

    #[test]
    fn test_numeric_filter_splits_on_first_dot() {
        let spec = parse(&[("filter-preco_venda", "gt.10.5")]).unwrap();
        assert_eq!(
            spec.conditions["preco_venda"],
            Condition::new(Operator::Gt, 10.5)
        );
    }

    #[test]
    fn test_text_operator_on_number_is_rejected() {
        let err = parse(&[("filter-preco_venda", "like.abc")]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOperator { ref operator, .. } if operator == "like"));
    }

    #[test]
    fn test_ordered_operator_on_text_is_rejected() {
        let err = parse(&[("filter-nome", "gt.a")]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOperator { .. }));
    }

    #[test]
    fn test_unknown_operator() {
        let err = parse(&[("filter-nome", "between.a")]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOperator { .. }));
    }

    #[test]
    fn test_malformed_filter_value() {
        for raw in ["like", ".abc"] {
            let err = parse(&[("filter-nome", raw)]).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidParameter { .. }),
                "{raw} should be InvalidParameter"
            );
        }
    }

    #[test]
    fn test_value_coercion_failures() {
        for (key, raw) in [
            ("filter-preco_venda", "gt.abc"),
            ("filter-preco_venda", "lt.NaN"),
            ("filter-quantidade", "eq.1.5"),
            ("filter-validade", "lt.2024-13-01"),
        ] {
            let err = parse(&[(key, raw)]).unwrap_err();
            assert!(matches!(err, CoreError::InvalidParameter { .. }), "{key}={raw}");
        }
    }

    #[test]
    fn test_date_and_int_values() {
        let spec = parse(&[("filter-validade", "ge.2024-01-31"), ("filter-quantidade", "ne.3")])
            .unwrap();
        assert_eq!(
            spec.conditions["validade"],
            Condition::new(Operator::Ge, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        );
        assert_eq!(spec.conditions["quantidade"], Condition::new(Operator::Ne, 3i64));
    }

    #[test]
    fn test_sort_keeps_order_and_duplicates() {
        let spec = parse(&[("sort", "categoria,-nome,nome")]).unwrap();
        assert_eq!(
            spec.sorts,
            vec![
                SortDirective::ascending("categoria"),
                SortDirective::descending("nome"),
                SortDirective::ascending("nome"),
            ]
        );
    }

    #[test]
    fn test_sort_outside_allow_list() {
        for raw in ["senha", "nome,", "--nome", "nome;DROP TABLE Produto"] {
            let err = parse(&[("sort", raw)]).unwrap_err();
            assert!(matches!(err, CoreError::InvalidParameter { ref param, .. } if param == "sort"));
        }
    }

    #[test]
    fn test_unknown_filter_attribute() {
        let err = parse(&[("filter-senha", "eq.x")]).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidParameter { ref param, .. } if param == "filter-senha")
        );
    }

    #[test]
    fn test_operator_error_names_the_query_key() {
        let err = parse(&[("filter-preco_venda", "like.abc")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid operator `like` for parameter `filter-preco_venda`"
        );
    }

    #[test]
    fn test_empty_first_sort_disables_sorting() {
        let spec = parse(&[("sort", ""), ("sort", "-nome")]).unwrap();
        assert!(spec.sorts.is_empty());
    }

    #[test]
    fn test_bad_pagination() {
        for (key, raw) in [
            ("limit", "abc"),
            ("offset", "-1"),
            ("limit", "4294967296"),
            ("limit", "+10"),
            ("offset", " 5"),
        ] {
            let err = parse(&[(key, raw)]).unwrap_err();
            assert!(matches!(err, CoreError::InvalidParameter { ref param, .. } if param == key));
        }
    }

    #[test]
    fn test_empty_params_give_empty_spec() {
        let spec = parse(&[("limit", ""), ("sort", ""), ("unrelated", "x")]).unwrap();
        assert_eq!(spec, FilterSpec::new());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let pairs = [
            ("filter-nome", "ilike.caf"),
            ("filter-preco_venda", "le.9.99"),
            ("sort", "-preco_venda"),
        ];
        assert_eq!(parse(&pairs).unwrap(), parse(&pairs).unwrap());
    }
}
