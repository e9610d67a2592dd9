//! # SQL Fragment Compiler
//!
//! Compiles a [`FilterSpec`] into a parameterized SQL suffix.
//!
//! ## Output Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   WHERE f.cnpj = $1 AND f.nome ILIKE '%' || $2 || '%'                   │
//! │   ORDER BY f.nome DESC, f.cnpj                                          │
//! │   OFFSET $3 LIMIT $4                                                    │
//! │                                                                         │
//! │   values: [Text(cnpj), Text(nome), Int(offset), Int(limit)]            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the alias and allow-listed attribute names are written into the SQL
//! text. Every value goes through a `$n` placeholder, and `n` always equals
//! the position of the value in the list.

use std::fmt::Write;

use super::model::{FilterSpec, FilterValue};
use crate::error::{CoreError, CoreResult};

/// Compiles `spec` into a SQL suffix, appending bind values to `values`.
///
/// Placeholders continue from `values.len()`, so a caller can bind its own
/// leading parameters first.
///
/// ## Errors
/// `InvalidOperator` when a condition's operator is not in its value's
/// vocabulary. On error `values` is left exactly as it was passed in.
pub fn compile(spec: &FilterSpec, alias: &str, values: &mut Vec<FilterValue>) -> CoreResult<String> {
    let initial_len = values.len();
    match compile_into(spec, alias, values) {
        Ok(sql) => Ok(sql),
        Err(e) => {
            values.truncate(initial_len);
            Err(e)
        }
    }
}

fn compile_into(spec: &FilterSpec, alias: &str, values: &mut Vec<FilterValue>) -> CoreResult<String> {
    let mut sql = String::new();

    for (i, (attribute, condition)) in spec.conditions.iter().enumerate() {
        if !condition.value.kind().accepts(condition.operator) {
            return Err(CoreError::invalid_operator(
                format!("filter-{}", attribute),
                condition.operator.tag(),
            ));
        }

        values.push(condition.value.clone());
        let n = values.len();
        let keyword = if i == 0 { "WHERE" } else { "AND" };

        if condition.operator.is_substring() {
            let _ = write!(
                sql,
                " {} {}.{} {} '%' || ${} || '%'",
                keyword,
                alias,
                attribute,
                condition.operator.sql(),
                n
            );
        } else {
            let _ = write!(
                sql,
                " {} {}.{} {} ${}",
                keyword,
                alias,
                attribute,
                condition.operator.sql(),
                n
            );
        }
    }

    for (i, sort) in spec.sorts.iter().enumerate() {
        sql.push_str(if i == 0 { " ORDER BY " } else { ", " });
        let _ = write!(sql, "{}.{}", alias, sort.attribute);
        if sort.descending {
            sql.push_str(" DESC");
        }
    }

    for (keyword, bound) in [("OFFSET", spec.offset), ("LIMIT", spec.limit)] {
        if let Some(n) = bound.filter(|n| *n > 0) {
            values.push(FilterValue::Int(i64::from(n)));
            let _ = write!(sql, " {} ${}", keyword, values.len());
        }
    }

    Ok(sql)
}

// =============================================================================
// Filtered Query
// =============================================================================

/// A complete statement: base `SELECT` plus compiled suffix, with its binds.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredQuery {
    pub sql: String,
    pub values: Vec<FilterValue>,
}

impl FilteredQuery {
    /// Appends the compiled fragment of `spec` to `base`.
    ///
    /// `base` must select from a single relation aliased `alias` and carry no
    /// placeholders of its own.
    pub fn new(base: &str, alias: &str, spec: &FilterSpec) -> CoreResult<Self> {
        let mut values = Vec::with_capacity(spec.placeholder_count());
        let suffix = compile(spec, alias, &mut values)?;
        Ok(FilteredQuery {
            sql: format!("{}{}", base, suffix),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Condition, Operator, SortDirective};
    use chrono::NaiveDate;

    /// Counts `$n` placeholders in `sql`.
    fn placeholders(sql: &str) -> usize {
        sql.match_indices('$').count()
    }

    #[test]
    fn test_empty_spec_compiles_to_nothing() {
        let mut values = Vec::new();
        let sql = compile(&FilterSpec::new(), "f", &mut values).unwrap();
        assert_eq!(sql, "");
        assert!(values.is_empty());
    }

    #[test]
    fn test_like_sort_and_paging() {
        let spec = FilterSpec::new()
            .with_condition("nome", Operator::Like, "João")
            .with_sort(SortDirective::descending("nome"))
            .with_offset(0)
            .with_limit(10);

        let mut values = Vec::new();
        let sql = compile(&spec, "f", &mut values).unwrap();

        assert_eq!(sql, " WHERE f.nome LIKE '%' || $1 || '%' ORDER BY f.nome DESC LIMIT $2");
        assert_eq!(
            values,
            vec![FilterValue::Text("João".into()), FilterValue::Int(10)]
        );
    }

    #[test]
    fn test_conditions_in_attribute_order() {
        let spec = FilterSpec::new()
            .with_condition("preco_venda", Operator::Gt, 10.5)
            .with_condition("marca", Operator::ILike, "acme")
            .with_condition("categoria", Operator::Eq, "bebida")
            .with_sort(SortDirective::ascending("preco_venda"))
            .with_sort(SortDirective::ascending("nome"))
            .with_offset(20)
            .with_limit(5);

        let mut values = Vec::new();
        let sql = compile(&spec, "p", &mut values).unwrap();

        assert_eq!(
            sql,
            " WHERE p.categoria = $1 AND p.marca ILIKE '%' || $2 || '%' AND p.preco_venda > $3 \
             ORDER BY p.preco_venda, p.nome OFFSET $4 LIMIT $5"
        );
        assert_eq!(values.len(), 5);
        assert_eq!(values[2], FilterValue::Float(10.5));
        assert_eq!(values[3], FilterValue::Int(20));
        assert_eq!(placeholders(&sql), values.len());
    }

    #[test]
    fn test_numbering_continues_from_existing_values() {
        let spec = FilterSpec::new().with_condition("id_produto", Operator::Eq, 7i64);
        let mut values = vec![FilterValue::Int(1)];
        let sql = compile(&spec, "l", &mut values).unwrap();

        assert_eq!(sql, " WHERE l.id_produto = $2");
        assert_eq!(values, vec![FilterValue::Int(1), FilterValue::Int(7)]);
    }

    #[test]
    fn test_wrong_vocabulary_leaves_values_untouched() {
        let mut spec = FilterSpec::new().with_condition("categoria", Operator::Eq, "x");
        spec.set_condition("preco_venda", Condition::new(Operator::Like, 3.0));

        let mut values = vec![FilterValue::Int(99)];
        let err = compile(&spec, "p", &mut values).unwrap_err();

        assert!(matches!(err, CoreError::InvalidOperator { .. }));
        assert_eq!(values, vec![FilterValue::Int(99)]);
    }

    #[test]
    fn test_values_never_interpolated() {
        let hostile = "x' OR '1'='1";
        let spec = FilterSpec::new()
            .with_condition("nome", Operator::Eq, hostile)
            .with_condition(
                "validade",
                Operator::Lt,
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            );

        let query = FilteredQuery::new("SELECT * FROM Lote l", "l", &spec).unwrap();

        assert!(!query.sql.contains(hostile));
        assert!(!query.sql.contains("2024"));
        assert_eq!(placeholders(&query.sql), query.values.len());
    }

    #[test]
    fn test_filtered_query_appends_to_base() {
        let spec = FilterSpec::new().with_limit(3);
        let query = FilteredQuery::new("SELECT * FROM Fornecedor f", "f", &spec).unwrap();
        assert_eq!(query.sql, "SELECT * FROM Fornecedor f LIMIT $1");
        assert_eq!(query.values, vec![FilterValue::Int(3)]);
        assert_eq!(query.values.len(), spec.placeholder_count());
    }
}
