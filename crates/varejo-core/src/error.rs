//! # Error Types
//!
//! Domain-specific error types for varejo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  varejo-core errors (this file)                                        │
//! │  └── CoreError        - Filter / report input rejected                 │
//! │                                                                         │
//! │  varejo-db errors (separate crate)                                     │
//! │  └── DbError          - Store failures, NotFound, Timeout              │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - Status code + {"detail": ...} body             │
//! │                                                                         │
//! │  Flow: CoreError → DbError → ApiError → HTTP client                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `CoreError` is a client error: it is raised before the store is
//! touched.

use thiserror::Error;

/// Client-facing validation errors raised by the pure layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Malformed pagination, sort, filter syntax, date or count.
    ///
    /// ## When This Occurs
    /// - `limit=abc`, `offset=-1`
    /// - `sort=unknown_column`
    /// - `filter-nome=like` (no `.` separator)
    /// - `start=2024-13-01`, `end` before `start`
    #[error("Invalid parameter `{param}`: {reason}")]
    InvalidParameter { param: String, reason: String },

    /// Operator not in the vocabulary of the attribute's type.
    ///
    /// ## Example
    /// `filter-preco_venda=like.abc` on a numeric column.
    #[error("Invalid operator `{operator}` for parameter `{param}`")]
    InvalidOperator { param: String, operator: String },
}

impl CoreError {
    /// Creates an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidParameter {
            param: param.into(),
            reason: reason.into(),
        }
    }

    /// Creates an InvalidOperator error.
    pub fn invalid_operator(param: impl Into<String>, operator: impl Into<String>) -> Self {
        CoreError::InvalidOperator {
            param: param.into(),
            operator: operator.into(),
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::invalid_parameter("limit", "must be an unsigned integer");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `limit`: must be an unsigned integer"
        );

        let err = CoreError::invalid_operator("filter-preco_venda", "like");
        assert_eq!(
            err.to_string(),
            "Invalid operator `like` for parameter `filter-preco_venda`"
        );
    }
}
