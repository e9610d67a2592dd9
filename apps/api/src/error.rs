//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Varejo                                 │
//! │                                                                         │
//! │  Handler -> Result<T, ApiError>                                         │
//! │         │                                                               │
//! │         ├── CoreError (bad filter, date, count) ───────► 400            │
//! │         ├── Extractor rejection (path, body, query) ───► 400            │
//! │         ├── DbError::NotFound ─────────────────────────► 404            │
//! │         ├── DbError::UniqueViolation / FK violation ───► 409            │
//! │         ├── DbError::Timeout ──────────────────────────► 504            │
//! │         └── anything else ─────────────────────────────► 500            │
//! │                                          (detail logged, not returned) │
//! │                                                                         │
//! │  Body: {"detail": "<message>"}                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use varejo_core::CoreError;
use varejo_db::DbError;

/// Error returned from every handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

/// Body sent to the client.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        ApiError {
            status,
            detail: detail.into(),
        }
    }

    /// Creates a 400 error.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, detail)
    }

    /// Creates a 500 error with the generic message.
    pub fn internal() -> Self {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: &self.detail })).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(e) => e.into(),
            DbError::NotFound { .. } => ApiError::new(StatusCode::NOT_FOUND, err.to_string()),
            DbError::UniqueViolation { message } => {
                tracing::warn!(%message, "Unique violation");
                ApiError::new(StatusCode::CONFLICT, "Duplicate value")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!(%message, "Foreign key violation");
                ApiError::new(StatusCode::CONFLICT, "Record is referenced by or references missing data")
            }
            DbError::Timeout(limit) => {
                tracing::error!(?limit, "Database operation timed out");
                ApiError::new(StatusCode::GATEWAY_TIMEOUT, "Request timed out")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Database operation failed");
                ApiError::internal()
            }
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use varejo_core::catalog::{CommercialProducts, Listing};
    use varejo_core::filter::{parse_filter, QueryParams};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DbError::Core(CoreError::invalid_parameter("limit", "x")), StatusCode::BAD_REQUEST),
            (DbError::Core(CoreError::invalid_operator("nome", "gt")), StatusCode::BAD_REQUEST),
            (DbError::not_found("Produto", 7), StatusCode::NOT_FOUND),
            (
                DbError::ForeignKeyViolation { message: "lote_id_produto_fkey".into() },
                StatusCode::CONFLICT,
            ),
            (DbError::Timeout(Duration::from_secs(2)), StatusCode::GATEWAY_TIMEOUT),
            (DbError::QueryFailed("syntax error".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DbError::PoolExhausted, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_internal_detail_is_generic() {
        let err = ApiError::from(DbError::QueryFailed("relation \"venda\" does not exist".into()));
        assert_eq!(err.detail, "Internal server error");
    }

    #[test]
    fn test_client_detail_is_kept() {
        let params = QueryParams::from_pairs([("filter-preco_venda", "like.abc")]);
        let err = ApiError::from(parse_filter(&params, CommercialProducts::ATTRIBUTES).unwrap_err());
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.detail, "Invalid operator `like` for parameter `filter-preco_venda`");

        let err = ApiError::from(DbError::not_found("Produto", 42));
        assert_eq!(err.detail, "Produto not found: 42");
    }
}
