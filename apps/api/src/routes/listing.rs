//! Filtered listing for every catalog entity.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::FromRow;
use tracing::debug;
use varejo_core::catalog::Listing;
use varejo_core::filter::parse_filter;

use super::{query_params, RawQuery};
use crate::error::ApiResult;
use crate::SharedState;

/// `GET /<entity>?offset&limit&sort&filter-<attr>=<op>.<value>`
pub async fn list<L>(
    State(state): State<SharedState>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<L::Record>>>
where
    L: Listing + 'static,
    L::Record: Serialize + for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
{
    let Query(pairs) = query?;
    let spec = parse_filter(&query_params(pairs), L::ATTRIBUTES)?;
    debug!(entity = L::ENTITY, conditions = spec.conditions.len(), "List request");

    let rows = state.db.listings().list::<L>(&spec).await?;
    Ok(Json(rows))
}
