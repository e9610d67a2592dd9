//! Batch availability.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use varejo_core::filter::QueryParams;
use varejo_core::{CoreError, CoreResult};

use super::{query_params, RawQuery};
use crate::error::ApiResult;
use crate::SharedState;

#[derive(Debug, Serialize)]
pub struct AvailableBatch {
    pub batch_id: i64,
}

fn required_int(params: &QueryParams, key: &str) -> CoreResult<i64> {
    params
        .get(key)
        .ok_or_else(|| CoreError::invalid_parameter(key, "is required"))?
        .trim()
        .parse()
        .map_err(|_| CoreError::invalid_parameter(key, "must be an integer"))
}

/// `GET /lotes/disponivel?id_produto=&quantidade=`
///
/// The batch of the product that expires first and can still serve the
/// requested quantity.
pub async fn available(
    State(state): State<SharedState>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> ApiResult<Json<AvailableBatch>> {
    let Query(pairs) = query?;
    let params = query_params(pairs);
    let product_id = required_int(&params, "id_produto")?;
    let quantity = required_int(&params, "quantidade")?;

    let batch_id = state.db.batches().find_available(product_id, quantity).await?;
    Ok(Json(AvailableBatch { batch_id }))
}
