//! Sale detail handlers.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use varejo_core::{AppliedOffer, SaleItemDetail};

use crate::error::ApiResult;
use crate::SharedState;

/// `GET /vendas/{id}/itens`
pub async fn items(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<SaleItemDetail>>> {
    let Path(sale_id) = id?;
    Ok(Json(state.db.sales().items(sale_id).await?))
}

/// `GET /vendas/{id}/ofertas`
pub async fn offers(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<AppliedOffer>>> {
    let Path(sale_id) = id?;
    Ok(Json(state.db.sales().applied_offers(sale_id).await?))
}
