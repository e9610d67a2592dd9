//! Product handlers.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use varejo_core::catalog::{AllProducts, CommercialProducts, Listing, StructuralProducts};
use varejo_core::filter::{parse_filter, FilterSpec};
use varejo_core::{NewProduct, Product};

use super::{query_params, RawQuery};
use crate::error::ApiResult;
use crate::SharedState;

fn spec_for<L: Listing>(query: Result<Query<RawQuery>, QueryRejection>) -> ApiResult<FilterSpec> {
    let Query(pairs) = query?;
    Ok(parse_filter(&query_params(pairs), L::ATTRIBUTES)?)
}

/// `GET /produtos`
pub async fn list(
    State(state): State<SharedState>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let spec = spec_for::<AllProducts>(query)?;
    Ok(Json(state.db.products().list(&spec).await?))
}

/// `GET /produtos/comercial`
pub async fn list_commercial(
    State(state): State<SharedState>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let spec = spec_for::<CommercialProducts>(query)?;
    Ok(Json(state.db.products().list_commercial(&spec).await?))
}

/// `GET /produtos/estrutural`
pub async fn list_structural(
    State(state): State<SharedState>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let spec = spec_for::<StructuralProducts>(query)?;
    Ok(Json(state.db.products().list_structural(&spec).await?))
}

/// `GET /produtos/{id}`
pub async fn get(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    Ok(Json(state.db.products().get_by_id(id).await?))
}

/// `POST /produtos`
pub async fn create(
    State(state): State<SharedState>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(new) = body?;
    let product = state.db.products().create(new).await?;
    info!(id = product.id, commercial = product.is_commercial(), "Product registered");
    Ok((StatusCode::CREATED, Json(product)))
}

/// `DELETE /produtos/{id}`
pub async fn delete(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.db.products().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
