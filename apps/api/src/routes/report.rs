//! Report handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use tracing::info;
use varejo_core::report::{FinancialReport, FinancialRequest, PayrollReport, PayrollRequest};
use varejo_core::report::{SpendingByMonth, SpendingRequest};

use super::{query_params, RawQuery};
use crate::error::ApiResult;
use crate::SharedState;

/// `GET /relatorios/financeiro?start&end&granularity&projection_days`
pub async fn financial(
    State(state): State<SharedState>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> ApiResult<Json<FinancialReport>> {
    let Query(pairs) = query?;
    let request = FinancialRequest::from_params(&query_params(pairs))?;

    let report = varejo_db::financial_report(&state.db.reports(), &request).await?;
    info!(
        granularity = %request.granularity,
        points = report.series.len(),
        projected = report.projection.len(),
        "Financial report built"
    );
    Ok(Json(report))
}

/// `GET /relatorios/folha-pagamento?start&end&tipo`
pub async fn payroll(
    State(state): State<SharedState>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> ApiResult<Json<PayrollReport>> {
    let Query(pairs) = query?;
    let request = PayrollRequest::from_params(&query_params(pairs))?;

    let report = varejo_db::payroll_report(&state.db.reports(), &request).await?;
    info!(months = report.period_count, role = ?request.role, "Payroll report built");
    Ok(Json(report))
}

/// `GET /lotes/relatorio?ano`
pub async fn batch_spending(
    State(state): State<SharedState>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> ApiResult<Json<SpendingByMonth>> {
    let Query(pairs) = query?;
    let request = SpendingRequest::from_params(&query_params(pairs))?;

    let report = varejo_db::batch_spending_report(&state.db.reports(), &request).await?;
    info!(year = ?request.year, months = report.len(), "Batch spending report built");
    Ok(Json(report))
}
