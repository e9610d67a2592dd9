//! # Routes
//!
//! ## Route Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every path below is served under /api/v1                               │
//! │                                                                         │
//! │  GET    /health                          health::check                  │
//! │                                                                         │
//! │  GET    /fornecedores, /clientes, /lotes, /vendas, /item_venda,        │
//! │         /funcionarios, /ofertas, /item_ofertas, /aplica_oferta          │
//! │                                          listing::list::<Entity>        │
//! │                                                                         │
//! │  GET    /produtos                        product::list                  │
//! │  GET    /produtos/comercial              product::list_commercial       │
//! │  GET    /produtos/estrutural             product::list_structural       │
//! │  GET    /produtos/{id}                   product::get                   │
//! │  POST   /produtos                        product::create                │
//! │  DELETE /produtos/{id}                   product::delete                │
//! │                                                                         │
//! │  GET    /lotes/disponivel                batch::available               │
//! │  GET    /lotes/relatorio                 report::batch_spending         │
//! │  GET    /vendas/{id}/itens               sale::items                    │
//! │  GET    /vendas/{id}/ofertas             sale::offers                   │
//! │                                                                         │
//! │  GET    /relatorios/financeiro           report::financial              │
//! │  GET    /relatorios/folha-pagamento      report::payroll                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod batch;
mod health;
mod listing;
mod product;
mod report;
mod sale;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use varejo_core::filter::QueryParams;
use varejo_core::{Batch, Client, Employee, Offer, OfferApplication, OfferItem, Sale, SaleItem, Supplier};

use crate::SharedState;

/// Path prefix of every route.
pub const API_PREFIX: &str = "/api/v1";

/// Builds the application router.
pub fn router(state: SharedState) -> Router {
    let api = Router::new()
        .route("/health", get(health::check))
        .route("/fornecedores", get(listing::list::<Supplier>))
        .route("/clientes", get(listing::list::<Client>))
        .route("/lotes", get(listing::list::<Batch>))
        .route("/vendas", get(listing::list::<Sale>))
        .route("/item_venda", get(listing::list::<SaleItem>))
        .route("/funcionarios", get(listing::list::<Employee>))
        .route("/ofertas", get(listing::list::<Offer>))
        .route("/item_ofertas", get(listing::list::<OfferItem>))
        .route("/aplica_oferta", get(listing::list::<OfferApplication>))
        .route("/produtos", get(product::list).post(product::create))
        .route("/produtos/comercial", get(product::list_commercial))
        .route("/produtos/estrutural", get(product::list_structural))
        .route("/produtos/{id}", get(product::get).delete(product::delete))
        .route("/lotes/disponivel", get(batch::available))
        .route("/lotes/relatorio", get(report::batch_spending))
        .route("/vendas/{id}/itens", get(sale::items))
        .route("/vendas/{id}/ofertas", get(sale::offers))
        .route("/relatorios/financeiro", get(report::financial))
        .route("/relatorios/folha-pagamento", get(report::payroll));

    Router::new()
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Raw query pairs in the order they were sent.
pub(crate) type RawQuery = Vec<(String, String)>;

pub(crate) fn query_params(pairs: RawQuery) -> QueryParams {
    QueryParams::from_pairs(pairs)
}
