//! # varejo-db: Database Layer for Varejo
//!
//! PostgreSQL access through sqlx. Every operation is bounded by the
//! configured query deadline.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Varejo Data Flow                                 │
//! │                                                                         │
//! │  axum handler (GET /lotes?filter-validade=lt.2024-06-01)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     varejo-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │   Reports    │  │   │
//! │  │   │   (pool.rs)   │    │               │    │              │  │   │
//! │  │   │               │    │ Listing       │    │ ReportSource │  │   │
//! │  │   │ PgPool        │◄───│ Product       │    │ financial    │  │   │
//! │  │   │ query_timeout │    │ Batch, Sale   │    │ payroll      │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     PostgreSQL                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`error`] - Database error types
//! - [`repository`] - Listing, product, batch and sale repositories
//! - [`report`] - Report data source and aggregators
//!
//! ## Usage
//!
//! ```rust,ignore
//! use varejo_db::{Database, DbConfig};
//!
//! let db = Database::connect(DbConfig::new(url)).await?;
//!
//! let spec = parse_filter(&params, Supplier::ATTRIBUTES)?;
//! let suppliers = db.listings().list::<Supplier>(&spec).await?;
//!
//! let report = varejo_db::report::financial_report(&db.reports(), &request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

mod bind;
pub mod deadline;
pub mod error;
pub mod pool;
pub mod report;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use report::{
    batch_spending_report, financial_report, payroll_report, PgReportSource, ReportSource,
};

// Repository re-exports for convenience
pub use repository::batch::BatchRepository;
pub use repository::listing::ListingRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
