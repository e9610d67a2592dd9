//! # varejo-core: Pure Logic for the Varejo Backend
//!
//! Query filtering, report periods, report assembly and domain types, with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Varejo Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /fornecedores  /produtos  /lotes  /relatorios/...           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    varejo-db (sqlx / PostgreSQL)                │   │
//! │  │    listings, product transactions, FIFO lookup, report sums    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ varejo-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  filter   │  │  period   │  │  report   │  │  catalog  │  │   │
//! │  │   │  parse    │  │  truncate │  │ financial │  │ allow-    │  │   │
//! │  │   │  compile  │  │  next     │  │ payroll   │  │ lists     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`filter`] - Query-string filters to parameterized SQL
//! - [`period`] - Day / week / month bucketing
//! - [`report`] - Financial series and payroll assembly
//! - [`catalog`] - Per-entity allow-lists and base queries
//! - [`types`] - Domain types (Product, Batch, Sale, ...)
//! - [`error`] - Validation errors
//!
//! ## Example Usage
//!
//! ```rust
//! use varejo_core::catalog::Listing;
//! use varejo_core::filter::{parse_filter, FilteredQuery, QueryParams};
//! use varejo_core::Supplier;
//!
//! let params = QueryParams::from_pairs([("filter-nome", "like.João"), ("limit", "10")]);
//! let spec = parse_filter(&params, Supplier::ATTRIBUTES).unwrap();
//! let query = FilteredQuery::new(Supplier::BASE_QUERY, Supplier::ALIAS, &spec).unwrap();
//!
//! assert!(query.sql.ends_with("WHERE f.nome LIKE '%' || $1 || '%' LIMIT $2"));
//! assert_eq!(query.values.len(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod filter;
pub mod period;
pub mod report;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use period::{DateRange, Granularity};
pub use types::*;
