//! # Repository Module
//!
//! Database repository implementations for Varejo.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Handler                                                                │
//! │       │  db.products().get_by_id(42)                                   │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list / list_commercial / list_structural                          │
//! │  ├── get_by_id                                                          │
//! │  ├── create   (transaction)                                             │
//! │  └── delete   (transaction)                                             │
//! │       │                                                                 │
//! │       │  SQL with $n binds, bounded by the query deadline               │
//! │       ▼                                                                 │
//! │  PostgreSQL                                                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ListingRepository`](listing::ListingRepository) - Filtered list for any catalog entity
//! - [`ProductRepository`](product::ProductRepository) - Product lookup, create, delete
//! - [`BatchRepository`](batch::BatchRepository) - FIFO batch availability
//! - [`SaleRepository`](sale::SaleRepository) - Sale lines and applied offers

pub mod batch;
pub mod listing;
pub mod product;
pub mod sale;
