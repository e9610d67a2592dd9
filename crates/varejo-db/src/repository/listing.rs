//! # Filtered Listing
//!
//! One generic list operation shared by every entity in the catalog.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  FilterSpec ──► FilteredQuery::new(L::BASE_QUERY, L::ALIAS, spec)      │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │               sql + values ──► query_as_with ──► fetch_all (bounded)   │
//! │                                                       │                 │
//! │                                                       ▼                 │
//! │                                               Vec<L::Record>           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use std::time::Duration;
use tracing::debug;
use varejo_core::catalog::Listing;
use varejo_core::filter::{FilterSpec, FilteredQuery};

use crate::bind::query_as_with;
use crate::deadline::bounded;
use crate::error::DbResult;

/// Repository for filtered list queries.
///
/// ## Usage
/// ```rust,ignore
/// let spec = parse_filter(&params, Supplier::ATTRIBUTES)?;
/// let suppliers = db.listings().list::<Supplier>(&spec).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ListingRepository {
    pool: PgPool,
    timeout: Duration,
}

impl ListingRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        ListingRepository { pool, timeout }
    }

    /// Lists `L` rows matching `spec`.
    pub async fn list<L>(&self, spec: &FilterSpec) -> DbResult<Vec<L::Record>>
    where
        L: Listing,
        L::Record: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let query = FilteredQuery::new(L::BASE_QUERY, L::ALIAS, spec)?;

        debug!(
            entity = L::ENTITY,
            sql = %query.sql,
            binds = query.values.len(),
            "Listing"
        );

        let rows = bounded(
            self.timeout,
            L::ENTITY,
            query_as_with::<L::Record>(&query.sql, &query.values).fetch_all(&self.pool),
        )
        .await?;

        debug!(entity = L::ENTITY, count = rows.len(), "Listing returned rows");
        Ok(rows)
    }
}
