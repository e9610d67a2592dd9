//! # Batch Repository
//!
//! Stock lookups over `Lote`.
//!
//! ## FIFO-by-Expiry
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  remaining = quantidade_inicial - estragados - Σ item_venda.quantidade │
//! │                                                                         │
//! │  Product 7, need 5:                                                    │
//! │    Lote 11  validade 2024-01-02  (expired)        ✗                    │
//! │    Lote 12  validade 2024-03-01  remaining 3      ✗                    │
//! │    Lote 13  validade 2024-04-15  remaining 40     ← picked             │
//! │    Lote 14  validade 2024-06-30  remaining 90                          │
//! │    Lote 15  validade NULL        remaining 10     (sorts last)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::PgPool;
use std::time::Duration;
use tracing::debug;
use varejo_core::CoreError;

use crate::deadline::bounded;
use crate::error::{DbError, DbResult};

const FIND_AVAILABLE: &str = r#"
    SELECT l.id_lote::int8
    FROM Lote l
    LEFT JOIN (
        SELECT id_lote, SUM(quantidade) AS total_vendido
        FROM item_venda
        GROUP BY id_lote
    ) iv ON l.id_lote = iv.id_lote
    WHERE l.id_produto = $1
      AND (l.validade IS NULL OR l.validade > CURRENT_DATE)
      AND (l.quantidade_inicial - COALESCE(l.estragados, 0) - COALESCE(iv.total_vendido, 0)) >= $2
    ORDER BY l.validade ASC
    LIMIT 1
"#;

/// Repository for batch database operations.
#[derive(Debug, Clone)]
pub struct BatchRepository {
    pool: PgPool,
    timeout: Duration,
}

impl BatchRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        BatchRepository { pool, timeout }
    }

    /// Finds the batch of `product_id` that expires first and still holds at
    /// least `quantity` units.
    ///
    /// ## Returns
    /// * `Ok(id_lote)` - Batch to draw from
    /// * `Err(DbError::NotFound)` - No non-expired batch has enough stock
    pub async fn find_available(&self, product_id: i64, quantity: i64) -> DbResult<i64> {
        if quantity <= 0 {
            return Err(CoreError::invalid_parameter("quantidade", "must be positive").into());
        }

        debug!(product_id, quantity, "Looking up FIFO batch");

        let id: Option<i64> = bounded(
            self.timeout,
            "batch.find_available",
            sqlx::query_scalar(FIND_AVAILABLE)
                .bind(product_id)
                .bind(quantity)
                .fetch_optional(&self.pool),
        )
        .await?;

        id.ok_or_else(|| {
            DbError::not_found("Lote", format!("product {} with {} units", product_id, quantity))
        })
    }
}
