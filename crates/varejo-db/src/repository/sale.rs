//! # Sale Repository
//!
//! Detail views of a single sale: its lines and the offers applied to them.

use sqlx::PgPool;
use std::time::Duration;
use tracing::debug;
use varejo_core::{AppliedOffer, SaleItemDetail};

use crate::deadline::bounded;
use crate::error::DbResult;

const ITEMS_BY_SALE: &str = r#"
    SELECT
        iv.id_item_venda::int8, iv.id_venda::int8, iv.id_lote::int8,
        iv.quantidade::int8, iv.valor_unitario::float8,
        p.nome AS nome_produto, p.marca, l.validade::date
    FROM item_venda iv
    JOIN Lote l ON iv.id_lote = l.id_lote
    JOIN Produto p ON l.id_produto = p.id_produto
    WHERE iv.id_venda = $1
    ORDER BY iv.id_item_venda
"#;

const OFFERS_BY_SALE: &str = r#"
    SELECT
        ao.id_aplica_oferta::int8, ao.id_oferta::int8, ao.id_venda::int8,
        ao.id_item_venda::int8,
        o.nome AS nome_oferta, o.valor_fixo::float8, o.percentual_desconto::int8
    FROM aplica_oferta ao
    JOIN Oferta o ON ao.id_oferta = o.id_oferta
    WHERE ao.id_venda = $1
    ORDER BY ao.id_aplica_oferta
"#;

/// Repository for sale detail queries.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: PgPool,
    timeout: Duration,
}

impl SaleRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        SaleRepository { pool, timeout }
    }

    /// Lines of sale `sale_id` with product name, brand and batch expiry.
    ///
    /// An unknown sale yields an empty list.
    pub async fn items(&self, sale_id: i64) -> DbResult<Vec<SaleItemDetail>> {
        let items = bounded(
            self.timeout,
            "sale.items",
            sqlx::query_as::<_, SaleItemDetail>(ITEMS_BY_SALE)
                .bind(sale_id)
                .fetch_all(&self.pool),
        )
        .await?;

        debug!(sale_id, count = items.len(), "Loaded sale items");
        Ok(items)
    }

    /// Offers applied to lines of sale `sale_id`.
    pub async fn applied_offers(&self, sale_id: i64) -> DbResult<Vec<AppliedOffer>> {
        bounded(
            self.timeout,
            "sale.applied_offers",
            sqlx::query_as::<_, AppliedOffer>(OFFERS_BY_SALE)
                .bind(sale_id)
                .fetch_all(&self.pool),
        )
        .await
    }
}
