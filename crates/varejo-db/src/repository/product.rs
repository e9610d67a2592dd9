//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Produto (id_produto, nome, categoria, marca)      ← every product     │
//! │     ▲                                                                   │
//! │     │ id_produto                                                        │
//! │  ProdutoComercial (id_produto, preco_venda)        ← commercial only   │
//! │                                                                         │
//! │  Structural: row in Produto only                                       │
//! │  Commercial: row in both, written in ONE transaction                   │
//! │                                                                         │
//! │     BEGIN                                                               │
//! │       INSERT INTO Produto ... RETURNING id_produto                      │
//! │       INSERT INTO ProdutoComercial (id_produto, preco_venda)            │
//! │     COMMIT          (any error → transaction dropped → ROLLBACK)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::PgPool;
use std::time::Duration;
use tracing::{debug, info};
use varejo_core::catalog::{AllProducts, CommercialProducts, Listing, StructuralProducts};
use varejo_core::filter::FilterSpec;
use varejo_core::{NewProduct, Product, ProductRecord};

use crate::deadline::bounded;
use crate::error::{DbError, DbResult};
use crate::repository::listing::ListingRepository;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let product = repo.get_by_id(42).await?;
/// let created = repo.create(NewProduct { sale_price: Some(9.9), ..body }).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
    timeout: Duration,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        ProductRepository { pool, timeout }
    }

    fn listings(&self) -> ListingRepository {
        ListingRepository::new(self.pool.clone(), self.timeout)
    }

    /// Lists every product, commercial ones with their sale price.
    pub async fn list(&self, spec: &FilterSpec) -> DbResult<Vec<Product>> {
        let rows = self.listings().list::<AllProducts>(spec).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Lists commercial products only.
    pub async fn list_commercial(&self, spec: &FilterSpec) -> DbResult<Vec<Product>> {
        let rows = self.listings().list::<CommercialProducts>(spec).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Lists structural products only.
    pub async fn list_structural(&self, spec: &FilterSpec) -> DbResult<Vec<Product>> {
        let rows = self.listings().list::<StructuralProducts>(spec).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by id.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product found
    /// * `Err(DbError::NotFound)` - No product with this id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Product> {
        let sql = format!("{} WHERE p.id_produto = $1", AllProducts::BASE_QUERY);

        let row = bounded(
            self.timeout,
            "product.get_by_id",
            sqlx::query_as::<_, ProductRecord>(&sql)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?;

        row.map(Product::from)
            .ok_or_else(|| DbError::not_found(AllProducts::ENTITY, id))
    }

    /// Creates a product. A `sale_price` makes it commercial.
    ///
    /// ## Transaction
    /// The commercial row is written in the same transaction as the base row.
    /// If either insert fails, nothing is committed.
    pub async fn create(&self, new: NewProduct) -> DbResult<Product> {
        new.validate()?;

        debug!(name = %new.name, commercial = new.sale_price.is_some(), "Creating product");

        let id = bounded(self.timeout, "product.create", async {
            let mut tx = self.pool.begin().await?;

            let id: i64 = sqlx::query_scalar(
                "INSERT INTO Produto (nome, categoria, marca) VALUES ($1, $2, $3) \
                 RETURNING id_produto::int8",
            )
            .bind(&new.name)
            .bind(&new.category)
            .bind(&new.brand)
            .fetch_one(&mut *tx)
            .await?;

            if let Some(price) = new.sale_price {
                sqlx::query("INSERT INTO ProdutoComercial (id_produto, preco_venda) VALUES ($1, $2)")
                    .bind(id)
                    .bind(price)
                    .execute(&mut *tx)
                    .await?;
            }

            tx.commit().await?;
            Ok::<_, sqlx::Error>(id)
        })
        .await?;

        info!(id, "Product created");
        Ok(new.into_product(id))
    }

    /// Deletes a product and its commercial row.
    ///
    /// ## Returns
    /// * `Ok(())` - Product deleted
    /// * `Err(DbError::NotFound)` - No product with this id
    /// * `Err(DbError::ForeignKeyViolation)` - Batches or offers still reference it
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let deleted = bounded(self.timeout, "product.delete", async {
            let mut tx = self.pool.begin().await?;

            sqlx::query("DELETE FROM ProdutoComercial WHERE id_produto = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            let result = sqlx::query("DELETE FROM Produto WHERE id_produto = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                return Ok::<u64, sqlx::Error>(0);
            }

            tx.commit().await?;
            Ok::<_, sqlx::Error>(result.rows_affected())
        })
        .await?;

        if deleted == 0 {
            return Err(DbError::not_found(AllProducts::ENTITY, id));
        }

        info!(id, "Product deleted");
        Ok(())
    }
}
