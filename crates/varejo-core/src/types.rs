//! # Domain Types
//!
//! Entities of the retail/inventory domain.
//!
//! ## Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Supplier ──┐                                                          │
//! │             ├──► Batch ◄── SaleItem ──► Sale ◄── Client                │
//! │  Product ───┘      │           ▲          ▲                            │
//! │    │               │           │          └──── Employee               │
//! │    │         remaining =       │                                       │
//! │    │   initial - spoiled - Σ sold                                      │
//! │    │                           │                                       │
//! │    └──► OfferItem ◄── Offer ──► OfferApplication                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Column names are Portuguese (`nome`, `id_lote`, ...). Rust fields are
//! English and map to the columns through `sqlx(rename)` when the `sqlx`
//! feature is on.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Supplier
// =============================================================================

/// A supplier (`Fornecedor`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Supplier {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_fornecedor"))]
    pub id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "nome"))]
    pub name: String,
    pub cnpj: String,
}

// =============================================================================
// Client
// =============================================================================

/// A client (`Cliente`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Client {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_cliente"))]
    pub id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "nome"))]
    pub name: String,
    pub cpf: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "data_nascimento"))]
    #[ts(as = "Option<String>")]
    pub birth_date: Option<NaiveDate>,
}

// =============================================================================
// Product
// =============================================================================

/// A product. Commercial products carry a sale price; structural ones
/// (supplies, packaging) do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub brand: String,
    #[serde(flatten)]
    pub kind: ProductKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "lowercase")]
#[ts(export)]
pub enum ProductKind {
    Structural,
    Commercial { sale_price: f64 },
}

impl Product {
    /// Sale price, present only for commercial products.
    pub fn sale_price(&self) -> Option<f64> {
        match self.kind {
            ProductKind::Commercial { sale_price } => Some(sale_price),
            ProductKind::Structural => None,
        }
    }

    #[inline]
    pub fn is_commercial(&self) -> bool {
        self.sale_price().is_some()
    }
}

/// Flat product row as stored: `Produto` left-joined with `ProdutoComercial`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductRecord {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_produto"))]
    pub id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "nome"))]
    pub name: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "categoria"))]
    pub category: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "marca"))]
    pub brand: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "preco_venda"))]
    pub sale_price: Option<f64>,
}

impl From<ProductRecord> for Product {
    fn from(r: ProductRecord) -> Self {
        let kind = match r.sale_price {
            Some(sale_price) => ProductKind::Commercial { sale_price },
            None => ProductKind::Structural,
        };
        Product {
            id: r.id,
            name: r.name,
            category: r.category,
            brand: r.brand,
            kind,
        }
    }
}

/// Request body for creating a product. A `sale_price` makes it commercial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub brand: String,
    #[serde(default)]
    pub sale_price: Option<f64>,
}

impl NewProduct {
    /// Checks the body before it reaches the store.
    ///
    /// ## Rules
    /// - `name` must not be blank
    /// - `sale_price`, when present, must be a finite non-negative number
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::invalid_parameter("name", "must not be empty"));
        }
        if let Some(price) = self.sale_price {
            if !price.is_finite() || price < 0.0 {
                return Err(CoreError::invalid_parameter(
                    "sale_price",
                    "must be a non-negative number",
                ));
            }
        }
        Ok(())
    }

    /// Builds the stored product once the id is known.
    pub fn into_product(self, id: i64) -> Product {
        ProductRecord {
            id,
            name: self.name,
            category: self.category,
            brand: self.brand,
            sale_price: self.sale_price,
        }
        .into()
    }
}

// =============================================================================
// Batch
// =============================================================================

/// A received shipment of one product from one supplier (`Lote`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Batch {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_lote"))]
    pub id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_fornecedor"))]
    pub supplier_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_produto"))]
    pub product_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "data_fornecimento"))]
    #[ts(as = "String")]
    pub supplied_on: NaiveDate,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "validade"))]
    #[ts(as = "Option<String>")]
    pub expires_on: Option<NaiveDate>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "preco_unitario"))]
    pub unit_price: f64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "estragados"))]
    pub spoiled: Option<i64>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "quantidade_inicial"))]
    pub initial_quantity: Option<i64>,
}

// =============================================================================
// Sale
// =============================================================================

/// A sale (`Venda`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_venda"))]
    pub id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_cliente"))]
    pub client_id: Option<i64>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_funcionario"))]
    pub employee_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "data_hora_venda"))]
    #[ts(as = "String")]
    pub sold_at: NaiveDateTime,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "data_hora_pagamento"))]
    #[ts(as = "Option<String>")]
    pub paid_at: Option<NaiveDateTime>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "tipo_pagamento"))]
    pub payment_type: String,
}

// =============================================================================
// Sale Item
// =============================================================================

/// A sale line drawn from a specific batch (`item_venda`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleItem {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_item_venda"))]
    pub id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_venda"))]
    pub sale_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_lote"))]
    pub batch_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "quantidade"))]
    pub quantity: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "valor_unitario"))]
    pub unit_price: f64,
}

/// A sale line with its product name, brand and batch expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleItemDetail {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub item: SaleItem,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "nome_produto"))]
    pub product_name: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "marca"))]
    pub brand: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "validade"))]
    #[ts(as = "Option<String>")]
    pub expires_on: Option<NaiveDate>,
}

// =============================================================================
// Employee
// =============================================================================

/// An employee (`Funcionario`). `role` selects the payroll bonus rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Employee {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_funcionario"))]
    pub id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "nome"))]
    pub name: String,
    pub cpf: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "tipo"))]
    pub role: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "expediente"))]
    pub schedule: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "salario"))]
    pub salary: f64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "data_contratacao"))]
    #[ts(as = "String")]
    pub hired_on: NaiveDate,
}

// =============================================================================
// Offers
// =============================================================================

/// A discount rule (`Oferta`): a fixed amount or a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Offer {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_oferta"))]
    pub id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "nome"))]
    pub name: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "valor_fixo"))]
    pub fixed_value: Option<f64>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "percentual_desconto"))]
    pub discount_percent: Option<i64>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "data_criacao"))]
    #[ts(as = "Option<String>")]
    pub created_on: Option<NaiveDate>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "data_inicio"))]
    #[ts(as = "Option<String>")]
    pub starts_on: Option<NaiveDate>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "data_fim"))]
    #[ts(as = "Option<String>")]
    pub ends_on: Option<NaiveDate>,
}

/// Quantity of a product required by an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OfferItem {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "quantidade"))]
    pub quantity: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_produto"))]
    pub product_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_oferta"))]
    pub offer_id: i64,
}

/// An offer applied to one sale line (`aplica_oferta`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OfferApplication {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_aplica_oferta"))]
    pub id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_oferta"))]
    pub offer_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_venda"))]
    pub sale_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id_item_venda"))]
    pub sale_item_id: i64,
}

/// An applied offer with the offer's name and discount terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct AppliedOffer {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub application: OfferApplication,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "nome_oferta"))]
    pub offer_name: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "valor_fixo"))]
    pub fixed_value: Option<f64>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "percentual_desconto"))]
    pub discount_percent: Option<i64>,
}
