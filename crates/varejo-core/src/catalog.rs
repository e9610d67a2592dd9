//! # Entity Catalog
//!
//! For every listable entity: its filter/sort allow-list, the base `SELECT`
//! and the single alias the compiled fragment refers to.
//!
//! ## Base Query Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SELECT * FROM (                                                        │
//! │      SELECT id_lote::int8, ..., preco_unitario::float8, ...            │
//! │      FROM Lote                                                          │
//! │  ) AS l                                          ◄── one alias          │
//! │                                                                         │
//! │  + " WHERE l.preco_unitario > $1 ORDER BY l.validade LIMIT $2"          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The inner select normalises column types (`int8`, `float8`, `date`,
//! `timestamp`, `text`) so rows decode into the domain types and every
//! allow-listed attribute is reachable through the outer alias.

use crate::filter::Attribute;
use crate::types::{
    Batch, Client, Employee, Offer, OfferApplication, OfferItem, ProductRecord, Sale, SaleItem,
    Supplier,
};

/// A listable entity.
pub trait Listing {
    /// Row type produced by [`Listing::BASE_QUERY`].
    type Record;

    /// Name used in logs and `NotFound` errors.
    const ENTITY: &'static str;

    /// Alias of the relation in [`Listing::BASE_QUERY`].
    const ALIAS: &'static str;

    /// `SELECT` without any clause after the `FROM`.
    const BASE_QUERY: &'static str;

    /// Attributes accepted in `filter-<attr>` and `sort`.
    const ATTRIBUTES: &'static [Attribute];
}

impl Listing for Supplier {
    type Record = Supplier;
    const ENTITY: &'static str = "Fornecedor";
    const ALIAS: &'static str = "f";
    const BASE_QUERY: &'static str =
        "SELECT * FROM (SELECT id_fornecedor::int8, nome, cnpj FROM Fornecedor) AS f";
    const ATTRIBUTES: &'static [Attribute] = &[Attribute::text("nome"), Attribute::text("cnpj")];
}

impl Listing for Client {
    type Record = Client;
    const ENTITY: &'static str = "Cliente";
    const ALIAS: &'static str = "c";
    const BASE_QUERY: &'static str = "SELECT * FROM (SELECT id_cliente::int8, nome, cpf, \
         data_nascimento::date FROM Cliente) AS c";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::text("nome"),
        Attribute::text("cpf"),
        Attribute::date("data_nascimento"),
    ];
}

const PRODUCT_ATTRIBUTES: &[Attribute] = &[
    Attribute::text("nome"),
    Attribute::text("categoria"),
    Attribute::text("marca"),
];

/// Every product, with the sale price of commercial ones.
pub struct AllProducts;

impl Listing for AllProducts {
    type Record = ProductRecord;
    const ENTITY: &'static str = "Produto";
    const ALIAS: &'static str = "p";
    const BASE_QUERY: &'static str = "SELECT * FROM (SELECT p.id_produto::int8, p.nome, \
         p.categoria, p.marca, c.preco_venda::float8 FROM Produto p \
         LEFT JOIN ProdutoComercial c USING (id_produto)) AS p";
    const ATTRIBUTES: &'static [Attribute] = PRODUCT_ATTRIBUTES;
}

/// Products with a sale price.
pub struct CommercialProducts;

impl Listing for CommercialProducts {
    type Record = ProductRecord;
    const ENTITY: &'static str = "ProdutoComercial";
    const ALIAS: &'static str = "p";
    const BASE_QUERY: &'static str = "SELECT * FROM (SELECT p.id_produto::int8, p.nome, \
         p.categoria, p.marca, c.preco_venda::float8 FROM Produto p \
         JOIN ProdutoComercial c USING (id_produto)) AS p";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::text("nome"),
        Attribute::text("categoria"),
        Attribute::text("marca"),
        Attribute::float("preco_venda"),
    ];
}

/// Products without a sale price.
pub struct StructuralProducts;

impl Listing for StructuralProducts {
    type Record = ProductRecord;
    const ENTITY: &'static str = "Produto";
    const ALIAS: &'static str = "p";
    const BASE_QUERY: &'static str = "SELECT * FROM (SELECT p.id_produto::int8, p.nome, \
         p.categoria, p.marca, NULL::float8 AS preco_venda FROM Produto p \
         LEFT JOIN ProdutoComercial c USING (id_produto) WHERE c.id_produto IS NULL) AS p";
    const ATTRIBUTES: &'static [Attribute] = PRODUCT_ATTRIBUTES;
}

impl Listing for Batch {
    type Record = Batch;
    const ENTITY: &'static str = "Lote";
    const ALIAS: &'static str = "l";
    const BASE_QUERY: &'static str = "SELECT * FROM (SELECT id_lote::int8, id_fornecedor::int8, \
         id_produto::int8, data_fornecimento::date, validade::date, preco_unitario::float8, \
         estragados::int8, quantidade_inicial::int8 FROM Lote) AS l";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::int("id_fornecedor"),
        Attribute::int("id_produto"),
        Attribute::float("preco_unitario"),
        Attribute::int("estragados"),
        Attribute::int("quantidade_inicial"),
        Attribute::date("data_fornecimento"),
        Attribute::date("validade"),
    ];
}

impl Listing for Sale {
    type Record = Sale;
    const ENTITY: &'static str = "Venda";
    const ALIAS: &'static str = "v";
    const BASE_QUERY: &'static str = "SELECT * FROM (SELECT id_venda::int8, id_cliente::int8, \
         id_funcionario::int8, data_hora_venda::timestamp, data_hora_pagamento::timestamp, \
         tipo_pagamento::text FROM Venda) AS v";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::text("tipo_pagamento"),
        Attribute::int("id_cliente"),
        Attribute::int("id_funcionario"),
        Attribute::date("data_hora_venda"),
        Attribute::date("data_hora_pagamento"),
    ];
}

impl Listing for SaleItem {
    type Record = SaleItem;
    const ENTITY: &'static str = "ItemVenda";
    const ALIAS: &'static str = "iv";
    const BASE_QUERY: &'static str = "SELECT * FROM (SELECT id_item_venda::int8, id_venda::int8, \
         id_lote::int8, quantidade::int8, valor_unitario::float8 FROM item_venda) AS iv";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::int("id_venda"),
        Attribute::int("id_lote"),
        Attribute::int("quantidade"),
        Attribute::float("valor_unitario"),
    ];
}

impl Listing for Employee {
    type Record = Employee;
    const ENTITY: &'static str = "Funcionario";
    const ALIAS: &'static str = "fu";
    const BASE_QUERY: &'static str = "SELECT * FROM (SELECT id_funcionario::int8, nome, cpf, \
         tipo::text, expediente::text, salario::float8, data_contratacao::date \
         FROM Funcionario) AS fu";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::text("nome"),
        Attribute::text("cpf"),
        Attribute::text("tipo"),
        Attribute::text("expediente"),
        Attribute::float("salario"),
        Attribute::date("data_contratacao"),
    ];
}

impl Listing for Offer {
    type Record = Offer;
    const ENTITY: &'static str = "Oferta";
    const ALIAS: &'static str = "o";
    const BASE_QUERY: &'static str = "SELECT * FROM (SELECT id_oferta::int8, nome, \
         valor_fixo::float8, percentual_desconto::int8, data_criacao::date, \
         data_inicio::date, data_fim::date FROM Oferta) AS o";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::text("nome"),
        Attribute::float("valor_fixo"),
        Attribute::int("percentual_desconto"),
        Attribute::date("data_criacao"),
        Attribute::date("data_inicio"),
        Attribute::date("data_fim"),
    ];
}

impl Listing for OfferItem {
    type Record = OfferItem;
    const ENTITY: &'static str = "ItemOferta";
    const ALIAS: &'static str = "io";
    const BASE_QUERY: &'static str = "SELECT * FROM (SELECT quantidade::int8, id_produto::int8, \
         id_oferta::int8 FROM contem_item_oferta) AS io";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::int("quantidade"),
        Attribute::int("id_produto"),
        Attribute::int("id_oferta"),
    ];
}

impl Listing for OfferApplication {
    type Record = OfferApplication;
    const ENTITY: &'static str = "AplicaOferta";
    const ALIAS: &'static str = "ao";
    const BASE_QUERY: &'static str = "SELECT * FROM (SELECT id_aplica_oferta::int8, \
         id_oferta::int8, id_venda::int8, id_item_venda::int8 FROM aplica_oferta) AS ao";
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::int("id_oferta"),
        Attribute::int("id_venda"),
        Attribute::int("id_item_venda"),
    ];
}
