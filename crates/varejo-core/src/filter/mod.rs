//! # Query Filtering
//!
//! URL query parameters → validated [`FilterSpec`] → parameterized SQL suffix.
//!
//! ## Pipeline
//! ```text
//! ┌──────────────┐   parse_filter    ┌──────────────┐   compile    ┌──────────────────┐
//! │ QueryParams  │ ────────────────► │  FilterSpec  │ ───────────► │ SQL + Vec<Value> │
//! │ + allow-list │  (fails closed)   │              │              │ ($1..$n bound)   │
//! └──────────────┘                   └──────────────┘              └──────────────────┘
//! ```

mod compiler;
mod model;
mod operator;
mod params;
mod parser;

pub use compiler::{compile, FilteredQuery};
pub use model::{find_attribute, Attribute, Condition, FilterSpec, FilterValue, SortDirective};
pub use operator::{Operator, ValueKind, ORDERED_OPERATORS, TEXT_OPERATORS};
pub use params::QueryParams;
pub use parser::{parse_filter, parse_unsigned, FILTER_PREFIX};
