//! # tagsql
//!
//! Attribute-driven SQL generation and row binding for plain structs.
//!
//! A model describes its fields once (via `#[derive(Model)]`), and tagsql turns
//! that description into statements, SQL literals and scan targets.
//!
//! ## Features
//!
//! - **Statements**: INSERT / INSERT IGNORE / REPLACE / SELECT / TRUNCATE / UPDATE
//! - **Literals**: escaped, NULL-aware value tuples for multi-row inserts
//! - **Nullable wrappers**: [`Null<T>`] and `Option<T>` encode as `NULL` when empty
//! - **Row binding**: ordered scan targets that line up with SELECT's columns
//!
//! ```ignore
//! use tagsql::prelude::*;
//!
//! #[derive(Model)]
//! #[orm(table = "test")]
//! struct TestStruct {
//!     #[orm(column = "id")]
//!     id: uuid::Uuid,
//!     #[orm(column = "name")]
//!     name: String,
//!     #[orm(column = "an_int")]
//!     an_int: i64,
//! }
//!
//! let sql = format!("{} {}", stmt::insert(&m)?, value_tuple(&m)?);
//! // INSERT INTO test (id,name,an_int) VALUES ('86f6...','asdf',7)
//! ```

// Lets `#[derive(Model)]` output (which names `::tagsql`) compile inside this crate.
extern crate self as tagsql;

pub mod case;
pub mod config;
pub mod describe;
pub mod error;
pub mod literal;
pub mod nulls;
pub mod prelude;
pub mod reflect;
pub mod scan;
pub mod stmt;
pub mod tuple;
pub mod value;

pub use case::to_snake_case;
pub use config::{QuoteStyle, StatementConfig};
pub use describe::{DescribedField, describe, describe_tagged, field_by_name};
pub use error::{OrmError, OrmResult};
pub use literal::{encode_field, encode_text, encode_value, escape_string};
pub use nulls::{Null, NullBool, NullFloat, NullInt, NullString, NullTime, NullUuid};
pub use reflect::{FieldMeta, FieldMut, FieldRef, Reflect, ReflectMut, Shape, ShapeMut, Table};
pub use scan::{ScanTarget, map_to_struct, scan_row, scanner, set_field};
pub use stmt::StatementBuilder;
pub use tuple::{csv_headers, literals, string_slice, value_tuple, value_tuples};
pub use value::{FieldKind, SqlField, SqlType, Value};

#[cfg(feature = "derive")]
pub use tagsql_derive::Model;
