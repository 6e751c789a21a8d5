//! Derive macros for tagsql
//!
//! Provides `#[derive(Model)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod model;
mod sql_ident;

/// Derive the field description of a struct (`Reflect`, `ReflectMut`) and,
/// when a table is given, `Table`.
///
/// # Example
///
/// ```ignore
/// use tagsql::Model;
///
/// #[derive(Model)]
/// #[orm(table = "users")]
/// struct User {
///     #[orm(id, column = "id")]
///     user_id: i64,
///     #[orm(column = "user_name")]
///     name: String,
///     // untagged: column `email`, not bound by the scanner
///     email: Option<String>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(table = "name")]` - Implement `Table` with this table name
/// - `#[orm(column = "name")]` - Column tag; an empty string counts as untagged
/// - `#[orm(id)]` - Mark field as the key used by UPDATE
#[proc_macro_derive(Model, attributes(orm))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    model::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
