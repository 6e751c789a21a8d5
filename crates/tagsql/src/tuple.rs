//! Value tuples and plain-text field lists.

use crate::describe::describe;
use crate::error::OrmResult;
use crate::literal::{encode_field, encode_field_text};
use crate::reflect::Reflect;

/// Encode every field of `model` as a SQL literal, in declaration order.
///
/// Stops at the first field without a literal rule.
pub fn literals<M: Reflect + ?Sized>(model: &M) -> OrmResult<Vec<String>> {
    describe(model)?.iter().map(encode_field).collect()
}

/// `(lit,lit,...)` for one model, matching the INSERT column list.
pub fn value_tuple<M: Reflect + ?Sized>(model: &M) -> OrmResult<String> {
    Ok(format!("({})", literals(model)?.join(",")))
}

/// Value tuples of several models joined by `,`.
pub fn value_tuples<M: Reflect>(models: &[M]) -> OrmResult<String> {
    let tuples = models
        .iter()
        .map(value_tuple)
        .collect::<OrmResult<Vec<_>>>()?;
    Ok(tuples.join(","))
}

/// Render every field as plain text (unquoted, unescaped), in declaration order.
pub fn string_slice<M: Reflect + ?Sized>(model: &M) -> OrmResult<Vec<String>> {
    describe(model)?.iter().map(encode_field_text).collect()
}

/// The raw tag of every field, in declaration order; untagged fields give `""`.
pub fn csv_headers<M: Reflect + ?Sized>(model: &M) -> OrmResult<Vec<String>> {
    Ok(describe(model)?
        .into_iter()
        .map(|f| f.tag.unwrap_or_default().to_string())
        .collect())
}
