//! Type descriptor: one ordered, owned snapshot of a model's fields.

use std::collections::HashSet;

use crate::error::{OrmError, OrmResult};
use crate::reflect::{Reflect, Shape};
use crate::value::{FieldKind, Value};

/// One field of a described model.
#[derive(Debug, Clone, PartialEq)]
pub struct DescribedField {
    /// Declared field name.
    pub name: &'static str,
    /// Explicit, non-empty column tag.
    pub tag: Option<&'static str>,
    /// Resolved column name (tag, else snake-cased name).
    pub column: String,
    pub kind: FieldKind,
    pub primary_key: bool,
    /// Snapshot of the value; `None` when the kind has no literal rule.
    pub value: Option<Value>,
}

impl DescribedField {
    pub fn is_tagged(&self) -> bool {
        self.tag.is_some()
    }
}

/// Describe every field of `model` in declaration order.
///
/// Fails with [`OrmError::NotAStruct`] for scalars and with
/// [`OrmError::DuplicateColumn`] when two fields resolve to the same column.
pub fn describe<M: Reflect + ?Sized>(model: &M) -> OrmResult<Vec<DescribedField>> {
    let Shape::Struct(fields) = model.shape() else {
        return Err(OrmError::NotAStruct {
            type_name: model.type_name(),
        });
    };

    let mut seen = HashSet::with_capacity(fields.len());
    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let column = field.meta.column().into_owned();
        if !seen.insert(column.clone()) {
            return Err(OrmError::DuplicateColumn {
                type_name: model.type_name(),
                column,
            });
        }
        out.push(DescribedField {
            name: field.meta.name,
            tag: field.meta.tag(),
            column,
            kind: field.kind(),
            primary_key: field.meta.primary_key,
            value: field.value.value(),
        });
    }
    Ok(out)
}

/// Describe only the tagged fields, in declaration order.
///
/// This is the column set shared by SELECT and the scan binder.
pub fn describe_tagged<M: Reflect + ?Sized>(model: &M) -> OrmResult<Vec<DescribedField>> {
    let mut fields = describe(model)?;
    fields.retain(DescribedField::is_tagged);
    Ok(fields)
}

/// Look up a described field by its declared name.
pub fn field_by_name<M: Reflect + ?Sized>(model: &M, name: &str) -> OrmResult<DescribedField> {
    describe(model)?
        .into_iter()
        .find(|f| f.name == name)
        .ok_or_else(|| OrmError::missing_field(name))
}
