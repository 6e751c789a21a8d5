//! Row scan binding.
//!
//! [`scanner`] hands out one [`ScanTarget`] per tagged field, in declaration
//! order, which is exactly the column order of [`stmt::select`](crate::stmt::select).
//! A row decoder walks the row and the targets side by side:
//!
//! ```ignore
//! let sql = tagsql::stmt::select(&user)?;
//! for row in driver.query(&sql)? {
//!     let mut user = User::default();
//!     tagsql::scan_row(&mut user, row.into_values())?;
//! }
//! ```

use crate::error::{OrmError, OrmResult};
use crate::reflect::{FieldMut, ReflectMut, ShapeMut};
use crate::value::{FieldKind, SqlField, Value};

/// An addressable field a single row value is decoded into.
pub struct ScanTarget<'a> {
    field: &'static str,
    column: &'static str,
    target: &'a mut dyn SqlField,
}

impl std::fmt::Debug for ScanTarget<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanTarget")
            .field("field", &self.field)
            .field("column", &self.column)
            .field("kind", &self.target.kind())
            .finish()
    }
}

impl<'a> ScanTarget<'a> {
    /// Declared field name.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Column the field is bound to (its tag).
    pub fn column(&self) -> &'static str {
        self.column
    }

    pub fn kind(&self) -> FieldKind {
        self.target.kind()
    }

    /// Decode `value` into the field.
    pub fn scan(&mut self, value: Value) -> OrmResult<()> {
        assign(self.field, self.column, &mut *self.target, value)
    }
}

fn assign(field: &str, column: &str, target: &mut dyn SqlField, value: Value) -> OrmResult<()> {
    let kind = target.kind();
    if !kind.is_supported() {
        tracing::debug!(target: "tagsql.sql", field, kind = %kind, "no decode rule for field");
        return Err(OrmError::unsupported(field, kind));
    }
    target.assign(value).map_err(|message| {
        tracing::debug!(target: "tagsql.sql", field, column, error = %message, "decode failed");
        OrmError::decode(column, message)
    })
}

fn fields_mut<M: ReflectMut + ?Sized>(model: &mut M) -> OrmResult<Vec<FieldMut<'_>>> {
    let type_name = model.type_name();
    match model.shape_mut() {
        ShapeMut::Struct(fields) => Ok(fields),
        ShapeMut::Scalar => Err(OrmError::NotAStruct { type_name }),
    }
}

/// One scan target per tagged field, in declaration order; untagged fields are skipped.
pub fn scanner<M: ReflectMut + ?Sized>(model: &mut M) -> OrmResult<Vec<ScanTarget<'_>>> {
    Ok(fields_mut(model)?
        .into_iter()
        .filter_map(|f| {
            let column = f.meta.tag()?;
            Some(ScanTarget {
                field: f.meta.name,
                column,
                target: f.target,
            })
        })
        .collect())
}

/// Decode one row into `model`, positionally against [`scanner`]'s targets.
pub fn scan_row<M, I>(model: &mut M, row: I) -> OrmResult<()>
where
    M: ReflectMut + ?Sized,
    I: IntoIterator<Item = Value>,
{
    let values: Vec<Value> = row.into_iter().collect();
    let mut targets = scanner(model)?;
    if values.len() != targets.len() {
        return Err(OrmError::ColumnCount {
            expected: targets.len(),
            actual: values.len(),
        });
    }
    for (target, value) in targets.iter_mut().zip(values) {
        target.scan(value)?;
    }
    Ok(())
}

/// Decode `value` into the field declared as `name` (tagged or not).
pub fn set_field<M: ReflectMut + ?Sized>(model: &mut M, name: &str, value: Value) -> OrmResult<()> {
    let field = fields_mut(model)?
        .into_iter()
        .find(|f| f.meta.name == name)
        .ok_or_else(|| OrmError::missing_field(name))?;
    let column = field.meta.column();
    assign(field.meta.name, &column, field.target, value)
}

/// Apply every `(field name, value)` pair to `model`. The first failure wins.
pub fn map_to_struct<M, I, K>(model: &mut M, entries: I) -> OrmResult<()>
where
    M: ReflectMut + ?Sized,
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    for (name, value) in entries {
        set_field(model, name.as_ref(), value)?;
    }
    Ok(())
}
