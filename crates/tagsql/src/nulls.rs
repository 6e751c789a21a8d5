//! Nullable wrappers.
//!
//! [`Null<T>`] keeps a validity flag next to the underlying value, so a field can
//! carry a value that is deliberately ignored. When `valid` is `false` the encoder
//! emits `NULL` regardless of `value`. `Option<T>` fields behave the same way.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value::{FieldKind, SqlType, Value};

/// A value that may be SQL `NULL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Null<T> {
    pub value: T,
    pub valid: bool,
}

pub type NullInt = Null<i64>;
pub type NullString = Null<String>;
pub type NullFloat = Null<f64>;
pub type NullTime = Null<NaiveDateTime>;
pub type NullBool = Null<bool>;
pub type NullUuid = Null<Uuid>;

impl<T> Null<T> {
    /// A valid (non-NULL) value.
    pub fn new(value: T) -> Self {
        Self { value, valid: true }
    }

    /// Borrow the value if it is valid.
    pub fn as_option(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }

    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }

    pub fn is_null(&self) -> bool {
        !self.valid
    }
}

impl<T: Default> Null<T> {
    /// An invalid (NULL) value.
    pub fn null() -> Self {
        Self::default()
    }
}

impl<T: Default> From<Option<T>> for Null<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(value) => Self::new(value),
            None => Self::null(),
        }
    }
}

impl<T: SqlType + Default> SqlType for Null<T> {
    const KIND: FieldKind = T::KIND.nullable();

    fn to_value(&self) -> Option<Value> {
        if !T::KIND.is_supported() {
            return None;
        }
        if self.valid {
            self.value.to_value()
        } else {
            Some(Value::Null)
        }
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(Self::null()),
            other => T::from_value(other).map(Self::new),
        }
    }
}
