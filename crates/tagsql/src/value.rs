//! Field kinds, row values and the per-type encode/decode rules.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

/// The value kind of a model field, as seen by the literal encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    Timestamp,
    Uuid,
    NullableInt,
    NullableString,
    NullableFloat,
    NullableTime,
    NullableBool,
    NullableUuid,
    /// A known Rust type with no literal rule. Carries the type name.
    Unknown(&'static str),
}

impl FieldKind {
    /// The nullable counterpart of this kind.
    ///
    /// Nullable kinds map to themselves and `Unknown` stays `Unknown`.
    pub const fn nullable(self) -> FieldKind {
        match self {
            FieldKind::String | FieldKind::NullableString => FieldKind::NullableString,
            FieldKind::Integer | FieldKind::NullableInt => FieldKind::NullableInt,
            FieldKind::Float | FieldKind::NullableFloat => FieldKind::NullableFloat,
            FieldKind::Boolean | FieldKind::NullableBool => FieldKind::NullableBool,
            FieldKind::Timestamp | FieldKind::NullableTime => FieldKind::NullableTime,
            FieldKind::Uuid | FieldKind::NullableUuid => FieldKind::NullableUuid,
            FieldKind::Unknown(name) => FieldKind::Unknown(name),
        }
    }

    pub const fn is_nullable(self) -> bool {
        matches!(
            self,
            FieldKind::NullableInt
                | FieldKind::NullableString
                | FieldKind::NullableFloat
                | FieldKind::NullableTime
                | FieldKind::NullableBool
                | FieldKind::NullableUuid
        )
    }

    /// Whether the encoder has a rule for this kind.
    pub const fn is_supported(self) -> bool {
        !matches!(self, FieldKind::Unknown(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::Timestamp => "timestamp",
            FieldKind::Uuid => "uuid",
            FieldKind::NullableInt => "nullable int",
            FieldKind::NullableString => "nullable string",
            FieldKind::NullableFloat => "nullable float",
            FieldKind::NullableTime => "nullable time",
            FieldKind::NullableBool => "nullable bool",
            FieldKind::NullableUuid => "nullable uuid",
            FieldKind::Unknown(name) => name,
        };
        f.write_str(name)
    }
}

/// A single dynamically-typed SQL value.
///
/// This is both the snapshot the encoder works from and the cell type a row
/// decoder feeds into scan targets.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(NaiveDateTime),
    Uuid(Uuid),
}

impl Value {
    /// Short name of the variant, used in decode error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Text(_) => "text",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Timestamp(_) => "timestamp",
            Value::Uuid(_) => "uuid",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

pub(crate) fn mismatch(expected: &str, got: &Value) -> String {
    format!("expected {expected}, got {}", got.type_name())
}

/// Per-type SQL rule: its kind, how to snapshot it and how to decode it.
///
/// Implemented for every type a model field may have. Types without a literal
/// rule still implement it with an `Unknown` kind so that the failure surfaces
/// as [`OrmError::UnsupportedFieldType`](crate::OrmError::UnsupportedFieldType)
/// naming the field.
pub trait SqlType: Sized {
    const KIND: FieldKind;

    /// Snapshot the value. `None` means the type has no literal rule.
    fn to_value(&self) -> Option<Value>;

    /// Decode a row value into this type.
    fn from_value(value: Value) -> Result<Self, String>;
}

/// Object-safe view of [`SqlType`], used by the descriptor and the scan binder.
pub trait SqlField {
    fn kind(&self) -> FieldKind;

    fn value(&self) -> Option<Value>;

    /// Overwrite `self` with the decoded `value`.
    fn assign(&mut self, value: Value) -> Result<(), String>;
}

impl<T: SqlType> SqlField for T {
    fn kind(&self) -> FieldKind {
        T::KIND
    }

    fn value(&self) -> Option<Value> {
        self.to_value()
    }

    fn assign(&mut self, value: Value) -> Result<(), String> {
        *self = T::from_value(value)?;
        Ok(())
    }
}

impl SqlType for String {
    const KIND: FieldKind = FieldKind::String;

    fn to_value(&self) -> Option<Value> {
        Some(Value::Text(self.clone()))
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(mismatch("text", &other)),
        }
    }
}

macro_rules! impl_signed {
    ($($t:ty),* $(,)?) => {
        $(
            impl SqlType for $t {
                const KIND: FieldKind = FieldKind::Integer;

                fn to_value(&self) -> Option<Value> {
                    Some(Value::Int(i64::from(*self)))
                }

                fn from_value(value: Value) -> Result<Self, String> {
                    match value {
                        Value::Int(i) => <$t>::try_from(i).map_err(|_| {
                            format!("{i} is out of range for {}", stringify!($t))
                        }),
                        other => Err(mismatch("int", &other)),
                    }
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64);

impl SqlType for isize {
    const KIND: FieldKind = FieldKind::Integer;

    fn to_value(&self) -> Option<Value> {
        // isize is at most 64 bits on every supported target.
        Some(Value::Int(*self as i64))
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Int(i) => {
                isize::try_from(i).map_err(|_| format!("{i} is out of range for isize"))
            }
            other => Err(mismatch("int", &other)),
        }
    }
}

impl SqlType for f64 {
    const KIND: FieldKind = FieldKind::Float;

    fn to_value(&self) -> Option<Value> {
        Some(Value::Float(*self))
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(mismatch("float", &other)),
        }
    }
}

impl SqlType for f32 {
    const KIND: FieldKind = FieldKind::Float;

    fn to_value(&self) -> Option<Value> {
        Some(Value::Float(f64::from(*self)))
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Float(f) => Ok(f as f32),
            Value::Int(i) => Ok(i as f32),
            other => Err(mismatch("float", &other)),
        }
    }
}

impl SqlType for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn to_value(&self) -> Option<Value> {
        Some(Value::Bool(*self))
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Bool(b) => Ok(b),
            // TINYINT(1) columns come back as integers.
            Value::Int(0) => Ok(false),
            Value::Int(1) => Ok(true),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl SqlType for NaiveDateTime {
    const KIND: FieldKind = FieldKind::Timestamp;

    fn to_value(&self) -> Option<Value> {
        Some(Value::Timestamp(*self))
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Timestamp(t) => Ok(t),
            other => Err(mismatch("timestamp", &other)),
        }
    }
}

impl SqlType for DateTime<Utc> {
    const KIND: FieldKind = FieldKind::Timestamp;

    fn to_value(&self) -> Option<Value> {
        Some(Value::Timestamp(self.naive_utc()))
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Timestamp(t) => Ok(t.and_utc()),
            other => Err(mismatch("timestamp", &other)),
        }
    }
}

impl SqlType for Uuid {
    const KIND: FieldKind = FieldKind::Uuid;

    fn to_value(&self) -> Option<Value> {
        Some(Value::Uuid(*self))
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Uuid(u) => Ok(u),
            // CHAR(36) columns.
            Value::Text(s) => Uuid::parse_str(&s).map_err(|e| e.to_string()),
            other => Err(mismatch("uuid", &other)),
        }
    }
}

impl<T: SqlType> SqlType for Option<T> {
    const KIND: FieldKind = T::KIND.nullable();

    fn to_value(&self) -> Option<Value> {
        match self {
            Some(v) => v.to_value(),
            None if T::KIND.is_supported() => Some(Value::Null),
            None => None,
        }
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

macro_rules! impl_unknown {
    ($($t:ty => $name:literal),* $(,)?) => {
        $(
            impl SqlType for $t {
                const KIND: FieldKind = FieldKind::Unknown($name);

                fn to_value(&self) -> Option<Value> {
                    None
                }

                fn from_value(_value: Value) -> Result<Self, String> {
                    Err(format!("no decode rule for {}", $name))
                }
            }
        )*
    };
}

impl_unknown!(
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    Vec<u8> => "bytes",
    serde_json::Value => "json",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_kind_mapping() {
        assert_eq!(FieldKind::Integer.nullable(), FieldKind::NullableInt);
        assert_eq!(FieldKind::NullableInt.nullable(), FieldKind::NullableInt);
        assert_eq!(FieldKind::Timestamp.nullable(), FieldKind::NullableTime);
        assert_eq!(
            FieldKind::Unknown("u64").nullable(),
            FieldKind::Unknown("u64")
        );
        assert_eq!(<Option<String> as SqlType>::KIND, FieldKind::NullableString);
    }

    #[test]
    fn integers_widen_and_narrow() {
        assert_eq!(7_i8.to_value(), Some(Value::Int(7)));
        assert_eq!(i16::from_value(Value::Int(-3)).unwrap(), -3);
        assert!(i8::from_value(Value::Int(300)).is_err());
        assert!(i64::from_value(Value::Text("7".into())).is_err());
    }

    #[test]
    fn bool_accepts_tinyint() {
        assert!(bool::from_value(Value::Int(1)).unwrap());
        assert!(!bool::from_value(Value::Int(0)).unwrap());
        assert!(bool::from_value(Value::Int(2)).is_err());
    }

    #[test]
    fn uuid_accepts_text() {
        let id = Uuid::parse_str("86f65f0c-0320-461b-9047-6303d79db43d").unwrap();
        assert_eq!(Uuid::from_value(Value::Text(id.to_string())).unwrap(), id);
    }

    #[test]
    fn option_decodes_null() {
        assert_eq!(Option::<i64>::from_value(Value::Null).unwrap(), None);
        assert_eq!(Option::<i64>::from_value(Value::Int(4)).unwrap(), Some(4));
        assert!(i64::from_value(Value::Null).is_err());
    }

    #[test]
    fn unknown_types_have_no_value() {
        assert_eq!(5_u64.to_value(), None);
        assert_eq!(<u64 as SqlType>::KIND, FieldKind::Unknown("u64"));
        assert_eq!(Option::<u64>::None.to_value(), None);
    }

    #[test]
    fn assign_through_trait_object() {
        let mut n = 0_i32;
        let target: &mut dyn SqlField = &mut n;
        target.assign(Value::Int(12)).unwrap();
        assert_eq!(n, 12);
    }
}
