//! Registered struct descriptions.
//!
//! Rust has no runtime reflection, so a model describes itself through
//! [`Reflect`] (read access) and [`ReflectMut`] (write access). Both are normally
//! generated by `#[derive(Model)]`, but nothing stops a hand-written impl as long
//! as it lists the fields in declaration order.
//!
//! ```ignore
//! use tagsql::Model;
//!
//! #[derive(Model)]
//! #[orm(table = "users")]
//! struct User {
//!     #[orm(id, column = "id")]
//!     id: i64,
//!     #[orm(column = "user_name")]
//!     name: String,
//!     // untagged: column defaults to `nick_name`, not bound when scanning
//!     nick_name: String,
//! }
//! ```

use std::borrow::Cow;

use crate::case::to_snake_case;
use crate::value::{FieldKind, SqlField};

/// Static metadata of one struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Declared field name.
    pub name: &'static str,
    /// Explicit column tag. An empty tag counts as no tag.
    pub tag: Option<&'static str>,
    /// Marked `#[orm(id)]`.
    pub primary_key: bool,
}

impl FieldMeta {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            tag: None,
            primary_key: false,
        }
    }

    pub const fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub const fn with_primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// The explicit tag, if present and non-empty.
    pub fn tag(&self) -> Option<&'static str> {
        self.tag.filter(|t| !t.is_empty())
    }

    pub fn is_tagged(&self) -> bool {
        self.tag().is_some()
    }

    /// Resolved column name: the tag if present, else the snake-cased field name.
    pub fn column(&self) -> Cow<'static, str> {
        match self.tag() {
            Some(tag) => Cow::Borrowed(tag),
            None => Cow::Owned(to_snake_case(self.name)),
        }
    }
}

/// A field and a shared borrow of its value.
pub struct FieldRef<'a> {
    pub meta: FieldMeta,
    pub value: &'a dyn SqlField,
}

impl<'a> FieldRef<'a> {
    pub fn new(meta: FieldMeta, value: &'a dyn SqlField) -> Self {
        Self { meta, value }
    }

    pub fn kind(&self) -> FieldKind {
        self.value.kind()
    }
}

/// A field and a mutable borrow of its value.
pub struct FieldMut<'a> {
    pub meta: FieldMeta,
    pub target: &'a mut dyn SqlField,
}

impl<'a> FieldMut<'a> {
    pub fn new(meta: FieldMeta, target: &'a mut dyn SqlField) -> Self {
        Self { meta, target }
    }
}

/// Read view of a value's structure.
pub enum Shape<'a> {
    /// Fields in declaration order.
    Struct(Vec<FieldRef<'a>>),
    Scalar,
}

/// Write view of a value's structure.
pub enum ShapeMut<'a> {
    /// Fields in declaration order.
    Struct(Vec<FieldMut<'a>>),
    Scalar,
}

/// Describes a value's fields for statement generation and literal encoding.
pub trait Reflect {
    /// Name of the described type, used in error messages.
    fn type_name(&self) -> &'static str;

    fn shape(&self) -> Shape<'_>;
}

/// Hands out mutable field borrows for row binding.
pub trait ReflectMut: Reflect {
    fn shape_mut(&mut self) -> ShapeMut<'_>;
}

/// Supplies the target table of a model.
pub trait Table {
    fn table_name(&self) -> &str;
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Reflect + ?Sized> Reflect for &mut T {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: ReflectMut + ?Sized> ReflectMut for &mut T {
    fn shape_mut(&mut self) -> ShapeMut<'_> {
        (**self).shape_mut()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: ReflectMut + ?Sized> ReflectMut for Box<T> {
    fn shape_mut(&mut self) -> ShapeMut<'_> {
        (**self).shape_mut()
    }
}

impl<T: Table + ?Sized> Table for &T {
    fn table_name(&self) -> &str {
        (**self).table_name()
    }
}

impl<T: Table + ?Sized> Table for &mut T {
    fn table_name(&self) -> &str {
        (**self).table_name()
    }
}

impl<T: Table + ?Sized> Table for Box<T> {
    fn table_name(&self) -> &str {
        (**self).table_name()
    }
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Reflect for $t {
                fn type_name(&self) -> &'static str {
                    ::std::any::type_name::<$t>()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar
                }
            }

            impl ReflectMut for $t {
                fn shape_mut(&mut self) -> ShapeMut<'_> {
                    ShapeMut::Scalar
                }
            }
        )*
    };
}

impl_scalar!(
    String,
    str,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    bool,
    chrono::NaiveDateTime,
    uuid::Uuid,
);
