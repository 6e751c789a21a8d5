//! Convenient imports for typical `tagsql` usage.
//!
//! ```ignore
//! use tagsql::prelude::*;
//! ```

pub use crate::{
    Null, NullBool, NullFloat, NullInt, NullString, NullTime, NullUuid, OrmError, OrmResult,
    Reflect, ReflectMut, Table, Value, scan_row, scanner, stmt, value_tuple,
};

#[cfg(feature = "derive")]
pub use crate::Model;
