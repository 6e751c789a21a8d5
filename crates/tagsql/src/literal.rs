//! SQL literal encoding.
//!
//! Literal rules:
//!
//! | value                  | literal                          |
//! |------------------------|----------------------------------|
//! | text                   | `'escaped'`                      |
//! | integer                | `7`                              |
//! | float                  | `7.000000` (`NULL` for NaN, ±inf)|
//! | bool                   | `true` / `false`                 |
//! | timestamp              | `'2006-01-02 15:04:05'`          |
//! | uuid                   | `'86f65f0c-0320-...'`            |
//! | invalid nullable       | `NULL`                           |

use std::fmt::Write as _;

use crate::describe::DescribedField;
use crate::error::{OrmError, OrmResult};
use crate::value::Value;

/// Timestamp layout used for literals and plain-text rendering.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Escape characters that would break out of a quoted MySQL string literal.
///
/// NUL, `\n`, `\r`, `\`, `'`, `"` and Ctrl-Z (0x1A) become two-character
/// backslash escapes; everything else passes through unchanged.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        let escape = match c {
            '\0' => '0',
            '\n' => 'n',
            '\r' => 'r',
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            '\x1a' => 'Z',
            _ => {
                out.push(c);
                continue;
            }
        };
        out.push('\\');
        out.push(escape);
    }
    out
}

fn push_float(out: &mut String, f: f64) {
    // No decimal spelling for NaN or infinities.
    if !f.is_finite() {
        out.push_str("NULL");
    } else {
        let _ = write!(out, "{f:.6}");
    }
}

/// Encode a value as a SQL literal.
pub fn encode_value(value: &Value) -> String {
    let mut out = String::new();
    write_literal(&mut out, value);
    out
}

pub(crate) fn write_literal(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("NULL"),
        Value::Text(s) => {
            out.push('\'');
            out.push_str(&escape_string(s));
            out.push('\'');
        }
        Value::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Float(f) => push_float(out, *f),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Timestamp(t) => {
            let _ = write!(out, "'{}'", t.format(TIMESTAMP_FORMAT));
        }
        Value::Uuid(u) => {
            let _ = write!(out, "'{}'", u.hyphenated());
        }
    }
}

/// Render a value as plain text, for CSV-style exports.
///
/// Text is neither quoted nor escaped; NULL and non-finite floats render as `NULL`.
pub fn encode_text(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Text(s) => s.clone(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => {
            let mut out = String::new();
            push_float(&mut out, *f);
            out
        }
        Value::Bool(b) => b.to_string(),
        Value::Timestamp(t) => t.format(TIMESTAMP_FORMAT).to_string(),
        Value::Uuid(u) => u.hyphenated().to_string(),
    }
}

fn supported_value(field: &DescribedField) -> OrmResult<&Value> {
    field.value.as_ref().ok_or_else(|| {
        tracing::debug!(
            target: "tagsql.sql",
            field = field.name,
            kind = %field.kind,
            "no literal rule for field"
        );
        OrmError::unsupported(field.name, field.kind)
    })
}

/// Encode one described field as a SQL literal.
///
/// Fails with [`OrmError::UnsupportedFieldType`] when the field's kind has no rule.
pub fn encode_field(field: &DescribedField) -> OrmResult<String> {
    supported_value(field).map(encode_value)
}

/// Plain-text counterpart of [`encode_field`].
pub fn encode_field_text(field: &DescribedField) -> OrmResult<String> {
    supported_value(field).map(encode_text)
}
