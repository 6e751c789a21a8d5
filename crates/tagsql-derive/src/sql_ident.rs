use proc_macro2::Span;
use syn::{Error, LitStr, Result};

pub(crate) fn is_valid_sql_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A table name: one or more identifiers joined by `.` (`schema.table`).
pub(crate) fn parse_table_name(lit: &LitStr) -> Result<String> {
    let raw = lit.value();
    let s = raw.trim();
    if s.is_empty() {
        return Err(Error::new(lit.span(), "table name must not be empty"));
    }
    if !s.split('.').all(is_valid_sql_ident) {
        return Err(Error::new(
            lit.span(),
            "table name must be a valid SQL identifier, optionally schema-qualified (expected [A-Za-z_][A-Za-z0-9_]*)",
        ));
    }
    Ok(s.to_string())
}

/// A column tag. Empty means "untagged" and is returned as `None`.
pub(crate) fn parse_column_tag(s: &str, span: Span) -> Result<Option<String>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    if !is_valid_sql_ident(s) {
        return Err(Error::new(
            span,
            "column must be a valid SQL identifier (expected [A-Za-z_][A-Za-z0-9_]*)",
        ));
    }
    Ok(Some(s.to_string()))
}
