//! Identifier case conversion used to derive default column names.

use std::sync::OnceLock;

use regex::Regex;

fn first_cap() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("(.)([A-Z][a-z]+)").expect("invalid built-in regex"))
}

fn all_cap() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("([a-z0-9])([A-Z])").expect("invalid built-in regex"))
}

/// Convert a camelCase or PascalCase identifier to snake_case.
///
/// `CreatedAt` → `created_at`, `ID` → `id`, `HTTPServer` → `http_server`.
/// Already snake_cased input comes back unchanged.
pub fn to_snake_case(s: &str) -> String {
    let snake = first_cap().replace_all(s, "${1}_${2}");
    let snake = all_cap().replace_all(&snake, "${1}_${2}");
    snake.to_lowercase()
}
