//! Statement builders.
//!
//! Every builder is a pure function of the model's description, its table name
//! and the [`StatementConfig`]:
//!
//! ```ignore
//! use tagsql::stmt;
//!
//! let sql = format!("{} {}", stmt::insert(&user)?, tagsql::value_tuple(&user)?);
//! let sql = stmt::select(&user)?;          // SELECT id,name FROM users
//! let sql = stmt::truncate(&user);         // TRUNCATE TABLE users
//! let sql = stmt::delete(&user)?;          // DELETE FROM users WHERE id=7
//! ```
//!
//! INSERT-family statements list every field; SELECT lists only tagged fields so
//! that its columns line up with [`scanner`](crate::scanner).

use crate::config::StatementConfig;
use crate::describe::{DescribedField, describe, describe_tagged};
use crate::error::{OrmError, OrmResult};
use crate::literal::encode_field;
use crate::reflect::{Reflect, Table};
use crate::tuple::value_tuples;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertVerb {
    Insert,
    InsertIgnore,
    Replace,
}

impl InsertVerb {
    fn keyword(self) -> &'static str {
        match self {
            InsertVerb::Insert => "INSERT INTO",
            InsertVerb::InsertIgnore => "INSERT IGNORE INTO",
            InsertVerb::Replace => "REPLACE INTO",
        }
    }

    fn name(self) -> &'static str {
        match self {
            InsertVerb::Insert => "insert",
            InsertVerb::InsertIgnore => "insert_ignore",
            InsertVerb::Replace => "replace",
        }
    }
}

fn trace_statement(kind: &'static str, table: &str, sql: &str) {
    tracing::trace!(target: "tagsql.sql", kind, table, sql, "built statement");
}

/// Renders statements under one [`StatementConfig`].
#[derive(Debug, Clone, Default)]
pub struct StatementBuilder {
    config: StatementConfig,
}

impl StatementBuilder {
    pub fn new(config: StatementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StatementConfig {
        &self.config
    }

    fn insert_prefix<M>(&self, verb: InsertVerb, model: &M) -> OrmResult<String>
    where
        M: Table + Reflect + ?Sized,
    {
        let fields = describe(model)?;
        if fields.is_empty() {
            return Err(OrmError::NoColumns {
                type_name: model.type_name(),
            });
        }
        let quote = self.config.quote;
        let columns = fields
            .iter()
            .map(|f| quote.wrap(&f.column))
            .collect::<Vec<_>>()
            .join(",");
        let table = model.table_name();
        let sql = format!(
            "{} {} ({}) VALUES",
            verb.keyword(),
            quote.wrap(table),
            columns
        );
        trace_statement(verb.name(), table, &sql);
        Ok(sql)
    }

    /// `INSERT INTO <table> (<cols>) VALUES`
    pub fn insert<M: Table + Reflect + ?Sized>(&self, model: &M) -> OrmResult<String> {
        self.insert_prefix(InsertVerb::Insert, model)
    }

    /// `INSERT IGNORE INTO <table> (<cols>) VALUES`
    pub fn insert_ignore<M: Table + Reflect + ?Sized>(&self, model: &M) -> OrmResult<String> {
        self.insert_prefix(InsertVerb::InsertIgnore, model)
    }

    /// `REPLACE INTO <table> (<cols>) VALUES`
    pub fn replace<M: Table + Reflect + ?Sized>(&self, model: &M) -> OrmResult<String> {
        self.insert_prefix(InsertVerb::Replace, model)
    }

    fn many<M: Table + Reflect>(
        &self,
        verb: InsertVerb,
        models: &[M],
    ) -> OrmResult<Option<String>> {
        let Some(first) = models.first() else {
            return Ok(None);
        };
        let prefix = self.insert_prefix(verb, first)?;
        Ok(Some(format!("{prefix} {}", value_tuples(models)?)))
    }

    /// A complete multi-row INSERT. `None` for an empty slice.
    ///
    /// The table and column list come from the first model.
    pub fn insert_many<M: Table + Reflect>(&self, models: &[M]) -> OrmResult<Option<String>> {
        self.many(InsertVerb::Insert, models)
    }

    /// A complete multi-row INSERT IGNORE. `None` for an empty slice.
    pub fn insert_ignore_many<M: Table + Reflect>(
        &self,
        models: &[M],
    ) -> OrmResult<Option<String>> {
        self.many(InsertVerb::InsertIgnore, models)
    }

    /// A complete multi-row REPLACE. `None` for an empty slice.
    pub fn replace_many<M: Table + Reflect>(&self, models: &[M]) -> OrmResult<Option<String>> {
        self.many(InsertVerb::Replace, models)
    }

    /// `SELECT <tagged cols> FROM <table>`, always unwrapped.
    pub fn select<M: Table + Reflect + ?Sized>(&self, model: &M) -> OrmResult<String> {
        let fields = describe_tagged(model)?;
        if fields.is_empty() {
            return Err(OrmError::NoColumns {
                type_name: model.type_name(),
            });
        }
        let columns = fields
            .iter()
            .map(|f| f.column.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let table = model.table_name();
        let sql = format!("SELECT {columns} FROM {table}");
        trace_statement("select", table, &sql);
        Ok(sql)
    }

    /// `TRUNCATE TABLE <table>`, always unwrapped.
    pub fn truncate<M: Table + ?Sized>(&self, model: &M) -> String {
        let table = model.table_name();
        let sql = format!("TRUNCATE TABLE {table}");
        trace_statement("truncate", table, &sql);
        sql
    }

    fn set_clause(&self, fields: &[DescribedField], skip: Option<usize>) -> OrmResult<String> {
        let quote = self.config.quote;
        let mut parts = Vec::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            if Some(i) == skip {
                continue;
            }
            parts.push(format!("{}={}", quote.wrap(&field.column), encode_field(field)?));
        }
        Ok(parts.join(","))
    }

    /// `col=literal,...` over every field except the key field (see [`update`](Self::update)).
    pub fn update_set_clause<M: Reflect + ?Sized>(&self, model: &M) -> OrmResult<String> {
        let fields = describe(model)?;
        let clause = self.set_clause(&fields, key_position(&fields))?;
        if clause.is_empty() {
            return Err(OrmError::NoColumns {
                type_name: model.type_name(),
            });
        }
        Ok(clause)
    }

    fn update_at<M>(&self, model: &M, fields: &[DescribedField], key: usize) -> OrmResult<String>
    where
        M: Table + Reflect + ?Sized,
    {
        let set = self.set_clause(fields, Some(key))?;
        if set.is_empty() {
            return Err(OrmError::NoColumns {
                type_name: model.type_name(),
            });
        }
        let key_field = &fields[key];
        let quote = self.config.quote;
        let table = model.table_name();
        let sql = format!(
            "UPDATE {} SET {} WHERE {}={}",
            quote.wrap(table),
            set,
            quote.wrap(&key_field.column),
            encode_field(key_field)?
        );
        trace_statement("update", table, &sql);
        Ok(sql)
    }

    /// `UPDATE <table> SET ... WHERE <key>=<literal>`.
    ///
    /// The key is the field marked `#[orm(id)]`, else the field whose column is `id`.
    pub fn update<M: Table + Reflect + ?Sized>(&self, model: &M) -> OrmResult<String> {
        let fields = describe(model)?;
        let key = required_key(&fields)?;
        self.update_at(model, &fields, key)
    }

    /// Like [`update`](Self::update), keyed by the field declared as `field_name`.
    pub fn update_by<M: Table + Reflect + ?Sized>(
        &self,
        model: &M,
        field_name: &str,
    ) -> OrmResult<String> {
        let fields = describe(model)?;
        let key = fields
            .iter()
            .position(|f| f.name == field_name)
            .ok_or_else(|| OrmError::missing_field(field_name))?;
        self.update_at(model, &fields, key)
    }

    /// `DELETE FROM <table> WHERE <key>=<literal>`, keyed like [`update`](Self::update).
    pub fn delete<M: Table + Reflect + ?Sized>(&self, model: &M) -> OrmResult<String> {
        let fields = describe(model)?;
        let key = &fields[required_key(&fields)?];
        let quote = self.config.quote;
        let table = model.table_name();
        let sql = format!(
            "DELETE FROM {} WHERE {}={}",
            quote.wrap(table),
            quote.wrap(&key.column),
            encode_field(key)?
        );
        trace_statement("delete", table, &sql);
        Ok(sql)
    }

    /// `DELETE FROM <table> WHERE <key> IN (<literals>)`. `None` for an empty slice.
    ///
    /// The table and key column come from the first model.
    pub fn delete_many<M: Table + Reflect>(&self, models: &[M]) -> OrmResult<Option<String>> {
        let Some(first) = models.first() else {
            return Ok(None);
        };
        let fields = describe(first)?;
        let key = required_key(&fields)?;
        let column = fields[key].column.clone();

        let mut keys = Vec::with_capacity(models.len());
        for model in models {
            keys.push(encode_field(&describe(model)?[key])?);
        }

        let quote = self.config.quote;
        let table = first.table_name();
        let sql = format!(
            "DELETE FROM {} WHERE {} IN ({})",
            quote.wrap(table),
            quote.wrap(&column),
            keys.join(",")
        );
        trace_statement("delete_many", table, &sql);
        Ok(Some(sql))
    }

    fn upsert_rows<M: Table + Reflect>(&self, models: &[M]) -> OrmResult<Option<String>> {
        let Some(first) = models.first() else {
            return Ok(None);
        };
        let fields = describe(first)?;
        let skip = key_position(&fields);
        let quote = self.config.quote;
        let updates = fields
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .map(|(_, f)| {
                let col = quote.wrap(&f.column);
                format!("{col}=VALUES({col})")
            })
            .collect::<Vec<_>>();
        if updates.is_empty() {
            return Err(OrmError::NoColumns {
                type_name: first.type_name(),
            });
        }

        let prefix = self.insert_prefix(InsertVerb::Insert, first)?;
        let sql = format!(
            "{prefix} {} ON DUPLICATE KEY UPDATE {}",
            value_tuples(models)?,
            updates.join(",")
        );
        trace_statement("upsert", first.table_name(), &sql);
        Ok(Some(sql))
    }

    /// `INSERT ... VALUES (...) ON DUPLICATE KEY UPDATE col=VALUES(col),...`
    ///
    /// Every field except the key is refreshed on conflict.
    pub fn upsert<M: Table + Reflect>(&self, model: &M) -> OrmResult<String> {
        let sql = self.upsert_rows(std::slice::from_ref(model))?;
        Ok(sql.unwrap_or_default())
    }

    /// Multi-row [`upsert`](Self::upsert). `None` for an empty slice.
    pub fn upsert_many<M: Table + Reflect>(&self, models: &[M]) -> OrmResult<Option<String>> {
        self.upsert_rows(models)
    }
}

/// The key field: the one marked `#[orm(id)]`, else the one whose column is `id`.
fn key_position(fields: &[DescribedField]) -> Option<usize> {
    fields
        .iter()
        .position(|f| f.primary_key)
        .or_else(|| fields.iter().position(|f| f.column == "id"))
}

fn required_key(fields: &[DescribedField]) -> OrmResult<usize> {
    key_position(fields).ok_or_else(|| OrmError::missing_field("id"))
}

/// `INSERT INTO <table> (<cols>) VALUES` with default configuration.
pub fn insert<M: Table + Reflect + ?Sized>(model: &M) -> OrmResult<String> {
    StatementBuilder::default().insert(model)
}

/// `INSERT IGNORE INTO <table> (<cols>) VALUES` with default configuration.
pub fn insert_ignore<M: Table + Reflect + ?Sized>(model: &M) -> OrmResult<String> {
    StatementBuilder::default().insert_ignore(model)
}

/// `REPLACE INTO <table> (<cols>) VALUES` with default configuration.
pub fn replace<M: Table + Reflect + ?Sized>(model: &M) -> OrmResult<String> {
    StatementBuilder::default().replace(model)
}

pub fn insert_many<M: Table + Reflect>(models: &[M]) -> OrmResult<Option<String>> {
    StatementBuilder::default().insert_many(models)
}

pub fn insert_ignore_many<M: Table + Reflect>(models: &[M]) -> OrmResult<Option<String>> {
    StatementBuilder::default().insert_ignore_many(models)
}

pub fn replace_many<M: Table + Reflect>(models: &[M]) -> OrmResult<Option<String>> {
    StatementBuilder::default().replace_many(models)
}

/// `SELECT <tagged cols> FROM <table>`
pub fn select<M: Table + Reflect + ?Sized>(model: &M) -> OrmResult<String> {
    StatementBuilder::default().select(model)
}

/// `TRUNCATE TABLE <table>`
pub fn truncate<M: Table + ?Sized>(model: &M) -> String {
    StatementBuilder::default().truncate(model)
}

pub fn update_set_clause<M: Reflect + ?Sized>(model: &M) -> OrmResult<String> {
    StatementBuilder::default().update_set_clause(model)
}

pub fn update<M: Table + Reflect + ?Sized>(model: &M) -> OrmResult<String> {
    StatementBuilder::default().update(model)
}

pub fn update_by<M: Table + Reflect + ?Sized>(model: &M, field_name: &str) -> OrmResult<String> {
    StatementBuilder::default().update_by(model, field_name)
}

pub fn delete<M: Table + Reflect + ?Sized>(model: &M) -> OrmResult<String> {
    StatementBuilder::default().delete(model)
}

pub fn delete_many<M: Table + Reflect>(models: &[M]) -> OrmResult<Option<String>> {
    StatementBuilder::default().delete_many(models)
}

pub fn upsert<M: Table + Reflect>(model: &M) -> OrmResult<String> {
    StatementBuilder::default().upsert(model)
}

pub fn upsert_many<M: Table + Reflect>(models: &[M]) -> OrmResult<Option<String>> {
    StatementBuilder::default().upsert_many(models)
}

#[cfg(test)]
mod tests;
