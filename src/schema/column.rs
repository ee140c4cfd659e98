//! Field-to-column translation.

use serde::Serialize;

use super::attributes::Attributes;
use super::field::{snake_case, FieldDescriptor};
use crate::dialect::{Dialect, DialectKind};
use crate::error::DdlError;

/// A translated column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    name: String,
    sql_type: String,
    nullable: bool,
    default: Option<String>,
    auto_increment: bool,
}

impl Column {
    /// Translate a field into a column for `dialect`.
    ///
    /// Returns `DdlError::IgnoreField` for fields tagged with `-`; callers
    /// skip those. Every other failure is wrapped with the field name.
    pub fn translate(field: &FieldDescriptor, dialect: &DialectKind) -> Result<Self, DdlError> {
        let attrs = Attributes::parse(&field.annotation);
        if attrs.is_ignored() {
            return Err(DdlError::IgnoreField {
                field: field.name.clone(),
            });
        }

        let size = match attrs.size() {
            Some(raw) => parse_size(raw).map_err(|e| e.in_field(&field.name))?,
            None => 0,
        };

        // An override the dialect does not know is emitted as written.
        let sql_type = match attrs.type_override() {
            Some(type_override) => dialect
                .to_sql(type_override, size)
                .unwrap_or_else(|_| type_override.to_string()),
            None => dialect
                .to_sql(&field.native_type, size)
                .map_err(|e| e.in_field(&field.name))?,
        };

        Ok(Self {
            name: snake_case(&field.name),
            sql_type,
            nullable: attrs.is_nullable(),
            default: attrs.default_literal().map(str::to_string),
            auto_increment: attrs.is_auto_increment(),
        })
    }

    /// Render `<quoted name> <type> NULL|NOT NULL [DEFAULT x] [auto keyword]`.
    pub fn to_sql(&self, dialect: &DialectKind) -> String {
        let mut sql = format!(
            "{} {} {}",
            dialect.quote(&self.name),
            self.sql_type,
            if self.nullable { "NULL" } else { "NOT NULL" }
        );
        if let Some(default) = &self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(default);
        }
        let keyword = dialect.auto_increment();
        if self.auto_increment && !keyword.is_empty() {
            sql.push(' ');
            sql.push_str(keyword);
        }
        sql
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> &str {
        &self.sql_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }
}

/// Parse a `size` value: plain decimal digits only, no sign.
fn parse_size(raw: &str) -> Result<u64, DdlError> {
    // `u64::from_str` accepts a leading `+`; a lone sign fails with `InvalidDigit`.
    let digits = if raw.starts_with('+') { "+" } else { raw };
    digits.parse::<u64>().map_err(|source| DdlError::SizeParse {
        value: raw.to_string(),
        source,
    })
}
