//! SQLite-family dialect.
//!
//! SQLite has no inline index syntax: indexes are emitted as separate
//! `CREATE [UNIQUE] INDEX` statements after the table body. Only plain and
//! unique indexes exist.

use super::escape::{quote_backtick, quoted_list};
use super::{foreign_key_clause, Dialect};
use crate::error::DdlError;
use crate::schema::{ForeignKey, Index, IndexKind, NativeType, PrimaryKey};

pub const DRIVER: &str = "sqlite";

const AUTO_INCREMENT: &str = "AUTOINCREMENT";

const HEADER_TEMPLATE: &str = "PRAGMA foreign_keys = false;\n";

const FOOTER_TEMPLATE: &str = "PRAGMA foreign_keys = true;\n";

const TABLE_TEMPLATE: &str = r#"
DROP TABLE IF EXISTS {{ name }};

CREATE TABLE {{ name }} (
{{ range definitions }}    {{ sql }}{{ separator }}
{{ end }});
{{ range indexes -}}
{{ sql }};
{{ end }}
"#;

/// SQLite dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn driver(&self) -> &'static str {
        DRIVER
    }

    fn header_template(&self) -> String {
        HEADER_TEMPLATE.to_string()
    }

    fn footer_template(&self) -> String {
        FOOTER_TEMPLATE.to_string()
    }

    fn table_template(&self) -> String {
        TABLE_TEMPLATE.to_string()
    }

    fn to_sql(&self, type_name: &str, size: u64) -> Result<String, DdlError> {
        let native: NativeType = type_name.parse()?;
        let sql = match native {
            NativeType::Int8
            | NativeType::Int16
            | NativeType::Int32
            | NativeType::Int64
            | NativeType::UInt8
            | NativeType::UInt16
            | NativeType::UInt32
            | NativeType::UInt64
            | NativeType::Bool => "INTEGER".to_string(),
            NativeType::Float32 | NativeType::Float64 => "REAL".to_string(),
            NativeType::String if size > 0 => format!("VARCHAR({})", size),
            NativeType::String
            | NativeType::TinyText
            | NativeType::Text
            | NativeType::MediumText
            | NativeType::LongText => "TEXT".to_string(),
            NativeType::Json => "JSON".to_string(),
            NativeType::Bytes
            | NativeType::TinyBlob
            | NativeType::Blob
            | NativeType::MediumBlob
            | NativeType::LongBlob => "BLOB".to_string(),
            // Temporal values are stored as integer timestamps.
            NativeType::Time | NativeType::DateTime | NativeType::Date => "INTEGER".to_string(),
            NativeType::Geometry => {
                return Err(DdlError::InvalidType {
                    type_name: type_name.to_string(),
                });
            }
        };
        Ok(sql)
    }

    fn quote(&self, ident: &str) -> String {
        quote_backtick(ident)
    }

    /// SQLite only accepts `AUTOINCREMENT` on an `INTEGER PRIMARY KEY`
    /// column, not next to a separate `PRIMARY KEY (...)` clause.
    fn auto_increment(&self) -> &'static str {
        AUTO_INCREMENT
    }

    fn engine(&self) -> Option<&str> {
        None
    }

    fn charset(&self) -> Option<&str> {
        None
    }

    fn supports_index(&self, kind: IndexKind) -> bool {
        matches!(kind, IndexKind::Index | IndexKind::Unique)
    }

    fn inline_indexes(&self) -> bool {
        false
    }

    fn index_sql(&self, index: &Index) -> String {
        let create = match index.kind() {
            IndexKind::Unique => "CREATE UNIQUE INDEX",
            _ => "CREATE INDEX",
        };
        format!(
            "{} {} ON {} ({})",
            create,
            quote_backtick(index.name()),
            quote_backtick(index.table().unwrap_or_default()),
            quoted_list(index.columns(), quote_backtick)
        )
    }

    fn primary_key_sql(&self, primary_key: &PrimaryKey) -> String {
        format!(
            "PRIMARY KEY ({})",
            quoted_list(primary_key.columns(), quote_backtick)
        )
    }

    fn foreign_key_sql(&self, foreign_key: &ForeignKey) -> String {
        foreign_key_clause(foreign_key, quote_backtick)
    }
}
