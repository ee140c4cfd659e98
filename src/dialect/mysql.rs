//! MySQL-family dialect.
//!
//! Indexes are rendered inline in the `CREATE TABLE` body; the table is closed
//! with `ENGINE=... DEFAULT CHARACTER SET ...`.

use super::escape::{quote_backtick, quoted_list};
use super::{foreign_key_clause, Dialect};
use crate::error::DdlError;
use crate::schema::{ForeignKey, Index, IndexKind, NativeType, PrimaryKey};

pub const DRIVER: &str = "mysql";
pub const DEFAULT_ENGINE: &str = "InnoDB";
pub const DEFAULT_CHARSET: &str = "utf8mb4";

const DEFAULT_VARCHAR_SIZE: u64 = 191;
const DEFAULT_VARBINARY_SIZE: u64 = 767;
const AUTO_INCREMENT: &str = "AUTO_INCREMENT";

const HEADER_TEMPLATE: &str = "SET foreign_key_checks=0;\n";

const FOOTER_TEMPLATE: &str = "SET foreign_key_checks=1;\n";

const TABLE_TEMPLATE: &str = r#"
DROP TABLE IF EXISTS {{ name }};

CREATE TABLE {{ name }} (
{{ range definitions }}    {{ sql }}{{ separator }}
{{ end }}) ENGINE={{ dialect.engine }} DEFAULT CHARACTER SET {{ dialect.charset }};

"#;

/// MySQL dialect with its storage engine and character set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySql {
    engine: String,
    charset: String,
}

impl MySql {
    /// Missing or empty parameters fall back to `InnoDB` / `utf8mb4`.
    pub fn new(engine: Option<&str>, charset: Option<&str>) -> Self {
        let pick = |value: Option<&str>, default: &str| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        Self {
            engine: pick(engine, DEFAULT_ENGINE),
            charset: pick(charset, DEFAULT_CHARSET),
        }
    }
}

impl Default for MySql {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn sized(base: &str, size: u64, default: u64) -> String {
    let size = if size == 0 { default } else { size };
    format!("{}({})", base, size)
}

fn datetime(size: u64) -> String {
    if size == 0 {
        "DATETIME".to_string()
    } else {
        format!("DATETIME({})", size)
    }
}

impl Dialect for MySql {
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
            NativeType::Int8 => "TINYINT".to_string(),
            NativeType::Int16 => "SMALLINT".to_string(),
            NativeType::Int32 => "INTEGER".to_string(),
            NativeType::Int64 => "BIGINT".to_string(),
            NativeType::UInt8 => "TINYINT unsigned".to_string(),
            NativeType::UInt16 => "SMALLINT unsigned".to_string(),
            NativeType::UInt32 => "INTEGER unsigned".to_string(),
            NativeType::UInt64 => "BIGINT unsigned".to_string(),
            NativeType::Float32 => "FLOAT".to_string(),
            NativeType::Float64 => "DOUBLE".to_string(),
            NativeType::Bool => "TINYINT(1)".to_string(),
            NativeType::String => sized("VARCHAR", size, DEFAULT_VARCHAR_SIZE),
            NativeType::Bytes => sized("VARBINARY", size, DEFAULT_VARBINARY_SIZE),
            NativeType::TinyText => "TINYTEXT".to_string(),
            NativeType::Text => "TEXT".to_string(),
            NativeType::MediumText => "MEDIUMTEXT".to_string(),
            NativeType::LongText => "LONGTEXT".to_string(),
            NativeType::TinyBlob => "TINYBLOB".to_string(),
            NativeType::Blob => "BLOB".to_string(),
            NativeType::MediumBlob => "MEDIUMBLOB".to_string(),
            NativeType::LongBlob => "LONGBLOB".to_string(),
            NativeType::Time => "TIME".to_string(),
            NativeType::DateTime => datetime(size),
            NativeType::Date => "DATE".to_string(),
            NativeType::Json => "JSON".to_string(),
            NativeType::Geometry => "GEOMETRY".to_string(),
        };
        Ok(sql)
    }

    fn quote(&self, ident: &str) -> String {
        quote_backtick(ident)
    }

    fn auto_increment(&self) -> &'static str {
        AUTO_INCREMENT
    }

    fn engine(&self) -> Option<&str> {
        Some(&self.engine)
    }

    fn charset(&self) -> Option<&str> {
        Some(&self.charset)
    }

    fn supports_index(&self, _kind: IndexKind) -> bool {
        true
    }

    fn inline_indexes(&self) -> bool {
        true
    }

    fn index_sql(&self, index: &Index) -> String {
        let columns = quoted_list(index.columns(), quote_backtick);
        let name = quote_backtick(index.name());
        match index.kind() {
            IndexKind::Index => format!("INDEX {} ({})", name, columns),
            IndexKind::Unique => format!("UNIQUE {} ({})", name, columns),
            IndexKind::FullText => match index.parser() {
                Some(parser) => format!(
                    "FULLTEXT {} ({}) WITH PARSER {}",
                    name,
                    columns,
                    quote_backtick(parser)
                ),
                None => format!("FULLTEXT {} ({})", name, columns),
            },
            IndexKind::Spatial => format!("SPATIAL KEY {} ({})", name, columns),
        }
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
