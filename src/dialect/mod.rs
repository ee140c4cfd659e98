//! SQL dialects.
//!
//! A dialect owns everything that differs between database families: the
//! native-type mapping, identifier quoting, the auto-increment keyword, the
//! SQL fragments for keys and indexes, and the three templates (header,
//! per-table body, footer) the renderer executes.
//!
//! # Type Mapping
//!
//! | Native | MySQL | SQLite |
//! |--------|-------|--------|
//! | int8..int64 | TINYINT..BIGINT | INTEGER |
//! | uint8..uint64 | TINYINT unsigned..BIGINT unsigned | INTEGER |
//! | float32 / float64 | FLOAT / DOUBLE | REAL |
//! | bool | TINYINT(1) | INTEGER |
//! | string | VARCHAR(191) | TEXT |
//! | bytes | VARBINARY(767) | BLOB |
//! | time / datetime / date | TIME / DATETIME(n) / DATE | INTEGER |
//! | json | JSON | JSON |
//! | geometry | GEOMETRY | (invalid) |

mod escape;
pub mod mock;
pub mod mysql;
pub mod sqlite;

use enum_dispatch::enum_dispatch;

use crate::error::DdlError;
use crate::schema::{ForeignKey, Index, IndexKind, PrimaryKey};

pub use escape::{quote_backtick, quote_identifier, quoted_list};
pub use mock::MockDialect;
pub use mysql::MySql;
pub use sqlite::Sqlite;

/// Capabilities every database family provides to the pipeline.
#[enum_dispatch]
pub trait Dialect {
    /// Driver name used to select this dialect (`mysql`, `sqlite`).
    fn driver(&self) -> &'static str;

    /// Template emitted once before all tables.
    fn header_template(&self) -> String;

    /// Template emitted once after all tables.
    fn footer_template(&self) -> String;

    /// Template executed for every table.
    fn table_template(&self) -> String;

    /// Map a native type name and size to a SQL column type.
    ///
    /// A size of 0 selects the dialect default. Unknown names fail with
    /// `DdlError::InvalidType`.
    fn to_sql(&self, type_name: &str, size: u64) -> Result<String, DdlError>;

    fn quote(&self, ident: &str) -> String;

    fn auto_increment(&self) -> &'static str;

    /// Storage engine placed into the table template, if the dialect has one.
    fn engine(&self) -> Option<&str>;

    /// Default character set placed into the table template, if the dialect has one.
    fn charset(&self) -> Option<&str>;

    fn supports_index(&self, kind: IndexKind) -> bool;

    /// Whether indexes belong inside the `CREATE TABLE` body.
    fn inline_indexes(&self) -> bool;

    fn index_sql(&self, index: &Index) -> String;

    fn primary_key_sql(&self, primary_key: &PrimaryKey) -> String;

    fn foreign_key_sql(&self, foreign_key: &ForeignKey) -> String;
}

/// The closed set of supported dialects.
#[enum_dispatch(Dialect)]
#[derive(Debug, Clone)]
pub enum DialectKind {
    MySql(MySql),
    Sqlite(Sqlite),
    Mock(MockDialect),
}

impl DialectKind {
    /// Select a dialect by driver name.
    ///
    /// `engine` and `charset` are only consulted by dialects that render them.
    pub fn new(driver: &str, engine: Option<&str>, charset: Option<&str>) -> Result<Self, DdlError> {
        match driver.trim().to_ascii_lowercase().as_str() {
            mysql::DRIVER => Ok(MySql::new(engine, charset).into()),
            sqlite::DRIVER | "sqlite3" => Ok(Sqlite.into()),
            _ => Err(DdlError::UnsupportedDriver {
                driver: driver.to_string(),
            }),
        }
    }
}

/// `FOREIGN KEY (...) REFERENCES t (...) [ON DELETE x] [ON UPDATE y]`
pub(crate) fn foreign_key_clause<F>(foreign_key: &ForeignKey, quote: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut sql = format!(
        "FOREIGN KEY ({}) REFERENCES {} ({})",
        quoted_list(foreign_key.columns(), &quote),
        quote(foreign_key.reference_table()),
        quoted_list(foreign_key.reference_columns(), &quote),
    );
    if let Some(action) = foreign_key.delete_action() {
        sql.push_str(" ON DELETE ");
        sql.push_str(action.as_sql());
    }
    if let Some(action) = foreign_key.update_action() {
        sql.push_str(" ON UPDATE ");
        sql.push_str(action.as_sql());
    }
    sql
}
