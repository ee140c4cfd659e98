//! ddl_maker library - CREATE TABLE scripts from record schemas
//!
//! Records (Rust types implementing [`schema::Record`] or entries of a JSON
//! schema file) are translated column by column for a target dialect,
//! assembled into tables and rendered through the dialect's templates.

#[macro_use]
mod macros;

pub mod cli;
pub mod commands;
pub mod config;
pub mod dialect;
pub mod error;
pub mod logging;
pub mod maker;
pub mod output;
pub mod render;
pub mod schema;

pub use config::{Config, DbConfig};
pub use dialect::{Dialect, DialectKind};
pub use error::DdlError;
pub use maker::DdlMaker;
