//! Error taxonomy for DDL generation.
//!
//! Every failure of the pipeline is one variant of [`DdlError`]. Context
//! (which field, which table) is attached with the `Field` and `Table`
//! wrappers; [`DdlError::root`] peels them so callers can match on the kind.

use std::io;
use std::num::ParseIntError;

use thiserror::Error;

/// DDL generation error types
#[derive(Error, Debug)]
pub enum DdlError {
    /// Control-flow signal: the field carries the ignore marker and produces no column.
    #[error("field '{field}' is ignored")]
    IgnoreField { field: String },

    #[error("specified type is invalid: {type_name}")]
    InvalidType { type_name: String },

    #[error("invalid size '{value}': {source}")]
    SizeParse {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{name} is already added")]
    DuplicateStruct { name: String },

    #[error("unsupported driver '{driver}' (expected one of: mysql, sqlite)")]
    UnsupportedDriver { driver: String },

    #[error("{dialect} does not support {kind} index '{index}'")]
    UnsupportedIndex {
        dialect: &'static str,
        kind: &'static str,
        index: String,
    },

    #[error("template {template}:{line}: {message}")]
    TemplateParse {
        template: String,
        line: usize,
        message: String,
    },

    #[error("template {template}: {message}")]
    TemplateExecute { template: String, message: String },

    #[error("failed to write ddl to '{path}': {source}")]
    Destination {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: Box<DdlError>,
    },

    #[error("table '{table}': {source}")]
    Table {
        table: String,
        #[source]
        source: Box<DdlError>,
    },
}

impl DdlError {
    /// Wrap this error with the name of the field being translated.
    pub fn in_field(self, field: impl Into<String>) -> Self {
        DdlError::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// Wrap this error with the name of the table being assembled.
    pub fn in_table(self, table: impl Into<String>) -> Self {
        DdlError::Table {
            table: table.into(),
            source: Box::new(self),
        }
    }

    /// Returns the underlying error kind, skipping `Field`/`Table` context.
    pub fn root(&self) -> &DdlError {
        match self {
            DdlError::Field { source, .. } | DdlError::Table { source, .. } => source.root(),
            other => other,
        }
    }

    /// True when the root cause is the ignore-field signal.
    pub fn is_ignore(&self) -> bool {
        matches!(self.root(), DdlError::IgnoreField { .. })
    }
}
