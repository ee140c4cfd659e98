//! DDL rendering.
//!
//! A [`TemplateSet`] holds a dialect's three templates, parsed up front so a
//! malformed template is reported before anything is written. Rendering
//! emits the header once, one body per table in registration order, then the
//! footer.

mod context;
mod template;

use std::io::Write;

use tracing::debug;

pub use context::{Fragment, ScriptContext};
pub use template::{Context, Template, Value};

use crate::dialect::{Dialect, DialectKind};
use crate::error::DdlError;
use crate::schema::Table;

pub const HEADER_TEMPLATE_NAME: &str = "header";
pub const TABLE_TEMPLATE_NAME: &str = "ddl";
pub const FOOTER_TEMPLATE_NAME: &str = "footer";

/// Label used in destination errors when writing to an arbitrary writer.
const WRITER_DESTINATION: &str = "<writer>";

/// Parsed header, table and footer templates of one dialect.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    header: Template,
    table: Template,
    footer: Template,
}

impl TemplateSet {
    pub fn parse(dialect: &DialectKind) -> Result<Self, DdlError> {
        Ok(Self {
            header: Template::parse(HEADER_TEMPLATE_NAME, &dialect.header_template())?,
            table: Template::parse(TABLE_TEMPLATE_NAME, &dialect.table_template())?,
            footer: Template::parse(FOOTER_TEMPLATE_NAME, &dialect.footer_template())?,
        })
    }

    /// Render the whole script into `out`.
    ///
    /// Each section is written as soon as it is rendered; the first failure
    /// stops the stream.
    pub fn render<W: Write>(
        &self,
        dialect: &DialectKind,
        tables: &[Table],
        out: &mut W,
    ) -> Result<(), DdlError> {
        let script = ScriptContext { dialect, tables };

        write_section(out, &self.header.render(&script)?)?;
        for table in tables {
            debug!(table = table.name(), "Rendering table");
            let body = self
                .table
                .render(table)
                .map_err(|e| e.in_table(table.name()))?;
            write_section(out, &body)?;
        }
        write_section(out, &self.footer.render(&script)?)?;

        out.flush().map_err(|source| DdlError::Destination {
            path: WRITER_DESTINATION.to_string(),
            source,
        })
    }
}

fn write_section<W: Write>(out: &mut W, text: &str) -> Result<(), DdlError> {
    out.write_all(text.as_bytes())
        .map_err(|source| DdlError::Destination {
            path: WRITER_DESTINATION.to_string(),
            source,
        })
}
