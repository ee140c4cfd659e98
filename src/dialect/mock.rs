//! Dialect with caller-supplied templates, for exercising the renderer.

use super::Dialect;
use crate::error::DdlError;
use crate::schema::{ForeignKey, Index, IndexKind, PrimaryKey};

/// Dialect whose templates are plain fields.
///
/// Types map to their own name, identifiers are left unquoted and there is no
/// auto-increment keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockDialect {
    pub engine: String,
    pub charset: String,
    pub header: String,
    pub footer: String,
    pub table: String,
}

impl MockDialect {
    pub fn new(engine: &str, charset: &str) -> Self {
        Self {
            engine: engine.to_string(),
            charset: charset.to_string(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, template: &str) -> Self {
        self.header = template.to_string();
        self
    }

    pub fn with_footer(mut self, template: &str) -> Self {
        self.footer = template.to_string();
        self
    }

    pub fn with_table(mut self, template: &str) -> Self {
        self.table = template.to_string();
        self
    }
}

impl Dialect for MockDialect {
    fn driver(&self) -> &'static str {
        "mock"
    }

    fn header_template(&self) -> String {
        self.header.clone()
    }

    fn footer_template(&self) -> String {
        self.footer.clone()
    }

    fn table_template(&self) -> String {
        self.table.clone()
    }

    fn to_sql(&self, type_name: &str, _size: u64) -> Result<String, DdlError> {
        Ok(type_name.to_string())
    }

    fn quote(&self, ident: &str) -> String {
        ident.to_string()
    }

    fn auto_increment(&self) -> &'static str {
        ""
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
        format!("{} {} ({})", index.kind().label(), index.name(), index.columns().join(", "))
    }

    fn primary_key_sql(&self, primary_key: &PrimaryKey) -> String {
        format!("PRIMARY KEY ({})", primary_key.columns().join(", "))
    }

    fn foreign_key_sql(&self, foreign_key: &ForeignKey) -> String {
        super::foreign_key_clause(foreign_key, |s| s.to_string())
    }
}
