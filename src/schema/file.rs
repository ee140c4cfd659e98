//! JSON schema files.
//!
//! Records can be declared without Rust code:
//!
//! ```json
//! {
//!   "records": [
//!     {
//!       "name": "Entry",
//!       "fields": [
//!         {"name": "ID", "type": "int32", "tag": "auto"},
//!         {"name": "PlayerID", "type": "int32"}
//!       ],
//!       "primary_key": ["id"],
//!       "indexes": [{"name": "player_id_idx", "kind": "unique", "columns": ["player_id"]}],
//!       "foreign_keys": [
//!         {"columns": ["player_id"], "references": {"table": "player", "columns": ["id"]},
//!          "on_delete": "cascade"}
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::constraints::{ForeignKey, ForeignKeyAction, Index, IndexKind, PrimaryKey};
use super::field::{FieldDescriptor, Record};

#[derive(Error, Debug)]
pub enum SchemaFileError {
    #[error("Failed to read schema file '{path}': {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to parse schema JSON in '{path}': {message}")]
    InvalidJson { path: String, message: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexDef {
    pub name: String,
    #[serde(default)]
    pub kind: IndexKind,
    pub columns: Vec<String>,
    #[serde(default)]
    pub parser: Option<String>,
}

impl IndexDef {
    fn to_index(&self) -> Index {
        let index = Index::new(&self.name, self.columns.iter().cloned()).of_kind(self.kind);
        match &self.parser {
            Some(parser) => index.with_parser(parser),
            None => index,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceDef {
    pub table: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForeignKeyDef {
    pub columns: Vec<String>,
    pub references: ReferenceDef,
    #[serde(default)]
    pub on_delete: Option<ForeignKeyAction>,
    #[serde(default)]
    pub on_update: Option<ForeignKeyAction>,
}

impl ForeignKeyDef {
    fn to_foreign_key(&self) -> ForeignKey {
        let mut fk = ForeignKey::new(
            self.columns.iter().cloned(),
            &self.references.table,
            self.references.columns.iter().cloned(),
        );
        if let Some(action) = self.on_delete {
            fk = fk.on_delete(action);
        }
        if let Some(action) = self.on_update {
            fk = fk.on_update(action);
        }
        fk
    }
}

/// One record declared in a schema file.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordDef {
    pub name: String,
    #[serde(default)]
    pub table: Option<String>,
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default)]
    pub indexes: Vec<IndexDef>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDef>,
    /// Stem of the file the record was loaded from.
    #[serde(skip)]
    pub source: String,
}

impl Record for RecordDef {
    fn fields(&self) -> Vec<FieldDescriptor> {
        self.fields.clone()
    }

    fn identity(&self) -> String {
        format!("{}::{}", self.source, self.name)
    }

    fn type_name(&self) -> String {
        self.name.clone()
    }

    fn table_name(&self) -> Option<String> {
        self.table.clone()
    }

    fn primary_key(&self) -> Option<PrimaryKey> {
        if self.primary_key.is_empty() {
            None
        } else {
            Some(PrimaryKey::new(self.primary_key.iter().cloned()))
        }
    }

    fn indexes(&self) -> Vec<Index> {
        self.indexes.iter().map(IndexDef::to_index).collect()
    }

    fn foreign_keys(&self) -> Vec<ForeignKey> {
        self.foreign_keys.iter().map(ForeignKeyDef::to_foreign_key).collect()
    }
}

/// Top-level schema file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaFile {
    pub records: Vec<RecordDef>,
}

impl SchemaFile {
    /// Load and parse a schema file.
    pub fn load(path: &Path) -> Result<Self, SchemaFileError> {
        let content = fs::read_to_string(path).map_err(|e| SchemaFileError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let source = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::parse(&source, &content).map_err(|e| SchemaFileError::InvalidJson {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Parse schema JSON, tagging every record with `source`.
    pub fn parse(source: &str, content: &str) -> Result<Self, serde_json::Error> {
        let mut file: SchemaFile = serde_json::from_str(content)?;
        for record in &mut file.records {
            record.source = source.to_string();
        }
        Ok(file)
    }

    pub fn into_records(self) -> Vec<RecordDef> {
        self.records
    }
}
