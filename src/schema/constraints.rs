//! Primary keys, indexes and foreign keys declared by a record.
//!
//! These are dialect-neutral values; each dialect renders them (see
//! `Dialect::index_sql` and friends).

use serde::{Deserialize, Serialize};

fn to_strings<I, S>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    columns.into_iter().map(Into::into).collect()
}

/// Ordered list of primary key columns. Order defines the composite key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryKey {
    columns: Vec<String>,
}

impl PrimaryKey {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: to_strings(columns),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Kind of secondary index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    #[default]
    Index,
    Unique,
    FullText,
    Spatial,
}

impl IndexKind {
    pub fn label(&self) -> &'static str {
        match self {
            IndexKind::Index => "INDEX",
            IndexKind::Unique => "UNIQUE",
            IndexKind::FullText => "FULLTEXT",
            IndexKind::Spatial => "SPATIAL",
        }
    }
}

/// Secondary index on one or more columns.
///
/// `table` is only rendered by dialects that emit indexes as separate
/// statements; when unset, the table assembler fills in the owning table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Index {
    name: String,
    kind: IndexKind,
    table: Option<String>,
    columns: Vec<String>,
    parser: Option<String>,
}

impl Index {
    fn with_kind<I, S>(kind: IndexKind, name: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            kind,
            table: None,
            columns: to_strings(columns),
            parser: None,
        }
    }

    pub fn new<I, S>(name: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_kind(IndexKind::Index, name, columns)
    }

    pub fn unique<I, S>(name: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_kind(IndexKind::Unique, name, columns)
    }

    pub fn full_text<I, S>(name: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_kind(IndexKind::FullText, name, columns)
    }

    pub fn spatial<I, S>(name: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_kind(IndexKind::Spatial, name, columns)
    }

    /// Same index with a different kind.
    pub fn of_kind(mut self, kind: IndexKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn on_table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Full-text parser plugin (`WITH PARSER ...`).
    pub fn with_parser(mut self, parser: &str) -> Self {
        self.parser = Some(parser.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn parser(&self) -> Option<&str> {
        self.parser.as_deref()
    }
}

/// Referential action for `ON DELETE` / `ON UPDATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyAction {
    Cascade,
    SetNull,
    Restrict,
    NoAction,
    SetDefault,
}

impl ForeignKeyAction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ForeignKeyAction::Cascade => "CASCADE",
            ForeignKeyAction::SetNull => "SET NULL",
            ForeignKeyAction::Restrict => "RESTRICT",
            ForeignKeyAction::NoAction => "NO ACTION",
            ForeignKeyAction::SetDefault => "SET DEFAULT",
        }
    }

    /// RESTRICT and NO ACTION are what an omitted clause means anyway.
    fn explicit(self) -> Option<Self> {
        match self {
            ForeignKeyAction::Restrict | ForeignKeyAction::NoAction => None,
            other => Some(other),
        }
    }
}

/// Foreign key from local columns to columns of another table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    columns: Vec<String>,
    reference_table: String,
    reference_columns: Vec<String>,
    on_update: Option<ForeignKeyAction>,
    on_delete: Option<ForeignKeyAction>,
}

impl ForeignKey {
    pub fn new<I, S, J, T>(columns: I, reference_table: &str, reference_columns: J) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            columns: to_strings(columns),
            reference_table: reference_table.to_string(),
            reference_columns: to_strings(reference_columns),
            on_update: None,
            on_delete: None,
        }
    }

    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = action.explicit();
        self
    }

    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = action.explicit();
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn reference_table(&self) -> &str {
        &self.reference_table
    }

    pub fn reference_columns(&self) -> &[String] {
        &self.reference_columns
    }

    pub fn update_action(&self) -> Option<ForeignKeyAction> {
        self.on_update
    }

    pub fn delete_action(&self) -> Option<ForeignKeyAction> {
        self.on_delete
    }
}
