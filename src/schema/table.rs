//! Table assembly.
//!
//! A [`Table`] is built from one [`Record`] for one dialect. Columns keep
//! declaration order; indexes and foreign keys keep declaration order in
//! storage and are exposed sorted, so rendering never depends on the order
//! in which they were declared.

use tracing::debug;

use super::column::Column;
use super::constraints::{ForeignKey, Index, PrimaryKey};
use super::field::Record;
use crate::dialect::{Dialect, DialectKind};
use crate::error::DdlError;

/// Everything needed to render one `CREATE TABLE`.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    identity: String,
    columns: Vec<Column>,
    primary_key: Option<PrimaryKey>,
    indexes: Vec<Index>,
    foreign_keys: Vec<ForeignKey>,
    dialect: DialectKind,
}

impl Table {
    /// Assemble the table of `record` for `dialect`.
    ///
    /// Ignored fields are skipped. The first translation failure aborts
    /// assembly and is wrapped with the table name.
    pub fn assemble(record: &dyn Record, dialect: &DialectKind) -> Result<Self, DdlError> {
        let name = record.table();

        let mut columns = Vec::new();
        for field in record.fields() {
            match Column::translate(&field, dialect) {
                Ok(column) => columns.push(column),
                Err(e) if e.is_ignore() => {
                    debug!(table = %name, field = %field.name, "Skipping ignored field");
                }
                Err(e) => return Err(e.in_table(&name)),
            }
        }

        let mut indexes = Vec::new();
        for index in record.indexes() {
            if !dialect.supports_index(index.kind()) {
                return Err(DdlError::UnsupportedIndex {
                    dialect: dialect.driver(),
                    kind: index.kind().label(),
                    index: index.name().to_string(),
                }
                .in_table(&name));
            }
            let index = match index.table() {
                Some(_) => index,
                None => index.on_table(&name),
            };
            indexes.push(index);
        }

        Ok(Self {
            identity: record.identity(),
            columns,
            primary_key: record.primary_key(),
            indexes,
            foreign_keys: record.foreign_keys(),
            dialect: dialect.clone(),
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the record this table was assembled from.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn primary_key(&self) -> Option<&PrimaryKey> {
        self.primary_key.as_ref()
    }

    pub fn dialect(&self) -> &DialectKind {
        &self.dialect
    }

    /// Indexes in declaration order.
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Foreign keys in declaration order.
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Indexes ordered by name.
    pub fn sorted_indexes(&self) -> Vec<&Index> {
        let mut sorted: Vec<&Index> = self.indexes.iter().collect();
        sorted.sort_by(|a, b| a.name().cmp(b.name()));
        sorted
    }

    /// Foreign keys ordered by their local column list.
    pub fn sorted_foreign_keys(&self) -> Vec<&ForeignKey> {
        let mut sorted: Vec<&ForeignKey> = self.foreign_keys.iter().collect();
        sorted.sort_by(|a, b| a.columns().cmp(b.columns()));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySql, Sqlite};
    use crate::schema::{FieldDescriptor, ForeignKeyAction};
    use rstest::{fixture, rstest};

    struct Entry {
        indexes: Vec<Index>,
        foreign_keys: Vec<ForeignKey>,
    }

    impl Record for Entry {
        fn fields(&self) -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::new("ID", "i32", "auto"),
                FieldDescriptor::new("PlayerID", "i32", ""),
                FieldDescriptor::new("Title", "String", "size=100"),
                FieldDescriptor::new("Secret", "String", "-"),
                FieldDescriptor::new("CreatedAt", "datetime", ""),
            ]
        }

        fn primary_key(&self) -> Option<PrimaryKey> {
            Some(PrimaryKey::new(["id"]))
        }

        fn indexes(&self) -> Vec<Index> {
            self.indexes.clone()
        }

        fn foreign_keys(&self) -> Vec<ForeignKey> {
            self.foreign_keys.clone()
        }
    }

    #[fixture]
    fn entry() -> Entry {
        Entry {
            indexes: vec![
                Index::unique("created_at_uniq_idx", ["created_at"]),
                Index::new("title_idx", ["title"]),
                Index::new("created_at_idx", ["created_at"]),
            ],
            foreign_keys: vec![
                ForeignKey::new(["player_id"], "player", ["id"])
                    .on_delete(ForeignKeyAction::Cascade),
                ForeignKey::new(["created_at"], "calendar", ["day"]),
            ],
        }
    }

    #[rstest]
    fn test_columns_skip_ignored_and_keep_order(entry: Entry) {
        let table = Table::assemble(&entry, &MySql::default().into()).unwrap();
        let names: Vec<_> = table.columns().iter().map(Column::name).collect();
        assert_eq!(names, vec!["id", "player_id", "title", "created_at"]);
        assert_eq!(table.name(), "entry");
        assert_eq!(table.primary_key().map(PrimaryKey::columns), Some(&["id".to_string()][..]));
    }

    #[rstest]
    fn test_indexes_sorted_by_name(entry: Entry) {
        let table = Table::assemble(&entry, &Sqlite.into()).unwrap();
        let names: Vec<_> = table.sorted_indexes().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["created_at_idx", "created_at_uniq_idx", "title_idx"]);
        // Declaration order is untouched.
        assert_eq!(table.indexes()[0].name(), "created_at_uniq_idx");
    }

    #[rstest]
    fn test_index_table_filled_in(entry: Entry) {
        let table = Table::assemble(&entry, &Sqlite.into()).unwrap();
        assert!(table.indexes().iter().all(|i| i.table() == Some("entry")));
    }

    #[rstest]
    fn test_declared_order_b_then_a_renders_a_first() {
        let record = Entry {
            indexes: vec![Index::new("b", ["title"]), Index::new("a", ["title"])],
            foreign_keys: Vec::new(),
        };
        let table = Table::assemble(&record, &MySql::default().into()).unwrap();
        let names: Vec<_> = table.sorted_indexes().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[rstest]
    fn test_foreign_keys_sorted_by_columns(entry: Entry) {
        let table = Table::assemble(&entry, &MySql::default().into()).unwrap();
        let tables: Vec<_> = table
            .sorted_foreign_keys()
            .iter()
            .map(|fk| fk.reference_table())
            .collect();
        assert_eq!(tables, vec!["calendar", "player"]);
    }

    #[rstest]
    fn test_unsupported_index_on_sqlite() {
        let record = Entry {
            indexes: vec![Index::full_text("ft_idx", ["title"])],
            foreign_keys: Vec::new(),
        };
        let err = Table::assemble(&record, &Sqlite.into()).unwrap_err();
        assert!(matches!(
            err.root(),
            DdlError::UnsupportedIndex { dialect: "sqlite", kind: "FULLTEXT", index } if index == "ft_idx"
        ));
    }

    #[rstest]
    fn test_translation_error_carries_table_and_field() {
        struct Broken;
        impl Record for Broken {
            fn fields(&self) -> Vec<FieldDescriptor> {
                vec![FieldDescriptor::new("Name", "String", "size=-1")]
            }
        }

        let err = Table::assemble(&Broken, &MySql::default().into()).unwrap_err();
        assert!(matches!(err.root(), DdlError::SizeParse { .. }));
        assert!(err.to_string().starts_with("table 'broken': field 'Name': "));
    }
}
