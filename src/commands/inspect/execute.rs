use std::error::Error;

use serde::Serialize;

use super::InspectCmd;
use crate::commands::Execute;
use crate::dialect::Dialect;
use crate::schema::{Column, IndexKind, Table};

#[derive(Debug, Clone, Serialize)]
pub struct IndexSummary {
    pub name: String,
    pub kind: IndexKind,
    pub columns: Vec<String>,
}

/// One assembled table, constraints in render order.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub record: String,
    pub columns: Vec<Column>,
    pub primary_key: Vec<String>,
    pub indexes: Vec<IndexSummary>,
    pub foreign_keys: Vec<String>,
}

impl From<&Table> for TableSummary {
    fn from(table: &Table) -> Self {
        let dialect = table.dialect();
        Self {
            name: table.name().to_string(),
            record: table.identity().to_string(),
            columns: table.columns().to_vec(),
            primary_key: table
                .primary_key()
                .map(|pk| pk.columns().to_vec())
                .unwrap_or_default(),
            indexes: table
                .sorted_indexes()
                .into_iter()
                .map(|index| IndexSummary {
                    name: index.name().to_string(),
                    kind: index.kind(),
                    columns: index.columns().to_vec(),
                })
                .collect(),
            foreign_keys: table
                .sorted_foreign_keys()
                .into_iter()
                .map(|fk| dialect.foreign_key_sql(fk))
                .collect(),
        }
    }
}

/// Result of the inspect command execution
#[derive(Debug, Default, Serialize)]
pub struct InspectResult {
    pub driver: String,
    pub tables: Vec<TableSummary>,
}

impl Execute for InspectCmd {
    type Output = InspectResult;

    fn execute(self) -> Result<Self::Output, Box<dyn Error>> {
        let config = self.target.resolve_config()?;
        let mut maker = self.target.maker(config)?;
        let tables = maker.parse()?.iter().map(TableSummary::from).collect();

        Ok(InspectResult {
            driver: maker.dialect().driver().to_string(),
            tables,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::TargetArgs;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const SCHEMA: &str = r#"{
        "records": [
            {
                "name": "Entry",
                "fields": [
                    {"name": "ID", "type": "int32", "tag": "auto"},
                    {"name": "PlayerID", "type": "int32"},
                    {"name": "Title", "type": "string", "tag": "size=100"}
                ],
                "primary_key": ["id"],
                "indexes": [
                    {"name": "title_idx", "columns": ["title"]},
                    {"name": "player_id_idx", "kind": "unique", "columns": ["player_id"]}
                ],
                "foreign_keys": [
                    {"columns": ["player_id"], "references": {"table": "player", "columns": ["id"]},
                     "on_delete": "cascade"}
                ]
            }
        ]
    }"#;

    #[fixture]
    fn cmd() -> (TempDir, InspectCmd) {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("app.json");
        fs::write(&schema, SCHEMA).unwrap();
        let cmd = InspectCmd {
            target: TargetArgs {
                schema,
                config: None,
                driver: Some("sqlite".to_string()),
                engine: None,
                charset: None,
            },
        };
        (dir, cmd)
    }

    #[rstest]
    fn test_inspect(cmd: (TempDir, InspectCmd)) {
        let (_dir, cmd) = cmd;
        let result = cmd.execute().unwrap();

        assert_eq!(result.driver, "sqlite");
        assert_eq!(result.tables.len(), 1);

        let table = &result.tables[0];
        assert_eq!(table.name, "entry");
        assert_eq!(table.record, "app::Entry");
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.primary_key, vec!["id"]);

        let index_names: Vec<_> = table.indexes.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(index_names, vec!["player_id_idx", "title_idx"]);
        assert_eq!(
            table.foreign_keys,
            vec!["FOREIGN KEY (`player_id`) REFERENCES `player` (`id`) ON DELETE CASCADE"]
        );
    }
}
