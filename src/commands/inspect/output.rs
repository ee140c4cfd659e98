//! Output formatting for inspect command results.

use super::execute::InspectResult;
use crate::output::Outputable;

impl Outputable for InspectResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("Tables ({}): {}", self.driver, self.tables.len())];

        for table in &self.tables {
            lines.push(String::new());
            lines.push(format!("{} ({})", table.name, table.record));

            let width = table
                .columns
                .iter()
                .map(|c| c.name().len())
                .max()
                .unwrap_or(0);
            for column in &table.columns {
                let mut flags = Vec::new();
                flags.push(if column.is_nullable() { "NULL" } else { "NOT NULL" }.to_string());
                if let Some(default) = column.default() {
                    flags.push(format!("DEFAULT {}", default));
                }
                if column.is_auto_increment() {
                    flags.push("auto".to_string());
                }
                lines.push(format!(
                    "  {:width$}  {} {}",
                    column.name(),
                    column.sql_type(),
                    flags.join(" "),
                    width = width
                ));
            }

            if !table.primary_key.is_empty() {
                lines.push(format!("  primary key: {}", table.primary_key.join(", ")));
            }
            for index in &table.indexes {
                lines.push(format!(
                    "  {} {}: {}",
                    index.kind.label().to_lowercase(),
                    index.name,
                    index.columns.join(", ")
                ));
            }
            for fk in &table.foreign_keys {
                lines.push(format!("  {}", fk));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::super::execute::{IndexSummary, TableSummary};
    use super::*;
    use crate::dialect::MySql;
    use crate::output::OutputFormat;
    use crate::schema::{Column, FieldDescriptor, IndexKind};
    use rstest::{fixture, rstest};

    const TABLE_OUTPUT: &str = "\
Tables (mysql): 1

player (app::User)
  id    INTEGER NOT NULL auto
  name  VARCHAR(40) NULL DEFAULT ''
  primary key: id
  unique name_idx: name";

    #[fixture]
    fn result() -> InspectResult {
        let dialect = MySql::default().into();
        let columns = vec![
            Column::translate(&FieldDescriptor::new("ID", "i32", "auto"), &dialect).unwrap(),
            Column::translate(
                &FieldDescriptor::new("Name", "String", "size=40,null,default=''"),
                &dialect,
            )
            .unwrap(),
        ];
        InspectResult {
            driver: "mysql".to_string(),
            tables: vec![TableSummary {
                name: "player".to_string(),
                record: "app::User".to_string(),
                columns,
                primary_key: vec!["id".to_string()],
                indexes: vec![IndexSummary {
                    name: "name_idx".to_string(),
                    kind: IndexKind::Unique,
                    columns: vec!["name".to_string()],
                }],
                foreign_keys: Vec::new(),
            }],
        }
    }

    #[rstest]
    fn test_to_table(result: InspectResult) {
        assert_eq!(result.to_table(), TABLE_OUTPUT);
    }

    #[rstest]
    fn test_format_json(result: InspectResult) {
        let json: serde_json::Value =
            serde_json::from_str(&result.format(OutputFormat::Json)).unwrap();
        assert_eq!(json["tables"][0]["columns"][1]["sql_type"], "VARCHAR(40)");
        assert_eq!(json["tables"][0]["indexes"][0]["kind"], "unique");
    }

    #[rstest]
    fn test_empty() {
        let result = InspectResult {
            driver: "sqlite".to_string(),
            tables: Vec::new(),
        };
        assert_eq!(result.to_table(), "Tables (sqlite): 0");
    }
}
