//! Template contexts for dialects and tables.
//!
//! Table template keys: `name` (quoted), `columns`, `indexes`,
//! `foreign_keys`, `primary_key`, `definitions`, `dialect`. Every list item
//! exposes `name` and `sql`. Header and footer templates see `dialect` and
//! `tables`.
//!
//! `definitions` is the table body in order: columns, inline indexes,
//! foreign keys, then the primary key when there is one. Its items also
//! expose `separator`, which is `,` on every item but the last.

use super::template::{Context, Value};
use crate::dialect::{Dialect, DialectKind};
use crate::schema::Table;

/// A named, pre-rendered SQL fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub name: String,
    pub sql: String,
}

impl Context for Fragment {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        match key {
            "name" => Some(Value::text(self.name.as_str())),
            "sql" => Some(Value::text(self.sql.as_str())),
            _ => None,
        }
    }
}

fn fragments(items: impl IntoIterator<Item = Fragment>) -> Value<'static> {
    Value::List(
        items
            .into_iter()
            .map(|fragment| Box::new(fragment) as Box<dyn Context>)
            .collect(),
    )
}

/// One entry of a table body, followed by its separator.
struct Definition {
    fragment: Fragment,
    separator: &'static str,
}

impl Context for Definition {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        match key {
            "separator" => Some(Value::text(self.separator)),
            _ => self.fragment.get(key),
        }
    }
}

fn definitions(items: Vec<Fragment>) -> Value<'static> {
    let last = items.len().saturating_sub(1);
    Value::List(
        items
            .into_iter()
            .enumerate()
            .map(|(i, fragment)| {
                let separator = if i == last { "" } else { "," };
                Box::new(Definition {
                    fragment,
                    separator,
                }) as Box<dyn Context>
            })
            .collect(),
    )
}

fn optional(value: Option<&str>) -> Value<'static> {
    value.map(Value::text).unwrap_or(Value::Nil)
}

impl Context for DialectKind {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        match key {
            "driver" => Some(Value::text(self.driver())),
            "engine" => Some(optional(self.engine())),
            "charset" => Some(optional(self.charset())),
            _ => None,
        }
    }
}

fn column_fragments(table: &Table) -> impl Iterator<Item = Fragment> + '_ {
    table.columns().iter().map(move |column| Fragment {
        name: column.name().to_string(),
        sql: column.to_sql(table.dialect()),
    })
}

fn index_fragments(table: &Table) -> impl Iterator<Item = Fragment> + '_ {
    table.sorted_indexes().into_iter().map(move |index| Fragment {
        name: index.name().to_string(),
        sql: table.dialect().index_sql(index),
    })
}

fn foreign_key_fragments(table: &Table) -> impl Iterator<Item = Fragment> + '_ {
    table.sorted_foreign_keys().into_iter().map(move |fk| Fragment {
        name: fk.columns().join(","),
        sql: table.dialect().foreign_key_sql(fk),
    })
}

impl Context for Table {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        let dialect = self.dialect();
        let value = match key {
            "name" => Value::text(dialect.quote(self.name())),
            "columns" => fragments(column_fragments(self)),
            "indexes" => fragments(index_fragments(self)),
            "foreign_keys" => fragments(foreign_key_fragments(self)),
            "primary_key" => match self.primary_key() {
                Some(pk) => Value::text(dialect.primary_key_sql(pk)),
                None => Value::Nil,
            },
            "definitions" => {
                let mut items: Vec<Fragment> = column_fragments(self).collect();
                if dialect.inline_indexes() {
                    items.extend(index_fragments(self));
                }
                items.extend(foreign_key_fragments(self));
                if let Some(pk) = self.primary_key() {
                    items.push(Fragment {
                        name: "primary_key".to_string(),
                        sql: dialect.primary_key_sql(pk),
                    });
                }
                definitions(items)
            }
            "dialect" => Value::Object(Box::new(dialect)),
            _ => return None,
        };
        Some(value)
    }
}

/// Context for header and footer templates.
pub struct ScriptContext<'a> {
    pub dialect: &'a DialectKind,
    pub tables: &'a [Table],
}

impl Context for ScriptContext<'_> {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        match key {
            "dialect" => Some(Value::Object(Box::new(self.dialect))),
            "tables" => Some(fragments(self.tables.iter().map(|table| Fragment {
                name: table.name().to_string(),
                sql: self.dialect.quote(table.name()),
            }))),
            _ => None,
        }
    }
}
