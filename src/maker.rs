//! Record registration and DDL generation.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};

use tracing::{debug, info};

use crate::config::Config;
use crate::dialect::{Dialect, DialectKind};
use crate::error::DdlError;
use crate::render::TemplateSet;
use crate::schema::{Record, Table};

/// Collects records and renders them as one DDL script.
///
/// ```
/// use ddl_maker::{fields, Config, DdlMaker};
/// use ddl_maker::schema::{FieldDescriptor, PrimaryKey, Record};
///
/// struct User;
///
/// impl Record for User {
///     fn fields(&self) -> Vec<FieldDescriptor> {
///         fields![ID: "u64" => "auto", Name: "String"]
///     }
///
///     fn primary_key(&self) -> Option<PrimaryKey> {
///         Some(PrimaryKey::new(["id"]))
///     }
/// }
///
/// let mut maker = DdlMaker::new(Config::default()).unwrap();
/// maker.add_record(User).unwrap();
///
/// let mut out = Vec::new();
/// maker.generate_to(&mut out).unwrap();
/// assert!(String::from_utf8(out).unwrap().contains("CREATE TABLE `user`"));
/// ```
pub struct DdlMaker {
    config: Config,
    dialect: DialectKind,
    records: Vec<Box<dyn Record>>,
    identities: HashSet<String>,
    tables: Vec<Table>,
}

impl DdlMaker {
    /// Create a maker for the dialect named in `config`.
    pub fn new(config: Config) -> Result<Self, DdlError> {
        let dialect = config.dialect()?;
        Ok(Self::with_dialect(config, dialect))
    }

    /// Create a maker with an explicit dialect; the `db` section of `config` is not consulted.
    pub fn with_dialect(config: Config, dialect: DialectKind) -> Self {
        Self {
            config,
            dialect,
            records: Vec::new(),
            identities: HashSet::new(),
            tables: Vec::new(),
        }
    }

    pub fn dialect(&self) -> &DialectKind {
        &self.dialect
    }

    /// Register a record type.
    ///
    /// Fails with `DuplicateStruct` if a record with the same identity was
    /// already registered on this maker.
    pub fn add_record<R: Record + 'static>(&mut self, record: R) -> Result<(), DdlError> {
        self.add_boxed(Box::new(record))
    }

    pub fn add_boxed(&mut self, record: Box<dyn Record>) -> Result<(), DdlError> {
        let identity = record.identity();
        if !self.identities.insert(identity.clone()) {
            return Err(DdlError::DuplicateStruct { name: identity });
        }
        debug!(record = %identity, "Registered record");
        self.records.push(record);
        Ok(())
    }

    /// Register several records, stopping at the first duplicate.
    pub fn add_records<I, R>(&mut self, records: I) -> Result<(), DdlError>
    where
        I: IntoIterator<Item = R>,
        R: Record + 'static,
    {
        records
            .into_iter()
            .try_for_each(|record| self.add_record(record))
    }

    /// Number of registered records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Assemble a table for every registered record, in registration order.
    pub fn parse(&mut self) -> Result<&[Table], DdlError> {
        self.tables = self
            .records
            .iter()
            .map(|record| Table::assemble(record.as_ref(), &self.dialect))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(&self.tables)
    }

    /// Tables from the last successful [`DdlMaker::parse`].
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Render the script into `out`.
    ///
    /// Templates are parsed and every table is assembled before the first
    /// byte is written.
    pub fn generate_to<W: Write>(&mut self, out: &mut W) -> Result<(), DdlError> {
        let templates = TemplateSet::parse(&self.dialect)?;
        self.parse()?;

        info!(
            driver = self.dialect.driver(),
            tables = self.tables.len(),
            "Generating DDL"
        );
        templates.render(&self.dialect, &self.tables, out)
    }

    /// Render the script into the configured output file.
    ///
    /// The file is only created once rendering has succeeded.
    pub fn generate(&mut self) -> Result<(), DdlError> {
        let Some(path) = self.config.out_file_path.clone() else {
            return Err(DdlError::Destination {
                path: String::new(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "no output file configured"),
            });
        };

        let mut buffer = Vec::new();
        self.generate_to(&mut buffer)?;

        fs::write(&path, buffer).map_err(|source| DdlError::Destination {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "DDL written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MockDialect, MySql, Sqlite};
    use crate::schema::{FieldDescriptor, Index, PrimaryKey};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct TestOne;

    impl Record for TestOne {
        fn fields(&self) -> Vec<FieldDescriptor> {
            fields![
                ID: "u64",
                Name: "String",
                CreatedAt: "chrono::NaiveDateTime",
                UpdatedAt: "chrono::NaiveDateTime",
            ]
        }

        fn primary_key(&self) -> Option<PrimaryKey> {
            Some(PrimaryKey::new(["id"]))
        }
    }

    /// Same layout as `TestOne`, different type.
    struct TestOneCopy;

    impl Record for TestOneCopy {
        fn fields(&self) -> Vec<FieldDescriptor> {
            TestOne.fields()
        }

        fn primary_key(&self) -> Option<PrimaryKey> {
            TestOne.primary_key()
        }
    }

    struct TestTwo;

    impl Record for TestTwo {
        fn fields(&self) -> Vec<FieldDescriptor> {
            fields![
                ID: "u64" => "auto",
                TestOneID: "u64",
                Comment: "Option<String>" => "null",
                CreatedAt: "chrono::NaiveDateTime",
                UpdatedAt: "chrono::NaiveDateTime",
            ]
        }

        fn primary_key(&self) -> Option<PrimaryKey> {
            Some(PrimaryKey::new(["id", "created_at"]))
        }
    }

    struct TestThree;

    impl Record for TestThree {
        fn fields(&self) -> Vec<FieldDescriptor> {
            fields![ID: "unknown"]
        }
    }

    struct Tagged;

    impl Record for Tagged {
        fn fields(&self) -> Vec<FieldDescriptor> {
            fields![ID: "i32", Email: "String" => "size=-1"]
        }

        fn primary_key(&self) -> Option<PrimaryKey> {
            Some(PrimaryKey::new(["id"]))
        }
    }

    struct Account;

    impl Record for Account {
        fn fields(&self) -> Vec<FieldDescriptor> {
            fields![ID: "i32" => "auto", Email: "String"]
        }

        fn primary_key(&self) -> Option<PrimaryKey> {
            Some(PrimaryKey::new(["id"]))
        }

        fn indexes(&self) -> Vec<Index> {
            vec![Index::unique("email_uniq_idx", ["email"])]
        }
    }

    struct Log;

    impl Record for Log {
        fn fields(&self) -> Vec<FieldDescriptor> {
            fields![Message: "String", CreatedAt: "datetime"]
        }
    }

    #[fixture]
    fn mysql_maker() -> DdlMaker {
        DdlMaker::with_dialect(Config::default(), MySql::default().into())
    }

    fn generate(maker: &mut DdlMaker) -> Result<String, DdlError> {
        let mut out = Vec::new();
        maker.generate_to(&mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[rstest]
    fn test_duplicate_record(mut mysql_maker: DdlMaker) {
        mysql_maker.add_record(TestOne).unwrap();
        let err = mysql_maker.add_record(TestOne).unwrap_err();

        match err {
            DdlError::DuplicateStruct { name } => assert!(name.ends_with("::TestOne")),
            other => panic!("expected duplicate error, got {other:?}"),
        }
        assert_eq!(mysql_maker.len(), 1);
    }

    #[rstest]
    fn test_duplicate_across_calls(mut mysql_maker: DdlMaker) {
        let err = mysql_maker.add_records([TestOne, TestOne]).unwrap_err();
        assert!(err.to_string().ends_with("::TestOne is already added"));
    }

    #[rstest]
    fn test_distinct_types_with_same_layout(mut mysql_maker: DdlMaker) {
        mysql_maker.add_record(TestOne).unwrap();
        mysql_maker.add_record(TestOneCopy).unwrap();
        assert_eq!(mysql_maker.len(), 2);
    }

    #[rstest]
    fn test_generate_mysql(mut mysql_maker: DdlMaker) {
        mysql_maker.add_record(TestOne).unwrap();

        let expected = "SET foreign_key_checks=0;\n\
\n\
DROP TABLE IF EXISTS `test_one`;\n\
\n\
CREATE TABLE `test_one` (\n    \
`id` BIGINT unsigned NOT NULL,\n    \
`name` VARCHAR(191) NOT NULL,\n    \
`created_at` DATETIME NOT NULL,\n    \
`updated_at` DATETIME NOT NULL,\n    \
PRIMARY KEY (`id`)\n\
) ENGINE=InnoDB DEFAULT CHARACTER SET utf8mb4;\n\
\n\
SET foreign_key_checks=1;\n";

        assert_eq!(generate(&mut mysql_maker).unwrap(), expected);
    }

    #[rstest]
    fn test_generate_mysql_composite_key_and_auto(mut mysql_maker: DdlMaker) {
        mysql_maker.add_record(TestTwo).unwrap();
        let ddl = generate(&mut mysql_maker).unwrap();

        assert!(ddl.contains("    `id` BIGINT unsigned NOT NULL AUTO_INCREMENT,\n"));
        assert!(ddl.contains("    `test_one_id` BIGINT unsigned NOT NULL,\n"));
        assert!(ddl.contains("    `comment` VARCHAR(191) NULL,\n"));
        assert!(ddl.contains("    PRIMARY KEY (`id`, `created_at`)\n"));
    }

    #[rstest]
    fn test_generate_sqlite_unique_index_after_table() {
        let mut maker = DdlMaker::with_dialect(Config::default(), Sqlite.into());
        maker.add_record(Account).unwrap();
        let ddl = generate(&mut maker).unwrap();

        let expected = "PRAGMA foreign_keys = false;\n\
\n\
DROP TABLE IF EXISTS `account`;\n\
\n\
CREATE TABLE `account` (\n    \
`id` INTEGER NOT NULL AUTOINCREMENT,\n    \
`email` TEXT NOT NULL,\n    \
PRIMARY KEY (`id`)\n\
);\n\
CREATE UNIQUE INDEX `email_uniq_idx` ON `account` (`email`);\n\
\n\
PRAGMA foreign_keys = true;\n";
        assert_eq!(ddl, expected);
    }

    #[rstest]
    fn test_generate_mysql_without_primary_key(mut mysql_maker: DdlMaker) {
        mysql_maker.add_record(Log).unwrap();

        let expected = "SET foreign_key_checks=0;\n\
\n\
DROP TABLE IF EXISTS `log`;\n\
\n\
CREATE TABLE `log` (\n    \
`message` VARCHAR(191) NOT NULL,\n    \
`created_at` DATETIME NOT NULL\n\
) ENGINE=InnoDB DEFAULT CHARACTER SET utf8mb4;\n\
\n\
SET foreign_key_checks=1;\n";
        assert_eq!(generate(&mut mysql_maker).unwrap(), expected);
    }

    #[rstest]
    fn test_generate_sqlite_without_primary_key() {
        let mut maker = DdlMaker::with_dialect(Config::default(), Sqlite.into());
        maker.add_record(Log).unwrap();

        let expected = "PRAGMA foreign_keys = false;\n\
\n\
DROP TABLE IF EXISTS `log`;\n\
\n\
CREATE TABLE `log` (\n    \
`message` TEXT NOT NULL,\n    \
`created_at` INTEGER NOT NULL\n\
);\n\
\n\
PRAGMA foreign_keys = true;\n";
        assert_eq!(generate(&mut maker).unwrap(), expected);
    }

    #[rstest]
    fn test_bad_size_fails_before_output(mut mysql_maker: DdlMaker) {
        mysql_maker.add_record(TestOne).unwrap();
        mysql_maker.add_record(Tagged).unwrap();

        let mut out = Vec::new();
        let err = mysql_maker.generate_to(&mut out).unwrap_err();

        assert!(matches!(err.root(), DdlError::SizeParse { value, .. } if value == "-1"));
        assert!(out.is_empty());
    }

    #[rstest]
    fn test_invalid_type(mut mysql_maker: DdlMaker) {
        mysql_maker.add_record(TestThree).unwrap();
        let err = generate(&mut mysql_maker).unwrap_err();
        assert!(matches!(err.root(), DdlError::InvalidType { type_name } if type_name == "unknown"));
    }

    #[rstest]
    fn test_malformed_template_writes_nothing() {
        let dialect = MockDialect::new("dummy", "dummy")
            .with_header("{{")
            .with_table("{{ name }}");
        let mut maker = DdlMaker::with_dialect(Config::default(), dialect.into());
        maker.add_record(TestOne).unwrap();

        let mut out = Vec::new();
        let err = maker.generate_to(&mut out).unwrap_err();

        assert!(matches!(err, DdlError::TemplateParse { .. }));
        assert!(out.is_empty());
    }

    #[rstest]
    fn test_generate_writes_configured_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.sql");
        let config = Config {
            out_file_path: Some(path.clone()),
            ..Config::default()
        };

        let mut maker = DdlMaker::new(config).unwrap();
        maker.add_record(TestOne).unwrap();
        maker.generate().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("SET foreign_key_checks=0;\n"));
        assert!(written.ends_with("SET foreign_key_checks=1;\n"));
    }

    #[rstest]
    fn test_failed_generate_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.sql");
        let config = Config {
            out_file_path: Some(path.clone()),
            ..Config::default()
        };
        let dialect = MockDialect::new("dummy", "dummy").with_table("{{ range columns }}");

        let mut maker = DdlMaker::with_dialect(config, dialect.into());
        maker.add_record(TestOne).unwrap();

        assert!(maker.generate().is_err());
        assert!(!path.exists());
    }

    #[rstest]
    fn test_generate_without_path(mut mysql_maker: DdlMaker) {
        mysql_maker.add_record(TestOne).unwrap();
        let err = mysql_maker.generate().unwrap_err();
        assert!(matches!(err, DdlError::Destination { .. }));
    }

    #[rstest]
    fn test_unwritable_destination() {
        let config = Config {
            out_file_path: Some("/nonexistent/dir/schema.sql".into()),
            ..Config::default()
        };
        let mut maker = DdlMaker::new(config).unwrap();
        maker.add_record(TestOne).unwrap();

        let err = maker.generate().unwrap_err();
        assert!(matches!(err, DdlError::Destination { path, .. } if path == "/nonexistent/dir/schema.sql"));
    }

    #[rstest]
    fn test_parse_keeps_registration_order(mut mysql_maker: DdlMaker) {
        mysql_maker.add_record(TestTwo).unwrap();
        mysql_maker.add_record(TestOne).unwrap();
        let names: Vec<_> = mysql_maker
            .parse()
            .unwrap()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["test_two", "test_one"]);
    }
}
