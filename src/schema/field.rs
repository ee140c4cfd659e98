//! Field descriptors and the `Record` provider trait.

use convert_case::{Boundary, Case, Casing};
use serde::{Deserialize, Serialize};

use super::constraints::{ForeignKey, Index, PrimaryKey};

/// Snake-case an identifier; digits stay attached to the preceding word
/// (`Address1` becomes `address1`).
pub(crate) fn snake_case(name: &str) -> String {
    name.remove_boundaries(&Boundary::digits())
        .to_case(Case::Snake)
}

/// One declared field of a record: its name, native type and raw annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub native_type: String,
    #[serde(default, rename = "tag")]
    pub annotation: String,
}

impl FieldDescriptor {
    pub fn new(name: &str, native_type: &str, annotation: &str) -> Self {
        Self {
            name: name.to_string(),
            native_type: native_type.to_string(),
            annotation: annotation.to_string(),
        }
    }
}

/// A record type that can be turned into a table.
///
/// Only [`Record::fields`] is required. The table name defaults to the type
/// identifier in snake case; primary key, indexes and foreign keys default
/// to none.
///
/// # Example
///
/// ```
/// use ddl_maker::fields;
/// use ddl_maker::schema::{FieldDescriptor, PrimaryKey, Record};
///
/// struct TestOne;
///
/// impl Record for TestOne {
///     fn fields(&self) -> Vec<FieldDescriptor> {
///         fields![ID: "u64", Name: "String" => "size=40"]
///     }
///
///     fn primary_key(&self) -> Option<PrimaryKey> {
///         Some(PrimaryKey::new(["id"]))
///     }
/// }
///
/// assert_eq!(TestOne.table(), "test_one");
/// ```
pub trait Record {
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Unique identity used for duplicate detection.
    fn identity(&self) -> String {
        std::any::type_name_of_val(self).to_string()
    }

    /// Type identifier without module path or generic arguments.
    fn type_name(&self) -> String {
        let identity = self.identity();
        let head = identity.split('<').next().unwrap_or_default();
        head.rsplit("::").next().unwrap_or(head).to_string()
    }

    /// Explicit table name, if any.
    fn table_name(&self) -> Option<String> {
        None
    }

    /// Resolved table name.
    fn table(&self) -> String {
        self.table_name()
            .unwrap_or_else(|| snake_case(&self.type_name()))
    }

    fn primary_key(&self) -> Option<PrimaryKey> {
        None
    }

    fn indexes(&self) -> Vec<Index> {
        Vec::new()
    }

    fn foreign_keys(&self) -> Vec<ForeignKey> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct TestOne;

    impl Record for TestOne {
        fn fields(&self) -> Vec<FieldDescriptor> {
            vec![FieldDescriptor::new("ID", "u64", "")]
        }
    }

    struct User;

    impl Record for User {
        fn fields(&self) -> Vec<FieldDescriptor> {
            Vec::new()
        }

        fn table_name(&self) -> Option<String> {
            Some("player".to_string())
        }
    }

    struct Wrapper<T>(T);

    impl<T> Record for Wrapper<T> {
        fn fields(&self) -> Vec<FieldDescriptor> {
            Vec::new()
        }
    }

    #[rstest]
    fn test_identity_is_type_path() {
        assert!(TestOne.identity().ends_with("::TestOne"));
    }

    #[rstest]
    fn test_identity_through_trait_object() {
        let boxed: Box<dyn Record> = Box::new(TestOne);
        assert!(boxed.identity().ends_with("::TestOne"));
    }

    #[rstest]
    fn test_default_table_name_is_snake_case() {
        assert_eq!(TestOne.type_name(), "TestOne");
        assert_eq!(TestOne.table(), "test_one");
    }

    #[rstest]
    #[case("Address1", "address1")]
    #[case("UserID2", "user_id2")]
    #[case("HTTPRequest", "http_request")]
    fn test_snake_case_keeps_digits(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(snake_case(name), expected);
    }

    #[rstest]
    fn test_explicit_table_name() {
        assert_eq!(User.table(), "player");
    }

    #[rstest]
    fn test_type_name_strips_generics() {
        assert_eq!(Wrapper(TestOne).type_name(), "Wrapper");
        assert_eq!(Wrapper(1u8).table(), "wrapper");
    }

    #[rstest]
    fn test_descriptor_deserialization() {
        let field: FieldDescriptor =
            serde_json::from_str(r#"{"name": "Title", "type": "String", "tag": "size=100"}"#)
                .unwrap();
        assert_eq!(field, FieldDescriptor::new("Title", "String", "size=100"));

        let bare: FieldDescriptor = serde_json::from_str(r#"{"name": "ID", "type": "u64"}"#).unwrap();
        assert_eq!(bare.annotation, "");
    }
}
