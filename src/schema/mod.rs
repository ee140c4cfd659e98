//! Dialect-neutral schema model.
//!
//! # Overview
//!
//! 1. **Records** (`field.rs`):
//!    - `FieldDescriptor` - name, native type and raw annotation of one field
//!    - `Record` - provider trait implemented by anything that becomes a table
//!
//! 2. **Annotations** (`attributes.rs`): the `size=20,null,auto` tag language.
//!
//! 3. **Native types** (`native_type.rs`): the closed vocabulary dialects map from.
//!
//! 4. **Tables** (`column.rs`, `constraints.rs`, `table.rs`):
//!    - `Column` - one translated column definition
//!    - `PrimaryKey`, `Index`, `ForeignKey` - declared constraints
//!    - `Table` - assembled columns and constraints for one dialect
//!
//! 5. **Schema files** (`file.rs`): records declared in JSON.

mod attributes;
mod column;
mod constraints;
mod field;
mod file;
mod native_type;
mod table;

pub use attributes::{Attributes, IGNORE_MARKER, KEY_AUTO, KEY_DEFAULT, KEY_NULL, KEY_SIZE, KEY_TYPE};
pub use column::Column;
pub use constraints::{ForeignKey, ForeignKeyAction, Index, IndexKind, PrimaryKey};
pub use field::{FieldDescriptor, Record};
pub use file::{ForeignKeyDef, IndexDef, RecordDef, ReferenceDef, SchemaFile, SchemaFileError};
pub use native_type::NativeType;
pub use table::Table;
