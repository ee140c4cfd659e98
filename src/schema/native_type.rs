//! Native type vocabulary.
//!
//! The closed set of field types a record may declare. Each dialect maps
//! every variant to its own SQL type (or rejects it); the names accepted by
//! [`NativeType::from_str`] cover Rust spellings and the lowercase generic
//! spellings used in schema files.

use std::fmt;
use std::str::FromStr;

use crate::error::DdlError;

/// Represents a native field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Bool,
    /// Variable length string (`String`, `&str`)
    String,
    /// Variable length binary (`Vec<u8>`)
    Bytes,
    TinyText,
    Text,
    MediumText,
    LongText,
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,
    /// Time of day
    Time,
    /// Date and time, optionally with fractional seconds
    DateTime,
    Date,
    /// Raw JSON document
    Json,
    Geometry,
}

impl NativeType {
    /// Every native type, in declaration order.
    pub const ALL: &'static [NativeType] = &[
        NativeType::Int8,
        NativeType::Int16,
        NativeType::Int32,
        NativeType::Int64,
        NativeType::UInt8,
        NativeType::UInt16,
        NativeType::UInt32,
        NativeType::UInt64,
        NativeType::Float32,
        NativeType::Float64,
        NativeType::Bool,
        NativeType::String,
        NativeType::Bytes,
        NativeType::TinyText,
        NativeType::Text,
        NativeType::MediumText,
        NativeType::LongText,
        NativeType::TinyBlob,
        NativeType::Blob,
        NativeType::MediumBlob,
        NativeType::LongBlob,
        NativeType::Time,
        NativeType::DateTime,
        NativeType::Date,
        NativeType::Json,
        NativeType::Geometry,
    ];

    /// Returns the canonical lowercase name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            NativeType::Int8 => "int8",
            NativeType::Int16 => "int16",
            NativeType::Int32 => "int32",
            NativeType::Int64 => "int64",
            NativeType::UInt8 => "uint8",
            NativeType::UInt16 => "uint16",
            NativeType::UInt32 => "uint32",
            NativeType::UInt64 => "uint64",
            NativeType::Float32 => "float32",
            NativeType::Float64 => "float64",
            NativeType::Bool => "bool",
            NativeType::String => "string",
            NativeType::Bytes => "bytes",
            NativeType::TinyText => "tinytext",
            NativeType::Text => "text",
            NativeType::MediumText => "mediumtext",
            NativeType::LongText => "longtext",
            NativeType::TinyBlob => "tinyblob",
            NativeType::Blob => "blob",
            NativeType::MediumBlob => "mediumblob",
            NativeType::LongBlob => "longblob",
            NativeType::Time => "time",
            NativeType::DateTime => "datetime",
            NativeType::Date => "date",
            NativeType::Json => "json",
            NativeType::Geometry => "geometry",
        }
    }

    fn from_alias(name: &str) -> Option<Self> {
        let native = match name {
            "i8" | "int8" => NativeType::Int8,
            "i16" | "int16" => NativeType::Int16,
            "i32" | "int32" => NativeType::Int32,
            "i64" | "int64" | "isize" => NativeType::Int64,
            "u8" | "uint8" => NativeType::UInt8,
            "u16" | "uint16" => NativeType::UInt16,
            "u32" | "uint32" => NativeType::UInt32,
            "u64" | "uint64" | "usize" => NativeType::UInt64,
            "f32" | "float32" => NativeType::Float32,
            "f64" | "float64" => NativeType::Float64,
            "bool" => NativeType::Bool,
            "String" | "string" | "str" | "&str" | "&'static str" => NativeType::String,
            "Vec<u8>" | "[u8]" | "&[u8]" | "bytes" => NativeType::Bytes,
            "tinytext" => NativeType::TinyText,
            "text" => NativeType::Text,
            "mediumtext" => NativeType::MediumText,
            "longtext" => NativeType::LongText,
            "tinyblob" => NativeType::TinyBlob,
            "blob" => NativeType::Blob,
            "mediumblob" => NativeType::MediumBlob,
            "longblob" => NativeType::LongBlob,
            "time" | "NaiveTime" | "Time" => NativeType::Time,
            "datetime" | "NaiveDateTime" | "SystemTime" | "OffsetDateTime" | "PrimitiveDateTime" => {
                NativeType::DateTime
            }
            "date" | "NaiveDate" | "Date" => NativeType::Date,
            "json" | "Value" | "JsonValue" | "RawValue" => NativeType::Json,
            "geometry" => NativeType::Geometry,
            other if other.starts_with("DateTime<") => NativeType::DateTime,
            _ => return None,
        };
        Some(native)
    }
}

/// Strip `Option<...>` wrappers; nullability comes from the `null` tag, not the type.
fn unwrap_option(mut name: &str) -> &str {
    while let Some(inner) = name
        .strip_prefix("Option<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        name = inner.trim();
    }
    name
}

/// Drop the module path of the outermost type (`chrono::NaiveDate` -> `NaiveDate`).
fn strip_path(name: &str) -> &str {
    let head_end = name.find('<').unwrap_or(name.len());
    match name[..head_end].rfind("::") {
        Some(pos) => &name[pos + 2..],
        None => name,
    }
}

impl FromStr for NativeType {
    type Err = DdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = unwrap_option(s.trim());
        NativeType::from_alias(name)
            .or_else(|| NativeType::from_alias(strip_path(name)))
            .or_else(|| NativeType::from_alias(strip_path(unwrap_option(strip_path(name)))))
            .ok_or_else(|| DdlError::InvalidType {
                type_name: s.to_string(),
            })
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
