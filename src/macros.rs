//! Declarative helpers for implementing `Record`.

/// Build a `Vec<FieldDescriptor>` from `Name: "type" => "tag"` entries.
///
/// The tag is optional.
///
/// ```
/// use ddl_maker::fields;
///
/// let fields = fields![
///     ID: "u64" => "auto",
///     Name: "String" => "size=40",
///     CreatedAt: "chrono::NaiveDateTime",
/// ];
/// assert_eq!(fields.len(), 3);
/// assert_eq!(fields[2].annotation, "");
/// ```
#[macro_export]
macro_rules! fields {
    (@tag) => { "" };
    (@tag $tag:expr) => { $tag };
    ($($name:ident : $ty:expr $(=> $tag:expr)?),* $(,)?) => {
        vec![
            $(
                $crate::schema::FieldDescriptor::new(
                    stringify!($name),
                    $ty,
                    $crate::fields!(@tag $($tag)?),
                )
            ),*
        ]
    };
}
