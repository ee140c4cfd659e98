//! Identifier quoting for SQL dialects.

/// Quote an identifier with `quote_char`, doubling any embedded quote characters.
///
/// # Arguments
/// * `s` - The identifier to quote
/// * `quote_char` - The quote character ('`' for MySQL/SQLite, '"' for ANSI)
pub fn quote_identifier(s: &str, quote_char: char) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push(quote_char);
    for c in s.chars() {
        if c == quote_char {
            result.push(c);
        }
        result.push(c);
    }
    result.push(quote_char);
    result
}

/// Quote an identifier with backticks.
#[inline]
pub fn quote_backtick(s: &str) -> String {
    quote_identifier(s, '`')
}

/// Quote every column and join them with `, `.
pub fn quoted_list<F>(columns: &[String], quote: F) -> String
where
    F: Fn(&str) -> String,
{
    columns
        .iter()
        .map(|c| quote(c.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_quote_backtick_basic() {
        assert_eq!(quote_backtick("created_at"), "`created_at`");
    }

    #[rstest]
    fn test_quote_backtick_with_embedded_backtick() {
        assert_eq!(quote_backtick("we`ird"), "`we``ird`");
    }

    #[rstest]
    fn test_quote_double() {
        assert_eq!(quote_identifier(r#"say "hi""#, '"'), r#""say ""hi""""#);
    }

    #[rstest]
    fn test_quoted_list() {
        let columns = vec!["player_id".to_string(), "entry_id".to_string()];
        assert_eq!(quoted_list(&columns, quote_backtick), "`player_id`, `entry_id`");
    }
}
