//! A small text-template language.
//!
//! Templates are plain text with actions between `{{` and `}}`:
//!
//! | Action | Meaning |
//! |--------|---------|
//! | `{{ name }}` | print the value at `name` |
//! | `{{ dialect.engine }}` | print a nested value |
//! | `{{ range columns }}...{{ end }}` | evaluate the body once per list item |
//!
//! A `-` right after `{{` trims the whitespace before the action; a `-`
//! right before `}}` trims the whitespace after it.
//!
//! Parsing and execution are separate: a template that parses can still
//! fail at execution when the data does not have the shape it expects.

use crate::error::DdlError;

/// A value produced by a [`Context`] lookup.
pub enum Value<'a> {
    Text(String),
    Object(Box<dyn Context + 'a>),
    List(Vec<Box<dyn Context + 'a>>),
    /// Present but empty, e.g. a table without a primary key.
    Nil,
}

impl<'a> Value<'a> {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Object(_) => "object",
            Value::List(_) => "list",
            Value::Nil => "nil",
        }
    }
}

/// Data a template is executed against.
pub trait Context {
    /// Value stored under `key`, or `None` if there is no such key.
    fn get(&self, key: &str) -> Option<Value<'_>>;
}

impl<T: Context + ?Sized> Context for &T {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        (**self).get(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Print {
        path: Vec<String>,
        line: usize,
    },
    Range {
        path: Vec<String>,
        line: usize,
        body: Vec<Node>,
    },
}

enum Token {
    Text(String),
    Action { words: Vec<String>, line: usize },
}

/// A parsed template.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse `source`; `name` is used in error messages.
    pub fn parse(name: &str, source: &str) -> Result<Self, DdlError> {
        let parse_error = |line: usize, message: String| DdlError::TemplateParse {
            template: name.to_string(),
            line,
            message,
        };

        let tokens = tokenize(source).map_err(|(line, message)| parse_error(line, message))?;
        let mut tokens = tokens.into_iter();
        let (nodes, terminator) =
            parse_nodes(&mut tokens).map_err(|(line, message)| parse_error(line, message))?;
        if let Some(line) = terminator {
            return Err(parse_error(line, "unexpected {{end}}".to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            nodes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the template against `context`.
    pub fn render(&self, context: &dyn Context) -> Result<String, DdlError> {
        let mut out = String::new();
        render_nodes(&self.nodes, context, &mut out).map_err(|message| {
            DdlError::TemplateExecute {
                template: self.name.clone(),
                message,
            }
        })?;
        Ok(out)
    }
}

fn line_at(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

fn tokenize(source: &str) -> Result<Vec<Token>, (usize, String)> {
    let mut tokens = Vec::new();
    let mut rest_start = 0;
    let mut trim_next = false;

    while let Some(found) = source[rest_start..].find("{{") {
        let open = rest_start + found;
        let line = line_at(source, open);

        let mut text = &source[rest_start..open];
        if trim_next {
            text = text.trim_start();
        }

        let inner_start = open + 2;
        let close = source[inner_start..]
            .find("}}")
            .map(|pos| inner_start + pos)
            .ok_or_else(|| (line, "unclosed action".to_string()))?;

        let mut inner = &source[inner_start..close];
        if let Some(stripped) = inner.strip_prefix('-') {
            text = text.trim_end();
            inner = stripped;
        }
        trim_next = false;
        if let Some(stripped) = inner.strip_suffix('-') {
            trim_next = true;
            inner = stripped;
        }

        if !text.is_empty() {
            tokens.push(Token::Text(text.to_string()));
        }

        let words: Vec<String> = inner.split_whitespace().map(str::to_string).collect();
        if words.is_empty() {
            return Err((line, "empty action".to_string()));
        }
        tokens.push(Token::Action { words, line });
        rest_start = close + 2;
    }

    let mut tail = &source[rest_start..];
    if trim_next {
        tail = tail.trim_start();
    }
    if !tail.is_empty() {
        tokens.push(Token::Text(tail.to_string()));
    }
    Ok(tokens)
}

fn parse_path(word: &str, line: usize) -> Result<Vec<String>, (usize, String)> {
    let valid = |segment: &str| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    let segments: Vec<&str> = word.split('.').collect();
    if segments.iter().all(|s| valid(s)) {
        Ok(segments.into_iter().map(str::to_string).collect())
    } else {
        Err((line, format!("bad path {:?} in action", word)))
    }
}

/// Parse until the tokens run out or an `end` is met.
///
/// Returns the nodes and, when stopped by `end`, the line of that `end`.
fn parse_nodes(
    tokens: &mut impl Iterator<Item = Token>,
) -> Result<(Vec<Node>, Option<usize>), (usize, String)> {
    let mut nodes = Vec::new();

    while let Some(token) = tokens.next() {
        let (words, line) = match token {
            Token::Text(text) => {
                nodes.push(Node::Text(text));
                continue;
            }
            Token::Action { words, line } => (words, line),
        };

        match words.as_slice() {
            [keyword] if keyword == "end" => return Ok((nodes, Some(line))),
            [keyword, path] if keyword == "range" => {
                let path = parse_path(path, line)?;
                let (body, terminator) = parse_nodes(tokens)?;
                if terminator.is_none() {
                    return Err((line, "unexpected EOF: range has no matching {{end}}".to_string()));
                }
                nodes.push(Node::Range { path, line, body });
            }
            [keyword, ..] if keyword == "range" => {
                return Err((line, "range expects exactly one path".to_string()));
            }
            [path] => nodes.push(Node::Print {
                path: parse_path(path, line)?,
                line,
            }),
            [first, second, ..] => {
                return Err((line, format!("unexpected {:?} after {:?} in action", second, first)));
            }
            [] => return Err((line, "empty action".to_string())),
        }
    }

    Ok((nodes, None))
}

type Visit<'v> = dyn FnMut(Value<'_>) -> Result<(), String> + 'v;

/// Resolve `path` in `context` and hand the value to `visit`.
fn lookup(context: &dyn Context, path: &[String], visit: &mut Visit<'_>) -> Result<(), String> {
    let Some((first, rest)) = path.split_first() else {
        return Err("empty path".to_string());
    };
    let value = context
        .get(first)
        .ok_or_else(|| format!("can't evaluate field {}", first))?;
    if rest.is_empty() {
        return visit(value);
    }
    match value {
        Value::Object(inner) => lookup(&*inner, rest, visit),
        other => Err(format!("{} is {}, not an object", first, other.kind())),
    }
}

fn render_nodes(nodes: &[Node], context: &dyn Context, out: &mut String) -> Result<(), String> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Print { path, line } => {
                lookup(context, path, &mut |value| match value {
                    Value::Text(text) => {
                        out.push_str(&text);
                        Ok(())
                    }
                    Value::Nil => Err(format!("line {}: {} has no value", line, path.join("."))),
                    other => Err(format!(
                        "line {}: can't print {}: {} is not text",
                        line,
                        path.join("."),
                        other.kind()
                    )),
                })?;
            }
            Node::Range { path, line, body } => {
                lookup(context, path, &mut |value| match value {
                    Value::List(items) => items
                        .iter()
                        .try_for_each(|item| render_nodes(body, &**item, out)),
                    Value::Nil => Ok(()),
                    other => Err(format!(
                        "line {}: range can't iterate over {} ({})",
                        line,
                        path.join("."),
                        other.kind()
                    )),
                })?;
            }
        }
    }
    Ok(())
}
