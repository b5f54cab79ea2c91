//! `@var` extraction from doc comments
//!
//! Best-effort: only the first `@var` tag of a comment is read, and a
//! comment that does not parse simply yields `None`.

use std::sync::OnceLock;

use regex::Regex;

/// A parsed doc tag with its declared types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocAnnotation {
    /// Tag name without the `@`
    pub name: String,
    /// Union members in declaration order
    pub types: Vec<String>,
}

impl DocAnnotation {
    /// The first type of the union
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    pub fn is_array_type(&self) -> bool {
        self.primary_type().is_some_and(is_array_type)
    }
}

/// Parse the first `@var` tag of a comment.
///
/// Handles `/** @var string[] */`, multi-line blocks, unions such as
/// `int[]|null` and generics like `array<int, string>`. A variable name
/// after the type is ignored.
pub fn parse_var_annotation(comment: &str) -> Option<DocAnnotation> {
    static VAR_TAG: OnceLock<Regex> = OnceLock::new();
    let regex = VAR_TAG.get_or_init(|| Regex::new(r"@var[ \t]+([^\r\n]*)").unwrap());

    let rest = regex.captures(comment)?.get(1)?.as_str();
    let expression = type_expression(rest);

    let types: Vec<String> = split_union(expression)
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect();

    match types.first() {
        Some(first) if !first.starts_with('$') => Some(DocAnnotation {
            name: "var".to_string(),
            types,
        }),
        _ => None,
    }
}

/// Whether a doc type denotes a list/array: `string[]`, `?Foo[]`, `int[][]`
pub fn is_array_type(doc_type: &str) -> bool {
    doc_type.contains("[]")
}

/// The leading type expression of a tag body, up to the first whitespace
/// or `*` outside of `<>`, `()`, `{}` and `[]`
fn type_expression(text: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth = depth.saturating_sub(1),
            '*' if depth == 0 => return &text[..i],
            c if c.is_whitespace() && depth == 0 => return &text[..i],
            _ => {}
        }
    }
    text
}

fn split_union(expression: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in expression.char_indices() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                parts.push(&expression[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&expression[start..]);

    parts
}
