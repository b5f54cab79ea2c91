//! Enumerates property declarations of a class-like body
//!
//! Properties are the variables that sit directly in the class body:
//! brace depth 1 relative to the body and outside any parentheses, so
//! method parameters, promoted constructor properties and method bodies
//! are excluded.

use crate::error::StructureError;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

/// A property variable found in a class body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDeclaration {
    /// Index of the variable token in the stream it was scanned from
    pub position: usize,
    pub token: Token,
    /// Index of the first variable of the same declaration statement, so
    /// `$b` in `public $a, $b;` points at `$a`
    pub declaration_start: usize,
    /// Declared with the `readonly` modifier
    pub readonly: bool,
}

pub struct ClassMemberScanner;

impl ClassMemberScanner {
    /// Property declarations of the class opened at `class_index`, in source order
    pub fn properties_of(
        stream: &TokenStream,
        class_index: usize,
    ) -> Result<Vec<PropertyDeclaration>, StructureError> {
        let (open, close) = Self::body_range(stream, class_index)?;
        let readonly_class = Self::is_readonly_class(stream, class_index);

        let mut properties = Vec::new();
        let mut brace_depth = 0usize;
        let mut paren_depth = 0usize;
        let mut statement_start = open + 1;
        let mut first_variable: Option<usize> = None;

        for index in open + 1..close {
            let token = &stream[index];
            match token.kind() {
                TokenKind::OpenBrace => brace_depth += 1,
                TokenKind::CloseBrace => {
                    brace_depth = brace_depth.saturating_sub(1);
                    if brace_depth == 0 {
                        statement_start = index + 1;
                        first_variable = None;
                    }
                }
                _ if token.is_opening() => paren_depth += 1,
                _ if token.is_closing() => paren_depth = paren_depth.saturating_sub(1),
                TokenKind::Semicolon if brace_depth == 0 && paren_depth == 0 => {
                    statement_start = index + 1;
                    first_variable = None;
                }
                TokenKind::Variable if brace_depth == 0 && paren_depth == 0 => {
                    let readonly = readonly_class
                        || (statement_start..index).any(|i| stream[i].kind() == TokenKind::Readonly);
                    let declaration_start = *first_variable.get_or_insert(index);
                    properties.push(PropertyDeclaration {
                        position: index,
                        token: token.clone(),
                        declaration_start,
                        readonly,
                    });
                }
                _ => {}
            }
        }

        Ok(properties)
    }

    /// Whether the classy keyword at `index` starts a declaration: a name
    /// follows it, or for `class` also the `(` or `{` of an anonymous class
    pub fn opens_class(stream: &TokenStream, index: usize) -> bool {
        let keyword = &stream[index];
        if !keyword.is_classy() {
            return false;
        }

        let mut cursor = index;
        let next = loop {
            match stream.next_non_whitespace(cursor) {
                Some(next) if stream[next].is_comment() => cursor = next,
                Some(next) => break &stream[next],
                None => return false,
            }
        };

        match keyword.kind() {
            TokenKind::Class => {
                next.is_kind(&[TokenKind::Identifier, TokenKind::OpenParen, TokenKind::OpenBrace])
            }
            _ => next.kind() == TokenKind::Identifier,
        }
    }

    /// `readonly class`, possibly mixed with `final`/`abstract`
    fn is_readonly_class(stream: &TokenStream, class_index: usize) -> bool {
        let mut cursor = class_index;
        while let Some(prev) = stream.prev_non_whitespace(cursor) {
            let token = &stream[prev];
            match token.kind() {
                TokenKind::Readonly => return true,
                TokenKind::Identifier
                    if matches!(token.text().to_ascii_lowercase().as_str(), "final" | "abstract") =>
                {
                    cursor = prev;
                }
                _ => return false,
            }
        }
        false
    }

    /// Indices of the `{` and matching `}` of the class body
    pub fn body_range(
        stream: &TokenStream,
        class_index: usize,
    ) -> Result<(usize, usize), StructureError> {
        let open = stream
            .next_of_kind(class_index, &[TokenKind::OpenBrace])
            .ok_or(StructureError::MissingClassBody { class_index })?;

        let mut depth = 0usize;
        for index in open..stream.len() {
            match stream[index].kind() {
                TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok((open, index));
                    }
                }
                _ => {}
            }
        }

        Err(StructureError::UnclosedClassBody { open_index: open })
    }
}
