//! Mutable token stream
//!
//! Positions are zero-based indices into the stream. An insertion at
//! `position` shifts every index `>= position` by the number of inserted
//! tokens, so indices captured before a mutation must be re-resolved (or
//! shifted by the displacement `insert_at` returns) before being used again.

use std::fmt;
use std::ops::Index;

use crate::token::{Token, TokenKind};
use crate::tokenizer::tokenize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Tokenize PHP source into a stream
    pub fn from_source(source: &str) -> Self {
        Self::new(tokenize(source))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// True iff at least one token of every requested kind is present
    pub fn is_all_kinds_found(&self, kinds: &[TokenKind]) -> bool {
        kinds
            .iter()
            .all(|kind| self.tokens.iter().any(|t| t.kind() == *kind))
    }

    /// Number of tokens whose kind is one of `kinds`
    pub fn count_of_kind(&self, kinds: &[TokenKind]) -> usize {
        self.tokens.iter().filter(|t| t.is_kind(kinds)).count()
    }

    /// Nearest index after `from` holding a token of one of `kinds`
    pub fn next_of_kind(&self, from: usize, kinds: &[TokenKind]) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(from + 1)
            .find(|(_, t)| t.is_kind(kinds))
            .map(|(i, _)| i)
    }

    /// Nearest index before `from` that is not whitespace
    pub fn prev_non_whitespace(&self, from: usize) -> Option<usize> {
        let end = from.min(self.tokens.len());
        self.tokens[..end].iter().rposition(|t| !t.is_whitespace())
    }

    /// Nearest index after `from` that is not whitespace
    pub fn next_non_whitespace(&self, from: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(from + 1)
            .find(|(_, t)| !t.is_whitespace())
            .map(|(i, _)| i)
    }

    /// Splice `tokens` in before `position` (clamped to the stream end).
    ///
    /// Returns the displacement applied to every index `>= position`.
    pub fn insert_at(&mut self, position: usize, tokens: Vec<Token>) -> usize {
        let position = position.min(self.tokens.len());
        let displacement = tokens.len();
        let tail = self.tokens.split_off(position);
        self.tokens.extend(tokens);
        self.tokens.extend(tail);
        displacement
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

/// Renders the stream back to source text
impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(token.text())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> TokenStream {
        TokenStream::from_source("<?php class A { public $p; }")
    }

    #[test]
    fn test_is_all_kinds_found() {
        let s = stream();
        assert!(s.is_all_kinds_found(&[TokenKind::Class, TokenKind::Variable]));
        assert!(!s.is_all_kinds_found(&[TokenKind::Variable, TokenKind::Comment]));
        assert!(s.is_all_kinds_found(&[]));
    }

    #[test]
    fn test_next_of_kind() {
        let s = stream();
        let var = s.next_of_kind(0, &[TokenKind::Variable]).unwrap();
        assert_eq!(s[var].text(), "$p");
        let semi = s.next_of_kind(var, &[TokenKind::Semicolon]).unwrap();
        assert_eq!(semi, var + 1);
        assert_eq!(s.next_of_kind(semi, &[TokenKind::Semicolon]), None);
    }

    #[test]
    fn test_next_of_kind_is_exclusive() {
        let s = stream();
        let var = s.next_of_kind(0, &[TokenKind::Variable]).unwrap();
        assert_eq!(s.next_of_kind(var, &[TokenKind::Variable]), None);
    }

    #[test]
    fn test_prev_non_whitespace() {
        let s = stream();
        let var = s.next_of_kind(0, &[TokenKind::Variable]).unwrap();
        let prev = s.prev_non_whitespace(var).unwrap();
        assert_eq!(s[prev].text(), "public");
        assert_eq!(s.prev_non_whitespace(0), None);
    }

    #[test]
    fn test_next_non_whitespace() {
        let s = stream();
        let class = s.next_of_kind(0, &[TokenKind::Class]).unwrap();
        let next = s.next_non_whitespace(class).unwrap();
        assert_eq!(s[next].text(), "A");
        assert_eq!(next, class + 2);
        assert_eq!(s.next_non_whitespace(s.len() - 1), None);
    }

    #[test]
    fn test_insert_at_shifts_indices() {
        let mut s = stream();
        let var = s.next_of_kind(0, &[TokenKind::Variable]).unwrap();
        let semi = s.next_of_kind(var, &[TokenKind::Semicolon]).unwrap();

        let shift = s.insert_at(
            semi,
            vec![
                Token::whitespace(" "),
                Token::new(TokenKind::Equals, "="),
                Token::whitespace(" "),
                Token::new(TokenKind::Number, "1"),
            ],
        );

        assert_eq!(shift, 4);
        assert_eq!(s[semi + shift].kind(), TokenKind::Semicolon);
        assert_eq!(s.to_string(), "<?php class A { public $p = 1; }");
    }

    #[test]
    fn test_count_of_kind() {
        let s = TokenStream::from_source("<?php $a = $b; $c;");
        assert_eq!(s.count_of_kind(&[TokenKind::Variable]), 3);
        assert_eq!(s.count_of_kind(&[TokenKind::Semicolon, TokenKind::Equals]), 3);
    }
}
