//! PHP tokens

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Text outside of `<?php ... ?>`
    InlineHtml,
    /// `<?php`, `<?=` or `<?`
    OpenTag,
    /// `?>`
    CloseTag,
    Whitespace,
    /// `//`, `#`, `/* */` and `/** */` comments
    Comment,
    /// `$name`
    Variable,
    /// `class` keyword opening a class declaration
    Class,
    Interface,
    Trait,
    Enum,
    Function,
    Readonly,
    /// Names and keywords without a dedicated kind
    Identifier,
    Number,
    /// Quoted strings, heredoc and nowdoc
    StringLiteral,
    /// `=`
    Equals,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `[` opening an array literal
    ArrayOpen,
    /// `]` closing an array literal
    ArrayClose,
    /// `[` of an offset access
    IndexOpen,
    /// `]` of an offset access
    IndexClose,
    /// `#[`
    AttributeOpen,
    /// `]` closing an attribute group
    AttributeClose,
    /// `::`
    DoubleColon,
    /// Any other operator or punctuation
    Operator,
}

/// A single lexical unit: a kind tag and the exact source text it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn whitespace(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Whitespace, text)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_kind(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }

    /// `/** ... */`, but not the empty block comment `/**/`
    pub fn is_doc_comment(&self) -> bool {
        self.is_comment() && self.text.starts_with("/**") && self.text != "/**/"
    }

    /// Class-like declarations that can hold members
    pub fn is_classy(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Class | TokenKind::Interface | TokenKind::Trait | TokenKind::Enum
        )
    }

    /// Tokens that open a nesting level: `{`, `(`, `[` and `#[`
    pub fn is_opening(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::OpenBrace
                | TokenKind::OpenParen
                | TokenKind::ArrayOpen
                | TokenKind::IndexOpen
                | TokenKind::AttributeOpen
        )
    }

    pub fn is_closing(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::CloseBrace
                | TokenKind::CloseParen
                | TokenKind::ArrayClose
                | TokenKind::IndexClose
                | TokenKind::AttributeClose
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
