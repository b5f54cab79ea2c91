//! PHP tokenizer
//!
//! Lossless: concatenating the text of every produced token yields the
//! input unchanged. Unterminated comments and strings run to the end of
//! the input instead of failing.

use crate::token::{Token, TokenKind};

/// Operators longer than one byte, longest first
const MULTI_CHAR_OPERATORS: &[&str] = &[
    "**=", "...", "<=>", "===", "!==", "??=", "?->", "<<=", ">>=",
    "->", "=>", "==", "!=", "<>", "<=", ">=", "&&", "||", "??", "++", "--",
    "+=", "-=", "*=", "/=", ".=", "%=", "&=", "|=", "^=", "<<", ">>", "**",
];

/// Keywords after which `[` opens an array literal rather than an offset
const ARRAY_PREFIX_KEYWORDS: &[&str] = &[
    "return", "yield", "echo", "print", "case", "else", "throw", "include",
    "include_once", "require", "require_once", "as", "and", "or", "xor", "in",
];

/// Tokenize PHP source into a flat token list
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    position: usize,
    in_php: bool,
    tokens: Vec<Token>,
    /// Open `[`/`#[` kinds, so `]` can be matched to its opener
    brackets: Vec<TokenKind>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            position: 0,
            in_php: false,
            tokens: Vec::new(),
            brackets: Vec::new(),
        }
    }

    fn tokenize(mut self) -> Vec<Token> {
        while self.position < self.bytes.len() {
            if self.in_php {
                self.next_php_token();
            } else {
                self.next_inline_html();
            }
        }
        self.tokens
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.position + offset).copied()
    }

    fn emit(&mut self, kind: TokenKind, end: usize) {
        let text = &self.input[self.position..end];
        self.tokens.push(Token::new(kind, text));
        self.position = end;
    }

    /// Last token that is neither whitespace nor a comment
    fn previous_significant(&self) -> Option<&Token> {
        self.tokens
            .iter()
            .rev()
            .find(|t| !t.is_whitespace() && !t.is_comment())
    }

    fn next_inline_html(&mut self) {
        let rest = self.rest();
        match rest.find("<?") {
            Some(0) => {
                let len = if rest.len() >= 5 && rest.as_bytes()[..5].eq_ignore_ascii_case(b"<?php") {
                    5
                } else if rest.starts_with("<?=") {
                    3
                } else {
                    2
                };
                self.emit(TokenKind::OpenTag, self.position + len);
                self.in_php = true;
            }
            Some(offset) => self.emit(TokenKind::InlineHtml, self.position + offset),
            None => self.emit(TokenKind::InlineHtml, self.bytes.len()),
        }
    }

    fn next_php_token(&mut self) {
        let rest = self.rest();
        let start = self.position;
        let first = self.bytes[start];

        if rest.starts_with("?>") {
            self.emit(TokenKind::CloseTag, start + 2);
            self.in_php = false;
            return;
        }

        if first.is_ascii_whitespace() {
            let len = rest
                .bytes()
                .take_while(|b| b.is_ascii_whitespace())
                .count();
            self.emit(TokenKind::Whitespace, start + len);
            return;
        }

        if rest.starts_with("#[") {
            self.brackets.push(TokenKind::AttributeOpen);
            self.emit(TokenKind::AttributeOpen, start + 2);
            return;
        }

        if first == b'#' || rest.starts_with("//") {
            let end = self.line_comment_end();
            self.emit(TokenKind::Comment, end);
            return;
        }

        if rest.starts_with("/*") {
            let end = rest[2..]
                .find("*/")
                .map(|i| start + 2 + i + 2)
                .unwrap_or(self.bytes.len());
            self.emit(TokenKind::Comment, end);
            return;
        }

        if first == b'$' && self.peek_byte(1).is_some_and(is_name_start) {
            let end = self.name_end(start + 1);
            self.emit(TokenKind::Variable, end);
            return;
        }

        if is_name_start(first) || first == b'\\' {
            self.name_token();
            return;
        }

        if first.is_ascii_digit()
            || (first == b'.' && self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()))
        {
            let len = rest
                .bytes()
                .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'.')
                .count();
            self.emit(TokenKind::Number, start + len);
            return;
        }

        if rest.starts_with("<<<") {
            let end = self.heredoc_end();
            self.emit(TokenKind::StringLiteral, end);
            return;
        }

        match first {
            b'\'' => {
                let end = self.quoted_end(start, b'\'');
                self.emit(TokenKind::StringLiteral, end);
            }
            b'"' | b'`' => {
                let end = self.interpolated_end(start, first);
                self.emit(TokenKind::StringLiteral, end);
            }
            b';' => self.emit(TokenKind::Semicolon, start + 1),
            b',' => self.emit(TokenKind::Comma, start + 1),
            b'{' => self.emit(TokenKind::OpenBrace, start + 1),
            b'}' => self.emit(TokenKind::CloseBrace, start + 1),
            b'(' => self.emit(TokenKind::OpenParen, start + 1),
            b')' => self.emit(TokenKind::CloseParen, start + 1),
            b'[' => {
                let kind = if self.opens_offset_access() {
                    TokenKind::IndexOpen
                } else {
                    TokenKind::ArrayOpen
                };
                self.brackets.push(kind);
                self.emit(kind, start + 1);
            }
            b']' => {
                let kind = match self.brackets.pop() {
                    Some(TokenKind::ArrayOpen) => TokenKind::ArrayClose,
                    Some(TokenKind::AttributeOpen) => TokenKind::AttributeClose,
                    _ => TokenKind::IndexClose,
                };
                self.emit(kind, start + 1);
            }
            b':' if self.peek_byte(1) == Some(b':') => {
                self.emit(TokenKind::DoubleColon, start + 2);
            }
            _ => {
                if let Some(op) = MULTI_CHAR_OPERATORS.iter().find(|op| rest.starts_with(**op)) {
                    self.emit(TokenKind::Operator, start + op.len());
                } else if first == b'=' {
                    self.emit(TokenKind::Equals, start + 1);
                } else {
                    let len = rest.chars().next().map(char::len_utf8).unwrap_or(1);
                    self.emit(TokenKind::Operator, start + len);
                }
            }
        }
    }

    fn line_comment_end(&self) -> usize {
        let rest = self.rest();
        let newline = rest.find('\n').unwrap_or(rest.len());
        let close_tag = rest.find("?>").unwrap_or(rest.len());
        self.position + newline.min(close_tag)
    }

    fn name_end(&self, from: usize) -> usize {
        let mut end = from;
        while end < self.bytes.len() && is_name_char(self.bytes[end]) {
            end += 1;
        }
        end
    }

    fn name_token(&mut self) {
        let start = self.position;
        let mut end = start;
        while end < self.bytes.len() && (is_name_char(self.bytes[end]) || self.bytes[end] == b'\\') {
            end += 1;
        }
        let word = self.input[start..end].to_ascii_lowercase();

        // `Foo::class`, `$obj->class`, `function class()` and the named
        // argument `f(class: 'x')` use keywords as plain names
        let member_name = self.previous_significant().is_some_and(|t| {
            t.kind() == TokenKind::DoubleColon
                || t.kind() == TokenKind::Function
                || (t.kind() == TokenKind::Operator && matches!(t.text(), "->" | "?->"))
        });

        let kind = if member_name || self.followed_by_named_argument_colon(end) {
            TokenKind::Identifier
        } else {
            match word.as_str() {
                "class" => TokenKind::Class,
                "interface" => TokenKind::Interface,
                "trait" => TokenKind::Trait,
                "enum" if self.followed_by_name(end) => TokenKind::Enum,
                "function" => TokenKind::Function,
                "readonly" => TokenKind::Readonly,
                _ => TokenKind::Identifier,
            }
        };
        self.emit(kind, end);
    }

    /// A single `:` (not `::`) follows `from`, possibly after whitespace
    fn followed_by_named_argument_colon(&self, from: usize) -> bool {
        let after = &self.bytes[from..];
        let spaces = after.iter().take_while(|b| b.is_ascii_whitespace()).count();
        after.get(spaces) == Some(&b':') && after.get(spaces + 1) != Some(&b':')
    }

    /// Whether whitespace and then a name follow `from`, as in `enum Suit`
    fn followed_by_name(&self, from: usize) -> bool {
        let after = &self.bytes[from..];
        let spaces = after.iter().take_while(|b| b.is_ascii_whitespace()).count();
        if spaces == 0 {
            return false;
        }
        let name_start = from + spaces;
        if !self.bytes.get(name_start).copied().is_some_and(is_name_start) {
            return false;
        }
        let word = self.input[name_start..self.name_end(name_start)].to_ascii_lowercase();
        word != "extends" && word != "implements"
    }

    fn opens_offset_access(&self) -> bool {
        match self.previous_significant() {
            Some(t) => match t.kind() {
                TokenKind::Variable
                | TokenKind::CloseParen
                | TokenKind::IndexClose
                | TokenKind::CloseBrace
                | TokenKind::StringLiteral => true,
                TokenKind::Identifier => {
                    let word = t.text().to_ascii_lowercase();
                    !ARRAY_PREFIX_KEYWORDS.contains(&word.as_str())
                }
                _ => false,
            },
            None => false,
        }
    }

    /// End of a string delimited by `quote` starting at `from`, honouring escapes
    fn quoted_end(&self, from: usize, quote: u8) -> usize {
        let mut i = from + 1;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b if b == quote => return i + 1,
                _ => i += 1,
            }
        }
        self.bytes.len()
    }

    /// Like `quoted_end`, but skips over `{$...}` interpolations which may
    /// themselves contain quoted strings
    fn interpolated_end(&self, from: usize, quote: u8) -> usize {
        let mut i = from + 1;
        let mut depth = 0usize;
        while i < self.bytes.len() {
            let b = self.bytes[i];
            if depth > 0 {
                match b {
                    b'{' => depth += 1,
                    b'}' => depth -= 1,
                    b'\'' | b'"' => {
                        i = self.quoted_end(i, b);
                        continue;
                    }
                    _ => {}
                }
                i += 1;
                continue;
            }
            match b {
                b'\\' => i += 2,
                b'{' if self.bytes.get(i + 1) == Some(&b'$') => {
                    depth = 1;
                    i += 2;
                }
                b if b == quote => return i + 1,
                _ => i += 1,
            }
        }
        self.bytes.len()
    }

    fn heredoc_end(&self) -> usize {
        let rest = self.rest();
        let header_end = match rest.find('\n') {
            Some(i) => i,
            None => return self.bytes.len(),
        };
        let label: String = rest[3..header_end]
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string();
        if label.is_empty() {
            return self.position + header_end;
        }

        let mut offset = header_end + 1;
        for line in rest[header_end + 1..].split_inclusive('\n') {
            let trimmed = line.trim_start();
            if let Some(after) = trimmed.strip_prefix(label.as_str()) {
                if !after.bytes().next().is_some_and(is_name_char) {
                    let indent = line.len() - trimmed.len();
                    return self.position + offset + indent + label.len();
                }
            }
            offset += line.len();
        }
        self.bytes.len()
    }
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || b.is_ascii_digit()
}
