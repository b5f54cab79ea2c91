//! propfix-core: token-level abstractions for PHP source rewriting
//!
//! This crate provides:
//! - `Token` / `TokenKind`: immutable lexical units
//! - `tokenize()`: lossless PHP tokenizer
//! - `TokenStream`: ordered, mutable token sequence with kind-based queries
//! - `ClassMemberScanner`: enumerates property declarations of a class body

mod class_scanner;
mod error;
mod stream;
mod token;
mod tokenizer;

pub use class_scanner::{ClassMemberScanner, PropertyDeclaration};
pub use error::StructureError;
pub use stream::TokenStream;
pub use token::{Token, TokenKind};
pub use tokenizer::tokenize;
