//! Errors raised when a token stream does not look like valid source

use thiserror::Error;

/// The stream violates an assumption that only holds for well-formed PHP
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("class-like declaration at token {class_index} has no body")]
    MissingClassBody { class_index: usize },

    #[error("class body opened at token {open_index} is never closed")]
    UnclosedClassBody { open_index: usize },

    #[error("property at token {property_index} has no terminating `;`")]
    MissingTerminator { property_index: usize },
}
