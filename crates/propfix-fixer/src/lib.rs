//! propfix-fixer: token-stream fixers for PHP class properties
//!
//! The main rule, `ArrayPropertyDefaultValueFixer`, finds properties whose
//! doc comment declares an array type (`@var string[]`) but which have no
//! default value, and inserts `= []` before the end of the declaration.
//!
//! # Example
//!
//! ```
//! use propfix_fixer::{fix_source, ArrayPropertyDefaultValueFixer};
//!
//! let source = "<?php class A { /** @var string[] */ public $p; }";
//! let fixed = fix_source(&ArrayPropertyDefaultValueFixer::new(), source).unwrap();
//! assert_eq!(fixed, "<?php class A { /** @var string[] */ public $p = []; }");
//! ```

pub mod docblock;
pub mod fixers;
pub mod logging;

pub use docblock::{parse_var_annotation, DocAnnotation};
pub use fixers::{
    fix_source, ArrayPropertyDefaultValueFixer, CodeSample, ConfigValue, Fixer, FixerConfig,
    FixerDefinition, FixerError, FixerOption, OptionType,
};
