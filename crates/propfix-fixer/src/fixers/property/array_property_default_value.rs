//! Give array properties documented with `@var Type[]` an explicit `= []`
//!
//! ```php
//! /** @var string[] */
//! public $names;      // becomes: public $names = [];
//! ```

use propfix_core::{
    ClassMemberScanner, PropertyDeclaration, StructureError, Token, TokenKind, TokenStream,
};

use crate::docblock::parse_var_annotation;
use crate::fixers::{
    CodeSample, ConfigValue, Fixer, FixerConfig, FixerDefinition, FixerError, FixerOption,
    OptionType,
};
use crate::logging;

const DEFAULT_LOOKBACK: usize = 5;

/// Adds `= []` to documented array properties that have no default
#[derive(Debug, Clone)]
pub struct ArrayPropertyDefaultValueFixer {
    /// Number of non-whitespace tokens searched backwards for a comment
    lookback: usize,
    /// Ignore `//` and `/* */` comments, only `/** */` counts
    doc_comments_only: bool,
}

/// What to do with a single property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    /// Insert the default before the token at this index
    Insert(usize),
    Skip(&'static str),
}

/// Where a property's declarator ends
enum DeclaratorEnd {
    /// `,` or `;` at this index
    Terminator(usize),
    /// A `{` of a property hook came first
    Hooked,
}

impl Default for ArrayPropertyDefaultValueFixer {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_LOOKBACK,
            doc_comments_only: false,
        }
    }
}

impl ArrayPropertyDefaultValueFixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the fixer from rule options, rejecting unknown or ill-typed ones
    pub fn configure(config: &FixerConfig) -> Result<Self, FixerError> {
        let mut fixer = Self::default();

        for (name, value) in &config.options {
            match (name.as_str(), value) {
                ("lookback", ConfigValue::Number(n)) if *n >= 1 => {
                    fixer.lookback = *n as usize;
                }
                ("lookback", _) => {
                    return Err(invalid_option(name, "expected a number >= 1"));
                }
                ("doc_comments_only", ConfigValue::Bool(b)) => {
                    fixer.doc_comments_only = *b;
                }
                ("doc_comments_only", _) => {
                    return Err(invalid_option(name, "expected a boolean"));
                }
                _ => return Err(invalid_option(name, "unknown option")),
            }
        }

        Ok(fixer)
    }

    /// Process one class-like body: decide for every property on the
    /// untouched stream first, so a malformed body aborts before any
    /// insertion, then insert re-resolving each property against the
    /// current stream.
    fn fix_class(&self, stream: &mut TokenStream, class_index: usize) -> Result<(), FixerError> {
        let properties = ClassMemberScanner::properties_of(stream, class_index)?;
        logging::log_class(class_index, properties.len());

        for property in &properties {
            self.decide(stream, property)?;
        }

        for nth in 0..properties.len() {
            let current = ClassMemberScanner::properties_of(stream, class_index)?;
            let Some(property) = current.get(nth) else {
                break;
            };

            match self.decide(stream, property)? {
                Decision::Insert(terminator) => {
                    stream.insert_at(terminator, default_value_tokens());
                    logging::log_default_inserted(property.token.text(), property.position);
                }
                Decision::Skip(reason) => {
                    logging::log_property_skipped(property.token.text(), property.position, reason);
                }
            }
        }

        Ok(())
    }

    fn decide(
        &self,
        stream: &TokenStream,
        property: &PropertyDeclaration,
    ) -> Result<Decision, StructureError> {
        if property.readonly {
            return Ok(Decision::Skip("readonly property cannot have a default"));
        }

        // A grouped declaration shares the comment of its first variable
        let Some(comment) = self.preceding_comment(stream, property.declaration_start) else {
            return Ok(Decision::Skip("no preceding comment"));
        };

        match parse_var_annotation(stream[comment].text()) {
            None => return Ok(Decision::Skip("no @var annotation")),
            Some(annotation) if !annotation.is_array_type() => {
                return Ok(Decision::Skip("not an array type"));
            }
            Some(_) => {}
        }

        let terminator = match declarator_end(stream, property.position)? {
            DeclaratorEnd::Terminator(index) => index,
            DeclaratorEnd::Hooked => return Ok(Decision::Skip("property has hooks")),
        };

        let has_default = stream
            .next_of_kind(property.position, &[TokenKind::Equals])
            .is_some_and(|equals| equals < terminator);
        if has_default {
            return Ok(Decision::Skip("default already set"));
        }

        Ok(Decision::Insert(terminator))
    }

    /// Walk back over modifiers and type tokens looking for the comment
    /// attached to the property. Stops at the previous statement boundary.
    fn preceding_comment(&self, stream: &TokenStream, position: usize) -> Option<usize> {
        let mut cursor = position;

        for _ in 0..self.lookback {
            let prev = stream.prev_non_whitespace(cursor)?;
            let token = &stream[prev];

            if token.is_comment() && (!self.doc_comments_only || token.is_doc_comment()) {
                return Some(prev);
            }
            if token.is_kind(&[TokenKind::Semicolon, TokenKind::OpenBrace, TokenKind::CloseBrace]) {
                return None;
            }
            cursor = prev;
        }

        None
    }
}

impl Fixer for ArrayPropertyDefaultValueFixer {
    fn name(&self) -> &'static str {
        "array_property_default_value"
    }

    fn definition(&self) -> FixerDefinition {
        FixerDefinition {
            summary: "Array property should have default value, to prevent undefined array issues.",
            code_samples: vec![CodeSample::new(
                "<?php\nclass Foo\n{\n    /**\n     * @var string[]\n     */\n    public $property;\n}\n",
            )],
        }
    }

    fn priority(&self) -> i32 {
        0
    }

    fn is_candidate(&self, stream: &TokenStream) -> bool {
        stream.is_all_kinds_found(&[TokenKind::Comment, TokenKind::Variable])
    }

    fn fix(&self, stream: &mut TokenStream) -> Result<(), FixerError> {
        logging::log_fix_start(self.name(), stream.len());

        // Bounds are re-read every iteration: insertions grow the stream
        let mut index = 0;
        while index < stream.len() {
            if ClassMemberScanner::opens_class(stream, index) {
                if let Err(error) = self.fix_class(stream, index) {
                    logging::log_fix_aborted(&error.to_string());
                    return Err(error);
                }
            }
            index += 1;
        }

        Ok(())
    }

    fn options(&self) -> Vec<FixerOption> {
        vec![
            FixerOption {
                name: "lookback",
                description: "How many tokens before a property are searched for its comment",
                option_type: OptionType::Number,
                default: Some(ConfigValue::Number(DEFAULT_LOOKBACK as i64)),
            },
            FixerOption {
                name: "doc_comments_only",
                description: "Only read `/** */` comments",
                option_type: OptionType::Bool,
                default: Some(ConfigValue::Bool(false)),
            },
        ]
    }
}

/// End of the declarator starting at the property variable: the first `,`
/// or `;` outside of any brackets
fn declarator_end(stream: &TokenStream, position: usize) -> Result<DeclaratorEnd, StructureError> {
    let mut depth = 0usize;

    for index in position + 1..stream.len() {
        let token = &stream[index];
        match token.kind() {
            TokenKind::Comma | TokenKind::Semicolon if depth == 0 => {
                return Ok(DeclaratorEnd::Terminator(index));
            }
            TokenKind::OpenBrace if depth == 0 => return Ok(DeclaratorEnd::Hooked),
            TokenKind::CloseBrace if depth == 0 => break,
            _ if token.is_opening() => depth += 1,
            _ if token.is_closing() => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    Err(StructureError::MissingTerminator {
        property_index: position,
    })
}

/// ` = []` as five tokens
fn default_value_tokens() -> Vec<Token> {
    vec![
        Token::whitespace(" "),
        Token::new(TokenKind::Equals, "="),
        Token::whitespace(" "),
        Token::new(TokenKind::ArrayOpen, "["),
        Token::new(TokenKind::ArrayClose, "]"),
    ]
}

fn invalid_option(name: &str, reason: &str) -> FixerError {
    FixerError::InvalidOption {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixers::fix_source;

    fn fix(source: &str) -> String {
        fix_source(&ArrayPropertyDefaultValueFixer::new(), source).unwrap()
    }

    #[test]
    fn test_adds_default() {
        assert_eq!(
            fix("<?php class A { /** @var string[] */ public $p; }"),
            "<?php class A { /** @var string[] */ public $p = []; }"
        );
    }

    #[test]
    fn test_existing_default_unchanged() {
        let source = "<?php class A { /** @var string[] */ public $p = ['x']; }";
        assert_eq!(fix(source), source);
    }

    #[test]
    fn test_non_array_unchanged() {
        let source = "<?php class A { /** @var string */ public $p; }";
        assert_eq!(fix(source), source);
    }

    #[test]
    fn test_plain_comment_counts() {
        assert_eq!(
            fix("<?php class A { /* @var int[] */ public $p; }"),
            "<?php class A { /* @var int[] */ public $p = []; }"
        );
    }

    #[test]
    fn test_doc_comments_only_option() {
        let config = FixerConfig::default().with_option("doc_comments_only", ConfigValue::Bool(true));
        let fixer = ArrayPropertyDefaultValueFixer::configure(&config).unwrap();
        let source = "<?php class A { /* @var int[] */ public $p; }";
        assert_eq!(fix_source(&fixer, source).unwrap(), source);
    }

    #[test]
    fn test_lookback_option_limits_search() {
        let source = "<?php class A { /** @var int[] */ public static ?array $p; }";
        assert_eq!(fix(source), "<?php class A { /** @var int[] */ public static ?array $p = []; }");

        let config = FixerConfig::default().with_option("lookback", ConfigValue::Number(2));
        let fixer = ArrayPropertyDefaultValueFixer::configure(&config).unwrap();
        assert_eq!(fix_source(&fixer, source).unwrap(), source);
    }

    #[test]
    fn test_invalid_options() {
        let config = FixerConfig::default().with_option("lookback", ConfigValue::Number(0));
        assert!(matches!(
            ArrayPropertyDefaultValueFixer::configure(&config),
            Err(FixerError::InvalidOption { .. })
        ));

        let config = FixerConfig::default().with_option("lookback", ConfigValue::Bool(true));
        assert!(ArrayPropertyDefaultValueFixer::configure(&config).is_err());

        let config = FixerConfig::default()
            .with_option("doc_comments_only", ConfigValue::String("yes".to_string()));
        assert!(ArrayPropertyDefaultValueFixer::configure(&config).is_err());

        let config = FixerConfig::default().with_option("nope", ConfigValue::Bool(true));
        assert!(ArrayPropertyDefaultValueFixer::configure(&config).is_err());
    }

    #[test]
    fn test_previous_member_comment_not_borrowed() {
        let source = "<?php class A { /** @var int[] */ public $a = []; public $b; }";
        assert_eq!(fix(source), source);
    }

    #[test]
    fn test_readonly_skipped() {
        let source = "<?php class A { /** @var int[] */ public readonly array $a; }";
        assert_eq!(fix(source), source);
    }

    #[test]
    fn test_hooked_property_skipped() {
        let source = "<?php class A { /** @var int[] */ public array $a { get => []; } }";
        assert_eq!(fix(source), source);
    }

    #[test]
    fn test_keyword_outside_declaration_ignored() {
        // a bare `class` token is not treated as a class header
        let source = "<?php /** @var int[] */ $a = f(); class;";
        assert_eq!(fix(source), source);
    }

    #[test]
    fn test_options_listed() {
        let names: Vec<&str> = ArrayPropertyDefaultValueFixer::new()
            .options()
            .iter()
            .map(|o| o.name)
            .collect();
        assert_eq!(names, vec!["lookback", "doc_comments_only"]);
    }

    #[test]
    fn test_declarator_end_skips_nested_commas() {
        let stream = TokenStream::from_source("<?php class A { public $a = [1, 2], $b; }");
        let a = stream.next_of_kind(0, &[TokenKind::Variable]).unwrap();
        let end = match declarator_end(&stream, a).unwrap() {
            DeclaratorEnd::Terminator(index) => index,
            DeclaratorEnd::Hooked => panic!("not hooked"),
        };
        assert_eq!(stream[end].kind(), TokenKind::Comma);
        assert_eq!(stream[end + 2].text(), "$b");
    }
}
