//! hintdoc_scanner: Lexer for annotated JavaScript source.
//!
//! Produces tokens from source text and, as a side effect, collects every
//! comment it skips so they can be re-attached after parsing. Supports:
//! - All JavaScript punctuation and literal forms
//! - Template literals and regular expression rescans
//! - Unicode identifiers, including `\u` escapes
//! - Pluggable word classification through [`WordClassifier`]

mod char_codes;
mod scanner;
mod token;
mod vocabulary;

pub use scanner::{Scanner, ScannerState};
pub use token::TokenInfo;
pub use vocabulary::{BaseKeywords, TypeVocabulary, WordClassifier};
