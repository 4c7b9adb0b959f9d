//! hintdoc_parser: Recursive descent parser for annotated JavaScript.
//!
//! Parses token streams from the scanner into an arena-allocated tree. The
//! positions where annotations may appear are parsed through a
//! [`GrammarExtension`], so the same parser serves plain JavaScript
//! ([`BaseGrammar`]) and annotated input ([`AnnotationGrammar`]).

mod grammar;
mod parser;
mod precedence;
mod utilities;

pub use grammar::{
    AnnotationGrammar, BaseGrammar, DeclaratorHead, FunctionSignature, GrammarExtension,
    ParameterHead,
};
pub use parser::{ParsedSource, Parser, MAX_RECURSION_DEPTH};
