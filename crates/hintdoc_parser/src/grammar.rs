//! Grammar extension points.
//!
//! The parser owns the whole JavaScript grammar except for three positions
//! where annotations can appear: a variable declarator, a parameter, and a
//! function signature. Those are parsed by a [`GrammarExtension`], together
//! with word classification for the scanner.
//!
//! [`BaseGrammar`] parses the plain JavaScript forms. [`AnnotationGrammar`]
//! delegates to it and then consumes an optional `: typeName` suffix checked
//! against its [`TypeVocabulary`].

use std::sync::Arc;

use hintdoc_ast::node::{BindingName, ParameterDeclaration, Token, TypeAnnotation};
use hintdoc_ast::syntax_kind::SyntaxKind;
use hintdoc_scanner::{BaseKeywords, TypeVocabulary, WordClassifier};

use crate::parser::Parser;

/// A declarator up to, but not including, its initializer.
#[derive(Debug)]
pub struct DeclaratorHead<'a> {
    pub name: BindingName<'a>,
    pub types: Option<TypeAnnotation>,
}

/// A parameter up to, but not including, its default value.
#[derive(Debug)]
pub struct ParameterHead<'a> {
    pub dot_dot_dot_token: Option<Token>,
    pub name: BindingName<'a>,
    pub types: Option<TypeAnnotation>,
}

/// A parenthesized parameter list and the optional return annotation after it.
#[derive(Debug)]
pub struct FunctionSignature<'a> {
    pub parameters: &'a [ParameterDeclaration<'a>],
    pub returns: Option<TypeAnnotation>,
}

/// Hooks the parser calls at every annotation position.
///
/// Implementations receive the parser positioned at the first token of the
/// construct and must leave it after the last token they consumed.
pub trait GrammarExtension: WordClassifier + Sized + 'static {
    /// Parse a `var`/`let`/`const` binding name and anything that follows it
    /// before `=`.
    fn parse_declarator<'a>(&self, parser: &mut Parser<'a, Self>) -> DeclaratorHead<'a>;

    /// Parse an optional `...`, a binding name, and anything that follows it
    /// before `=`.
    fn parse_parameter<'a>(&self, parser: &mut Parser<'a, Self>) -> ParameterHead<'a>;

    /// Parse `( parameters )` and anything between `)` and the body.
    fn parse_function_signature<'a>(&self, parser: &mut Parser<'a, Self>) -> FunctionSignature<'a>;

    /// Whether a token of `kind` after a colon starts an annotation.
    fn is_annotation_label(&self, _kind: SyntaxKind) -> bool {
        false
    }
}

/// Plain JavaScript.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseGrammar;

impl BaseGrammar {
    pub fn declarator<'a, G: GrammarExtension>(&self, parser: &mut Parser<'a, G>) -> DeclaratorHead<'a> {
        DeclaratorHead {
            name: parser.parse_binding_name(),
            types: None,
        }
    }

    pub fn parameter<'a, G: GrammarExtension>(&self, parser: &mut Parser<'a, G>) -> ParameterHead<'a> {
        let dot_dot_dot_token = parser.optional_token(SyntaxKind::DotDotDotToken);
        ParameterHead {
            dot_dot_dot_token,
            name: parser.parse_binding_name(),
            types: None,
        }
    }

    pub fn function_signature<'a, G: GrammarExtension>(
        &self,
        parser: &mut Parser<'a, G>,
    ) -> FunctionSignature<'a> {
        FunctionSignature {
            parameters: parser.parse_parameter_list(),
            returns: None,
        }
    }
}

impl WordClassifier for BaseGrammar {
    fn classify_word(&self, word: &str) -> Option<SyntaxKind> {
        BaseKeywords.classify_word(word)
    }
}

impl GrammarExtension for BaseGrammar {
    fn parse_declarator<'a>(&self, parser: &mut Parser<'a, Self>) -> DeclaratorHead<'a> {
        self.declarator(parser)
    }

    fn parse_parameter<'a>(&self, parser: &mut Parser<'a, Self>) -> ParameterHead<'a> {
        self.parameter(parser)
    }

    fn parse_function_signature<'a>(&self, parser: &mut Parser<'a, Self>) -> FunctionSignature<'a> {
        self.function_signature(parser)
    }
}

/// JavaScript with `: typeName` annotations on declarators, parameters and
/// function signatures.
#[derive(Debug, Clone)]
pub struct AnnotationGrammar {
    base: BaseGrammar,
    vocabulary: Arc<TypeVocabulary>,
}

impl AnnotationGrammar {
    pub fn new(vocabulary: Arc<TypeVocabulary>) -> Self {
        Self {
            base: BaseGrammar,
            vocabulary,
        }
    }

    /// An annotation grammar over all eight reserved labels.
    pub fn standard() -> Self {
        Self::new(Arc::new(TypeVocabulary::standard()))
    }

    pub fn vocabulary(&self) -> &TypeVocabulary {
        &self.vocabulary
    }
}

impl WordClassifier for AnnotationGrammar {
    fn classify_word(&self, word: &str) -> Option<SyntaxKind> {
        self.vocabulary.classify_word(word)
    }
}

impl GrammarExtension for AnnotationGrammar {
    fn parse_declarator<'a>(&self, parser: &mut Parser<'a, Self>) -> DeclaratorHead<'a> {
        let mut head = self.base.declarator(parser);
        head.types = parser.parse_type_annotation(&self.vocabulary);
        head
    }

    fn parse_parameter<'a>(&self, parser: &mut Parser<'a, Self>) -> ParameterHead<'a> {
        let mut head = self.base.parameter(parser);
        head.types = parser.parse_type_annotation(&self.vocabulary);
        head
    }

    fn parse_function_signature<'a>(&self, parser: &mut Parser<'a, Self>) -> FunctionSignature<'a> {
        let mut signature = self.base.function_signature(parser);
        signature.returns = parser.parse_type_annotation(&self.vocabulary);
        signature
    }

    fn is_annotation_label(&self, kind: SyntaxKind) -> bool {
        self.vocabulary.contains(kind)
    }
}
