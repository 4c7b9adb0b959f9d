//! The parser implementation.
//!
//! A recursive descent parser over the scanner's token stream. It builds an
//! arena-allocated tree, assigns every node a [`NodeId`], and records the
//! token stream so comment attachment can tell whether anything sits between
//! a statement and a comment.
//!
//! Annotation positions are delegated to the grammar `G`. A grammar that
//! rejects an annotation calls [`Parser::abort`]; after that the parser only
//! unwinds and [`Parser::parse_source_file`] returns the fatal diagnostic.

use std::sync::Arc;

use bumpalo::Bump;
use hintdoc_ast::comments::CommentRecord;
use hintdoc_ast::node::*;
use hintdoc_ast::syntax_kind::SyntaxKind;
use hintdoc_ast::types::*;
use hintdoc_core::text::TextSpan;
use hintdoc_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use hintdoc_scanner::{Scanner, TokenInfo, TypeVocabulary, WordClassifier};
use tracing::{debug, trace};

use crate::grammar::{BaseGrammar, DeclaratorHead, FunctionSignature, GrammarExtension, ParameterHead};
use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::utilities::{can_start_member_name, can_start_statement, can_start_yield_operand};

/// Maximum nesting of statements, expressions and binding patterns before
/// parsing gives up. Later passes recurse along the same nesting, so this
/// bounds their stack use too. Sized for a 2 MiB thread in debug builds.
pub const MAX_RECURSION_DEPTH: u32 = 48;

/// Move a Vec into the arena as a slice.
fn alloc_vec_in<T>(arena: &Bump, vec: Vec<T>) -> &[T] {
    if vec.is_empty() {
        return &[];
    }
    arena.alloc_slice_fill_iter(vec)
}

/// Everything parsing one file produces.
#[derive(Debug)]
pub struct ParsedSource<'a> {
    pub file: SourceFile<'a>,
    /// Original comments in source order.
    pub comments: Vec<CommentRecord>,
    /// Significant tokens in source order.
    pub tokens: Vec<TokenInfo>,
    /// Recoverable diagnostics and base syntax errors.
    pub diagnostics: DiagnosticCollection,
}

/// The parser produces a [`SourceFile`] from source text.
pub struct Parser<'a, G: GrammarExtension = BaseGrammar> {
    arena: &'a Bump,
    grammar: Arc<G>,
    scanner: Scanner,
    file_name: String,
    source_text: String,
    diagnostics: DiagnosticCollection,
    tokens: Vec<TokenInfo>,
    /// End of the last consumed token; closes the range of a finished node.
    prev_token_end: u32,
    next_node_id: u32,
    fatal: Option<Diagnostic>,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
    in_generator: bool,
    in_async: bool,
    /// Set while parsing a `for` head, where `in` ends the initializer.
    disallow_in: bool,
}

impl<'a> Parser<'a, BaseGrammar> {
    /// A parser for plain JavaScript.
    pub fn new(arena: &'a Bump, file_name: &str, source_text: &str) -> Self {
        Self::with_grammar(arena, file_name, source_text, Arc::new(BaseGrammar))
    }
}

impl<'a, G: GrammarExtension> Parser<'a, G> {
    pub fn with_grammar(arena: &'a Bump, file_name: &str, source_text: &str, grammar: Arc<G>) -> Self {
        let classifier: Arc<dyn WordClassifier> = grammar.clone();
        Self {
            arena,
            grammar,
            scanner: Scanner::with_classifier(source_text, classifier),
            file_name: file_name.to_string(),
            source_text: source_text.to_string(),
            diagnostics: DiagnosticCollection::new(),
            tokens: Vec::new(),
            prev_token_end: 0,
            next_node_id: 0,
            fatal: None,
            recursion_depth: 0,
            in_generator: false,
            in_async: false,
            disallow_in: false,
        }
    }

    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    /// Parse the whole file. Returns the fatal diagnostic if parsing was
    /// aborted; base syntax errors are returned inside [`ParsedSource`].
    #[tracing::instrument(skip_all, fields(file = %self.file_name))]
    pub fn parse_source_file(mut self) -> Result<ParsedSource<'a>, Diagnostic> {
        self.scanner.skip_shebang();
        self.next_token();

        let statements = self.parse_statement_list(true);
        if let Some(fatal) = self.fatal.take() {
            debug!(code = fatal.code, "parse aborted");
            return Err(fatal.in_file(&self.file_name));
        }

        let end = self.scanner.text_len() as u32;
        let data = self.node_data(SyntaxKind::SourceFile, 0, end);
        let shebang = self.scanner.shebang().map(str::to_string);
        let comments = self.scanner.take_comments();

        let mut collected = self.scanner.take_diagnostics();
        collected.extend(std::mem::take(&mut self.diagnostics));
        let mut diagnostics = DiagnosticCollection::new();
        for diagnostic in collected {
            diagnostics.add(diagnostic.in_file(&self.file_name));
        }
        diagnostics.sort();

        debug!(
            statements = statements.len(),
            comments = comments.len(),
            tokens = self.tokens.len(),
            diagnostics = diagnostics.len(),
            "parsed source file"
        );

        Ok(ParsedSource {
            file: SourceFile {
                data,
                statements,
                shebang,
                file_name: self.file_name,
                text: self.source_text,
            },
            comments,
            tokens: self.tokens,
            diagnostics,
        })
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub fn current_token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end() as u32;
        let kind = self.scanner.scan();
        if kind != SyntaxKind::EndOfFileToken {
            self.tokens.push(self.scanner.token_info());
        }
        kind
    }

    /// Replace the last recorded token after the scanner re-read it.
    fn record_rescan(&mut self) {
        let info = self.scanner.token_info();
        if let Some(last) = self.tokens.last_mut() {
            *last = info;
        }
    }

    #[inline]
    pub fn token_pos(&self) -> u32 {
        self.scanner.token_start() as u32
    }

    #[inline]
    fn token_end(&self) -> u32 {
        self.scanner.token_end() as u32
    }

    #[inline]
    fn token_value(&self) -> &str {
        self.scanner.token_value()
    }

    fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    fn expect_token(&mut self, kind: SyntaxKind) -> Token {
        let pos = self.token_pos();
        if self.current_token() == kind {
            let end = self.token_end();
            self.next_token();
            Token::new(kind, pos, end)
        } else {
            let text = kind.token_text().unwrap_or("token");
            self.error(&messages::_0_EXPECTED, &[text]);
            Token::new(kind, pos, pos)
        }
    }

    /// Consume the current token if it is `kind`.
    pub fn optional_token(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.current_token() == kind {
            let pos = self.token_pos();
            let end = self.token_end();
            self.next_token();
            Some(Token::new(kind, pos, end))
        } else {
            None
        }
    }

    fn parse_expected_semicolon(&mut self) {
        if self.optional_token(SyntaxKind::SemicolonToken).is_some() {
            return;
        }
        // Automatic semicolon insertion
        if matches!(
            self.current_token(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
        {
            return;
        }
        self.error(&messages::_0_EXPECTED, &[";"]);
    }

    fn is_identifier_text(&self, text: &str) -> bool {
        self.current_token() == SyntaxKind::Identifier && self.token_value() == text
    }

    /// Kind and line-break flag of the token after the current one.
    fn peek(&mut self) -> (SyntaxKind, bool) {
        self.scanner.look_ahead(|s| {
            let kind = s.scan();
            (kind, s.has_preceding_line_break())
        })
    }

    // ========================================================================
    // Nodes and errors
    // ========================================================================

    fn node_data(&mut self, kind: SyntaxKind, pos: u32, end: u32) -> NodeData {
        let mut data = NodeData::new(kind, pos, end.max(pos));
        data.id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        data
    }

    /// Data for a node that started at `pos` and ends with the last consumed token.
    fn finish_node(&mut self, kind: SyntaxKind, pos: u32) -> NodeData {
        let end = self.prev_token_end;
        self.node_data(kind, pos, end)
    }

    fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let pos = self.token_pos();
        let end = self.token_end();
        self.error_at(pos, end, message, args);
    }

    fn error_at(&mut self, pos: u32, end: u32, message: &DiagnosticMessage, args: &[&str]) {
        if self.fatal.is_some() {
            return;
        }
        self.diagnostics.add_unique(Diagnostic::with_location(
            self.file_name.clone(),
            TextSpan::from_bounds(pos, end.max(pos)),
            message,
            args,
        ));
    }

    /// Stop parsing. The first fatal diagnostic wins; the scanner jumps to the
    /// end of input so every open construct unwinds without consuming text.
    pub fn abort(&mut self, diagnostic: Diagnostic) {
        if self.fatal.is_none() {
            self.fatal = Some(diagnostic);
        }
        self.scanner.set_pos(self.scanner.text_len());
        self.scanner.scan();
    }

    pub fn is_aborted(&self) -> bool {
        self.fatal.is_some()
    }

    fn enter_nesting(&mut self) -> bool {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            let span = TextSpan::from_bounds(self.token_pos(), self.token_end());
            self.abort(Diagnostic::at(span, &messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[]));
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    fn leave_nesting(&mut self) {
        self.recursion_depth -= 1;
    }

    fn allowing_in<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.disallow_in, false);
        let result = f(self);
        self.disallow_in = saved;
        result
    }

    // ========================================================================
    // Annotations
    // ========================================================================

    /// Parse an optional `: typeName` suffix.
    ///
    /// Returns `None` when the current token is not a colon. A colon followed
    /// by anything other than a label reserved in `vocabulary` aborts the
    /// parse with a diagnostic spanning the colon.
    pub fn parse_type_annotation(&mut self, vocabulary: &TypeVocabulary) -> Option<TypeAnnotation> {
        if self.current_token() != SyntaxKind::ColonToken {
            return None;
        }
        let colon = TextSpan::from_bounds(self.token_pos(), self.token_end());
        self.next_token();
        match vocabulary.label_of(self.current_token()) {
            Some(label) => {
                self.next_token();
                trace!(%label, pos = colon.start, "type annotation");
                Some(TypeAnnotation {
                    data: self.finish_node(SyntaxKind::TypeAnnotation, colon.start),
                    label,
                })
            }
            None => {
                self.abort(Diagnostic::at(colon, &messages::EXPECTED_A_TYPE_DECLARATION, &[]));
                None
            }
        }
    }

    // ========================================================================
    // Statement parsing
    // ========================================================================

    fn parse_statement_list(&mut self, top_level: bool) -> &'a [Statement<'a>] {
        let mut statements = Vec::new();
        loop {
            match self.current_token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CloseBraceToken if !top_level => break,
                SyntaxKind::CloseBraceToken => {
                    self.error(&messages::UNEXPECTED_TOKEN, &[]);
                    self.next_token();
                    continue;
                }
                _ => {}
            }
            let saved_pos = self.scanner.token_start();
            statements.push(self.parse_statement());

            // Error recovery: never stay on the same token.
            if self.scanner.token_start() == saved_pos {
                self.skip_to_next_statement();
            }
        }
        alloc_vec_in(self.arena, statements)
    }

    fn skip_to_next_statement(&mut self) {
        self.next_token();
        while self.current_token() != SyntaxKind::EndOfFileToken
            && self.current_token() != SyntaxKind::CloseBraceToken
            && !can_start_statement(self.current_token())
        {
            self.next_token();
        }
    }

    fn parse_statement(&mut self) -> Statement<'a> {
        if !self.enter_nesting() {
            let pos = self.token_pos();
            return Statement::EmptyStatement(self.node_data(SyntaxKind::EmptyStatement, pos, pos));
        }
        let statement = self.parse_statement_worker();
        self.leave_nesting();
        statement
    }

    fn parse_statement_worker(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
                Statement::EmptyStatement(self.finish_node(SyntaxKind::EmptyStatement, pos))
            }
            SyntaxKind::OpenBraceToken => Statement::Block(self.parse_block()),
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => self.parse_variable_statement(),
            SyntaxKind::LetKeyword if self.is_let_declaration() => self.parse_variable_statement(),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, false),
            SyntaxKind::Identifier if self.is_async_function() => {
                self.next_token();
                self.parse_function_declaration(pos, true)
            }
            SyntaxKind::ClassKeyword => self.parse_class_declaration(),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::DebuggerKeyword => {
                self.next_token();
                self.parse_expected_semicolon();
                Statement::DebuggerStatement(self.finish_node(SyntaxKind::DebuggerStatement, pos))
            }
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::BreakKeyword => self.parse_break_statement(),
            SyntaxKind::ContinueKeyword => self.parse_continue_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::ImportKeyword | SyntaxKind::ExportKeyword | SyntaxKind::EnumKeyword => {
                self.error(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
                self.next_token();
                Statement::EmptyStatement(self.finish_node(SyntaxKind::EmptyStatement, pos))
            }
            kind if kind.is_identifier_like() && self.is_labeled_statement() => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// `let` starts a declaration only when a binding follows it.
    fn is_let_declaration(&mut self) -> bool {
        let (next, _) = self.peek();
        next.is_identifier_like()
            || next == SyntaxKind::OpenBracketToken
            || next == SyntaxKind::OpenBraceToken
    }

    fn is_async_function(&mut self) -> bool {
        self.is_identifier_text("async")
            && self.peek() == (SyntaxKind::FunctionKeyword, false)
    }

    fn is_labeled_statement(&mut self) -> bool {
        self.peek().0 == SyntaxKind::ColonToken
    }

    fn parse_block(&mut self) -> Block<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let statements = self.allowing_in(|p| p.parse_statement_list(false));
        self.expect_token(SyntaxKind::CloseBraceToken);
        Block {
            data: self.finish_node(SyntaxKind::Block, pos),
            statements,
        }
    }

    fn parse_variable_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        let declaration_list = self.parse_variable_declaration_list();
        self.parse_expected_semicolon();
        Statement::VariableStatement(VariableStatement {
            data: self.finish_node(SyntaxKind::VariableStatement, pos),
            declaration_list,
        })
    }

    fn parse_variable_declaration_list(&mut self) -> VariableDeclarationList<'a> {
        let pos = self.token_pos();
        let flags = match self.current_token() {
            SyntaxKind::LetKeyword => NodeFlags::LET,
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            _ => NodeFlags::NONE,
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declaration());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        let mut data = self.finish_node(SyntaxKind::VariableDeclarationList, pos);
        data.flags = flags;
        VariableDeclarationList {
            data,
            declarations: alloc_vec_in(self.arena, declarations),
        }
    }

    fn parse_variable_declaration(&mut self) -> VariableDeclaration<'a> {
        let pos = self.token_pos();
        let grammar = Arc::clone(&self.grammar);
        let DeclaratorHead { name, types } = grammar.parse_declarator(self);
        let initializer = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
            Some(self.parse_assignment_expression_and_alloc())
        } else {
            None
        };
        VariableDeclaration {
            data: self.finish_node(SyntaxKind::VariableDeclaration, pos),
            name,
            types,
            initializer,
        }
    }

    // ========================================================================
    // Binding patterns (destructuring)
    // ========================================================================

    /// Parse an identifier or a destructuring pattern.
    pub fn parse_binding_name(&mut self) -> BindingName<'a> {
        if !matches!(
            self.current_token(),
            SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken
        ) {
            return BindingName::Identifier(self.parse_identifier());
        }
        if !self.enter_nesting() {
            return BindingName::Identifier(self.missing_identifier());
        }
        let name = if self.current_token() == SyntaxKind::OpenBraceToken {
            let pattern = self.parse_object_binding_pattern();
            BindingName::ObjectBindingPattern(self.arena.alloc(pattern))
        } else {
            let pattern = self.parse_array_binding_pattern();
            BindingName::ArrayBindingPattern(self.arena.alloc(pattern))
        };
        self.leave_nesting();
        name
    }

    fn parse_object_binding_pattern(&mut self) -> ObjectBindingPattern<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut elements = Vec::new();
        while self.current_token() != SyntaxKind::CloseBraceToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            elements.push(self.parse_object_binding_element());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        ObjectBindingPattern {
            data: self.finish_node(SyntaxKind::ObjectBindingPattern, pos),
            elements: alloc_vec_in(self.arena, elements),
        }
    }

    fn parse_object_binding_element(&mut self) -> BindingElement<'a> {
        let pos = self.token_pos();
        if let Some(dot_dot_dot_token) = self.optional_token(SyntaxKind::DotDotDotToken) {
            let name = self.parse_binding_name();
            return BindingElement {
                data: self.finish_node(SyntaxKind::BindingElement, pos),
                dot_dot_dot_token: Some(dot_dot_dot_token),
                property_name: None,
                name,
                initializer: None,
            };
        }

        let property = self.parse_property_name();
        let (property_name, name) = if self.optional_token(SyntaxKind::ColonToken).is_some() {
            (Some(property), self.parse_binding_name())
        } else {
            match property {
                PropertyName::Identifier(id) => (None, BindingName::Identifier(id)),
                other => {
                    self.error(&messages::_0_EXPECTED, &[":"]);
                    (Some(other), BindingName::Identifier(self.missing_identifier()))
                }
            }
        };
        let initializer = self.parse_binding_initializer();
        BindingElement {
            data: self.finish_node(SyntaxKind::BindingElement, pos),
            dot_dot_dot_token: None,
            property_name,
            name,
            initializer,
        }
    }

    fn parse_array_binding_pattern(&mut self) -> ArrayBindingPattern<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        while self.current_token() != SyntaxKind::CloseBracketToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            if self.current_token() == SyntaxKind::CommaToken {
                let epos = self.token_pos();
                elements.push(ArrayBindingElement::OmittedExpression(self.node_data(
                    SyntaxKind::OmittedExpression,
                    epos,
                    epos,
                )));
            } else {
                let epos = self.token_pos();
                let dot_dot_dot_token = self.optional_token(SyntaxKind::DotDotDotToken);
                let name = self.parse_binding_name();
                let initializer = self.parse_binding_initializer();
                elements.push(ArrayBindingElement::BindingElement(BindingElement {
                    data: self.finish_node(SyntaxKind::BindingElement, epos),
                    dot_dot_dot_token,
                    property_name: None,
                    name,
                    initializer,
                }));
            }
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBracketToken);
        ArrayBindingPattern {
            data: self.finish_node(SyntaxKind::ArrayBindingPattern, pos),
            elements: alloc_vec_in(self.arena, elements),
        }
    }

    fn parse_binding_initializer(&mut self) -> Option<&'a Expression<'a>> {
        if self.optional_token(SyntaxKind::EqualsToken).is_some() {
            Some(self.allowing_in(|p| p.parse_assignment_expression_and_alloc()))
        } else {
            None
        }
    }

    // ========================================================================
    // Identifiers and names
    // ========================================================================

    /// An identifier in binding or reference position. Reserved type words
    /// and contextual keywords are accepted; other keywords are not.
    fn parse_identifier(&mut self) -> Identifier {
        if self.current_token().is_identifier_like() {
            return self.consume_identifier();
        }
        self.error(&messages::IDENTIFIER_EXPECTED, &[]);
        let id = self.missing_identifier();
        // Always advance so a caller looping on identifiers cannot spin.
        if self.current_token() != SyntaxKind::EndOfFileToken {
            self.next_token();
        }
        id
    }

    /// An identifier after `.` or in a property name, where keywords are names.
    fn parse_identifier_name(&mut self) -> Identifier {
        if self.current_token().is_keyword() {
            return self.consume_identifier();
        }
        self.parse_identifier()
    }

    fn consume_identifier(&mut self) -> Identifier {
        let pos = self.token_pos();
        let kind = self.current_token();
        let text_name = self.token_value().to_string();
        self.next_token();
        Identifier {
            data: self.finish_node(SyntaxKind::Identifier, pos),
            text_name,
            original_keyword_kind: (kind != SyntaxKind::Identifier).then_some(kind),
        }
    }

    fn parse_private_identifier(&mut self) -> Identifier {
        let pos = self.token_pos();
        let text_name = self.token_value().to_string();
        self.next_token();
        Identifier {
            data: self.finish_node(SyntaxKind::PrivateIdentifier, pos),
            text_name,
            original_keyword_kind: None,
        }
    }

    fn missing_identifier(&mut self) -> Identifier {
        let pos = self.token_pos();
        Identifier {
            data: self.node_data(SyntaxKind::Identifier, pos, pos),
            text_name: String::new(),
            original_keyword_kind: None,
        }
    }

    fn parse_member_name(&mut self) -> Identifier {
        if self.current_token() == SyntaxKind::PrivateIdentifier {
            self.parse_private_identifier()
        } else {
            self.parse_identifier_name()
        }
    }

    fn parse_property_name(&mut self) -> PropertyName<'a> {
        match self.current_token() {
            SyntaxKind::StringLiteral => PropertyName::StringLiteral(self.parse_string_literal()),
            SyntaxKind::NumericLiteral => PropertyName::NumericLiteral(self.parse_numeric_literal()),
            SyntaxKind::PrivateIdentifier => PropertyName::PrivateIdentifier(self.parse_private_identifier()),
            SyntaxKind::OpenBracketToken => {
                let pos = self.token_pos();
                self.next_token();
                let expression = self.allowing_in(|p| p.parse_assignment_expression_and_alloc());
                self.expect_token(SyntaxKind::CloseBracketToken);
                let computed = ComputedPropertyName {
                    data: self.finish_node(SyntaxKind::ComputedPropertyName, pos),
                    expression,
                };
                PropertyName::ComputedPropertyName(self.arena.alloc(computed))
            }
            _ => PropertyName::Identifier(self.parse_identifier_name()),
        }
    }

    // ========================================================================
    // Statement parsing continued
    // ========================================================================

    fn parse_expression_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        let expression = self.parse_expression_and_alloc();
        self.parse_expected_semicolon();
        Statement::ExpressionStatement(ExpressionStatement {
            data: self.finish_node(SyntaxKind::ExpressionStatement, pos),
            expression,
        })
    }

    fn parse_parenthesized_condition(&mut self) -> &'a Expression<'a> {
        self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.allowing_in(|p| p.parse_expression_and_alloc());
        self.expect_token(SyntaxKind::CloseParenToken);
        expression
    }

    fn parse_embedded_statement(&mut self) -> &'a Statement<'a> {
        let statement = self.parse_statement();
        self.arena.alloc(statement)
    }

    fn parse_if_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::IfKeyword);
        let expression = self.parse_parenthesized_condition();
        let then_statement = self.parse_embedded_statement();
        let else_statement = if self.optional_token(SyntaxKind::ElseKeyword).is_some() {
            Some(self.parse_embedded_statement())
        } else {
            None
        };
        Statement::IfStatement(IfStatement {
            data: self.finish_node(SyntaxKind::IfStatement, pos),
            expression,
            then_statement,
            else_statement,
        })
    }

    fn parse_return_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::ReturnKeyword);
        let expression = if self.current_token() != SyntaxKind::SemicolonToken
            && self.current_token() != SyntaxKind::CloseBraceToken
            && self.current_token() != SyntaxKind::EndOfFileToken
            && !self.has_preceding_line_break()
        {
            Some(self.parse_expression_and_alloc())
        } else {
            None
        };
        self.parse_expected_semicolon();
        Statement::ReturnStatement(ReturnStatement {
            data: self.finish_node(SyntaxKind::ReturnStatement, pos),
            expression,
        })
    }

    fn parse_while_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::WhileKeyword);
        let expression = self.parse_parenthesized_condition();
        let statement = self.parse_embedded_statement();
        Statement::WhileStatement(WhileStatement {
            data: self.finish_node(SyntaxKind::WhileStatement, pos),
            expression,
            statement,
        })
    }

    fn parse_for_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::ForKeyword);
        let await_modifier = if self.in_async {
            self.optional_token(SyntaxKind::AwaitKeyword)
        } else {
            None
        };
        self.expect_token(SyntaxKind::OpenParenToken);

        let saved_disallow_in = std::mem::replace(&mut self.disallow_in, true);
        let initializer = match self.current_token() {
            SyntaxKind::SemicolonToken => None,
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => Some(ForInitializer::VariableDeclarationList(
                self.parse_variable_declaration_list(),
            )),
            SyntaxKind::LetKeyword if self.is_let_declaration() => Some(
                ForInitializer::VariableDeclarationList(self.parse_variable_declaration_list()),
            ),
            _ => Some(ForInitializer::Expression(self.parse_expression_and_alloc())),
        };
        self.disallow_in = saved_disallow_in;

        let is_for_of = self.is_identifier_text("of");
        if is_for_of || self.current_token() == SyntaxKind::InKeyword {
            self.next_token();
            let expression = if is_for_of {
                self.allowing_in(|p| p.parse_assignment_expression_and_alloc())
            } else {
                self.allowing_in(|p| p.parse_expression_and_alloc())
            };
            self.expect_token(SyntaxKind::CloseParenToken);
            let statement = self.parse_embedded_statement();
            let initializer = match initializer {
                Some(initializer) => initializer,
                None => {
                    let missing = Expression::Identifier(self.missing_identifier());
                    ForInitializer::Expression(self.arena.alloc(missing))
                }
            };

            if is_for_of {
                return Statement::ForOfStatement(ForOfStatement {
                    data: self.finish_node(SyntaxKind::ForOfStatement, pos),
                    await_modifier,
                    initializer,
                    expression,
                    statement,
                });
            }
            return Statement::ForInStatement(ForInStatement {
                data: self.finish_node(SyntaxKind::ForInStatement, pos),
                initializer,
                expression,
                statement,
            });
        }

        // Regular for statement
        self.expect_token(SyntaxKind::SemicolonToken);
        let condition = if self.current_token() != SyntaxKind::SemicolonToken {
            Some(self.allowing_in(|p| p.parse_expression_and_alloc()))
        } else {
            None
        };
        self.expect_token(SyntaxKind::SemicolonToken);
        let incrementor = if self.current_token() != SyntaxKind::CloseParenToken {
            Some(self.allowing_in(|p| p.parse_expression_and_alloc()))
        } else {
            None
        };
        self.expect_token(SyntaxKind::CloseParenToken);
        let statement = self.parse_embedded_statement();

        Statement::ForStatement(ForStatement {
            data: self.finish_node(SyntaxKind::ForStatement, pos),
            initializer,
            condition,
            incrementor,
            statement,
        })
    }

    fn parse_do_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::DoKeyword);
        let statement = self.parse_embedded_statement();
        self.expect_token(SyntaxKind::WhileKeyword);
        let expression = self.parse_parenthesized_condition();
        // A semicolon is always optional after do-while.
        self.optional_token(SyntaxKind::SemicolonToken);
        Statement::DoStatement(DoStatement {
            data: self.finish_node(SyntaxKind::DoStatement, pos),
            statement,
            expression,
        })
    }

    fn parse_throw_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::ThrowKeyword);
        // No line terminator is allowed between `throw` and its expression.
        if self.has_preceding_line_break() {
            self.error(&messages::EXPRESSION_EXPECTED, &[]);
        }
        let expression = self.parse_expression_and_alloc();
        self.parse_expected_semicolon();
        Statement::ThrowStatement(ThrowStatement {
            data: self.finish_node(SyntaxKind::ThrowStatement, pos),
            expression,
        })
    }

    fn parse_try_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::TryKeyword);
        let try_block = self.parse_block();
        let catch_clause = if self.current_token() == SyntaxKind::CatchKeyword {
            let catch_pos = self.token_pos();
            self.next_token();
            let variable_declaration = if self.optional_token(SyntaxKind::OpenParenToken).is_some() {
                let binding = self.parse_binding_name();
                self.expect_token(SyntaxKind::CloseParenToken);
                Some(binding)
            } else {
                None
            };
            let block = self.parse_block();
            Some(CatchClause {
                data: self.finish_node(SyntaxKind::CatchClause, catch_pos),
                variable_declaration,
                block,
            })
        } else {
            None
        };
        let finally_block = if self.optional_token(SyntaxKind::FinallyKeyword).is_some() {
            Some(self.parse_block())
        } else {
            None
        };
        if catch_clause.is_none() && finally_block.is_none() {
            self.error(&messages::_0_EXPECTED, &["catch"]);
        }
        Statement::TryStatement(TryStatement {
            data: self.finish_node(SyntaxKind::TryStatement, pos),
            try_block,
            catch_clause,
            finally_block,
        })
    }

    fn parse_jump_label(&mut self) -> Option<Identifier> {
        if self.current_token().is_identifier_like() && !self.has_preceding_line_break() {
            Some(self.parse_identifier())
        } else {
            None
        }
    }

    fn parse_break_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::BreakKeyword);
        let label = self.parse_jump_label();
        self.parse_expected_semicolon();
        Statement::BreakStatement(BreakStatement {
            data: self.finish_node(SyntaxKind::BreakStatement, pos),
            label,
        })
    }

    fn parse_continue_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::ContinueKeyword);
        let label = self.parse_jump_label();
        self.parse_expected_semicolon();
        Statement::ContinueStatement(ContinueStatement {
            data: self.finish_node(SyntaxKind::ContinueStatement, pos),
            label,
        })
    }

    fn parse_switch_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::SwitchKeyword);
        let expression = self.parse_parenthesized_condition();

        let case_pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut clauses = Vec::new();
        while self.current_token() != SyntaxKind::CloseBraceToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            let clause_pos = self.token_pos();
            match self.current_token() {
                SyntaxKind::CaseKeyword => {
                    self.next_token();
                    let case_expression = self.allowing_in(|p| p.parse_expression_and_alloc());
                    self.expect_token(SyntaxKind::ColonToken);
                    let statements = self.parse_clause_statements();
                    clauses.push(CaseOrDefaultClause::CaseClause(CaseClause {
                        data: self.finish_node(SyntaxKind::CaseClause, clause_pos),
                        expression: case_expression,
                        statements,
                    }));
                }
                SyntaxKind::DefaultKeyword => {
                    self.next_token();
                    self.expect_token(SyntaxKind::ColonToken);
                    let statements = self.parse_clause_statements();
                    clauses.push(CaseOrDefaultClause::DefaultClause(DefaultClause {
                        data: self.finish_node(SyntaxKind::DefaultClause, clause_pos),
                        statements,
                    }));
                }
                _ => {
                    self.error(&messages::_0_EXPECTED, &["case"]);
                    self.next_token();
                }
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        let case_block = CaseBlock {
            data: self.finish_node(SyntaxKind::CaseBlock, case_pos),
            clauses: alloc_vec_in(self.arena, clauses),
        };

        Statement::SwitchStatement(SwitchStatement {
            data: self.finish_node(SyntaxKind::SwitchStatement, pos),
            expression,
            case_block,
        })
    }

    fn parse_clause_statements(&mut self) -> &'a [Statement<'a>] {
        let mut statements = Vec::new();
        while !matches!(
            self.current_token(),
            SyntaxKind::CaseKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
        ) {
            let saved_pos = self.scanner.token_start();
            statements.push(self.parse_statement());
            if self.scanner.token_start() == saved_pos {
                self.skip_to_next_statement();
            }
        }
        alloc_vec_in(self.arena, statements)
    }

    fn parse_with_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::WithKeyword);
        let expression = self.parse_parenthesized_condition();
        let statement = self.parse_embedded_statement();
        Statement::WithStatement(WithStatement {
            data: self.finish_node(SyntaxKind::WithStatement, pos),
            expression,
            statement,
        })
    }

    fn parse_labeled_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        let label = self.parse_identifier();
        self.expect_token(SyntaxKind::ColonToken);
        let statement = self.parse_embedded_statement();
        Statement::LabeledStatement(LabeledStatement {
            data: self.finish_node(SyntaxKind::LabeledStatement, pos),
            label,
            statement,
        })
    }

    // ========================================================================
    // Functions and classes
    // ========================================================================

    /// Parse `( parameters )` with each parameter going through the grammar.
    pub fn parse_parameter_list(&mut self) -> &'a [ParameterDeclaration<'a>] {
        self.expect_token(SyntaxKind::OpenParenToken);
        let mut parameters = Vec::new();
        while self.current_token() != SyntaxKind::CloseParenToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            parameters.push(self.parse_parameter());
            if self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseParenToken);
        alloc_vec_in(self.arena, parameters)
    }

    fn parse_parameter(&mut self) -> ParameterDeclaration<'a> {
        let pos = self.token_pos();
        let grammar = Arc::clone(&self.grammar);
        let ParameterHead {
            dot_dot_dot_token,
            name,
            types,
        } = grammar.parse_parameter(self);
        let initializer = self.parse_binding_initializer();
        ParameterDeclaration {
            data: self.finish_node(SyntaxKind::Parameter, pos),
            dot_dot_dot_token,
            name,
            types,
            initializer,
        }
    }

    fn parse_signature(&mut self) -> FunctionSignature<'a> {
        let grammar = Arc::clone(&self.grammar);
        grammar.parse_function_signature(self)
    }

    /// Parse a function body with its own `yield`/`await` context.
    fn parse_function_body(&mut self, is_async: bool, is_generator: bool) -> Block<'a> {
        let saved = (self.in_async, self.in_generator);
        self.in_async = is_async;
        self.in_generator = is_generator;
        let body = self.parse_block();
        (self.in_async, self.in_generator) = saved;
        body
    }

    fn function_modifiers(is_async: bool) -> ModifierFlags {
        if is_async {
            ModifierFlags::ASYNC
        } else {
            ModifierFlags::NONE
        }
    }

    fn parse_function_declaration(&mut self, pos: u32, is_async: bool) -> Statement<'a> {
        self.expect_token(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.optional_token(SyntaxKind::AsteriskToken);
        let name = if self.current_token().is_identifier_like() {
            Some(self.parse_identifier())
        } else {
            self.error(&messages::IDENTIFIER_EXPECTED, &[]);
            None
        };
        let FunctionSignature { parameters, returns } = self.parse_signature();
        let body = self.parse_function_body(is_async, asterisk_token.is_some());
        let mut data = self.finish_node(SyntaxKind::FunctionDeclaration, pos);
        data.modifier_flags = Self::function_modifiers(is_async);
        Statement::FunctionDeclaration(FunctionDeclaration {
            data,
            name,
            asterisk_token,
            parameters,
            returns,
            body,
        })
    }

    fn parse_class_declaration(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::ClassKeyword);
        let name = if self.current_token().is_identifier_like() {
            Some(self.parse_identifier())
        } else {
            self.error(&messages::IDENTIFIER_EXPECTED, &[]);
            None
        };
        let heritage = self.parse_class_heritage();
        let body = self.parse_class_body();
        Statement::ClassDeclaration(ClassDeclaration {
            data: self.finish_node(SyntaxKind::ClassDeclaration, pos),
            name,
            heritage,
            body,
        })
    }

    fn parse_class_heritage(&mut self) -> Option<&'a Expression<'a>> {
        if self.optional_token(SyntaxKind::ExtendsKeyword).is_some() {
            if !self.enter_nesting() {
                return None;
            }
            let expression = self.parse_left_hand_side_expression();
            self.leave_nesting();
            Some(self.arena.alloc(expression))
        } else {
            None
        }
    }

    fn parse_class_body(&mut self) -> ClassBody<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut members = Vec::new();
        while self.current_token() != SyntaxKind::CloseBraceToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            let saved_pos = self.scanner.token_start();
            members.push(self.parse_class_member());
            if self.scanner.token_start() == saved_pos {
                self.next_token();
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        ClassBody {
            data: self.finish_node(SyntaxKind::ClassBody, pos),
            members: alloc_vec_in(self.arena, members),
        }
    }

    /// Whether the current word is a modifier rather than the member name.
    fn next_starts_member_name(&mut self, allow_asterisk: bool) -> bool {
        let (next, line_break) = self.peek();
        if line_break && self.is_identifier_text("async") {
            return false;
        }
        can_start_member_name(next) || (allow_asterisk && next == SyntaxKind::AsteriskToken)
    }

    /// `get` or `set` introducing an accessor.
    fn accessor_kind(&mut self) -> Option<SyntaxKind> {
        let kind = if self.is_identifier_text("get") {
            SyntaxKind::GetAccessor
        } else if self.is_identifier_text("set") {
            SyntaxKind::SetAccessor
        } else {
            return None;
        };
        self.next_starts_member_name(false).then_some(kind)
    }

    fn parse_class_member(&mut self) -> ClassElement<'a> {
        let pos = self.token_pos();
        if self.current_token() == SyntaxKind::SemicolonToken {
            self.next_token();
            return ClassElement::SemicolonClassElement(
                self.finish_node(SyntaxKind::SemicolonClassElement, pos),
            );
        }

        let mut modifiers = ModifierFlags::NONE;
        if self.is_identifier_text("static") && self.next_starts_member_name(true) {
            self.next_token();
            modifiers |= ModifierFlags::STATIC;
        }
        if self.is_identifier_text("async") && self.next_starts_member_name(true) {
            self.next_token();
            modifiers |= ModifierFlags::ASYNC;
        }
        let asterisk_token = self.optional_token(SyntaxKind::AsteriskToken);
        let accessor = if asterisk_token.is_none() && !modifiers.contains(ModifierFlags::ASYNC) {
            self.accessor_kind()
        } else {
            None
        };
        if accessor.is_some() {
            self.next_token();
        }

        let name = self.parse_property_name();

        if self.current_token() == SyntaxKind::OpenParenToken {
            let is_constructor = accessor.is_none()
                && !modifiers.contains(ModifierFlags::STATIC)
                && match &name {
                    PropertyName::Identifier(id) => id.text_name == "constructor",
                    PropertyName::StringLiteral(lit) => lit.raw.len() > 2 && &lit.raw[1..lit.raw.len() - 1] == "constructor",
                    _ => false,
                };
            let kind = match accessor {
                Some(kind) => kind,
                None if is_constructor => SyntaxKind::Constructor,
                None => SyntaxKind::MethodDeclaration,
            };
            let method = self.parse_method_rest(pos, kind, name, asterisk_token, modifiers);
            return match kind {
                SyntaxKind::Constructor => ClassElement::Constructor(method),
                SyntaxKind::GetAccessor => ClassElement::GetAccessor(method),
                SyntaxKind::SetAccessor => ClassElement::SetAccessor(method),
                _ => ClassElement::MethodDeclaration(method),
            };
        }

        // Field
        let initializer = self.parse_binding_initializer();
        self.parse_expected_semicolon();
        let mut data = self.finish_node(SyntaxKind::PropertyDeclaration, pos);
        data.modifier_flags = modifiers;
        ClassElement::PropertyDeclaration(PropertyDeclaration {
            data,
            name,
            initializer,
        })
    }

    fn parse_method_rest(
        &mut self,
        pos: u32,
        kind: SyntaxKind,
        name: PropertyName<'a>,
        asterisk_token: Option<Token>,
        modifiers: ModifierFlags,
    ) -> MethodDeclaration<'a> {
        let FunctionSignature { parameters, returns } = self.parse_signature();
        let body = self.parse_function_body(
            modifiers.contains(ModifierFlags::ASYNC),
            asterisk_token.is_some(),
        );
        let mut data = self.finish_node(kind, pos);
        data.modifier_flags = modifiers;
        MethodDeclaration {
            data,
            name,
            asterisk_token,
            parameters,
            returns,
            body,
        }
    }

    // ========================================================================
    // Expression parsing
    // ========================================================================

    fn parse_expression_and_alloc(&mut self) -> &'a Expression<'a> {
        let expression = self.parse_expression();
        self.arena.alloc(expression)
    }

    fn parse_assignment_expression_and_alloc(&mut self) -> &'a Expression<'a> {
        let expression = self.parse_assignment_expression();
        self.arena.alloc(expression)
    }

    fn parse_expression(&mut self) -> Expression<'a> {
        // Comma expression: a, b, c is nested Binary(left, CommaToken, right)
        let mut expr = self.parse_assignment_expression();
        while self.current_token() == SyntaxKind::CommaToken {
            let pos = expr.data().range.pos;
            let operator_token = Token::new(SyntaxKind::CommaToken, self.token_pos(), self.token_end());
            self.next_token();
            let right = self.parse_assignment_expression_and_alloc();
            let left = self.arena.alloc(expr);
            expr = Expression::Binary(BinaryExpression {
                data: self.finish_node(SyntaxKind::BinaryExpression, pos),
                left,
                operator_token,
                right,
            });
        }
        expr
    }

    fn parse_assignment_expression(&mut self) -> Expression<'a> {
        if !self.enter_nesting() {
            return Expression::Identifier(self.missing_identifier());
        }
        let expr = self.parse_assignment_expression_worker();
        self.leave_nesting();
        expr
    }

    fn parse_assignment_expression_worker(&mut self) -> Expression<'a> {
        if self.current_token() == SyntaxKind::YieldKeyword && self.in_generator {
            return self.parse_yield_expression();
        }

        let expr = self.parse_conditional_expression();
        if matches!(expr, Expression::ArrowFunction(_)) {
            return expr;
        }

        if self.current_token().is_assignment_operator() {
            let pos = expr.data().range.pos;
            let operator_token = Token::new(self.current_token(), self.token_pos(), self.token_end());
            self.next_token();
            let right = self.parse_assignment_expression_and_alloc();
            let left = self.arena.alloc(expr);
            return Expression::Binary(BinaryExpression {
                data: self.finish_node(SyntaxKind::BinaryExpression, pos),
                left,
                operator_token,
                right,
            });
        }

        expr
    }

    fn parse_conditional_expression(&mut self) -> Expression<'a> {
        let expr = self.parse_binary_expression(OperatorPrecedence::Comma);

        if self.current_token() == SyntaxKind::QuestionToken {
            let pos = expr.data().range.pos;
            self.next_token();
            let when_true = self.allowing_in(|p| p.parse_assignment_expression_and_alloc());
            self.expect_token(SyntaxKind::ColonToken);
            let when_false = self.parse_assignment_expression_and_alloc();
            let condition = self.arena.alloc(expr);
            return Expression::Conditional(ConditionalExpression {
                data: self.finish_node(SyntaxKind::ConditionalExpression, pos),
                condition,
                when_true,
                when_false,
            });
        }

        expr
    }

    fn parse_binary_expression(&mut self, min_precedence: OperatorPrecedence) -> Expression<'a> {
        let mut left = self.parse_unary_expression();

        loop {
            let operator = self.current_token();
            if operator == SyntaxKind::InKeyword && self.disallow_in {
                break;
            }
            let precedence = get_binary_operator_precedence(operator);
            if precedence == OperatorPrecedence::Invalid || precedence <= min_precedence {
                break;
            }

            let pos = left.data().range.pos;
            let operator_token = Token::new(operator, self.token_pos(), self.token_end());
            self.next_token();
            // `**` is right-associative
            let right_precedence = if operator == SyntaxKind::AsteriskAsteriskToken {
                OperatorPrecedence::Multiplicative
            } else {
                precedence
            };
            if !self.enter_nesting() {
                break;
            }
            let right = self.parse_binary_expression(right_precedence);
            self.leave_nesting();
            let left_ref = self.arena.alloc(left);
            let right_ref = self.arena.alloc(right);
            left = Expression::Binary(BinaryExpression {
                data: self.finish_node(SyntaxKind::BinaryExpression, pos),
                left: left_ref,
                operator_token,
                right: right_ref,
            });
        }

        left
    }

    fn parse_unary_operand(&mut self) -> &'a Expression<'a> {
        let operand = if self.enter_nesting() {
            let operand = self.parse_unary_expression();
            self.leave_nesting();
            operand
        } else {
            Expression::Identifier(self.missing_identifier())
        };
        self.arena.alloc(operand)
    }

    fn parse_unary_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken => {
                let operator = self.current_token();
                self.next_token();
                let operand = self.parse_unary_operand();
                Expression::PrefixUnary(PrefixUnaryExpression {
                    data: self.finish_node(SyntaxKind::PrefixUnaryExpression, pos),
                    operator,
                    operand,
                })
            }
            SyntaxKind::TypeOfKeyword => {
                self.next_token();
                let expression = self.parse_unary_operand();
                Expression::TypeOf(KeywordUnaryExpression {
                    data: self.finish_node(SyntaxKind::TypeOfExpression, pos),
                    expression,
                })
            }
            SyntaxKind::DeleteKeyword => {
                self.next_token();
                let expression = self.parse_unary_operand();
                Expression::Delete(KeywordUnaryExpression {
                    data: self.finish_node(SyntaxKind::DeleteExpression, pos),
                    expression,
                })
            }
            SyntaxKind::VoidKeyword => {
                self.next_token();
                let expression = self.parse_unary_operand();
                Expression::Void(KeywordUnaryExpression {
                    data: self.finish_node(SyntaxKind::VoidExpression, pos),
                    expression,
                })
            }
            SyntaxKind::AwaitKeyword if self.in_async => {
                self.next_token();
                let expression = self.parse_unary_operand();
                Expression::Await(KeywordUnaryExpression {
                    data: self.finish_node(SyntaxKind::AwaitExpression, pos),
                    expression,
                })
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_postfix_expression(&mut self) -> Expression<'a> {
        let expr = self.parse_left_hand_side_expression();
        if !self.has_preceding_line_break()
            && matches!(
                self.current_token(),
                SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
            )
        {
            let pos = expr.data().range.pos;
            let operator = self.current_token();
            self.next_token();
            let operand = self.arena.alloc(expr);
            return Expression::PostfixUnary(PostfixUnaryExpression {
                data: self.finish_node(SyntaxKind::PostfixUnaryExpression, pos),
                operand,
                operator,
            });
        }
        expr
    }

    fn parse_left_hand_side_expression(&mut self) -> Expression<'a> {
        let expr = if self.current_token() == SyntaxKind::NewKeyword {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        if matches!(expr, Expression::ArrowFunction(_)) {
            return expr;
        }
        self.parse_member_chain(expr, true)
    }

    /// Property accesses, element accesses, tagged templates and, when
    /// `allow_calls` is set, calls and optional chains.
    fn parse_member_chain(&mut self, mut expr: Expression<'a>, allow_calls: bool) -> Expression<'a> {
        loop {
            let pos = expr.data().range.pos;
            match self.current_token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_member_name();
                    let expression = self.arena.alloc(expr);
                    expr = Expression::PropertyAccess(PropertyAccessExpression {
                        data: self.finish_node(SyntaxKind::PropertyAccessExpression, pos),
                        expression,
                        question_dot_token: None,
                        name,
                    });
                }
                SyntaxKind::QuestionDotToken if allow_calls => {
                    let question_dot_token = self.optional_token(SyntaxKind::QuestionDotToken);
                    let expression = self.arena.alloc(expr);
                    expr = match self.current_token() {
                        SyntaxKind::OpenBracketToken => {
                            self.next_token();
                            let argument_expression = self.allowing_in(|p| p.parse_expression_and_alloc());
                            self.expect_token(SyntaxKind::CloseBracketToken);
                            let mut data = self.finish_node(SyntaxKind::ElementAccessExpression, pos);
                            data.flags |= NodeFlags::OPTIONAL_CHAIN;
                            Expression::ElementAccess(ElementAccessExpression {
                                data,
                                expression,
                                question_dot_token,
                                argument_expression,
                            })
                        }
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_argument_list();
                            let mut data = self.finish_node(SyntaxKind::CallExpression, pos);
                            data.flags |= NodeFlags::OPTIONAL_CHAIN;
                            Expression::Call(CallExpression {
                                data,
                                expression,
                                question_dot_token,
                                arguments,
                            })
                        }
                        _ => {
                            let name = self.parse_member_name();
                            let mut data = self.finish_node(SyntaxKind::PropertyAccessExpression, pos);
                            data.flags |= NodeFlags::OPTIONAL_CHAIN;
                            Expression::PropertyAccess(PropertyAccessExpression {
                                data,
                                expression,
                                question_dot_token,
                                name,
                            })
                        }
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    let argument_expression = self.allowing_in(|p| p.parse_expression_and_alloc());
                    self.expect_token(SyntaxKind::CloseBracketToken);
                    let expression = self.arena.alloc(expr);
                    expr = Expression::ElementAccess(ElementAccessExpression {
                        data: self.finish_node(SyntaxKind::ElementAccessExpression, pos),
                        expression,
                        question_dot_token: None,
                        argument_expression,
                    });
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let arguments = self.parse_argument_list();
                    let expression = self.arena.alloc(expr);
                    expr = Expression::Call(CallExpression {
                        data: self.finish_node(SyntaxKind::CallExpression, pos),
                        expression,
                        question_dot_token: None,
                        arguments,
                    });
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    let template = self.parse_template_expression();
                    let template = self.arena.alloc(template);
                    let tag = self.arena.alloc(expr);
                    expr = Expression::TaggedTemplate(TaggedTemplateExpression {
                        data: self.finish_node(SyntaxKind::TaggedTemplateExpression, pos),
                        tag,
                        template,
                    });
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_new_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::NewKeyword);
        let callee = if self.current_token() == SyntaxKind::NewKeyword {
            if !self.enter_nesting() {
                return Expression::Identifier(self.missing_identifier());
            }
            let callee = self.parse_new_expression();
            self.leave_nesting();
            callee
        } else {
            self.parse_primary_expression()
        };
        let callee = self.parse_member_chain(callee, false);
        let expression = self.arena.alloc(callee);
        let arguments = if self.current_token() == SyntaxKind::OpenParenToken {
            Some(self.parse_argument_list())
        } else {
            None
        };
        Expression::New(NewExpression {
            data: self.finish_node(SyntaxKind::NewExpression, pos),
            expression,
            arguments,
        })
    }

    fn parse_spread_or_assignment(&mut self) -> Expression<'a> {
        if self.current_token() == SyntaxKind::DotDotDotToken {
            let pos = self.token_pos();
            self.next_token();
            let expression = self.parse_assignment_expression_and_alloc();
            return Expression::Spread(SpreadElement {
                data: self.finish_node(SyntaxKind::SpreadElement, pos),
                expression,
            });
        }
        self.parse_assignment_expression()
    }

    fn parse_argument_list(&mut self) -> &'a [Expression<'a>] {
        self.expect_token(SyntaxKind::OpenParenToken);
        let args = self.allowing_in(|p| {
            let mut args = Vec::new();
            while p.current_token() != SyntaxKind::CloseParenToken
                && p.current_token() != SyntaxKind::EndOfFileToken
            {
                args.push(p.parse_spread_or_assignment());
                if p.optional_token(SyntaxKind::CommaToken).is_none() {
                    break;
                }
            }
            args
        });
        self.expect_token(SyntaxKind::CloseParenToken);
        alloc_vec_in(self.arena, args)
    }

    fn parse_keyword_expression(&mut self, kind: SyntaxKind) -> NodeData {
        let pos = self.token_pos();
        self.next_token();
        self.finish_node(kind, pos)
    }

    fn parse_string_literal(&mut self) -> StringLiteral {
        let pos = self.token_pos();
        let raw = self.scanner.token_text();
        self.next_token();
        StringLiteral {
            data: self.finish_node(SyntaxKind::StringLiteral, pos),
            raw,
        }
    }

    fn parse_numeric_literal(&mut self) -> NumericLiteral {
        let pos = self.token_pos();
        let kind = self.current_token();
        let raw = self.scanner.token_text();
        self.next_token();
        NumericLiteral {
            data: self.finish_node(kind, pos),
            raw,
        }
    }

    fn parse_primary_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::NumericLiteral => Expression::NumericLiteral(self.parse_numeric_literal()),
            SyntaxKind::BigIntLiteral => Expression::BigIntLiteral(self.parse_numeric_literal()),
            SyntaxKind::StringLiteral => Expression::StringLiteral(self.parse_string_literal()),
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                self.parse_template_expression()
            }
            SyntaxKind::TrueKeyword => Expression::TrueKeyword(self.parse_keyword_expression(SyntaxKind::TrueKeyword)),
            SyntaxKind::FalseKeyword => Expression::FalseKeyword(self.parse_keyword_expression(SyntaxKind::FalseKeyword)),
            SyntaxKind::NullKeyword => Expression::NullKeyword(self.parse_keyword_expression(SyntaxKind::NullKeyword)),
            SyntaxKind::ThisKeyword => Expression::ThisKeyword(self.parse_keyword_expression(SyntaxKind::ThisKeyword)),
            SyntaxKind::SuperKeyword => Expression::SuperKeyword(self.parse_keyword_expression(SyntaxKind::SuperKeyword)),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(pos, false),
            SyntaxKind::ClassKeyword => self.parse_class_expression(),
            SyntaxKind::PrivateIdentifier => Expression::PrivateIdentifier(self.parse_private_identifier()),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.scanner.rescan_slash_token();
                self.record_rescan();
                let raw = self.scanner.token_text();
                self.next_token();
                Expression::RegularExpressionLiteral(RegularExpressionLiteral {
                    data: self.finish_node(SyntaxKind::RegularExpressionLiteral, pos),
                    raw,
                })
            }
            SyntaxKind::Identifier if self.is_identifier_text("async") => {
                match self.try_parse_async_primary(pos) {
                    Some(expr) => expr,
                    None => Expression::Identifier(self.parse_identifier()),
                }
            }
            kind if kind.is_identifier_like() => {
                let id = self.parse_identifier();
                if self.current_token() == SyntaxKind::EqualsGreaterThanToken
                    && !self.has_preceding_line_break()
                {
                    return self.parse_arrow_function_after_identifier(pos, id, false);
                }
                Expression::Identifier(id)
            }
            _ => self.parse_missing_expression(),
        }
    }

    /// `async function`, `async (...) =>` and `async x =>`.
    fn try_parse_async_primary(&mut self, pos: u32) -> Option<Expression<'a>> {
        let (next, line_break) = self.peek();
        if line_break {
            return None;
        }
        if next == SyntaxKind::FunctionKeyword {
            self.next_token();
            return Some(self.parse_function_expression(pos, true));
        }
        let grammar: &G = &self.grammar;
        if next == SyntaxKind::OpenParenToken
            && self.scanner.look_ahead(|s| {
                s.scan();
                at_arrow_parameter_list(s, grammar)
            })
        {
            self.next_token();
            return Some(self.parse_parenthesized_arrow_function(pos, true));
        }
        if next.is_identifier_like()
            && self.scanner.look_ahead(|s| {
                s.scan();
                s.scan() == SyntaxKind::EqualsGreaterThanToken && !s.has_preceding_line_break()
            })
        {
            self.next_token();
            let id = self.parse_identifier();
            return Some(self.parse_arrow_function_after_identifier(pos, id, true));
        }
        None
    }

    fn parse_missing_expression(&mut self) -> Expression<'a> {
        self.error(&messages::EXPRESSION_EXPECTED, &[]);
        let id = self.missing_identifier();
        if self.current_token() != SyntaxKind::EndOfFileToken {
            self.next_token();
        }
        Expression::Identifier(id)
    }

    fn parse_parenthesized_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();

        // Resolve `(a: number) => a` against `(a + b)` before consuming anything.
        let grammar: &G = &self.grammar;
        if self.scanner.look_ahead(|s| at_arrow_parameter_list(s, grammar)) {
            return self.parse_parenthesized_arrow_function(pos, false);
        }

        self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.allowing_in(|p| p.parse_expression_and_alloc());
        self.expect_token(SyntaxKind::CloseParenToken);
        Expression::Parenthesized(ParenthesizedExpression {
            data: self.finish_node(SyntaxKind::ParenthesizedExpression, pos),
            expression,
        })
    }

    /// Parse `(params) => body` or `(params): label => body`.
    fn parse_parenthesized_arrow_function(&mut self, pos: u32, is_async: bool) -> Expression<'a> {
        let FunctionSignature { parameters, returns } = self.parse_signature();
        self.parse_arrow_function_rest(pos, parameters, returns, is_async)
    }

    fn parse_arrow_function_after_identifier(
        &mut self,
        pos: u32,
        id: Identifier,
        is_async: bool,
    ) -> Expression<'a> {
        let range = id.data.range;
        let parameter = ParameterDeclaration {
            data: self.node_data(SyntaxKind::Parameter, range.pos, range.end),
            dot_dot_dot_token: None,
            name: BindingName::Identifier(id),
            types: None,
            initializer: None,
        };
        let parameters = alloc_vec_in(self.arena, vec![parameter]);
        self.parse_arrow_function_rest(pos, parameters, None, is_async)
    }

    fn parse_arrow_function_rest(
        &mut self,
        pos: u32,
        parameters: &'a [ParameterDeclaration<'a>],
        returns: Option<TypeAnnotation>,
        is_async: bool,
    ) -> Expression<'a> {
        self.expect_token(SyntaxKind::EqualsGreaterThanToken);
        let body = if self.current_token() == SyntaxKind::OpenBraceToken {
            ArrowFunctionBody::Block(self.parse_function_body(is_async, false))
        } else {
            let saved = (self.in_async, self.in_generator);
            self.in_async = is_async;
            self.in_generator = false;
            let expression = self.parse_assignment_expression_and_alloc();
            (self.in_async, self.in_generator) = saved;
            ArrowFunctionBody::Expression(expression)
        };
        let mut data = self.finish_node(SyntaxKind::ArrowFunction, pos);
        data.modifier_flags = Self::function_modifiers(is_async);
        Expression::ArrowFunction(ArrowFunction {
            data,
            parameters,
            returns,
            body,
        })
    }

    fn parse_array_literal(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBracketToken);
        let elements = self.allowing_in(|p| {
            let mut elements = Vec::new();
            while p.current_token() != SyntaxKind::CloseBracketToken
                && p.current_token() != SyntaxKind::EndOfFileToken
            {
                if p.current_token() == SyntaxKind::CommaToken {
                    let epos = p.token_pos();
                    elements.push(Expression::OmittedExpression(p.node_data(
                        SyntaxKind::OmittedExpression,
                        epos,
                        epos,
                    )));
                } else {
                    elements.push(p.parse_spread_or_assignment());
                }
                if p.optional_token(SyntaxKind::CommaToken).is_none() {
                    break;
                }
            }
            elements
        });
        self.expect_token(SyntaxKind::CloseBracketToken);
        Expression::ArrayLiteral(ArrayLiteralExpression {
            data: self.finish_node(SyntaxKind::ArrayLiteralExpression, pos),
            elements: alloc_vec_in(self.arena, elements),
        })
    }

    fn parse_object_literal(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let properties = self.allowing_in(|p| {
            let mut properties = Vec::new();
            while p.current_token() != SyntaxKind::CloseBraceToken
                && p.current_token() != SyntaxKind::EndOfFileToken
            {
                properties.push(p.parse_object_literal_element());
                if p.optional_token(SyntaxKind::CommaToken).is_none() {
                    break;
                }
            }
            properties
        });
        self.expect_token(SyntaxKind::CloseBraceToken);
        Expression::ObjectLiteral(ObjectLiteralExpression {
            data: self.finish_node(SyntaxKind::ObjectLiteralExpression, pos),
            properties: alloc_vec_in(self.arena, properties),
        })
    }

    fn parse_object_literal_element(&mut self) -> ObjectLiteralElement<'a> {
        let pos = self.token_pos();

        if self.optional_token(SyntaxKind::DotDotDotToken).is_some() {
            let expression = self.parse_assignment_expression_and_alloc();
            return ObjectLiteralElement::SpreadAssignment(SpreadAssignment {
                data: self.finish_node(SyntaxKind::SpreadAssignment, pos),
                expression,
            });
        }

        let mut modifiers = ModifierFlags::NONE;
        if self.is_identifier_text("async") && self.next_starts_member_name(true) {
            self.next_token();
            modifiers |= ModifierFlags::ASYNC;
        }
        let asterisk_token = self.optional_token(SyntaxKind::AsteriskToken);
        let accessor = if asterisk_token.is_none() && modifiers.is_empty() {
            self.accessor_kind()
        } else {
            None
        };
        if accessor.is_some() {
            self.next_token();
        }

        let name = self.parse_property_name();

        if accessor.is_some()
            || asterisk_token.is_some()
            || !modifiers.is_empty()
            || self.current_token() == SyntaxKind::OpenParenToken
        {
            let kind = accessor.unwrap_or(SyntaxKind::MethodDeclaration);
            let method = self.parse_method_rest(pos, kind, name, asterisk_token, modifiers);
            return match kind {
                SyntaxKind::GetAccessor => ObjectLiteralElement::GetAccessor(method),
                SyntaxKind::SetAccessor => ObjectLiteralElement::SetAccessor(method),
                _ => ObjectLiteralElement::MethodDeclaration(method),
            };
        }

        if self.optional_token(SyntaxKind::ColonToken).is_some() {
            let initializer = self.parse_assignment_expression_and_alloc();
            return ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
                data: self.finish_node(SyntaxKind::PropertyAssignment, pos),
                name,
                initializer,
            });
        }

        // Shorthand: { x } or { x = default } in a destructuring target
        match name {
            PropertyName::Identifier(name) => {
                let object_assignment_initializer = self.parse_binding_initializer();
                ObjectLiteralElement::ShorthandPropertyAssignment(ShorthandPropertyAssignment {
                    data: self.finish_node(SyntaxKind::ShorthandPropertyAssignment, pos),
                    name,
                    object_assignment_initializer,
                })
            }
            name => {
                self.error(&messages::PROPERTY_ASSIGNMENT_EXPECTED, &[]);
                let missing = Expression::Identifier(self.missing_identifier());
                let initializer = self.arena.alloc(missing);
                ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
                    data: self.finish_node(SyntaxKind::PropertyAssignment, pos),
                    name,
                    initializer,
                })
            }
        }
    }

    fn parse_template_part(&mut self) -> TemplateLiteralPart {
        let pos = self.token_pos();
        let kind = self.current_token();
        let raw = self.scanner.token_text();
        self.next_token();
        TemplateLiteralPart {
            data: self.finish_node(kind, pos),
            raw,
        }
    }

    fn parse_template_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        if self.current_token() == SyntaxKind::NoSubstitutionTemplateLiteral {
            return Expression::NoSubstitutionTemplateLiteral(self.parse_template_part());
        }

        let head = self.parse_template_part();
        let mut spans = Vec::new();
        loop {
            let span_pos = self.token_pos();
            let expression = self.allowing_in(|p| p.parse_expression_and_alloc());
            if self.current_token() != SyntaxKind::CloseBraceToken {
                self.error(&messages::_0_EXPECTED, &["}"]);
                break;
            }
            // The `}` closing a substitution continues the template.
            self.scanner.rescan_template_token();
            self.record_rescan();
            let literal = self.parse_template_part();
            let is_tail = literal.data.kind == SyntaxKind::TemplateTail;
            spans.push(TemplateSpan {
                data: self.finish_node(SyntaxKind::TemplateSpan, span_pos),
                expression,
                literal,
            });
            if is_tail {
                break;
            }
        }
        Expression::TemplateExpression(TemplateExpression {
            data: self.finish_node(SyntaxKind::TemplateExpression, pos),
            head,
            template_spans: alloc_vec_in(self.arena, spans),
        })
    }

    fn parse_function_expression(&mut self, pos: u32, is_async: bool) -> Expression<'a> {
        self.expect_token(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.optional_token(SyntaxKind::AsteriskToken);
        let name = if self.current_token().is_identifier_like() {
            Some(self.parse_identifier())
        } else {
            None
        };
        let FunctionSignature { parameters, returns } = self.parse_signature();
        let body = self.parse_function_body(is_async, asterisk_token.is_some());
        let mut data = self.finish_node(SyntaxKind::FunctionExpression, pos);
        data.modifier_flags = Self::function_modifiers(is_async);
        Expression::FunctionExpression(FunctionExpression {
            data,
            name,
            asterisk_token,
            parameters,
            returns,
            body,
        })
    }

    fn parse_class_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::ClassKeyword);
        let name = if self.current_token().is_identifier_like() {
            Some(self.parse_identifier())
        } else {
            None
        };
        let heritage = self.parse_class_heritage();
        let body = self.parse_class_body();
        Expression::ClassExpression(ClassExpression {
            data: self.finish_node(SyntaxKind::ClassExpression, pos),
            name,
            heritage,
            body,
        })
    }

    fn parse_yield_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::YieldKeyword);
        let asterisk_token = if self.has_preceding_line_break() {
            None
        } else {
            self.optional_token(SyntaxKind::AsteriskToken)
        };
        let expression = if !self.has_preceding_line_break() && can_start_yield_operand(self.current_token()) {
            Some(self.parse_assignment_expression_and_alloc())
        } else {
            None
        };
        Expression::Yield(YieldExpression {
            data: self.finish_node(SyntaxKind::YieldExpression, pos),
            asterisk_token,
            expression,
        })
    }
}

/// With the scanner on `(`, whether the parenthesized list is followed by
/// `=>`, optionally after a `: label` return annotation. A colon followed by
/// anything but a label `grammar` reserves belongs to a conditional.
fn at_arrow_parameter_list<G: GrammarExtension>(scanner: &mut Scanner, grammar: &G) -> bool {
    let mut depth = 0u32;
    loop {
        match scanner.token() {
            SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::TemplateHead => depth += 1,
            SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken | SyntaxKind::CloseBraceToken => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
            SyntaxKind::EndOfFileToken => return false,
            _ => {}
        }
        scanner.scan();
    }
    match scanner.scan() {
        SyntaxKind::EqualsGreaterThanToken => !scanner.has_preceding_line_break(),
        SyntaxKind::ColonToken => {
            grammar.is_annotation_label(scanner.scan())
                && scanner.scan() == SyntaxKind::EqualsGreaterThanToken
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::AnnotationGrammar;
    use hintdoc_ast::type_label::TypeLabel;

    fn parse_annotated<'a>(arena: &'a Bump, source: &str) -> Result<ParsedSource<'a>, Diagnostic> {
        Parser::with_grammar(arena, "test.js", source, Arc::new(AnnotationGrammar::standard()))
            .parse_source_file()
    }

    #[test]
    fn test_node_ranges_end_at_last_token() {
        let arena = Bump::new();
        let parsed = Parser::new(&arena, "test.js", "var x = 1;   // done\n")
            .parse_source_file()
            .unwrap();
        let stmt = &parsed.file.statements[0];
        assert_eq!(stmt.range().pos, 0);
        assert_eq!(stmt.range().end, 10);
        assert_eq!(parsed.comments.len(), 1);
    }

    #[test]
    fn test_node_ids_are_unique() {
        let arena = Bump::new();
        let parsed = Parser::new(&arena, "test.js", "var a = 1; function f(b) { return b; }")
            .parse_source_file()
            .unwrap();
        let first = parsed.file.statements[0].id();
        let second = parsed.file.statements[1].id();
        assert_ne!(first, second);
        assert_ne!(first, NodeId::INVALID);
        assert_ne!(parsed.file.data.id, first);
    }

    #[test]
    fn test_declarator_annotation() {
        let arena = Bump::new();
        let parsed = parse_annotated(&arena, "var x: number = 42;").unwrap();
        let Statement::VariableStatement(stmt) = &parsed.file.statements[0] else {
            panic!("expected a variable statement");
        };
        let decl = &stmt.declaration_list.declarations[0];
        assert_eq!(decl.types.as_ref().map(|t| t.label), Some(TypeLabel::Number));
        assert!(decl.initializer.is_some());
    }

    #[test]
    fn test_annotation_range_starts_at_colon() {
        let arena = Bump::new();
        let parsed = parse_annotated(&arena, "let s: string;").unwrap();
        let Statement::VariableStatement(stmt) = &parsed.file.statements[0] else {
            panic!("expected a variable statement");
        };
        let types = stmt.declaration_list.declarations[0].types.as_ref().unwrap();
        assert_eq!(types.data.range.pos, 5);
        assert_eq!(types.data.range.end, 13);
    }

    #[test]
    fn test_missing_type_is_fatal_at_colon() {
        let arena = Bump::new();
        let err = parse_annotated(&arena, "var x: = 42;").unwrap_err();
        assert_eq!(err.code, messages::EXPECTED_A_TYPE_DECLARATION.code);
        assert_eq!(err.span, Some(TextSpan::new(5, 1)));
        assert_eq!(err.file.as_deref(), Some("test.js"));
    }

    #[test]
    fn test_base_grammar_rejects_annotation_as_syntax_error() {
        let arena = Bump::new();
        let parsed = Parser::new(&arena, "test.js", "var x: number = 1;")
            .parse_source_file()
            .unwrap();
        assert!(parsed.diagnostics.has_errors());
    }

    #[test]
    fn test_tokens_are_recorded_once() {
        let arena = Bump::new();
        let parsed = Parser::new(&arena, "test.js", "f((a) => a);").parse_source_file().unwrap();
        let kinds: Vec<SyntaxKind> = parsed.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::OpenParenToken,
                SyntaxKind::OpenParenToken,
                SyntaxKind::Identifier,
                SyntaxKind::CloseParenToken,
                SyntaxKind::EqualsGreaterThanToken,
                SyntaxKind::Identifier,
                SyntaxKind::CloseParenToken,
                SyntaxKind::SemicolonToken,
            ]
        );
    }

    #[test]
    fn test_template_rescan_replaces_token() {
        let arena = Bump::new();
        let parsed = Parser::new(&arena, "test.js", "`a${b}c`;").parse_source_file().unwrap();
        let kinds: Vec<SyntaxKind> = parsed.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::TemplateHead,
                SyntaxKind::Identifier,
                SyntaxKind::TemplateTail,
                SyntaxKind::SemicolonToken,
            ]
        );
    }

    #[test]
    fn test_in_is_not_an_operator_in_for_head() {
        let arena = Bump::new();
        let parsed = Parser::new(&arena, "test.js", "for (k in obj) {}").parse_source_file().unwrap();
        assert!(parsed.diagnostics.is_empty());
        assert!(matches!(parsed.file.statements[0], Statement::ForInStatement(_)));
    }

    #[test]
    fn test_exponent_is_right_associative() {
        let arena = Bump::new();
        let parsed = Parser::new(&arena, "test.js", "a ** b ** c;").parse_source_file().unwrap();
        let Statement::ExpressionStatement(stmt) = &parsed.file.statements[0] else {
            panic!("expected an expression statement");
        };
        let Expression::Binary(outer) = stmt.expression else {
            panic!("expected a binary expression");
        };
        assert!(matches!(outer.left, Expression::Identifier(_)));
        assert!(matches!(outer.right, Expression::Binary(_)));
    }

    /// Parse on a thread with the default 2 MiB stack.
    fn parse_on_small_stack(source: String) -> Result<(), u32> {
        std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || {
                let arena = Bump::new();
                Parser::new(&arena, "deep.js", &source)
                    .parse_source_file()
                    .map(|_| ())
                    .map_err(|d| d.code)
            })
            .unwrap()
            .join()
            .unwrap()
    }

    #[test]
    fn test_nesting_limit_is_fatal() {
        let too_deep = [
            format!("x = {}1{};", "(".repeat(1000), ")".repeat(1000)),
            format!("x = {}1;", "!".repeat(1000)),
            format!("x = {}a;", "new ".repeat(1000)),
            format!("x = 2{};", " ** 2".repeat(1000)),
            format!("var {}a{} = b;", "[".repeat(1000), "]".repeat(1000)),
            format!("x = {}{{}};", "class extends ".repeat(1000)),
            "{".repeat(1000),
        ];
        for source in too_deep {
            assert_eq!(
                parse_on_small_stack(source),
                Err(messages::MAXIMUM_NESTING_DEPTH_EXCEEDED.code)
            );
        }
    }

    #[test]
    fn test_long_chains_do_not_count_as_nesting() {
        assert_eq!(parse_on_small_stack(format!("x = 'a'{};", " + 'a'".repeat(20000))), Ok(()));
        assert_eq!(parse_on_small_stack(format!("x = a{};", ".b".repeat(50000))), Ok(()));
        assert_eq!(parse_on_small_stack(format!("x = f{};", "(1)[0]".repeat(20000))), Ok(()));
    }
}
