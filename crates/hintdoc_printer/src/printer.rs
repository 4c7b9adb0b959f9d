//! Tree to text.
//!
//! Prints every node back as script source. Annotations are never printed.
//! Comments come from a [`CommentMap`]: for each statement list entry the
//! printer writes original leading comments, synthesized comments, the entry
//! and then its trailing comments.

use hintdoc_ast::*;
use tracing::trace;

/// Options for the printer.
#[derive(Debug, Clone)]
pub struct PrinterOptions {
    /// Indentation string.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline.
    pub trailing_newline: bool,
    /// Drop original comments. Synthesized documentation is always printed.
    pub remove_comments: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "    ".to_string(),
            new_line: "\n".to_string(),
            trailing_newline: true,
            remove_comments: false,
        }
    }
}

/// The printer converts tree nodes to text.
pub struct Printer<'c> {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
    comments: &'c CommentMap,
}

impl<'c> Printer<'c> {
    pub fn new(comments: &'c CommentMap) -> Self {
        Self::with_options(comments, PrinterOptions::default())
    }

    pub fn with_options(comments: &'c CommentMap, options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
            options,
            comments,
        }
    }

    /// Print a source file to a string.
    pub fn print_source_file(&mut self, source_file: &SourceFile<'_>) -> String {
        self.output.clear();
        self.indent_level = 0;
        if let Some(shebang) = &source_file.shebang {
            self.write(shebang);
            self.write_newline();
        }
        let has_entries = self.print_list(
            source_file.data.id,
            source_file.statements,
            false,
            "",
            Statement::id,
            Self::print_statement,
        );
        if self.options.trailing_newline
            && (has_entries || source_file.shebang.is_some())
            && !self.output.ends_with(self.options.new_line.as_str())
        {
            self.write_newline();
        }
        trace!(len = self.output.len(), "printed source file");
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Statement lists and comments
    // ========================================================================

    /// Print `items` as list entries, each with its comments, then the
    /// owner's dangling comments. Every entry but the first is preceded by a
    /// line break; the first one too when `break_first` is set. `separator`
    /// follows every entry but the last, ahead of its trailing comments.
    /// Returns whether anything was written.
    fn print_list<T>(
        &mut self,
        owner: NodeId,
        items: &[T],
        break_first: bool,
        separator: &str,
        id_of: fn(&T) -> NodeId,
        print: fn(&mut Self, &T),
    ) -> bool {
        let mut wrote = false;
        for (i, item) in items.iter().enumerate() {
            if wrote || break_first {
                self.write_newline();
                self.write_indent();
            }
            let separator = if i + 1 < items.len() { separator } else { "" };
            self.print_entry(id_of(item), separator, |p| print(p, item));
            wrote = true;
        }
        if !self.options.remove_comments {
            let comments = self.comments;
            for comment in comments.dangling(owner) {
                if wrote || break_first {
                    self.write_newline();
                    self.write_indent();
                }
                self.write_comment(comment);
                wrote = true;
            }
        }
        wrote
    }

    /// `{`, the list one level deeper, `}`.
    fn print_braced_list<T>(
        &mut self,
        owner: NodeId,
        items: &[T],
        separator: &str,
        id_of: fn(&T) -> NodeId,
        print: fn(&mut Self, &T),
    ) {
        self.write("{");
        self.increase_indent();
        let wrote = self.print_list(owner, items, true, separator, id_of, print);
        self.decrease_indent();
        if wrote {
            self.write_newline();
            self.write_indent();
        }
        self.write("}");
    }

    fn print_entry(&mut self, id: NodeId, separator: &str, print: impl FnOnce(&mut Self)) {
        let comments = self.comments;
        if !self.options.remove_comments {
            for comment in comments.leading(id) {
                self.write_comment(comment);
                self.write_newline();
                self.write_indent();
            }
        }
        self.print_synthesized(id);
        print(self);
        self.write(separator);
        if !self.options.remove_comments {
            for comment in comments.trailing(id) {
                self.write(" ");
                self.write_comment(comment);
            }
        }
    }

    fn print_synthesized(&mut self, id: NodeId) {
        let comments = self.comments;
        for comment in comments.synthesized(id) {
            self.write_comment(comment);
            self.write_newline();
            self.write_indent();
        }
    }

    fn write_comment(&mut self, comment: &CommentRecord) {
        match comment.kind {
            CommentKind::Line => {
                self.write("//");
                self.write(&comment.text);
            }
            CommentKind::Block => match doc_block_lines(&comment.text) {
                Some((first, rest)) => {
                    self.write("/*");
                    self.write(first);
                    for line in rest {
                        self.write_newline();
                        self.write_indent();
                        self.write(" ");
                        self.write(line);
                    }
                    self.write("*/");
                }
                None => {
                    self.write("/*");
                    self.write(&comment.text);
                    self.write("*/");
                }
            },
        }
    }

    // ========================================================================
    // Statement printing
    // ========================================================================

    fn print_statement(&mut self, stmt: &Statement<'_>) {
        match stmt {
            Statement::EmptyStatement(_) => self.write(";"),
            Statement::DebuggerStatement(_) => self.write("debugger;"),
            Statement::ExpressionStatement(n) => {
                self.print_expression(n.expression);
                self.write(";");
            }
            Statement::VariableStatement(n) => {
                self.print_variable_declaration_list(&n.declaration_list);
                self.write(";");
            }
            Statement::ReturnStatement(n) => {
                self.write("return");
                if let Some(expr) = n.expression {
                    self.write(" ");
                    self.print_expression(expr);
                }
                self.write(";");
            }
            Statement::IfStatement(n) => self.print_if_statement(n),
            Statement::Block(n) => self.print_block(n),
            Statement::FunctionDeclaration(n) => self.print_function_declaration(n),
            Statement::ClassDeclaration(n) => {
                self.print_class(n.name.as_ref(), n.heritage, &n.body);
            }
            Statement::ForStatement(n) => self.print_for_statement(n),
            Statement::ForInStatement(n) => {
                self.write("for (");
                self.print_for_initializer(&n.initializer);
                self.write(" in ");
                self.print_expression(n.expression);
                self.write(") ");
                self.print_embedded_statement(n.statement);
            }
            Statement::ForOfStatement(n) => {
                self.write("for ");
                if n.await_modifier.is_some() {
                    self.write("await ");
                }
                self.write("(");
                self.print_for_initializer(&n.initializer);
                self.write(" of ");
                self.print_expression(n.expression);
                self.write(") ");
                self.print_embedded_statement(n.statement);
            }
            Statement::WhileStatement(n) => {
                self.write("while (");
                self.print_expression(n.expression);
                self.write(") ");
                self.print_embedded_statement(n.statement);
            }
            Statement::DoStatement(n) => {
                self.write("do ");
                self.print_embedded_statement(n.statement);
                self.write(" while (");
                self.print_expression(n.expression);
                self.write(");");
            }
            Statement::WithStatement(n) => {
                self.write("with (");
                self.print_expression(n.expression);
                self.write(") ");
                self.print_embedded_statement(n.statement);
            }
            Statement::SwitchStatement(n) => {
                self.write("switch (");
                self.print_expression(n.expression);
                self.write(") ");
                self.print_braced_list(
                    n.case_block.data.id,
                    n.case_block.clauses,
                    "",
                    |clause: &CaseOrDefaultClause<'_>| clause.data().id,
                    Self::print_case_clause,
                );
            }
            Statement::LabeledStatement(n) => {
                self.print_identifier(&n.label);
                self.write(": ");
                self.print_embedded_statement(n.statement);
            }
            Statement::ThrowStatement(n) => {
                self.write("throw ");
                self.print_expression(n.expression);
                self.write(";");
            }
            Statement::TryStatement(n) => self.print_try_statement(n),
            Statement::BreakStatement(n) => {
                self.write("break");
                if let Some(label) = &n.label {
                    self.write(" ");
                    self.print_identifier(label);
                }
                self.write(";");
            }
            Statement::ContinueStatement(n) => {
                self.write("continue");
                if let Some(label) = &n.label {
                    self.write(" ");
                    self.print_identifier(label);
                }
                self.write(";");
            }
        }
    }

    /// The body of `if`, a loop, `with` or a label. One carrying
    /// documentation is printed inside a block where the documentation can
    /// lead it.
    fn print_embedded_statement(&mut self, stmt: &Statement<'_>) {
        if matches!(stmt, Statement::Block(_)) || self.comments.synthesized(stmt.id()).is_empty() {
            self.print_entry(stmt.id(), "", |p| p.print_statement(stmt));
            self.break_after_line_comment(stmt.id());
            return;
        }
        self.print_braced_list(stmt.id(), std::slice::from_ref(stmt), "", Statement::id, Self::print_statement);
    }

    /// A trailing line comment runs to the end of its line; whatever follows
    /// starts on the next one.
    fn break_after_line_comment(&mut self, id: NodeId) {
        if self.options.remove_comments {
            return;
        }
        let comments = self.comments;
        if comments.trailing(id).last().is_some_and(|c| c.kind == CommentKind::Line) {
            self.write_newline();
            self.write_indent();
        }
    }

    fn print_if_statement(&mut self, node: &IfStatement<'_>) {
        self.write("if (");
        self.print_expression(node.expression);
        self.write(") ");
        self.print_embedded_statement(node.then_statement);
        if let Some(else_stmt) = node.else_statement {
            self.write(" else ");
            self.print_embedded_statement(else_stmt);
        }
    }

    fn print_block(&mut self, node: &Block<'_>) {
        self.print_braced_list(node.data.id, node.statements, "", Statement::id, Self::print_statement);
    }

    fn print_function_declaration(&mut self, node: &FunctionDeclaration<'_>) {
        if node.data.modifier_flags.contains(ModifierFlags::ASYNC) {
            self.write("async ");
        }
        self.write("function");
        if node.asterisk_token.is_some() {
            self.write("*");
        }
        if let Some(name) = &node.name {
            self.write(" ");
            self.print_identifier(name);
        }
        self.write("(");
        self.print_parameters(node.parameters);
        self.write(") ");
        self.print_block(&node.body);
    }

    fn print_class(&mut self, name: Option<&Identifier>, heritage: Option<&Expression<'_>>, body: &ClassBody<'_>) {
        self.write("class");
        if let Some(name) = name {
            self.write(" ");
            self.print_identifier(name);
        }
        if let Some(heritage) = heritage {
            self.write(" extends ");
            self.print_expression(heritage);
        }
        self.write(" ");
        self.print_braced_list(body.data.id, body.members, "", ClassElement::id, Self::print_class_element);
    }

    fn print_class_element(&mut self, elem: &ClassElement<'_>) {
        match elem {
            ClassElement::PropertyDeclaration(p) => {
                if p.data.modifier_flags.contains(ModifierFlags::STATIC) {
                    self.write("static ");
                }
                self.print_property_name(&p.name);
                if let Some(init) = p.initializer {
                    self.write(" = ");
                    self.print_expression(init);
                }
                self.write(";");
            }
            ClassElement::MethodDeclaration(m) | ClassElement::Constructor(m) => {
                self.print_method(m, None);
            }
            ClassElement::GetAccessor(m) => self.print_method(m, Some("get ")),
            ClassElement::SetAccessor(m) => self.print_method(m, Some("set ")),
            ClassElement::SemicolonClassElement(_) => self.write(";"),
        }
    }

    /// A class or object-literal method, constructor or accessor.
    fn print_method(&mut self, node: &MethodDeclaration<'_>, accessor: Option<&str>) {
        let flags = node.data.modifier_flags;
        if flags.contains(ModifierFlags::STATIC) {
            self.write("static ");
        }
        if flags.contains(ModifierFlags::ASYNC) {
            self.write("async ");
        }
        if let Some(accessor) = accessor {
            self.write(accessor);
        }
        if node.asterisk_token.is_some() {
            self.write("*");
        }
        self.print_property_name(&node.name);
        self.write("(");
        self.print_parameters(node.parameters);
        self.write(") ");
        self.print_block(&node.body);
    }

    fn print_for_statement(&mut self, node: &ForStatement<'_>) {
        self.write("for (");
        if let Some(init) = &node.initializer {
            self.print_for_initializer(init);
        }
        self.write(";");
        if let Some(cond) = node.condition {
            self.write(" ");
            self.print_expression(cond);
        }
        self.write(";");
        if let Some(incr) = node.incrementor {
            self.write(" ");
            self.print_expression(incr);
        }
        self.write(") ");
        self.print_embedded_statement(node.statement);
    }

    fn print_for_initializer(&mut self, init: &ForInitializer<'_>) {
        match init {
            ForInitializer::VariableDeclarationList(list) => self.print_variable_declaration_list(list),
            ForInitializer::Expression(expr) => self.print_expression(expr),
        }
    }

    fn print_variable_declaration_list(&mut self, list: &VariableDeclarationList<'_>) {
        let keyword = if list.data.flags.contains(NodeFlags::CONST) {
            "const "
        } else if list.data.flags.contains(NodeFlags::LET) {
            "let "
        } else {
            "var "
        };
        self.write(keyword);
        for (i, decl) in list.declarations.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_binding_name(&decl.name);
            if let Some(init) = decl.initializer {
                self.write(" = ");
                self.print_expression(init);
            }
        }
    }

    fn print_case_clause(&mut self, clause: &CaseOrDefaultClause<'_>) {
        match clause {
            CaseOrDefaultClause::CaseClause(c) => {
                self.write("case ");
                self.print_expression(c.expression);
                self.write(":");
            }
            CaseOrDefaultClause::DefaultClause(_) => self.write("default:"),
        }
        self.increase_indent();
        self.print_list(clause.data().id, clause.statements(), true, "", Statement::id, Self::print_statement);
        self.decrease_indent();
    }

    fn print_try_statement(&mut self, node: &TryStatement<'_>) {
        self.write("try ");
        self.print_block(&node.try_block);
        if let Some(catch) = &node.catch_clause {
            self.write(" catch ");
            if let Some(binding) = &catch.variable_declaration {
                self.write("(");
                self.print_binding_name(binding);
                self.write(") ");
            }
            self.print_block(&catch.block);
        }
        if let Some(finally) = &node.finally_block {
            self.write(" finally ");
            self.print_block(finally);
        }
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    /// An expression with the comments attached to it inside its statement.
    fn print_expression(&mut self, expr: &Expression<'_>) {
        let id = expr.data().id;
        if self.options.remove_comments {
            self.print_bare_expression(expr);
            return;
        }
        let comments = self.comments;
        for comment in comments.leading(id) {
            self.write_comment(comment);
            if comment.kind == CommentKind::Line {
                self.write_newline();
                self.write_indent();
            } else {
                self.write(" ");
            }
        }
        self.print_bare_expression(expr);
        for comment in comments.trailing(id) {
            self.write(" ");
            self.write_comment(comment);
        }
        self.break_after_line_comment(id);
    }

    fn print_bare_expression(&mut self, expr: &Expression<'_>) {
        match expr {
            Expression::Identifier(id) | Expression::PrivateIdentifier(id) => self.print_identifier(id),
            Expression::StringLiteral(lit) => self.write(&lit.raw),
            Expression::NumericLiteral(lit) | Expression::BigIntLiteral(lit) => self.write(&lit.raw),
            Expression::RegularExpressionLiteral(lit) => self.write(&lit.raw),
            Expression::NoSubstitutionTemplateLiteral(part) => self.write(&part.raw),
            Expression::TemplateExpression(n) => {
                self.write(&n.head.raw);
                for span in n.template_spans.iter() {
                    self.print_expression(span.expression);
                    self.write(&span.literal.raw);
                }
            }
            Expression::ThisKeyword(_) => self.write("this"),
            Expression::SuperKeyword(_) => self.write("super"),
            Expression::NullKeyword(_) => self.write("null"),
            Expression::TrueKeyword(_) => self.write("true"),
            Expression::FalseKeyword(_) => self.write("false"),
            Expression::Binary(n) => {
                let (first, links) = visitor::binary_chain(n);
                self.print_expression(first);
                for link in links {
                    let kind = link.operator_token.data.kind;
                    if kind == SyntaxKind::CommaToken {
                        self.write(", ");
                    } else {
                        self.write(" ");
                        self.write(operator_text(kind));
                        self.write(" ");
                    }
                    self.print_expression(link.right);
                }
            }
            Expression::PrefixUnary(n) => {
                let op = operator_text(n.operator);
                self.write(op);
                if needs_space_after_prefix(op, n.operand) {
                    self.write(" ");
                }
                self.print_expression(n.operand);
            }
            Expression::PostfixUnary(n) => {
                self.print_expression(n.operand);
                self.write(operator_text(n.operator));
            }
            Expression::New(n) => {
                self.write("new ");
                self.print_expression(n.expression);
                if let Some(args) = n.arguments {
                    self.write("(");
                    self.print_expression_list(args);
                    self.write(")");
                }
            }
            Expression::PropertyAccess(_)
            | Expression::ElementAccess(_)
            | Expression::Call(_)
            | Expression::TaggedTemplate(_) => {
                let (base, links) = visitor::member_chain(expr);
                self.print_expression(base);
                for link in links {
                    self.print_member_link(link);
                }
            }
            Expression::Parenthesized(n) => {
                self.write("(");
                self.print_expression(n.expression);
                self.write(")");
            }
            Expression::Conditional(n) => {
                self.print_expression(n.condition);
                self.write(" ? ");
                self.print_expression(n.when_true);
                self.write(" : ");
                self.print_expression(n.when_false);
            }
            Expression::ArrowFunction(n) => {
                if n.data.modifier_flags.contains(ModifierFlags::ASYNC) {
                    self.write("async ");
                }
                self.write("(");
                self.print_parameters(n.parameters);
                self.write(") => ");
                match &n.body {
                    ArrowFunctionBody::Block(block) => self.print_block(block),
                    ArrowFunctionBody::Expression(expr) => self.print_expression(expr),
                }
            }
            Expression::FunctionExpression(n) => {
                if n.data.modifier_flags.contains(ModifierFlags::ASYNC) {
                    self.write("async ");
                }
                self.write("function");
                if n.asterisk_token.is_some() {
                    self.write("*");
                }
                if let Some(name) = &n.name {
                    self.write(" ");
                    self.print_identifier(name);
                }
                self.write("(");
                self.print_parameters(n.parameters);
                self.write(") ");
                self.print_block(&n.body);
            }
            Expression::ClassExpression(n) => self.print_class(n.name.as_ref(), n.heritage, &n.body),
            Expression::ArrayLiteral(n) => {
                self.write("[");
                self.print_expression_list(n.elements);
                if matches!(n.elements.last(), Some(Expression::OmittedExpression(_))) {
                    self.write(",");
                }
                self.write("]");
            }
            Expression::ObjectLiteral(n) => self.print_object_literal(n),
            Expression::Spread(n) => {
                self.write("...");
                self.print_expression(n.expression);
            }
            Expression::Await(n) => {
                self.write("await ");
                self.print_expression(n.expression);
            }
            Expression::TypeOf(n) => {
                self.write("typeof ");
                self.print_expression(n.expression);
            }
            Expression::Delete(n) => {
                self.write("delete ");
                self.print_expression(n.expression);
            }
            Expression::Void(n) => {
                self.write("void ");
                self.print_expression(n.expression);
            }
            Expression::Yield(n) => {
                self.write("yield");
                if n.asterisk_token.is_some() {
                    self.write("*");
                }
                if let Some(expr) = n.expression {
                    self.write(" ");
                    self.print_expression(expr);
                }
            }
            Expression::OmittedExpression(_) => {}
        }
    }

    /// What one link of a member chain adds after the expression it applies to.
    fn print_member_link(&mut self, link: &Expression<'_>) {
        match link {
            Expression::PropertyAccess(n) => {
                self.write(if n.question_dot_token.is_some() { "?." } else { "." });
                self.print_identifier(&n.name);
            }
            Expression::ElementAccess(n) => {
                if n.question_dot_token.is_some() {
                    self.write("?.");
                }
                self.write("[");
                self.print_expression(n.argument_expression);
                self.write("]");
            }
            Expression::Call(n) => {
                if n.question_dot_token.is_some() {
                    self.write("?.");
                }
                self.write("(");
                self.print_expression_list(n.arguments);
                self.write(")");
            }
            Expression::TaggedTemplate(n) => self.print_expression(n.template),
            _ => {}
        }
    }

    fn print_expression_list(&mut self, exprs: &[Expression<'_>]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_expression(expr);
        }
    }

    fn print_object_literal(&mut self, node: &ObjectLiteralExpression<'_>) {
        self.print_braced_list(
            node.data.id,
            node.properties,
            ",",
            |prop: &ObjectLiteralElement<'_>| prop.data().id,
            Self::print_object_literal_element,
        );
    }

    fn print_object_literal_element(&mut self, prop: &ObjectLiteralElement<'_>) {
        match prop {
            ObjectLiteralElement::PropertyAssignment(p) => {
                self.print_property_name(&p.name);
                self.write(": ");
                self.print_expression(p.initializer);
            }
            ObjectLiteralElement::ShorthandPropertyAssignment(p) => {
                self.print_identifier(&p.name);
                if let Some(init) = p.object_assignment_initializer {
                    self.write(" = ");
                    self.print_expression(init);
                }
            }
            ObjectLiteralElement::SpreadAssignment(p) => {
                self.write("...");
                self.print_expression(p.expression);
            }
            ObjectLiteralElement::MethodDeclaration(m) => self.print_method(m, None),
            ObjectLiteralElement::GetAccessor(m) => self.print_method(m, Some("get ")),
            ObjectLiteralElement::SetAccessor(m) => self.print_method(m, Some("set ")),
        }
    }

    // ========================================================================
    // Helper printing functions
    // ========================================================================

    fn print_identifier(&mut self, id: &Identifier) {
        self.write(&id.text_name);
    }

    fn print_property_name(&mut self, name: &PropertyName<'_>) {
        match name {
            PropertyName::Identifier(id) | PropertyName::PrivateIdentifier(id) => self.print_identifier(id),
            PropertyName::StringLiteral(lit) => self.write(&lit.raw),
            PropertyName::NumericLiteral(lit) => self.write(&lit.raw),
            PropertyName::ComputedPropertyName(c) => {
                self.write("[");
                self.print_expression(c.expression);
                self.write("]");
            }
        }
    }

    fn print_binding_name(&mut self, name: &BindingName<'_>) {
        match name {
            BindingName::Identifier(id) => self.print_identifier(id),
            BindingName::ObjectBindingPattern(pattern) => {
                if pattern.elements.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                for (i, elem) in pattern.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_binding_element(elem);
                }
                self.write(" }");
            }
            BindingName::ArrayBindingPattern(pattern) => {
                self.write("[");
                for (i, elem) in pattern.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let ArrayBindingElement::BindingElement(elem) = elem {
                        self.print_binding_element(elem);
                    }
                }
                if matches!(pattern.elements.last(), Some(ArrayBindingElement::OmittedExpression(_))) {
                    self.write(",");
                }
                self.write("]");
            }
        }
    }

    fn print_binding_element(&mut self, elem: &BindingElement<'_>) {
        if elem.dot_dot_dot_token.is_some() {
            self.write("...");
        }
        if let Some(property_name) = &elem.property_name {
            self.print_property_name(property_name);
            self.write(": ");
        }
        self.print_binding_name(&elem.name);
        if let Some(init) = elem.initializer {
            self.write(" = ");
            self.print_expression(init);
        }
    }

    fn print_parameters(&mut self, params: &[ParameterDeclaration<'_>]) {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if param.dot_dot_dot_token.is_some() {
                self.write("...");
            }
            self.print_binding_name(&param.name);
            if let Some(init) = param.initializer {
                self.write(" = ");
                self.print_expression(init);
            }
        }
    }

    // ========================================================================
    // Core write helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

fn operator_text(kind: SyntaxKind) -> &'static str {
    kind.token_text().unwrap_or_default()
}

/// `- -x`, `+ ++x`: keep two prefix operators from fusing into one token.
fn needs_space_after_prefix(op: &str, operand: &Expression<'_>) -> bool {
    let Expression::PrefixUnary(inner) = operand else {
        return false;
    };
    let inner = operator_text(inner.operator);
    matches!((op, inner.bytes().next()), ("+", Some(b'+')) | ("-", Some(b'-')))
}

/// Splits a `/** ... */` comment body whose continuation lines all start with
/// `*` (the last may be blank) into its first line and the trimmed
/// continuation lines, so they can be re-indented. `None` for anything else.
fn doc_block_lines(text: &str) -> Option<(&str, Vec<&str>)> {
    if !text.starts_with('*') || !text.contains('\n') {
        return None;
    }
    let mut lines = text.split('\n');
    let first = lines.next()?.trim_end();
    let rest: Vec<&str> = lines.map(str::trim).collect();
    let (last, middle) = rest.split_last()?;
    let starred = |line: &&str| line.starts_with('*');
    if middle.iter().all(starred) && (last.is_empty() || starred(last)) {
        Some((first, rest))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use hintdoc_parser::Parser;

    fn print(source: &str) -> String {
        print_with(source, PrinterOptions::default())
    }

    fn print_with(source: &str, options: PrinterOptions) -> String {
        let arena = Bump::new();
        let parsed = Parser::new(&arena, "test.js", source).parse_source_file().unwrap();
        assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
        let mut comments = CommentMap::new();
        crate::attach_comments(&parsed.file, &parsed.comments, &parsed.tokens, &mut comments);
        Printer::with_options(&comments, options).print_source_file(&parsed.file)
    }

    #[test]
    fn test_doc_block_lines() {
        let (first, rest) = doc_block_lines("*\n   * a\n   ").unwrap();
        assert_eq!(first, "*");
        assert_eq!(rest, vec!["* a", ""]);
        assert!(doc_block_lines("* one line *").is_none());
        assert!(doc_block_lines("*\n plain\n").is_none());
        assert!(doc_block_lines(" not doc\n * x\n").is_none());
    }

    #[test]
    fn test_operator_text() {
        assert_eq!(operator_text(SyntaxKind::PlusToken), "+");
        assert_eq!(operator_text(SyntaxKind::InstanceOfKeyword), "instanceof");
        assert_eq!(operator_text(SyntaxKind::GreaterThanGreaterThanGreaterThanToken), ">>>");
    }

    #[test]
    fn test_statements() {
        assert_eq!(print("var x = 1, y;"), "var x = 1, y;\n");
        assert_eq!(print("let a = b ? c : d"), "let a = b ? c : d;\n");
        assert_eq!(print("if (a) b(); else c();"), "if (a) b(); else c();\n");
        assert_eq!(print("do x++; while (x < 3);"), "do x++; while (x < 3);\n");
        assert_eq!(print("for (;;) {}"), "for (;;) {}\n");
    }

    #[test]
    fn test_block_indentation() {
        assert_eq!(
            print("function f(a, ...b) { if (a) { return b; } }"),
            "function f(a, ...b) {\n    if (a) {\n        return b;\n    }\n}\n"
        );
    }

    #[test]
    fn test_prefix_operators_do_not_fuse() {
        assert_eq!(print("a = - -b;"), "a = - -b;\n");
        assert_eq!(print("a = -b;"), "a = -b;\n");
        assert_eq!(print("a = !!b;"), "a = !!b;\n");
    }

    #[test]
    fn test_trailing_array_hole() {
        assert_eq!(print("x = [a, ,];"), "x = [a, ,];\n");
        assert_eq!(print("var [, b] = c;"), "var [, b] = c;\n");
    }

    #[test]
    fn test_comments_keep_their_places() {
        assert_eq!(
            print("// lead\nvar x = 1; // trail\n/* end */"),
            "// lead\nvar x = 1; // trail\n/* end */\n"
        );
    }

    #[test]
    fn test_comments_inside_statements_stay_inside() {
        for (source, expected) in [
            ("x = a /* inner */ + b;", "x = a /* inner */ + b;\n"),
            ("var x = /* one */ 1;", "var x = /* one */ 1;\n"),
            ("f(a, // first\n  b);", "f(a, // first\nb);\n"),
            ("if (a) b(); else // else\n  c();", "if (a) b(); else // else\nc();\n"),
            ("if (a) b(); /* then */ else c();", "if (a) b(); /* then */ else c();\n"),
            ("if (a) b(); // then\nelse c();", "if (a) b(); // then\n else c();\n"),
            ("do /* body */ b(); while (a);", "do /* body */\nb(); while (a);\n"),
        ] {
            let once = print(source);
            assert_eq!(once, expected, "source: {source:?}");
            assert_eq!(print(&once), once, "second pass differs for {source:?}");
        }
    }

    #[test]
    fn test_long_chains_print_in_a_loop() {
        let source = format!("x = a{} + 1{};", ".b".repeat(20000), " + 1".repeat(20000));
        let printed = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || print(&source))
            .unwrap()
            .join()
            .unwrap();
        assert!(printed.starts_with("x = a.b.b"));
        assert!(printed.ends_with(" + 1 + 1;\n"));
    }

    #[test]
    fn test_doc_comment_reindented_in_block() {
        assert_eq!(
            print("function f() {\n/**\n * doc\n */\nreturn 1;\n}"),
            "function f() {\n    /**\n     * doc\n     */\n    return 1;\n}\n"
        );
    }

    #[test]
    fn test_remove_comments() {
        let options = PrinterOptions {
            remove_comments: true,
            ..PrinterOptions::default()
        };
        assert_eq!(print_with("// gone\nvar x = 1; // gone too", options), "var x = 1;\n");
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(print(""), "");
    }
}
