//! Tree visitor.
//!
//! `AstVisitor` has one method per node kind of interest; every default
//! implementation delegates to the matching `walk_*` function, so an override
//! can do its own work and still descend by calling the walker.

use crate::node::*;

pub trait AstVisitor<'a> {
    fn visit_source_file(&mut self, node: &SourceFile<'a>) {
        walk_source_file(self, node);
    }

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        walk_statement(self, stmt);
    }

    fn visit_variable_statement(&mut self, node: &VariableStatement<'a>) {
        walk_variable_declaration_list(self, &node.declaration_list);
    }

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration<'a>) {
        walk_variable_declaration(self, node);
    }

    fn visit_function_declaration(&mut self, node: &FunctionDeclaration<'a>) {
        walk_function_declaration(self, node);
    }

    fn visit_class_declaration(&mut self, node: &ClassDeclaration<'a>) {
        if let Some(heritage) = node.heritage {
            self.visit_expression(heritage);
        }
        self.visit_class_body(&node.body);
    }

    fn visit_class_body(&mut self, node: &ClassBody<'a>) {
        walk_class_body(self, node);
    }

    fn visit_class_element(&mut self, elem: &ClassElement<'a>) {
        walk_class_element(self, elem);
    }

    fn visit_method_declaration(&mut self, node: &MethodDeclaration<'a>) {
        walk_method_declaration(self, node);
    }

    fn visit_block(&mut self, node: &Block<'a>) {
        walk_block(self, node);
    }

    fn visit_case_clause(&mut self, clause: &CaseOrDefaultClause<'a>) {
        walk_case_clause(self, clause);
    }

    /// Called for every expression except the inner links of operator and
    /// member chains, which [`walk_expression`] walks in a loop.
    fn visit_expression(&mut self, expr: &Expression<'a>) {
        walk_expression(self, expr);
    }

    fn visit_function_expression(&mut self, node: &FunctionExpression<'a>) {
        walk_parameters(self, node.parameters);
        self.visit_block(&node.body);
    }

    fn visit_arrow_function(&mut self, node: &ArrowFunction<'a>) {
        walk_parameters(self, node.parameters);
        match &node.body {
            ArrowFunctionBody::Block(block) => self.visit_block(block),
            ArrowFunctionBody::Expression(expr) => self.visit_expression(expr),
        }
    }

    fn visit_parameter(&mut self, node: &ParameterDeclaration<'a>) {
        self.visit_binding_name(&node.name);
        if let Some(ref ty) = node.types {
            self.visit_type_annotation(ty);
        }
        if let Some(init) = node.initializer {
            self.visit_expression(init);
        }
    }

    fn visit_binding_name(&mut self, name: &BindingName<'a>) {
        walk_binding_name(self, name);
    }

    fn visit_property_name(&mut self, name: &PropertyName<'a>) {
        if let PropertyName::ComputedPropertyName(computed) = name {
            self.visit_expression(computed.expression);
        }
    }

    fn visit_type_annotation(&mut self, _node: &TypeAnnotation) {}
}

pub fn walk_source_file<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &SourceFile<'a>) {
    for stmt in node.statements.iter() {
        v.visit_statement(stmt);
    }
}

pub fn walk_statement<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, stmt: &Statement<'a>) {
    match stmt {
        Statement::VariableStatement(n) => v.visit_variable_statement(n),
        Statement::FunctionDeclaration(n) => v.visit_function_declaration(n),
        Statement::ClassDeclaration(n) => v.visit_class_declaration(n),
        Statement::Block(n) => v.visit_block(n),
        Statement::ExpressionStatement(n) => v.visit_expression(n.expression),
        Statement::IfStatement(n) => {
            v.visit_expression(n.expression);
            v.visit_statement(n.then_statement);
            if let Some(else_stmt) = n.else_statement {
                v.visit_statement(else_stmt);
            }
        }
        Statement::DoStatement(n) => {
            v.visit_statement(n.statement);
            v.visit_expression(n.expression);
        }
        Statement::WhileStatement(n) => {
            v.visit_expression(n.expression);
            v.visit_statement(n.statement);
        }
        Statement::ForStatement(n) => {
            if let Some(ref init) = n.initializer {
                walk_for_initializer(v, init);
            }
            if let Some(cond) = n.condition {
                v.visit_expression(cond);
            }
            if let Some(inc) = n.incrementor {
                v.visit_expression(inc);
            }
            v.visit_statement(n.statement);
        }
        Statement::ForInStatement(n) => {
            walk_for_initializer(v, &n.initializer);
            v.visit_expression(n.expression);
            v.visit_statement(n.statement);
        }
        Statement::ForOfStatement(n) => {
            walk_for_initializer(v, &n.initializer);
            v.visit_expression(n.expression);
            v.visit_statement(n.statement);
        }
        Statement::ReturnStatement(n) => {
            if let Some(expr) = n.expression {
                v.visit_expression(expr);
            }
        }
        Statement::WithStatement(n) => {
            v.visit_expression(n.expression);
            v.visit_statement(n.statement);
        }
        Statement::SwitchStatement(n) => {
            v.visit_expression(n.expression);
            for clause in n.case_block.clauses.iter() {
                v.visit_case_clause(clause);
            }
        }
        Statement::LabeledStatement(n) => v.visit_statement(n.statement),
        Statement::ThrowStatement(n) => v.visit_expression(n.expression),
        Statement::TryStatement(n) => {
            v.visit_block(&n.try_block);
            if let Some(ref catch) = n.catch_clause {
                if let Some(ref binding) = catch.variable_declaration {
                    v.visit_binding_name(binding);
                }
                v.visit_block(&catch.block);
            }
            if let Some(ref finally) = n.finally_block {
                v.visit_block(finally);
            }
        }
        Statement::EmptyStatement(_)
        | Statement::ContinueStatement(_)
        | Statement::BreakStatement(_)
        | Statement::DebuggerStatement(_) => {}
    }
}

pub fn walk_for_initializer<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, init: &ForInitializer<'a>) {
    match init {
        ForInitializer::VariableDeclarationList(list) => walk_variable_declaration_list(v, list),
        ForInitializer::Expression(expr) => v.visit_expression(expr),
    }
}

pub fn walk_variable_declaration_list<'a, V: AstVisitor<'a> + ?Sized>(
    v: &mut V,
    list: &VariableDeclarationList<'a>,
) {
    for decl in list.declarations.iter() {
        v.visit_variable_declaration(decl);
    }
}

pub fn walk_variable_declaration<'a, V: AstVisitor<'a> + ?Sized>(
    v: &mut V,
    node: &VariableDeclaration<'a>,
) {
    v.visit_binding_name(&node.name);
    if let Some(ref ty) = node.types {
        v.visit_type_annotation(ty);
    }
    if let Some(init) = node.initializer {
        v.visit_expression(init);
    }
}

pub fn walk_parameters<'a, V: AstVisitor<'a> + ?Sized>(
    v: &mut V,
    params: &[ParameterDeclaration<'a>],
) {
    for param in params.iter() {
        v.visit_parameter(param);
    }
}

pub fn walk_function_declaration<'a, V: AstVisitor<'a> + ?Sized>(
    v: &mut V,
    node: &FunctionDeclaration<'a>,
) {
    walk_parameters(v, node.parameters);
    if let Some(ref ret) = node.returns {
        v.visit_type_annotation(ret);
    }
    v.visit_block(&node.body);
}

pub fn walk_class_body<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &ClassBody<'a>) {
    for member in node.members.iter() {
        v.visit_class_element(member);
    }
}

pub fn walk_class_element<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, elem: &ClassElement<'a>) {
    match elem {
        ClassElement::PropertyDeclaration(n) => {
            v.visit_property_name(&n.name);
            if let Some(init) = n.initializer {
                v.visit_expression(init);
            }
        }
        ClassElement::MethodDeclaration(n)
        | ClassElement::Constructor(n)
        | ClassElement::GetAccessor(n)
        | ClassElement::SetAccessor(n) => v.visit_method_declaration(n),
        ClassElement::SemicolonClassElement(_) => {}
    }
}

pub fn walk_method_declaration<'a, V: AstVisitor<'a> + ?Sized>(
    v: &mut V,
    node: &MethodDeclaration<'a>,
) {
    v.visit_property_name(&node.name);
    walk_parameters(v, node.parameters);
    if let Some(ref ret) = node.returns {
        v.visit_type_annotation(ret);
    }
    v.visit_block(&node.body);
}

pub fn walk_block<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &Block<'a>) {
    for stmt in node.statements.iter() {
        v.visit_statement(stmt);
    }
}

pub fn walk_case_clause<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, clause: &CaseOrDefaultClause<'a>) {
    if let CaseOrDefaultClause::CaseClause(c) = clause {
        v.visit_expression(c.expression);
    }
    for stmt in clause.statements().iter() {
        v.visit_statement(stmt);
    }
}

pub fn walk_binding_name<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, name: &BindingName<'a>) {
    match name {
        BindingName::Identifier(_) => {}
        BindingName::ObjectBindingPattern(pattern) => {
            for elem in pattern.elements.iter() {
                walk_binding_element(v, elem);
            }
        }
        BindingName::ArrayBindingPattern(pattern) => {
            for elem in pattern.elements.iter() {
                if let ArrayBindingElement::BindingElement(be) = elem {
                    walk_binding_element(v, be);
                }
            }
        }
    }
}

pub fn walk_binding_element<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, elem: &BindingElement<'a>) {
    if let Some(ref prop) = elem.property_name {
        v.visit_property_name(prop);
    }
    v.visit_binding_name(&elem.name);
    if let Some(init) = elem.initializer {
        v.visit_expression(init);
    }
}

pub fn walk_expression<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, expr: &Expression<'a>) {
    match expr {
        Expression::TemplateExpression(n) => {
            for span in n.template_spans.iter() {
                v.visit_expression(span.expression);
            }
        }
        Expression::ArrayLiteral(n) => {
            for elem in n.elements.iter() {
                v.visit_expression(elem);
            }
        }
        Expression::ObjectLiteral(n) => {
            for prop in n.properties.iter() {
                match prop {
                    ObjectLiteralElement::PropertyAssignment(p) => {
                        v.visit_property_name(&p.name);
                        v.visit_expression(p.initializer);
                    }
                    ObjectLiteralElement::ShorthandPropertyAssignment(p) => {
                        if let Some(init) = p.object_assignment_initializer {
                            v.visit_expression(init);
                        }
                    }
                    ObjectLiteralElement::SpreadAssignment(p) => v.visit_expression(p.expression),
                    ObjectLiteralElement::MethodDeclaration(m)
                    | ObjectLiteralElement::GetAccessor(m)
                    | ObjectLiteralElement::SetAccessor(m) => v.visit_method_declaration(m),
                }
            }
        }
        Expression::PropertyAccess(_)
        | Expression::ElementAccess(_)
        | Expression::Call(_)
        | Expression::TaggedTemplate(_) => {
            let (base, links) = member_chain(expr);
            v.visit_expression(base);
            for link in links {
                match link {
                    Expression::ElementAccess(n) => v.visit_expression(n.argument_expression),
                    Expression::Call(n) => {
                        for arg in n.arguments.iter() {
                            v.visit_expression(arg);
                        }
                    }
                    Expression::TaggedTemplate(n) => v.visit_expression(n.template),
                    _ => {}
                }
            }
        }
        Expression::New(n) => {
            v.visit_expression(n.expression);
            if let Some(args) = n.arguments {
                for arg in args.iter() {
                    v.visit_expression(arg);
                }
            }
        }
        Expression::Parenthesized(n) => v.visit_expression(n.expression),
        Expression::FunctionExpression(n) => v.visit_function_expression(n),
        Expression::ArrowFunction(n) => v.visit_arrow_function(n),
        Expression::Delete(n) | Expression::TypeOf(n) | Expression::Void(n) | Expression::Await(n) => {
            v.visit_expression(n.expression)
        }
        Expression::PrefixUnary(n) => v.visit_expression(n.operand),
        Expression::PostfixUnary(n) => v.visit_expression(n.operand),
        Expression::Binary(n) => {
            let (first, links) = binary_chain(n);
            v.visit_expression(first);
            for link in links {
                v.visit_expression(link.right);
            }
        }
        Expression::Conditional(n) => {
            v.visit_expression(n.condition);
            v.visit_expression(n.when_true);
            v.visit_expression(n.when_false);
        }
        Expression::Yield(n) => {
            if let Some(e) = n.expression {
                v.visit_expression(e);
            }
        }
        Expression::Spread(n) => v.visit_expression(n.expression),
        Expression::ClassExpression(n) => {
            if let Some(heritage) = n.heritage {
                v.visit_expression(heritage);
            }
            v.visit_class_body(&n.body);
        }
        Expression::Identifier(_)
        | Expression::PrivateIdentifier(_)
        | Expression::StringLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::RegularExpressionLiteral(_)
        | Expression::NoSubstitutionTemplateLiteral(_)
        | Expression::OmittedExpression(_)
        | Expression::ThisKeyword(_)
        | Expression::SuperKeyword(_)
        | Expression::NullKeyword(_)
        | Expression::TrueKeyword(_)
        | Expression::FalseKeyword(_) => {}
    }
}

/// Split a left-deep run of binary expressions into its leftmost operand and
/// the links above it, innermost first.
pub fn binary_chain<'e, 'a>(node: &'e BinaryExpression<'a>) -> (&'e Expression<'a>, Vec<&'e BinaryExpression<'a>>) {
    let mut links = vec![node];
    let mut left: &'e Expression<'a> = node.left;
    while let Expression::Binary(inner) = left {
        links.push(inner);
        left = inner.left;
    }
    links.reverse();
    (left, links)
}

/// Split a run of property accesses, element accesses, calls and tagged
/// templates into the expression it starts from and its links, innermost
/// first. Anything else is its own base with no links.
pub fn member_chain<'e, 'a>(expr: &'e Expression<'a>) -> (&'e Expression<'a>, Vec<&'e Expression<'a>>) {
    let mut links = Vec::new();
    let mut base = expr;
    loop {
        let inner: &'e Expression<'a> = match base {
            Expression::PropertyAccess(n) => n.expression,
            Expression::ElementAccess(n) => n.expression,
            Expression::Call(n) => n.expression,
            Expression::TaggedTemplate(n) => n.tag,
            _ => break,
        };
        links.push(base);
        base = inner;
    }
    links.reverse();
    (base, links)
}
