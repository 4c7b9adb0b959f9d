//! Parser integration tests.
//!
//! Verifies that the parser builds the expected tree shapes from annotated
//! JavaScript and that malformed annotations stop the parse.

use std::sync::Arc;

use bumpalo::Bump;
use hintdoc_ast::{
    ArrowFunctionBody, BindingName, ClassElement, Expression, ModifierFlags, ObjectLiteralElement,
    Statement, SyntaxKind, TypeLabel,
};
use hintdoc_diagnostics::{messages, Diagnostic};
use hintdoc_parser::{AnnotationGrammar, ParsedSource, Parser};

fn parse_with<'a>(arena: &'a Bump, source: &str) -> Result<ParsedSource<'a>, Diagnostic> {
    Parser::with_grammar(arena, "test.js", source, Arc::new(AnnotationGrammar::standard()))
        .parse_source_file()
}

/// Helper: parse source text and return the number of top-level statements.
fn parse(source: &str) -> usize {
    let arena = Bump::new();
    let parsed = parse_with(&arena, source).expect("parse aborted");
    assert!(
        parsed.diagnostics.is_empty(),
        "unexpected diagnostics for {source}: {:?}",
        parsed.diagnostics
    );
    parsed.file.statements.len()
}

/// Helper: assert that parsing produces the expected number of top-level statements.
fn assert_statement_count(source: &str, expected: usize) {
    assert_eq!(parse(source), expected, "source: {}", source);
}

/// Helper: the code of the fatal diagnostic for `source`.
fn fatal_code(source: &str) -> u32 {
    let arena = Bump::new();
    match parse_with(&arena, source) {
        Ok(_) => panic!("expected {source} to abort"),
        Err(diagnostic) => diagnostic.code,
    }
}

// ============================================================================
// Variable Declarations
// ============================================================================

#[test]
fn test_parse_var_declaration() {
    assert_statement_count("var z = true;", 1);
}

#[test]
fn test_parse_multiple_declarations() {
    assert_statement_count("const a = 1; let b = 2; var c = 3;", 3);
}

#[test]
fn test_parse_annotated_declarations() {
    let arena = Bump::new();
    let parsed = parse_with(&arena, "var a: number = 1, b: string, c;").unwrap();
    let Statement::VariableStatement(stmt) = &parsed.file.statements[0] else {
        panic!("expected a variable statement");
    };
    let labels: Vec<Option<TypeLabel>> = stmt
        .declaration_list
        .declarations
        .iter()
        .map(|d| d.types.as_ref().map(|t| t.label))
        .collect();
    assert_eq!(labels, vec![Some(TypeLabel::Number), Some(TypeLabel::String), None]);
}

#[test]
fn test_every_label_parses() {
    for label in ["number", "boolean", "string", "any", "void", "object", "undefined", "null"] {
        assert_statement_count(&format!("var x: {label};"), 1);
    }
}

#[test]
fn test_destructuring_declaration() {
    let arena = Bump::new();
    let parsed = parse_with(&arena, "const { a, b: [c, , ...d] = [] }: object = src;").unwrap();
    let Statement::VariableStatement(stmt) = &parsed.file.statements[0] else {
        panic!("expected a variable statement");
    };
    let decl = &stmt.declaration_list.declarations[0];
    assert!(matches!(decl.name, BindingName::ObjectBindingPattern(_)));
    assert_eq!(decl.types.as_ref().map(|t| t.label), Some(TypeLabel::Object));
}

#[test]
fn test_type_words_are_still_identifiers() {
    // Reserved labels stay usable as names outside annotation positions.
    assert_statement_count("var number = 1; string = number + 1; obj.any = null;", 3);
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_parse_function_signature() {
    let arena = Bump::new();
    let parsed =
        parse_with(&arena, "function add(a: number, b: number = 1, ...rest: any): number { return a + b; }")
            .unwrap();
    let Statement::FunctionDeclaration(func) = &parsed.file.statements[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(func.parameters.len(), 3);
    assert!(func.parameters[1].initializer.is_some());
    assert!(func.parameters[2].dot_dot_dot_token.is_some());
    assert_eq!(func.parameters[2].types.as_ref().map(|t| t.label), Some(TypeLabel::Any));
    assert_eq!(func.returns.as_ref().map(|t| t.label), Some(TypeLabel::Number));
}

#[test]
fn test_parse_async_generator_function() {
    let arena = Bump::new();
    let parsed = parse_with(&arena, "async function* gen() { yield await next(); }").unwrap();
    let Statement::FunctionDeclaration(func) = &parsed.file.statements[0] else {
        panic!("expected a function declaration");
    };
    assert!(func.asterisk_token.is_some());
    assert!(func.data.modifier_flags.contains(ModifierFlags::ASYNC));
    assert!(parsed.diagnostics.is_empty());
}

#[test]
fn test_parse_annotated_arrow_function() {
    let arena = Bump::new();
    let parsed = parse_with(&arena, "const f = (x: number): string => `${x}`;").unwrap();
    let Statement::VariableStatement(stmt) = &parsed.file.statements[0] else {
        panic!("expected a variable statement");
    };
    let Some(Expression::ArrowFunction(arrow)) = stmt.declaration_list.declarations[0].initializer else {
        panic!("expected an arrow function");
    };
    assert_eq!(arrow.parameters[0].types.as_ref().map(|t| t.label), Some(TypeLabel::Number));
    assert_eq!(arrow.returns.as_ref().map(|t| t.label), Some(TypeLabel::String));
    assert!(matches!(arrow.body, ArrowFunctionBody::Expression(_)));
}

#[test]
fn test_parenthesized_expression_is_not_an_arrow() {
    let arena = Bump::new();
    let parsed = parse_with(&arena, "var y = (a + b) * c;").unwrap();
    let Statement::VariableStatement(stmt) = &parsed.file.statements[0] else {
        panic!("expected a variable statement");
    };
    assert!(matches!(
        stmt.declaration_list.declarations[0].initializer,
        Some(Expression::Binary(_))
    ));
}

#[test]
fn test_conditional_colon_is_not_an_annotation() {
    assert_statement_count("var r = ok ? (a) : b;", 1);
    assert_statement_count("var c = true, a = 1, b = 2; var r = c ? (a) : b => 1;", 2);

    let arena = Bump::new();
    let parsed = parse_with(&arena, "var r = c ? (a) : b => 1;").unwrap();
    let Statement::VariableStatement(stmt) = &parsed.file.statements[0] else {
        panic!("expected a variable statement");
    };
    let Some(Expression::Conditional(conditional)) = stmt.declaration_list.declarations[0].initializer else {
        panic!("expected a conditional");
    };
    assert!(matches!(conditional.when_true, Expression::Parenthesized(_)));
    assert!(matches!(conditional.when_false, Expression::ArrowFunction(_)));
}

#[test]
fn test_arrow_return_annotation_needs_a_reserved_label() {
    let arena = Bump::new();
    let parsed = parse_with(&arena, "var f = (a): number => a;").unwrap();
    let Statement::VariableStatement(stmt) = &parsed.file.statements[0] else {
        panic!("expected a variable statement");
    };
    let Some(Expression::ArrowFunction(arrow)) = stmt.declaration_list.declarations[0].initializer else {
        panic!("expected an arrow function");
    };
    assert_eq!(arrow.returns.as_ref().map(|t| t.label), Some(TypeLabel::Number));

    let arena = Bump::new();
    let parsed = Parser::new(&arena, "plain.js", "var r = c ? (a) : number => 1;")
        .parse_source_file()
        .unwrap();
    assert!(parsed.diagnostics.is_empty());
}

// ============================================================================
// Classes and object literals
// ============================================================================

#[test]
fn test_parse_class_members() {
    let arena = Bump::new();
    let source = "class A extends B {\n  count = 0;\n  constructor(n: number) { super(); }\n  static make(): object { return new A(1); }\n  get size() { return 1; }\n}";
    let parsed = parse_with(&arena, source).unwrap();
    let Statement::ClassDeclaration(class) = &parsed.file.statements[0] else {
        panic!("expected a class declaration");
    };
    let members = class.body.members;
    assert_eq!(members.len(), 4);
    assert!(matches!(members[0], ClassElement::PropertyDeclaration(_)));
    assert!(matches!(members[1], ClassElement::Constructor(_)));
    let ClassElement::MethodDeclaration(make) = &members[2] else {
        panic!("expected a method");
    };
    assert!(make.data.modifier_flags.contains(ModifierFlags::STATIC));
    assert_eq!(make.returns.as_ref().map(|t| t.label), Some(TypeLabel::Object));
    assert!(matches!(members[3], ClassElement::GetAccessor(_)));
}

#[test]
fn test_parse_object_literal_methods() {
    let arena = Bump::new();
    let parsed = parse_with(&arena, "var o = { a: 1, b, m(x: number): boolean { return true; }, ...rest };").unwrap();
    let Statement::VariableStatement(stmt) = &parsed.file.statements[0] else {
        panic!("expected a variable statement");
    };
    let Some(Expression::ObjectLiteral(object)) = stmt.declaration_list.declarations[0].initializer else {
        panic!("expected an object literal");
    };
    assert_eq!(object.properties.len(), 4);
    assert!(matches!(object.properties[0], ObjectLiteralElement::PropertyAssignment(_)));
    assert!(matches!(object.properties[1], ObjectLiteralElement::ShorthandPropertyAssignment(_)));
    assert!(matches!(object.properties[2], ObjectLiteralElement::MethodDeclaration(_)));
    assert!(matches!(object.properties[3], ObjectLiteralElement::SpreadAssignment(_)));
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_parse_control_flow() {
    assert_statement_count(
        "if (a) b(); else { c(); }\nwhile (x--) {}\ndo { y++; } while (y < 3)\nfor (;;) break;\nlabel: for (const k in o) continue label;",
        5,
    );
}

#[test]
fn test_parse_switch_and_try() {
    assert_statement_count(
        "switch (v) { case 1: f(); break; default: g(); }\ntry { h(); } catch (e) { throw e; } finally { done(); }",
        2,
    );
}

#[test]
fn test_automatic_semicolon_insertion() {
    assert_statement_count("var a = 1\nvar b = 2\nreturnValue()\n", 3);
}

#[test]
fn test_regex_and_template_literals() {
    assert_statement_count("var re = /ab+c/gi; var t = tag`x${re}y`;", 2);
}

#[test]
fn test_shebang_is_kept_apart() {
    let arena = Bump::new();
    let parsed = parse_with(&arena, "#!/usr/bin/env node\nvar x = 1;").unwrap();
    assert_eq!(parsed.file.shebang.as_deref(), Some("#!/usr/bin/env node"));
    assert_eq!(parsed.file.statements.len(), 1);
}

#[test]
fn test_comments_are_collected() {
    let arena = Bump::new();
    let parsed = parse_with(&arena, "/** hello **/\nvar x = 1; // one\n/* two */").unwrap();
    assert_eq!(parsed.comments.len(), 3);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_colon_without_type_is_fatal() {
    assert_eq!(fatal_code("var x: = 1;"), messages::EXPECTED_A_TYPE_DECLARATION.code);
    assert_eq!(fatal_code("var x: foo = 1;"), messages::EXPECTED_A_TYPE_DECLARATION.code);
    assert_eq!(fatal_code("function f(a:) {}"), messages::EXPECTED_A_TYPE_DECLARATION.code);
    assert_eq!(fatal_code("function f(): {}"), messages::EXPECTED_A_TYPE_DECLARATION.code);
}

#[test]
fn test_fatal_error_reports_first_annotation_only() {
    let arena = Bump::new();
    let err = parse_with(&arena, "var a: = 1;\nvar b: = 2;").unwrap_err();
    assert_eq!(err.span.map(|s| s.start), Some(5));
}

#[test]
fn test_escaped_type_word_warns() {
    let arena = Bump::new();
    let parsed = parse_with(&arena, "var x: n\\u0075mber = 1;").unwrap();
    assert_eq!(parsed.diagnostics.len(), 1);
    assert!(!parsed.diagnostics.has_errors());
    let Statement::VariableStatement(stmt) = &parsed.file.statements[0] else {
        panic!("expected a variable statement");
    };
    assert_eq!(
        stmt.declaration_list.declarations[0].types.as_ref().map(|t| t.label),
        Some(TypeLabel::Number)
    );
}

#[test]
fn test_syntax_errors_are_recoverable() {
    let arena = Bump::new();
    let parsed = parse_with(&arena, "var = ;\nvar ok = 1;").unwrap();
    assert!(parsed.diagnostics.has_errors());
    assert!(parsed
        .file
        .statements
        .iter()
        .any(|s| s.kind() == SyntaxKind::VariableStatement));
}
