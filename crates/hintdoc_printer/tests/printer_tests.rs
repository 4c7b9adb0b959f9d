//! Rendering with attached and synthesized comments.

use std::sync::Arc;

use bumpalo::Bump;
use hintdoc_ast::CommentMap;
use hintdoc_jsdoc::synthesize_docs;
use hintdoc_parser::{AnnotationGrammar, Parser};
use hintdoc_printer::{attach_comments, Printer, PrinterOptions};

fn render_with(source: &str, options: PrinterOptions) -> String {
    let arena = Bump::new();
    let parsed = Parser::with_grammar(&arena, "test.js", source, Arc::new(AnnotationGrammar::standard()))
        .parse_source_file()
        .unwrap();
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    let mut comments = CommentMap::new();
    attach_comments(&parsed.file, &parsed.comments, &parsed.tokens, &mut comments);
    synthesize_docs(&parsed.file, &mut comments).unwrap();
    Printer::with_options(&comments, options).print_source_file(&parsed.file)
}

fn render(source: &str) -> String {
    render_with(source, PrinterOptions::default())
}

fn assert_stable(source: &str) {
    let once = render(source);
    let twice = render(&once);
    assert_eq!(once, twice, "second render differs for {source:?}");
}

#[test]
fn test_variable_annotation() {
    assert_eq!(
        render("var x: number = 42;"),
        "/**\n * @type {number}\n */\nvar x = 42;\n"
    );
}

#[test]
fn test_synthesized_after_original_leading() {
    assert_eq!(
        render("/** hello **/\nvar x: number = 42;"),
        "/** hello **/\n/**\n * @type {number}\n */\nvar x = 42;\n"
    );
}

#[test]
fn test_trailing_comment_stays_on_line() {
    assert_eq!(
        render("var x: number = 42; // answer"),
        "/**\n * @type {number}\n */\nvar x = 42; // answer\n"
    );
}

#[test]
fn test_function_signature() {
    assert_eq!(
        render("function add(a: number, b: number): number { return a + b; }"),
        "/**\n * @param {number} a\n * @param {number} b\n * @return {number}\n */\n\
         function add(a, b) {\n    return a + b;\n}\n"
    );
}

#[test]
fn test_class_method_is_indented() {
    assert_eq!(
        render("class A {\n  m(x: string): boolean { return true; }\n}"),
        "class A {\n    /**\n     * @param {string} x\n     * @return {boolean}\n     */\n    m(x) {\n        return true;\n    }\n}\n"
    );
}

#[test]
fn test_object_literal_method() {
    assert_eq!(
        render("var o = { f(a: number) { return a; }, b: 1 };"),
        "var o = {\n    /**\n     * @param {number} a\n     */\n    f(a) {\n        return a;\n    },\n    b: 1\n};\n"
    );
}

#[test]
fn test_embedded_declaration_gets_a_block() {
    assert_eq!(
        render("if (a) var x: any = 1;"),
        "if (a) {\n    /**\n     * @type {*}\n     */\n    var x = 1;\n}\n"
    );
}

#[test]
fn test_unannotated_source_gains_no_tags() {
    let out = render("var a = 1;\nfunction f(b) { return b; }");
    assert!(!out.contains('@'));
    assert_eq!(out, "var a = 1;\nfunction f(b) {\n    return b;\n}\n");
}

#[test]
fn test_expression_annotations_are_erased() {
    assert_eq!(
        render("var f = (a: number): string => String(a);"),
        "var f = (a) => String(a);\n"
    );
}

#[test]
fn test_remove_comments_keeps_documentation() {
    let options = PrinterOptions {
        remove_comments: true,
        ..PrinterOptions::default()
    };
    assert_eq!(
        render_with("// note\nlet s: string = 'a'; // trailing", options),
        "/**\n * @type {string}\n */\nlet s = 'a';\n"
    );
}

#[test]
fn test_crlf_and_two_space_indent() {
    let options = PrinterOptions {
        indent_str: "  ".to_string(),
        new_line: "\r\n".to_string(),
        ..PrinterOptions::default()
    };
    assert_eq!(
        render_with("function f() { const n: null = null; }", options),
        "function f() {\r\n  /**\r\n   * @type {null}\r\n   */\r\n  const n = null;\r\n}\r\n"
    );
}

#[test]
fn test_shebang_is_kept() {
    assert_eq!(render("#!/usr/bin/env node\nrun();"), "#!/usr/bin/env node\nrun();\n");
}

#[test]
fn test_second_render_is_unchanged() {
    for source in [
        "var x: number = 42; // answer",
        "/** hello **/\nvar x: number = 42;",
        "function f(a: number, ...rest: any): boolean {\n  // inside\n  return true;\n}",
        "class A {\n  // member\n  static m({ a }: object) {}\n  get v() { return 1; }\n}",
        "var o = {\n  // first\n  a: 1, // after a\n  m(x: string) {}\n};",
        "switch (v) {\n  // one\n  case 1:\n    a(); // call\n    break;\n  default:\n}",
        "if (a) var x: any = 1;\nelse { /* empty */ }",
        "for (let i: number = 0; i < 3; i++) { log(`item ${i}`); }",
        "try { risky(); } catch (e) { /* ignore */ } finally { done(); }",
        "/*\n   not a doc\n     block\n*/\nx = /ab+c/gi.test(s);",
    ] {
        assert_stable(source);
    }
}
