//! The documentation walker.
//!
//! Visits every statement list in a file, nested bodies included, and records
//! a synthesized block comment for:
//! - a variable statement whose first declarator is annotated (`@type`)
//! - a function declaration, class method or object-literal method with at
//!   least one annotated parameter or a return annotation (`@param`, `@return`)
//!
//! The tree is never modified. The first label the documentation dialect
//! cannot express stops the walk with a fatal diagnostic.

use hintdoc_ast::visitor::{self, AstVisitor};
use hintdoc_ast::{
    BindingName, CommentMap, FunctionDeclaration, MethodDeclaration, NodeId, ParameterDeclaration,
    SourceFile, Statement, TypeAnnotation, VariableStatement,
};
use hintdoc_diagnostics::{messages, Diagnostic};
use tracing::{debug, trace};

use crate::doc_block::{DocBlock, DocTag};
use crate::mapping::jsdoc_type_name;

/// Walks a file and writes synthesized documentation into a [`CommentMap`].
pub struct DocSynthesizer<'m> {
    comments: &'m mut CommentMap,
    file_name: String,
    documented: usize,
    error: Option<Diagnostic>,
}

impl<'m> DocSynthesizer<'m> {
    pub fn new(file_name: &str, comments: &'m mut CommentMap) -> Self {
        Self {
            comments,
            file_name: file_name.to_string(),
            documented: 0,
            error: None,
        }
    }

    /// Walk `file`. Returns the number of comments synthesized.
    pub fn run(mut self, file: &SourceFile<'_>) -> Result<usize, Diagnostic> {
        self.visit_source_file(file);
        match self.error {
            Some(diagnostic) => Err(diagnostic),
            None => Ok(self.documented),
        }
    }

    fn type_name(&mut self, annotation: &TypeAnnotation) -> Option<&'static str> {
        match jsdoc_type_name(annotation.label) {
            Ok(name) => Some(name),
            Err(unsupported) => {
                if self.error.is_none() {
                    self.error = Some(Diagnostic::with_location(
                        self.file_name.clone(),
                        annotation.data.range.to_span(),
                        &messages::NO_REPRESENTATION_FOR_0,
                        &[unsupported.label.as_str()],
                    ));
                }
                None
            }
        }
    }

    fn attach(&mut self, id: NodeId, block: DocBlock) {
        trace!(node = id.0, tags = block.tags().len(), "synthesized doc block");
        self.comments.add_synthesized(id, block.into_comment());
        self.documented += 1;
    }

    /// Tags for a parameter list and return annotation, or `None` if a label
    /// was rejected.
    fn signature_block(
        &mut self,
        parameters: &[ParameterDeclaration<'_>],
        returns: Option<&TypeAnnotation>,
    ) -> Option<DocBlock> {
        let mut block = DocBlock::new();
        for (index, parameter) in parameters.iter().enumerate() {
            let Some(annotation) = &parameter.types else {
                continue;
            };
            let type_name = self.type_name(annotation)?;
            block.push(DocTag::Param {
                type_name,
                name: parameter_name(parameter, index),
                rest: parameter.dot_dot_dot_token.is_some(),
            });
        }
        if let Some(annotation) = returns {
            block.push(DocTag::Return(self.type_name(annotation)?));
        }
        Some(block)
    }

    fn document_signature(
        &mut self,
        id: NodeId,
        parameters: &[ParameterDeclaration<'_>],
        returns: Option<&TypeAnnotation>,
    ) {
        if let Some(block) = self.signature_block(parameters, returns) {
            if !block.is_empty() {
                self.attach(id, block);
            }
        }
    }
}

/// The name a `@param` line uses. Destructured parameters have none, so
/// they are named by position.
fn parameter_name(parameter: &ParameterDeclaration<'_>, index: usize) -> String {
    match &parameter.name {
        BindingName::Identifier(id) => id.text_name.clone(),
        _ => format!("param{index}"),
    }
}

impl<'a, 'm> AstVisitor<'a> for DocSynthesizer<'m> {
    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        if self.error.is_some() {
            return;
        }
        visitor::walk_statement(self, stmt);
    }

    fn visit_variable_statement(&mut self, node: &VariableStatement<'a>) {
        // Only the first declarator is documented.
        let first = node.declaration_list.declarations.first();
        if let Some(annotation) = first.and_then(|decl| decl.types.as_ref()) {
            if let Some(type_name) = self.type_name(annotation) {
                let mut block = DocBlock::new();
                block.push(DocTag::Type(type_name));
                self.attach(node.data.id, block);
            }
        }
        visitor::walk_variable_declaration_list(self, &node.declaration_list);
    }

    fn visit_function_declaration(&mut self, node: &FunctionDeclaration<'a>) {
        self.document_signature(node.data.id, node.parameters, node.returns.as_ref());
        visitor::walk_function_declaration(self, node);
    }

    fn visit_method_declaration(&mut self, node: &MethodDeclaration<'a>) {
        self.document_signature(node.data.id, node.parameters, node.returns.as_ref());
        visitor::walk_method_declaration(self, node);
    }
}

/// Record documentation for every annotated declaration in `file`.
#[tracing::instrument(skip_all, fields(file = %file.file_name))]
pub fn synthesize_docs(file: &SourceFile<'_>, comments: &mut CommentMap) -> Result<usize, Diagnostic> {
    let documented = DocSynthesizer::new(&file.file_name, comments).run(file)?;
    debug!(documented, "synthesized documentation");
    Ok(documented)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use hintdoc_parser::{AnnotationGrammar, Parser};
    use std::sync::Arc;

    fn synthesize(source: &str) -> (Result<usize, Diagnostic>, Vec<String>) {
        let arena = Bump::new();
        let parsed = Parser::with_grammar(&arena, "test.js", source, Arc::new(AnnotationGrammar::standard()))
            .parse_source_file()
            .unwrap();
        let mut comments = CommentMap::new();
        let result = synthesize_docs(&parsed.file, &mut comments);
        let texts = parsed
            .file
            .statements
            .iter()
            .flat_map(|s| comments.synthesized(s.id()).iter().map(|c| c.text.clone()))
            .collect();
        (result, texts)
    }

    #[test]
    fn test_variable_type_tag() {
        let (result, texts) = synthesize("var x: number = 42;");
        assert_eq!(result, Ok(1));
        assert_eq!(texts, vec!["*\n * @type {number}\n "]);
    }

    #[test]
    fn test_only_first_declarator_counts() {
        let (result, texts) = synthesize("var a = 1, b: string = 'b';");
        assert_eq!(result, Ok(0));
        assert!(texts.is_empty());
    }

    #[test]
    fn test_unannotated_parameters_are_skipped() {
        let (_, texts) = synthesize("function f(a: number, b) {}");
        assert_eq!(texts, vec!["*\n * @param {number} a\n "]);
    }

    #[test]
    fn test_unannotated_function_gets_nothing() {
        let (result, texts) = synthesize("function f(a, b) { return a; }");
        assert_eq!(result, Ok(0));
        assert!(texts.is_empty());
    }

    #[test]
    fn test_rest_and_destructured_parameters() {
        let (_, texts) = synthesize("function f({ a }: object, ...more: any): boolean {}");
        assert_eq!(
            texts,
            vec!["*\n * @param {Object} param0\n * @param {...*} more\n * @return {boolean}\n "]
        );
    }

    #[test]
    fn test_void_is_fatal() {
        let (result, _) = synthesize("function f(): void {}");
        let err = result.unwrap_err();
        assert_eq!(err.code, messages::NO_REPRESENTATION_FOR_0.code);
        assert_eq!(
            err.message_text,
            "target documentation dialect has no representation for void"
        );
        assert_eq!(err.span.map(|s| s.start), Some(12));
    }

    #[test]
    fn test_nested_declarations_are_documented() {
        let arena = Bump::new();
        let parsed = Parser::with_grammar(
            &arena,
            "test.js",
            "function outer() { var inner: string = ''; }",
            Arc::new(AnnotationGrammar::standard()),
        )
        .parse_source_file()
        .unwrap();
        let mut comments = CommentMap::new();
        assert_eq!(synthesize_docs(&parsed.file, &mut comments), Ok(1));
        let Statement::FunctionDeclaration(outer) = &parsed.file.statements[0] else {
            panic!("expected a function declaration");
        };
        assert!(comments.synthesized(outer.data.id).is_empty());
        assert_eq!(comments.synthesized(outer.body.statements[0].id()).len(), 1);
    }
}
