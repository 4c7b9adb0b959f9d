use std::path::Path;
use std::sync::Arc;

use bumpalo::Bump;
use hintdoc_ast::CommentMap;
use hintdoc_diagnostics::{Diagnostic, TranspileError};
use hintdoc_emitter::{Emitter, DEFAULT_OUT_EXTENSION};
use hintdoc_jsdoc::synthesize_docs;
use hintdoc_options::CompilerOptions;
use hintdoc_parser::{AnnotationGrammar, Parser};
use hintdoc_printer::{attach_comments, PrinterOptions};
use tracing::debug;

/// File name used by [`transpile`] for diagnostics.
const ANONYMOUS_FILE_NAME: &str = "input.js";

/// The single-input pipeline.
///
/// Holds only read-only state, so one transpiler can serve any number of
/// threads at once.
#[derive(Debug, Clone)]
pub struct Transpiler {
    grammar: Arc<AnnotationGrammar>,
    emitter: Emitter,
}

/// The result of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct TranspileOutput {
    pub file_name: String,
    /// Rendered text, annotations erased and documentation added.
    pub text: String,
    /// Recoverable diagnostics collected along the way.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of synthesized documentation comments.
    pub doc_count: usize,
}

impl Transpiler {
    /// A transpiler with the standard type vocabulary and default output
    /// settings.
    pub fn new() -> Self {
        Self::with_emitter(Emitter::new())
    }

    pub fn with_emitter(emitter: Emitter) -> Self {
        Self {
            grammar: Arc::new(AnnotationGrammar::standard()),
            emitter,
        }
    }

    /// Build from project options. Relative directories resolve against
    /// `project_dir`.
    pub fn from_options(options: &CompilerOptions, project_dir: &Path) -> Self {
        let emitter = Emitter {
            out_dir: options.out_dir.as_ref().map(|dir| project_dir.join(dir)),
            root_dir: options.root_dir.as_ref().map(|dir| project_dir.join(dir)),
            out_extension: options
                .out_extension
                .clone()
                .unwrap_or_else(|| DEFAULT_OUT_EXTENSION.to_string()),
            printer: PrinterOptions {
                indent_str: options.indent_str(),
                new_line: options.new_line_str().to_string(),
                remove_comments: options.remove_comments.unwrap_or(false),
                ..PrinterOptions::default()
            },
        };
        Self::with_emitter(emitter)
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Run the whole pipeline over `source`. Any fatal condition aborts the
    /// run and no text is produced.
    #[tracing::instrument(skip_all, fields(file = file_name))]
    pub fn transpile(&self, file_name: &str, source: &str) -> Result<TranspileOutput, TranspileError> {
        let arena = Bump::new();
        let parsed = Parser::with_grammar(&arena, file_name, source, Arc::clone(&self.grammar))
            .parse_source_file()
            .map_err(TranspileError::Syntax)?;
        if let Some(error) = parsed.diagnostics.first_error() {
            return Err(TranspileError::Syntax(error.clone()));
        }

        let mut comments = CommentMap::new();
        attach_comments(&parsed.file, &parsed.comments, &parsed.tokens, &mut comments);
        let doc_count = synthesize_docs(&parsed.file, &mut comments)
            .map_err(|d| TranspileError::Unsupported(d.in_file(file_name)))?;
        let text = self.emitter.print(&parsed.file, &comments);
        debug!(doc_count, warnings = parsed.diagnostics.len(), "transpiled");

        Ok(TranspileOutput {
            file_name: file_name.to_string(),
            text,
            diagnostics: parsed.diagnostics.into_diagnostics(),
            doc_count,
        })
    }
}

impl Default for Transpiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Transpile a source string with default settings.
pub fn transpile(source: &str) -> Result<String, TranspileError> {
    Transpiler::new()
        .transpile(ANONYMOUS_FILE_NAME, source)
        .map(|output| output.text)
}
