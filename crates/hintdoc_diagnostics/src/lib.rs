//! hintdoc_diagnostics: Diagnostic records and error reporting infrastructure.
//!
//! Diagnostics come in two flavours. Recoverable ones (warnings, such as an
//! escape sequence inside a reserved word) are accumulated and returned next to
//! the output. Fatal ones abort the pipeline for the current input and travel
//! inside a [`TranspileError`].

mod error;

pub use error::TranspileError;

use hintdoc_core::text::{LineMap, TextSpan};
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: Option<String>,
    /// Character span in the source text.
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a diagnostic with a span but no file; the file is filled in by
    /// whoever owns the source, see [`Diagnostic::in_file`].
    pub fn at(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    pub fn with_location(
        file: String,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file),
            ..Self::at(span, message, args)
        }
    }

    /// Set the file name if it is not already known.
    pub fn in_file(mut self, file: &str) -> Self {
        if self.file.is_none() {
            self.file = Some(file.to_string());
        }
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// Render as `file(line,col): category HD<code>: message`, with 1-based
    /// line and column resolved through `line_map`.
    pub fn format_with(&self, line_map: &LineMap) -> String {
        let mut out = String::new();
        if let Some(ref file) = self.file {
            out.push_str(file);
        }
        if let Some(span) = self.span {
            let lc = line_map.line_and_column_of(span.start);
            out.push_str(&format!("({},{})", lc.line + 1, lc.character + 1));
        }
        if !out.is_empty() {
            out.push_str(": ");
        }
        out.push_str(&format!(
            "{} HD{}: {}",
            self.category, self.code, self.message_text
        ));
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} HD{}: {}", self.category, self.code, self.message_text)
    }
}

/// Replace `{0}`, `{1}`, etc. in a template with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// Diagnostics accumulated while processing one input.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add unless an identical report (same code and span) is already present.
    /// The scanner revisits text during lookahead and would otherwise report twice.
    pub fn add_unique(&mut self, diagnostic: Diagnostic) {
        let seen = self
            .diagnostics
            .iter()
            .any(|d| d.code == diagnostic.code && d.span == diagnostic.span);
        if !seen {
            self.diagnostics.push(diagnostic);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// The first error in source order, if any.
    pub fn first_error(&self) -> Option<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.is_error())
            .min_by_key(|d| d.span.map(|s| s.start).unwrap_or(0))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Sort diagnostics by file and position.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            let file_cmp = a.file.cmp(&b.file);
            if file_cmp != std::cmp::Ordering::Equal {
                return file_cmp;
            }
            let a_pos = a.span.map(|s| s.start).unwrap_or(0);
            let b_pos = b.span.map(|s| s.start).unwrap_or(0);
            a_pos.cmp(&b_pos)
        });
    }
}

impl IntoIterator for DiagnosticCollection {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
        ($code:expr, Message, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Message, message: $msg }
        };
    }

    // ========================================================================
    // Scanner (1000-1099)
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "unterminated string literal");
    pub const ASTERISK_SLASH_EXPECTED: DiagnosticMessage = diag!(1010, Error, "'*/' expected");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1027, Error, "invalid character");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1060, Error, "unterminated template literal");
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1061, Error, "unterminated regular expression literal");
    pub const INVALID_UNICODE_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1070, Error, "invalid unicode escape sequence");
    pub const ESCAPE_SEQUENCE_IN_KEYWORD_0: DiagnosticMessage = diag!(1080, Warning, "escape sequence in keyword {0}");

    // ========================================================================
    // Parser (1100-1199)
    // ========================================================================
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1103, Error, "identifier expected");
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1105, Error, "'{0}' expected");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1109, Error, "expression expected");
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = diag!(1128, Error, "declaration or statement expected");
    pub const PROPERTY_ASSIGNMENT_EXPECTED: DiagnosticMessage = diag!(1136, Error, "property assignment expected");
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1112, Error, "unexpected token");
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: DiagnosticMessage = diag!(1190, Error, "maximum nesting depth exceeded");

    // ========================================================================
    // Annotations (1200-1299)
    // ========================================================================
    pub const EXPECTED_A_TYPE_DECLARATION: DiagnosticMessage = diag!(1200, Error, "expected a type declaration");
    pub const NO_REPRESENTATION_FOR_0: DiagnosticMessage = diag!(1210, Error, "target documentation dialect has no representation for {0}");

    // ========================================================================
    // Pipeline (1300-1399)
    // ========================================================================
    pub const OUTPUT_WOULD_OVERWRITE_INPUT_0: DiagnosticMessage = diag!(1300, Error, "output would overwrite input file '{0}'");
    pub const FILE_0_NOT_FOUND: DiagnosticMessage = diag!(1301, Error, "file '{0}' not found");
    pub const NO_INPUTS_FOUND: DiagnosticMessage = diag!(1302, Error, "no input files found");
    pub const TRANSPILED_0_FILES: DiagnosticMessage = diag!(1310, Message, "transpiled {0} file(s)");
}
