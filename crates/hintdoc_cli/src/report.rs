//! Diagnostic output on stderr.

use std::fmt;

use hintdoc_core::{byte_offset, LineMap};
use hintdoc_diagnostics::{Diagnostic, DiagnosticCategory};
use miette::{LabeledSpan, NamedSource, Severity, SourceSpan};

/// A diagnostic paired with the text it points into, rendered by miette.
#[derive(Debug)]
pub struct SourceReport {
    diagnostic: Diagnostic,
    source: Option<NamedSource<String>>,
    span: Option<SourceSpan>,
}

impl SourceReport {
    pub fn new(diagnostic: Diagnostic, source_text: Option<&str>) -> Self {
        let span = match (diagnostic.span, source_text) {
            (Some(span), Some(text)) => {
                let start = byte_offset(text, span.start);
                let end = byte_offset(text, span.end());
                Some(SourceSpan::from(start..end))
            }
            _ => None,
        };
        let source = source_text.map(|text| {
            let name = diagnostic.file.clone().unwrap_or_default();
            NamedSource::new(name, text.to_string())
        });
        Self {
            diagnostic,
            source,
            span,
        }
    }
}

impl fmt::Display for SourceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic.message_text)
    }
}

impl std::error::Error for SourceReport {}

impl miette::Diagnostic for SourceReport {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("HD{}", self.diagnostic.code)))
    }

    fn severity(&self) -> Option<Severity> {
        Some(match self.diagnostic.category {
            DiagnosticCategory::Error => Severity::Error,
            DiagnosticCategory::Warning => Severity::Warning,
            DiagnosticCategory::Message => Severity::Advice,
        })
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some("here".to_string()),
            span,
        ))))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source.as_ref().map(|s| s as &dyn miette::SourceCode)
    }
}

/// Print `diagnostic`, with a source snippet when `pretty` is set and the
/// text is available.
pub fn print_diagnostic(diagnostic: &Diagnostic, source_text: Option<&str>, pretty: bool) {
    if pretty {
        let report = miette::Report::new(SourceReport::new(diagnostic.clone(), source_text));
        eprintln!("{report:?}");
        return;
    }
    match source_text {
        Some(text) => eprintln!("{}", diagnostic.format_with(&LineMap::new(text))),
        None => eprintln!("{diagnostic}"),
    }
}

/// Print an error that has no source location.
pub fn print_error(message: &str, pretty: bool) {
    if pretty {
        eprintln!("{:?}", miette::miette!("{message}"));
    } else {
        eprintln!("error: {message}");
    }
}
