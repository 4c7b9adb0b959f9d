use crate::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// A condition that aborts the pipeline for one input. No output is produced
/// for an input that fails with any of these.
#[derive(Debug, Error)]
pub enum TranspileError {
    /// The input could not be parsed, including a colon that does not
    /// introduce a reserved type.
    #[error("{0}")]
    Syntax(Diagnostic),

    /// An annotation label that the documentation dialect cannot express.
    #[error("{0}")]
    Unsupported(Diagnostic),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    OutputCollision(Diagnostic),
}

impl TranspileError {
    /// The positioned diagnostic behind this error, when there is one.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            TranspileError::Syntax(d)
            | TranspileError::Unsupported(d)
            | TranspileError::OutputCollision(d) => Some(d),
            TranspileError::Io { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages;
    use hintdoc_core::TextSpan;

    #[test]
    fn test_unsupported_message() {
        let err = TranspileError::Unsupported(Diagnostic::at(
            TextSpan::new(7, 4),
            &messages::NO_REPRESENTATION_FOR_0,
            &["void"],
        ));
        assert!(err
            .to_string()
            .contains("target documentation dialect has no representation for void"));
        assert_eq!(err.diagnostic().and_then(|d| d.span), Some(TextSpan::new(7, 4)));
    }

    #[test]
    fn test_io_error_has_no_diagnostic() {
        let err = TranspileError::Io {
            path: PathBuf::from("missing.js"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.diagnostic().is_none());
        assert!(err.to_string().starts_with("i/o error on missing.js"));
    }
}
