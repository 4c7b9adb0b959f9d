//! hintdoc_emitter: Output text and output files.
//!
//! Prints a parsed file together with its comment table and decides where the
//! result is written: next to the input by default, or under an output
//! directory, optionally mirroring the input tree below a root directory.

use hintdoc_ast::{CommentMap, SourceFile};
use hintdoc_diagnostics::{messages, Diagnostic, TranspileError};
use hintdoc_printer::{Printer, PrinterOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension given to outputs unless configured otherwise. It differs from
/// the usual input extension so an output never lands on its input.
pub const DEFAULT_OUT_EXTENSION: &str = "doc.js";

/// The emitter produces output text and output files.
#[derive(Debug, Clone)]
pub struct Emitter {
    /// Output directory override.
    pub out_dir: Option<PathBuf>,
    /// Root directory for calculating relative paths under `out_dir`.
    pub root_dir: Option<PathBuf>,
    /// Replaces the input's last extension, without the leading dot.
    pub out_extension: String,
    pub printer: PrinterOptions,
}

/// A file produced by the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// The output file path.
    pub path: PathBuf,
    /// The content of the file.
    pub text: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            out_dir: None,
            root_dir: None,
            out_extension: DEFAULT_OUT_EXTENSION.to_string(),
            printer: PrinterOptions::default(),
        }
    }

    /// Render `file` with its comments.
    pub fn print(&self, file: &SourceFile<'_>, comments: &CommentMap) -> String {
        Printer::with_options(comments, self.printer.clone()).print_source_file(file)
    }

    /// Pair rendered `text` with the path it belongs at. Refuses a path that
    /// would overwrite `source` itself.
    #[tracing::instrument(skip_all, fields(source = %source.display()))]
    pub fn output_file(&self, source: &Path, text: String) -> Result<OutputFile, TranspileError> {
        let path = self.output_path(source);
        if is_same_file(source, &path) {
            let source_name = source.display().to_string();
            return Err(TranspileError::OutputCollision(
                Diagnostic::new(&messages::OUTPUT_WOULD_OVERWRITE_INPUT_0, &[&source_name]).in_file(&source_name),
            ));
        }
        debug!(output = %path.display(), "mapped output path");
        Ok(OutputFile { path, text })
    }

    /// Where the output for `source` goes.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let stem = source.file_stem().unwrap_or_default().to_string_lossy();
        let file_name = format!("{}.{}", stem, self.out_extension.trim_start_matches('.'));
        let base_dir = match &self.out_dir {
            Some(out_dir) => {
                let relative = self
                    .root_dir
                    .as_deref()
                    .and_then(|root| source.parent()?.strip_prefix(root).ok());
                match relative {
                    Some(relative) => out_dir.join(relative),
                    None => out_dir.clone(),
                }
            }
            None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        base_dir.join(file_name)
    }

    /// Whether `path` looks like an output of this emitter rather than a
    /// source: its name ends in the output extension and that extension is
    /// not simply the file's own last extension.
    pub fn is_output_path(&self, path: &Path) -> bool {
        let extension = self.out_extension.trim_start_matches('.');
        let own = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        extension != own && name.ends_with(&format!(".{extension}"))
    }

    /// Write an output file to disk, creating parent directories.
    pub fn write_output_file(&self, file: &OutputFile) -> Result<(), TranspileError> {
        let io_error = |source| TranspileError::Io {
            path: file.path.clone(),
            source,
        };
        if let Some(parent) = file.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(&file.path, &file.text).map_err(io_error)?;
        debug!(path = %file.path.display(), bytes = file.text.len(), "wrote output");
        Ok(())
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use hintdoc_parser::Parser;

    #[test]
    fn test_output_path_next_to_input() {
        let emitter = Emitter::new();
        assert_eq!(
            emitter.output_path(Path::new("src/foo.js")),
            PathBuf::from("src/foo.doc.js")
        );
        assert_eq!(emitter.output_path(Path::new("foo.js")), PathBuf::from("foo.doc.js"));
    }

    #[test]
    fn test_output_path_with_outdir() {
        let emitter = Emitter {
            out_dir: Some(PathBuf::from("dist")),
            out_extension: ".js".to_string(),
            ..Emitter::new()
        };
        assert_eq!(emitter.output_path(Path::new("src/lib/foo.js")), PathBuf::from("dist/foo.js"));
    }

    #[test]
    fn test_output_path_mirrors_root_dir() {
        let emitter = Emitter {
            out_dir: Some(PathBuf::from("dist")),
            root_dir: Some(PathBuf::from("src")),
            out_extension: "js".to_string(),
            ..Emitter::new()
        };
        assert_eq!(
            emitter.output_path(Path::new("src/lib/foo.js")),
            PathBuf::from("dist/lib/foo.js")
        );
    }

    #[test]
    fn test_recognizes_outputs() {
        let emitter = Emitter::new();
        assert!(emitter.is_output_path(Path::new("src/a.doc.js")));
        assert!(!emitter.is_output_path(Path::new("src/a.js")));
        let plain = Emitter {
            out_extension: "js".to_string(),
            ..Emitter::new()
        };
        assert!(!plain.is_output_path(Path::new("src/a.js")));
    }

    #[test]
    fn test_refuses_to_overwrite_input() {
        let emitter = Emitter {
            out_extension: "js".to_string(),
            ..Emitter::new()
        };
        let err = emitter
            .output_file(Path::new("src/foo.js"), String::new())
            .unwrap_err();
        let TranspileError::OutputCollision(diagnostic) = err else {
            panic!("expected an output collision");
        };
        assert_eq!(diagnostic.code, messages::OUTPUT_WOULD_OVERWRITE_INPUT_0.code);
        assert_eq!(diagnostic.message_text, "output would overwrite input file 'src/foo.js'");
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter {
            out_dir: Some(dir.path().join("out/nested")),
            ..Emitter::new()
        };
        let file = emitter
            .output_file(Path::new("a.js"), "var a = 1;\n".to_string())
            .unwrap();
        emitter.write_output_file(&file).unwrap();
        let written = std::fs::read_to_string(dir.path().join("out/nested/a.doc.js")).unwrap();
        assert_eq!(written, "var a = 1;\n");
    }

    #[test]
    fn test_print_uses_printer_options() {
        let arena = Bump::new();
        let parsed = Parser::new(&arena, "a.js", "if (a) { b(); }").parse_source_file().unwrap();
        let mut emitter = Emitter::new();
        emitter.printer.indent_str = "\t".to_string();
        emitter.printer.trailing_newline = false;
        assert_eq!(emitter.print(&parsed.file, &CommentMap::new()), "if (a) {\n\tb();\n}");
    }
}
