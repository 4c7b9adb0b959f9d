use std::path::{Path, PathBuf};

use hintdoc_diagnostics::{Diagnostic, TranspileError};
use hintdoc_emitter::OutputFile;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::Transpiler;

/// A set of input files transpiled together.
#[derive(Debug, Clone)]
pub struct Program {
    transpiler: Transpiler,
    root_files: Vec<PathBuf>,
    no_emit: bool,
}

/// The outcome for one input.
#[derive(Debug)]
pub struct FileResult {
    pub input: PathBuf,
    pub outcome: Result<EmittedFile, TranspileError>,
}

/// A successfully transpiled input.
#[derive(Debug, Clone)]
pub struct EmittedFile {
    pub output: OutputFile,
    pub diagnostics: Vec<Diagnostic>,
    pub doc_count: usize,
    /// False when emitting was disabled.
    pub written: bool,
}

/// Results for every input, in input order.
#[derive(Debug, Default)]
pub struct ProgramResult {
    pub files: Vec<FileResult>,
}

impl Program {
    /// Create a program over `root_files`. Files that are themselves outputs
    /// of `transpiler` are left out.
    pub fn new(root_files: Vec<PathBuf>, transpiler: Transpiler) -> Self {
        let root_files = root_files
            .into_iter()
            .filter(|path| {
                let output = transpiler.emitter().is_output_path(path);
                if output {
                    debug!(path = %path.display(), "skipping previous output");
                }
                !output
            })
            .collect();
        Self {
            transpiler,
            root_files,
            no_emit: false,
        }
    }

    /// Transpile without writing anything.
    pub fn with_no_emit(mut self, no_emit: bool) -> Self {
        self.no_emit = no_emit;
        self
    }

    pub fn root_files(&self) -> &[PathBuf] {
        &self.root_files
    }

    /// Run the pipeline for every input in parallel and write the outputs.
    #[tracing::instrument(skip_all, fields(files = self.root_files.len()))]
    pub fn emit(&self) -> ProgramResult {
        let files: Vec<FileResult> = self
            .root_files
            .par_iter()
            .map(|input| FileResult {
                input: input.clone(),
                outcome: self.process(input),
            })
            .collect();
        let result = ProgramResult { files };
        info!(
            succeeded = result.succeeded().count(),
            failed = result.failures().count(),
            "program finished"
        );
        result
    }

    fn process(&self, input: &Path) -> Result<EmittedFile, TranspileError> {
        let source = read_source(input)?;
        let output = self
            .transpiler
            .transpile(&input.display().to_string(), &source)?;
        let emitter = self.transpiler.emitter();
        let file = emitter.output_file(input, output.text)?;
        if !self.no_emit {
            emitter.write_output_file(&file)?;
        }
        Ok(EmittedFile {
            output: file,
            diagnostics: output.diagnostics,
            doc_count: output.doc_count,
            written: !self.no_emit,
        })
    }
}

impl ProgramResult {
    pub fn succeeded(&self) -> impl Iterator<Item = &EmittedFile> {
        self.files.iter().filter_map(|f| f.outcome.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &TranspileError)> {
        self.files
            .iter()
            .filter_map(|f| f.outcome.as_ref().err().map(|e| (f.input.as_path(), e)))
    }

    pub fn has_errors(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Recoverable diagnostics from the inputs that succeeded.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.succeeded().flat_map(|f| f.diagnostics.iter())
    }
}

/// Read an input as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String, TranspileError> {
    let io_error = |source| TranspileError::Io {
        path: path.to_path_buf(),
        source,
    };
    let bytes = std::fs::read(path).map_err(io_error)?;
    let text = simdutf8::basic::from_utf8(&bytes).map_err(|_| {
        io_error(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "stream did not contain valid UTF-8",
        ))
    })?;
    Ok(text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_source_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.js");
        std::fs::write(&path, [0x76, 0x61, 0x72, 0xff]).unwrap();
        let err = read_source(&path).unwrap_err();
        let TranspileError::Io { source, .. } = err else {
            panic!("expected an i/o error");
        };
        assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_previous_outputs_are_not_inputs() {
        let program = Program::new(
            vec![PathBuf::from("a.js"), PathBuf::from("a.doc.js")],
            Transpiler::new(),
        );
        assert_eq!(program.root_files(), [PathBuf::from("a.js")]);
    }
}
