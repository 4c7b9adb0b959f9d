//! hintdoc_compiler: Pipeline orchestration.
//!
//! [`Transpiler`] runs the full pipeline for one input: parse with the
//! annotation grammar, attach comments, synthesize documentation, render.
//! [`Program`] runs it for many files at once, one independent pipeline run
//! per input, and writes the outputs.

mod program;
mod transpiler;

pub use program::{read_source, EmittedFile, FileResult, Program, ProgramResult};
pub use transpiler::{transpile, TranspileOutput, Transpiler};
