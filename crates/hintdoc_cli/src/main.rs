//! hintdoc: Rewrites type annotations as JSDoc comments.
//!
//! Usage:
//!   hintdoc [options] [file...]
//!
//! Without files, the nearest `hintdoc.json` describes the inputs.

mod project;
mod report;

use std::path::Path;
use std::process;
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use clap::{ArgAction, Parser as ClapParser};
use hintdoc_compiler::{read_source, Program, Transpiler};
use hintdoc_diagnostics::{messages, Diagnostic, TranspileError};
use hintdoc_options::HintdocConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use project::{Project, ResolveError};
use report::{print_diagnostic, print_error};

const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(ClapParser, Debug)]
#[command(name = "hintdoc", version, about = "hintdoc - Rewrites type annotations as JSDoc comments")]
pub struct Cli {
    /// Source files to transpile.
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Path to hintdoc.json, or to the directory holding it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<String>,

    /// Redirect output structure to the directory.
    #[arg(long = "outDir")]
    pub out_dir: Option<String>,

    /// Print outputs to stdout instead of writing files.
    #[arg(long)]
    pub stdout: bool,

    /// Do not write outputs.
    #[arg(long = "noEmit")]
    pub no_emit: bool,

    /// Drop original comments from the output. Generated documentation stays.
    #[arg(long = "removeComments")]
    pub remove_comments: bool,

    /// Watch input files.
    #[arg(short = 'w', long)]
    pub watch: bool,

    /// List all files that are part of the run.
    #[arg(long = "listFiles")]
    pub list_files: bool,

    /// Initialize a hintdoc.json file.
    #[arg(long)]
    pub init: bool,

    /// Render diagnostics with source snippets.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub pretty: bool,

    /// Log pipeline progress.
    #[arg(long)]
    pub verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            print_error(&format!("cannot determine the working directory: {e}"), cli.pretty);
            process::exit(1);
        }
    };

    if cli.init {
        process::exit(run_init(&cwd, cli.pretty));
    }

    if cli.watch {
        run_watch(&cli, &cwd);
    }

    process::exit(run_compile(&cli, &cwd));
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_compile(cli: &Cli, cwd: &Path) -> i32 {
    let start = Instant::now();

    let project = match Project::resolve(cli, cwd) {
        Ok(project) => project,
        Err(ResolveError::Config(e)) => {
            print_error(&e.to_string(), cli.pretty);
            return 1;
        }
        Err(ResolveError::Diagnostic(d)) => {
            print_diagnostic(&d, None, cli.pretty);
            return 1;
        }
    };

    if cli.list_files {
        for file in &project.files {
            println!("{}", file.display());
        }
    }

    let transpiler = Transpiler::from_options(&project.options, &project.project_dir);
    let no_emit = cli.stdout || project.options.no_emit.unwrap_or(false);
    let result = Program::new(project.files, transpiler)
        .with_no_emit(no_emit)
        .emit();

    for file in &result.files {
        match &file.outcome {
            Ok(emitted) => {
                if !emitted.diagnostics.is_empty() {
                    let source = read_source(&file.input).ok();
                    for diagnostic in &emitted.diagnostics {
                        print_diagnostic(diagnostic, source.as_deref(), cli.pretty);
                    }
                }
                if cli.stdout {
                    print!("{}", emitted.output.text);
                }
            }
            Err(err) => report_failure(&file.input, err, cli.pretty),
        }
    }

    let failed = result.failures().count();
    if failed > 0 {
        eprintln!("\nFound {} error{}.", failed, if failed == 1 { "" } else { "s" });
        return 1;
    }

    let written = result.succeeded().filter(|f| f.written).count();
    let elapsed = start.elapsed();
    info!(written, elapsed_ms = elapsed.as_millis() as u64, "run finished");
    if written > 0 {
        let summary = Diagnostic::new(&messages::TRANSPILED_0_FILES, &[&written.to_string()]);
        eprintln!("{} in {:.2}s.", summary.message_text, elapsed.as_secs_f64());
    }
    0
}

fn report_failure(input: &Path, err: &TranspileError, pretty: bool) {
    match err.diagnostic() {
        Some(diagnostic) => {
            let source = read_source(input).ok();
            print_diagnostic(diagnostic, source.as_deref(), pretty);
        }
        None => print_error(&err.to_string(), pretty),
    }
}

fn run_init(cwd: &Path, pretty: bool) -> i32 {
    match HintdocConfig::write_init_template(cwd) {
        Ok(path) => {
            println!("Created {}.", path.display());
            0
        }
        Err(e) => {
            print_error(&e.to_string(), pretty);
            1
        }
    }
}

fn run_watch(cli: &Cli, cwd: &Path) -> ! {
    println!("Starting transpilation in watch mode...");
    println!();
    run_compile(cli, cwd);
    println!();
    println!("Watching for file changes...");

    let mut last = snapshot(cli, cwd);
    loop {
        thread::sleep(WATCH_POLL_INTERVAL);
        let current = snapshot(cli, cwd);
        if current != last {
            last = current;
            println!();
            println!("File change detected. Starting transpilation...");
            println!();
            run_compile(cli, cwd);
        }
    }
}

/// Input count and newest input modification time. Outputs are ignored so
/// writing them does not trigger another run.
fn snapshot(cli: &Cli, cwd: &Path) -> (usize, Option<SystemTime>) {
    let Ok(project) = Project::resolve(cli, cwd) else {
        return (0, None);
    };
    let transpiler = Transpiler::from_options(&project.options, &project.project_dir);
    let inputs: Vec<_> = project
        .files
        .iter()
        .filter(|f| !transpiler.emitter().is_output_path(f))
        .collect();
    let newest = inputs
        .iter()
        .filter_map(|f| std::fs::metadata(f).and_then(|m| m.modified()).ok())
        .max();
    (inputs.len(), newest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "hintdoc",
            "--outDir",
            "dist",
            "--stdout",
            "--pretty",
            "false",
            "a.js",
            "b.js",
        ])
        .unwrap();
        assert_eq!(cli.files, vec!["a.js", "b.js"]);
        assert_eq!(cli.out_dir.as_deref(), Some("dist"));
        assert!(cli.stdout);
        assert!(!cli.pretty);
        assert!(!cli.watch);
    }

    #[test]
    fn test_pretty_by_default() {
        let cli = Cli::try_parse_from(["hintdoc", "-w"]).unwrap();
        assert!(cli.pretty);
        assert!(cli.watch);
    }

    #[test]
    fn test_compile_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.js");
        std::fs::write(&input, "var a: number = 1;").unwrap();
        let cli = Cli::try_parse_from(["hintdoc", "--pretty", "false", "a.js"]).unwrap();

        assert_eq!(run_compile(&cli, dir.path()), 0);
        let output = std::fs::read_to_string(dir.path().join("a.doc.js")).unwrap();
        assert_eq!(output, "/**\n * @type {number}\n */\nvar a = 1;\n");
    }

    #[test]
    fn test_compile_fails_on_void() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("v.js"), "var v: void;").unwrap();
        let cli = Cli::try_parse_from(["hintdoc", "--pretty", "false", "v.js"]).unwrap();

        assert_eq!(run_compile(&cli, dir.path()), 1);
        assert!(!dir.path().join("v.doc.js").exists());
    }

    #[test]
    fn test_snapshot_ignores_outputs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(hintdoc_options::CONFIG_FILE_NAME), "{}").unwrap();
        std::fs::write(dir.path().join("a.js"), "").unwrap();
        std::fs::write(dir.path().join("a.doc.js"), "").unwrap();
        let cli = Cli::try_parse_from(["hintdoc"]).unwrap();

        assert_eq!(snapshot(&cli, dir.path()).0, 1);
    }
}
