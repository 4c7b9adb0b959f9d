//! Resolving the inputs and options of one run.

use std::path::{Path, PathBuf};

use hintdoc_diagnostics::{messages, Diagnostic};
use hintdoc_options::{
    discover_source_files, parse_config_file, CompilerOptions, ConfigError, HintdocConfig,
    CONFIG_FILE_NAME,
};
use tracing::debug;

use crate::Cli;

/// Inputs and options after combining the project file with the flags.
#[derive(Debug)]
pub struct Project {
    /// Directory relative paths in the options resolve against.
    pub project_dir: PathBuf,
    pub options: CompilerOptions,
    pub files: Vec<PathBuf>,
}

#[derive(Debug)]
pub enum ResolveError {
    Config(ConfigError),
    Diagnostic(Diagnostic),
}

impl Project {
    /// Explicit files win; otherwise `--project`, otherwise the nearest
    /// `hintdoc.json` above the working directory.
    pub fn resolve(cli: &Cli, cwd: &Path) -> Result<Self, ResolveError> {
        let mut project = if let Some(project) = &cli.project {
            let mut path = cwd.join(project);
            if path.is_dir() {
                path.push(CONFIG_FILE_NAME);
            }
            Self::from_config(&path)?
        } else if !cli.files.is_empty() {
            Self::from_files(&cli.files, cwd)?
        } else if let Some(path) = HintdocConfig::find(cwd) {
            Self::from_config(&path)?
        } else {
            return Err(ResolveError::Diagnostic(Diagnostic::new(&messages::NO_INPUTS_FOUND, &[])));
        };

        if let Some(out_dir) = &cli.out_dir {
            // Relative to where the command runs, not to the project file.
            project.options.out_dir = Some(cwd.join(out_dir).to_string_lossy().into_owned());
        }
        if cli.no_emit {
            project.options.no_emit = Some(true);
        }
        if cli.remove_comments {
            project.options.remove_comments = Some(true);
        }
        if project.files.is_empty() {
            return Err(ResolveError::Diagnostic(Diagnostic::new(&messages::NO_INPUTS_FOUND, &[])));
        }
        Ok(project)
    }

    fn from_config(path: &Path) -> Result<Self, ResolveError> {
        let config = parse_config_file(path).map_err(ResolveError::Config)?;
        let project_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let files = discover_source_files(
            &project_dir,
            &config.include_patterns(),
            &config.exclude_patterns(),
            config.files.as_deref(),
        );
        debug!(project = %path.display(), files = files.len(), "resolved project");
        Ok(Self {
            project_dir,
            options: config.compiler_options(),
            files,
        })
    }

    fn from_files(files: &[String], cwd: &Path) -> Result<Self, ResolveError> {
        let files = files
            .iter()
            .map(|file| {
                let path = cwd.join(file);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(ResolveError::Diagnostic(Diagnostic::new(&messages::FILE_0_NOT_FOUND, &[file.as_str()])))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            project_dir: cwd.to_path_buf(),
            options: CompilerOptions::default(),
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hintdoc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.js");
        let err = Project::resolve(&cli(&[missing.to_str().unwrap()]), dir.path()).unwrap_err();
        let ResolveError::Diagnostic(diagnostic) = err else {
            panic!("expected a diagnostic");
        };
        assert_eq!(diagnostic.code, messages::FILE_0_NOT_FOUND.code);
    }

    #[test]
    fn test_project_file_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/a.js"), "var a = 1;").unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"compilerOptions": {"outDir": "out"}, "include": ["src/**/*"]}"#,
        )
        .unwrap();

        let project = Project::resolve(&cli(&["--noEmit", "--removeComments"]), dir.path()).unwrap();

        assert_eq!(project.files, vec![dir.path().join("src/a.js")]);
        assert_eq!(project.options.out_dir.as_deref(), Some("out"));
        assert_eq!(project.options.no_emit, Some(true));
        assert_eq!(project.options.remove_comments, Some(true));
    }

    #[test]
    fn test_nothing_to_do() {
        let dir = tempfile::tempdir().unwrap();
        let err = Project::resolve(&cli(&[]), dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Diagnostic(ref d) if d.code == messages::NO_INPUTS_FOUND.code
        ));
    }
}
