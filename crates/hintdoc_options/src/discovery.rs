//! Source file discovery from include/exclude patterns.
//!
//! Patterns are relative to the project directory and use `/` separators.
//! `**` matches any number of directories, `*` and `?` match within one path
//! segment. An exclude pattern without wildcards excludes that path and
//! everything below it.

use std::path::{Path, PathBuf};
use tracing::trace;

/// Extensions picked up by a pattern whose last segment names none.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

/// Find the project's source files below `root_dir`. An explicit `files`
/// list wins over the patterns. The result is sorted and free of duplicates.
pub fn discover_source_files(
    root_dir: &Path,
    include: &[String],
    exclude: &[String],
    files: Option<&[String]>,
) -> Vec<PathBuf> {
    if let Some(file_list) = files {
        return file_list
            .iter()
            .map(|f| {
                let path = Path::new(f);
                if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    root_dir.join(path)
                }
            })
            .filter(|path| path.is_file())
            .collect();
    }

    let include: Vec<Pattern> = include.iter().map(|p| Pattern::new(p)).collect();
    let exclude: Vec<Pattern> = exclude.iter().map(|p| Pattern::new(p)).collect();
    let mut result = Vec::new();
    walk_directory(root_dir, "", &include, &exclude, &mut result);
    result.sort();
    result.dedup();
    result
}

fn walk_directory(dir: &Path, relative: &str, include: &[Pattern], exclude: &[Pattern], result: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let rel = if relative.is_empty() {
            name.to_string()
        } else {
            format!("{relative}/{name}")
        };
        if exclude.iter().any(|p| p.excludes(&rel)) {
            trace!(path = %rel, "excluded");
            continue;
        }

        let path = entry.path();
        if path.is_dir() {
            if name == "node_modules" || name.starts_with('.') {
                continue;
            }
            walk_directory(&path, &rel, include, exclude, result);
        } else if path.is_file() && include.iter().any(|p| p.includes(&rel)) {
            result.push(path);
        }
    }
}

struct Pattern {
    segments: Vec<String>,
    literal: bool,
}

impl Pattern {
    fn new(pattern: &str) -> Self {
        let trimmed = pattern.trim_start_matches("./").trim_end_matches('/');
        Self {
            segments: trimmed.split('/').filter(|s| !s.is_empty()).map(str::to_string).collect(),
            literal: !trimmed.contains(['*', '?']),
        }
    }

    fn includes(&self, path: &str) -> bool {
        let path: Vec<&str> = path.split('/').collect();
        if !matches_segments(&self.segments, &path) {
            return false;
        }
        let names_extension = self.segments.last().is_some_and(|last| last.contains('.'));
        names_extension
            || path.last().is_some_and(|name| {
                Path::new(name)
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
            })
    }

    fn excludes(&self, path: &str) -> bool {
        let path: Vec<&str> = path.split('/').collect();
        if self.literal {
            return path.len() >= self.segments.len()
                && self.segments.iter().zip(&path).all(|(a, b)| a == b);
        }
        matches_segments(&self.segments, &path)
    }
}

fn matches_segments(pattern: &[String], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((first, rest)) if first == "**" => (0..=path.len()).any(|skip| matches_segments(rest, &path[skip..])),
        Some((first, rest)) => match path.split_first() {
            Some((name, path_rest)) => wildcard_match(first, name) && matches_segments(rest, path_rest),
            None => false,
        },
    }
}

/// `*` and `?` matching within one segment.
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, t));
            p += 1;
        } else if let Some((star_p, star_t)) = star {
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    fn relative(root: &Path, files: Vec<PathBuf>) -> Vec<String> {
        files
            .into_iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_wildcard_match() {
        assert!(wildcard_match("*.js", "a.js"));
        assert!(wildcard_match("a?c", "abc"));
        assert!(wildcard_match("*", ""));
        assert!(!wildcard_match("*.js", "a.ts"));
        assert!(wildcard_match("*b*", "abc"));
    }

    #[test]
    fn test_double_star_spans_directories() {
        let pattern = Pattern::new("src/**/*.js");
        assert!(pattern.includes("src/a.js"));
        assert!(pattern.includes("src/x/y/a.js"));
        assert!(!pattern.includes("lib/a.js"));
    }

    #[test]
    fn test_discovery_skips_hidden_and_node_modules() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for rel in [
            "src/a.js",
            "src/nested/b.mjs",
            "src/readme.md",
            "node_modules/pkg/index.js",
            ".cache/c.js",
            "dist/out.js",
        ] {
            touch(root, rel);
        }
        let files = discover_source_files(root, &strings(&["**/*"]), &strings(&["dist"]), None);
        assert_eq!(relative(root, files), vec!["src/a.js", "src/nested/b.mjs"]);
    }

    #[test]
    fn test_explicit_extension_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "src/a.js");
        touch(root, "src/b.hd");
        let files = discover_source_files(root, &strings(&["src/*.hd"]), &[], None);
        assert_eq!(relative(root, files), vec!["src/b.hd"]);
    }

    #[test]
    fn test_files_list_wins() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "one.js");
        touch(root, "two.js");
        let files = discover_source_files(
            root,
            &strings(&["**/*"]),
            &[],
            Some(&strings(&["two.js", "missing.js"])),
        );
        assert_eq!(relative(root, files), vec!["two.js"]);
    }
}
