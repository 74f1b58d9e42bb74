//! Include directives and include file reading
//!
//! Two directive forms exist:
//! - `!!!columninclude(path)!!!` in a column heading turns the column into a
//!   view over a slide document.
//! - `!!!include(path)!!!` anywhere else is a standalone reference, collected
//!   as metadata only.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::KanbanError;

/// Regex patterns for include directives (compiled once)
pub(crate) mod patterns {
    use std::sync::LazyLock;

    pub static COLUMN_INCLUDE: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"!!!columninclude\(([^)]+)\)!!!").unwrap());

    pub static INCLUDE: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"!!!include\(([^)]+)\)!!!").unwrap());

    pub static SPACE_RUN: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r" {2,}").unwrap());
}

/// Read access to files named by include directives
pub trait IncludeReader {
    /// Return the contents of `path`, or None if it cannot be read
    fn read(&self, path: &Path) -> Option<String>;
}

/// Reads include files from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsIncludeReader;

impl IncludeReader for FsIncludeReader {
    fn read(&self, path: &Path) -> Option<String> {
        match read_include_file(path) {
            Ok(content) => Some(content),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "include read failed");
                None
            }
        }
    }
}

/// Reader that never finds anything, for parsing without include resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIncludes;

impl IncludeReader for NoIncludes {
    fn read(&self, _path: &Path) -> Option<String> {
        None
    }
}

fn read_include_file(path: &Path) -> Result<String, KanbanError> {
    if !path.is_file() {
        return Err(KanbanError::FileNotFound(path.display().to_string()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Paths named by column include directives in a title, in order
pub fn column_include_paths(title: &str) -> Vec<String> {
    patterns::COLUMN_INCLUDE
        .captures_iter(title)
        .map(|c| c.get(1).unwrap().as_str().trim().to_string())
        .collect()
}

/// Whether a title carries at least one column include directive
pub fn has_column_include(title: &str) -> bool {
    patterns::COLUMN_INCLUDE.is_match(title)
}

/// Remove every column include directive from a title and trim the rest
pub fn strip_column_includes(title: &str) -> String {
    let stripped = patterns::COLUMN_INCLUDE.replace_all(title, "");
    collapse_spaces(stripped.trim())
}

/// Distinct standalone include references in a document, first-seen order
pub fn standalone_include_paths(content: &str) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    for cap in patterns::INCLUDE.captures_iter(content) {
        let path = cap.get(1).unwrap().as_str().trim().to_string();
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

/// Resolve an include path against the directory of the board document
pub fn resolve_include_path(base_path: Option<&Path>, include: &str) -> PathBuf {
    let path = Path::new(include);
    match base_path {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

/// File name without directory or extension, used as a fallback title
pub fn include_base_name(include: &str) -> String {
    Path::new(include)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| include.to_string())
}

/// Build the `display_title` of an include-mode column
pub fn include_display_title(title: &str, includes: &[String]) -> String {
    let stripped = strip_column_includes(title);
    if stripped.is_empty() {
        includes
            .first()
            .map(|p| include_base_name(p))
            .unwrap_or_default()
    } else {
        stripped
    }
}

/// Replace every run of spaces with a single space
pub(crate) fn collapse_spaces(s: &str) -> String {
    patterns::SPACE_RUN.replace_all(s, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_include_paths() {
        let title = "Talk !!!columninclude(slides/a.md)!!! and !!!columninclude( b.md )!!!";
        assert_eq!(column_include_paths(title), vec!["slides/a.md", "b.md"]);
        assert!(has_column_include(title));
        assert!(!has_column_include("Plain #row2"));
    }

    #[test]
    fn test_strip_column_includes() {
        assert_eq!(
            strip_column_includes("Talk  !!!columninclude(a.md)!!! #row2"),
            "Talk #row2"
        );
        assert_eq!(strip_column_includes("!!!columninclude(a.md)!!!"), "");
    }

    #[test]
    fn test_display_title_fallback() {
        let includes = vec!["decks/intro.md".to_string()];
        assert_eq!(
            include_display_title("!!!columninclude(decks/intro.md)!!!", &includes),
            "intro"
        );
        assert_eq!(
            include_display_title("Intro !!!columninclude(decks/intro.md)!!!", &includes),
            "Intro"
        );
    }

    #[test]
    fn test_standalone_includes_distinct() {
        let content = "!!!include(a.md)!!!\ntext !!!include(b.md)!!!\n!!!include(a.md)!!!\n## Col !!!columninclude(c.md)!!!";
        assert_eq!(standalone_include_paths(content), vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_resolve_include_path() {
        let base = Path::new("/boards");
        assert_eq!(
            resolve_include_path(Some(base), "deck.md"),
            PathBuf::from("/boards/deck.md")
        );
        assert_eq!(
            resolve_include_path(Some(base), "/abs/deck.md"),
            PathBuf::from("/abs/deck.md")
        );
        assert_eq!(resolve_include_path(None, "deck.md"), PathBuf::from("deck.md"));
    }

    #[test]
    fn test_fs_reader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let reader = FsIncludeReader;
        assert!(reader.read(&dir.path().join("nope.md")).is_none());

        let path = dir.path().join("deck.md");
        fs::write(&path, "# Slide").unwrap();
        assert_eq!(reader.read(&path).as_deref(), Some("# Slide"));
    }

    #[test]
    fn test_collapse_spaces() {
        assert_eq!(collapse_spaces("Deck   #row2  now"), "Deck #row2 now");
        assert_eq!(collapse_spaces("tab\t\tkept"), "tab\t\tkept");
        assert_eq!(collapse_spaces("single space"), "single space");
    }
}
