//! Loading and saving board files

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use kanban_md_core::config::BOARD_CONFIG_FILE;
use kanban_md_core::{
    Config, FsIncludeReader, IncludeReader, KanbanError, MarkdownParser, NoIncludes, ParseResult,
    UuidIds,
};

/// A parsed board file and the settings it was parsed with
pub struct BoardFile {
    /// Path as given on the command line
    pub path: PathBuf,
    /// Directory include paths are resolved against
    pub base_dir: PathBuf,
    /// Original file contents
    pub content: String,
    /// Parse output; the board title is the file stem
    pub parsed: ParseResult,
    /// Effective configuration
    pub config: Config,
}

/// Find the configuration for a board
///
/// An explicit path must load. Otherwise `kanban-md.toml` next to the board
/// wins over the user config file, and defaults apply when neither exists.
pub fn load_config(explicit: Option<&Path>, board_path: &Path) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load_from_path(path)
            .with_context(|| format!("loading config {}", path.display()));
    }

    let beside_board = base_dir(board_path).join(BOARD_CONFIG_FILE);
    let user = dirs::config_dir().map(|dir| dir.join("kanban-md").join("config.toml"));

    for candidate in std::iter::once(beside_board).chain(user) {
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using config");
            return Config::load_from_path(&candidate)
                .with_context(|| format!("loading config {}", candidate.display()));
        }
    }

    Ok(Config::default())
}

/// Read a text file, mapping a missing file to [`KanbanError::FileNotFound`]
pub fn read_text(path: &Path) -> anyhow::Result<String> {
    if !path.is_file() {
        return Err(KanbanError::FileNotFound(path.display().to_string()).into());
    }
    let content = fs::read_to_string(path)
        .map_err(KanbanError::from)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(content)
}

/// Read and parse a board file
pub fn load_board(path: &Path, explicit_config: Option<&Path>) -> anyhow::Result<BoardFile> {
    let config = load_config(explicit_config, path)?;
    let content = read_text(path)?;
    let base_dir = base_dir(path);

    let reader: &dyn IncludeReader = if config.kanban.resolve_includes {
        &FsIncludeReader
    } else {
        &NoIncludes
    };
    let mut parsed = MarkdownParser::new(&UuidIds, reader).parse(&content, Some(&base_dir));
    parsed.board.title = board_title(path);

    Ok(BoardFile {
        path: path.to_path_buf(),
        base_dir,
        content,
        parsed,
        config,
    })
}

/// Write generated Markdown back to the board file
pub fn save_board(path: &Path, markdown: &str) -> anyhow::Result<()> {
    fs::write(path, markdown)
        .map_err(KanbanError::from)
        .with_context(|| format!("writing {}", path.display()))
}

/// Exit code for a failure from this module
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<KanbanError>()
        .map(KanbanError::exit_code)
        .unwrap_or(1)
}

/// Error code for a failure from this module
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<KanbanError>()
        .map(KanbanError::code)
        .unwrap_or("E010")
}

fn base_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn board_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
