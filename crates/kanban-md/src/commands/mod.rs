//! CLI command implementations

pub mod check;
pub mod format;
pub mod show;
pub mod slides;
pub mod sort;

pub use check::run_check;
pub use format::run_format;
pub use show::run_show;
pub use slides::run_slides;
pub use sort::run_sort;

use std::path::Path;

use crate::board_file;
use crate::output::{JsonIssue, JsonResponse};

/// Report a load or save failure and return its exit code
fn report_failure<T: serde::Serialize>(
    command: &str,
    file: &Path,
    err: &anyhow::Error,
    empty: T,
    json_output: bool,
) -> Result<i32, String> {
    let message = format!("{:#}", err);
    if json_output {
        let issues = vec![
            JsonIssue::error(board_file::error_code(err), message)
                .with_file(&file.display().to_string()),
        ];
        JsonResponse::error(command, empty, issues).print()?;
    } else {
        eprintln!("error: {}", message);
    }
    Ok(board_file::exit_code(err))
}

/// Report a document that is not a board
fn report_invalid<T: serde::Serialize>(
    command: &str,
    file: &Path,
    data: T,
    json_output: bool,
) -> Result<i32, String> {
    let err = kanban_md_core::KanbanError::InvalidBoard;
    if json_output {
        let issues = vec![
            JsonIssue::error(err.code(), err.to_string()).with_file(&file.display().to_string()),
        ];
        JsonResponse::error(command, data, issues).print()?;
    } else {
        eprintln!("error: {}: {}", file.display(), err);
    }
    Ok(err.exit_code())
}
