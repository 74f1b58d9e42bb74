//! Implementation of the `kanban-md check` command

use std::path::Path;

use kanban_md_core::include::resolve_include_path;
use kanban_md_core::{ColumnTitle, GatherRule};
use owo_colors::OwoColorize;

use crate::board_file::{self, BoardFile};
use crate::colors::COLORS;
use crate::output::{CheckData, JsonIssue, JsonResponse};

/// Run the check command
pub fn run_check(
    file: &Path,
    config: Option<&Path>,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    let file_name = file.display().to_string();
    let loaded = match board_file::load_board(file, config) {
        Ok(loaded) => loaded,
        Err(err) => {
            let empty = CheckData {
                file: file_name,
                ..Default::default()
            };
            return super::report_failure("check", file, &err, empty, json_output);
        }
    };

    let (data, issues) = check_board(&loaded);

    if !data.valid {
        return super::report_invalid("check", file, data, json_output);
    }

    if json_output {
        JsonResponse::ok_with_issues("check", data, issues).print()?;
    } else if !quiet {
        output_text(&data, &issues);
    }

    Ok(0)
}

fn check_board(loaded: &BoardFile) -> (CheckData, Vec<JsonIssue>) {
    let file = loaded.path.display().to_string();
    let board = &loaded.parsed.board;
    let mut data = CheckData {
        file: file.clone(),
        valid: board.valid,
        columns: board.columns.len(),
        tasks: board.task_count(),
        included_files: loaded.parsed.included_files.clone(),
        column_include_files: loaded.parsed.column_include_files.clone(),
        missing_files: Vec::new(),
    };
    let mut issues = Vec::new();

    for path in data
        .column_include_files
        .iter()
        .chain(&data.included_files)
    {
        let resolved = resolve_include_path(Some(&loaded.base_dir), path);
        if !resolved.is_file() && !data.missing_files.contains(path) {
            data.missing_files.push(path.clone());
        }
    }
    for path in &data.missing_files {
        issues.push(
            JsonIssue::warning("E010", format!("include file not found: {}", path))
                .with_file(&file),
        );
    }

    for column in &board.columns {
        for source in ColumnTitle::parse(&column.title).gather_rules {
            if !GatherRule::parse(&source).is_valid() {
                issues.push(
                    JsonIssue::warning(
                        "E008",
                        format!("gather rule '{}' does not parse and matches nothing", source),
                    )
                    .with_file(&file)
                    .with_column(&column.title),
                );
            }
        }
    }

    (data, issues)
}

fn output_text(data: &CheckData, issues: &[JsonIssue]) {
    for issue in issues {
        let location = match &issue.column {
            Some(column) => format!(" (column: {})", column),
            None => String::new(),
        };
        println!(
            "{} {}{}",
            format!("warning[{}]:", issue.code).style(COLORS.warning),
            issue.message,
            location
        );
    }

    println!(
        "{} {}: {} columns, {} cards",
        "ok".style(COLORS.success),
        data.file,
        data.columns,
        data.tasks
    );
}
