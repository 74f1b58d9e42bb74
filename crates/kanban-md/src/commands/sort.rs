//! Implementation of the `kanban-md sort` command

use std::path::Path;

use chrono::NaiveDate;
use kanban_md_core::{auto_sort, generate_markdown};
use owo_colors::OwoColorize;

use crate::board_file;
use crate::colors::COLORS;
use crate::output::{JsonResponse, SortData};

/// Run the sort command
pub fn run_sort(
    file: &Path,
    today: Option<NaiveDate>,
    write: bool,
    config: Option<&Path>,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let mut data = SortData {
        file: file.display().to_string(),
        today: today.format("%Y-%m-%d").to_string(),
        ..Default::default()
    };

    let loaded = match board_file::load_board(file, config) {
        Ok(loaded) => loaded,
        Err(err) => return super::report_failure("sort", file, &err, data, json_output),
    };
    let mut board = loaded.parsed.board;
    if !board.valid {
        return super::report_invalid("sort", file, data, json_output);
    }

    let report = auto_sort(&mut board, today);
    data.moved = report.moved;
    data.sorted_columns = report.sorted_columns;
    tracing::debug!(moved = report.moved, sorted = report.sorted_columns, "sorted board");

    let markdown = generate_markdown(&board);
    if write {
        if markdown != loaded.content {
            if let Err(err) = board_file::save_board(file, &markdown) {
                return super::report_failure("sort", file, &err, data, json_output);
            }
            data.written = true;
        }
    } else {
        data.markdown = Some(markdown);
    }

    if json_output {
        JsonResponse::ok("sort", &data).print()?;
        return Ok(0);
    }

    match &data.markdown {
        Some(markdown) => print!("{}", markdown),
        None if quiet => {}
        None => println!(
            "{} {}: moved {} cards, sorted {} columns",
            "sorted".style(COLORS.success),
            data.file,
            data.moved,
            data.sorted_columns
        ),
    }

    Ok(0)
}
