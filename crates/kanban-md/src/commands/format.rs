//! Implementation of the `kanban-md format` command

use std::path::Path;

use kanban_md_core::{auto_sort, generate_markdown, ops};
use owo_colors::OwoColorize;

use crate::board_file;
use crate::colors::COLORS;
use crate::output::{FormatData, JsonResponse};

/// Run the format command
pub fn run_format(
    file: &Path,
    write: bool,
    config: Option<&Path>,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    let mut data = FormatData {
        file: file.display().to_string(),
        ..Default::default()
    };

    let loaded = match board_file::load_board(file, config) {
        Ok(loaded) => loaded,
        Err(err) => return super::report_failure("format", file, &err, data, json_output),
    };
    let mut board = loaded.parsed.board;
    if !board.valid {
        return super::report_invalid("format", file, data, json_output);
    }

    if loaded.config.kanban.cleanup_rows_on_format {
        data.rows_cleaned = ops::cleanup_row_tags(&mut board);
    }
    if loaded.config.kanban.sort_on_format {
        let today = chrono::Local::now().date_naive();
        data.moved = auto_sort(&mut board, today).moved;
    }

    let markdown = generate_markdown(&board);
    data.changed = markdown != loaded.content;

    if write {
        if data.changed {
            if let Err(err) = board_file::save_board(file, &markdown) {
                return super::report_failure("format", file, &err, data, json_output);
            }
            data.written = true;
        }
    } else {
        data.markdown = Some(markdown);
    }

    if json_output {
        JsonResponse::ok("format", &data).print()?;
        return Ok(0);
    }

    match &data.markdown {
        Some(markdown) => print!("{}", markdown),
        None if quiet => {}
        None if data.written => println!("{} {}", "formatted".style(COLORS.success), data.file),
        None => println!("{} {}", "unchanged".style(COLORS.muted), data.file),
    }

    Ok(0)
}
