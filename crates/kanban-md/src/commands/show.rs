//! Implementation of the `kanban-md show` command

use std::path::Path;

use kanban_md_core::ops::column_row;
use kanban_md_core::title::{MAX_ROW, MIN_ROW};
use kanban_md_core::{Board, Column, ColumnTitle};
use owo_colors::OwoColorize;

use crate::board_file;
use crate::colors::COLORS;
use crate::output::{JsonResponse, ShowData};

/// Run the show command
pub fn run_show(
    file: &Path,
    config: Option<&Path>,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    let loaded = match board_file::load_board(file, config) {
        Ok(loaded) => loaded,
        Err(err) => {
            let empty = ShowData {
                file: file.display().to_string(),
                board: Board::default(),
            };
            return super::report_failure("show", file, &err, empty, json_output);
        }
    };

    let data = ShowData {
        file: file.display().to_string(),
        board: loaded.parsed.board,
    };

    if !data.board.valid {
        return super::report_invalid("show", file, data, json_output);
    }

    if json_output {
        JsonResponse::ok("show", &data).print()?;
    } else if !quiet {
        print_board(&data.board);
    }

    Ok(0)
}

fn print_board(board: &Board) {
    println!(
        "{} ({} columns, {} cards)",
        board.title.style(COLORS.column),
        board.columns.len(),
        board.task_count()
    );

    let multi_row = board.columns.iter().any(|c| column_row(c) > MIN_ROW);
    for row in MIN_ROW..=MAX_ROW {
        let columns: Vec<&Column> = board
            .columns
            .iter()
            .filter(|c| column_row(c) == row)
            .collect();
        if columns.is_empty() {
            continue;
        }
        if multi_row {
            println!();
            println!("{}", format!("Row {}", row).style(COLORS.row));
        }
        for column in columns {
            print_column(column);
        }
    }
}

fn print_column(column: &Column) {
    let label = match &column.display_title {
        Some(display) => display.clone(),
        None => ColumnTitle::parse(&column.title).label(),
    };

    println!();
    print!("{}", label.style(COLORS.column));
    if let Some(files) = &column.include_files {
        print!(
            " {}",
            format!("[include: {}]", files.join(", ")).style(COLORS.muted)
        );
    }
    println!(" ({})", column.tasks.len());

    for task in &column.tasks {
        println!("  - {}", task.title);
        for line in task.description.iter().flat_map(|d| d.lines()) {
            println!("    {}", line.style(COLORS.muted));
        }
    }
}
