//! Implementation of the `kanban-md slides` command

use std::path::Path;

use kanban_md_core::{UuidIds, slides_to_tasks};
use owo_colors::OwoColorize;

use crate::board_file;
use crate::colors::COLORS;
use crate::output::{JsonResponse, SlidesData};

/// Run the slides command
pub fn run_slides(file: &Path, json_output: bool, quiet: bool) -> Result<i32, String> {
    let mut data = SlidesData {
        file: file.display().to_string(),
        ..Default::default()
    };

    let content = match board_file::read_text(file) {
        Ok(content) => content,
        Err(err) => return super::report_failure("slides", file, &err, data, json_output),
    };
    data.tasks = slides_to_tasks(&content, &UuidIds);

    if json_output {
        JsonResponse::ok("slides", &data).print()?;
    } else if !quiet {
        for (i, task) in data.tasks.iter().enumerate() {
            let title = if task.title.is_empty() {
                "(untitled)"
            } else {
                task.title.as_str()
            };
            println!("{}. {}", i + 1, title.style(COLORS.column));
            for line in task.description.iter().flat_map(|d| d.lines()) {
                println!("   {}", line.style(COLORS.muted));
            }
        }
    }

    Ok(0)
}
