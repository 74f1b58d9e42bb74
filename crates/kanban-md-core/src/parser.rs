//! Board file parsing
//!
//! Parses a Kanban board from its Markdown representation. The document is:
//! - A front matter block between `---` lines that must contain
//!   `kanban-plugin: board`
//! - `## ` headings, one per column
//! - `- ` task lines, each followed by two-space indented description lines
//! - An optional trailing `%%` settings block, kept verbatim
//!
//! Parsing never fails. A document without the marker yields an invalid,
//! empty board; anything the scanner does not understand is skipped.

use std::path::Path;

use crate::ids::{IdGenerator, UuidIds};
use crate::include::{self, FsIncludeReader, IncludeReader};
use crate::slides;
use crate::types::{BOARD_MARKER, Board, Column, ParseResult, Task};

const COLUMN_PREFIX: &str = "## ";
const TASK_PREFIX: &str = "- ";
const FOOTER_PREFIX: &str = "%%";
const FRONT_MATTER_DELIMITER: &str = "---";
const DESCRIPTION_INDENT: &str = "  ";

/// Checkbox markers consumed together with the task prefix
const CHECKBOX_MARKERS: [&str; 3] = ["[ ] ", "[x] ", "[X] "];

/// Parse a board with random ids, reading include files from disk
///
/// `base_path` is the directory include paths are resolved against.
pub fn parse_markdown(content: &str, base_path: Option<&Path>) -> ParseResult {
    MarkdownParser::new(&UuidIds, &FsIncludeReader).parse(content, base_path)
}

/// Board parser with injected id and include collaborators
pub struct MarkdownParser<'a> {
    ids: &'a dyn IdGenerator,
    reader: &'a dyn IncludeReader,
}

/// Where the scanner is in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeYaml,
    InYaml,
    Body,
    Footer,
}

/// A task whose description lines are still being collected
struct PendingTask {
    task: Task,
    lines: Vec<String>,
}

impl PendingTask {
    fn finish(self) -> Task {
        let joined = self.lines.join("\n");
        let description = joined.trim_end();
        Task {
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            ..self.task
        }
    }
}

impl<'a> MarkdownParser<'a> {
    /// Create a parser
    pub fn new(ids: &'a dyn IdGenerator, reader: &'a dyn IncludeReader) -> Self {
        Self { ids, reader }
    }

    /// Parse a board document
    pub fn parse(&self, content: &str, base_path: Option<&Path>) -> ParseResult {
        let content = content.replace("\r\n", "\n").replace('\r', "\n");

        let mut result = ParseResult {
            included_files: include::standalone_include_paths(&content),
            ..Default::default()
        };
        let board = &mut result.board;

        let mut state = ScanState::BeforeYaml;
        let mut yaml_lines: Vec<&str> = Vec::new();
        let mut footer_lines: Vec<&str> = Vec::new();
        let mut column: Option<Column> = None;
        let mut pending: Option<PendingTask> = None;

        for line in content.split('\n') {
            match state {
                ScanState::BeforeYaml => {
                    if line.trim() == FRONT_MATTER_DELIMITER {
                        yaml_lines.push(line);
                        state = ScanState::InYaml;
                    }
                    continue;
                }
                ScanState::InYaml => {
                    yaml_lines.push(line);
                    if line.trim() == FRONT_MATTER_DELIMITER {
                        let header = yaml_lines.join("\n");
                        board.valid = header.contains(BOARD_MARKER);
                        board.yaml_header = Some(header);
                        if !board.valid {
                            tracing::debug!("front matter lacks board marker");
                            return result;
                        }
                        state = ScanState::Body;
                    }
                    continue;
                }
                ScanState::Footer => {
                    footer_lines.push(line);
                    continue;
                }
                ScanState::Body => {}
            }

            if line.starts_with(FOOTER_PREFIX) {
                finish_task(&mut pending, &mut column);
                footer_lines.push(line);
                state = ScanState::Footer;
                continue;
            }

            if let Some(title) = line.strip_prefix(COLUMN_PREFIX) {
                finish_task(&mut pending, &mut column);
                if let Some(done) = column.take() {
                    board.columns.push(done);
                }
                column = Some(self.start_column(
                    title,
                    base_path,
                    &mut result.column_include_files,
                ));
                continue;
            }

            if let Some(rest) = line.strip_prefix(TASK_PREFIX) {
                finish_task(&mut pending, &mut column);
                // Include-mode columns take their tasks from the slide files only
                if column.as_ref().is_some_and(|c| !c.include_mode) {
                    pending = Some(PendingTask {
                        task: Task::new(self.ids.new_task_id(), strip_checkbox(rest), None),
                        lines: Vec::new(),
                    });
                }
                continue;
            }

            if let Some(task) = pending.as_mut() {
                let text = line.strip_prefix(DESCRIPTION_INDENT).unwrap_or(line);
                task.lines.push(text.to_string());
            }
        }

        finish_task(&mut pending, &mut column);
        if let Some(done) = column.take() {
            board.columns.push(done);
        }

        if !board.valid {
            // Never saw a closing delimiter
            board.columns.clear();
            return result;
        }

        if !footer_lines.is_empty() {
            let footer = footer_lines.join("\n");
            board.kanban_footer = Some(footer.trim_end_matches('\n').to_string());
        }

        tracing::debug!(
            columns = board.columns.len(),
            tasks = board.task_count(),
            includes = result.included_files.len(),
            "parsed board"
        );
        result
    }

    fn start_column(
        &self,
        title: &str,
        base_path: Option<&Path>,
        column_include_files: &mut Vec<String>,
    ) -> Column {
        let mut column = Column::new(self.ids.new_column_id(), title);
        let includes = include::column_include_paths(title);
        if includes.is_empty() {
            return column;
        }

        for path in &includes {
            if !column_include_files.contains(path) {
                column_include_files.push(path.clone());
            }
        }
        column.include_mode = true;
        column.display_title = Some(include::include_display_title(title, &includes));
        column.original_title = Some(title.to_string());
        column.include_files = Some(includes);
        self.load_column_includes(&mut column, base_path);
        column
    }

    /// Regenerate an include-mode column's tasks from its slide files
    ///
    /// Unreadable files are logged and skipped. Returns the number of tasks
    /// loaded; regular columns are left untouched and report zero.
    pub fn load_column_includes(&self, column: &mut Column, base_path: Option<&Path>) -> usize {
        if !column.include_mode {
            return 0;
        }
        column.tasks.clear();
        for path in column.include_files.iter().flatten() {
            let resolved = include::resolve_include_path(base_path, path);
            match self.reader.read(&resolved) {
                Some(text) => column
                    .tasks
                    .extend(slides::slides_to_tasks(&text, self.ids)),
                None => tracing::warn!(
                    path = %resolved.display(),
                    "column include file not found, skipping"
                ),
            }
        }
        column.tasks.len()
    }
}

fn finish_task(pending: &mut Option<PendingTask>, column: &mut Option<Column>) {
    if let (Some(task), Some(column)) = (pending.take(), column.as_mut()) {
        column.tasks.push(task.finish());
    }
}

fn strip_checkbox(rest: &str) -> &str {
    CHECKBOX_MARKERS
        .iter()
        .find_map(|marker| rest.strip_prefix(marker))
        .unwrap_or(rest)
}
