//! Core data types for kanban-md

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Literal that must appear in the front matter of a board document
pub const BOARD_MARKER: &str = "kanban-plugin: board";

/// A parsed kanban board
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Whether the front matter carried the board marker
    pub valid: bool,
    /// Board title (not part of the Markdown dialect)
    pub title: String,
    /// Columns in screen order
    pub columns: Vec<Column>,
    /// Verbatim front matter, delimiters included
    pub yaml_header: Option<String>,
    /// Verbatim trailing settings block, without trailing newlines
    pub kanban_footer: Option<String>,
}

impl Board {
    /// Find a column by id
    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Find a column by id, mutably
    pub fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    /// Index of a column by id
    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    /// Total number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

/// A column of the board
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Ephemeral identifier, regenerated on every parse
    pub id: String,
    /// Raw title including row, gather, sort and include tags
    pub title: String,
    /// Tasks in display order
    pub tasks: Vec<Task>,
    /// True when the title carries a column include directive
    #[serde(default)]
    pub include_mode: bool,
    /// Paths named by the include directives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_files: Option<Vec<String>>,
    /// Full title with directive syntax (include mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    /// Title with directives removed (include mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_title: Option<String>,
}

impl Column {
    /// Create an empty regular column
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Find a task by id
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Index of a task by id
    pub fn task_index(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}

/// A single card
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Ephemeral identifier, unique within its column
    pub id: String,
    /// Title line text
    pub title: String,
    /// Indentation-stripped description, never empty when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Task {
    /// Create a task
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description,
        }
    }

    /// Title and description joined, the text card tags are read from
    pub fn full_text(&self) -> String {
        match &self.description {
            Some(desc) => format!("{}\n{}", self.title, desc),
            None => self.title.clone(),
        }
    }
}

/// Output of parsing a board document
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// The parsed board
    pub board: Board,
    /// Distinct standalone include references, in first-seen order
    pub included_files: Vec<String>,
    /// Distinct column include references, in first-seen order
    pub column_include_files: Vec<String>,
}

/// Task order per column, captured at load time
///
/// Used only to restore the "unsorted" view. It is never refreshed
/// automatically; call [`OriginalOrder::capture`] again after a reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginalOrder {
    order: HashMap<String, Vec<String>>,
}

impl OriginalOrder {
    /// Snapshot the current task order of every column
    pub fn capture(board: &Board) -> Self {
        let order = board
            .columns
            .iter()
            .map(|c| (c.id.clone(), c.tasks.iter().map(|t| t.id.clone()).collect()))
            .collect();
        Self { order }
    }

    /// Captured task ids for a column
    pub fn get(&self, column_id: &str) -> Option<&[String]> {
        self.order.get(column_id).map(Vec::as_slice)
    }

    /// Forget a column
    pub fn remove(&mut self, column_id: &str) -> Option<Vec<String>> {
        self.order.remove(column_id)
    }

    /// Whether a column has a captured order
    pub fn contains(&self, column_id: &str) -> bool {
        self.order.contains_key(column_id)
    }
}

/// Sort modes for a single column
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Stable lexicographic order by title
    Title,
    /// Restore the captured original order
    Unsorted,
}

impl SortMode {
    /// Parse a sort mode name, returning None for unknown names
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "title" => Some(SortMode::Title),
            "unsorted" => Some(SortMode::Unsorted),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        let mut todo = Column::new("c1", "Todo");
        todo.tasks.push(Task::new("t1", "One", None));
        todo.tasks.push(Task::new("t2", "Two", Some("details".to_string())));
        Board {
            valid: true,
            columns: vec![todo, Column::new("c2", "Done")],
            ..Default::default()
        }
    }

    #[test]
    fn test_lookup_helpers() {
        let board = board();
        assert_eq!(board.column_index("c2"), Some(1));
        assert!(board.column("missing").is_none());
        assert_eq!(board.column("c1").unwrap().task_index("t2"), Some(1));
        assert_eq!(board.task_count(), 2);
    }

    #[test]
    fn test_full_text() {
        let board = board();
        let col = board.column("c1").unwrap();
        assert_eq!(col.task("t1").unwrap().full_text(), "One");
        assert_eq!(col.task("t2").unwrap().full_text(), "Two\ndetails");
    }

    #[test]
    fn test_original_order_capture() {
        let board = board();
        let mut order = OriginalOrder::capture(&board);
        assert_eq!(order.get("c1").unwrap(), &["t1".to_string(), "t2".to_string()]);
        assert!(order.get("c2").unwrap().is_empty());
        assert!(order.remove("c1").is_some());
        assert!(!order.contains("c1"));
    }

    #[test]
    fn test_board_json_field_names() {
        let json = serde_json::to_value(board()).unwrap();
        assert!(json.get("yamlHeader").is_some());
        assert!(json.get("kanbanFooter").is_some());
        assert_eq!(json["columns"][0]["includeMode"], false);
        assert!(json["columns"][0].get("includeFiles").is_none());
    }

    #[test]
    fn test_sort_mode_parse() {
        assert_eq!(SortMode::parse("Title"), Some(SortMode::Title));
        assert_eq!(SortMode::parse("unsorted"), Some(SortMode::Unsorted));
        assert_eq!(SortMode::parse("bydate"), None);
    }
}
