//! JSON output formatting

use kanban_md_core::{Board, Task};
use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: &str = "1";

/// JSON response envelope shared by every command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse<T> {
    /// Schema version for forward compatibility
    pub schema_version: String,
    /// Command that generated this response
    pub command: String,
    /// Status: "ok" or "error"
    pub status: String,
    /// Command-specific payload
    pub data: T,
    /// Problems found while running the command
    pub issues: Vec<JsonIssue>,
}

impl<T: Serialize> JsonResponse<T> {
    /// Create a successful response
    pub fn ok(command: &str, data: T) -> Self {
        Self::ok_with_issues(command, data, vec![])
    }

    /// Create a successful response with issues
    pub fn ok_with_issues(command: &str, data: T, issues: Vec<JsonIssue>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            status: "ok".to_string(),
            data,
            issues,
        }
    }

    /// Create an error response
    pub fn error(command: &str, data: T, issues: Vec<JsonIssue>) -> Self {
        Self {
            status: "error".to_string(),
            ..Self::ok_with_issues(command, data, issues)
        }
    }

    /// Print as pretty JSON on stdout
    pub fn print(&self) -> Result<(), String> {
        let text = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        println!("{}", text);
        Ok(())
    }
}

/// Issue object structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonIssue {
    /// Error/warning code (e.g., "E001")
    pub code: String,
    /// Severity level
    pub severity: String,
    /// Human-readable message
    pub message: String,
    /// File the issue refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Column the issue refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl JsonIssue {
    /// An error-level issue
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::new(code, "error", message)
    }

    /// A warning-level issue
    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self::new(code, "warning", message)
    }

    fn new(code: &str, severity: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity: severity.to_string(),
            message: message.into(),
            file: None,
            column: None,
        }
    }

    /// Set the file path
    pub fn with_file(mut self, file: &str) -> Self {
        self.file = Some(file.to_string());
        self
    }

    /// Set the column title
    pub fn with_column(mut self, column: &str) -> Self {
        self.column = Some(column.to_string());
        self
    }
}

/// Data payload for show command
#[derive(Debug, Clone, Serialize)]
pub struct ShowData {
    /// Board file
    pub file: String,
    /// The parsed board
    pub board: Board,
}

/// Data payload for check command
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckData {
    /// Board file
    pub file: String,
    /// Whether the front matter marks a board
    pub valid: bool,
    /// Number of columns
    pub columns: usize,
    /// Number of cards, including cards loaded from include files
    pub tasks: usize,
    /// Standalone include references
    pub included_files: Vec<String>,
    /// Column include references
    pub column_include_files: Vec<String>,
    /// Referenced files that do not exist
    pub missing_files: Vec<String>,
}

/// Data payload for format command
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormatData {
    /// Board file
    pub file: String,
    /// Whether formatting changed the document
    pub changed: bool,
    /// Whether the file was rewritten
    pub written: bool,
    /// Whether duplicate row tags were collapsed
    pub rows_cleaned: bool,
    /// Cards moved by automatic sorting
    pub moved: usize,
    /// Formatted document, when not written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
}

/// Data payload for sort command
#[derive(Debug, Clone, Default, Serialize)]
pub struct SortData {
    /// Board file
    pub file: String,
    /// Date day offsets were measured from
    pub today: String,
    /// Cards that changed column
    pub moved: usize,
    /// Columns re-ordered by a sort tag
    pub sorted_columns: usize,
    /// Whether the file was rewritten
    pub written: bool,
    /// Sorted document, when not written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
}

/// Data payload for slides command
#[derive(Debug, Clone, Default, Serialize)]
pub struct SlidesData {
    /// Slide document
    pub file: String,
    /// One card per slide
    pub tasks: Vec<Task>,
}
