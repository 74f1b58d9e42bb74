//! Error types for kanban-md operations

use thiserror::Error;

/// Core error type for kanban-md operations
///
/// Malformed board content never produces one of these: the parser reports
/// structural problems through `Board::valid`. Errors are reserved for
/// operations that refer to something that does not exist, or that would
/// write into a derived (include-mode) column.
#[derive(Error, Debug)]
pub enum KanbanError {
    // === Board state errors (E001) ===
    /// E001: Board is missing its front matter marker
    #[error("E001: Board is not a valid kanban document")]
    InvalidBoard,

    // === Lookup errors (E002-E003) ===
    /// E002: Column id not present on the board
    #[error("E002: Column not found: {id}")]
    ColumnNotFound { id: String },

    /// E003: Task id not present in the column
    #[error("E003: Task not found: {id} (column: {column})")]
    TaskNotFound { id: String, column: String },

    // === Edit errors (E004-E007) ===
    /// E004: Column content is derived from an include file
    #[error("E004: Column {id} is generated from include files and cannot be edited")]
    IncludeColumn { id: String },

    /// E005: Task is already at the requested edge of its column
    #[error("E005: Task {id} is already at the {edge} of its column")]
    AlreadyAtEdge { id: String, edge: &'static str },

    /// E006: Index outside the column list or a no-op move
    #[error("E006: Invalid index {index} (length {len})")]
    InvalidIndex { index: usize, len: usize },

    /// E007: Row outside 1..=4
    #[error("E007: Invalid row {row} (must be 1-4)")]
    InvalidRow { row: u8 },

    // === Rule errors (E008) ===
    /// E008: Gather expression could not be parsed
    #[error("E008: Invalid gather rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    // === IO and system errors ===
    /// File not found or unreadable
    #[error("file not found or unreadable: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl KanbanError {
    /// Build a `TaskNotFound` for the given task and column ids
    pub fn task_not_found(id: &str, column: &str) -> Self {
        KanbanError::TaskNotFound {
            id: id.to_string(),
            column: column.to_string(),
        }
    }

    /// Build a `ColumnNotFound` for the given column id
    pub fn column_not_found(id: &str) -> Self {
        KanbanError::ColumnNotFound { id: id.to_string() }
    }

    /// Get the error code (e.g., "E001", "E002")
    pub fn code(&self) -> &'static str {
        match self {
            KanbanError::InvalidBoard => "E001",
            KanbanError::ColumnNotFound { .. } => "E002",
            KanbanError::TaskNotFound { .. } => "E003",
            KanbanError::IncludeColumn { .. } => "E004",
            KanbanError::AlreadyAtEdge { .. } => "E005",
            KanbanError::InvalidIndex { .. } => "E006",
            KanbanError::InvalidRow { .. } => "E007",
            KanbanError::InvalidRule { .. } => "E008",
            KanbanError::FileNotFound(_) | KanbanError::Io(_) => "E010",
            KanbanError::Config(_) => "E011",
        }
    }

    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            KanbanError::InvalidBoard => 1,

            KanbanError::ColumnNotFound { .. }
            | KanbanError::TaskNotFound { .. }
            | KanbanError::IncludeColumn { .. }
            | KanbanError::AlreadyAtEdge { .. }
            | KanbanError::InvalidIndex { .. }
            | KanbanError::InvalidRow { .. } => 3, // Rejected edit

            KanbanError::InvalidRule { .. } => 1,

            KanbanError::FileNotFound(_) | KanbanError::Io(_) => 2, // File errors

            KanbanError::Config(_) => 4, // Configuration error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = KanbanError::column_not_found("col-1");
        assert_eq!(err.code(), "E002");
        assert_eq!(err.exit_code(), 3);

        let err = KanbanError::InvalidBoard;
        assert_eq!(err.code(), "E001");
        assert_eq!(err.exit_code(), 1);

        let err = KanbanError::Config("bad toml".to_string());
        assert_eq!(err.code(), "E011");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_error_display() {
        let err = KanbanError::task_not_found("task-7", "col-2");
        assert_eq!(err.to_string(), "E003: Task not found: task-7 (column: col-2)");

        let err = KanbanError::AlreadyAtEdge {
            id: "task-1".to_string(),
            edge: "top",
        };
        assert!(err.to_string().contains("already at the top"));

        let err = KanbanError::InvalidRow { row: 7 };
        assert!(err.to_string().contains("must be 1-4"));

        let err = KanbanError::InvalidRule {
            rule: "day<".to_string(),
            reason: "missing value".to_string(),
        };
        assert_eq!(err.code(), "E008");
        assert_eq!(err.to_string(), "E008: Invalid gather rule 'day<': missing value");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: KanbanError = io.into();
        assert_eq!(err.code(), "E010");
        assert_eq!(err.exit_code(), 2);
    }
}
