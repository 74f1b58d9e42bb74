//! Identifier generation for columns and tasks
//!
//! Ids are ephemeral: they exist only for the lifetime of an in-memory board
//! and are never written to the Markdown file.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of fresh column and task identifiers
pub trait IdGenerator: Send + Sync {
    /// Issue an id for a new column
    fn new_column_id(&self) -> String;

    /// Issue an id for a new task
    fn new_task_id(&self) -> String;
}

/// Random v4 UUID ids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn new_column_id(&self) -> String {
        format!("col-{}", Uuid::new_v4())
    }

    fn new_task_id(&self) -> String {
        format!("task-{}", Uuid::new_v4())
    }
}

/// Counter-based ids (`col-1`, `task-2`, ...), deterministic per instance
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    /// Start counting from 1
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl IdGenerator for SequentialIds {
    fn new_column_id(&self) -> String {
        format!("col-{}", self.bump())
    }

    fn new_task_id(&self) -> String {
        format!("task-{}", self.bump())
    }
}
