//! kanban-md-core: Markdown kanban boards as data
//!
//! This crate parses the Markdown kanban dialect into a [`Board`], edits it in
//! place, files cards automatically by their `@` tags, and writes it back out
//! byte-for-byte where nothing changed.

/// Core error types for board operations
pub mod error;

/// Configuration handling
pub mod config;

/// Core data types (Board, Column, Task, ...)
pub mod types;

/// Identifier generation
pub mod ids;

/// Include directives and include file reading
pub mod include;

/// Column title tags (rows, gather rules, sort order)
pub mod title;

/// Slide document conversion for include-mode columns
pub mod slides;

/// Markdown to board parsing
pub mod parser;

/// Board to Markdown generation
pub mod generator;

/// Board editing operations
pub mod ops;

/// `@` tag extraction from cards
pub mod card_meta;

/// Gather rule expressions
pub mod gather;

/// Automatic card filing
pub mod autosort;

// Re-exports for convenience
pub use autosort::{AutoSortReport, auto_sort};
pub use card_meta::CardMeta;
pub use config::{Config, KanbanConfig};
pub use error::KanbanError;
pub use gather::{Expr, GatherRule, parse_expr};
pub use generator::generate_markdown;
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use include::{FsIncludeReader, IncludeReader, NoIncludes};
pub use parser::{MarkdownParser, parse_markdown};
pub use slides::{Slide, parse_slides, slides_to_tasks, tasks_to_slides};
pub use title::{ColumnSort, ColumnTitle};
pub use types::{Board, Column, OriginalOrder, ParseResult, SortMode, Task};
