//! In-place board editing operations
//!
//! Every operation validates before it touches the board: an `Err` means the
//! board is unchanged. Operations on an invalid board fail with
//! [`KanbanError::InvalidBoard`].
//!
//! Include-mode columns are read-only for anything that adds, edits or
//! removes cards: their tasks are regenerated from slide files on every
//! parse and never written back to the board document.

use crate::error::KanbanError;
use crate::ids::IdGenerator;
use crate::include;
use crate::title::{ColumnTitle, MAX_ROW, MIN_ROW};
use crate::types::{Board, Column, OriginalOrder, SortMode, Task};

/// Field changes for [`edit_task`]; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// New title
    pub title: Option<String>,
    /// New description; `Some(None)` or an empty string clears it
    pub description: Option<Option<String>>,
}

impl TaskEdit {
    /// Change the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Change the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Remove the description
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }
}

fn ensure_valid(board: &Board) -> Result<(), KanbanError> {
    if board.valid {
        Ok(())
    } else {
        Err(KanbanError::InvalidBoard)
    }
}

fn column_index(board: &Board, column_id: &str) -> Result<usize, KanbanError> {
    ensure_valid(board)?;
    board
        .column_index(column_id)
        .ok_or_else(|| KanbanError::column_not_found(column_id))
}

fn column_mut<'b>(board: &'b mut Board, column_id: &str) -> Result<&'b mut Column, KanbanError> {
    let index = column_index(board, column_id)?;
    Ok(&mut board.columns[index])
}

/// Column whose cards may be authored (not include mode)
fn writable_column_mut<'b>(
    board: &'b mut Board,
    column_id: &str,
) -> Result<&'b mut Column, KanbanError> {
    let column = column_mut(board, column_id)?;
    if column.include_mode {
        return Err(KanbanError::IncludeColumn {
            id: column_id.to_string(),
        });
    }
    Ok(column)
}

fn task_index(column: &Column, task_id: &str) -> Result<usize, KanbanError> {
    column
        .task_index(task_id)
        .ok_or_else(|| KanbanError::task_not_found(task_id, &column.id))
}

fn validate_row(row: u8) -> Result<u8, KanbanError> {
    if (MIN_ROW..=MAX_ROW).contains(&row) {
        Ok(row)
    } else {
        Err(KanbanError::InvalidRow { row })
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}

// === Columns ===

/// Append a new empty column, returning its id
pub fn add_column(
    board: &mut Board,
    ids: &dyn IdGenerator,
    title: &str,
) -> Result<String, KanbanError> {
    ensure_valid(board)?;
    let column = Column::new(ids.new_column_id(), title);
    let id = column.id.clone();
    board.columns.push(column);
    Ok(id)
}

/// Insert a new empty column directly before another one
pub fn insert_column_before(
    board: &mut Board,
    ids: &dyn IdGenerator,
    column_id: &str,
    title: &str,
) -> Result<String, KanbanError> {
    let index = column_index(board, column_id)?;
    insert_column_at(board, ids, index, title)
}

/// Insert a new empty column directly after another one
pub fn insert_column_after(
    board: &mut Board,
    ids: &dyn IdGenerator,
    column_id: &str,
    title: &str,
) -> Result<String, KanbanError> {
    let index = column_index(board, column_id)?;
    insert_column_at(board, ids, index + 1, title)
}

fn insert_column_at(
    board: &mut Board,
    ids: &dyn IdGenerator,
    index: usize,
    title: &str,
) -> Result<String, KanbanError> {
    let column = Column::new(ids.new_column_id(), title);
    let id = column.id.clone();
    board.columns.insert(index, column);
    Ok(id)
}

/// Remove a column with its tasks and its captured original order
pub fn delete_column(
    board: &mut Board,
    order: &mut OriginalOrder,
    column_id: &str,
) -> Result<Column, KanbanError> {
    let index = column_index(board, column_id)?;
    order.remove(column_id);
    Ok(board.columns.remove(index))
}

/// Move a column from one index to another
pub fn move_column(board: &mut Board, from: usize, to: usize) -> Result<(), KanbanError> {
    ensure_valid(board)?;
    let len = board.columns.len();
    if from >= len {
        return Err(KanbanError::InvalidIndex { index: from, len });
    }
    if to >= len || from == to {
        return Err(KanbanError::InvalidIndex { index: to, len });
    }
    let column = board.columns.remove(from);
    board.columns.insert(to, column);
    Ok(())
}

/// Move a column and place it in a layout row
///
/// Moving within the same index is allowed here when only the row changes.
pub fn move_column_with_row(
    board: &mut Board,
    from: usize,
    to: usize,
    row: u8,
) -> Result<(), KanbanError> {
    ensure_valid(board)?;
    let row = validate_row(row)?;
    let len = board.columns.len();
    if from >= len || to >= len {
        return Err(KanbanError::InvalidIndex {
            index: from.max(to),
            len,
        });
    }
    let mut column = board.columns.remove(from);
    column.title = ColumnTitle::parse(&column.title).with_row(row);
    board.columns.insert(to, column);
    Ok(())
}

/// Rebuild the column order after a drag, moving one column into a row
///
/// The moved column's row tag is rewritten to `target_row`, then the column
/// list is rebuilt to follow `new_order`. Ids in `new_order` that do not
/// exist are ignored; columns missing from `new_order` are dropped.
pub fn reorder_columns(
    board: &mut Board,
    new_order: &[String],
    moved_id: &str,
    target_row: u8,
) -> Result<(), KanbanError> {
    let moved_index = column_index(board, moved_id)?;
    let row = validate_row(target_row)?;

    let moved = &mut board.columns[moved_index];
    moved.title = ColumnTitle::parse(&moved.title).with_row(row);

    let mut remaining = std::mem::take(&mut board.columns);
    let mut rebuilt = Vec::with_capacity(new_order.len());
    for id in new_order {
        if let Some(pos) = remaining.iter().position(|c| &c.id == id) {
            rebuilt.push(remaining.swap_remove(pos));
        }
    }
    if !remaining.is_empty() {
        tracing::debug!(dropped = remaining.len(), "columns missing from new order");
    }
    board.columns = rebuilt;
    Ok(())
}

/// Effective layout row of a column (1-4)
pub fn column_row(column: &Column) -> u8 {
    ColumnTitle::parse(&column.title).row()
}

/// Place a column in a layout row, replacing any row tags
pub fn set_column_row(board: &mut Board, column_id: &str, row: u8) -> Result<(), KanbanError> {
    let row = validate_row(row)?;
    let column = column_mut(board, column_id)?;
    column.title = ColumnTitle::parse(&column.title).with_row(row);
    Ok(())
}

/// Replace a column title, switching include mode on or off as needed
///
/// Gaining an include directive drops authored tasks: include-mode tasks are
/// loaded from the slide files (see
/// [`MarkdownParser::load_column_includes`](crate::parser::MarkdownParser::load_column_includes)).
/// Losing the directive keeps the loaded slides as ordinary cards.
pub fn edit_column_title(
    board: &mut Board,
    column_id: &str,
    title: &str,
) -> Result<(), KanbanError> {
    let column = column_mut(board, column_id)?;
    let includes = include::column_include_paths(title);
    column.title = title.to_string();

    if includes.is_empty() {
        if column.include_mode {
            tracing::debug!(column = %column_id, "include mode disabled");
        }
        column.include_mode = false;
        column.include_files = None;
        column.original_title = None;
        column.display_title = None;
        return Ok(());
    }

    let files_changed = column.include_files.as_ref() != Some(&includes);
    if !column.include_mode || files_changed {
        column.tasks.clear();
    }
    column.include_mode = true;
    column.display_title = Some(include::include_display_title(title, &includes));
    column.original_title = Some(title.to_string());
    column.include_files = Some(includes);
    Ok(())
}

/// Remove every task from a column, returning how many were removed
pub fn clear_column(board: &mut Board, column_id: &str) -> Result<usize, KanbanError> {
    let column = writable_column_mut(board, column_id)?;
    let removed = column.tasks.len();
    column.tasks.clear();
    Ok(removed)
}

/// Collapse repeated row tags in every column title to the last one
///
/// Returns whether any title changed; an invalid board is left alone.
pub fn cleanup_row_tags(board: &mut Board) -> bool {
    if !board.valid {
        return false;
    }
    let mut changed = false;
    for column in &mut board.columns {
        let title = ColumnTitle::parse(&column.title);
        if title.row_tag_count() > 1 {
            column.title = title.with_last_row_tag();
            changed = true;
        }
    }
    changed
}

// === Tasks ===

/// Append a task to a column, returning its id
pub fn add_task(
    board: &mut Board,
    ids: &dyn IdGenerator,
    column_id: &str,
    title: &str,
    description: Option<String>,
) -> Result<String, KanbanError> {
    let column = writable_column_mut(board, column_id)?;
    let task = Task::new(ids.new_task_id(), title, normalize_description(description));
    let id = task.id.clone();
    column.tasks.push(task);
    Ok(id)
}

/// Insert a task at `index` (clamped to the column length), returning its id
pub fn add_task_at_position(
    board: &mut Board,
    ids: &dyn IdGenerator,
    column_id: &str,
    index: usize,
    title: &str,
    description: Option<String>,
) -> Result<String, KanbanError> {
    let column = writable_column_mut(board, column_id)?;
    let task = Task::new(ids.new_task_id(), title, normalize_description(description));
    let id = task.id.clone();
    let index = index.min(column.tasks.len());
    column.tasks.insert(index, task);
    Ok(id)
}

/// Remove a task, returning it
pub fn delete_task(board: &mut Board, column_id: &str, task_id: &str) -> Result<Task, KanbanError> {
    let column = writable_column_mut(board, column_id)?;
    let index = task_index(column, task_id)?;
    Ok(column.tasks.remove(index))
}

/// Apply field changes to a task
pub fn edit_task(
    board: &mut Board,
    column_id: &str,
    task_id: &str,
    edit: TaskEdit,
) -> Result<(), KanbanError> {
    let column = writable_column_mut(board, column_id)?;
    let index = task_index(column, task_id)?;
    let task = &mut column.tasks[index];
    if let Some(title) = edit.title {
        task.title = title;
    }
    if let Some(description) = edit.description {
        task.description = normalize_description(description);
    }
    Ok(())
}

/// Copy a task directly after itself, returning the copy's id
pub fn duplicate_task(
    board: &mut Board,
    ids: &dyn IdGenerator,
    column_id: &str,
    task_id: &str,
) -> Result<String, KanbanError> {
    let column = writable_column_mut(board, column_id)?;
    let index = task_index(column, task_id)?;
    let copy = Task {
        id: ids.new_task_id(),
        ..column.tasks[index].clone()
    };
    let id = copy.id.clone();
    column.tasks.insert(index + 1, copy);
    Ok(id)
}

/// Insert an empty task directly before another one
pub fn insert_task_before(
    board: &mut Board,
    ids: &dyn IdGenerator,
    column_id: &str,
    task_id: &str,
) -> Result<String, KanbanError> {
    insert_empty_task(board, ids, column_id, task_id, 0)
}

/// Insert an empty task directly after another one
pub fn insert_task_after(
    board: &mut Board,
    ids: &dyn IdGenerator,
    column_id: &str,
    task_id: &str,
) -> Result<String, KanbanError> {
    insert_empty_task(board, ids, column_id, task_id, 1)
}

fn insert_empty_task(
    board: &mut Board,
    ids: &dyn IdGenerator,
    column_id: &str,
    task_id: &str,
    offset: usize,
) -> Result<String, KanbanError> {
    let column = writable_column_mut(board, column_id)?;
    let index = task_index(column, task_id)?;
    let task = Task::new(ids.new_task_id(), "", None);
    let id = task.id.clone();
    column.tasks.insert(index + offset, task);
    Ok(id)
}

/// Move a task to the top of its column
pub fn move_task_to_top(
    board: &mut Board,
    column_id: &str,
    task_id: &str,
) -> Result<(), KanbanError> {
    let column = column_mut(board, column_id)?;
    let index = task_index(column, task_id)?;
    if index == 0 {
        return Err(at_edge(task_id, "top"));
    }
    let task = column.tasks.remove(index);
    column.tasks.insert(0, task);
    Ok(())
}

/// Swap a task with the one above it
pub fn move_task_up(board: &mut Board, column_id: &str, task_id: &str) -> Result<(), KanbanError> {
    let column = column_mut(board, column_id)?;
    let index = task_index(column, task_id)?;
    if index == 0 {
        return Err(at_edge(task_id, "top"));
    }
    column.tasks.swap(index, index - 1);
    Ok(())
}

/// Swap a task with the one below it
pub fn move_task_down(
    board: &mut Board,
    column_id: &str,
    task_id: &str,
) -> Result<(), KanbanError> {
    let column = column_mut(board, column_id)?;
    let index = task_index(column, task_id)?;
    if index + 1 >= column.tasks.len() {
        return Err(at_edge(task_id, "bottom"));
    }
    column.tasks.swap(index, index + 1);
    Ok(())
}

/// Move a task to the bottom of its column
pub fn move_task_to_bottom(
    board: &mut Board,
    column_id: &str,
    task_id: &str,
) -> Result<(), KanbanError> {
    let column = column_mut(board, column_id)?;
    let index = task_index(column, task_id)?;
    if index + 1 >= column.tasks.len() {
        return Err(at_edge(task_id, "bottom"));
    }
    let task = column.tasks.remove(index);
    column.tasks.push(task);
    Ok(())
}

fn at_edge(task_id: &str, edge: &'static str) -> KanbanError {
    KanbanError::AlreadyAtEdge {
        id: task_id.to_string(),
        edge,
    }
}

/// Move a task into a column at `index` (clamped to the target length)
///
/// Source and target may be the same column.
pub fn move_task(
    board: &mut Board,
    task_id: &str,
    from_column_id: &str,
    to_column_id: &str,
    index: usize,
) -> Result<(), KanbanError> {
    let (from, to, task_pos) = locate_move(board, task_id, from_column_id, to_column_id)?;
    let task = board.columns[from].tasks.remove(task_pos);
    let target = &mut board.columns[to].tasks;
    let index = index.min(target.len());
    target.insert(index, task);
    Ok(())
}

/// Move a task to the end of another column
pub fn move_task_to_column(
    board: &mut Board,
    task_id: &str,
    from_column_id: &str,
    to_column_id: &str,
) -> Result<(), KanbanError> {
    let (from, to, task_pos) = locate_move(board, task_id, from_column_id, to_column_id)?;
    let task = board.columns[from].tasks.remove(task_pos);
    board.columns[to].tasks.push(task);
    Ok(())
}

/// Resolve and validate both columns and the task before anything moves
fn locate_move(
    board: &Board,
    task_id: &str,
    from_column_id: &str,
    to_column_id: &str,
) -> Result<(usize, usize, usize), KanbanError> {
    let from = column_index(board, from_column_id)?;
    let to = column_index(board, to_column_id)?;
    for index in [from, to] {
        let column = &board.columns[index];
        if column.include_mode {
            return Err(KanbanError::IncludeColumn {
                id: column.id.clone(),
            });
        }
    }
    let task_pos = task_index(&board.columns[from], task_id)?;
    Ok((from, to, task_pos))
}

/// Sort one column's tasks
///
/// `Title` sorts stably by title. `Unsorted` restores the order captured in
/// `order`; tasks that were not captured keep their relative order at the
/// end.
pub fn sort_column(
    board: &mut Board,
    order: &OriginalOrder,
    column_id: &str,
    mode: SortMode,
) -> Result<(), KanbanError> {
    let column = column_mut(board, column_id)?;
    match mode {
        SortMode::Title => column.tasks.sort_by(|a, b| a.title.cmp(&b.title)),
        SortMode::Unsorted => {
            let captured = order.get(column_id).unwrap_or(&[]);
            let mut remaining = std::mem::take(&mut column.tasks);
            let mut restored = Vec::with_capacity(remaining.len());
            for id in captured {
                if let Some(pos) = remaining.iter().position(|t| &t.id == id) {
                    restored.push(remaining.remove(pos));
                }
            }
            restored.extend(remaining);
            column.tasks = restored;
        }
    }
    Ok(())
}
