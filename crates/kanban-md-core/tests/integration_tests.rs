//! Integration tests for kanban-md-core
//!
//! These tests drive the public API against the fixture boards.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use kanban_md_core::ops::{self, TaskEdit};
use kanban_md_core::{
    MarkdownParser, NoIncludes, OriginalOrder, SequentialIds, SortMode, auto_sort,
    generate_markdown, parse_markdown,
};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/fixtures");

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("{}/{}", FIXTURES_DIR, name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

fn titles(tasks: &[kanban_md_core::Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.title.as_str()).collect()
}

#[test]
fn test_basic_fixture_round_trip() {
    let content = fixture("valid/basic.md");
    let result = parse_markdown(&content, None);

    assert!(result.board.valid);
    assert_eq!(result.board.columns.len(), 3);
    assert_eq!(generate_markdown(&result.board), content);
}

#[test]
fn test_to_do_scenario() {
    let content = fixture("valid/basic.md");
    let board = parse_markdown(&content, None).board;

    let todo = &board.columns[0];
    assert_eq!(todo.title, "To Do");
    assert_eq!(todo.tasks.len(), 2);
    assert_eq!(todo.tasks[0].title, "Buy milk");
    assert_eq!(todo.tasks[0].description.as_deref(), Some("Get 2% milk"));
    assert_eq!(todo.tasks[1].title, "Call Bob @bob");
    assert_eq!(todo.tasks[1].description, None);

    let doing = &board.columns[1];
    assert_eq!(
        doing.tasks[0].description.as_deref(),
        Some("Outline first\n\nThen draft")
    );
}

#[test]
fn test_reparse_is_stable() {
    let content = fixture("valid/basic.md");
    let first = generate_markdown(&parse_markdown(&content, None).board);
    let second = generate_markdown(&parse_markdown(&first, None).board);
    assert_eq!(first, second);
}

#[test]
fn test_invalid_fixture_has_no_columns() {
    let content = fixture("invalid/no-marker.md");
    let mut board = parse_markdown(&content, None).board;

    assert!(!board.valid);
    assert!(board.columns.is_empty());
    let ids = SequentialIds::new();
    assert!(ops::add_column(&mut board, &ids, "New").is_err());
}

#[test]
fn test_column_includes_resolved_from_fixture_dir() {
    let content = fixture("valid/includes.md");
    let base = Path::new(FIXTURES_DIR).join("valid");
    let result = parse_markdown(&content, Some(&base));

    assert_eq!(result.included_files, vec!["notes.md"]);
    assert_eq!(result.column_include_files, vec!["deck.md"]);

    let talk = &result.board.columns[1];
    assert!(talk.include_mode);
    assert_eq!(talk.display_title.as_deref(), Some("Talk"));
    assert_eq!(titles(&talk.tasks), vec!["Intro", "Agenda", "Closing thoughts"]);
    assert_eq!(talk.tasks[1].description.as_deref(), Some("- Parsing\n- Sorting"));

    // Slide tasks are never written back into the board document
    let generated = generate_markdown(&result.board);
    assert!(generated.contains("## Talk !!!columninclude(deck.md)!!!\n"));
    assert!(!generated.contains("Intro"));
}

#[test]
fn test_missing_include_leaves_column_empty() {
    let content = fixture("valid/includes.md");
    let result = parse_markdown(&content, Some(Path::new("/nonexistent")));
    let talk = &result.board.columns[1];
    assert!(talk.include_mode);
    assert!(talk.tasks.is_empty());
}

#[test]
fn test_include_toggle_and_reload() {
    let content = fixture("valid/basic.md");
    let ids = SequentialIds::new();
    let parser = MarkdownParser::new(&ids, &kanban_md_core::FsIncludeReader);
    let mut board = parser.parse(&content, None).board;
    let column_id = board.columns[0].id.clone();

    ops::edit_column_title(&mut board, &column_id, "Deck !!!columninclude(deck.md)!!!").unwrap();
    let column = board.column_mut(&column_id).unwrap();
    assert!(column.include_mode);
    assert!(column.tasks.is_empty());
    assert_eq!(column.display_title.as_deref(), Some("Deck"));

    let base = Path::new(FIXTURES_DIR).join("valid");
    assert_eq!(parser.load_column_includes(column, Some(&base)), 3);

    ops::edit_column_title(&mut board, &column_id, "Deck").unwrap();
    let column = board.column(&column_id).unwrap();
    assert!(!column.include_mode);
    assert!(column.include_files.is_none());
    assert!(column.original_title.is_none());
    assert!(column.display_title.is_none());
    assert_eq!(column.tasks.len(), 3);
}

#[test]
fn test_edit_then_generate() {
    let content = fixture("valid/basic.md");
    let ids = SequentialIds::new();
    let mut board = MarkdownParser::new(&ids, &NoIncludes).parse(&content, None).board;
    let todo = board.columns[0].id.clone();
    let done = board.columns[2].id.clone();
    let milk = board.columns[0].tasks[0].id.clone();

    ops::edit_task(
        &mut board,
        &todo,
        &milk,
        TaskEdit::default().title("Buy oat milk").clear_description(),
    )
    .unwrap();
    ops::move_task_to_column(&mut board, &milk, &todo, &done).unwrap();

    let generated = generate_markdown(&board);
    assert!(generated.contains("## Done #row2\n- [ ] Ship release\n- [ ] Buy oat milk\n"));
    assert!(!generated.contains("Get 2% milk"));
}

#[test]
fn test_unsorted_restores_original_order() {
    let content = fixture("valid/basic.md");
    let ids = SequentialIds::new();
    let mut board = MarkdownParser::new(&ids, &NoIncludes).parse(&content, None).board;
    let order = OriginalOrder::capture(&board);
    let todo = board.columns[0].id.clone();

    ops::sort_column(&mut board, &order, &todo, SortMode::Title).unwrap();
    assert_eq!(titles(&board.columns[0].tasks), vec!["Buy milk", "Call Bob @bob"]);

    let bob = board.columns[0].tasks[1].id.clone();
    ops::move_task_to_top(&mut board, &todo, &bob).unwrap();
    ops::sort_column(&mut board, &order, &todo, SortMode::Unsorted).unwrap();
    assert_eq!(titles(&board.columns[0].tasks), vec!["Buy milk", "Call Bob @bob"]);
}

#[test]
fn test_auto_sort_fixture() {
    let content = fixture("valid/autosort.md");
    let mut board = parse_markdown(&content, None).board;
    let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();

    let report = auto_sort(&mut board, today);

    assert_eq!(
        titles(&board.columns[0].tasks),
        vec!["Pinned @alice @sticky", "Untagged"]
    );
    assert_eq!(titles(&board.columns[1].tasks), vec!["Pair with @alice"]);
    assert_eq!(titles(&board.columns[2].tasks), vec!["Review with @bob"]);
    assert_eq!(titles(&board.columns[3].tasks), vec!["Call @carol"]);
    assert_eq!(report.moved, 3);

    // A second pass has nothing left to do
    assert_eq!(auto_sort(&mut board, today).moved, 0);
}
