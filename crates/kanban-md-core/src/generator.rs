//! Board to Markdown serialization
//!
//! The inverse of [`crate::parser`]. Front matter and footer are written back
//! verbatim, include-mode columns keep their directive and never write their
//! derived tasks.

use crate::types::Board;

/// Serialize a board to its Markdown document
pub fn generate_markdown(board: &Board) -> String {
    let mut out = String::new();

    if let Some(header) = &board.yaml_header {
        out.push_str(header);
        out.push_str("\n\n");
    }

    for column in &board.columns {
        out.push_str("## ");
        out.push_str(&column.title);
        out.push('\n');

        if !column.include_mode {
            for task in &column.tasks {
                out.push_str("- [ ] ");
                out.push_str(&task.title);
                out.push('\n');

                if let Some(description) = task.description.as_deref() {
                    if !description.trim().is_empty() {
                        for line in description.split('\n') {
                            if !line.is_empty() {
                                out.push_str("  ");
                                out.push_str(line);
                            }
                            out.push('\n');
                        }
                    }
                }
            }
        }

        out.push('\n');
    }

    match &board.kanban_footer {
        Some(footer) => {
            // Exactly one blank line between the last column and the footer
            let body_len = out.trim_end_matches('\n').len();
            out.truncate(body_len);
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(footer.trim_end_matches('\n'));
            out.push('\n');
        }
        None => {
            let body_len = out.trim_end_matches('\n').len();
            out.truncate(body_len);
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::include::NoIncludes;
    use crate::parser::MarkdownParser;
    use crate::types::{Column, Task};

    fn header() -> Option<String> {
        Some("---\n\nkanban-plugin: board\n\n---".to_string())
    }

    #[test]
    fn test_generate_basic_board() {
        let mut todo = Column::new("c1", "To Do");
        todo.tasks.push(Task::new("t1", "Buy milk", Some("Get 2% milk".to_string())));
        todo.tasks.push(Task::new("t2", "Call Bob", None));
        let board = Board {
            valid: true,
            yaml_header: header(),
            columns: vec![todo, Column::new("c2", "Done")],
            ..Default::default()
        };

        assert_eq!(
            generate_markdown(&board),
            "---\n\nkanban-plugin: board\n\n---\n\n## To Do\n- [ ] Buy milk\n  Get 2% milk\n- [ ] Call Bob\n\n## Done\n"
        );
    }

    #[test]
    fn test_generate_with_footer() {
        let board = Board {
            valid: true,
            yaml_header: header(),
            columns: vec![Column::new("c1", "A")],
            kanban_footer: Some("%% kanban:settings\n%%".to_string()),
            ..Default::default()
        };
        assert_eq!(
            generate_markdown(&board),
            "---\n\nkanban-plugin: board\n\n---\n\n## A\n\n%% kanban:settings\n%%\n"
        );
    }

    #[test]
    fn test_include_column_keeps_directive_and_drops_tasks() {
        let mut deck = Column::new("c1", "Talk !!!columninclude(deck.md)!!!");
        deck.include_mode = true;
        deck.tasks.push(Task::new("t1", "Slide", None));
        let board = Board {
            valid: true,
            yaml_header: header(),
            columns: vec![deck],
            ..Default::default()
        };
        let text = generate_markdown(&board);
        assert!(text.contains("## Talk !!!columninclude(deck.md)!!!\n"));
        assert!(!text.contains("- [ ] Slide"));
    }

    #[test]
    fn test_blank_description_not_written() {
        let mut col = Column::new("c1", "A");
        col.tasks.push(Task::new("t1", "T", Some("   ".to_string())));
        let board = Board {
            valid: true,
            columns: vec![col],
            ..Default::default()
        };
        assert_eq!(generate_markdown(&board), "## A\n- [ ] T\n");
    }

    #[test]
    fn test_round_trip() {
        let content = "---\n\nkanban-plugin: board\n\n---\n\n## Backlog #row2\n- [ ] First\n  line a\n\n  line c\n- [ ] Second\n\n## Deck !!!columninclude(deck.md)!!!\n\n## Done #sort-byname\n- [ ] Third @alice @2026-01-05\n\n%% kanban:settings\n```\n{}\n```\n%%\n";
        let ids = SequentialIds::new();
        let parser = MarkdownParser::new(&ids, &NoIncludes);

        let first = parser.parse(content, None).board;
        let text = generate_markdown(&first);
        let second = parser.parse(&text, None).board;

        assert_eq!(text, content);
        assert_eq!(first.yaml_header, second.yaml_header);
        assert_eq!(first.kanban_footer, second.kanban_footer);
        assert_eq!(first.columns.len(), second.columns.len());
        for (a, b) in first.columns.iter().zip(&second.columns) {
            assert_eq!(a.title, b.title);
            assert_eq!(a.include_mode, b.include_mode);
            let a_tasks: Vec<_> = a.tasks.iter().map(|t| (&t.title, &t.description)).collect();
            let b_tasks: Vec<_> = b.tasks.iter().map(|t| (&t.title, &t.description)).collect();
            assert_eq!(a_tasks, b_tasks);
        }
    }
}
