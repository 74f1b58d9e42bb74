//! Automatic card filing
//!
//! Columns opt in with `#gather_<expr>` rules and an `#ungathered` catch-all.
//! [`auto_sort`] files every non-sticky card into the first column whose rule
//! claims it, then applies `#sort-bydate` / `#sort-byname` ordering.

use chrono::NaiveDate;
use serde::Serialize;

use crate::card_meta::CardMeta;
use crate::gather::GatherRule;
use crate::title::{ColumnSort, ColumnTitle};
use crate::types::{Board, Task};

/// What a call to [`auto_sort`] changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSortReport {
    /// Cards that changed column
    pub moved: usize,
    /// Columns whose cards were re-ordered by a `#sort-*` tag
    pub sorted_columns: usize,
}

/// Rules parsed from one column title
struct ColumnRules {
    rules: Vec<GatherRule>,
    ungathered: bool,
    sort: Option<ColumnSort>,
}

impl ColumnRules {
    fn from_title(title: &str) -> Self {
        let parsed = ColumnTitle::parse(title);
        Self {
            rules: parsed
                .gather_rules
                .iter()
                .map(|rule| GatherRule::parse(rule))
                .collect(),
            ungathered: parsed.ungathered,
            sort: parsed.sort,
        }
    }
}

struct PlannedMove {
    task_id: String,
    from: usize,
    to: usize,
}

/// File cards by their tags, then order sorted columns
///
/// Include-mode columns are skipped both as sources and destinations. Does
/// nothing on an invalid board.
pub fn auto_sort(board: &mut Board, today: NaiveDate) -> AutoSortReport {
    let mut report = AutoSortReport::default();
    if !board.valid {
        return report;
    }

    let rules: Vec<Option<ColumnRules>> = board
        .columns
        .iter()
        .map(|c| (!c.include_mode).then(|| ColumnRules::from_title(&c.title)))
        .collect();

    let ungathered = rules
        .iter()
        .position(|r| r.as_ref().is_some_and(|r| r.ungathered));

    let mut moves = Vec::new();
    for (from, column) in board.columns.iter().enumerate() {
        if column.include_mode {
            continue;
        }
        for task in &column.tasks {
            let meta = CardMeta::from_task(task);
            if meta.sticky {
                continue;
            }
            let destination = gather_destination(&rules, &meta, today)
                .or_else(|| ungathered.filter(|_| meta.has_tags()));
            if let Some(to) = destination {
                moves.push(PlannedMove {
                    task_id: task.id.clone(),
                    from,
                    to,
                });
            }
        }
    }

    for planned in moves {
        if planned.from == planned.to {
            continue;
        }
        let source = &mut board.columns[planned.from];
        let Some(pos) = source.task_index(&planned.task_id) else {
            continue;
        };
        let task = source.tasks.remove(pos);
        tracing::debug!(
            task = %task.id,
            to = %board.columns[planned.to].id,
            "filing card"
        );
        board.columns[planned.to].tasks.push(task);
        report.moved += 1;
    }

    for (column, rules) in board.columns.iter_mut().zip(&rules) {
        let Some(sort) = rules.as_ref().and_then(|r| r.sort) else {
            continue;
        };
        let before: Vec<String> = column.tasks.iter().map(|t| t.id.clone()).collect();
        sort_tasks(&mut column.tasks, sort);
        if column.tasks.iter().map(|t| &t.id).ne(before.iter()) {
            report.sorted_columns += 1;
        }
    }

    report
}

/// Index of the first column with a rule claiming the card
fn gather_destination(
    rules: &[Option<ColumnRules>],
    meta: &CardMeta,
    today: NaiveDate,
) -> Option<usize> {
    rules.iter().position(|column| {
        column
            .as_ref()
            .is_some_and(|c| c.rules.iter().any(|rule| rule.matches(meta, today)))
    })
}

fn sort_tasks(tasks: &mut [Task], sort: ColumnSort) {
    match sort {
        ColumnSort::ByDate => {
            tasks.sort_by_cached_key(|task| {
                let date = CardMeta::from_task(task).date();
                (date.is_none(), date)
            });
        }
        ColumnSort::ByName => tasks.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
    }

    fn board(columns: &[(&str, &[&str])]) -> Board {
        let columns = columns
            .iter()
            .enumerate()
            .map(|(i, (title, tasks))| {
                let mut column = Column::new(format!("col-{}", i), *title);
                for (j, task) in tasks.iter().enumerate() {
                    column
                        .tasks
                        .push(Task::new(format!("task-{}-{}", i, j), *task, None));
                }
                column
            })
            .collect();
        Board {
            valid: true,
            columns,
            ..Default::default()
        }
    }

    fn titles(board: &Board, index: usize) -> Vec<&str> {
        board.columns[index]
            .tasks
            .iter()
            .map(|t| t.title.as_str())
            .collect()
    }

    #[test]
    fn test_first_matching_column_wins() {
        let mut b = board(&[
            ("Inbox", &["Pair @alice", "Review @bob", "Plain"]),
            ("Alice #gather_alice", &[]),
            ("Team #gather_alice|bob", &[]),
        ]);
        let report = auto_sort(&mut b, today());
        assert_eq!(titles(&b, 0), vec!["Plain"]);
        assert_eq!(titles(&b, 1), vec!["Pair @alice"]);
        assert_eq!(titles(&b, 2), vec!["Review @bob"]);
        assert_eq!(report.moved, 2);
    }

    #[test]
    fn test_sticky_cards_stay() {
        let mut b = board(&[
            ("Inbox", &["Pinned @alice @sticky"]),
            ("Alice #gather_alice", &[]),
        ]);
        let report = auto_sort(&mut b, today());
        assert_eq!(titles(&b, 0), vec!["Pinned @alice @sticky"]);
        assert_eq!(report.moved, 0);
    }

    #[test]
    fn test_ungathered_catches_tagged_cards_only() {
        let mut b = board(&[
            ("Inbox", &["Call @carol", "Untagged", "Due @2026-05-01"]),
            ("Alice #gather_alice", &[]),
            ("Other #ungathered", &[]),
        ]);
        auto_sort(&mut b, today());
        assert_eq!(titles(&b, 0), vec!["Untagged"]);
        assert_eq!(titles(&b, 2), vec!["Call @carol", "Due @2026-05-01"]);
    }

    #[test]
    fn test_card_already_in_destination_keeps_position() {
        let mut b = board(&[
            ("Inbox", &["New @alice"]),
            ("Alice #gather_alice", &["Old @alice", "Unrelated"]),
        ]);
        let report = auto_sort(&mut b, today());
        assert_eq!(titles(&b, 1), vec!["Old @alice", "Unrelated", "New @alice"]);
        assert_eq!(report.moved, 1);
    }

    #[test]
    fn test_date_rules_relative_to_today() {
        let mut b = board(&[
            ("Inbox", &["Soon @2026-03-06", "Later @2026-04-01", "Late @2026-03-01"]),
            ("Overdue #gather_day<0", &[]),
            ("This week #gather_0<day&day<7", &[]),
        ]);
        auto_sort(&mut b, today());
        assert_eq!(titles(&b, 0), vec!["Later @2026-04-01"]);
        assert_eq!(titles(&b, 1), vec!["Late @2026-03-01"]);
        assert_eq!(titles(&b, 2), vec!["Soon @2026-03-06"]);
    }

    #[test]
    fn test_malformed_rule_matches_nothing() {
        let mut b = board(&[("Inbox", &["@alice"]), ("Broken #gather_(alice", &[])]);
        let report = auto_sort(&mut b, today());
        assert_eq!(titles(&b, 0), vec!["@alice"]);
        assert_eq!(report.moved, 0);
    }

    #[test]
    fn test_sort_by_date_puts_dateless_last() {
        let mut b = board(&[(
            "Queue #sort-bydate",
            &["No date", "B @2026-03-10", "A @2026-03-05", "C @due:2026-03-10"],
        )]);
        let report = auto_sort(&mut b, today());
        assert_eq!(
            titles(&b, 0),
            vec!["A @2026-03-05", "B @2026-03-10", "C @due:2026-03-10", "No date"]
        );
        assert_eq!(report.sorted_columns, 1);
    }

    #[test]
    fn test_sort_by_name_case_insensitive() {
        let mut b = board(&[("Names #sort-byname", &["beta", "Alpha", "alpha", "Gamma"])]);
        auto_sort(&mut b, today());
        assert_eq!(titles(&b, 0), vec!["Alpha", "alpha", "beta", "Gamma"]);
    }

    #[test]
    fn test_already_sorted_column_not_counted() {
        let mut b = board(&[("Names #sort-byname", &["a", "b"])]);
        assert_eq!(auto_sort(&mut b, today()).sorted_columns, 0);
    }

    #[test]
    fn test_include_columns_skipped() {
        let mut b = board(&[("Inbox", &["@alice"]), ("Deck #gather_alice", &[])]);
        b.columns[1].include_mode = true;
        auto_sort(&mut b, today());
        assert_eq!(titles(&b, 0), vec!["@alice"]);
        assert!(b.columns[1].tasks.is_empty());

        let mut b = board(&[("Deck", &["@alice"]), ("Alice #gather_alice", &[])]);
        b.columns[0].include_mode = true;
        auto_sort(&mut b, today());
        assert_eq!(titles(&b, 0), vec!["@alice"]);
    }

    #[test]
    fn test_invalid_board_untouched() {
        let mut b = board(&[("Inbox", &["@alice"]), ("Alice #gather_alice", &[])]);
        b.valid = false;
        assert_eq!(auto_sort(&mut b, today()), AutoSortReport::default());
        assert_eq!(titles(&b, 0), vec!["@alice"]);
    }
}
