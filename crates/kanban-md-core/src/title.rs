//! Structured view of a column title
//!
//! A column title is free text that also carries a small tag language:
//! `#row<N>` (layout row), `#gather_<expr>` and `#ungathered` (automatic
//! sort rules), `#sort-bydate` / `#sort-byname` (post-sort order) and
//! `!!!columninclude(path)!!!` directives. [`ColumnTitle`] parses all of them
//! once so callers work with fields instead of re-running regexes, and
//! renders a new title string only when the row changes.

use crate::include::{self, collapse_spaces};

/// Lowest layout row; titles in this row carry no row tag
pub const MIN_ROW: u8 = 1;

/// Highest layout row
pub const MAX_ROW: u8 = 4;

mod patterns {
    use std::sync::LazyLock;

    pub static ROW_TAG: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"(?i)#row([0-9]+)\b").unwrap());

    pub static GATHER: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"(?i)#gather_([^\s#]+)").unwrap());

    pub static UNGATHERED: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"(?i)#ungathered\b").unwrap());

    pub static SORT: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"(?i)#sort-(bydate|byname)\b").unwrap());
}

/// Post-filing order requested by a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSort {
    /// `#sort-bydate`
    ByDate,
    /// `#sort-byname`
    ByName,
}

/// A column title split into its text and tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTitle {
    /// Title with every row tag removed, spaces collapsed and trimmed
    text: String,
    /// Row tags exactly as written, in order of appearance
    row_tags: Vec<String>,
    /// Expressions of `#gather_<expr>` tags, in order of appearance
    pub gather_rules: Vec<String>,
    /// Whether the title carries `#ungathered`
    pub ungathered: bool,
    /// First `#sort-*` tag, if any
    pub sort: Option<ColumnSort>,
    /// Column include paths, in order of appearance
    pub includes: Vec<String>,
}

impl ColumnTitle {
    /// Parse a raw column title
    pub fn parse(raw: &str) -> Self {
        let row_tags = patterns::ROW_TAG
            .find_iter(raw)
            .map(|m| m.as_str().to_string())
            .collect();
        let text = collapse_spaces(patterns::ROW_TAG.replace_all(raw, "").trim());

        let gather_rules = patterns::GATHER
            .captures_iter(raw)
            .map(|c| c.get(1).unwrap().as_str().to_string())
            .collect();

        let sort = patterns::SORT.captures(raw).map(|c| {
            if c.get(1).unwrap().as_str().eq_ignore_ascii_case("bydate") {
                ColumnSort::ByDate
            } else {
                ColumnSort::ByName
            }
        });

        Self {
            text,
            row_tags,
            gather_rules,
            ungathered: patterns::UNGATHERED.is_match(raw),
            sort,
            includes: include::column_include_paths(raw),
        }
    }

    /// Title text without row tags
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Effective layout row: the last row tag, clamped to 1..=4, default 1
    pub fn row(&self) -> u8 {
        self.row_tags
            .last()
            .map(|tag| tag[4..].parse::<u32>().unwrap_or(u32::MAX))
            .map(|n| n.clamp(MIN_ROW as u32, MAX_ROW as u32) as u8)
            .unwrap_or(MIN_ROW)
    }

    /// Number of row tags in the raw title
    pub fn row_tag_count(&self) -> usize {
        self.row_tags.len()
    }

    /// Render the title placed in `row`; row 1 is left untagged
    pub fn with_row(&self, row: u8) -> String {
        if row <= MIN_ROW {
            return self.text.clone();
        }
        if self.text.is_empty() {
            format!("#row{}", row)
        } else {
            format!("{} #row{}", self.text, row)
        }
    }

    /// Render the title keeping only the last row tag, as written
    pub fn with_last_row_tag(&self) -> String {
        match self.row_tags.last() {
            Some(tag) if self.text.is_empty() => tag.clone(),
            Some(tag) => format!("{} {}", self.text, tag),
            None => self.text.clone(),
        }
    }

    /// Human-facing label: all tags and include directives removed
    pub fn label(&self) -> String {
        let without_gather = patterns::GATHER.replace_all(&self.text, "");
        let without_ungathered = patterns::UNGATHERED.replace_all(&without_gather, "");
        let without_sort = patterns::SORT.replace_all(&without_ungathered, "");
        include::strip_column_includes(&without_sort)
    }
}
