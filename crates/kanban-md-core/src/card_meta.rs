//! Card tag extraction
//!
//! Cards carry `@` tags in their title or description:
//! - `@2026-03-01` / `@01-03-2026`: due date shorthand
//! - `@start:2026-03-01`: typed date
//! - `@sticky`: never moved by automatic sorting
//! - `@alice`: anything else is a person

use chrono::NaiveDate;

use crate::types::Task;

/// Date type used when a date tag has no explicit type
pub const DEFAULT_DATE_KIND: &str = "due";

mod patterns {
    use std::sync::LazyLock;

    pub static TAG: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"(?:^|\s)@(\S+)").unwrap());

    pub static SHORTHAND_DATE: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"^(\d{4}-\d{2}-\d{2}|\d{2}-\d{2}-\d{4})$").unwrap()
    });

    pub static TYPED_DATE: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"^([A-Za-z]+):(\d{4}-\d{2}-\d{2}|\d{2}-\d{2}-\d{4})$").unwrap()
    });
}

/// A date tag with its type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedDate {
    /// Lowercased date type (`due` for shorthand dates)
    pub kind: String,
    /// Calendar date
    pub date: NaiveDate,
}

/// Tags extracted from one card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardMeta {
    /// Every valid date tag, in order of appearance
    pub dates: Vec<TaggedDate>,
    /// Lowercased person names, deduplicated, in order of appearance
    pub persons: Vec<String>,
    /// Whether the card is tagged `@sticky`
    pub sticky: bool,
}

impl CardMeta {
    /// Extract tags from free text
    pub fn from_text(text: &str) -> Self {
        let mut meta = CardMeta::default();

        for cap in patterns::TAG.captures_iter(text) {
            let token = cap
                .get(1)
                .unwrap()
                .as_str()
                .trim_end_matches(['.', ',', ';', ':', '!', '?', ')', ']', '}', '"', '\'']);
            if token.is_empty() {
                continue;
            }

            if token.eq_ignore_ascii_case("sticky") {
                meta.sticky = true;
            } else if patterns::SHORTHAND_DATE.is_match(token) {
                meta.push_date(DEFAULT_DATE_KIND, token);
            } else if let Some(typed) = patterns::TYPED_DATE.captures(token) {
                let kind = typed.get(1).unwrap().as_str().to_lowercase();
                meta.push_date(&kind, typed.get(2).unwrap().as_str());
            } else {
                let name = token.to_lowercase();
                if !meta.persons.contains(&name) {
                    meta.persons.push(name);
                }
            }
        }

        meta
    }

    /// Extract tags from a task's title and description
    pub fn from_task(task: &Task) -> Self {
        Self::from_text(&task.full_text())
    }

    fn push_date(&mut self, kind: &str, value: &str) {
        match parse_date(value) {
            Some(date) => self.dates.push(TaggedDate {
                kind: kind.to_string(),
                date,
            }),
            None => tracing::debug!(value, "ignoring impossible date tag"),
        }
    }

    /// The date rules compare against: the first due date, else the first date
    pub fn date(&self) -> Option<NaiveDate> {
        self.dates
            .iter()
            .find(|d| d.kind == DEFAULT_DATE_KIND)
            .or_else(|| self.dates.first())
            .map(|d| d.date)
    }

    /// Whether the card names a person (case-insensitive)
    pub fn has_person(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.persons.iter().any(|p| *p == name)
    }

    /// Whether the card carries any date or person tag
    pub fn has_tags(&self) -> bool {
        !self.dates.is_empty() || !self.persons.is_empty()
    }
}

/// Parse `YYYY-MM-DD` or `DD-MM-YYYY`
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d-%m-%Y"))
        .ok()
}
