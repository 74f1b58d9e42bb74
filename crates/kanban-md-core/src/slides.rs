//! Slide document conversion for include-mode columns
//!
//! A slide document is Markdown split into slides by `---` lines. Each slide
//! becomes one task: its heading (or first line) is the title, the rest the
//! description.

use crate::ids::IdGenerator;
use crate::types::Task;

/// Slides look for a heading only in their first lines
const TITLE_SEARCH_LINES: usize = 3;

const SLIDE_SEPARATOR: &str = "\n\n---\n\n";

mod patterns {
    use std::sync::LazyLock;

    pub static HEADING: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"^#{1,6}\s+(.*?)\s*$").unwrap());
}

/// One slide of a presentation document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// Heading or first line, if any
    pub title: Option<String>,
    /// Remaining body, trimmed
    pub content: String,
}

/// Split a slide document into slides
pub fn parse_slides(content: &str) -> Vec<Slide> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

    let mut chunks: Vec<Vec<&str>> = vec![Vec::new()];
    for line in normalized.split('\n') {
        if line.trim() == "---" {
            chunks.push(Vec::new());
        } else if let Some(chunk) = chunks.last_mut() {
            chunk.push(line);
        }
    }

    chunks
        .into_iter()
        .filter(|lines| lines.iter().any(|l| !l.trim().is_empty()))
        .map(|lines| parse_slide(&lines))
        .collect()
}

fn parse_slide(lines: &[&str]) -> Slide {
    // Skip leading blank lines so "the first lines" means the first content
    let start = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(0);
    let lines = &lines[start..];

    let heading = lines
        .iter()
        .take(TITLE_SEARCH_LINES)
        .enumerate()
        .find_map(|(i, line)| {
            patterns::HEADING
                .captures(line.trim())
                .map(|c| (i, c.get(1).unwrap().as_str().to_string()))
        });

    // Without a heading the first line is a plain-text title
    let (title_index, title) = match heading {
        Some((i, title)) => (i, title),
        None => (0, lines[0].trim().to_string()),
    };

    let body: Vec<&str> = lines
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != title_index)
        .map(|(_, l)| *l)
        .collect();

    Slide {
        title: if title.is_empty() { None } else { Some(title) },
        content: body.join("\n").trim().to_string(),
    }
}

/// Convert a slide document into tasks with fresh ids
pub fn slides_to_tasks(content: &str, ids: &dyn IdGenerator) -> Vec<Task> {
    parse_slides(content)
        .into_iter()
        .map(|slide| Task {
            id: ids.new_task_id(),
            title: slide.title.unwrap_or_default(),
            description: if slide.content.is_empty() {
                None
            } else {
                Some(slide.content)
            },
        })
        .collect()
}

/// Convert tasks back into a slide document
///
/// Titles are written as level-one headings so a description that opens
/// with its own heading stays in the body when read back.
pub fn tasks_to_slides(tasks: &[Task]) -> String {
    let slides: Vec<String> = tasks
        .iter()
        .map(|task| {
            let description = task.description.as_deref().unwrap_or("").trim();
            match (task.title.is_empty(), description.is_empty()) {
                (false, false) => format!("# {}\n\n{}", task.title, description),
                (false, true) => format!("# {}", task.title),
                (true, _) => description.to_string(),
            }
        })
        .collect();

    let mut out = slides.join(SLIDE_SEPARATOR);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    #[test]
    fn test_parse_slides_with_headings() {
        let deck = "# Intro\n\nWelcome everyone\n\n---\n\n## Agenda\n- one\n- two\n";
        let slides = parse_slides(deck);
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title.as_deref(), Some("Intro"));
        assert_eq!(slides[0].content, "Welcome everyone");
        assert_eq!(slides[1].title.as_deref(), Some("Agenda"));
        assert_eq!(slides[1].content, "- one\n- two");
    }

    #[test]
    fn test_plain_text_title_fallback() {
        let slides = parse_slides("Just a line\nmore body\n");
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title.as_deref(), Some("Just a line"));
        assert_eq!(slides[0].content, "more body");
    }

    #[test]
    fn test_heading_only_in_first_lines() {
        let slides = parse_slides("line one\nline two\nline three\n# Late heading\n");
        assert_eq!(slides[0].title.as_deref(), Some("line one"));
        assert!(slides[0].content.contains("# Late heading"));
    }

    #[test]
    fn test_empty_chunks_dropped() {
        let slides = parse_slides("---\n\n---\n# Only\n---\n   \n");
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title.as_deref(), Some("Only"));
        assert_eq!(slides[0].content, "");
    }

    #[test]
    fn test_slides_to_tasks() {
        let ids = SequentialIds::new();
        let tasks = slides_to_tasks("# A\nbody\n---\n# B\n", &ids);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "A");
        assert_eq!(tasks[0].description.as_deref(), Some("body"));
        assert_eq!(tasks[1].title, "B");
        assert_eq!(tasks[1].description, None);
        assert_ne!(tasks[0].id, tasks[1].id);
    }

    #[test]
    fn test_tasks_to_slides_round_trip() {
        let tasks = vec![
            Task::new("t1", "First", Some("Line 1\nLine 2".to_string())),
            Task::new("t2", "Second", None),
        ];
        let text = tasks_to_slides(&tasks);
        assert_eq!(text, "# First\n\nLine 1\nLine 2\n\n---\n\n# Second\n");

        let ids = SequentialIds::new();
        let back = slides_to_tasks(&text, &ids);
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].title, "First");
        assert_eq!(back[0].description.as_deref(), Some("Line 1\nLine 2"));
        assert_eq!(back[1].title, "Second");
    }

    #[test]
    fn test_description_heading_stays_in_body() {
        let tasks = vec![Task::new("t1", "Intro", Some("# Agenda\n- one".to_string()))];
        let text = tasks_to_slides(&tasks);
        assert_eq!(text, "# Intro\n\n# Agenda\n- one\n");

        let ids = SequentialIds::new();
        let back = slides_to_tasks(&text, &ids);
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].title, "Intro");
        assert_eq!(back[0].description.as_deref(), Some("# Agenda\n- one"));
    }

    #[test]
    fn test_untitled_task_writes_description_only() {
        let tasks = vec![Task::new("t1", "", Some("Loose notes".to_string()))];
        assert_eq!(tasks_to_slides(&tasks), "Loose notes\n");
    }
}
