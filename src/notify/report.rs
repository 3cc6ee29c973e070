//! Plain-text change summary.

use crate::diff::ChangeSet;
use std::fmt::Write as _;

/// Entries listed per direction before the rest is summarised.
pub const MAX_LISTED: usize = 20;

/// Render the notification body for a change set.
///
/// ```text
/// Changes in Backblaze storage:
///
/// New files (2):
/// + a.txt
/// + b.txt
///
/// Removed files (1):
/// - c.txt
/// ```
#[must_use]
pub fn render_body(changes: &ChangeSet) -> String {
    let mut body = String::from("Changes in Backblaze storage:\n\n");

    if !changes.added.is_empty() {
        write_section(&mut body, "New files", '+', &changes.added);
    }

    if !changes.removed.is_empty() {
        body.push('\n');
        write_section(&mut body, "Removed files", '-', &changes.removed);
    }

    body
}

fn write_section(body: &mut String, title: &str, marker: char, entries: &[String]) {
    let _ = writeln!(body, "{title} ({}):", entries.len());
    for line in entries.iter().take(MAX_LISTED) {
        let _ = writeln!(body, "{marker} {line}");
    }
    if entries.len() > MAX_LISTED {
        let _ = writeln!(body, "... and {} more", entries.len() - MAX_LISTED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i:03}.txt")).collect()
    }

    #[test]
    fn test_single_added_and_removed() {
        let changes = ChangeSet {
            added: vec!["c.txt".to_string()],
            removed: vec!["a.txt".to_string()],
        };
        assert_eq!(
            render_body(&changes),
            "Changes in Backblaze storage:\n\n\
             New files (1):\n+ c.txt\n\n\
             Removed files (1):\n- a.txt\n"
        );
    }

    #[test]
    fn test_removed_only_has_no_added_block() {
        let changes = ChangeSet {
            added: vec![],
            removed: vec!["a.txt".to_string()],
        };
        let body = render_body(&changes);
        assert!(!body.contains("New files"));
        assert!(body.contains("Removed files (1):\n- a.txt\n"));
    }

    #[test]
    fn test_truncates_at_twenty_per_direction() {
        let changes = ChangeSet {
            added: names("new", 25),
            removed: names("old", 21),
        };
        let body = render_body(&changes);

        assert_eq!(body.lines().filter(|l| l.starts_with("+ ")).count(), 20);
        assert_eq!(body.lines().filter(|l| l.starts_with("- ")).count(), 20);
        assert!(body.contains("New files (25):"));
        assert!(body.contains("... and 5 more"));
        assert!(body.contains("... and 1 more"));
        assert!(!body.contains("new020.txt"));
    }

    #[test]
    fn test_exactly_twenty_has_no_truncation_note() {
        let changes = ChangeSet {
            added: names("new", 20),
            removed: vec![],
        };
        assert!(!render_body(&changes).contains("more"));
    }
}
