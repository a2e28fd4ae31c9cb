//! Change summaries for audit entries
//!
//! Produces short human-readable descriptions of what an update did to an
//! envelope, e.g. `budget: $1000.00 -> $700.00, title: "Rent" -> "Housing"`.

use crate::models::Envelope;

const MAX_TITLE_CHARS: usize = 50;

/// Describe the differences between two states of an envelope
///
/// Returns `None` when nothing observable changed.
pub fn generate_diff(before: &Envelope, after: &Envelope) -> Option<String> {
    let mut changes = Vec::new();

    if before.budget != after.budget {
        changes.push(format!("budget: {} -> {}", before.budget, after.budget));
    }

    if before.title != after.title {
        changes.push(format!(
            "title: {} -> {}",
            format_title(&before.title),
            format_title(&after.title)
        ));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// Quote a title, truncating long ones on a character boundary
fn format_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let truncated: String = title.chars().take(MAX_TITLE_CHARS - 3).collect();
        format!("\"{}...\"", truncated)
    } else {
        format!("\"{}\"", title)
    }
}
