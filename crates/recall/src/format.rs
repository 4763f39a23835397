//! Context formatter — renders ranked excerpts into the injected block.
//!
//! Output shape:
//!
//! ```text
//! <session-recall>
//! Relevant excerpts from your past sessions (most relevant first):
//!
//! [1] (60%, 2d ago)
//! we pinned tokio to 1.38 because ...
//!
//! [2] (41%, 3w ago)
//! ...
//! </session-recall>
//! ```

use clawrecall_core::hit::ScoredResult;

/// Snippets longer than this many characters are cut.
pub const SNIPPET_MAX_CHARS: usize = 500;

/// Appended to a cut snippet.
pub const ELLIPSIS: &str = "…";

pub const BLOCK_OPEN: &str = "<session-recall>";
pub const BLOCK_CLOSE: &str = "</session-recall>";
pub const BLOCK_INTRO: &str = "Relevant excerpts from your past sessions (most relevant first):";

/// Render `results` (already in rank order) as one context block.
///
/// Callers must not pass an empty slice: no results means no context at
/// all, never an empty block.
pub fn format_context(results: &[ScoredResult]) -> String {
    debug_assert!(!results.is_empty(), "format_context called without results");

    let items: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            format!(
                "[{}] ({}%, {})\n{}",
                i + 1,
                score_percent(result.score),
                age_label(result.age_in_days),
                truncate_snippet(&result.hit.snippet)
            )
        })
        .collect();

    format!(
        "{BLOCK_OPEN}\n{BLOCK_INTRO}\n\n{}\n{BLOCK_CLOSE}",
        items.join("\n\n")
    )
}

/// Decayed score as a whole percentage.
pub fn score_percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

/// Trim a snippet and cut it to [`SNIPPET_MAX_CHARS`] characters.
///
/// The cut is by character count, not at a word boundary.
pub fn truncate_snippet(snippet: &str) -> String {
    let trimmed = snippet.trim();
    if trimmed.chars().count() > SNIPPET_MAX_CHARS {
        let mut cut: String = trimmed.chars().take(SNIPPET_MAX_CHARS).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        trimmed.to_string()
    }
}

/// Human-readable age: "today", "yesterday", "3d ago", "2w ago", "5mo ago", "1y ago".
pub fn age_label(age_in_days: f64) -> String {
    if age_in_days < 1.0 {
        "today".into()
    } else if age_in_days < 2.0 {
        "yesterday".into()
    } else if age_in_days < 7.0 {
        format!("{}d ago", age_in_days.round() as i64)
    } else if age_in_days < 30.0 {
        format!("{}w ago", (age_in_days / 7.0).round() as i64)
    } else if age_in_days < 365.0 {
        format!("{}mo ago", (age_in_days / 30.0).round() as i64)
    } else {
        format!("{}y ago", (age_in_days / 365.0).round() as i64)
    }
}
