//! Search response parsing.
//!
//! The search command prints a JSON object with a `results` array, but its
//! stdout may also carry log lines, banners or warnings around the payload.
//! The first balanced `{...}` block is taken as the payload. Anything that
//! cannot be read is treated as zero results.

use clawrecall_core::hit::RawHit;
use serde_json::Value;
use tracing::debug;

/// Find the first balanced `{...}` block in `text`.
///
/// Braces inside JSON strings (including escaped quotes) do not count.
/// An opening brace that is never closed is skipped and the search goes
/// on from the next one.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(end) = balanced_end(&text[start..]) {
            return Some(&text[start..start + end]);
        }
        search_from = start + 1;
    }
    None
}

/// Byte length of the balanced block at the start of `text` (which begins with `{`).
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse raw search output into hits, in backend order.
///
/// Records that don't look like a hit are skipped one by one; the rest of
/// the batch is kept.
pub fn parse_hits(output: &str) -> Vec<RawHit> {
    let Some(payload) = extract_json_object(output) else {
        debug!("Search output contained no JSON object");
        return Vec::new();
    };

    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "Search output is not valid JSON");
            return Vec::new();
        }
    };

    let Some(records) = value.get("results").and_then(Value::as_array) else {
        debug!("Search output has no results array");
        return Vec::new();
    };

    let mut skipped = 0usize;
    let hits: Vec<RawHit> = records
        .iter()
        .filter_map(|record| match serde_json::from_value(record.clone()) {
            Ok(hit) => Some(hit),
            Err(_) => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        debug!(skipped, kept = hits.len(), "Skipped malformed search records");
    }
    hits
}
