//! `clawrecall search` — run a recall by hand.

use clawrecall_core::Result;
use clawrecall_recall::SessionRecall;
use clawrecall_recall::format::{age_label, format_context, score_percent};
use std::path::Path;

pub async fn run(
    config_path: Option<&Path>,
    query: &str,
    json: bool,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let recall = SessionRecall::from_config(config)?;

    let results = recall.search(query).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("🔍 Searching sessions for: \"{query}\"");
    println!();

    if results.is_empty() {
        println!("   No session excerpts passed selection.");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        println!(
            "  {:>2}. [{:>3}%] {:<10} {}:{}-{}  (raw {:.2} × {:.1})",
            i + 1,
            score_percent(result.score),
            age_label(result.age_in_days),
            result.hit.path,
            result.hit.start_line,
            result.hit.end_line,
            result.raw_score,
            result.decay_factor
        );
    }

    println!();
    println!("{}", format_context(&results));
    Ok(())
}
