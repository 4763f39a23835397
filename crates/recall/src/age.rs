//! Filesystem age source — dates a hit by its transcript's modification time.

use chrono::{DateTime, Utc};
use clawrecall_core::age::AgeSource;
use std::path::{Path, PathBuf};
use tracing::debug;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Ages transcripts by `mtime`, resolving relative hit paths under `root`.
///
/// Lookups are blocking filesystem calls; `SessionRecall` ranks on the
/// blocking pool.
pub struct FsAgeSource {
    root: PathBuf,
    now: Option<DateTime<Utc>>,
}

impl FsAgeSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            now: None,
        }
    }

    /// Pin "now" instead of reading the clock on every lookup.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl AgeSource for FsAgeSource {
    fn age_days(&self, path: &str) -> Option<f64> {
        let resolved = self.resolve(path);
        let modified = match std::fs::metadata(&resolved).and_then(|m| m.modified()) {
            Ok(modified) => DateTime::<Utc>::from(modified),
            Err(e) => {
                debug!(path = %resolved.display(), error = %e, "Transcript age unavailable");
                return None;
            }
        };

        let now = self.now.unwrap_or_else(Utc::now);
        let elapsed_ms = now.signed_duration_since(modified).num_milliseconds();
        // Files stamped in the future count as brand new
        Some((elapsed_ms.max(0) as f64) / MILLIS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn transcript(dir: &Path, name: &str) -> DateTime<Utc> {
        let sessions = dir.join("sessions");
        std::fs::create_dir_all(&sessions).unwrap();
        let file = sessions.join(name);
        std::fs::write(&file, "{\"role\":\"user\"}\n").unwrap();
        DateTime::<Utc>::from(std::fs::metadata(&file).unwrap().modified().unwrap())
    }

    #[test]
    fn relative_paths_resolve_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let modified = transcript(dir.path(), "a.jsonl");

        let source = FsAgeSource::new(dir.path()).with_now(modified + Duration::days(3));
        let age = source.age_days("sessions/a.jsonl").unwrap();
        assert!((age - 3.0).abs() < 1e-6, "age = {age}");
    }

    #[test]
    fn absolute_paths_are_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let modified = transcript(dir.path(), "b.jsonl");
        let absolute = dir.path().join("sessions/b.jsonl");

        let source = FsAgeSource::new("/somewhere/else").with_now(modified + Duration::hours(12));
        let age = source.age_days(absolute.to_str().unwrap()).unwrap();
        assert!((age - 0.5).abs() < 1e-6, "age = {age}");
    }

    #[test]
    fn missing_file_has_no_age() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsAgeSource::new(dir.path());
        assert_eq!(source.age_days("sessions/gone.jsonl"), None);
    }

    #[test]
    fn future_mtime_is_age_zero() {
        let dir = tempfile::tempdir().unwrap();
        let modified = transcript(dir.path(), "c.jsonl");

        let source = FsAgeSource::new(dir.path()).with_now(modified - Duration::days(1));
        assert_eq!(source.age_days("sessions/c.jsonl"), Some(0.0));
    }

    #[test]
    fn live_clock_gives_small_age_for_fresh_file() {
        let dir = tempfile::tempdir().unwrap();
        transcript(dir.path(), "d.jsonl");

        let source = FsAgeSource::new(dir.path());
        let age = source.age_days("sessions/d.jsonl").unwrap();
        assert!(age < 1.0);
    }
}
