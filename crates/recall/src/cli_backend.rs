//! CLI search backend — runs `openclaw memory search --json`.
//!
//! Each search spawns the command once, bounded by a timeout and an output
//! cap. The child is killed if the deadline passes.

use async_trait::async_trait;
use clawrecall_config::SearchConfig;
use clawrecall_core::error::SearchError;
use clawrecall_core::hit::RawHit;
use clawrecall_core::search::{SearchBackend, SearchRequest};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tracing::debug;

use crate::response::parse_hits;

/// Only this much stderr is kept for error messages.
const MAX_STDERR_BYTES: usize = 4096;

/// Search sessions through the host's `memory search` command.
pub struct CliSearchBackend {
    command: String,
    base_args: Vec<String>,
    timeout: Duration,
    max_output_bytes: usize,
}

impl CliSearchBackend {
    pub fn new(command: impl Into<String>) -> Self {
        let defaults = SearchConfig::default();
        Self {
            command: command.into(),
            base_args: Vec::new(),
            timeout: Duration::from_millis(defaults.timeout_ms),
            max_output_bytes: defaults.max_output_bytes,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.command.clone())
            .with_base_args(config.args.clone())
            .with_timeout(Duration::from_millis(config.timeout_ms))
            .with_max_output_bytes(config.max_output_bytes)
    }

    /// Arguments placed before `memory search`.
    pub fn with_base_args(mut self, args: Vec<String>) -> Self {
        self.base_args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_output_bytes(mut self, max_output_bytes: usize) -> Self {
        self.max_output_bytes = max_output_bytes;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Full argument list for one request.
    pub fn args(&self, request: &SearchRequest) -> Vec<String> {
        let mut args = self.base_args.clone();
        args.extend([
            "memory".to_string(),
            "search".to_string(),
            "--json".to_string(),
            "--agent".to_string(),
            request.agent_id.clone(),
            "--max-results".to_string(),
            request.max_results.to_string(),
            "--min-score".to_string(),
            request.min_score.to_string(),
            request.query.clone(),
        ]);
        args
    }

    /// Drain the child's output and wait for it to exit.
    ///
    /// Both pipes are read concurrently so the child never blocks on a full
    /// pipe. Overflowing stdout ends the call at once and kills the child.
    async fn collect(&self, mut child: Child) -> Result<String, SearchError> {
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SearchError::Io("stdout was not captured".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| SearchError::Io("stderr was not captured".into()))?;

        let (out, err) = match tokio::try_join!(
            read_capped(stdout, self.max_output_bytes),
            drain_keeping_head(stderr, MAX_STDERR_BYTES),
        ) {
            Ok(output) => output,
            Err(e) => {
                let _ = child.start_kill();
                return Err(e);
            }
        };

        let status = child
            .wait()
            .await
            .map_err(|e| SearchError::Io(e.to_string()))?;
        if !status.success() {
            return Err(SearchError::Failed {
                code: status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&err).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Read `reader` to EOF, failing as soon as more than `limit` bytes arrive.
async fn read_capped<R>(reader: R, limit: usize) -> Result<Vec<u8>, SearchError>
where
    R: AsyncRead + Unpin,
{
    let mut out = Vec::new();
    reader
        .take(limit as u64 + 1)
        .read_to_end(&mut out)
        .await
        .map_err(|e| SearchError::Io(e.to_string()))?;
    if out.len() > limit {
        return Err(SearchError::OutputTooLarge { limit_bytes: limit });
    }
    Ok(out)
}

/// Read `reader` to EOF, keeping only the first `keep` bytes.
async fn drain_keeping_head<R>(mut reader: R, keep: usize) -> Result<Vec<u8>, SearchError>
where
    R: AsyncRead + Unpin,
{
    let mut kept = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = reader
            .read(&mut chunk)
            .await
            .map_err(|e| SearchError::Io(e.to_string()))?;
        if n == 0 {
            return Ok(kept);
        }
        let room = keep.saturating_sub(kept.len());
        kept.extend_from_slice(&chunk[..n.min(room)]);
    }
}

#[async_trait]
impl SearchBackend for CliSearchBackend {
    fn name(&self) -> &str {
        "cli"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawHit>, SearchError> {
        debug!(
            command = %self.command,
            agent = %request.agent_id,
            max_results = request.max_results,
            min_score = request.min_score,
            "Running session search"
        );

        let child = Command::new(&self.command)
            .args(self.args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SearchError::Spawn {
                command: self.command.clone(),
                reason: e.to_string(),
            })?;

        // On timeout the child is dropped with the future, which kills it
        let output = tokio::time::timeout(self.timeout, self.collect(child))
            .await
            .map_err(|_| SearchError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            })??;

        Ok(parse_hits(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SearchRequest {
        SearchRequest::overfetch("why did the deploy fail?", "main", 3, 0.3)
    }

    /// A backend running `sh -c <script>` instead of the real command.
    #[cfg(unix)]
    fn shell_backend(script: &str) -> CliSearchBackend {
        CliSearchBackend::new("sh").with_base_args(vec![
            "-c".into(),
            script.into(),
            "openclaw".into(),
        ])
    }

    #[test]
    fn args_follow_memory_search_contract() {
        let backend = CliSearchBackend::new("openclaw");
        let args = backend.args(&request());
        assert_eq!(
            args,
            vec![
                "memory",
                "search",
                "--json",
                "--agent",
                "main",
                "--max-results",
                "9",
                "--min-score",
                "0.15",
                "why did the deploy fail?",
            ]
        );
    }

    #[test]
    fn base_args_come_first() {
        let backend =
            CliSearchBackend::new("npx").with_base_args(vec!["--yes".into(), "openclaw".into()]);
        let args = backend.args(&request());
        assert_eq!(&args[..3], &["--yes", "openclaw", "memory"]);
    }

    #[test]
    fn from_config_copies_limits() {
        let config = SearchConfig {
            command: "/usr/local/bin/openclaw".into(),
            timeout_ms: 1500,
            max_output_bytes: 2048,
            ..SearchConfig::default()
        };
        let backend = CliSearchBackend::from_config(&config);
        assert_eq!(backend.command(), "/usr/local/bin/openclaw");
        assert_eq!(backend.timeout, Duration::from_millis(1500));
        assert_eq!(backend.max_output_bytes, 2048);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn parses_output_with_banner() {
        let backend = shell_backend(
            r#"echo "openclaw: index ready"
echo '{"results":[{"path":"sessions/a.jsonl","startLine":1,"endLine":4,"score":0.8,"snippet":"hello","source":"sessions"}]}'"#,
        );
        let hits = backend.search(&request()).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].snippet, "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn request_is_passed_as_arguments() {
        // $7 is the --max-results value, ${10} the query
        let backend = shell_backend(
            r#"printf '{"results":[{"path":"%s","score":0.5,"snippet":"%s","source":"sessions"}]}' "$7" "${10}""#,
        );
        let hits = backend.search(&request()).await.unwrap();
        assert_eq!(hits[0].path, "9");
        assert_eq!(hits[0].snippet, "why did the deploy fail?");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_an_error() {
        let backend = shell_backend("echo 'index missing' >&2; exit 3");
        let err = backend.search(&request()).await.unwrap_err();
        match err {
            SearchError::Failed { code, stderr } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "index missing");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_search_times_out() {
        let backend = shell_backend("sleep 5").with_timeout(Duration::from_millis(200));
        let started = std::time::Instant::now();
        let err = backend.search(&request()).await.unwrap_err();
        assert!(matches!(err, SearchError::Timeout { timeout_ms: 200 }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn oversized_output_is_rejected() {
        let backend = shell_backend(r#"echo '{"results":[],"padding":"0123456789012345678901234567890123456789"}'"#)
            .with_max_output_bytes(16);
        let err = backend.search(&request()).await.unwrap_err();
        assert!(matches!(err, SearchError::OutputTooLarge { limit_bytes: 16 }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn large_output_is_cut_short_not_timed_out() {
        let backend = shell_backend("head -c 500000 /dev/zero | tr '\\0' x")
            .with_max_output_bytes(1024)
            .with_timeout(Duration::from_secs(10));
        let started = std::time::Instant::now();
        let err = backend.search(&request()).await.unwrap_err();
        assert!(matches!(err, SearchError::OutputTooLarge { limit_bytes: 1024 }));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn chatty_stderr_does_not_block_results() {
        let backend = shell_backend(
            r#"head -c 200000 /dev/zero | tr '\0' x >&2
echo '{"results":[{"path":"sessions/a.jsonl","score":0.8,"snippet":"kept","source":"sessions"}]}'"#,
        )
        .with_timeout(Duration::from_secs(10));
        let hits = backend.search(&request()).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].snippet, "kept");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failure_keeps_only_head_of_stderr() {
        let backend = shell_backend("head -c 100000 /dev/zero | tr '\\0' e >&2; exit 1")
            .with_timeout(Duration::from_secs(10));
        match backend.search(&request()).await.unwrap_err() {
            SearchError::Failed { code, stderr } => {
                assert_eq!(code, 1);
                assert_eq!(stderr.len(), MAX_STDERR_BYTES);
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_command_is_a_spawn_error() {
        let backend = CliSearchBackend::new("clawrecall-no-such-command-xyz");
        let err = backend.search(&request()).await.unwrap_err();
        assert!(matches!(err, SearchError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn garbage_output_is_zero_hits() {
        let backend = shell_backend("echo 'nothing to see here'");
        let hits = backend.search(&request()).await.unwrap();
        assert!(hits.is_empty());
    }
}
