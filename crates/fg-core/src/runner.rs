//! Platform CLI runner with timeout and output caps.
//!
//! All external calls (describe, listing, query) go through this module,
//! which spawns the `sf` binary with safety controls:
//!
//! - Per-call timeout with kill on expiry
//! - Output size caps to prevent memory exhaustion
//! - Parallel execution with a concurrency limit
//! - Command path validation to prevent injection

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Default timeout per call in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum captured output size in bytes (10MB).
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Default maximum parallel calls.
pub const DEFAULT_MAX_PARALLEL: usize = 4;

/// Errors that can occur while invoking the platform CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("command failed to spawn: {0}")]
    SpawnFailed(String),

    #[error("invalid command path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Captured output of one platform CLI call.
#[derive(Debug, Clone)]
pub struct CliOutput {
    /// Arguments the call was made with.
    pub args: Vec<String>,

    /// Captured stdout (may be truncated).
    pub stdout: Vec<u8>,

    /// Captured stderr (may be truncated).
    pub stderr: Vec<u8>,

    /// Exit code, when the process exited normally.
    pub exit_code: Option<i32>,

    /// Whether either stream hit the output cap.
    pub truncated: bool,

    /// Wall-clock duration of the call.
    pub duration: Duration,

    /// Whether the call was killed on timeout.
    pub timed_out: bool,
}

impl CliOutput {
    /// Get stdout as string (lossy UTF-8 conversion).
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Get stderr as string (lossy UTF-8 conversion).
    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Check if the call succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Configuration for the CLI runner.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Timeout per call.
    pub timeout: Duration,

    /// Maximum captured output size per stream in bytes.
    pub max_output_bytes: usize,

    /// Maximum parallel calls.
    pub max_parallel: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            max_parallel: DEFAULT_MAX_PARALLEL,
        }
    }
}

/// Runner for the platform CLI binary.
///
/// The child inherits the parent environment: the platform CLI resolves org
/// authentication from its own config and env vars.
#[derive(Debug, Clone)]
pub struct CliRunner {
    bin: String,
    config: CliConfig,
}

impl CliRunner {
    /// Create a runner for the given binary.
    pub fn new(bin: impl Into<String>, config: CliConfig) -> Self {
        Self {
            bin: bin.into(),
            config,
        }
    }

    /// The binary this runner spawns.
    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Run one call and capture its output.
    pub fn run(&self, args: &[String]) -> Result<CliOutput, CliError> {
        self.validate_bin()?;

        debug!(
            bin = %self.bin,
            ?args,
            timeout_ms = self.config.timeout.as_millis() as u64,
            "running platform CLI"
        );

        let start = Instant::now();
        let mut child = match Command::new(&self.bin)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                error!(bin = %self.bin, "command not found");
                return Err(CliError::CommandNotFound(self.bin.clone()));
            }
            Err(e) => {
                error!(bin = %self.bin, error = %e, "failed to spawn");
                return Err(CliError::SpawnFailed(e.to_string()));
            }
        };

        // Reader threads keep the pipes drained so the child never blocks on
        // a full pipe, even past the output cap.
        let cap = self.config.max_output_bytes;
        let stdout_reader = child
            .stdout
            .take()
            .map(|stream| thread::spawn(move || read_capped(stream, cap)));
        let stderr_reader = child
            .stderr
            .take()
            .map(|stream| thread::spawn(move || read_capped(stream, cap)));

        let deadline = start + self.config.timeout;
        let mut timed_out = false;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break Some(status),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        timed_out = true;
                        warn!(bin = %self.bin, "call timed out, killing child");
                        let _ = child.kill();
                        break child.wait().ok();
                    }
                    thread::sleep(Duration::from_millis(10));
                }
                Err(e) => {
                    error!(error = %e, "failed to wait for child");
                    let _ = child.kill();
                    return Err(CliError::Io(e));
                }
            }
        };

        let (stdout, stdout_truncated) = join_reader(stdout_reader);
        let (stderr, stderr_truncated) = join_reader(stderr_reader);
        let duration = start.elapsed();
        let exit_code = status.and_then(|s| s.code());

        info!(
            bin = %self.bin,
            duration_ms = duration.as_millis() as u64,
            ?exit_code,
            timed_out,
            "platform CLI call complete"
        );

        Ok(CliOutput {
            args: args.to_vec(),
            stdout,
            stderr,
            exit_code,
            truncated: stdout_truncated || stderr_truncated,
            duration,
            timed_out,
        })
    }

    /// Run multiple calls in parallel with the configured concurrency limit.
    ///
    /// Results come back in the same order as the input calls, never in
    /// completion order.
    pub fn run_parallel(&self, calls: &[Vec<String>]) -> Vec<Result<CliOutput, CliError>> {
        if calls.is_empty() {
            return Vec::new();
        }

        let max_parallel = self.config.max_parallel.max(1);
        info!(count = calls.len(), max_parallel, "running platform CLI calls in parallel");

        calls
            .chunks(max_parallel)
            .flat_map(|chunk| {
                thread::scope(|s| {
                    let handles: Vec<_> = chunk
                        .iter()
                        .map(|args| s.spawn(move || self.run(args)))
                        .collect();

                    handles
                        .into_iter()
                        .map(|h| {
                            h.join().unwrap_or_else(|_| {
                                error!("call thread panicked");
                                Err(CliError::SpawnFailed("thread panicked".to_string()))
                            })
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect()
    }

    fn validate_bin(&self) -> Result<(), CliError> {
        if self.bin.contains(['|', '&', ';', '$', '`', '\n', '\r']) {
            return Err(CliError::InvalidPath(format!(
                "command contains shell metacharacters: {}",
                self.bin
            )));
        }

        if self.bin.starts_with('/') && !Path::new(&self.bin).exists() {
            return Err(CliError::CommandNotFound(self.bin.clone()));
        }

        Ok(())
    }
}

/// Read a stream to EOF, keeping at most `cap` bytes.
fn read_capped(mut stream: impl Read, cap: usize) -> (Vec<u8>, bool) {
    let mut buf = Vec::with_capacity(cap.min(65536));
    let mut truncated = false;
    let mut chunk = [0u8; 8192];

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                let space = cap.saturating_sub(buf.len());
                if space > 0 {
                    let to_copy = n.min(space);
                    buf.extend_from_slice(&chunk[..to_copy]);
                    if n > space {
                        truncated = true;
                    }
                } else {
                    truncated = true;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }

    (buf, truncated)
}

fn join_reader(handle: Option<thread::JoinHandle<(Vec<u8>, bool)>>) -> (Vec<u8>, bool) {
    match handle {
        Some(h) => h.join().unwrap_or_else(|_| {
            error!("output reader thread panicked");
            (Vec::new(), false)
        }),
        None => (Vec::new(), false),
    }
}
