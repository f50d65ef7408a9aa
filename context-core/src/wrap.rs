//! Command wrapper that keeps long output out of the conversation.
//!
//! Short output is handed back verbatim. Output over the character or line
//! threshold (or any output when forced) is written to the observation store
//! and replaced by a summary with a short preview.

use std::path::PathBuf;
use std::process::Command;
use std::time::{Duration, Instant};

use crate::config::{CaptureLimits, ContextConfig};
use crate::error::{ContextError, Result};
use crate::observations::ObservationStore;

/// What happened to a wrapped command's output.
#[derive(Debug, Clone, PartialEq)]
pub enum WrapOutcome {
    /// Output was short; nothing was persisted.
    Printed { output: String, exit_code: Option<i32> },
    /// Output was saved to the observation store.
    Saved(WrapSummary),
}

/// Report for an output that was offloaded to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapSummary {
    pub elapsed: Duration,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub path: PathBuf,
    pub chars: usize,
    pub lines: usize,
    /// Configured preview length, shown in the header even when the output
    /// is shorter.
    pub preview_limit: usize,
    pub preview: Vec<String>,
}

impl WrapSummary {
    pub fn render(&self) -> String {
        let exit_code = match self.exit_code {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        };
        format!(
            "Command finished in {:.2}s (Exit Code: {})\n\
             Output saved to: {}\n\
             Size: {} chars, {} lines\n\
             \n\
             Preview (Head {} lines):\n\
             {}\n\
             ...",
            self.elapsed.as_secs_f64(),
            exit_code,
            self.path.display(),
            self.chars,
            self.lines,
            self.preview_limit,
            self.preview.join("\n"),
        )
    }
}

/// Whether combined output exceeds either threshold.
///
/// Lines are counted as newline characters, so a 20-line output with a
/// trailing newline is still short.
pub fn is_long(combined: &str, limits: &CaptureLimits) -> bool {
    combined.chars().count() > limits.max_chars
        || combined.matches('\n').count() > limits.max_lines
}

#[derive(Debug, Clone)]
pub struct CommandWrapper {
    config: ContextConfig,
    store: ObservationStore,
}

impl CommandWrapper {
    pub fn new(config: &ContextConfig) -> Self {
        Self {
            config: config.clone(),
            store: ObservationStore::new(config),
        }
    }

    /// Run `argv` in the workspace root and route its output.
    ///
    /// A non-zero exit status is reported in the outcome, not as an error.
    pub fn run(&self, argv: &[String], force: bool) -> Result<WrapOutcome> {
        let (program, args) = argv.split_first().ok_or(ContextError::EmptyCommand)?;

        tracing::info!(command = %argv.join(" "), "running wrapped command");

        let start = Instant::now();
        let output = Command::new(program)
            .args(args)
            .current_dir(self.config.root())
            .output()
            .map_err(|source| ContextError::Spawn {
                program: program.clone(),
                source,
            })?;
        let elapsed = start.elapsed();

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{}{}", stdout, stderr);
        let exit_code = output.status.code();

        let limits = &self.config.capture;
        if !force && !is_long(&combined, limits) {
            return Ok(WrapOutcome::Printed {
                output: combined,
                exit_code,
            });
        }

        let content = format!(
            "Command: {}\n\n=== STDOUT ===\n{}\n\n=== STDERR ===\n{}",
            argv.join(" "),
            stdout,
            stderr
        );
        let slug = argv.join("_").replace('/', "_");
        let saved = self.store.save_raw(&content, &slug, "log")?;

        Ok(WrapOutcome::Saved(WrapSummary {
            elapsed,
            exit_code,
            path: saved.path,
            chars: combined.chars().count(),
            lines: combined.matches('\n').count(),
            preview_limit: limits.preview_lines,
            preview: combined
                .lines()
                .take(limits.preview_lines)
                .map(str::to_string)
                .collect(),
        }))
    }
}
