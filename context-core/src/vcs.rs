//! Git status probe.
//!
//! Failures here are never errors: a missing `git` binary or a directory
//! outside any repository both produce [`NOT_A_REPOSITORY`].

use std::path::{Path, PathBuf};
use std::process::Command;

pub const NOT_A_REPOSITORY: &str = "Not a git repository.";
pub const WORKING_TREE_CLEAN: &str = "Working tree clean.";
pub const NO_COMMITS: &str = "(none)";

/// Runs `git` in a fixed directory.
#[derive(Debug, Clone)]
pub struct VcsProbe {
    program: String,
    dir: PathBuf,
}

impl VcsProbe {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_program("git", dir)
    }

    /// Use a different executable in place of `git`.
    pub fn with_program(program: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Short status block followed by the last commit summary.
    ///
    /// ~~~text
    /// ```
    ///  M src/main.rs
    /// ```
    ///
    /// Last commit: 1a2b3c4 Fix tree prefix
    /// ~~~
    pub fn status(&self) -> String {
        let Some(changes) = self.run(&["status", "--short"]) else {
            return NOT_A_REPOSITORY.to_string();
        };

        let mut block = if changes.is_empty() {
            WORKING_TREE_CLEAN.to_string()
        } else {
            format!("```\n{}```", changes)
        };

        // A fresh repository has no HEAD yet; `git log` fails but the status above is still valid.
        let last_commit = self
            .run(&["log", "-1", "--oneline"])
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_COMMITS.to_string());
        block.push_str(&format!("\n\nLast commit: {}", last_commit));
        block
    }

    /// Stdout of a successful invocation, `None` on spawn failure or non-zero exit.
    fn run(&self, args: &[&str]) -> Option<String> {
        let output = match Command::new(&self.program)
            .args(args)
            .current_dir(&self.dir)
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(program = %self.program, error = %e, "vcs probe could not start");
                return None;
            }
        };

        if !output.status.success() {
            tracing::debug!(program = %self.program, ?args, status = ?output.status.code(), "vcs probe failed");
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
