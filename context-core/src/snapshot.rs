//! Workspace state snapshots written to `.agent_memory/state.md`.

use std::fs;
use std::path::PathBuf;

use chrono::Local;

use crate::config::ContextConfig;
use crate::error::{ContextError, Result};
use crate::templates::NO_GOALS;
use crate::tree;
use crate::vcs::VcsProbe;

/// A rendered report and where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub report: String,
    pub path: PathBuf,
}

/// Composes goals, git status and the directory tree into one report.
#[derive(Debug, Clone)]
pub struct Snapshotter {
    config: ContextConfig,
    probe: VcsProbe,
}

impl Snapshotter {
    pub fn new(config: &ContextConfig) -> Self {
        Self::with_probe(config, VcsProbe::new(config.root()))
    }

    pub fn with_probe(config: &ContextConfig, probe: VcsProbe) -> Self {
        Self {
            config: config.clone(),
            probe,
        }
    }

    /// Render the current state and overwrite `state.md` with it.
    pub fn take(&self) -> Result<Snapshot> {
        let report = self.render();

        let memory_dir = self.config.memory_dir();
        fs::create_dir_all(&memory_dir).map_err(|e| ContextError::io(&memory_dir, e))?;

        let path = self.config.state_path();
        fs::write(&path, &report).map_err(|e| ContextError::io(&path, e))?;
        tracing::info!(path = %path.display(), "state snapshot written");

        Ok(Snapshot { report, path })
    }

    /// Render the report without writing it.
    pub fn render(&self) -> String {
        let goals = self.read_goals();
        let changes = self.probe.status();
        let structure = tree::render_tree_string(self.config.root(), &self.config.tree);

        format_report(
            &Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            goals.trim(),
            changes.trim(),
            self.config.tree.max_depth,
            structure.trim(),
        )
    }

    fn read_goals(&self) -> String {
        let path = self.config.goals_path();
        match fs::read_to_string(&path) {
            Ok(goals) => goals,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no goals document");
                NO_GOALS.to_string()
            }
        }
    }
}

fn format_report(
    timestamp: &str,
    goals: &str,
    changes: &str,
    depth: usize,
    structure: &str,
) -> String {
    format!(
        "# Workspace State\n\
         Updated: {timestamp}\n\
         \n\
         ## Current Goals\n\
         {goals}\n\
         \n\
         ## Recent Changes\n\
         {changes}\n\
         \n\
         ## Directory Structure (Depth: {depth})\n\
         {structure}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_report_layout() {
        let report = format_report(
            "2024-01-01T00:00:00.000000",
            "Ship it",
            "Working tree clean.",
            2,
            "└── src/",
        );
        assert_eq!(
            report,
            "# Workspace State\nUpdated: 2024-01-01T00:00:00.000000\n\n## Current Goals\nShip it\n\n## Recent Changes\nWorking tree clean.\n\n## Directory Structure (Depth: 2)\n└── src/\n"
        );
    }
}
