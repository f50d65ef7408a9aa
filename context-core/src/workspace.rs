//! Directory layout initialization.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ContextConfig;
use crate::error::{ContextError, Result};
use crate::templates;

/// One action taken by [`init_workspace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitStep {
    Directory(PathBuf),
    Skill(PathBuf),
    Goals(PathBuf),
    Gitignore(PathBuf),
}

impl fmt::Display for InitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(path) => write!(f, "Created directory: {}", path.display()),
            Self::Skill(path) => write!(f, "Created skill: {}", path.display()),
            Self::Goals(path) => write!(f, "Created memory: {}", path.display()),
            Self::Gitignore(_) => write!(f, "Created .gitignore for memory"),
        }
    }
}

/// Create the `.ai/` and `.agent_memory/` layout.
///
/// Directories are ensured on every call. Template files are only written
/// when absent, so running this twice never touches edited goals or skills.
pub fn init_workspace(config: &ContextConfig) -> Result<Vec<InitStep>> {
    let mut steps = Vec::new();

    for dir in [
        config.skills_dir(),
        config.observations_dir(),
        config.cache_dir(),
    ] {
        fs::create_dir_all(&dir).map_err(|e| ContextError::io(&dir, e))?;
        steps.push(InitStep::Directory(dir));
    }

    let skill = config.skill_path();
    if write_if_absent(&skill, templates::CODING_STANDARDS)? {
        steps.push(InitStep::Skill(skill));
    }

    let goals = config.goals_path();
    if write_if_absent(&goals, templates::GOALS)? {
        steps.push(InitStep::Goals(goals));
    }

    let gitignore = config.gitignore_path();
    if write_if_absent(&gitignore, templates::MEMORY_GITIGNORE)? {
        steps.push(InitStep::Gitignore(gitignore));
    }

    tracing::info!(root = %config.root().display(), steps = steps.len(), "workspace initialized");
    Ok(steps)
}

fn write_if_absent(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "keeping existing file");
        return Ok(false);
    }
    fs::write(path, content).map_err(|e| ContextError::io(path, e))?;
    Ok(true)
}
