//! Workspace layout and limits.
//!
//! All paths are derived from a single root so the same code serves the
//! invocation directory in production and a temp directory in tests:
//!
//! ```text
//! <root>/.ai/skills/coding-standards.md
//! <root>/.agent_memory/goals.md
//! <root>/.agent_memory/state.md
//! <root>/.agent_memory/.gitignore
//! <root>/.agent_memory/observations/
//! <root>/.agent_memory/context_cache/
//! ```

use std::path::{Path, PathBuf};

const AI_DIR: &str = ".ai";
const SKILLS_DIR: &str = "skills";
const MEMORY_DIR: &str = ".agent_memory";
const OBSERVATIONS_DIR: &str = "observations";
const CACHE_DIR: &str = "context_cache";

/// Directory names that are listed but never descended into.
pub const DEFAULT_COLLAPSED: &[&str] = &[
    "node_modules",
    "venv",
    "__pycache__",
    "dist",
    "build",
    ".git",
];

/// Options for the directory tree renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    /// Number of levels below the root to list. Depth 0 is the root's own entries.
    pub max_depth: usize,
    /// Directory names rendered as `name/ ...` without their children.
    pub collapsed: Vec<String>,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            max_depth: 2,
            collapsed: DEFAULT_COLLAPSED.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TreeOptions {
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn is_collapsed(&self, name: &str) -> bool {
        self.collapsed.iter().any(|c| c == name)
    }
}

/// Thresholds for the command wrapper and observation filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureLimits {
    /// Output with more characters than this is saved instead of printed.
    pub max_chars: usize,
    /// Output with more newlines than this is saved instead of printed.
    pub max_lines: usize,
    /// Lines of saved output echoed back in the summary.
    pub preview_lines: usize,
    /// Maximum characters of the slug embedded in observation filenames.
    pub slug_len: usize,
}

impl Default for CaptureLimits {
    fn default() -> Self {
        Self {
            max_chars: 1000,
            max_lines: 20,
            preview_lines: 10,
            slug_len: 30,
        }
    }
}

/// Configuration shared by every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    pub root: PathBuf,
    pub tree: TreeOptions,
    pub capture: CaptureLimits,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ContextConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tree: TreeOptions::default(),
            capture: CaptureLimits::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ai_dir(&self) -> PathBuf {
        self.root.join(AI_DIR)
    }

    pub fn skills_dir(&self) -> PathBuf {
        self.ai_dir().join(SKILLS_DIR)
    }

    pub fn memory_dir(&self) -> PathBuf {
        self.root.join(MEMORY_DIR)
    }

    pub fn observations_dir(&self) -> PathBuf {
        self.memory_dir().join(OBSERVATIONS_DIR)
    }

    /// Reserved for cached context; created by `init` but otherwise unused.
    pub fn cache_dir(&self) -> PathBuf {
        self.memory_dir().join(CACHE_DIR)
    }

    pub fn skill_path(&self) -> PathBuf {
        self.skills_dir().join("coding-standards.md")
    }

    pub fn goals_path(&self) -> PathBuf {
        self.memory_dir().join("goals.md")
    }

    pub fn state_path(&self) -> PathBuf {
        self.memory_dir().join("state.md")
    }

    pub fn gitignore_path(&self) -> PathBuf {
        self.memory_dir().join(".gitignore")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derive_from_root() {
        let config = ContextConfig::new("/work");
        assert_eq!(
            config.skill_path(),
            PathBuf::from("/work/.ai/skills/coding-standards.md")
        );
        assert_eq!(
            config.observations_dir(),
            PathBuf::from("/work/.agent_memory/observations")
        );
        assert_eq!(
            config.cache_dir(),
            PathBuf::from("/work/.agent_memory/context_cache")
        );
        assert_eq!(
            config.gitignore_path(),
            PathBuf::from("/work/.agent_memory/.gitignore")
        );
    }

    #[test]
    fn test_defaults() {
        let config = ContextConfig::default();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.tree.max_depth, 2);
        assert!(config.tree.is_collapsed("node_modules"));
        assert!(!config.tree.is_collapsed("src"));
        assert_eq!(config.capture.max_chars, 1000);
        assert_eq!(config.capture.max_lines, 20);
    }
}
