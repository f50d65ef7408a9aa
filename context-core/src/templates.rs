//! Template text written by `init`.

/// Starter coding-standards skill document.
pub const CODING_STANDARDS: &str = include_str!("../templates/coding-standards.md");

/// Placeholder goals document.
pub const GOALS: &str = include_str!("../templates/goals.md");

/// Keeps transient memory files out of version control.
pub const MEMORY_GITIGNORE: &str = include_str!("../templates/memory.gitignore");

/// Goals text used in snapshots when `goals.md` does not exist.
pub const NO_GOALS: &str = "No goals defined.";
