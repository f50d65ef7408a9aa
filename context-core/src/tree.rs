//! Depth-bounded directory tree rendering.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::TreeOptions;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUATION: &str = "│   ";
const LAST_CONTINUATION: &str = "    ";

/// A single directory entry, classified once.
struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Render the tree under `root` as one line per entry.
///
/// Example output:
/// ```text
/// ├── src/
/// │   ├── commands/
/// │   └── main.rs
/// ├── node_modules/ ...
/// └── README.md
/// ```
///
/// Hidden entries are skipped, collapsed directories are never listed, and
/// anything at or below `options.max_depth` is left out silently. A
/// directory that cannot be read contributes no lines.
pub fn render_tree(root: &Path, options: &TreeOptions) -> Vec<String> {
    let mut lines = Vec::new();
    render_dir(&mut lines, root, "", 0, options);
    lines
}

/// [`render_tree`] joined by newlines.
pub fn render_tree_string(root: &Path, options: &TreeOptions) -> String {
    render_tree(root, options).join("\n")
}

fn render_dir(
    lines: &mut Vec<String>,
    dir: &Path,
    prefix: &str,
    depth: usize,
    options: &TreeOptions,
) {
    if depth >= options.max_depth {
        return;
    }

    let entries = match list_entries(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "skipping unreadable directory");
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        let is_last = i == entries.len() - 1;
        let branch = if is_last { LAST_BRANCH } else { BRANCH };

        if !entry.is_dir {
            lines.push(format!("{}{}{}", prefix, branch, entry.name));
            continue;
        }

        if options.is_collapsed(&entry.name) {
            lines.push(format!("{}{}{}/ ...", prefix, branch, entry.name));
            continue;
        }

        lines.push(format!("{}{}{}/", prefix, branch, entry.name));
        let continuation = if is_last {
            LAST_CONTINUATION
        } else {
            CONTINUATION
        };
        let child_prefix = format!("{}{}", prefix, continuation);
        render_dir(lines, &entry.path, &child_prefix, depth + 1, options);
    }
}

/// Visible entries of `dir`, directories first, each group sorted by name.
fn list_entries(dir: &Path) -> std::io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for item in fs::read_dir(dir)? {
        let Ok(item) = item else { continue };
        let name = item.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = item.path();
        // Follows symlinks, so a link to a directory renders as a directory.
        let is_dir = path.is_dir();
        entries.push(Entry { name, path, is_dir });
    }
    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(render_tree(dir.path(), &TreeOptions::default()).is_empty());
    }

    #[test]
    fn test_files_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.txt"));
        touch(&dir.path().join("a.txt"));

        let output = render_tree_string(dir.path(), &TreeOptions::default());
        assert_eq!(output, "├── a.txt\n└── b.txt");
    }

    #[test]
    fn test_dirs_before_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("Cargo.toml"));
        fs::create_dir(dir.path().join("src")).unwrap();
        touch(&dir.path().join("src/main.rs"));
        touch(&dir.path().join("src/lib.rs"));
        fs::create_dir(dir.path().join("tests")).unwrap();

        let output = render_tree_string(dir.path(), &TreeOptions::default());
        let expected = "├── src/\n│   ├── lib.rs\n│   └── main.rs\n├── tests/\n└── Cargo.toml";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_last_dir_uses_blank_continuation() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("only")).unwrap();
        touch(&dir.path().join("only/inner.rs"));

        let output = render_tree_string(dir.path(), &TreeOptions::default());
        assert_eq!(output, "└── only/\n    └── inner.rs");
    }

    #[test]
    fn test_hidden_and_collapsed() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".hidden")).unwrap();
        touch(&dir.path().join(".env"));
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        touch(&dir.path().join("node_modules/left-pad.js"));

        let output = render_tree_string(dir.path(), &TreeOptions::default());
        assert_eq!(output, "└── node_modules/ ...");
    }

    #[test]
    fn test_depth_one_lists_top_level_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        touch(&dir.path().join("src/main.rs"));

        let output = render_tree_string(dir.path(), &TreeOptions::with_depth(1));
        assert_eq!(output, "└── src/");
    }

    #[test]
    fn test_depth_zero_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.txt"));
        assert!(render_tree(dir.path(), &TreeOptions::with_depth(0)).is_empty());
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(render_tree(&missing, &TreeOptions::default()).is_empty());
    }
}
