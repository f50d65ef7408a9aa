use std::fs;
use std::path::Path;

use context_core::tree::render_tree;
use context_core::TreeOptions;
use speculate2::speculate;

fn mkdirs(root: &Path, rel: &str) {
    fs::create_dir_all(root.join(rel)).expect("Failed to create dirs");
}

fn touch(root: &Path, rel: &str) {
    fs::write(root.join(rel), "x").expect("Failed to write file");
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = dir.path();
    }

    describe "depth bound" {
        it "omits everything below max_depth" {
            mkdirs(root, "a/b/c/d");
            touch(root, "a/b/c/d/deep.txt");
            touch(root, "a/b/c/level3.txt");

            let lines = render_tree(root, &TreeOptions::default());

            assert_eq!(lines, vec!["└── a/".to_string(), "    └── b/".to_string()]);
        }

        it "shows deeper levels when asked" {
            mkdirs(root, "a/b/c");
            touch(root, "a/b/c/leaf.txt");

            let lines = render_tree(root, &TreeOptions::with_depth(4));

            assert_eq!(lines.len(), 4);
            assert!(lines[3].ends_with("└── leaf.txt"));
        }

        it "never names a path beyond the depth" {
            for depth in 0..4 {
                let nested = (0..6).map(|i| format!("n{}", i)).collect::<Vec<_>>().join("/");
                mkdirs(root, &nested);

                let lines = render_tree(root, &TreeOptions::with_depth(depth));

                assert_eq!(lines.len(), depth);
                for (i, line) in lines.iter().enumerate() {
                    assert!(line.ends_with(&format!("n{}/", i)));
                }
            }
        }
    }

    describe "collapsed directories" {
        it "never enumerates their children" {
            for name in ["node_modules", "venv", "__pycache__", "dist", "build"] {
                mkdirs(root, &format!("{}/inner", name));
                touch(root, &format!("{}/inner/file.txt", name));
            }

            let lines = render_tree(root, &TreeOptions::with_depth(5));

            assert_eq!(lines.len(), 5);
            assert!(lines.iter().all(|l| l.ends_with("/ ...")));
            assert!(!lines.iter().any(|l| l.contains("inner")));
        }

        it "collapses at any depth" {
            mkdirs(root, "web/node_modules/react");

            let lines = render_tree(root, &TreeOptions::default());

            assert_eq!(lines, vec!["└── web/".to_string(), "    └── node_modules/ ...".to_string()]);
        }

        it "honours a custom list" {
            mkdirs(root, "target/debug");
            let options = TreeOptions {
                max_depth: 3,
                collapsed: vec!["target".to_string()],
            };

            let lines = render_tree(root, &options);

            assert_eq!(lines, vec!["└── target/ ...".to_string()]);
        }
    }

    describe "ordering and hidden entries" {
        it "sorts directories first then names" {
            touch(root, "zeta.md");
            touch(root, "alpha.md");
            mkdirs(root, "src");
            mkdirs(root, "docs");
            mkdirs(root, ".git/objects");
            touch(root, ".env");

            let lines = render_tree(root, &TreeOptions::with_depth(1));

            assert_eq!(
                lines,
                vec![
                    "├── docs/".to_string(),
                    "├── src/".to_string(),
                    "├── alpha.md".to_string(),
                    "└── zeta.md".to_string(),
                ]
            );
        }

        it "keeps the vertical bar only under non-last children" {
            mkdirs(root, "a");
            touch(root, "a/one.rs");
            mkdirs(root, "b");
            touch(root, "b/two.rs");

            let lines = render_tree(root, &TreeOptions::default());

            assert_eq!(
                lines,
                vec![
                    "├── a/".to_string(),
                    "│   └── one.rs".to_string(),
                    "└── b/".to_string(),
                    "    └── two.rs".to_string(),
                ]
            );
        }
    }
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_renders_without_children() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let root = dir.path();
    mkdirs(root, "a_locked");
    touch(root, "a_locked/secret.txt");
    mkdirs(root, "b_open");
    touch(root, "b_open/inner.txt");
    touch(root, "z.txt");

    let locked = root.join("a_locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod failed");

    // Privileged users can still list the directory.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod failed");
        return;
    }

    let lines = render_tree(root, &TreeOptions::default());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod failed");

    assert_eq!(
        lines,
        vec![
            "├── a_locked/".to_string(),
            "├── b_open/".to_string(),
            "│   └── inner.txt".to_string(),
            "└── z.txt".to_string(),
        ]
    );
}
