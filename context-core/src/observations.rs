//! Observation store: large text offloaded to `.agent_memory/observations/`.
//!
//! Files are named `<YYYYmmdd_HHMMSS>_<slug>.<ext>`. Saves never overwrite;
//! a name already taken gets a `_1`, `_2`, ... suffix before the extension.
//! Lookups accept either an exact filename or any substring of one.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::{CaptureLimits, ContextConfig};
use crate::error::{ContextError, Result};

/// Slug used when a hint sanitizes to nothing.
pub const DEFAULT_HINT: &str = "observation";

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Which part of an observation to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    #[default]
    Full,
    /// First `n` lines.
    Head(usize),
    /// Last `n` lines.
    Tail(usize),
}

impl Window {
    /// Build a window from optional `--head`/`--tail` style arguments.
    ///
    /// Returns `None` when both are given.
    pub fn from_options(head: Option<usize>, tail: Option<usize>) -> Option<Self> {
        match (head, tail) {
            (Some(_), Some(_)) => None,
            (Some(n), None) => Some(Self::Head(n)),
            (None, Some(n)) => Some(Self::Tail(n)),
            (None, None) => Some(Self::Full),
        }
    }

    pub fn apply(&self, content: &str) -> String {
        match *self {
            Self::Full => content.to_string(),
            Self::Head(n) => content.lines().take(n).collect::<Vec<_>>().join("\n"),
            Self::Tail(n) => {
                let lines: Vec<&str> = content.lines().collect();
                let start = lines.len().saturating_sub(n);
                lines[start..].join("\n")
            }
        }
    }
}

/// How a lookup found its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Exact,
    /// Chosen as the first of `candidates` (sorted) containing the query.
    Partial { candidates: Vec<String> },
}

/// A file written by [`ObservationStore::save`] or [`ObservationStore::save_raw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedObservation {
    pub path: PathBuf,
    pub file_name: String,
    pub summary: String,
    /// Size in characters.
    pub chars: usize,
    /// Size in bytes as written.
    pub bytes: usize,
}

impl SavedObservation {
    /// Confirmation text returned to the caller.
    pub fn confirmation(&self) -> String {
        format!(
            "Content saved to external memory.\nSummary: {}\nFile Path: {}\nSize: {} chars ({} bytes)",
            self.summary,
            self.path.display(),
            self.chars,
            self.bytes
        )
    }
}

/// A file read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub file_name: String,
    pub path: PathBuf,
    /// Content after the requested [`Window`] was applied.
    pub content: String,
    pub resolution: Resolution,
}

#[derive(Debug, Clone)]
pub struct ObservationStore {
    dir: PathBuf,
    limits: CaptureLimits,
}

impl ObservationStore {
    pub fn new(config: &ContextConfig) -> Self {
        Self {
            dir: config.observations_dir(),
            limits: config.capture,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save `content` as `<timestamp>_<hint>.txt`.
    pub fn save(&self, content: &str, summary: &str, hint: &str) -> Result<SavedObservation> {
        let mut saved = self.save_raw(content, hint, "txt")?;
        saved.summary = summary.to_string();
        Ok(saved)
    }

    /// Save `content` as `<timestamp>_<slug>.<ext>`, sanitizing `slug` first.
    pub fn save_raw(&self, content: &str, slug: &str, ext: &str) -> Result<SavedObservation> {
        fs::create_dir_all(&self.dir).map_err(|e| ContextError::io(&self.dir, e))?;

        let stem = format!(
            "{}_{}",
            Local::now().format(TIMESTAMP_FORMAT),
            slugify(slug, self.limits.slug_len)
        );
        let path = write_unique(&self.dir, &stem, ext, content)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::info!(path = %path.display(), bytes = content.len(), "saved observation");

        Ok(SavedObservation {
            path,
            file_name,
            summary: String::new(),
            chars: content.chars().count(),
            bytes: content.len(),
        })
    }

    /// Names of all files in the store, sorted. A missing directory is empty.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ContextError::io(&self.dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ContextError::io(&self.dir, e))?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Find the file for `query`: an exact name first, then the first
    /// sorted name containing it.
    ///
    /// Only bare file names are looked up, so a query never reaches outside
    /// the store. An empty query matches nothing.
    pub fn resolve(&self, query: &str) -> Result<(PathBuf, Resolution)> {
        let names = self.list()?;
        if !is_bare_name(query) {
            tracing::debug!(query, "rejected observation query");
            return Err(ContextError::NotFound {
                query: query.to_string(),
                available: names,
            });
        }

        let exact = self.dir.join(query);
        if exact.is_file() {
            return Ok((exact, Resolution::Exact));
        }

        let candidates = match_candidates(query, &names);
        match candidates.first() {
            Some(chosen) => {
                tracing::debug!(query, chosen = %chosen, matches = candidates.len(), "resolved by partial match");
                let path = self.dir.join(chosen);
                Ok((path, Resolution::Partial { candidates }))
            }
            None => Err(ContextError::NotFound {
                query: query.to_string(),
                available: names,
            }),
        }
    }

    /// Resolve `query` and return the windowed content.
    pub fn read(&self, query: &str, window: Window) -> Result<Observation> {
        let (path, resolution) = self.resolve(query)?;
        let content = fs::read_to_string(&path).map_err(|e| ContextError::io(&path, e))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Observation {
            file_name,
            path,
            content: window.apply(&content),
            resolution,
        })
    }
}

fn is_bare_name(query: &str) -> bool {
    !query.is_empty() && query != "." && !query.contains("..") && !query.contains(['/', '\\'])
}

/// Names containing `query`, sorted so the first is stable across calls.
pub fn match_candidates(query: &str, names: &[String]) -> Vec<String> {
    let mut matches: Vec<String> = names
        .iter()
        .filter(|name| name.contains(query))
        .cloned()
        .collect();
    matches.sort();
    matches
}

/// Keep alphanumerics, `_` and `-`, truncated to `max_len` characters.
pub fn slugify(raw: &str, max_len: usize) -> String {
    let slug: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .take(max_len)
        .collect();
    if slug.is_empty() {
        DEFAULT_HINT.to_string()
    } else {
        slug
    }
}

/// Create `<stem>.<ext>` in `dir`, or the first free `<stem>_<n>.<ext>`.
pub(crate) fn write_unique(dir: &Path, stem: &str, ext: &str, content: &str) -> Result<PathBuf> {
    let mut attempt = 0usize;
    loop {
        let name = if attempt == 0 {
            format!("{}.{}", stem, ext)
        } else {
            format!("{}_{}.{}", stem, attempt, ext)
        };
        let path = dir.join(name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(content.as_bytes())
                    .map_err(|e| ContextError::io(&path, e))?;
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::warn!(path = %path.display(), "observation name taken, adding suffix");
                attempt += 1;
            }
            Err(e) => return Err(ContextError::io(&path, e)),
        }
    }
}
