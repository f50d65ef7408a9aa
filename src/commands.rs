//! CLI subcommand handlers.
//!
//! Each handler writes human-readable output to `out` so the binary can pass
//! stdout and tests can pass a buffer.

use std::io::Write;

use anyhow::Result;
use context_core::observations::{ObservationStore, Resolution, Window};
use context_core::snapshot::Snapshotter;
use context_core::workspace::init_workspace;
use context_core::wrap::{CommandWrapper, WrapOutcome};
use context_core::{ContextConfig, ContextError};

const BANNER_WIDTH: usize = 20;

pub fn init(config: &ContextConfig, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Initializing Context Engineering structure...")?;

    for step in init_workspace(config)? {
        writeln!(out, "{}", step)?;
    }

    writeln!(out)?;
    writeln!(out, "Initialization complete! You are ready to engineer context.")?;
    Ok(())
}

pub fn state(config: &ContextConfig, print: bool, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Taking workspace snapshot...")?;

    let snapshot = Snapshotter::new(config).take()?;
    writeln!(out, "State saved to: {}", snapshot.path.display())?;

    if print {
        let bar = "=".repeat(BANNER_WIDTH);
        writeln!(out)?;
        writeln!(out, "{} STATE PREVIEW {}", bar, bar)?;
        writeln!(out, "{}", snapshot.report)?;
        writeln!(out, "{}", "=".repeat(BANNER_WIDTH * 2 + " STATE PREVIEW ".len()))?;
    }
    Ok(())
}

pub fn wrap(
    config: &ContextConfig,
    command: &[String],
    force: bool,
    out: &mut dyn Write,
) -> Result<()> {
    if !command.is_empty() {
        writeln!(out, "Running: {}", command.join(" "))?;
    }

    match CommandWrapper::new(config).run(command, force)? {
        WrapOutcome::Printed { output, .. } => {
            write!(out, "{}", output)?;
            if !output.ends_with('\n') {
                writeln!(out)?;
            }
        }
        WrapOutcome::Saved(summary) => {
            writeln!(out)?;
            writeln!(out, "{}", summary.render())?;
        }
    }
    Ok(())
}

pub fn read(
    config: &ContextConfig,
    name: &str,
    head: Option<usize>,
    tail: Option<usize>,
    out: &mut dyn Write,
) -> Result<()> {
    let window = Window::from_options(head, tail)
        .ok_or_else(|| anyhow::anyhow!("--head and --tail cannot be used together"))?;
    let store = ObservationStore::new(config);

    let observation = match store.read(name, window) {
        Ok(observation) => observation,
        Err(ContextError::NotFound { query, available }) => {
            writeln!(out, "Error: No observation file matching '{}' found.", query)?;
            writeln!(out, "Available files in {}:", store.dir().display())?;
            for file in available {
                writeln!(out, "  - {}", file)?;
            }
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if let Resolution::Partial { .. } = observation.resolution {
        writeln!(out, "Found: {}", observation.file_name)?;
    }

    match window {
        Window::Full => writeln!(out, "{}:\n", observation.file_name)?,
        Window::Head(n) => writeln!(
            out,
            "{} (showing first {} lines):\n",
            observation.file_name, n
        )?,
        Window::Tail(n) => writeln!(
            out,
            "{} (showing last {} lines):\n",
            observation.file_name, n
        )?,
    }
    writeln!(out, "{}", observation.content)?;
    Ok(())
}

pub fn save(
    config: &ContextConfig,
    content: &str,
    summary: &str,
    hint: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let saved = ObservationStore::new(config).save(content, summary, hint)?;
    writeln!(out, "{}", saved.confirmation())?;
    Ok(())
}
