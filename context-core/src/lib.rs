//! Core utilities for persisting and recalling an agent's working context.
//!
//! # Components
//!
//! - [`workspace`]: Creates the `.ai/` and `.agent_memory/` layout with templates.
//! - [`tree`]: Depth-bounded directory tree rendering.
//! - [`vcs`]: Short git status and last-commit summary.
//! - [`observations`]: Named text blobs under `.agent_memory/observations/`.
//! - [`snapshot`]: Goals + status + tree composed into `state.md`.
//! - [`wrap`]: Runs a command and offloads long output to the observation store.
//!
//! Every component takes a [`ContextConfig`], so tests can point the whole
//! toolkit at a temporary root.

pub mod config;
pub mod error;
pub mod observations;
pub mod snapshot;
pub mod templates;
pub mod tree;
pub mod vcs;
pub mod workspace;
pub mod wrap;

pub use config::{CaptureLimits, ContextConfig, TreeOptions};
pub use error::{ContextError, Result};
