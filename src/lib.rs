//! Command-line and MCP front-ends for the context toolkit.
//!
//! Both surfaces are thin: every operation is implemented in
//! [`context_core`] and only formatted here.

pub mod commands;
pub mod mcp;

pub use context_core::ContextConfig;
