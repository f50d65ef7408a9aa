//! Request types for MCP tools.

use rmcp::schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SaveObservationRequest {
    #[schemars(description = "The full content to save (logs, analysis, code)")]
    pub content: String,
    #[schemars(description = "A brief summary of what this content is")]
    pub summary: String,
    #[schemars(
        description = "A short string to use in the filename, e.g. 'npm_install_log'. Only letters, digits, '_' and '-' are kept."
    )]
    #[serde(default = "default_hint")]
    pub filename_hint: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadObservationRequest {
    #[schemars(
        description = "Path to the observation file (absolute, or relative to the workspace root). A bare filename or any part of one is looked up in the observations directory."
    )]
    pub file_path: String,
    #[schemars(description = "Return only the first N lines")]
    #[serde(default)]
    pub head: Option<usize>,
    #[schemars(description = "Return only the last N lines. Cannot be combined with head.")]
    #[serde(default)]
    pub tail: Option<usize>,
}

fn default_hint() -> String {
    context_core::observations::DEFAULT_HINT.to_string()
}
