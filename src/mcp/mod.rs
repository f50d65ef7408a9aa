//! MCP server exposing the context toolkit as tools.
//!
//! Tools:
//! - init_context: create the `.ai/` and `.agent_memory/` layout
//! - get_workspace_state: snapshot goals, git status and the directory tree
//! - save_observation: offload large content to the observation store
//! - read_observation: read a saved observation back, optionally windowed

mod types;

use std::fs;
use std::path::{Path, PathBuf};

pub use types::*;

use context_core::observations::{ObservationStore, Window};
use context_core::snapshot::Snapshotter;
use context_core::workspace::init_workspace;
use context_core::{ContextConfig, ContextError};
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};

#[derive(Clone)]
pub struct ContextMcpServer {
    config: ContextConfig,
    tool_router: ToolRouter<Self>,
}

impl ContextMcpServer {
    pub fn new(config: ContextConfig) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    fn core_err(e: ContextError) -> McpError {
        McpError::internal_error(e.to_string(), None)
    }

    fn resolve_path(&self, file_path: &str) -> PathBuf {
        let path = Path::new(file_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config.root().join(path)
        }
    }

    // ============================================================
    // Tool logic - shared by the router and tests
    // ============================================================

    pub fn init_context_report(&self) -> Result<String, McpError> {
        let steps = init_workspace(&self.config).map_err(Self::core_err)?;
        Ok(steps
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("\n"))
    }

    pub fn workspace_state(&self) -> Result<String, McpError> {
        let snapshot = Snapshotter::new(&self.config)
            .take()
            .map_err(Self::core_err)?;
        Ok(snapshot.report)
    }

    pub fn save_observation_text(
        &self,
        content: &str,
        summary: &str,
        filename_hint: &str,
    ) -> Result<String, McpError> {
        let saved = ObservationStore::new(&self.config)
            .save(content, summary, filename_hint)
            .map_err(Self::core_err)?;
        Ok(saved.confirmation())
    }

    /// Content of `file_path`, or a not-found message.
    ///
    /// A path that does not exist is retried as a name or partial name in
    /// the observations directory before giving up.
    pub fn read_observation_text(
        &self,
        file_path: &str,
        head: Option<usize>,
        tail: Option<usize>,
    ) -> Result<String, McpError> {
        if file_path.trim().is_empty() {
            return Err(McpError::invalid_params("file_path must not be empty", None));
        }
        let window = Window::from_options(head, tail).ok_or_else(|| {
            McpError::invalid_params("Pass either head or tail, not both", None)
        })?;

        let direct = self.resolve_path(file_path);
        if direct.is_file() {
            let content = fs::read_to_string(&direct)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            return Ok(window.apply(&content));
        }

        match ObservationStore::new(&self.config).read(file_path, window) {
            Ok(observation) => Ok(observation.content),
            Err(ContextError::NotFound { .. }) => {
                tracing::warn!(file_path, "observation not found");
                Ok(format!("Error: File not found at {}", file_path))
            }
            Err(e) => Err(Self::core_err(e)),
        }
    }
}

#[tool_router]
impl ContextMcpServer {
    #[tool(
        description = "Initialize the Context Engineering directory structure (.ai/skills, .agent_memory). Use this when starting a new project or if the context structure is missing. Existing goals and skill documents are never overwritten."
    )]
    async fn init_context(&self) -> Result<CallToolResult, McpError> {
        let report = self.init_context_report()?;
        Ok(CallToolResult::success(vec![Content::text(report)]))
    }

    #[tool(
        description = "Get a snapshot of the current workspace state, including goals, file structure, and git status. Call this tool to orient yourself before starting a task or when context is lost. Side effect: overwrites .agent_memory/state.md."
    )]
    async fn get_workspace_state(&self) -> Result<CallToolResult, McpError> {
        let report = self.workspace_state()?;
        Ok(CallToolResult::success(vec![Content::text(report)]))
    }

    #[tool(
        description = "Save large text content (logs, analysis, code) to the file system memory and return a reference. Use this tool when output is too long (>20 lines) to avoid cluttering the context window."
    )]
    async fn save_observation(
        &self,
        params: Parameters<SaveObservationRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let text = self.save_observation_text(&req.content, &req.summary, &req.filename_hint)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        description = "Read the content of a previously saved observation file. Use this when you need the details of a file referenced in a summary. Optionally return only the first (head) or last (tail) N lines."
    )]
    async fn read_observation(
        &self,
        params: Parameters<ReadObservationRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let text = self.read_observation_text(&req.file_path, req.head, req.tail)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for ContextMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: "context-engineering".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            instructions: Some(INSTRUCTIONS.into()),
            ..Default::default()
        }
    }
}

const INSTRUCTIONS: &str = r#"Context Engineering keeps your working context on disk so it survives between sessions and stays out of the conversation.

LAYOUT:
- .ai/skills/coding-standards.md: project conventions
- .agent_memory/goals.md: current objective and tasks (edited by the user)
- .agent_memory/state.md: latest workspace snapshot
- .agent_memory/observations/: offloaded logs and analysis

WORKFLOW:
1. init_context once per project if .agent_memory is missing
2. get_workspace_state at the start of a task or after losing context
3. save_observation for any output longer than ~20 lines; keep only the summary in the conversation
4. read_observation when you need the details back (use head/tail for large files)"#;

pub async fn run_stdio_server(config: ContextConfig) -> anyhow::Result<()> {
    use tokio::io::{stdin, stdout};

    tracing::info!(root = %config.root().display(), "Starting MCP server via stdio");

    let service = ContextMcpServer::new(config);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", quit_reason);

    Ok(())
}

pub async fn run_http_server(config: ContextConfig, port: u16) -> anyhow::Result<()> {
    use rmcp::transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpService,
    };
    use tower_http::trace::TraceLayer;

    let service = StreamableHttpService::new(
        move || Ok(ContextMcpServer::new(config.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let app = axum::Router::new()
        .nest_service("/mcp", service)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("MCP server listening on http://127.0.0.1:{}/mcp", port);

    axum::serve(listener, app).await?;
    Ok(())
}
