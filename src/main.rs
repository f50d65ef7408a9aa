use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use context_engineering::{commands, mcp, ContextConfig};

#[derive(Parser)]
#[command(name = "ctx")]
#[command(about = "Context Engineering CLI: persist and recall agent working context")]
struct Cli {
    /// Workspace root containing .ai/ and .agent_memory/
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize directory structure
    Init,
    /// Generate workspace state snapshot
    State {
        /// Print state to stdout
        #[arg(short, long)]
        print: bool,
    },
    /// Run command and capture its output
    Wrap {
        /// Force save to file even if short
        #[arg(short, long)]
        force: bool,

        /// The command to run
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Read a saved observation file
    Read {
        /// Filename or partial match to read
        filename: String,

        /// Show only first N lines
        #[arg(long, conflicts_with = "tail")]
        head: Option<usize>,

        /// Show only last N lines
        #[arg(long)]
        tail: Option<usize>,
    },
    /// Save stdin as an observation file
    Save {
        /// A brief summary of the content
        #[arg(short, long, default_value = "")]
        summary: String,

        /// Short string to use in the filename
        #[arg(long, default_value = "observation")]
        hint: String,
    },
    /// Start MCP server via stdio
    Mcp,
    /// Start MCP server over streamable HTTP
    Serve {
        /// Port to listen on (127.0.0.1 only)
        #[arg(short, long, default_value = "17020")]
        port: u16,
    },
}

/// Initialize tracing on stderr; server modes log more by default.
fn init_tracing(server: bool) {
    let default = if server {
        "context_engineering=info,context_core=info,tower_http=debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
    );

    // stdout carries command output, or the protocol in stdio mode
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let server = matches!(cli.command, Commands::Mcp | Commands::Serve { .. });
    init_tracing(server);

    let config = ContextConfig::new(cli.root);
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Init => commands::init(&config, &mut out)?,
        Commands::State { print } => commands::state(&config, print, &mut out)?,
        Commands::Wrap { force, command } => commands::wrap(&config, &command, force, &mut out)?,
        Commands::Read {
            filename,
            head,
            tail,
        } => commands::read(&config, &filename, head, tail, &mut out)?,
        Commands::Save { summary, hint } => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            commands::save(&config, &content, &summary, &hint, &mut out)?;
        }
        Commands::Mcp => {
            drop(out);
            mcp::run_stdio_server(config).await?;
        }
        Commands::Serve { port } => {
            drop(out);
            mcp::run_http_server(config, port).await?;
        }
    }

    Ok(())
}
