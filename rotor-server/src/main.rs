use std::io::{self, BufWriter, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rotor_server::cache::{CacheConfig, CachedPlanner};
use rotor_server::input::{read_batch, read_batch_from};
use rotor_server::planner::{DEFAULT_WINDOW, Planner, SearchConfig};
use rotor_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Default listen address for `serve`.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Parser)]
#[command(
    name = "rotor-server",
    version,
    about = "Earliest arrival with least waiting on graphs with rotating edges"
)]
struct Cli {
    /// Offset window for the dominance table.
    #[arg(
        long,
        global = true,
        env = "ROTOR_WINDOW",
        default_value_t = DEFAULT_WINDOW,
        value_parser = parse_window
    )]
    window: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a batch of instances and print one answer per line (the default).
    Solve {
        /// Input file; stdin when omitted.
        path: Option<PathBuf>,
    },
    /// Serve the JSON API over HTTP.
    Serve {
        /// Address to listen on.
        #[arg(env = "ROTOR_ADDR", default_value = DEFAULT_ADDR)]
        addr: SocketAddr,
    },
}

fn parse_window(raw: &str) -> Result<usize, String> {
    let window: usize = raw.parse().map_err(|e| format!("{e}"))?;
    SearchConfig::new(window)
        .validate()
        .map_err(|e| e.to_string())?;
    Ok(window)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries answers
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = SearchConfig::new(cli.window);
    match cli.command.unwrap_or(Command::Solve { path: None }) {
        Command::Solve { path } => solve(path.as_deref(), &config),
        Command::Serve { addr } => serve(addr, config).await,
    }
}

/// Solve a batch from `path` (or stdin) and print one answer per line.
fn solve(path: Option<&Path>, config: &SearchConfig) -> Result<()> {
    let graphs = match path {
        Some(path) => read_batch(path).with_context(|| format!("reading {}", path.display()))?,
        None => read_batch_from(io::stdin().lock()).context("reading stdin")?,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (instance, graph) in graphs.iter().enumerate() {
        let result = Planner::new(graph, config)
            .solve()
            .with_context(|| format!("instance {}", instance + 1))?;
        writeln!(out, "{}", result.outcome).context("writing answer")?;
    }
    out.flush().context("writing answer")
}

/// Run the HTTP server.
async fn serve(addr: SocketAddr, config: SearchConfig) -> Result<()> {
    let planner = CachedPlanner::new(&CacheConfig::default());
    let state = AppState::new(planner, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "rotor planner listening");
    info!("GET  /health - health check");
    info!("POST /solve  - solve one instance");

    axum::serve(listener, app).await.context("server error")
}
