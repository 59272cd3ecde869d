//! slo3d server - height-map crops and static tile serving over HTTP.

mod error;

use std::path::PathBuf;

use clap::Parser;
use slo3d::config::{ConfigFile, ServerConfig};
use slo3d::logging::{self, LoggingConfig};
use tracing::info;

use crate::error::CliError;

/// Serve height-map crops composed from a PNG tile pyramid.
#[derive(Debug, Parser)]
#[command(name = "slo3d-server", version, about)]
struct Cli {
    /// Port to serve on [default: 8888]
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Directory of static files to host [default: .]
    #[arg(short = 'd', long = "dir")]
    dir: Option<PathBuf>,

    /// Tile pyramid directory [default: <dir>/data/tiles]
    #[arg(long)]
    tiles: Option<PathBuf>,

    /// INI config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Per-request deadline in seconds, 0 to disable [default: 30]
    #[arg(long)]
    timeout: Option<u64>,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let _log_guard = logging::init(
        &LoggingConfig::default()
            .verbose(cli.verbose)
            .log_file(cli.log_file.clone()),
    )?;

    let config = resolve_config(&cli)?;
    info!(version = slo3d::VERSION, "Starting slo3d server");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime.block_on(slo3d::server::run(config))?;
    Ok(())
}

/// Resolve settings: CLI takes precedence, then config file, then defaults.
fn resolve_config(cli: &Cli) -> Result<ServerConfig, CliError> {
    let file = match cli.config {
        Some(ref path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let mut config = ServerConfig::from_config_file(&file);

    if let Some(port) = cli.port {
        config = config.with_port(port);
    }
    if let Some(ref dir) = cli.dir {
        config = config.with_root(dir);
    }
    if let Some(ref tiles) = cli.tiles {
        config = config.with_tiles_dir(tiles);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout_secs(secs);
    }
    Ok(config)
}
