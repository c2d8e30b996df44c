use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{info, warn};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use membank::capture::{OsascriptCapture, app_running, clipboard_roundtrip, probe_interpreter};
use membank::server::{McpServer, validate_environment};
use membank::store::{database_status, format_size};
use membank::tools::{ToolContext, ToolExecutor};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

/// Duplicates log output to the log file and stderr. stdout carries protocol frames.
struct TeeWriter {
    file: fs::File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        io::stderr().write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        io::stderr().flush()
    }
}

fn setup_logging(log_dir: &Path, level: Option<&str>) -> Result<()> {
    fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join(format!("{}.log", env!("CARGO_PKG_NAME")));

    let target = Box::new(TeeWriter {
        file: fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    });

    // RUST_LOG wins over the configured level
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level.unwrap_or("info"));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        eprintln!("{}", "Verbose mode enabled".yellow());
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => handle_serve_command(config).await,
        Commands::Tools => handle_tools_command(),
        Commands::Check => handle_check_command(config).await,
    }
}

async fn handle_serve_command(config: &Config) -> Result<()> {
    let options = config.server_options();
    let runner = config.script_runner();

    let report = validate_environment(&options, &config.database.path, &runner)
        .await
        .context("Environment validation failed")?;
    info!("Environment: {:?}", report);

    let capture = OsascriptCapture::new(runner, &config.capture.app_name);
    let context = ToolContext::new(Arc::new(capture), config.database.path.clone());
    let mut server = McpServer::new(context, &options).with_info(config.server_info());

    server
        .run(tokio::io::stdin(), tokio::io::stdout())
        .await
        .context("Server transport failed")?;

    Ok(())
}

fn handle_tools_command() -> Result<()> {
    let executor = ToolExecutor::standard();
    let listing = serde_json::json!({ "tools": executor.definitions() });
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

/// Tools every build must register
const EXPECTED_TOOLS: [&str; 8] = [
    "start_session",
    "save_this",
    "replay",
    "off_the_record",
    "session_status",
    "help",
    "database_status",
    "search_content",
];

fn missing_tools(executor: &ToolExecutor) -> Vec<&'static str> {
    EXPECTED_TOOLS
        .iter()
        .copied()
        .filter(|name| !executor.has_tool(name))
        .collect()
}

async fn handle_check_command(config: &Config) -> Result<()> {
    let capture = OsascriptCapture::new(config.script_runner(), &config.capture.app_name);
    let runner = capture.runner();
    let app_name = &config.capture.app_name;

    println!("{}", "Membank environment check".bold());

    if probe_interpreter(runner).await {
        println!("  {} interpreter {}", "✓".green(), runner.interpreter());

        match app_running(runner, app_name).await {
            Ok(true) => println!("  {} {} is running", "✓".green(), app_name),
            Ok(false) => println!("  {} {} is not running (automation works)", "!".yellow(), app_name),
            Err(e) => println!("  {} {} detection: {}", "✗".red(), app_name, e),
        }

        match clipboard_roundtrip(runner, "membank clipboard check").await {
            Ok(true) => println!("  {} clipboard read/write", "✓".green()),
            Ok(false) => println!("  {} clipboard read back different text", "✗".red()),
            Err(e) => println!("  {} clipboard: {}", "✗".red(), e),
        }
    } else {
        println!("  {} interpreter {} not available", "✗".red(), runner.interpreter());
    }

    let executor = ToolExecutor::standard();
    let missing = missing_tools(&executor);
    if missing.is_empty() {
        println!("  {} server tools: {}", "✓".green(), executor.tool_names().join(", "));
    } else {
        println!("  {} server tools missing: {}", "✗".red(), missing.join(", "));
    }

    match database_status(&config.database.path) {
        Ok(Some(status)) => println!(
            "  {} database {} ({}, {} tables)",
            "✓".green(),
            status.path.display(),
            format_size(status.size_bytes),
            status.tables.len()
        ),
        Ok(None) => println!("  {} database not found at {}", "!".yellow(), config.database.path.display()),
        Err(e) => println!("  {} database {}: {}", "✗".red(), config.database.path.display(), e),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let loaded = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let config = loaded.config;

    // Setup logging before anything talks to the client
    setup_logging(&config.logging.dir, config.log_level.as_deref()).context("Failed to setup logging")?;

    for warning in &loaded.warnings {
        warn!("{}", warning);
    }
    match &loaded.source {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file loaded, using defaults"),
    }

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
