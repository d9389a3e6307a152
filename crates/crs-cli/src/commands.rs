use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use crs_server::{CrsServer, ServerConfig};
use serde_json::json;
use tracing::info;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::CheckConfig(args) => cmd_check_config(args, &cli.format),
        Command::Checksum(args) => cmd_checksum(args, &cli.format),
    }
}

fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
    ServerConfig::from_file(path).with_context(|| format!("loading config {}", path.display()))
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.config)?;
    info!(
        path = %args.config.display(),
        queries = config.queries.len(),
        "loaded config"
    );
    if let Some(bind) = args.bind {
        info!(%bind, "overriding configured bind address");
        config.bind_addr = bind;
    }
    let server = CrsServer::new(config).await?;
    server.serve().await?;
    Ok(())
}

fn cmd_check_config(args: CheckConfigArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => {
            println!("{} {} is valid", "✓".green().bold(), args.config.display());
            println!("  Bind: {}", config.bind_addr.to_string().bold());
            println!("  Request timeout: {} ms", config.request_timeout_ms);
            println!(
                "  Generator: delimiter {:?}, ttl {}s, {} attempts",
                config.generator.delimiter, config.generator.ttl_secs, config.generator.max_attempts
            );
            println!("  Named queries:");
            for query in &config.queries {
                println!("    {} → {}", query.key.yellow(), query.route().cyan());
            }
        }
    }
    Ok(())
}

fn file_checksum(path: &Path) -> anyhow::Result<(u32, usize)> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok((crs_types::crc32(&bytes), bytes.len()))
}

fn cmd_checksum(args: ChecksumArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let (checksum, size) = file_checksum(&args.file)?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "file": args.file.display().to_string(), "size": size, "checksum": checksum })
        ),
        OutputFormat::Text => println!(
            "{}  {} ({} bytes)",
            checksum.to_string().yellow().bold(),
            args.file.display(),
            size
        ),
    }
    Ok(())
}
