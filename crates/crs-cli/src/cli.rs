use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "crs",
    about = "CAS repository service: checksummed object storage with named-query indexing",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the CRS HTTP server
    Serve(ServeArgs),
    /// Load and validate a server config file
    CheckConfig(CheckConfigArgs),
    /// Print the CRC-32 a client must declare for a file
    Checksum(ChecksumArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Path to the TOML config file
    #[arg(short, long)]
    pub config: PathBuf,
    /// Override the configured bind address
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct CheckConfigArgs {
    #[arg(short, long)]
    pub config: PathBuf,
}

#[derive(Args)]
pub struct ChecksumArgs {
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["crs", "serve", "--config", "crs.toml"]).unwrap();
        let Command::Serve(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.config, PathBuf::from("crs.toml"));
        assert!(args.bind.is_none());
    }

    #[test]
    fn parse_serve_bind_override() {
        let cli = Cli::try_parse_from([
            "crs",
            "serve",
            "-c",
            "crs.toml",
            "--bind",
            "0.0.0.0:9000",
        ])
        .unwrap();
        let Command::Serve(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.bind, Some("0.0.0.0:9000".parse().unwrap()));
    }

    #[test]
    fn serve_requires_config() {
        assert!(Cli::try_parse_from(["crs", "serve"]).is_err());
    }

    #[test]
    fn parse_check_config() {
        let cli = Cli::try_parse_from(["crs", "check-config", "--config", "x.toml"]).unwrap();
        assert!(matches!(cli.command, Command::CheckConfig(_)));
    }

    #[test]
    fn parse_checksum() {
        let cli = Cli::try_parse_from(["crs", "checksum", "payload.bin"]).unwrap();
        let Command::Checksum(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.file, PathBuf::from("payload.bin"));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["crs", "-v", "checksum", "f"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["crs", "--format", "json", "checksum", "f"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
