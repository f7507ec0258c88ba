//! Command-line argument parsing for Pixy
//!
//! Clap-based CLI with subcommands and verbosity control. With no
//! subcommand and no message, an interactive chat session starts.

use crate::cli::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pixy - personal assistant agent for local Ollama models
#[derive(Parser, Debug)]
#[command(name = "pixy")]
#[command(version)]
#[command(about = "Chat with a local Ollama model that remembers you", long_about = None)]
pub struct Args {
    /// One-shot message; omit to start an interactive session
    #[arg(value_name = "MESSAGE")]
    pub message: Option<String>,

    /// Ollama model to use (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Ollama host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Ollama port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// User identity for per-user memory
    #[arg(short, long, default_value = "default")]
    pub user: String,

    /// Configuration file path (default: ~/.pixy/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat,

    /// List installed Ollama models
    Models,

    /// Display the effective configuration
    Config,

    /// Remove persisted state (history, memory, user data)
    Clean,
}

impl Args {
    /// Tracing filter directive derived from the verbosity flags
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Base URL for the Ollama server; flags take precedence over the
    /// `[ollama]` section, which in turn carries the defaults
    pub fn ollama_url(&self, config: &Config) -> String {
        match (&self.host, self.port) {
            (None, None) => config.ollama_url(),
            (host, port) => format!(
                "http://{}:{}",
                host.as_deref().unwrap_or(&config.ollama.host),
                port.unwrap_or(config.ollama.port)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["pixy"]);
        assert!(args.message.is_none());
        assert_eq!(args.user, "default");
        assert_eq!(
            args.ollama_url(&Config::default()),
            "http://127.0.0.1:11434"
        );
        assert_eq!(args.log_filter(), "info");
    }

    #[test]
    fn test_config_host_applies_without_flags() {
        let mut config = Config::default();
        config.ollama.host = "192.168.1.10".to_string();
        config.ollama.port = 11435;

        let args = Args::parse_from(["pixy"]);
        assert_eq!(args.ollama_url(&config), "http://192.168.1.10:11435");
    }

    #[test]
    fn test_host_flag_overrides_config() {
        let mut config = Config::default();
        config.ollama.host = "192.168.1.10".to_string();

        let args = Args::parse_from(["pixy", "--host", "10.0.0.5"]);
        // unset port still comes from config
        assert_eq!(args.ollama_url(&config), "http://10.0.0.5:11434");

        let args = Args::parse_from(["pixy", "--port", "9000"]);
        assert_eq!(args.ollama_url(&config), "http://192.168.1.10:9000");
    }

    #[test]
    fn test_one_shot_message() {
        let args = Args::parse_from(["pixy", "what is 2+2?"]);
        assert_eq!(args.message.as_deref(), Some("what is 2+2?"));
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(Args::parse_from(["pixy", "-v"]).log_filter(), "debug");
        assert_eq!(Args::parse_from(["pixy", "-vv"]).log_filter(), "trace");
        assert_eq!(Args::parse_from(["pixy", "-q"]).log_filter(), "warn");
    }

    #[test]
    fn test_subcommand_parses() {
        let args = Args::parse_from(["pixy", "models"]);
        assert!(matches!(args.command, Some(Commands::Models)));
    }
}
