//! CLI module for Tubelens.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::analysis::AnalysisType;
use clap::{Parser, Subcommand};

/// Tubelens - structured insights from YouTube transcripts
///
/// Fetches a video's captions, asks a language model for topics, insights,
/// key moments and a summary, and serves the result over HTTP.
#[derive(Parser, Debug)]
#[command(name = "tubelens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TUBELENS_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Analyze a single video and print the result
    Analyze {
        /// YouTube video URL
        url: String,

        /// Sections to produce (full, summary_only, topics_only, insights_only)
        #[arg(short = 't', long = "type", default_value = "full")]
        analysis_type: AnalysisType,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },

    /// Check configuration and credentials
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "tubelens",
            "-vv",
            "analyze",
            "https://youtu.be/dQw4w9WgXcQ",
            "--type",
            "topics_only",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Analyze {
                url,
                analysis_type,
                json,
            } => {
                assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
                assert_eq!(analysis_type, AnalysisType::TopicsOnly);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["tubelens", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["tubelens", "analyze", "x", "--type", "all"]).is_err());
    }
}
