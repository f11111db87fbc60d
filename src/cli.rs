//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for chote using clap's derive macros.

use clap::{Parser, Subcommand};

/// chote - a URL shortener whose links live for two minutes
#[derive(Parser)]
#[command(name = "chote")]
#[command(version)]
#[command(about = "A URL shortener with short-lived links", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Create a mapping
    ///
    /// Without --code a random 6-character code is generated.
    Add {
        /// Target URL, stored as given
        target: String,

        /// Preferred short code
        #[arg(long)]
        code: Option<String>,
    },

    /// Print the redirect location for a code
    Resolve {
        /// Short code to resolve
        code: String,
    },

    /// Report whether a code can be claimed (reclaims it if expired)
    Check {
        /// Short code to check
        code: String,
    },

    /// Delete every expired mapping now
    Sweep,

    /// Generate example configuration file
    GenerateConfig {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,
    },
}

impl Cli {
    /// The command to run; no subcommand means `serve`.
    pub fn command_or_default(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let cli = Cli::parse_from(["chote"]);
        assert_eq!(cli.command_or_default(), &Commands::Serve);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_add_with_code_and_global_config() {
        let cli = Cli::parse_from([
            "chote",
            "add",
            "https://example.com/a",
            "--code",
            "abc123",
            "-c",
            "custom.toml",
        ]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert_eq!(
            cli.command_or_default(),
            &Commands::Add {
                target: "https://example.com/a".to_string(),
                code: Some("abc123".to_string()),
            }
        );
    }

    #[test]
    fn test_generate_config_optional_path() {
        let cli = Cli::parse_from(["chote", "generate-config"]);
        assert_eq!(
            cli.command_or_default(),
            &Commands::GenerateConfig { output_path: None }
        );
    }

    #[test]
    fn test_add_requires_target() {
        assert!(Cli::try_parse_from(["chote", "add"]).is_err());
    }
}
