//! CLI mode
//!
//! One-shot commands that open the configured store directly.

use colored::Colorize;

use crate::cli::Commands;
use crate::config::{DEFAULT_CONFIG_PATH, StaticConfig};
use crate::errors::{ChoteError, Result};
use crate::runtime::lifetime::startup::build_store;
use crate::services::{MappingStore, Resolution};

/// Run one CLI command. `Serve` is handled by the caller.
pub async fn run_cli(command: &Commands, config: &StaticConfig) -> Result<()> {
    if let Commands::GenerateConfig { output_path } = command {
        return generate_config(output_path.as_deref());
    }

    let store = build_store(config)
        .await
        .map_err(|e| ChoteError::database_connection(format!("{:#}", e)))?;

    match command {
        Commands::Add { target, code } => add(&store, target, code.as_deref()).await,
        Commands::Resolve { code } => resolve(&store, code).await,
        Commands::Check { code } => check(&store, code).await,
        Commands::Sweep => sweep(&store).await,
        Commands::Serve | Commands::GenerateConfig { .. } => Ok(()),
    }
}

async fn add(store: &MappingStore, target: &str, code: Option<&str>) -> Result<()> {
    let generated = code.is_none_or(|c| c.trim().is_empty());
    let code = store.add(target, code).await?;

    if generated {
        println!("{} Generated random code: {}", "ℹ".bold().blue(), code.magenta());
    }
    println!(
        "{} Added short link: {} -> {} (expires in {}s)",
        "✓".bold().green(),
        code.cyan(),
        target.blue().underline(),
        store.lifetime().num_seconds().to_string().yellow()
    );
    Ok(())
}

async fn resolve(store: &MappingStore, code: &str) -> Result<()> {
    match store.resolve(code).await? {
        Resolution::Target(target) => {
            println!("{} -> {}", code.cyan(), target.blue().underline());
        }
        Resolution::NotFound => {
            println!(
                "{} {} not found, fallback: {}",
                "ℹ".bold().blue(),
                code.cyan(),
                Resolution::NotFound.into_location(code).yellow()
            );
        }
    }
    Ok(())
}

async fn check(store: &MappingStore, code: &str) -> Result<()> {
    if store.is_free(code).await? {
        println!("{} {} is free", "✓".bold().green(), code.cyan());
    } else {
        println!("{} {} is taken", "✗".bold().red(), code.cyan());
    }
    Ok(())
}

async fn sweep(store: &MappingStore) -> Result<()> {
    let removed = store.sweep_expired().await?;
    println!(
        "{} Removed {} expired mappings",
        "✓".bold().green(),
        removed.to_string().magenta()
    );
    Ok(())
}

/// Generate example configuration file
fn generate_config(output_path: Option<&str>) -> Result<()> {
    let path = output_path.unwrap_or("config.example.toml");

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    StaticConfig::default().save_to_file(path)?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    println!(
        "  {} {}",
        "Copy it to".yellow(),
        DEFAULT_CONFIG_PATH.blue()
    );
    Ok(())
}
