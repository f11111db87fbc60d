use clap::Parser;

use chote::cli::{Cli, Commands};
use chote::config::init_config;
use chote::runtime::modes;
use chote::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = init_config(cli.config.as_deref());

    match cli.command_or_default() {
        Commands::Serve => {
            // guard 需要存活到进程退出
            let _guard = init_logging(&config.logging)?;
            modes::run_server().await
        }
        command => {
            if let Err(e) = modes::run_cli(command, &config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
