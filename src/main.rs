use anyhow::Result;
use clap::Parser;

use linkboard::cli::{Cli, Commands};
use linkboard::config::{get_config, init_config_from};
use linkboard::runtime::modes;
use linkboard::system::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(cli.config.as_deref());

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::GenerateConfig { output_path, force } => {
            modes::generate_config(output_path.as_deref(), force)
        }
        Commands::Languages => modes::list_languages(),
        Commands::Serve => {
            let config = get_config();
            // guard 需要存活到进程结束，保证日志刷新
            let _guard = init_logging(&config.logging)?;
            modes::run_server().await
        }
    }
}
