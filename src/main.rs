use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spacewalk::app::AppContext;
use spacewalk::cli::{commands, Cli, Commands};
use spacewalk::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load_from(cli.config.as_deref())?;
    let ctx = AppContext::new(config, cli.preview_ref)?;

    match cli.command {
        Commands::List => {
            commands::list_posts(&ctx).await?;
        }
        Commands::Show { uid } => {
            commands::show_post(&ctx, &uid).await?;
        }
        Commands::Build { output } => {
            commands::build_site(&ctx, output).await?;
        }
        Commands::Read => {
            spacewalk::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
