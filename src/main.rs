use clap::Parser;
use site_deploy::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("CLI application startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => tracing::info!("CLI completed successfully"),
        Err(e) => {
            eprintln!("[ERROR] {e:#}");
            tracing::error!(error = %e, "CLI exited with error");
            std::process::exit(1);
        }
    }
}
