//! symnav - structural code navigation CLI

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use symnav::app::App;
use symnav::cli::{Cli, Commands};

fn main() {
    // Quiet by default; RUST_LOG=symnav=debug for verbose output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "symnav=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!(
                r#"{{"success":false,"error":"Failed to create runtime: {}"}}"#,
                e
            );
            std::process::exit(1);
        }
    };
    let result = runtime.block_on(async_main());

    if let Err(e) = result {
        let response = serde_json::json!({
            "success": false,
            "error": e.to_string()
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&response)
                .unwrap_or_else(|_| { format!(r#"{{"success":false,"error":"{}"}}"#, e) })
        );
        std::process::exit(2);
    }
}

async fn async_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app = App::new()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize: {}", e))?;

    execute_command(cli.command, &app).await
}

async fn execute_command(command: Commands, app: &App) -> anyhow::Result<()> {
    use symnav::cli::commands;

    match command {
        Commands::Block(args) => commands::block::execute(args, app).await,
        Commands::Targets(args) => commands::targets::execute(args, app).await,
        Commands::Jump(args) => commands::jump::execute(args, app).await,
        Commands::Session(args) => commands::session::execute(args, app).await,
        Commands::Config(args) => commands::config::execute(args, app).await,
    }
}
