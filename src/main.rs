use clap::Parser;
use std::sync::Arc;

use sockbot::domain::traits::RandomSource;
use sockbot::infrastructure::adapters::{ConsoleConnector, StdinNotifier};
use sockbot::infrastructure::config::YamlConfigLoader;
use sockbot::infrastructure::random::{SeededRandom, ThreadRandom};
use sockbot::modules::builtin_catalog;
use sockbot::{Bootstrap, BotError};

#[derive(Parser)]
#[command(name = "sockbot")]
#[command(about = "A pluggable forum bot", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(default_value = "config.yaml")]
    config: String,

    /// Seed for the random command picker (reproducible runs)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(run_bot(cli)) {
        if e.is_fatal() {
            tracing::error!("Fatal: {}", e);
        } else {
            tracing::error!("Startup aborted: {}", e);
        }
        std::process::exit(1);
    }
}

async fn run_bot(cli: Cli) -> Result<(), BotError> {
    let rng: Arc<dyn RandomSource> = match cli.seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    };

    let catalog = builtin_catalog(rng)?;
    let notifier = Arc::new(StdinNotifier::new());

    let bot = Bootstrap::new(
        catalog,
        Arc::new(YamlConfigLoader),
        cli.config,
        Arc::new(ConsoleConnector::new(Arc::clone(&notifier))),
    )
    .run()
    .await?;

    tracing::info!("sockbot v{} running with modules: {}", env!("CARGO_PKG_VERSION"), bot.module_names().join(", "));

    notifier.finished().await;
    tracing::info!("Input closed, shutting down");
    Ok(())
}
