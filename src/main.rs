mod config;
mod error;
mod format;
mod market;
mod model;
mod pipeline;
mod publish;
mod source;

use std::path::Path;

use clap::Parser;
use derive_more::{Display, Error};
use error_stack::{Report, ResultExt};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use market::coingecko::CoinGeckoProvider;
use model::InvocationResponse;
use publish::redis::RedisPublisher;
use publish::terminal::TerminalPublisher;
use publish::{Publisher, SinkKind};

#[derive(Debug, Display, Error)]
pub enum AppError {
    #[display("configuration error")]
    Config,
    #[display("coin list error")]
    Source,
    #[display("publisher error")]
    Publisher,
    #[display("runtime error")]
    Runtime,
}

#[derive(Parser)]
#[command(name = "coin-publisher", about = "Coin market update publisher")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() {
    if let Err(report) = run().await {
        eprintln!("{report:?}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Report<AppError>> {
    let cli = Cli::parse();
    let config = config::load(Path::new(&cli.config)).change_context(AppError::Config)?;

    init_tracing(&config);

    // An unreadable coin list aborts the whole run; everything after this
    // point fails per item only.
    let identifiers = source::read_identifiers(Path::new(&config.source.coins_file))
        .change_context(AppError::Source)?;

    info!(
        count = identifiers.len(),
        file = %config.source.coins_file,
        "coin list loaded"
    );

    let provider = CoinGeckoProvider::new(&config.market.base_url);
    let publisher = build_publisher(&config).await?;

    info!(sink = %publisher.kind(), topic = %config.publish.topic, "publisher ready");

    pipeline::run(
        &identifiers,
        &provider,
        publisher.as_ref(),
        &config.publish.subject,
    )
    .await;

    // Always report overall success; per-item failures live in the logs and
    // the run summary only.
    let response = InvocationResponse::ok();
    let rendered = serde_json::to_string(&response).change_context(AppError::Runtime)?;
    println!("{rendered}");

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::new(&config.general.log_level);
    match config.general.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}

async fn build_publisher(config: &AppConfig) -> Result<Box<dyn Publisher>, Report<AppError>> {
    match SinkKind::from_str(&config.publish.sink) {
        Some(SinkKind::Redis) => {
            let publisher =
                RedisPublisher::connect(&config.publish.redis_url, config.publish.topic.clone())
                    .await
                    .change_context(AppError::Publisher)?;
            Ok(Box::new(publisher))
        }
        Some(SinkKind::Terminal) => Ok(Box::new(TerminalPublisher)),
        None => Err(Report::new(AppError::Config)
            .attach(format!("unknown publish sink: {}", config.publish.sink))),
    }
}
