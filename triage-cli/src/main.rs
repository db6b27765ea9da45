mod batch;

use std::sync::Arc;
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triage_order::{CsvReportWriter, OrderProcessor};
use triage_store::{app_config::Config, fixtures};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triage_cli=info,triage_order=debug,triage_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let user_id: i64 = std::env::args()
        .nth(1)
        .context("usage: triage <user-id>")?
        .parse()
        .context("user id must be an integer")?;

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Running batch for user {}", user_id);

    std::fs::create_dir_all(&config.report.output_dir).with_context(|| {
        format!("Cannot create report directory {}", config.report.output_dir.display())
    })?;

    let repository = Arc::new(fixtures::repository_from_file(&config.fixtures.orders_path)?);
    let lookup = Arc::new(fixtures::lookup_client_from_file(&config.fixtures.lookup_path)?);
    let writer = Arc::new(
        CsvReportWriter::new(&config.report.output_dir)
            .with_prefix(config.report.file_prefix.clone())
            .with_thresholds(&config.rules),
    );

    let processor = OrderProcessor::new(repository, lookup, writer, config.rules);

    for row in batch::run_batch(&processor, user_id).await? {
        println!("{}", row);
    }

    Ok(())
}
