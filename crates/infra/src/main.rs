//! `mise-report`: print inventory summary or exports from the JSON-file store.
//!
//! Usage: `mise-report [summary|csv|json]` (default `summary`).

use std::io;

use anyhow::{Context, bail};
use chrono::Utc;

use mise_infra::{InfraConfig, InventoryService, JsonFileStore};

fn main() -> anyhow::Result<()> {
    let loaded = InfraConfig::from_env();
    mise_observability::init_with(loaded.config.log_format);
    loaded.log_warnings();
    let config = loaded.config;

    let store = JsonFileStore::new(&config.data_dir);
    let service = InventoryService::from_config(store, &config);
    tracing::info!(data_dir = %config.data_dir.display(), "loading inventory");

    let command = std::env::args().nth(1).unwrap_or_else(|| "summary".to_string());
    match command.as_str() {
        "summary" => {
            let stats = service
                .summary(Utc::now().date_naive())
                .context("failed to summarize inventory")?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        "csv" => service
            .export_csv(io::stdout().lock())
            .context("failed to export inventory as csv")?,
        "json" => println!("{}", service.export_json().context("failed to export inventory as json")?),
        other => bail!("unknown command {other:?}; expected summary, csv or json"),
    }
    Ok(())
}
