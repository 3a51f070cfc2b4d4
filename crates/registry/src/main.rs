use anyhow::Context;
use clap::Parser;

use registry::cli::{commands, Cli};
use registry::shared::config::{get_log_dir, get_storage_path, load_config};
use registry::shared::data::Database;
use registry::system;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    system::tracing::initialize(&config.logging, &get_log_dir(&config))?;

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| get_storage_path(&config));
    let db = Database::open_dir(&data_dir, &config.storage.namespace)
        .with_context(|| format!("Cannot open store at {}", data_dir.display()))?;

    if let Err(e) = commands::run(cli, &config, &db) {
        tracing::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
