use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::sync::Arc;

use tripstore::cli::{Cli, Command};
use tripstore::config::Config;
use tripstore::{Collection, FileKv, KeyValueStore};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let store_path = cli.dir.unwrap_or(config.store_path);

    info!("tripstore opening {}", store_path.display());
    let kv = Arc::new(FileKv::open(&store_path)?);

    match cli.command {
        Command::Keys => {
            let keys = kv.keys()?;
            if keys.is_empty() {
                println!("No keys found");
            } else {
                for key in keys {
                    println!("{}", key);
                }
            }
        }
        Command::Dump { key } => {
            let records: Collection<serde_json::Value> = Collection::new(kv, key);
            println!("{}", serde_json::to_string_pretty(&records.list())?);
        }
        Command::Ids { key } => {
            let records: Collection<serde_json::Value> = Collection::new(kv, key);
            for record in records.list() {
                let label = record.get("location").and_then(|v| v.as_str()).unwrap_or("");
                println!("{} {}", tripstore::Record::id(&record).yellow(), label.dimmed());
            }
        }
        Command::Delete { key, id } => {
            let records: Collection<serde_json::Value> = Collection::new(kv, key);
            records.delete_by_id(&id)?;
            println!("{} Deleted: {}", "✓".green(), id.cyan());
        }
    }

    Ok(())
}
