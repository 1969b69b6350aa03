//! Local Explorer - trip itinerary generator
//!
//! CLI entry point: run the HTTP API, or generate and manage itineraries
//! from the terminal.

use std::fs;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use localexplorer::cli::{Cli, Command, OutputFormat, SavedCommand, generate_request, get_log_path};
use localexplorer::config::Config;
use localexplorer::domain::{INTERESTS, Itinerary, ItineraryRequest, TripDuration};
use localexplorer::gateway::ItineraryGateway;
use localexplorer::server::{self, AppState};
use localexplorer::state::StateManager;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;
    info!(provider = %config.llm.provider, model = %config.llm.model(), "Local Explorer loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Serve { bind, ephemeral } => cmd_serve(config, bind, ephemeral).await,
        Command::Generate {
            location,
            interests,
            duration,
            save,
            format,
        } => {
            let request = generate_request(location, interests, duration)?;
            cmd_generate(&config, request, save, format).await
        }
        Command::Saved { command } => cmd_saved(&config, command).await,
        Command::Options => {
            cmd_options();
            Ok(())
        }
    }
}

fn open_state(config: &Config) -> Result<StateManager> {
    debug!(dir = %config.storage.dir.display(), key = %config.storage.key, "open_state: called");
    StateManager::spawn_file(&config.storage.dir, &config.storage.key)
        .context(format!("Failed to open store at {}", config.storage.dir.display()))
}

async fn cmd_serve(mut config: Config, bind: Option<String>, ephemeral: bool) -> Result<()> {
    debug!(?bind, ephemeral, "cmd_serve: called");
    config.validate()?;
    if let Some(bind) = bind {
        config.server.bind_addr = bind;
    }

    let gateway = ItineraryGateway::from_config(&config)?;
    let state = if ephemeral {
        info!("Using in-memory storage");
        StateManager::spawn_memory(&config.storage.key)
    } else {
        open_state(&config)?
    };

    println!(
        "{} listening on http://{}",
        "Local Explorer".green().bold(),
        config.server.bind_addr
    );
    server::serve(AppState::new(gateway, state), &config.server).await
}

async fn cmd_generate(config: &Config, request: ItineraryRequest, save: bool, format: OutputFormat) -> Result<()> {
    debug!(location = %request.location, duration = %request.duration, save, "cmd_generate: called");
    config.validate()?;
    let gateway = ItineraryGateway::from_config(config)?;

    let itinerary = match gateway.generate(&request).await {
        Ok(itinerary) => itinerary,
        Err(e) => {
            if let Some(raw) = e.raw() {
                eprintln!("{}\n{}", "Raw response:".yellow(), raw);
            }
            return Err(e.into());
        }
    };

    if save {
        let state = open_state(config)?;
        state.save(itinerary.clone()).await?;
        state.shutdown().await.ok();
        if format == OutputFormat::Text {
            println!("{} {}", "Saved".green(), itinerary.id);
        }
    }

    print_itinerary(&itinerary, format)
}

async fn cmd_saved(config: &Config, command: SavedCommand) -> Result<()> {
    debug!(?command, "cmd_saved: called");
    let state = open_state(config)?;

    let result = match command {
        SavedCommand::List { format } => {
            let itineraries = state.list().await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&itineraries)?),
                OutputFormat::Text => {
                    if itineraries.is_empty() {
                        println!("No saved itineraries");
                    }
                    for it in &itineraries {
                        println!(
                            "{}  {}  {}  {}",
                            it.id.dimmed(),
                            it.date_created.format("%Y-%m-%d %H:%M"),
                            it.location.bold(),
                            it.duration.label()
                        );
                    }
                }
            }
            Ok(())
        }
        SavedCommand::Show { id, format } => {
            let itinerary = state.get_required(&id).await?;
            print_itinerary(&itinerary, format)
        }
        SavedCommand::Delete { id } => {
            state.delete(&id).await?;
            println!("{} {}", "Deleted".red(), id);
            Ok(())
        }
    };

    state.shutdown().await.ok();
    result
}

fn cmd_options() {
    println!("{}", "Interests".bold());
    for interest in INTERESTS {
        println!("  {}", interest);
    }
    println!("{}", "Durations".bold());
    for duration in TripDuration::ALL {
        let (min, max) = duration.item_range();
        println!("  {:<10} {} ({}-{} items)", duration.as_str(), duration.label(), min, max);
    }
}

fn print_itinerary(itinerary: &Itinerary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(itinerary)?),
        OutputFormat::Text => {
            println!("{} {}", itinerary.location.bold(), format!("({})", itinerary.duration.label()).dimmed());
            if !itinerary.interests.is_empty() {
                println!("Interests: {}", itinerary.interests.join(", "));
            }
            println!("Created: {}", itinerary.date_created.to_rfc3339());
            println!();
            for (i, item) in itinerary.items.iter().enumerate() {
                println!("{}. {} {}", i + 1, item.name.cyan().bold(), format!("[{}]", item.estimated_time).dimmed());
                println!("   {}", item.description);
            }
        }
    }
    Ok(())
}
