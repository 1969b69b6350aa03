//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::domain::{GenerateParams, ItineraryRequest, RequestError};

/// Local Explorer - trip itinerary generator
#[derive(Parser)]
#[command(
    name = "le",
    about = "Generate and keep short trip itineraries from a location, interests and a duration",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Address to bind, overrides config `server.bind-addr`
        #[arg(short, long)]
        bind: Option<String>,

        /// Keep saved itineraries in memory only
        #[arg(long)]
        ephemeral: bool,
    },

    /// Generate one itinerary and print it
    Generate {
        /// Where the trip is
        #[arg(short = 'L', long)]
        location: String,

        /// Interest to tailor suggestions to (repeatable)
        #[arg(short, long = "interest", value_name = "INTEREST")]
        interests: Vec<String>,

        /// Trip duration (quick, half-day, full-day)
        #[arg(short, long)]
        duration: String,

        /// Also save the generated itinerary
        #[arg(short, long)]
        save: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Manage saved itineraries
    Saved {
        #[command(subcommand)]
        command: SavedCommand,
    },

    /// List the interest vocabulary and duration choices
    Options,
}

/// Saved itinerary subcommands
#[derive(Debug, Subcommand)]
pub enum SavedCommand {
    /// List saved itineraries
    List {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one saved itinerary
    Show {
        /// Itinerary id
        id: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a saved itinerary
    Delete {
        /// Itinerary id
        id: String,
    },
}

/// Output format for printed itineraries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => {
                debug!(%s, "OutputFormat::from_str: unknown format");
                Err(format!("Unknown format: {}. Use: text or json", s))
            }
        }
    }
}

/// Validate `generate` arguments the same way the HTTP body is validated
///
/// No `-i` flags at all counts as missing interests.
pub fn generate_request(
    location: String,
    interests: Vec<String>,
    duration: String,
) -> Result<ItineraryRequest, RequestError> {
    debug!(%location, ?interests, %duration, "generate_request: called");
    let params = GenerateParams {
        location: Some(location),
        interests: (!interests.is_empty()).then_some(interests),
        duration: Some(duration),
    };
    ItineraryRequest::try_from(params)
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("localexplorer")
        .join("logs")
        .join("localexplorer.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TripDuration;

    #[test]
    fn test_output_format_parse() {
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!(matches!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["le", "-c", "/path/to/config.yml", "options"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
        assert!(matches!(cli.command, Command::Options));
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::parse_from([
            "le",
            "generate",
            "--location",
            "Kyoto",
            "-i",
            "History",
            "--interest",
            "Hidden Gems",
            "--duration",
            "half-day",
            "--save",
        ]);

        match cli.command {
            Command::Generate {
                location,
                interests,
                duration,
                save,
                format,
            } => {
                assert_eq!(location, "Kyoto");
                assert_eq!(interests, vec!["History", "Hidden Gems"]);
                assert_eq!(duration, "half-day");
                assert!(save);
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_generate_request_valid() {
        let request = generate_request("Kyoto".to_string(), vec!["History".to_string()], "half-day".to_string()).unwrap();

        assert_eq!(request.location, "Kyoto");
        assert_eq!(request.interests, vec!["History"]);
        assert_eq!(request.duration, TripDuration::HalfDay);
    }

    #[test]
    fn test_generate_request_blank_location_and_no_interests() {
        let cli = Cli::parse_from(["le", "generate", "-L", "", "-d", "quick"]);
        let Command::Generate {
            location,
            interests,
            duration,
            ..
        } = cli.command
        else {
            panic!("expected generate");
        };

        let err = generate_request(location, interests, duration).unwrap_err();
        assert_eq!(err, RequestError::MissingFields(vec!["location", "interests"]));
    }

    #[test]
    fn test_generate_request_no_interests() {
        let err = generate_request("Kyoto".to_string(), vec![], "quick".to_string()).unwrap_err();
        assert_eq!(err, RequestError::MissingFields(vec!["interests"]));
    }

    #[test]
    fn test_generate_request_unknown_duration() {
        let err = generate_request("Kyoto".to_string(), vec!["Food".to_string()], "weekend".to_string()).unwrap_err();
        assert!(matches!(err, RequestError::InvalidDuration(ref msg) if msg.contains("weekend")));
    }

    #[test]
    fn test_saved_show() {
        let cli = Cli::parse_from(["le", "saved", "show", "abc", "--format", "json"]);
        match cli.command {
            Command::Saved {
                command: SavedCommand::Show { id, format },
            } => {
                assert_eq!(id, "abc");
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::parse_from(["le", "--log-level", "debug", "serve", "--bind", "0.0.0.0:8080", "--ephemeral"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::Serve { ref bind, ephemeral: true } if bind.as_deref() == Some("0.0.0.0:8080")));
    }
}
