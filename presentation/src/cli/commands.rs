//! CLI command definitions

use crate::simulation::SimulationStep;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use groupgo_domain::DateRange;
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable report
    Text,
    /// One JSON document
    Json,
}

impl From<OutputFormat> for groupgo_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => groupgo_domain::OutputFormat::Text,
            OutputFormat::Json => groupgo_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for groupgo
#[derive(Parser, Debug)]
#[command(name = "groupgo")]
#[command(author, version, about = "Group trip consensus - generate itinerary options and vote on them")]
#[command(long_about = r#"
groupgo turns a group's trip preferences and a flight/hotel inventory into
a small slate of lettered itinerary options, then runs the group vote:
one option at a time, accepted only when everyone says yes.

Scenarios are JSON files holding the group roster, preferences, inventory
and optionally canned recommendation proposals.

Configuration files are loaded from (in priority order):
1. GROUPGO_* environment variables (e.g. GROUPGO_VOTING__SEED=7)
2. --config <path>     Explicit config file
3. ./groupgo.toml      Project-level config
4. ~/.config/groupgo/config.toml   Global config

Example:
  groupgo generate --scenario demos/paris.json
  groupgo simulate --scenario demos/paris.json --vote ana=yes --vote ben=roll --vote ana=yes --vote ben=yes
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output] format in config)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the option slate for a scenario's group
    Generate {
        #[command(flatten)]
        trip: TripArgs,
    },

    /// Generate a slate, then replay a sequence of votes against it
    Simulate {
        #[command(flatten)]
        trip: TripArgs,

        /// Step to replay on the active option: MEMBER=yes, MEMBER=roll, advance or resolve
        #[arg(long = "vote", value_name = "STEP")]
        steps: Vec<SimulationStep>,
    },
}

/// Scenario and optional travel window shared by every command
#[derive(Args, Debug, Clone)]
pub struct TripArgs {
    /// Scenario JSON file
    #[arg(short, long, value_name = "FILE")]
    pub scenario: PathBuf,

    /// First day of travel (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Last day of travel (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,
}

impl TripArgs {
    pub fn date_range(&self) -> Option<DateRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        }
    }
}
