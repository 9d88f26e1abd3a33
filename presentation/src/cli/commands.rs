//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for resource listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Formatted listing grouped by category
    Full,
    /// JSON output
    Json,
}

/// CLI arguments for askedith
#[derive(Parser, Debug)]
#[command(name = "askedith")]
#[command(author, version, about = "AskEdith - find and contact elder-care resources")]
#[command(long_about = r#"
AskEdith walks a caregiver through a short questionnaire, matches the
answers against a catalog of elder-care resources, and composes a
personal outreach email to each resource the caregiver picks.

Run it with no arguments to start the questionnaire wizard. Emails go
out through the first usable transport: the caregiver's own connected
mailbox, a transactional email API, or a simulated send that records
what would have gone out.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./askedith.toml     Project-level config (or ./.askedith.toml)
3. ~/.config/askedith/config.toml   Global config

Example:
  askedith
  askedith connect carer@example.com
  askedith resources --category "Home Care"
  askedith resources --postal-code 19425 --radius 40 --output json
"#)]
pub struct Cli {
    /// Resume a previously saved wizard session
    #[arg(long)]
    pub resume: bool,

    /// Discard any saved wizard session and exit
    #[arg(long)]
    pub reset: bool,

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
    #[arg(long, global = true)]
    pub show_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands beyond the default wizard
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect your own mailbox so outreach goes out under your address
    Connect {
        /// Address of the mailbox to connect
        email: String,
    },

    /// Show whether a mailbox is connected
    Status,

    /// List catalog resources without running the wizard
    Resources {
        /// Only show resources in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only show resources near this postal code
        #[arg(long, value_name = "ZIP")]
        postal_code: Option<String>,

        /// Search radius in miles around the postal code
        #[arg(long, default_value_t = 25.0)]
        radius: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "full")]
        output: ListFormat,
    },
}
