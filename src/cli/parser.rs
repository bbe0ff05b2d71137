use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rAttendance
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Capture event attendees from scanned codes, keep the roster locally and export it to PDF or Excel",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Open a scan window and register attendees from scanned payloads.
    ///
    /// Payloads are read from standard input, one block of `Key: value`
    /// lines per attendee, separated by a blank line:
    ///
    ///   Name: Alice
    ///   ID: 42
    ///
    ///   Name: Bob
    ///   ID: 7
    ///   Latitude: 14.5
    ///   Longitude: 121.0
    ///
    /// The window closes when the countdown reaches zero or the input ends.
    Scan {
        /// Length of the scan window in seconds (default from config: 300)
        #[arg(long, value_name = "SECS")]
        duration: Option<u32>,
    },

    /// List recorded attendees (newest first)
    List,

    /// Delete one attendee by its position in `list`
    Del {
        /// Position as shown by `list` (1 = newest)
        position: usize,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Delete all recorded attendees
    Clear {
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Export the roster (attendees.pdf / attendees.xlsx)
    Export {
        /// Export format: pdf, xlsx
        #[arg(long, value_enum, value_name = "FORMAT", default_value = "pdf")]
        format: ExportFormat,

        /// Output directory (default from config)
        #[arg(long, value_name = "DIR")]
        dir: Option<String>,
    },

    /// Show where an attendee was scanned
    Map {
        /// Position as shown by `list`
        position: usize,
    },

    /// Show the weather request for an attendee's location
    Weather {
        /// Position as shown by `list`
        position: usize,

        /// Saved Open-Meteo response to decode
        #[arg(long, value_name = "FILE")]
        response: Option<String>,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
