//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

const QUERY_HELP: &str = "\
DEVICE QUERY:
    VENDOR_NAME:PRODUCT_NAME:VENDOR_ID:PRODUCT_ID:USAGE_ID:USAGE_PAGE

    Any field may be empty, e.g. \"::6d6c:3333::\" selects by vendor and product id
    only, whereas \"Marion Lang:ml8_9:::61:\" selects by vendor and product name as
    well as usage id. Populated fields must match exactly. ID and PAGE fields are
    base 16.

    Without a query, the QMK raw HID interface (usage id 61, usage page ff60) of
    any device is used.";

/// Program layer text on the ml8 keyboard OLED over raw HID.
#[derive(Debug, Parser)]
#[command(name = "kbp", version, after_help = QUERY_HELP)]
pub struct Cli {
    /// Device query, as reported by `kbp ls` (see DEVICE QUERY below)
    #[arg(short, long, global = true, value_name = "QUERY")]
    pub device: Option<String>,

    /// YAML config file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List every attached HID interface
    Ls {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the devices matching the query
    Info {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Debug: ask the keyboard to say hello
    Hello,

    /// Debug: have the keyboard echo TEXT (at most 29 bytes are sent)
    Echo {
        text: String,
    },

    /// Turn the OLED on or off
    Oled {
        #[arg(value_enum)]
        state: OledState,
    },

    /// Reset layer text to the firmware defaults
    Reset,

    /// Set the text shown for a layer. Use \n for new lines; text does not wrap
    Layer {
        /// Layer number
        #[arg(value_parser = clap::value_parser!(u8).range(0..4))]
        layer: u8,

        text: String,
    },

    /// Send one raw frame read from a file or stdin
    Raw {
        /// File to read instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OledState {
    On,
    Off,
}
