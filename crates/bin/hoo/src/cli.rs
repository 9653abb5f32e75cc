//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hoo_domain::id::LightNumber;

use crate::config;

#[derive(Debug, Parser)]
#[command(name = "hoo", version)]
#[command(about = "Drive smart lights through a bridge, or serve a virtual one", long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(short, long, global = true, env = "HOO_CONFIG", default_value = config::DEFAULT_PATH)]
    pub config: PathBuf,

    /// Bridge base URL, overriding the configuration.
    #[arg(long, global = true)]
    pub bridge_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve a virtual bridge over HTTP
    Serve,

    /// Print freshly simulated lights
    Simulate {
        /// Number of lights
        #[arg(short = 'n', long, default_value_t = 3)]
        count: u32,
    },

    #[command(flatten)]
    Client(ClientCommand),
}

/// Commands that talk to a bridge.
#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// List lights
    Lights {
        /// Only lights that are on and reachable
        #[arg(long)]
        active: bool,
    },

    /// Show one light, refreshed from the bridge
    Light { number: LightNumber },

    /// List motion sensors
    Motion,

    /// Turn a light on
    On { number: LightNumber },

    /// Turn a light off
    Off { number: LightNumber },

    /// Turn a light on if it is off, off if it is on
    Toggle { number: LightNumber },

    /// Set how long a light's next change takes to blend in
    Transition {
        number: LightNumber,
        /// Deciseconds
        deciseconds: u16,
    },

    /// Set a light's hue, saturation and brightness together
    Hsb {
        number: LightNumber,
        hue: u32,
        sat: u32,
        bri: u32,
    },

    /// Set a light's colour from red, green and blue (0-255 each)
    Rgb {
        number: LightNumber,
        red: u8,
        green: u8,
        blue: u8,
    },

    /// Set a light's hue (0-65535)
    Hue { number: LightNumber, value: u32 },

    /// Set a light's saturation (0-255)
    Sat { number: LightNumber, value: u32 },

    /// Set a light's brightness (0-255)
    Bri { number: LightNumber, value: u32 },

    /// Cycle lights through a sequence of colours
    Rotate {
        /// Blend time between colours, in seconds
        transition: u16,
        /// Time each colour is held, in seconds
        hold: u16,
        /// Comma-separated light numbers; all lights when omitted
        #[arg(long, value_delimiter = ',')]
        lights: Vec<LightNumber>,
        /// Comma-separated hues to cycle through
        #[arg(long, value_delimiter = ',')]
        hues: Vec<u16>,
    },

    /// Give lights random colours on every step
    Random {
        transition: u16,
        hold: u16,
        #[arg(long, value_delimiter = ',')]
        lights: Vec<LightNumber>,
    },

    /// Give lights random calm blue colours on every step
    Sleepy {
        transition: u16,
        hold: u16,
        #[arg(long, value_delimiter = ',')]
        lights: Vec<LightNumber>,
    },

    /// Stop the running animation
    Stop,
}
