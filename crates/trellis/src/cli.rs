//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Engine settings file (defaults to ./trellis.toml when present)
    #[arg(short, long, global = true, env = "TRELLIS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Extra template folder, searched before configured folders
    #[arg(short, long = "dir", global = true)]
    pub dirs: Vec<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template
    Render {
        /// Template name or path to a template file
        name: String,

        /// JSON or TOML file with the render context
        #[arg(long)]
        data: Option<PathBuf>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show which file a template name resolves to
    Find {
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
