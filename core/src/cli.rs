//! Command-line interface for stylize-rs.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run the exported wave style-transfer ONNX model from Rust.
#[derive(Parser, Debug)]
#[command(name = "stylize-rs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the model on an input tensor.
    Infer {
        /// Path to the ONNX model file.
        #[arg(short, long)]
        model: PathBuf,

        /// Device to run on (cpu, cuda:0, cuda:1, etc).
        #[arg(short, long, default_value = "cpu")]
        device: String,

        /// Path to input data file (JSON with tensor data).
        #[arg(short, long)]
        input: PathBuf,

        /// Optional path to write the full output tensor as JSON.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (json, pretty).
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Path to optional config file (template only; not applied unless wired in).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print build metadata, the model's tensor bindings, and verify it loads.
    Info {
        /// Path to the ONNX model file.
        #[arg(short, long)]
        model: PathBuf,

        /// Device to run on (cpu, cuda:0, cuda:1, etc).
        #[arg(short, long, default_value = "cpu")]
        device: String,
    },
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
