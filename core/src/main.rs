//! CLI entry point for stylize-rs.

use anyhow::{Context, Result};
use ndarray::{ArrayD, Ix4};
use serde_json::Value;
use std::fs;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use stylize_rs::cli::{Cli, Commands};
use stylize_rs::config::Config;
use stylize_rs::inference::{
    StyleModel, CHANNELS, HEIGHT, INPUT_NAME, INPUT_WIDTH, OUTPUT_NAME, OUTPUT_WIDTH,
};

/// Get the enabled features.
fn enabled_features() -> &'static str {
    if cfg!(feature = "cuda") {
        "cuda"
    } else {
        "cpu"
    }
}

fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let cli = Cli::parse_args();

    match cli.command {
        Commands::Infer {
            model,
            device,
            input,
            output,
            format,
            config,
        } => {
            // Load optional config
            let _config = if let Some(config_path) = config {
                Config::from_yaml_file(&config_path)
                    .with_context(|| format!("Failed to load config: {}", config_path.display()))?
            } else {
                Config::default()
            };

            // Parse device
            let device = device.parse()?;
            info!("Using device: {}", device);

            // Load model
            info!("Loading model: {}", model.display());
            let mut style_model = StyleModel::load(&model, device)?;
            info!("Model loaded successfully");

            // Load input data
            info!("Loading input: {}", input.display());
            let input_json: Value = serde_json::from_str(
                &fs::read_to_string(&input)
                    .with_context(|| format!("Failed to read input: {}", input.display()))?,
            )?;

            // Parse input tensor from JSON
            // Expected format: { "data": [...], "shape": [N, 3, 720, 883] }
            let data: Vec<f32> = input_json["data"]
                .as_array()
                .context("Input must have 'data' array")?
                .iter()
                .map(|v| v.as_f64().unwrap_or(0.0) as f32)
                .collect();

            let shape: Vec<usize> = input_json["shape"]
                .as_array()
                .context("Input must have 'shape' array")?
                .iter()
                .map(|v| v.as_u64().unwrap_or(1) as usize)
                .collect();

            let input_tensor = ArrayD::from_shape_vec(ndarray::IxDyn(&shape), data)
                .context("Failed to create input tensor")?
                .into_dimensionality::<Ix4>()
                .context("Input must be shaped (batch, channel, height, width)")?;

            // Run evaluation
            info!("Running evaluation...");
            let result = style_model.evaluate(&input_tensor)?;

            info!(
                "Evaluation complete: output {:?} in {:.2}ms",
                result.output.shape(),
                result.latency_ms
            );

            // Write the full output tensor when requested
            if let Some(output_path) = &output {
                let flat: Vec<f32> = result.output.iter().copied().collect();
                let tensor_json = serde_json::json!({
                    "data": flat,
                    "shape": result.output.shape(),
                });
                fs::write(output_path, serde_json::to_string(&tensor_json)?)
                    .with_context(|| format!("Failed to write output: {}", output_path.display()))?;
                info!("Wrote output tensor: {}", output_path.display());
            }

            // Format summary
            let summary = serde_json::json!({
                "output": OUTPUT_NAME,
                "shape": result.output.shape(),
                "numel": result.output.len(),
                "latency_ms": result.latency_ms,
            });

            if format == "pretty" {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", serde_json::to_string(&summary)?);
            }
        }

        Commands::Info { model, device } => {
            let device = device.parse()?;

            println!("stylize-rs v{}", env!("CARGO_PKG_VERSION"));
            println!("features: {}", enabled_features());
            println!();
            println!("Model: {}", model.display());
            println!("Device: {}", device);
            println!(
                "Input:  {} (N, {}, {}, {})",
                INPUT_NAME, CHANNELS, HEIGHT, INPUT_WIDTH
            );
            println!(
                "Output: {} (N, {}, {}, {})",
                OUTPUT_NAME, CHANNELS, HEIGHT, OUTPUT_WIDTH
            );

            // Try to load the model to verify it works
            info!("Loading model...");
            let _model = StyleModel::load(&model, device)?;
            println!("Status: OK (model loaded successfully)");
        }
    }

    Ok(())
}
