//! stylize-rs: Run the exported wave style-transfer ONNX model from Rust.
//!
//! This crate wraps ONNX Runtime (via the `ort` crate) around a single
//! fast-neural-style network: load the model once, bind an image tensor
//! under its fixed input name, evaluate, and read the stylized image back
//! under its fixed output name. All tensor execution happens inside the
//! runtime; this crate owns nothing but the session and its bindings.
//!
//! # Features
//!
//! - **cuda**: Enable the CUDA execution provider (requires a CUDA-enabled
//!   ONNX Runtime build)
//!
//! # Example
//!
//! ```ignore
//! use stylize_rs::{Device, StyleModel};
//! use stylize_rs::inference::input_shape;
//! use ndarray::Array4;
//!
//! // Load model
//! let mut model = StyleModel::load("wave.onnx", Device::cpu())?;
//!
//! // Create input tensor (N, 3, 720, 883)
//! let input = Array4::<f32>::zeros(input_shape(1));
//!
//! // Evaluate
//! let result = model.evaluate(&input)?;
//! println!("Output {:?} in {:.2}ms", result.output.shape(), result.latency_ms);
//! ```
//!
//! The model expects inputs shaped (N, 3, 720, 883) and produces outputs
//! shaped (N, 3, 720, 884); the extra output column comes from the
//! network's own convolution padding, not from this crate.

pub mod cli;
pub mod config;
pub mod error;
pub mod inference;

// Re-export commonly used types
pub use error::{Result, StylizeError};
pub use inference::{Device, EvaluationResult, ModelRunner, StyleModel, INPUT_NAME, OUTPUT_NAME};
