//! Model evaluation module.
//!
//! This module wraps the ONNX Runtime session for the wave style-transfer
//! network and exposes the model's fixed tensor bindings.

mod model;

pub use model::{
    input_shape, output_shape, Device, EvaluationResult, ModelRunner, StyleModel, CHANNELS,
    HEIGHT, INPUT_NAME, INPUT_WIDTH, OUTPUT_NAME, OUTPUT_WIDTH,
};
