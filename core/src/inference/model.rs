//! Safe wrapper for running the exported wave style-transfer network.
//!
//! This module wraps an ONNX Runtime session around the single model this
//! crate serves: load the model once, then evaluate image tensors against
//! its fixed input and output bindings.

use ndarray::{Array4, Ix4};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use ort::session::{builder::SessionBuilder, Session, SessionInputValue};

use crate::error::{Result, StylizeError};

/// Name of the model's single image input binding.
pub const INPUT_NAME: &str = "img_placeholder__0";

/// Name of the model's single stylized-image output binding.
pub const OUTPUT_NAME: &str = "add_37__0";

/// Color channels in both the input and the output tensor.
pub const CHANNELS: usize = 3;

/// Image height in both the input and the output tensor.
pub const HEIGHT: usize = 720;

/// Input image width.
pub const INPUT_WIDTH: usize = 883;

/// Output image width. One pixel wider than the input; the network's
/// convolution padding produces the extra column.
pub const OUTPUT_WIDTH: usize = 884;

/// Input shape (batch, channel, height, width) for a given batch size.
pub fn input_shape(batch: usize) -> [usize; 4] {
    [batch, CHANNELS, HEIGHT, INPUT_WIDTH]
}

/// Output shape (batch, channel, height, width) for a given batch size.
pub fn output_shape(batch: usize) -> [usize; 4] {
    [batch, CHANNELS, HEIGHT, OUTPUT_WIDTH]
}

/// Device specification for model evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Device {
    /// CPU device.
    Cpu,
    /// CUDA device with index.
    Cuda(usize),
}

impl Device {
    /// Create a CPU device.
    pub fn cpu() -> Self {
        Self::Cpu
    }

    /// Create a CUDA device with the given index.
    pub fn cuda(index: usize) -> Self {
        Self::Cuda(index)
    }
}

impl FromStr for Device {
    type Err = StylizeError;

    /// Parse a device string like "cpu", "cuda", "cuda:0", "cuda:1".
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        if s == "cpu" {
            Ok(Self::Cpu)
        } else if s == "cuda" {
            Ok(Self::Cuda(0))
        } else if let Some(idx) = s.strip_prefix("cuda:") {
            let index: usize = idx
                .parse()
                .map_err(|_| StylizeError::config(format!("Invalid CUDA index: {}", idx)))?;
            Ok(Self::Cuda(index))
        } else {
            Err(StylizeError::config(format!("Invalid device: {}", s)))
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda(idx) => write!(f, "cuda:{}", idx),
        }
    }
}

/// Result of one model evaluation.
#[derive(Debug)]
pub struct EvaluationResult {
    /// The stylized output tensor, shaped (batch, 3, 720, 884).
    pub output: Array4<f32>,
    /// Evaluation latency in milliseconds, measured around the session call.
    pub latency_ms: f64,
}

/// Wave style-transfer model wrapper.
///
/// Owns the runtime session built from the model bytes; the session and
/// everything it holds are released when the wrapper is dropped.
///
/// # Example
///
/// ```ignore
/// use stylize_rs::{Device, StyleModel};
/// use stylize_rs::inference::input_shape;
/// use ndarray::Array4;
///
/// // Load model
/// let mut model = StyleModel::load("wave.onnx", Device::cpu())?;
///
/// // Create input tensor (N, 3, 720, 883)
/// let input = Array4::<f32>::zeros(input_shape(1));
///
/// // Evaluate
/// let result = model.evaluate(&input)?;
/// println!("Output {:?} in {:.2}ms", result.output.shape(), result.latency_ms);
/// ```
pub struct StyleModel {
    session: Session,
    device: Device,
}

impl StyleModel {
    /// Build the model from serialized model bytes.
    ///
    /// # Errors
    ///
    /// Returns `StylizeError::Load` if the bytes are not a well-formed model
    /// or the runtime fails to deserialize them. No partially initialized
    /// wrapper is ever returned.
    pub fn from_bytes(bytes: &[u8], device: Device) -> Result<Self> {
        let builder = Session::builder()
            .map_err(StylizeError::Load)?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)
            .map_err(StylizeError::Load)?;

        let builder = configure_session_builder(builder, &device)?;

        let session = builder
            .commit_from_memory(bytes)
            .map_err(StylizeError::Load)?;

        Ok(Self { session, device })
    }

    /// Build the model from a readable byte stream.
    ///
    /// Drains the stream into memory, then delegates to [`Self::from_bytes`].
    ///
    /// # Errors
    ///
    /// Returns `StylizeError::Io` if the stream cannot be read, or
    /// `StylizeError::Load` if its contents are not a well-formed model.
    pub fn from_reader(mut reader: impl Read, device: Device) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes, device)
    }

    /// Load the model from a file path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the ONNX model file
    /// * `device` - Device to load the model on
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or fails to load.
    pub fn load(path: impl AsRef<Path>, device: Device) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StylizeError::FileNotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, device)
    }

    /// Get the device this model is loaded on.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Evaluate one input tensor.
    ///
    /// Binds `input` under [`INPUT_NAME`], runs the session, and reads the
    /// output tensor back under [`OUTPUT_NAME`]. The binding is rebuilt on
    /// every call, so sequential evaluations are independent of each other.
    ///
    /// The wrapper performs no shape validation of its own; a tensor that
    /// does not match the model's declared (N, 3, 720, 883) input fails
    /// inside the runtime. A failed evaluation leaves the wrapper usable.
    ///
    /// # Errors
    ///
    /// Returns `StylizeError::Evaluation` if binding or execution fails,
    /// or `StylizeError::Tensor` if the output cannot be read back as a
    /// 4-dimensional f32 tensor.
    pub fn evaluate(&mut self, input: &Array4<f32>) -> Result<EvaluationResult> {
        let shape: Vec<usize> = input.shape().to_vec();
        let data: Vec<f32> = input.iter().copied().collect();
        let value = ort::value::Tensor::from_array((shape, data)).map_err(StylizeError::Evaluation)?;

        let mut inputs = Vec::with_capacity(1);
        inputs.push((
            INPUT_NAME.to_string(),
            SessionInputValue::from(value.into_dyn()),
        ));

        let started = Instant::now();
        let outputs = self.session.run(inputs).map_err(StylizeError::Evaluation)?;
        let latency_ms = started.elapsed().as_secs_f64() * 1e3;

        let Some((_, value)) = outputs.iter().find(|(name, _)| *name == OUTPUT_NAME) else {
            return Err(StylizeError::tensor(format!(
                "Missing output tensor {}",
                OUTPUT_NAME
            )));
        };

        let array = value
            .try_extract_array::<f32>()
            .map_err(StylizeError::Evaluation)?;

        let output = array
            .to_owned()
            .into_dimensionality::<Ix4>()
            .map_err(|e| StylizeError::tensor(format!("Output rank mismatch: {}", e)))?;

        Ok(EvaluationResult { output, latency_ms })
    }
}

fn configure_session_builder(builder: SessionBuilder, device: &Device) -> Result<SessionBuilder> {
    match device {
        Device::Cpu => Ok(builder),
        Device::Cuda(device_id) => configure_cuda(builder, *device_id),
    }
}

fn configure_cuda(builder: SessionBuilder, device_id: usize) -> Result<SessionBuilder> {
    #[cfg(feature = "cuda")]
    {
        use ort::execution_providers::cuda::CUDAExecutionProvider;
        let ep = CUDAExecutionProvider::default()
            .with_device_id(device_id as i32)
            .build();
        builder
            .with_execution_providers([ep])
            .map_err(StylizeError::Load)
    }
    #[cfg(not(feature = "cuda"))]
    {
        let _ = (builder, device_id);
        Err(StylizeError::config(
            "CUDA requested but stylize-rs was built without the `cuda` feature",
        ))
    }
}

/// Trait for types that can run model evaluation.
///
/// This trait provides a common interface for model runners,
/// allowing different implementations (e.g., batched, cached).
pub trait ModelRunner: Send {
    /// Evaluate one input tensor.
    fn evaluate(&mut self, input: &Array4<f32>) -> Result<EvaluationResult>;

    /// Get the device this runner uses.
    fn device(&self) -> &Device;
}

impl ModelRunner for StyleModel {
    fn evaluate(&mut self, input: &Array4<f32>) -> Result<EvaluationResult> {
        self.evaluate(input)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_device_strings() {
        assert_eq!("cpu".parse::<Device>().unwrap(), Device::Cpu);
        assert_eq!("cuda".parse::<Device>().unwrap(), Device::Cuda(0));
        assert_eq!("cuda:1".parse::<Device>().unwrap(), Device::Cuda(1));
        assert_eq!(" CUDA:2 ".parse::<Device>().unwrap(), Device::Cuda(2));
        assert!("metal".parse::<Device>().is_err());
        assert!("cuda:x".parse::<Device>().is_err());
    }

    #[test]
    fn device_display_round_trips() {
        for device in [Device::cpu(), Device::cuda(0), Device::cuda(3)] {
            let parsed: Device = device.to_string().parse().unwrap();
            assert_eq!(parsed, device);
        }
    }

    #[test]
    fn shapes_differ_only_in_width() {
        assert_eq!(input_shape(2), [2, 3, 720, 883]);
        assert_eq!(output_shape(2), [2, 3, 720, 884]);
    }
}
