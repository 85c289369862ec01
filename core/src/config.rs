//! Configuration types for stylize-rs.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Model configuration.
    #[serde(default)]
    pub model: ModelConfig,

    /// Inference configuration.
    #[serde(default)]
    pub inference: InferenceConfig,
}

/// Model configuration.
#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Path to the ONNX model file.
    #[serde(default)]
    pub model_path: Option<String>,

    /// Device to load the model on.
    #[serde(default = "default_device")]
    pub device: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            device: default_device(),
        }
    }
}

/// Inference configuration.
#[derive(Debug, Deserialize)]
pub struct InferenceConfig {
    /// Batch size for evaluation.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

fn default_device() -> String {
    "cpu".to_string()
}

fn default_batch_size() -> usize {
    1
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> crate::error::Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_partial_yaml_applies_defaults() {
        let config = Config::from_yaml_str("model:\n  model_path: wave.onnx\n").unwrap();
        assert_eq!(config.model.model_path.as_deref(), Some("wave.onnx"));
        assert_eq!(config.model.device, "cpu");
        assert_eq!(config.inference.batch_size, 1);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = "model:\n  model_path: wave.onnx\n  device: cuda:1\ninference:\n  batch_size: 4\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.model.device, "cuda:1");
        assert_eq!(config.inference.batch_size, 4);
    }
}
