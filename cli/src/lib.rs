use detector::{DevicePreference, OnnxModelConfig};
use predict::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Everything `predict` can be configured with besides its three paths.
///
/// ```toml
/// device = "cpu"
///
/// [pipeline]
/// threshold = 0.7
/// order = "score-descending"
///
/// [model]
/// masks_output = "masks"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredictConfig {
    pub pipeline: PipelineConfig,
    pub model: OnnxModelConfig,
    pub device: DevicePreference,
}

impl PredictConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(ConfigError::UnsupportedFileFormat),
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mask::AreaConvention;
    use predict::ResultOrder;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = PredictConfig::from_toml("").expect("parse");
        assert_eq!(config, PredictConfig::default());
        assert_eq!(config.pipeline.threshold, 0.6);
        assert_eq!(config.model.input, "image");
        assert_eq!(config.device, DevicePreference::Auto);
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let config = PredictConfig::from_toml(
            r#"
            device = "cpu"

            [pipeline]
            threshold = 0.75
            area = "pixel-centers"
            order = "score-descending"
            min_area = 20.0

            [pipeline.annotation]
            line_width = 3

            [model]
            masks_output = "mask_probs"
            "#,
        )
        .expect("parse");

        assert_eq!(config.device, DevicePreference::Cpu);
        assert_eq!(config.pipeline.threshold, 0.75);
        assert_eq!(config.pipeline.target_label, 1);
        assert_eq!(config.pipeline.area, AreaConvention::PixelCenters);
        assert_eq!(config.pipeline.order, ResultOrder::ScoreDescending);
        assert_eq!(config.pipeline.min_area, Some(20.0));
        assert_eq!(config.pipeline.annotation.line_width, 3);
        assert_eq!(config.pipeline.annotation.color, [0, 0, 255]);
        assert_eq!(config.model.masks_output, "mask_probs");
        assert_eq!(config.model.scores_output, "scores");
    }

    #[test]
    fn json_and_toml_agree() {
        let mut config = PredictConfig::default();
        config.pipeline.mask_threshold = 0.25;
        config.device = DevicePreference::Cuda;

        let from_toml = PredictConfig::from_toml(&config.to_toml().expect("to toml")).expect("from toml");
        let from_json = PredictConfig::from_json(&config.to_json().expect("to json")).expect("from json");
        assert_eq!(from_toml, config);
        assert_eq!(from_json, config);
    }

    #[test]
    fn from_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().expect("tempdir");

        let toml_path = dir.path().join("predict.toml");
        fs::write(&toml_path, "[pipeline]\nthreshold = 0.9\n").expect("write");
        assert_eq!(PredictConfig::from_file(&toml_path).expect("toml").pipeline.threshold, 0.9);

        let json_path = dir.path().join("predict.json");
        fs::write(&json_path, r#"{ "pipeline": { "target_label": 3 } }"#).expect("write");
        assert_eq!(PredictConfig::from_file(&json_path).expect("json").pipeline.target_label, 3);

        let yaml_path = dir.path().join("predict.yaml");
        fs::write(&yaml_path, "pipeline: {}").expect("write");
        assert!(matches!(
            PredictConfig::from_file(&yaml_path),
            Err(ConfigError::UnsupportedFileFormat)
        ));
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(PredictConfig::from_toml("[pipeline]\nthreshold = \"high\"").is_err());
        assert!(PredictConfig::from_json("{").is_err());
    }
}
