use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::HalaBurnfadeError;
use crate::compute_program::HalaComputeProgramDesc;
use crate::scene::loader::{
  HalaIcosphereDesc,
  HalaIcosphereLoader,
};
use crate::burn::HalaBurnSettings;

/// The configuration of the burn fade effect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HalaBurnfadeConfig {
  pub icosphere: HalaIcosphereDesc,
  pub compute: HalaComputeProgramDesc,
  pub burn: HalaBurnSettings,
}

/// The implementation of the configuration.
impl HalaBurnfadeConfig {
  /// Parse the configuration from JSON.
  /// Missing fields keep their defaults.
  /// param json: The JSON text.
  /// return: The configuration.
  pub fn from_json_str(json: &str) -> Result<Self, HalaBurnfadeError> {
    let config: Self = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
  }

  /// Load the configuration from a JSON file.
  /// param path: The file path.
  /// return: The configuration.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HalaBurnfadeError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
      .map_err(|err| HalaBurnfadeError::new(&format!("Read the configuration file \"{:?}\" failed.", path), Some(Box::new(err))))?;
    let config = Self::from_json_str(&json)?;
    log::debug!("Loaded the burn fade configuration from \"{:?}\".", path);
    Ok(config)
  }

  /// Check the configuration.
  /// return: The result.
  pub fn validate(&self) -> Result<(), HalaBurnfadeError> {
    HalaIcosphereLoader::check(self.icosphere.radius, self.icosphere.subdivisions)?;
    if self.compute.workgroup_size == 0 {
      return Err(HalaBurnfadeError::new("The compute workgroup size must not be zero.", None));
    }
    self.burn.validate()
  }

  /// Serialize the configuration to pretty JSON.
  /// return: The JSON text.
  pub fn to_json_string(&self) -> Result<String, HalaBurnfadeError> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_json_gives_defaults() {
    let config = HalaBurnfadeConfig::from_json_str("{}").unwrap();
    assert_eq!(config, HalaBurnfadeConfig::default());
    assert_eq!(config.icosphere.radius, 0.1);
    assert_eq!(config.icosphere.subdivisions, 5);
    assert_eq!(config.compute.workgroup_size, 64);
    assert_eq!(config.burn.burn_scale, 8.0);
  }

  #[test]
  fn nested_fields_override_defaults() {
    let config = HalaBurnfadeConfig::from_json_str(r#"{
      "icosphere": { "subdivisions": 2 },
      "compute": { "num_threads": 2 },
      "burn": { "hue_rotate": 1.5 }
    }"#).unwrap();
    assert_eq!(config.icosphere.subdivisions, 2);
    assert_eq!(config.icosphere.radius, 0.1);
    assert_eq!(config.compute.num_threads, 2);
    assert_eq!(config.burn.hue_rotate, 1.5);
    assert_eq!(config.burn.edge_width, 0.08);
  }

  #[test]
  fn invalid_values_are_rejected() {
    assert!(HalaBurnfadeConfig::from_json_str(r#"{ "icosphere": { "subdivisions": -1 } }"#).is_err());
    assert!(HalaBurnfadeConfig::from_json_str(r#"{ "icosphere": { "radius": -0.5 } }"#).is_err());
    assert!(HalaBurnfadeConfig::from_json_str(r#"{ "compute": { "workgroup_size": 0 } }"#).is_err());
    assert!(HalaBurnfadeConfig::from_json_str(r#"{ "burn": { "burn_scale": 0.0 } }"#).is_err());
    assert!(HalaBurnfadeConfig::from_json_str("not json").is_err());
  }

  #[test]
  fn json_text_parses_back() {
    let config = HalaBurnfadeConfig {
      burn: HalaBurnSettings { burn_amount: 0.25, ..Default::default() },
      ..Default::default()
    };
    let json = config.to_json_string().unwrap();
    assert_eq!(HalaBurnfadeConfig::from_json_str(&json).unwrap(), config);
  }

  #[test]
  fn missing_file_is_an_error() {
    let err = HalaBurnfadeConfig::from_file("./does/not/exist.json").unwrap_err();
    assert!(err.message().contains("exist.json"));
  }
}
