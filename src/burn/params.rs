use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::error::HalaBurnfadeError;

/// The size of the encoded parameter block in bytes.
pub const HALA_BURN_PARAMS_SIZE: usize = std::mem::size_of::<HalaBurnParams>();

const _: () = assert!(HALA_BURN_PARAMS_SIZE == 20);

/// The burn parameters supplied to every dispatch.
/// The encoded block is five f32 in field order.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct HalaBurnParams {
  /// How far the burn has advanced, 0 is untouched and 1 is fully consumed.
  pub progress: f32,
  /// The frequency of the burn field noise.
  pub scale: f32,
  /// The ember hue rotation in radians.
  pub hue_rotate: f32,
  /// The width of the glowing band ahead of the burn front.
  pub edge_width: f32,
  /// The length of the ember trail behind the burn front.
  pub ember_range: f32,
}

/// The implementation of the burn parameters.
impl HalaBurnParams {
  /// Encode the parameter block.
  /// return: The bytes.
  pub fn to_bytes(&self) -> [u8; HALA_BURN_PARAMS_SIZE] {
    bytemuck::cast(*self)
  }

  /// Decode the parameter block.
  /// param bytes: The bytes.
  /// return: The parameters.
  pub fn from_bytes(bytes: &[u8; HALA_BURN_PARAMS_SIZE]) -> Self {
    bytemuck::cast(*bytes)
  }

  /// Check the parameters before a dispatch.
  /// Any progress is accepted, the kernel clamps it and treats NaN as 0.
  /// return: The result.
  pub fn validate(&self) -> Result<(), HalaBurnfadeError> {
    let values = [
      ("scale", self.scale),
      ("hue_rotate", self.hue_rotate),
      ("edge_width", self.edge_width),
      ("ember_range", self.ember_range),
    ];
    if let Some((name, value)) = values.iter().find(|(_, value)| !value.is_finite()) {
      return Err(HalaBurnfadeError::new(&format!("The burn parameter \"{}\" is not finite: {}.", name, value), None));
    }
    if self.scale <= 0.0 {
      return Err(HalaBurnfadeError::new(&format!("The burn scale {} must be positive.", self.scale), None));
    }
    if self.edge_width < 0.0 || self.ember_range < 0.0 {
      return Err(HalaBurnfadeError::new(
        &format!("The edge width {} and ember range {} must not be negative.", self.edge_width, self.ember_range),
        None));
    }
    Ok(())
  }

  /// Copy the parameters with a different progress.
  /// param progress: The progress.
  /// return: The parameters.
  pub fn with_progress(mut self, progress: f32) -> Self {
    self.progress = progress;
    self
  }
}

/// The user facing burn settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HalaBurnSettings {
  pub burn_amount: f32,
  pub burn_scale: f32,
  pub hue_rotate: f32,
  pub edge_width: f32,
  pub ember_range: f32,
}

impl Default for HalaBurnSettings {
  fn default() -> Self {
    Self {
      burn_amount: 0.0,
      burn_scale: 8.0,
      hue_rotate: 0.0,
      edge_width: 0.08,
      ember_range: 0.15,
    }
  }
}

/// The implementation of the burn settings.
impl HalaBurnSettings {
  /// Check the settings.
  /// return: The result.
  pub fn validate(&self) -> Result<(), HalaBurnfadeError> {
    if !self.burn_amount.is_finite() {
      return Err(HalaBurnfadeError::new(
        &format!("The burn setting \"burn_amount\" is not finite: {}.", self.burn_amount),
        None));
    }
    self.to_params().validate()
  }

  /// Convert the settings to the parameters of a dispatch.
  /// return: The parameters.
  pub fn to_params(&self) -> HalaBurnParams {
    HalaBurnParams {
      progress: self.burn_amount,
      scale: self.burn_scale,
      hue_rotate: self.hue_rotate,
      edge_width: self.edge_width,
      ember_range: self.ember_range,
    }
  }
}
