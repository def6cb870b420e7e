use glam::{
  Quat,
  Vec3,
  Vec4,
};

use crate::scene::HalaVertex;
use super::noise::burn_field;
use super::params::HalaBurnParams;

/// The radial swell of the hottest part of the edge.
pub const EMBER_SWELL: f32 = 0.06;
/// The radial scale of a consumed vertex.
pub const CONSUMED_SCALE: f32 = 0.85;

const EMBER_COLOR: Vec3 = Vec3::new(1.0, 0.42, 0.08);
const EMBER_INTENSITY: f32 = 1.6;
const ASH_COLOR: Vec3 = Vec3::new(0.02, 0.018, 0.016);

/// The burn state of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HalaBurnState {
  Unburned,
  Edge,
  Consumed,
}

/// The burn evaluation of a single rest position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalaBurnSample {
  pub state: HalaBurnState,
  /// The burn field value.
  pub field: f32,
  /// The ember glow in [0, 1].
  pub heat: f32,
  /// The consumption in [0, 1].
  pub char_amount: f32,
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
  let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
  t * t * (3.0 - 2.0 * t)
}

/// Clamp the progress to [0, 1], NaN counts as no progress.
fn clamped_progress(progress: f32) -> f32 {
  if progress.is_nan() {
    0.0
  } else {
    progress.clamp(0.0, 1.0)
  }
}

/// Rotate a color around the grey axis.
/// param color: The color.
/// param radians: The hue rotation in radians.
/// return: The rotated color.
pub fn rotate_hue(color: Vec3, radians: f32) -> Vec3 {
  if radians == 0.0 || !radians.is_finite() {
    return color;
  }
  (Quat::from_axis_angle(Vec3::ONE.normalize(), radians) * color).max(Vec3::ZERO)
}

/// Evaluate the burn state of a rest position.
/// The field value f in [0, 1] is read from the rest direction. While progress runs from 0 to 1
/// the front sweeps from below 0 to above 1, and delta = front - f selects the state.
/// At or below -edge_width the vertex is unburned. Below ember_range it is on the glowing edge.
/// Anything further, or a progress of 1, is consumed.
/// param position: The rest position.
/// param params: The burn parameters.
/// return: The sample.
pub fn sample(position: Vec3, params: &HalaBurnParams) -> HalaBurnSample {
  let progress = clamped_progress(params.progress);
  let field = burn_field(position, params.scale);
  let unburned = HalaBurnSample {
    state: HalaBurnState::Unburned,
    field,
    heat: 0.0,
    char_amount: 0.0,
  };
  if progress <= 0.0 {
    return unburned;
  }

  // f32::max drops NaN, so broken widths collapse to zero.
  let edge_width = params.edge_width.max(0.0);
  let ember_range = params.ember_range.max(0.0);
  let front = progress * (1.0 + edge_width + ember_range) - edge_width;
  let delta = front - field;

  if progress >= 1.0 || delta >= ember_range {
    HalaBurnSample {
      state: HalaBurnState::Consumed,
      field,
      heat: 0.0,
      char_amount: 1.0,
    }
  } else if delta <= -edge_width {
    unburned
  } else if delta <= 0.0 {
    HalaBurnSample {
      state: HalaBurnState::Edge,
      field,
      heat: smoothstep(-edge_width, 0.0, delta),
      char_amount: 0.0,
    }
  } else {
    let char_amount = smoothstep(0.0, ember_range, delta);
    HalaBurnSample {
      state: HalaBurnState::Edge,
      field,
      heat: 1.0 - char_amount,
      char_amount,
    }
  }
}

/// Transform a rest vertex by the burn effect.
/// Unburned vertices come back bit for bit. Edge vertices swell and glow in the ember color,
/// consumed ones collapse inward to ash with zero alpha.
/// param rest: The rest vertex.
/// param params: The burn parameters.
/// return: The output vertex.
pub fn burn_vertex(rest: &HalaVertex, params: &HalaBurnParams) -> HalaVertex {
  let burn = sample(rest.position, params);
  if burn.state == HalaBurnState::Unburned {
    return *rest;
  }

  let radial_scale = 1.0
    + EMBER_SWELL * burn.heat * (1.0 - burn.char_amount)
    - burn.char_amount * (1.0 - CONSUMED_SCALE);
  let position = rest.position * radial_scale;

  // Radial scaling keeps the direction, the rest normal still applies.
  let normal = rest.normal.try_normalize()
    .or_else(|| rest.position.try_normalize())
    .unwrap_or(Vec3::Y);

  let ember = rotate_hue(EMBER_COLOR, params.hue_rotate) * EMBER_INTENSITY;
  let rgb = rest.color.truncate()
    .lerp(ember, burn.heat)
    .lerp(ASH_COLOR, burn.char_amount);
  let alpha = rest.color.w * (1.0 - burn.char_amount);

  HalaVertex::new(position, normal, rest.uv, Vec4::new(rgb.x, rgb.y, rgb.z, alpha))
}

#[cfg(test)]
mod tests {
  use glam::Vec2;

  use super::*;

  fn rest_vertex(direction: Vec3) -> HalaVertex {
    let normal = direction.normalize();
    HalaVertex::new(normal * 0.1, normal, Vec2::new(0.3, 0.6), Vec4::new(0.0, 0.0, 0.0, 1.0))
  }

  fn params(progress: f32) -> HalaBurnParams {
    HalaBurnParams {
      progress,
      scale: 8.0,
      hue_rotate: 0.0,
      edge_width: 0.08,
      ember_range: 0.15,
    }
  }

  fn directions() -> Vec<Vec3> {
    (0..50)
      .map(|i| {
        let a = i as f32 * 0.61;
        Vec3::new(a.cos(), (a * 1.3).sin(), a.sin() + 0.2)
      })
      .collect()
  }

  #[test]
  fn zero_progress_is_identity() {
    for direction in directions() {
      let rest = rest_vertex(direction);
      assert_eq!(burn_vertex(&rest, &params(0.0)), rest);
      assert_eq!(burn_vertex(&rest, &params(-3.0)), rest);
      assert_eq!(burn_vertex(&rest, &params(f32::NAN)), rest);
    }
  }

  #[test]
  fn full_progress_saturates() {
    for direction in directions() {
      let rest = rest_vertex(direction);
      let done = burn_vertex(&rest, &params(1.0));
      assert_eq!(sample(rest.position, &params(1.0)).state, HalaBurnState::Consumed);
      assert_eq!(burn_vertex(&rest, &params(2.0)), done);
      assert_eq!(burn_vertex(&rest, &params(100.0)), done);
      assert_eq!(burn_vertex(&rest, &params(f32::INFINITY)), done);
      assert_eq!(done.color.w, 0.0);
      assert!((done.position.length() - 0.1 * CONSUMED_SCALE).abs() < 1e-6);
    }
  }

  #[test]
  fn state_only_advances_with_progress() {
    for direction in directions() {
      let rest = rest_vertex(direction);
      let mut last_state = HalaBurnState::Unburned;
      let mut last_char = 0.0;
      for step in 0..=120 {
        let burn = sample(rest.position, &params(step as f32 / 100.0));
        assert!(burn.state >= last_state);
        assert!(burn.char_amount >= last_char);
        last_state = burn.state;
        last_char = burn.char_amount;
      }
      assert_eq!(last_state, HalaBurnState::Consumed);
    }
  }

  #[test]
  fn edge_band_glows_and_swells() {
    let rest = rest_vertex(Vec3::new(0.2, 0.9, -0.4));
    let field = burn_field(rest.position, 8.0);
    // Put the front exactly on the vertex.
    let progress = (field + 0.08) / (1.0 + 0.08 + 0.15);
    let burn = sample(rest.position, &params(progress));
    assert_eq!(burn.state, HalaBurnState::Edge);
    assert!(burn.heat > 0.99);

    let out = burn_vertex(&rest, &params(progress));
    assert!(out.position.length() > rest.position.length());
    assert!(out.color.x > 1.0);
    assert!(out.color.w > 0.99);
  }

  #[test]
  fn normals_stay_unit_length() {
    for direction in directions() {
      let mut rest = rest_vertex(direction);
      rest.normal *= 3.0;
      for step in 1..=10 {
        let out = burn_vertex(&rest, &params(step as f32 / 10.0));
        if sample(rest.position, &params(step as f32 / 10.0)).state != HalaBurnState::Unburned {
          assert!((out.normal.length() - 1.0).abs() < 1e-5);
        }
      }
    }
  }

  #[test]
  fn zero_widths_jump_straight_to_consumed() {
    let rest = rest_vertex(Vec3::new(1.0, 0.2, 0.3));
    let sharp = HalaBurnParams { edge_width: 0.0, ember_range: 0.0, ..params(0.0) };
    for step in 0..=20 {
      let burn = sample(rest.position, &sharp.with_progress(step as f32 / 20.0));
      assert_ne!(burn.state, HalaBurnState::Edge);
    }
  }

  #[test]
  fn hue_rotation_changes_ember_color() {
    let full_turn = rotate_hue(EMBER_COLOR, std::f32::consts::TAU);
    assert!((full_turn - EMBER_COLOR).length() < 1e-5);

    let rotated = rotate_hue(EMBER_COLOR, 2.0);
    assert!((rotated - EMBER_COLOR).length() > 0.1);
    assert!(rotated.min_element() >= 0.0);
  }
}
