/// Axis-aligned bounding box (AABB) representation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct HalaBounds {
  pub center: [f32; 3],
  pub extents: [f32; 3],
}

/// Implementation of HalaBounds.
impl HalaBounds {

  /// Create the box enclosing an origin centered sphere.
  /// param radius: The radius of the sphere.
  /// return: The new HalaBounds instance.
  pub fn from_sphere(radius: f32) -> Self {
    Self {
      center: [0.0; 3],
      extents: [radius; 3],
    }
  }

  /// Get the minimum bounds of the AABB.
  /// return: The minimum bounds of the AABB.
  pub fn get_min(&self) -> [f32; 3] {
    [
      self.center[0] - self.extents[0],
      self.center[1] - self.extents[1],
      self.center[2] - self.extents[2],
    ]
  }

  /// Get the maximum bounds of the AABB.
  /// return: The maximum bounds of the AABB.
  pub fn get_max(&self) -> [f32; 3] {
    [
      self.center[0] + self.extents[0],
      self.center[1] + self.extents[1],
      self.center[2] + self.extents[2],
    ]
  }

  /// Does the AABB contain the given point?
  /// param point: The point to check.
  /// param epsilon: The tolerance applied to every face.
  /// return: True if the point is inside, false otherwise.
  pub fn contains_point(&self, point: [f32; 3], epsilon: f32) -> bool {
    let min = self.get_min();
    let max = self.get_max();
    (0..3).all(|i| point[i] >= min[i] - epsilon && point[i] <= max[i] + epsilon)
  }

}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sphere_bounds_span_the_diameter() {
    let bounds = HalaBounds::from_sphere(0.1);
    assert_eq!(bounds.get_min(), [-0.1, -0.1, -0.1]);
    assert_eq!(bounds.get_max(), [0.1, 0.1, 0.1]);
  }

  #[test]
  fn points_outside_the_sphere_box_are_rejected() {
    let bounds = HalaBounds::from_sphere(0.5);
    assert!(bounds.contains_point([0.5, -0.5, 0.0], 0.0));
    assert!(!bounds.contains_point([0.51, 0.0, 0.0], 0.0));
    assert!(bounds.contains_point([0.5005, 0.0, 0.0], 1e-3));
  }
}
