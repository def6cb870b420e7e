use std::collections::HashMap;

use glam::{
  Vec2,
  Vec3,
  Vec4,
};
use serde::{Serialize, Deserialize};

use crate::error::HalaBurnfadeError;
use crate::scene::{
  HalaVertex,
  HalaBounds,
};
use crate::scene::cpu::HalaMesh;

/// The largest subdivision level accepted by the loader.
/// Level 10 already produces 10,485,762 vertices.
pub const MAX_SUBDIVISIONS: u32 = 10;

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
  [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
  [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
  [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
  [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// The icosphere description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HalaIcosphereDesc {
  pub radius: f32,
  pub subdivisions: u32,
}

impl Default for HalaIcosphereDesc {
  fn default() -> Self {
    Self {
      radius: 0.1,
      subdivisions: 5,
    }
  }
}

/// The icosphere loader.
pub struct HalaIcosphereLoader;

/// The implementation of the icosphere loader.
impl HalaIcosphereLoader {

  /// Generate an icosphere from the description.
  /// param desc: The icosphere description.
  /// return: The mesh.
  pub fn load(desc: &HalaIcosphereDesc) -> Result<HalaMesh, HalaBurnfadeError> {
    Self::generate(desc.radius, desc.subdivisions)
  }

  /// Check the generation parameters.
  /// param radius: The sphere radius.
  /// param subdivisions: The subdivision level.
  /// return: The result.
  pub fn check(radius: f32, subdivisions: u32) -> Result<(), HalaBurnfadeError> {
    if !radius.is_finite() || radius <= 0.0 {
      return Err(HalaBurnfadeError::new(
        &format!("The icosphere radius {} must be a positive finite number.", radius),
        None));
    }
    if subdivisions > MAX_SUBDIVISIONS {
      return Err(HalaBurnfadeError::new(
        &format!("The icosphere subdivision level {} exceeds the maximum {}.", subdivisions, MAX_SUBDIVISIONS),
        None));
    }
    Ok(())
  }

  /// Generate an icosphere by subdividing a regular icosahedron.
  /// Vertices are shared between adjacent faces, so the mesh is watertight.
  /// param radius: The sphere radius.
  /// param subdivisions: The subdivision level.
  /// return: The mesh.
  pub fn generate(radius: f32, subdivisions: u32) -> Result<HalaMesh, HalaBurnfadeError> {
    Self::check(radius, subdivisions)?;

    let t = (1.0 + 5f32.sqrt()) / 2.0;
    let mut positions: Vec<Vec3> = [
      Vec3::new(-1.0, t, 0.0),
      Vec3::new(1.0, t, 0.0),
      Vec3::new(-1.0, -t, 0.0),
      Vec3::new(1.0, -t, 0.0),

      Vec3::new(0.0, -1.0, t),
      Vec3::new(0.0, 1.0, t),
      Vec3::new(0.0, -1.0, -t),
      Vec3::new(0.0, 1.0, -t),

      Vec3::new(t, 0.0, -1.0),
      Vec3::new(t, 0.0, 1.0),
      Vec3::new(-t, 0.0, -1.0),
      Vec3::new(-t, 0.0, 1.0),
    ].iter().map(|p| p.normalize() * radius).collect();
    positions.reserve(Self::vertex_count(subdivisions) - positions.len());

    let mut faces = ICOSAHEDRON_FACES.to_vec();
    let mut midpoint_cache: HashMap<(u32, u32), u32> = HashMap::new();
    for _ in 0..subdivisions {
      let mut new_faces = Vec::with_capacity(faces.len() * 4);
      for &[v1, v2, v3] in faces.iter() {
        let a = Self::midpoint(&mut positions, &mut midpoint_cache, radius, v1, v2);
        let b = Self::midpoint(&mut positions, &mut midpoint_cache, radius, v2, v3);
        let c = Self::midpoint(&mut positions, &mut midpoint_cache, radius, v3, v1);
        new_faces.push([v1, a, c]);
        new_faces.push([v2, b, a]);
        new_faces.push([v3, c, b]);
        new_faces.push([a, b, c]);
      }
      faces = new_faces;
    }

    let vertices: Vec<HalaVertex> = positions.iter()
      .map(|&position| Self::surface_vertex(position, radius))
      .collect();
    let indices: Vec<u32> = faces.into_iter().flatten().collect();

    log::debug!(
      "Generated icosphere [radius {}, level {}] with {} vertices and {} triangles.",
      radius, subdivisions, vertices.len(), indices.len() / 3
    );
    Ok(HalaMesh::new(vertices, indices, HalaBounds::from_sphere(radius)))
  }

  /// Get the vertex count of an icosphere.
  /// param subdivisions: The subdivision level.
  /// return: The vertex count.
  pub fn vertex_count(subdivisions: u32) -> usize {
    10 * 4usize.pow(subdivisions) + 2
  }

  /// Get the triangle count of an icosphere.
  /// param subdivisions: The subdivision level.
  /// return: The triangle count.
  pub fn triangle_count(subdivisions: u32) -> usize {
    20 * 4usize.pow(subdivisions)
  }

  /// Get or create the midpoint vertex of an edge.
  fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    radius: f32,
    v1: u32,
    v2: u32,
  ) -> u32 {
    let key = (v1.min(v2), v1.max(v2));
    if let Some(&index) = cache.get(&key) {
      return index;
    }
    let mid = ((positions[v1 as usize] + positions[v2 as usize]) * 0.5).normalize() * radius;
    positions.push(mid);
    let index = (positions.len() - 1) as u32;
    cache.insert(key, index);
    index
  }

  /// Build the vertex attributes of a point on the sphere.
  fn surface_vertex(position: Vec3, radius: f32) -> HalaVertex {
    let normal = position.normalize();
    let mut u = (position.z.atan2(position.x) + std::f32::consts::PI) / std::f32::consts::TAU;
    if u >= 1.0 {
      u -= 1.0;
    }
    let v = ((position.y / radius).clamp(-1.0, 1.0).asin() + std::f32::consts::FRAC_PI_2) / std::f32::consts::PI;
    HalaVertex::new(position, normal, Vec2::new(u, v), Vec4::new(0.0, 0.0, 0.0, 1.0))
  }

}
