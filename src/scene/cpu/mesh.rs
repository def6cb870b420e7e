use std::collections::HashMap;

use crate::error::HalaBurnfadeError;
use crate::scene::{
  HalaVertex,
  HalaBounds,
};

/// A mesh is a collection of vertices and triangle indices that define a 3D object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HalaMesh {
  pub vertices: Vec<HalaVertex>,
  pub indices: Vec<u32>,
  pub bounds: HalaBounds,
}

/// The implementation of the mesh.
impl HalaMesh {
  /// Create a new mesh.
  /// param vertices: The vertices.
  /// param indices: The triangle indices.
  /// param bounds: The bounds.
  /// return: The mesh.
  pub fn new(vertices: Vec<HalaVertex>, indices: Vec<u32>, bounds: HalaBounds) -> Self {
    Self { vertices, indices, bounds }
  }

  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  pub fn index_count(&self) -> usize {
    self.indices.len()
  }

  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Iterate the triangles as index triples.
  /// return: The triangle iterator.
  pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
    self.indices.chunks_exact(3).map(|tri| [tri[0], tri[1], tri[2]])
  }

  /// Check the index invariants of the mesh.
  /// return: The result.
  pub fn validate(&self) -> Result<(), HalaBurnfadeError> {
    if self.indices.len() % 3 != 0 {
      return Err(HalaBurnfadeError::new(
        &format!("The index count {} is not a multiple of 3.", self.indices.len()),
        None));
    }
    let vertex_count = self.vertices.len();
    if let Some(index) = self.indices.iter().find(|&&index| index as usize >= vertex_count) {
      return Err(HalaBurnfadeError::new(
        &format!("The index {} is out of range of {} vertices.", index, vertex_count),
        None));
    }
    Ok(())
  }

  /// Check if every undirected edge is shared by exactly two triangles.
  /// return: True if the mesh is a closed edge-manifold, false otherwise.
  pub fn is_edge_manifold(&self) -> bool {
    if self.indices.is_empty() {
      return false;
    }
    let mut edge_uses: HashMap<(u32, u32), u32> = HashMap::with_capacity(self.indices.len());
    for [a, b, c] in self.triangles() {
      for (v1, v2) in [(a, b), (b, c), (c, a)] {
        if v1 == v2 {
          return false;
        }
        *edge_uses.entry((v1.min(v2), v1.max(v2))).or_insert(0) += 1;
      }
    }
    edge_uses.values().all(|&uses| uses == 2)
  }
}
