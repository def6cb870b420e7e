use std::sync::Arc;

use crate::error::HalaBurnfadeError;
use crate::scene::HalaVertex;
use crate::scene::cpu::HalaMesh;

/// The immutable snapshot of the generated vertices every burn dispatch starts from.
#[derive(Debug, Clone)]
pub struct HalaRestPose {
  vertices: Arc<[HalaVertex]>,
}

/// The implementation of the rest pose.
impl HalaRestPose {
  /// Capture the rest pose of a mesh.
  /// param mesh: The mesh.
  /// return: The rest pose.
  pub fn capture(mesh: &HalaMesh) -> Result<Self, HalaBurnfadeError> {
    if mesh.is_empty() {
      return Err(HalaBurnfadeError::new("Capture the rest pose of an empty mesh.", None));
    }
    mesh.validate()?;
    Ok(Self::from_vertices(mesh.vertices.clone()))
  }

  /// Wrap vertices as a rest pose without any mesh checks.
  /// param vertices: The vertices.
  /// return: The rest pose.
  pub fn from_vertices(vertices: Vec<HalaVertex>) -> Self {
    Self {
      vertices: Arc::from(vertices),
    }
  }

  pub fn len(&self) -> usize {
    self.vertices.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  pub fn vertices(&self) -> &[HalaVertex] {
    &self.vertices
  }

  /// Share the snapshot without copying.
  pub(crate) fn shared(&self) -> Arc<[HalaVertex]> {
    Arc::clone(&self.vertices)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::scene::loader::HalaIcosphereLoader;

  #[test]
  fn capture_copies_every_vertex() {
    let mut mesh = HalaIcosphereLoader::generate(0.1, 1).unwrap();
    let rest_pose = HalaRestPose::capture(&mesh).unwrap();
    assert_eq!(rest_pose.len(), mesh.vertex_count());
    assert_eq!(rest_pose.vertices(), &mesh.vertices[..]);

    mesh.vertices[0].position *= 2.0;
    assert_ne!(rest_pose.vertices()[0], mesh.vertices[0]);
  }

  #[test]
  fn empty_mesh_is_rejected() {
    assert!(HalaRestPose::capture(&HalaMesh::default()).is_err());
  }
}
