use crate::error::HalaBurnfadeError;
use crate::scene::{
  HalaVertex,
  HalaVertexRecord,
  HalaVertexAttribute,
  HalaVertexLayout,
  HalaIndexType,
  HalaBounds,
};
use crate::scene::cpu;
use crate::scene::vertex::to_records;

/// The primitive topology of a mesh part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalaTopology {
  Triangle,
}

/// The description a renderer needs to bind the mesh buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct HalaMeshDescriptor {
  pub vertex_attributes: Vec<HalaVertexAttribute>,
  pub vertex_layouts: Vec<HalaVertexLayout>,
  pub index_type: HalaIndexType,
  pub vertex_capacity: usize,
  pub index_capacity: usize,
}

/// The implementation of the mesh descriptor.
impl HalaMeshDescriptor {
  /// Create the descriptor of the burn vertex layout.
  /// param vertex_capacity: The vertex capacity.
  /// param index_capacity: The index capacity.
  /// return: The descriptor.
  pub fn new(vertex_capacity: usize, index_capacity: usize) -> Self {
    Self {
      vertex_attributes: HalaVertex::ATTRIBUTES.to_vec(),
      vertex_layouts: HalaVertex::LAYOUTS.to_vec(),
      index_type: HalaIndexType::Uint32,
      vertex_capacity,
      index_capacity,
    }
  }
}

/// A drawable range of the index buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalaMeshPart {
  pub index_offset: usize,
  pub index_count: usize,
  pub topology: HalaTopology,
  pub bounds: HalaBounds,
}

/// The mesh encoded in the buffer layout consumed by the renderer.
pub struct HalaMeshBuffers {
  pub descriptor: HalaMeshDescriptor,
  pub parts: Vec<HalaMeshPart>,
  vertex_records: Vec<HalaVertexRecord>,
  indices: Vec<u32>,
}

/// The implementation of the mesh buffers.
impl HalaMeshBuffers {

  /// Encode a CPU mesh.
  /// param mesh: The mesh in the CPU.
  /// return: The mesh buffers.
  pub fn from_mesh(mesh: &cpu::HalaMesh) -> Result<Self, HalaBurnfadeError> {
    mesh.validate()?;

    let descriptor = HalaMeshDescriptor::new(mesh.vertex_count(), mesh.index_count());
    let vertex_records = to_records(&mesh.vertices);
    let indices = mesh.indices.clone();
    let parts = vec![
      HalaMeshPart {
        index_offset: 0,
        index_count: mesh.index_count(),
        topology: HalaTopology::Triangle,
        bounds: mesh.bounds,
      }
    ];

    let buffers = Self {
      descriptor,
      parts,
      vertex_records,
      indices,
    };
    log::debug!(
      "Encoded mesh buffers: {} vertex bytes, {} index bytes.",
      buffers.vertex_bytes().len(), buffers.index_bytes().len()
    );
    Ok(buffers)
  }

  /// Get the encoded vertex buffer.
  /// return: The vertex bytes.
  pub fn vertex_bytes(&self) -> &[u8] {
    bytemuck::cast_slice(&self.vertex_records)
  }

  /// Get the encoded index buffer.
  /// return: The index bytes.
  pub fn index_bytes(&self) -> &[u8] {
    bytemuck::cast_slice(&self.indices)
  }

  /// Replace the whole vertex buffer.
  /// param vertices: The new vertices, exactly one per vertex of the capacity.
  /// return: The result.
  pub fn replace_vertices(&mut self, vertices: &[HalaVertex]) -> Result<(), HalaBurnfadeError> {
    if vertices.len() != self.descriptor.vertex_capacity {
      return Err(HalaBurnfadeError::new(
        &format!(
          "The replacement has {} vertices but the mesh holds {}.",
          vertices.len(), self.descriptor.vertex_capacity),
        None));
    }
    for (record, vertex) in self.vertex_records.iter_mut().zip(vertices) {
      *record = HalaVertexRecord::from(vertex);
    }
    Ok(())
  }

  /// Decode the vertex buffer.
  /// return: The vertices.
  pub fn decode_vertices(&self) -> Vec<HalaVertex> {
    self.vertex_records.iter().copied().map(HalaVertex::from).collect()
  }

  /// Decode the index buffer.
  /// return: The indices.
  pub fn decode_indices(&self) -> Vec<u32> {
    self.indices.clone()
  }

}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::scene::HALA_VERTEX_STRIDE;
  use crate::scene::vertex::decode_vertices;
  use crate::scene::loader::HalaIcosphereLoader;

  #[test]
  fn buffers_mirror_the_cpu_mesh() {
    let mesh = HalaIcosphereLoader::generate(0.1, 1).unwrap();
    let buffers = HalaMeshBuffers::from_mesh(&mesh).unwrap();

    assert_eq!(buffers.descriptor.vertex_capacity, 42);
    assert_eq!(buffers.descriptor.index_capacity, 240);
    assert_eq!(buffers.descriptor.index_type, HalaIndexType::Uint32);
    assert_eq!(buffers.vertex_bytes().len(), 42 * HALA_VERTEX_STRIDE);
    assert_eq!(buffers.index_bytes().len(), 240 * 4);
    assert_eq!(buffers.decode_vertices(), mesh.vertices);
    assert_eq!(buffers.decode_indices(), mesh.indices);
    assert_eq!(decode_vertices(buffers.vertex_bytes()).unwrap(), mesh.vertices);
    assert_eq!(&buffers.vertex_bytes()[..HALA_VERTEX_STRIDE], &mesh.vertices[0].encode()[..]);
    assert_eq!(&buffers.index_bytes()[4..8], &mesh.indices[1].to_le_bytes());

    assert_eq!(buffers.parts.len(), 1);
    assert_eq!(buffers.parts[0].index_count, 240);
    assert_eq!(buffers.parts[0].topology, HalaTopology::Triangle);
    assert_eq!(buffers.parts[0].bounds, HalaBounds::from_sphere(0.1));
  }

  #[test]
  fn replace_requires_full_buffer() {
    let mesh = HalaIcosphereLoader::generate(1.0, 0).unwrap();
    let mut buffers = HalaMeshBuffers::from_mesh(&mesh).unwrap();

    assert!(buffers.replace_vertices(&mesh.vertices[..11]).is_err());

    let mut moved = mesh.vertices.clone();
    for vertex in moved.iter_mut() {
      vertex.color.w = 0.5;
    }
    buffers.replace_vertices(&moved).unwrap();
    assert_eq!(buffers.decode_vertices(), moved);
    assert_eq!(decode_vertices(buffers.vertex_bytes()).unwrap(), moved);
  }

  #[test]
  fn invalid_mesh_is_not_encoded() {
    let mut mesh = HalaIcosphereLoader::generate(1.0, 0).unwrap();
    mesh.indices.push(99);
    assert!(HalaMeshBuffers::from_mesh(&mesh).is_err());
  }
}
