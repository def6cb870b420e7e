use glam::{
  Vec2,
  Vec3,
  Vec4,
};

use bytemuck::{Pod, Zeroable};

use crate::error::HalaBurnfadeError;

/// The stride of an encoded vertex in bytes.
pub const HALA_VERTEX_STRIDE: usize = std::mem::size_of::<HalaVertexRecord>();

// The buffers are consumed as little-endian f32.
#[cfg(not(target_endian = "little"))]
compile_error!("hala-burnfade encodes vertex and parameter buffers in host byte order, which must be little-endian.");

const _: () = assert!(HALA_VERTEX_STRIDE == 48);

/// The semantic of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalaVertexSemantic {
  Position,
  Normal,
  Uv0,
  /// The vertex color with alpha, bound to the renderer's second texture coordinate slot (uv2).
  Color,
}

/// The format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalaVertexFormat {
  Float2,
  Float3,
  Float4,
}

/// The implementation of the vertex format.
impl HalaVertexFormat {
  /// Get the size of the format in bytes.
  /// return: The size.
  pub fn size(&self) -> u32 {
    match self {
      HalaVertexFormat::Float2 => 8,
      HalaVertexFormat::Float3 => 12,
      HalaVertexFormat::Float4 => 16,
    }
  }
}

/// A vertex attribute in the interleaved vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalaVertexAttribute {
  pub semantic: HalaVertexSemantic,
  pub format: HalaVertexFormat,
  pub offset: u32,
}

/// A vertex buffer layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalaVertexLayout {
  pub buffer_index: u32,
  pub buffer_stride: u32,
}

/// The index type of the index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalaIndexType {
  Uint32,
}

/// The implementation of the index type.
impl HalaIndexType {
  /// Get the size of the index in bytes.
  /// return: The size.
  pub fn size(&self) -> u32 {
    match self {
      HalaIndexType::Uint32 => 4,
    }
  }
}

/// The interleaved vertex record as laid out in the vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct HalaVertexRecord {
  pub position: [f32; 3],
  pub normal: [f32; 3],
  pub uv: [f32; 2],
  pub color: [f32; 4],
}

impl From<&HalaVertex> for HalaVertexRecord {
  fn from(vertex: &HalaVertex) -> Self {
    Self {
      position: vertex.position.to_array(),
      normal: vertex.normal.to_array(),
      uv: vertex.uv.to_array(),
      color: vertex.color.to_array(),
    }
  }
}

impl From<HalaVertexRecord> for HalaVertex {
  fn from(record: HalaVertexRecord) -> Self {
    Self {
      position: Vec3::from_array(record.position),
      normal: Vec3::from_array(record.normal),
      uv: Vec2::from_array(record.uv),
      color: Vec4::from_array(record.color),
    }
  }
}

/// The vertex.
/// The in-memory layout is not the binary contract, convert to HalaVertexRecord at the buffer boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HalaVertex {
  pub position: Vec3,
  pub normal: Vec3,
  pub uv: Vec2,
  pub color: Vec4,
}

/// The implementation of the vertex.
impl HalaVertex {
  pub const ATTRIBUTES: [HalaVertexAttribute; 4] = [
    HalaVertexAttribute {
      semantic: HalaVertexSemantic::Position,
      format: HalaVertexFormat::Float3,
      offset: std::mem::offset_of!(HalaVertexRecord, position) as u32,
    },
    HalaVertexAttribute {
      semantic: HalaVertexSemantic::Normal,
      format: HalaVertexFormat::Float3,
      offset: std::mem::offset_of!(HalaVertexRecord, normal) as u32,
    },
    HalaVertexAttribute {
      semantic: HalaVertexSemantic::Uv0,
      format: HalaVertexFormat::Float2,
      offset: std::mem::offset_of!(HalaVertexRecord, uv) as u32,
    },
    HalaVertexAttribute {
      semantic: HalaVertexSemantic::Color,
      format: HalaVertexFormat::Float4,
      offset: std::mem::offset_of!(HalaVertexRecord, color) as u32,
    },
  ];

  pub const LAYOUTS: [HalaVertexLayout; 1] = [
    HalaVertexLayout {
      buffer_index: 0,
      buffer_stride: HALA_VERTEX_STRIDE as u32,
    },
  ];

  /// Create a new vertex.
  /// param position: The position.
  /// param normal: The normal.
  /// param uv: The texture coordinate.
  /// param color: The color.
  /// return: The vertex.
  pub fn new(position: Vec3, normal: Vec3, uv: Vec2, color: Vec4) -> Self {
    Self { position, normal, uv, color }
  }

  /// Encode the vertex.
  /// return: The encoded record.
  pub fn encode(&self) -> [u8; HALA_VERTEX_STRIDE] {
    bytemuck::cast(HalaVertexRecord::from(self))
  }

  /// Decode a vertex from the interleaved record.
  /// param src: The source record.
  /// return: The vertex.
  pub fn decode(src: &[u8; HALA_VERTEX_STRIDE]) -> Self {
    bytemuck::cast::<[u8; HALA_VERTEX_STRIDE], HalaVertexRecord>(*src).into()
  }
}

/// Convert vertices into buffer records.
/// param vertices: The vertices.
/// return: The records.
pub fn to_records(vertices: &[HalaVertex]) -> Vec<HalaVertexRecord> {
  vertices.iter().map(HalaVertexRecord::from).collect()
}

/// Encode vertices into an interleaved vertex buffer.
/// param vertices: The vertices.
/// return: The buffer bytes.
pub fn encode_vertices(vertices: &[HalaVertex]) -> Vec<u8> {
  bytemuck::cast_slice(&to_records(vertices)).to_vec()
}

/// Decode an interleaved vertex buffer.
/// The bytes need not be aligned.
/// param bytes: The buffer bytes.
/// return: The vertices.
pub fn decode_vertices(bytes: &[u8]) -> Result<Vec<HalaVertex>, HalaBurnfadeError> {
  if bytes.len() % HALA_VERTEX_STRIDE != 0 {
    return Err(HalaBurnfadeError::new(
      &format!("The vertex buffer size {} is not a multiple of the stride {}.", bytes.len(), HALA_VERTEX_STRIDE),
      None));
  }
  Ok(
    bytes.chunks_exact(HALA_VERTEX_STRIDE)
      .map(|record| bytemuck::pod_read_unaligned::<HalaVertexRecord>(record).into())
      .collect()
  )
}
