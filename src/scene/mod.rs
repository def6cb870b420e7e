pub mod loader;
pub mod vertex;
pub mod bounds;
pub mod cpu;
pub mod gpu;

pub use vertex::{
  HalaVertex,
  HalaVertexRecord,
  HalaVertexAttribute,
  HalaVertexFormat,
  HalaVertexLayout,
  HalaVertexSemantic,
  HalaIndexType,
  HALA_VERTEX_STRIDE,
};
pub use bounds::HalaBounds;
