pub mod mesh;

pub use mesh::{
  HalaMeshDescriptor,
  HalaMeshPart,
  HalaMeshBuffers,
  HalaTopology,
};
