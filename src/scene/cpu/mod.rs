pub mod mesh;

pub use mesh::HalaMesh;
