pub use crate::error::HalaBurnfadeError;
pub use crate::config::HalaBurnfadeConfig;
pub use crate::compute_program::{
  HalaComputeProgramDesc,
  HalaComputeProgram,
};
pub use crate::scene::{
  HalaVertex,
  HalaBounds,
};
pub use crate::scene::cpu::HalaMesh;
pub use crate::scene::gpu::HalaMeshBuffers;
pub use crate::scene::loader::{
  HalaIcosphereDesc,
  HalaIcosphereLoader,
};
pub use crate::burn::{
  HalaBurnParams,
  HalaBurnSettings,
  HalaRestPose,
  HalaBurnDispatcher,
};
