pub mod params;
pub mod noise;
pub mod kernel;
pub mod rest_pose;
pub mod dispatcher;

pub use params::{
  HalaBurnParams,
  HalaBurnSettings,
  HALA_BURN_PARAMS_SIZE,
};
pub use kernel::{
  HalaBurnState,
  HalaBurnSample,
  burn_vertex,
};
pub use rest_pose::HalaRestPose;
pub use dispatcher::HalaBurnDispatcher;
