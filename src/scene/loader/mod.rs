pub mod icosphere_loader;

pub use icosphere_loader::{
  HalaIcosphereDesc,
  HalaIcosphereLoader,
  MAX_SUBDIVISIONS,
};
