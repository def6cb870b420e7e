pub mod prelude;
pub mod error;
pub mod config;
pub mod scene;
pub mod burn;
pub mod compute_program;
