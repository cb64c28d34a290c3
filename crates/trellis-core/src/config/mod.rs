//! Engine configuration (`trellis.toml`)

pub mod consts;
mod model;

pub use model::{Config, EngineConfig};
