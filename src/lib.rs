pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod material;
pub mod math;
pub mod operations;
pub mod progress;
pub mod scene;
pub mod tessellation;

pub use error::{CableError, Result};
