pub mod assembly;
pub mod creation;
pub mod transform;

mod context;

pub use context::BuildContext;
