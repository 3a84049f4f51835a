//! Type definitions for codeshot storage.

mod ids;
mod presets;
mod projects;
mod users;

// Re-export all types from submodules
pub use ids::*;
pub use presets::*;
pub use projects::*;
pub use users::*;
