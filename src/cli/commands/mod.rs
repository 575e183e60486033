//! CLI command implementations
//!
//! Each mode of the tool is implemented in its own submodule.

pub mod build;
pub mod layers;
pub mod list;
