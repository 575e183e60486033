//! Core business logic module
//!
//! # Submodules
//!
//! - [`targets`] - Build matrix (build.yaml) parsing and validation
//! - [`select`] - Choosing a build target
//! - [`settings`] - zmk-build.toml and workspace discovery
//! - [`command`] - Container build command construction
//! - [`clean`] - Dependency cache and artifact cleaning
//! - [`artifact`] - Collecting the built firmware image
//! - [`layers`] - Keymap layer table

pub mod artifact;
pub mod clean;
pub mod command;
pub mod layers;
pub mod select;
pub mod settings;
pub mod targets;
