//! zmk-build - local containerized builds for a ZMK keyboard config
//!
//! Reads the `build.yaml` matrix of a ZMK config repository, lets the user
//! pick a board/shield target, runs `west build` inside the ZMK build image
//! and copies the resulting `.uf2` to a predictable location.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Build matrix, selection, command construction
//! - [`infra`] - Infrastructure layer (filesystem, container runtime)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
