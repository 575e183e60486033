//! Configuration and constants
//!
//! - [`defaults`] - Default values for images, runtimes and paths
//! - [`layout`] - Host and container directory layout

pub mod defaults;
pub mod layout;
