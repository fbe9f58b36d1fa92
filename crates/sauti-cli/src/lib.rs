//! Library side of the `sauti-grid` binary.

pub mod config;
pub mod logging;
pub mod render;
