//! Razer keyboard lighting driver
//!
//! Support code for the `razer-driver` binary: color parsing, image and
//! animation frames for custom matrix mode, and the persisted device
//! selection.

pub mod animation;
pub mod color;
pub mod config;
pub mod picture;
