//! cubespin application library
//!
//! Configuration, window systems and winit input translation for the
//! cubespin viewer. The cube, controllers and scene live in the
//! `cubespin_*` crates.

pub mod config;
pub mod host;
pub mod input;
pub mod systems;
