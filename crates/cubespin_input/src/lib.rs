//! Pointer input handling
//!
//! This crate turns raw pointer and touch input into cube spin and camera
//! drift, and tracks which scenes are listening for which events.

mod pointer;
mod spin_controller;
mod drift_controller;
mod listeners;

pub use pointer::{PointerPoint, PointerEvent, PointerSource, ViewportSize, TouchPhase, TouchTracker};
pub use spin_controller::{InertialSpinController, SpinSettings, SpinState, WORLD_RIGHT, WORLD_UP};
pub use drift_controller::{CameraDriftController, DriftSettings, DriftState};
pub use listeners::{ListenerGuard, ListenerKind, ListenerRegistry, SceneId};
