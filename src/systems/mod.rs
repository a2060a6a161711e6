//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod frame;
mod window;

pub use frame::{FrameClock, MAX_DT};
pub use window::{TitleStatus, WindowError, WindowSystem};
