//! Input handling module
//!
//! Maps raw window events to key actions and pointer events.

mod input_mapper;
mod pointer_mapper;

pub use input_mapper::{InputMapper, InputAction};
pub use pointer_mapper::{MappedEvent, PointerMapper};
