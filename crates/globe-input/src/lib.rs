//! Pointer input: raw cursor coordinates mapped to normalized device axes.

pub mod pointer;

pub use pointer::{PointerState, normalize_pointer};
