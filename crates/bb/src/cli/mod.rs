//! Terminal rendering: color quantization, escape-aware layout, timestamps.

pub mod color;
pub mod render;
