//! Rendering module for writing records and layouts as JSON.

mod json;

pub use json::{to_json, JsonFormat};
