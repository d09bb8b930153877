//! Meal Inputs
//!
//! Types describing what a client submits for analysis.

mod image;

pub use image::{media_type_for_extension, ImageError, ImagePayload};
