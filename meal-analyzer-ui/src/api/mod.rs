//! API Access
//!
//! HTTP calls to the meal analyzer backend.

pub mod client;

pub use client::*;
