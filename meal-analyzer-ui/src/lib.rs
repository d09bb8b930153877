//! Healthy Meal Analyzer Web Client
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//!
//! # Pages
//!
//! - `/` Home
//! - `/upload` Upload a meal photo for analysis
//! - `/history` Meal history for the current user
//!
//! A persistent header and footer wrap the routed region; see [`app::App`]
//! and the route table in [`routes`].

pub mod api;
pub mod app;
pub mod components;
pub mod pages;
pub mod routes;
pub mod state;

pub use app::App;
