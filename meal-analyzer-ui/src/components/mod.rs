//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod feedback_card;
pub mod header;
pub mod loading;
pub mod toast;

pub use feedback_card::FeedbackCard;
pub use header::Header;
pub use loading::{ListSkeleton, Loading};
pub use toast::Toast;
