//! Pages
//!
//! Top-level page components for each route.

pub mod home;
pub mod meal_history;
pub mod not_found;
pub mod upload_meal;

pub use home::Home;
pub use meal_history::MealHistory;
pub use not_found::NotFound;
pub use upload_meal::UploadMeal;
