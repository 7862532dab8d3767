mod dto;
pub mod handlers;
mod repo;
mod repo_types;

pub use handlers::debug_routes;
pub use repo::{MealStore, PgMealStore};
pub use repo_types::{Location, MealRecord, NewMealRecord};
