mod interpret;
mod types;

pub use interpret::{interpret, NOT_AVAILABLE};
pub use types::{Category, ClassificationResult, FoodInfo, NonFoodInfo, RawClassification};
