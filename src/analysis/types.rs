use serde::{Deserialize, Serialize, Serializer};

/// JSON payload pulled out of the classifier's completion text, not yet trusted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawClassification(pub serde_json::Value);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Face,
    Animal,
    Landscape,
    Object,
    Other,
}

impl Category {
    /// Lenient parse; anything unrecognised is `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "face" | "person" | "people" | "human" => Category::Face,
            "animal" | "pet" => Category::Animal,
            "landscape" | "scenery" | "place" => Category::Landscape,
            "object" | "thing" => Category::Object,
            _ => Category::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Face => "face",
            Category::Animal => "animal",
            Category::Landscape => "landscape",
            Category::Object => "object",
            Category::Other => "other",
        }
    }

    pub fn default_emoji(self) -> &'static str {
        match self {
            Category::Face => "😊",
            Category::Animal => "🐾",
            Category::Landscape => "🏞️",
            Category::Object => "📦",
            Category::Other => "❓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodInfo {
    pub name: String,
    pub protein: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub fat: Option<f64>,
    pub sodium: Option<f64>,
    pub calories: Option<f64>,
    pub materials: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonFoodInfo {
    pub category: Category,
    pub subcategory: String,
    pub message: String,
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationResult {
    Food(FoodInfo),
    NonFood(NonFoodInfo),
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    is_food: bool,
    #[serde(flatten)]
    info: &'a T,
}

// Flat wire shape: `{"is_food": true, "name": ...}` / `{"is_food": false, "category": ...}`.
impl Serialize for ClassificationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ClassificationResult::Food(info) => Tagged { is_food: true, info }.serialize(serializer),
            ClassificationResult::NonFood(info) => {
                Tagged { is_food: false, info }.serialize(serializer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_is_lenient() {
        assert_eq!(Category::parse("Animal"), Category::Animal);
        assert_eq!(Category::parse("  landscape "), Category::Landscape);
        assert_eq!(Category::parse("person"), Category::Face);
        assert_eq!(Category::parse("spaceship"), Category::Other);
        assert_eq!(Category::parse(""), Category::Other);
    }

    #[test]
    fn serializes_flat_with_is_food() {
        let food = ClassificationResult::Food(FoodInfo {
            name: "Pad Thai".into(),
            protein: Some(12.0),
            carbohydrate: None,
            fat: Some(15.0),
            sodium: Some(800.0),
            calories: Some(550.0),
            materials: "noodles".into(),
            details: "N/A".into(),
        });
        let v = serde_json::to_value(&food).unwrap();
        assert_eq!(v["is_food"], true);
        assert_eq!(v["name"], "Pad Thai");
        assert!(v["carbohydrate"].is_null());

        let other = ClassificationResult::NonFood(NonFoodInfo {
            category: Category::Animal,
            subcategory: "cat".into(),
            message: "a cat".into(),
            emoji: "🐱".into(),
        });
        let v = serde_json::to_value(&other).unwrap();
        assert_eq!(v["is_food"], false);
        assert_eq!(v["category"], "animal");
        assert_eq!(v["subcategory"], "cat");
    }
}
