use serde_json::json;

use crate::{
    analysis::{Category, NonFoodInfo},
    line::Message,
};

pub fn category_color(category: Category) -> &'static str {
    match category {
        Category::Face => "#FF6B6B",
        Category::Animal => "#4ECDC4",
        Category::Landscape => "#45B7D1",
        Category::Object => "#96CEB4",
        Category::Other => "#FFD93D",
    }
}

pub fn format_non_food_reply(info: &NonFoodInfo) -> Message {
    let title = format!("{} {}", info.emoji, info.subcategory);
    let bubble = json!({
        "type": "bubble",
        "header": {
            "type": "box",
            "layout": "vertical",
            "backgroundColor": category_color(info.category),
            "contents": [{
                "type": "text", "text": title, "weight": "bold", "size": "lg",
                "color": "#FFFFFF", "wrap": true
            }]
        },
        "body": {
            "type": "box",
            "layout": "vertical",
            "contents": [{ "type": "text", "text": info.message, "wrap": true, "size": "md" }]
        }
    });
    Message::flex(title, bubble)
}
