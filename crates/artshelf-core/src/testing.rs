// Shared fixtures for unit tests
use crate::models::{Favorite, Feedback, Product};

pub fn product(id: &str, brand: &str, price: f64) -> Product {
    Product {
        id: id.to_string(),
        name: format!("{} {}", brand, id),
        price,
        description: String::new(),
        has_glass_surface: false,
        image_ref: format!("https://img.example/{}.png", id),
        brand: brand.to_string(),
        limited_time_deal: 0.0,
        feedbacks: Vec::new(),
    }
}

pub fn feedback(rating: u8) -> Feedback {
    Feedback {
        rating,
        comment: String::new(),
        author: "tester".to_string(),
        date: "2024-01-01".to_string(),
    }
}

pub fn favorite(id: &str) -> Favorite {
    named_favorite(id, id)
}

pub fn named_favorite(id: &str, name: &str) -> Favorite {
    Favorite {
        id: id.to_string(),
        name: name.to_string(),
        price: 10.0,
        description: String::new(),
        image_ref: String::new(),
        brand: "Arteza".to_string(),
        limited_time_deal: 0.0,
    }
}
