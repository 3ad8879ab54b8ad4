// Plain-text rendering of catalog views
use std::fmt::Write;

use artshelf_core::models::{format_price, Favorite, Feedback, Product};
use artshelf_core::FeedbackAggregate;

fn deal_badge(percent: Option<u32>) -> String {
    percent.map(|p| format!("  -{}%", p)).unwrap_or_default()
}

/// One row of the product list: favorite marker, id, name, price, deal
pub fn product_line(product: &Product, favorite: bool) -> String {
    format!(
        "{} [{}] {} ({}) {}{}",
        if favorite { "♥" } else { " " },
        product.id,
        product.name,
        product.brand,
        format_price(product.price),
        deal_badge(product.deal_percent()),
    )
}

pub fn favorite_line(favorite: &Favorite) -> String {
    format!(
        "[{}] {} ({}) {}{}",
        favorite.id,
        favorite.name,
        favorite.brand,
        format_price(favorite.price),
        deal_badge(favorite.deal_percent()),
    )
}

fn feedback_date(feedback: &Feedback) -> String {
    feedback
        .parsed_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| feedback.date.clone())
}

/// The details view: product info, rating summary, then each review
pub fn details(product: &Product, aggregate: &FeedbackAggregate) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", product.name);
    let _ = writeln!(
        out,
        "{}{}",
        format_price(product.price),
        deal_badge(product.deal_percent())
    );
    let _ = writeln!(out, "Brand: {}", product.brand);
    if product.has_glass_surface {
        let _ = writeln!(out, "Glass surface: yes");
    }
    let _ = writeln!(out, "Description: {}", product.description);

    let _ = writeln!(out);
    let _ = writeln!(out, "Feedback");
    let _ = writeln!(
        out,
        "Average Rating: {:.1} ⭐ ({} reviews)",
        aggregate.average_rating, aggregate.count
    );

    let rows: Vec<String> = aggregate
        .histogram
        .iter_descending()
        .map(|(rating, count)| format!("{}⭐: {}", rating, count))
        .collect();
    let _ = writeln!(out, "{}", rows.join("  "));

    for feedback in &product.feedbacks {
        let _ = writeln!(
            out,
            "  {} - {}⭐ ({})",
            feedback.author,
            feedback.rating,
            feedback_date(feedback)
        );
        if !feedback.comment.is_empty() {
            let _ = writeln!(out, "    {}", feedback.comment);
        }
    }

    out
}
