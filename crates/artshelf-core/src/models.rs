use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub has_glass_surface: bool,
    pub image_ref: String,
    pub brand: String,
    /// Fraction in [0, 1); zero means no deal
    pub limited_time_deal: f64,
    /// Display order is insertion order
    pub feedbacks: Vec<Feedback>,
}

impl Product {
    /// Deal badge percentage, `None` when the product has no deal
    pub fn deal_percent(&self) -> Option<u32> {
        deal_percent(self.limited_time_deal)
    }

    /// The display-relevant projection stored when the product is marked
    pub fn to_favorite(&self) -> Favorite {
        Favorite {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            description: self.description.clone(),
            image_ref: self.image_ref.clone(),
            brand: self.brand.clone(),
            limited_time_deal: self.limited_time_deal,
        }
    }
}

/// One review attached to a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// 1 to 5, validated by the service
    pub rating: u8,
    pub comment: String,
    pub author: String,
    /// Opaque; only parsed for display
    pub date: String,
}

impl Feedback {
    /// Best-effort parse of the date as RFC 3339 or a plain `YYYY-MM-DD`
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.date) {
            return Some(dt.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}

/// A product the user has marked, without its feedbacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image_ref: String,
    pub brand: String,
    pub limited_time_deal: f64,
}

impl Favorite {
    pub fn deal_percent(&self) -> Option<u32> {
        deal_percent(self.limited_time_deal)
    }
}

fn deal_percent(fraction: f64) -> Option<u32> {
    if fraction > 0.0 {
        Some((fraction * 100.0).round() as u32)
    } else {
        None
    }
}

/// Format an amount as US dollars, e.g. `$1,234.50`
pub fn format_price(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
