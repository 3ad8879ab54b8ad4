// Read-only views over a product snapshot
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    models::{Feedback, Product},
    Error, Result,
};

/// Each brand once, in order of first appearance
pub fn distinct_brands(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut brands = Vec::new();
    for product in products {
        if seen.insert(product.brand.as_str()) {
            brands.push(product.brand.clone());
        }
    }
    brands
}

/// Products of one brand in their original order, or everything for `None`
pub fn filter_by_brand<'a>(products: &'a [Product], brand: Option<&str>) -> Vec<&'a Product> {
    match brand {
        Some(brand) => products.iter().filter(|p| p.brand == brand).collect(),
        None => products.iter().collect(),
    }
}

/// Drop products that are free or have a negative price
pub fn filter_positive_price(products: Vec<Product>) -> Vec<Product> {
    let total = products.len();
    let kept: Vec<Product> = products.into_iter().filter(|p| p.price > 0.0).collect();

    if kept.len() < total {
        debug!("Hid {} products without a positive price", total - kept.len());
    }
    kept
}

pub fn find_product<'a>(products: &'a [Product], id: &str) -> Result<&'a Product> {
    products
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| Error::ProductNotFound(id.to_string()))
}

/// Feedback count for each star value 1 to 5
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingHistogram {
    counts: [usize; 5],
}

impl RatingHistogram {
    /// Count for one star value; zero for anything outside 1..=5
    pub fn get(&self, rating: u8) -> usize {
        match rating {
            1..=5 => self.counts[usize::from(rating - 1)],
            _ => 0,
        }
    }

    /// `(rating, count)` from one star up
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        (1..=5u8).map(move |r| (r, self.get(r)))
    }

    /// `(rating, count)` from five stars down, as the details view lists them
    pub fn iter_descending(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        (1..=5u8).rev().map(move |r| (r, self.get(r)))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    fn record(&mut self, rating: u8) -> bool {
        match rating {
            1..=5 => {
                self.counts[usize::from(rating - 1)] += 1;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackAggregate {
    /// Mean rating, exactly 0 when there is no feedback
    pub average_rating: f64,
    pub histogram: RatingHistogram,
    pub count: usize,
}

pub fn feedback_aggregate(feedbacks: &[Feedback]) -> FeedbackAggregate {
    let count = feedbacks.len();
    let mut histogram = RatingHistogram::default();
    let mut sum = 0u64;

    for feedback in feedbacks {
        sum += u64::from(feedback.rating);
        if !histogram.record(feedback.rating) {
            debug!("Rating {} outside 1..=5 left out of histogram", feedback.rating);
        }
    }

    let average_rating = if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    };

    FeedbackAggregate {
        average_rating,
        histogram,
        count,
    }
}

/// Brand chip selection. Toggling the selected brand clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandFilter {
    selected: Option<String>,
}

impl BrandFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brand(brand: impl Into<String>) -> Self {
        Self {
            selected: Some(brand.into()),
        }
    }

    pub fn toggle(&mut self, brand: &str) {
        if self.selected.as_deref() == Some(brand) {
            self.selected = None;
        } else {
            self.selected = Some(brand.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        filter_by_brand(products, self.selected())
    }
}
