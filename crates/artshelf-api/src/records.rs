use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Product as the catalog service sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub art_name: String,
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub glass_surface: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    pub brand: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub limited_time_deal: f64,
    /// Older records omit this field or send `null`
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedbacks: Vec<FeedbackRecord>,
}

/// One review inside a product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub rating: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
}

/// Favorite as stored by the catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    pub id: String,
    pub art_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    pub brand: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub limited_time_deal: f64,
}
