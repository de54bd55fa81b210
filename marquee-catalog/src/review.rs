use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user review of a movie or a cinema (exactly one of the two ids is set).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub movie_id: Option<String>,
    pub cinema_id: Option<String>,
    pub rating: f64,
    pub comment: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}
