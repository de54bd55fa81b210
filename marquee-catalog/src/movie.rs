use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::MovieFormat;

/// Catalog record for a movie. Managed externally; the booking core only
/// reads it to stamp ids onto tickets and events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub original_title: Option<String>,
    pub year: i32,
    pub duration_minutes: u32,
    #[serde(default)]
    pub genres: Vec<String>,
    pub description: String,
    pub poster_url: String,
    pub backdrop_url: Option<String>,
    pub director: String,
    #[serde(default)]
    pub cast: Vec<String>,
    pub rating: f64,
    pub age_restriction: String,
    pub release_date: DateTime<Utc>,
    pub language: String,
    #[serde(default)]
    pub formats: Vec<MovieFormat>,
}
