use serde::{Deserialize, Serialize};

use crate::hall::Hall;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Catalog record for a cinema and its halls. Managed externally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cinema {
    pub id: String,
    pub name: String,
    pub address: String,
    pub description: String,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    pub location: GeoPoint,
    pub rating: f64,
    #[serde(default)]
    pub halls: Vec<Hall>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub contact_phone: String,
    pub contact_email: String,
}

impl Cinema {
    pub fn hall(&self, hall_id: &str) -> Option<&Hall> {
        self.halls.iter().find(|h| h.id == hall_id)
    }
}
