use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account profile. `ticket_ids` is a convenience index; the session's
/// sold seats plus ticket existence are authoritative for bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub registration_date: DateTime<Utc>,
    #[serde(default)]
    pub favorite_movies: Vec<String>,
    #[serde(default)]
    pub favorite_cinemas: Vec<String>,
    #[serde(default)]
    pub ticket_ids: Vec<String>,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            phone_number: None,
            avatar_url: None,
            registration_date: Utc::now(),
            favorite_movies: Vec::new(),
            favorite_cinemas: Vec::new(),
            ticket_ids: Vec::new(),
        }
    }
}
