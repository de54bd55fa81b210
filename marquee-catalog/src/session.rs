use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Screening format of a session. Unknown tags decode as `TwoD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MovieFormat {
    TwoD,
    ThreeD,
    Imax,
    FourDx,
    ScreenX,
    DolbyAtmos,
}

impl MovieFormat {
    fn from_tag(raw: &str) -> Self {
        match raw {
            "2d" => Self::TwoD,
            "3d" => Self::ThreeD,
            "imax" => Self::Imax,
            "4dx" => Self::FourDx,
            "screen_x" => Self::ScreenX,
            "dolby_atmos" => Self::DolbyAtmos,
            _ => Self::TwoD,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Self::TwoD => "2d",
            Self::ThreeD => "3d",
            Self::Imax => "imax",
            Self::FourDx => "4dx",
            Self::ScreenX => "screen_x",
            Self::DolbyAtmos => "dolby_atmos",
        }
    }
}

impl From<String> for MovieFormat {
    fn from(raw: String) -> Self {
        Self::from_tag(&raw)
    }
}

impl From<MovieFormat> for String {
    fn from(format: MovieFormat) -> Self {
        format.as_tag().to_string()
    }
}

/// A (row, seat) pair bound to the ticket that claimed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoldSeat {
    pub row: u32,
    pub seat: u32,
    pub ticket_id: String,
}

impl SoldSeat {
    /// Whether this entry claims the given coordinates, regardless of holder.
    pub fn covers(&self, row: u32, seat: u32) -> bool {
        self.row == row && self.seat == seat
    }
}

/// A scheduled screening of a movie in a specific hall at a specific time.
///
/// `sold_seats` is the authoritative occupancy record for the session; no
/// two entries may share a (row, seat) pair. It is mutated only by the
/// booking flow (append on purchase, remove on cancellation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub movie_id: String,
    pub cinema_id: String,
    pub hall_id: String,
    pub date: DateTime<Utc>,
    pub price: f64,
    pub format: MovieFormat,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sold_seats: Vec<SoldSeat>,
}

fn default_active() -> bool {
    true
}

impl Session {
    pub fn is_seat_sold(&self, row: u32, seat: u32) -> bool {
        self.sold_seats.iter().any(|s| s.covers(row, seat))
    }

    /// Appends a sold-seat entry. No-op when the seat is already claimed;
    /// callers that need to detect the conflict go through the session
    /// repository's conditional claim instead.
    pub fn add_sold_seat(&mut self, row: u32, seat: u32, ticket_id: &str) {
        if !self.is_seat_sold(row, seat) {
            self.sold_seats.push(SoldSeat {
                row,
                seat,
                ticket_id: ticket_id.to_string(),
            });
        }
    }

    pub fn remove_sold_seat(&mut self, row: u32, seat: u32) {
        self.sold_seats.retain(|s| !s.covers(row, seat));
    }

    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.date < now
    }
}
