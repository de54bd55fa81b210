use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::payment::PaymentMethod;

/// Ticket status. `Active` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Active,
    Used,
    Expired,
    Cancelled,
}

/// One purchased seat for one session.
///
/// The (session_id, row, seat) triple is unique among live tickets; the
/// session's sold-seat invariant enforces it. Cancelled tickets are kept for
/// refund history, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub user_id: String,
    pub session_id: String,
    pub movie_id: String,
    pub cinema_id: String,
    pub hall_id: String,
    pub row: u32,
    pub seat: u32,
    pub price: f64,
    pub purchase_date: DateTime<Utc>,
    pub session_date: DateTime<Utc>,
    pub status: TicketStatus,
    pub payment_id: Option<String>,
    pub payment_method: PaymentMethod,
}

impl Ticket {
    /// Deterministic ticket id for a seat of a session. Keeps ticket ids
    /// stable across retries and makes per-seat diagnostics readable.
    pub fn seat_ticket_id(session_id: &str, row: u32, seat: u32) -> String {
        format!("{session_id}-{row}-{seat}")
    }
}
