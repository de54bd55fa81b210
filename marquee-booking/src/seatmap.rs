use std::collections::{BTreeMap, BTreeSet};

use marquee_catalog::{Hall, SeatClass, Session};
use tracing::warn;

use crate::pricing;

/// Coordinates of one seat. Ordering is row-major, which fixes the
/// processing order of multi-seat purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeatRef {
    pub row: u32,
    pub seat: u32,
}

impl SeatRef {
    pub fn new(row: u32, seat: u32) -> Self {
        Self { row, seat }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeatMapError {
    #[error("invalid hall layout: {0}")]
    InvalidLayout(String),

    #[error("seat {row}-{seat} is already taken")]
    SeatUnavailable { row: u32, seat: u32 },

    #[error("hall has no seat {row}-{seat}")]
    UnknownSeat { row: u32, seat: u32 },
}

/// In-memory occupancy and pricing view over one hall for one session,
/// plus the user's transient seat selection. Pure state, no I/O.
#[derive(Debug, Clone)]
pub struct SeatMap {
    seats: BTreeMap<SeatRef, SeatClass>,
    occupied: BTreeSet<SeatRef>,
    selection: BTreeSet<SeatRef>,
}

impl SeatMap {
    /// Builds the grid from the hall definition and marks every seat in the
    /// session's sold-seat set as occupied.
    pub fn load(hall: &Hall, session: &Session) -> Result<Self, SeatMapError> {
        if hall.rows.is_empty() {
            return Err(SeatMapError::InvalidLayout(format!(
                "hall {} has no rows",
                hall.id
            )));
        }

        let mut seats = BTreeMap::new();
        for row in &hall.rows {
            for seat in &row.seats {
                let sref = SeatRef::new(row.row_number, seat.seat_number);
                if seats.insert(sref, seat.class).is_some() {
                    return Err(SeatMapError::InvalidLayout(format!(
                        "duplicate seat {}-{} in hall {}",
                        sref.row, sref.seat, hall.id
                    )));
                }
            }
        }

        let mut occupied = BTreeSet::new();
        for sold in &session.sold_seats {
            let sref = SeatRef::new(sold.row, sold.seat);
            if seats.contains_key(&sref) {
                occupied.insert(sref);
            } else {
                // Stale or corrupt sold-seat entry; it cannot collide with
                // any selectable seat, so it is skipped rather than fatal.
                warn!(
                    session = %session.id,
                    row = sold.row,
                    seat = sold.seat,
                    "sold seat outside hall grid"
                );
            }
        }

        Ok(Self {
            seats,
            occupied,
            selection: BTreeSet::new(),
        })
    }

    /// Flips membership of the seat in the current selection. Toggling an
    /// occupied seat leaves the selection unchanged and reports
    /// `SeatUnavailable`; that is a recoverable signal, not a fatal error.
    pub fn toggle(&mut self, row: u32, seat: u32) -> Result<(), SeatMapError> {
        let sref = SeatRef::new(row, seat);
        if !self.seats.contains_key(&sref) {
            return Err(SeatMapError::UnknownSeat { row, seat });
        }
        if self.occupied.contains(&sref) {
            return Err(SeatMapError::SeatUnavailable { row, seat });
        }
        if !self.selection.remove(&sref) {
            self.selection.insert(sref);
        }
        Ok(())
    }

    pub fn seat_class(&self, row: u32, seat: u32) -> Option<SeatClass> {
        self.seats.get(&SeatRef::new(row, seat)).copied()
    }

    /// Price of one seat at the given base price.
    pub fn price_for(&self, row: u32, seat: u32, base_price: f64) -> Result<f64, SeatMapError> {
        self.seat_class(row, seat)
            .map(|class| pricing::seat_price(class, base_price))
            .ok_or(SeatMapError::UnknownSeat { row, seat })
    }

    pub fn is_occupied(&self, row: u32, seat: u32) -> bool {
        self.occupied.contains(&SeatRef::new(row, seat))
    }

    pub fn is_selected(&self, row: u32, seat: u32) -> bool {
        self.selection.contains(&SeatRef::new(row, seat))
    }

    pub fn is_sold_out(&self) -> bool {
        self.occupied.len() == self.seats.len()
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    pub fn selection(&self) -> &BTreeSet<SeatRef> {
        &self.selection
    }

    /// Selection in ascending (row, seat) order.
    pub fn selection_ordered(&self) -> Vec<SeatRef> {
        self.selection.iter().copied().collect()
    }

    /// Total price of the current selection.
    pub fn total_price(&self, base_price: f64) -> f64 {
        self.selection
            .iter()
            .filter_map(|sref| self.seats.get(sref))
            .map(|class| pricing::seat_price(*class, base_price))
            .sum()
    }
}
