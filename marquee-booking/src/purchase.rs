use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use marquee_catalog::{Cinema, Hall, Movie, PaymentMethod, Ticket, TicketStatus, User};
use marquee_core::events::{AppEvent, EventBus};
use marquee_core::payment::{PaymentAdapter, PaymentError};
use marquee_core::repository::{ClaimError, DocumentStore, SessionRepository};
use tracing::{info, warn};

use crate::seatmap::{SeatMap, SeatMapError, SeatRef};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("no seats selected")]
    EmptySelection,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("session {0} is not open for sale")]
    SessionClosed(String),

    #[error("seat {row}-{seat} was taken by another purchase")]
    SeatConflict { row: u32, seat: u32 },

    #[error(transparent)]
    Layout(#[from] SeatMapError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("persistence failed: {0}")]
    Persistence(String),
}

/// Why one seat of a partially successful purchase was not booked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatFailureReason {
    /// Another purchase claimed the seat between the availability check and
    /// the conditional write; `holder_ticket_id` is the winning ticket.
    Conflict { holder_ticket_id: String },
    Persistence(String),
}

#[derive(Debug, Clone)]
pub struct SeatFailure {
    pub row: u32,
    pub seat: u32,
    pub reason: SeatFailureReason,
}

/// Outcome of a purchase. Booked tickets are committed even when other
/// seats of the same call failed; `failures` names exactly which seats the
/// caller has to reconcile.
#[derive(Debug)]
pub struct PurchaseReceipt {
    pub tickets: Vec<Ticket>,
    /// Sum of the booked tickets' prices.
    pub total_paid: f64,
    /// What the payment provider actually charged: the full selection total.
    /// When seats failed this exceeds `total_paid` and the difference is the
    /// refund owed against `transaction_id`.
    pub amount_charged: f64,
    pub transaction_id: String,
    pub failures: Vec<SeatFailure>,
    /// False when the user's ticket-id index could not be updated. The
    /// index is a convenience denormalization; bookings stay valid.
    pub index_synced: bool,
}

/// Orchestrates seat selection → payment → ticket creation → persistence.
///
/// Writes are issued per seat in ascending (row, seat) order: ticket
/// document first, then the conditional sold-seat claim, so a conflict is
/// detected before any ticket is durably attributed to the session. The
/// user's ticket index is updated last.
pub struct BookingProcess {
    tickets: Arc<dyn DocumentStore<Ticket>>,
    users: Arc<dyn DocumentStore<User>>,
    sessions: Arc<dyn SessionRepository>,
    payments: Arc<dyn PaymentAdapter>,
    bus: EventBus,
}

impl BookingProcess {
    pub fn new(
        tickets: Arc<dyn DocumentStore<Ticket>>,
        users: Arc<dyn DocumentStore<User>>,
        sessions: Arc<dyn SessionRepository>,
        payments: Arc<dyn PaymentAdapter>,
        bus: EventBus,
    ) -> Self {
        Self {
            tickets,
            users,
            sessions,
            payments,
            bus,
        }
    }

    /// Books every seat in `selection` for the session, or reports exactly
    /// what went wrong. No two completed purchases ever claim the same
    /// (session, row, seat): the availability pre-check rejects stale
    /// selections, and the per-seat claim is conditional, so a race lost to
    /// a concurrent purchaser surfaces as a conflict instead of a double
    /// booking.
    pub async fn purchase(
        &self,
        user: &User,
        movie: &Movie,
        cinema: &Cinema,
        hall: &Hall,
        session_id: &str,
        selection: &[SeatRef],
        method: PaymentMethod,
    ) -> Result<PurchaseReceipt, BookingError> {
        if selection.is_empty() {
            return Err(BookingError::EmptySelection);
        }

        let session = self
            .sessions
            .get(session_id)
            .await
            .map_err(|err| BookingError::Persistence(err.to_string()))?;

        if hall.id != session.hall_id {
            return Err(BookingError::Validation(format!(
                "hall {} does not host session {}",
                hall.id, session.id
            )));
        }

        let now = Utc::now();
        if !session.is_active || session.is_past(now) {
            return Err(BookingError::SessionClosed(session.id.clone()));
        }

        // Ascending (row, seat) order; duplicates collapse.
        let ordered: BTreeSet<SeatRef> = selection.iter().copied().collect();

        let map = SeatMap::load(hall, &session)?;
        for sref in &ordered {
            if map.seat_class(sref.row, sref.seat).is_none() {
                return Err(BookingError::Layout(SeatMapError::UnknownSeat {
                    row: sref.row,
                    seat: sref.seat,
                }));
            }
            if map.is_occupied(sref.row, sref.seat) {
                return Err(BookingError::SeatConflict {
                    row: sref.row,
                    seat: sref.seat,
                });
            }
        }

        let mut priced: Vec<(SeatRef, f64)> = Vec::with_capacity(ordered.len());
        for sref in &ordered {
            priced.push((*sref, map.price_for(sref.row, sref.seat, session.price)?));
        }
        let total: f64 = priced.iter().map(|(_, price)| *price).sum();

        let receipt = self.payments.charge(&user.id, total, method).await?;

        let mut booked: Vec<Ticket> = Vec::new();
        let mut failures: Vec<SeatFailure> = Vec::new();

        for (sref, price) in &priced {
            let ticket = Ticket {
                id: Ticket::seat_ticket_id(&session.id, sref.row, sref.seat),
                user_id: user.id.clone(),
                session_id: session.id.clone(),
                movie_id: movie.id.clone(),
                cinema_id: cinema.id.clone(),
                hall_id: session.hall_id.clone(),
                row: sref.row,
                seat: sref.seat,
                price: *price,
                purchase_date: now,
                session_date: session.date,
                status: TicketStatus::Active,
                payment_id: Some(receipt.transaction_id.clone()),
                payment_method: method,
            };

            let ticket = match self.write_ticket(ticket).await {
                Ok(ticket) => ticket,
                Err(reason) => {
                    warn!(
                        session = %session.id,
                        row = sref.row,
                        seat = sref.seat,
                        ?reason,
                        "ticket write failed"
                    );
                    failures.push(SeatFailure {
                        row: sref.row,
                        seat: sref.seat,
                        reason,
                    });
                    continue;
                }
            };

            match self
                .sessions
                .claim_seat(&session.id, sref.row, sref.seat, &ticket.id)
                .await
            {
                Ok(()) => booked.push(ticket),
                Err(ClaimError::SeatTaken { ticket_id, .. }) => {
                    // Lost the race. Void the just-written ticket so the
                    // seat has no ambiguous second live ticket.
                    self.void_ticket(ticket).await;
                    failures.push(SeatFailure {
                        row: sref.row,
                        seat: sref.seat,
                        reason: SeatFailureReason::Conflict {
                            holder_ticket_id: ticket_id,
                        },
                    });
                }
                Err(ClaimError::Store(err)) => {
                    warn!(
                        session = %session.id,
                        row = sref.row,
                        seat = sref.seat,
                        %err,
                        "seat claim failed"
                    );
                    failures.push(SeatFailure {
                        row: sref.row,
                        seat: sref.seat,
                        reason: SeatFailureReason::Persistence(err.to_string()),
                    });
                }
            }
        }

        if booked.is_empty() {
            let err = failures
                .into_iter()
                .next()
                .map(|failure| match failure.reason {
                    SeatFailureReason::Conflict { .. } => BookingError::SeatConflict {
                        row: failure.row,
                        seat: failure.seat,
                    },
                    SeatFailureReason::Persistence(msg) => BookingError::Persistence(msg),
                })
                .unwrap_or_else(|| BookingError::Persistence("no seats were booked".into()));
            return Err(err);
        }

        let index_synced = self.append_ticket_index(user, &booked).await;

        for ticket in &booked {
            self.bus.publish(AppEvent::TicketPurchased(ticket.clone()));
        }

        info!(
            session = %session.id,
            user = %user.id,
            booked = booked.len(),
            failed = failures.len(),
            total,
            "purchase completed"
        );

        let total_paid = booked.iter().map(|t| t.price).sum();
        Ok(PurchaseReceipt {
            tickets: booked,
            total_paid,
            amount_charged: receipt.amount,
            transaction_id: receipt.transaction_id,
            failures,
            index_synced,
        })
    }

    /// Writes a ticket under its seat-derived id. A cancelled or expired
    /// ticket from an earlier booking may still hold that id; its seat was
    /// already released, so the slot is taken over. A live ticket at the id
    /// means another purchase holds the seat, which is a conflict the caller
    /// resolves by re-deriving the seat map.
    async fn write_ticket(&self, ticket: Ticket) -> Result<Ticket, SeatFailureReason> {
        let first_try = match self.tickets.add(ticket.clone()).await {
            Ok(ticket) => return Ok(ticket),
            Err(err) => err,
        };

        match self.tickets.get_by_id(&ticket.id).await {
            Ok(Some(existing)) => {
                if matches!(existing.status, TicketStatus::Active | TicketStatus::Used) {
                    return Err(SeatFailureReason::Conflict {
                        holder_ticket_id: existing.id,
                    });
                }
                let id = ticket.id.clone();
                self.tickets
                    .update(&id, ticket)
                    .await
                    .map_err(|err| SeatFailureReason::Persistence(err.to_string()))
            }
            Ok(None) => Err(SeatFailureReason::Persistence(first_try.to_string())),
            Err(err) => Err(SeatFailureReason::Persistence(err.to_string())),
        }
    }

    /// Best-effort cancellation of a ticket whose seat claim lost the race.
    async fn void_ticket(&self, mut ticket: Ticket) {
        ticket.status = TicketStatus::Cancelled;
        let id = ticket.id.clone();
        if let Err(err) = self.tickets.update(&id, ticket).await {
            warn!(ticket = %id, %err, "could not void conflicted ticket");
        }
    }

    /// Appends the booked ticket ids to the user's index. Low-contention,
    /// single-owner data, so plain read-modify-write is enough here.
    async fn append_ticket_index(&self, user: &User, booked: &[Ticket]) -> bool {
        let stored = match self.users.get_by_id(&user.id).await {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                warn!(user = %user.id, "user missing from store, ticket index not updated");
                return false;
            }
            Err(err) => {
                warn!(user = %user.id, %err, "ticket index read failed");
                return false;
            }
        };

        let mut updated = stored;
        updated
            .ticket_ids
            .extend(booked.iter().map(|t| t.id.clone()));
        let id = updated.id.clone();
        match self.users.update(&id, updated).await {
            Ok(updated) => {
                self.bus.publish(AppEvent::UserUpdated(updated));
                true
            }
            Err(err) => {
                warn!(user = %user.id, %err, "ticket index update failed");
                false
            }
        }
    }
}
