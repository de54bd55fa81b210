use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use marquee_catalog::{Ticket, TicketStatus, User};
use marquee_core::events::{AppEvent, EventBus};
use marquee_core::repository::{DocumentStore, SessionRepository};
use tracing::info;

/// Minimum lead time before the session during which cancellation is still
/// permitted.
pub const CANCELLATION_WINDOW_HOURS: i64 = 3;

pub fn cancellation_window() -> Duration {
    Duration::hours(CANCELLATION_WINDOW_HOURS)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("cancellation window closed: less than {CANCELLATION_WINDOW_HOURS} hours to the session")]
    CancellationWindowClosed,

    #[error("ticket is not active (currently {0:?})")]
    InvalidTicketState(TicketStatus),

    #[error("ticket not found: {0}")]
    NotFound(String),

    #[error("persistence failed: {0}")]
    Persistence(String),
}

/// Status as a function of time: an active ticket whose session has started
/// reads as expired. Derived view only; nothing in the store is rewritten
/// by the clock.
pub fn effective_status(ticket: &Ticket, now: DateTime<Utc>) -> TicketStatus {
    match ticket.status {
        TicketStatus::Active if ticket.session_date < now => TicketStatus::Expired,
        status => status,
    }
}

/// Whether the ticket may still be cancelled at `now`.
pub fn can_cancel(ticket: &Ticket, now: DateTime<Utc>) -> bool {
    ticket.status == TicketStatus::Active && ticket.session_date > now + cancellation_window()
}

/// Validates the active → cancelled transition without performing it.
pub fn authorize_cancel(ticket: &Ticket, now: DateTime<Utc>) -> Result<(), LifecycleError> {
    match effective_status(ticket, now) {
        TicketStatus::Active => {
            if ticket.session_date > now + cancellation_window() {
                Ok(())
            } else {
                Err(LifecycleError::CancellationWindowClosed)
            }
        }
        status => Err(LifecycleError::InvalidTicketState(status)),
    }
}

/// Validates the active → used transition (venue scan) without performing it.
pub fn authorize_use(ticket: &Ticket, now: DateTime<Utc>) -> Result<(), LifecycleError> {
    match effective_status(ticket, now) {
        TicketStatus::Active => Ok(()),
        status => Err(LifecycleError::InvalidTicketState(status)),
    }
}

/// Applies lifecycle transitions against the stores.
pub struct TicketDesk {
    tickets: Arc<dyn DocumentStore<Ticket>>,
    sessions: Arc<dyn SessionRepository>,
    bus: EventBus,
}

impl TicketDesk {
    pub fn new(
        tickets: Arc<dyn DocumentStore<Ticket>>,
        sessions: Arc<dyn SessionRepository>,
        bus: EventBus,
    ) -> Self {
        Self {
            tickets,
            sessions,
            bus,
        }
    }

    async fn load(&self, ticket_id: &str) -> Result<Ticket, LifecycleError> {
        match self.tickets.get_by_id(ticket_id).await {
            Ok(Some(ticket)) => Ok(ticket),
            Ok(None) => Err(LifecycleError::NotFound(ticket_id.to_string())),
            Err(err) => Err(LifecycleError::Persistence(err.to_string())),
        }
    }

    /// Cancels an active ticket inside the cancellation window. The ticket
    /// record is kept (status `cancelled`, for refund history) and its
    /// sold-seat entry is removed from the session, freeing the seat for
    /// resale.
    pub async fn cancel(&self, ticket_id: &str) -> Result<Ticket, LifecycleError> {
        let ticket = self.load(ticket_id).await?;
        authorize_cancel(&ticket, Utc::now())?;

        let mut cancelled = ticket;
        cancelled.status = TicketStatus::Cancelled;
        let cancelled = self
            .tickets
            .update(ticket_id, cancelled)
            .await
            .map_err(|err| LifecycleError::Persistence(err.to_string()))?;

        self.sessions
            .release_seat(&cancelled.session_id, cancelled.row, cancelled.seat)
            .await
            .map_err(|err| LifecycleError::Persistence(err.to_string()))?;

        info!(
            ticket = %cancelled.id,
            session = %cancelled.session_id,
            row = cancelled.row,
            seat = cancelled.seat,
            "ticket cancelled"
        );
        self.bus.publish(AppEvent::TicketCancelled(cancelled.clone()));
        Ok(cancelled)
    }

    /// Marks an active ticket as used (venue scan). Terminal; cancellation
    /// is rejected afterwards.
    pub async fn mark_used(&self, ticket_id: &str) -> Result<Ticket, LifecycleError> {
        let ticket = self.load(ticket_id).await?;
        authorize_use(&ticket, Utc::now())?;

        let mut used = ticket;
        used.status = TicketStatus::Used;
        self.tickets
            .update(ticket_id, used)
            .await
            .map_err(|err| LifecycleError::Persistence(err.to_string()))
    }

    /// The user's tickets with time-derived statuses applied.
    pub async fn tickets_for(&self, user: &User) -> Result<Vec<Ticket>, LifecycleError> {
        let now = Utc::now();
        let mut tickets = Vec::with_capacity(user.ticket_ids.len());
        for ticket_id in &user.ticket_ids {
            if let Some(mut ticket) = self
                .tickets
                .get_by_id(ticket_id)
                .await
                .map_err(|err| LifecycleError::Persistence(err.to_string()))?
            {
                ticket.status = effective_status(&ticket, now);
                tickets.push(ticket);
            }
        }
        Ok(tickets)
    }
}
