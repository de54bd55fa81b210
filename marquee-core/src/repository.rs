use async_trait::async_trait;
use marquee_catalog::{Cinema, Movie, Review, Session, Ticket, User};
use serde_json::Value;
use tokio::sync::broadcast;

/// Store-boundary failures. `NotFound` is distinguishable from genuine
/// backend trouble so callers can treat the two differently.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// A document with a stable string identity, as the hosted store keys it.
pub trait Document: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! impl_document {
    ($($ty:ty),+) => {
        $(impl Document for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        })+
    };
}

impl_document!(Cinema, Movie, Review, Session, Ticket, User);

/// Generic CRUD + listen surface of the remote document store, one
/// collection per document type.
#[async_trait]
pub trait DocumentStore<T: Document>: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Option<T>, StoreError>;

    async fn get_all(&self) -> Result<Vec<T>, StoreError>;

    /// Inserts a new document. An item with an empty id gets one assigned;
    /// an id that already exists is a backend error, never an overwrite.
    async fn add(&self, item: T) -> Result<T, StoreError>;

    async fn update(&self, id: &str, item: T) -> Result<T, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Documents whose serialized `field` equals `value`.
    async fn query(&self, field: &str, value: Value) -> Result<Vec<T>, StoreError>;

    /// Live updates for one document: `Some` on write, `None` on delete.
    /// Delivery starts from the next write after subscribing.
    async fn observe(&self, id: &str) -> Result<broadcast::Receiver<Option<T>>, StoreError>;
}

/// Conditional-claim failures on a session's sold-seat set.
#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    #[error("seat {row}-{seat} is already claimed by ticket {ticket_id}")]
    SeatTaken { row: u32, seat: u32, ticket_id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Access to sessions, with compare-and-append semantics on the sold-seat
/// set. The sold seats are the single resource contended by concurrent
/// purchasers; plain read-modify-write would allow lost-update double
/// booking, so claims are conditional on the (row, seat) pair being free.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn get(&self, id: &str) -> Result<Session, StoreError>;

    /// Appends a sold-seat entry iff (row, seat) is currently unclaimed.
    async fn claim_seat(
        &self,
        session_id: &str,
        row: u32,
        seat: u32,
        ticket_id: &str,
    ) -> Result<(), ClaimError>;

    /// Removes the sold-seat entry for (row, seat). Releasing a seat that
    /// is not claimed is a no-op.
    async fn release_seat(&self, session_id: &str, row: u32, seat: u32)
        -> Result<(), StoreError>;
}
