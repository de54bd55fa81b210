pub mod auth;
pub mod blob;
pub mod events;
pub mod payment;
pub mod repository;

pub use auth::{AuthError, AuthProvider};
pub use blob::{BlobError, BlobStore};
pub use events::{AppEvent, EventBus};
pub use payment::{PaymentAdapter, PaymentError, PaymentReceipt};
pub use repository::{ClaimError, Document, DocumentStore, SessionRepository, StoreError};
