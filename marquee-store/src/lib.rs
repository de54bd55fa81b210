pub mod app_config;
pub mod auth;
pub mod memory;

pub use app_config::{BusinessRules, Config};
pub use auth::InMemoryAuthProvider;
pub use memory::{InMemoryBlobStore, InMemorySessionRepository, InMemoryStore};
