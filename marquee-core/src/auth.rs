use async_trait::async_trait;
use marquee_catalog::User;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account already exists: {0}")]
    AlreadyExists(String),

    #[error("no account for {0}")]
    UnknownAccount(String),

    #[error("not signed in")]
    NotSignedIn,

    #[error("auth provider error: {0}")]
    Provider(String),
}

/// Authentication provider seam (hosted auth service behind it).
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn current_user(&self) -> Result<User, AuthError>;

    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn register(&self, email: &str, password: &str, name: &str) -> Result<User, AuthError>;

    async fn logout(&self) -> Result<(), AuthError>;

    async fn reset_password(&self, email: &str) -> Result<(), AuthError>;
}
