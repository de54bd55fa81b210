use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use marquee_catalog::User;
use marquee_core::auth::{AuthError, AuthProvider};
use tracing::info;
use uuid::Uuid;

struct Account {
    password: String,
    user: User,
}

/// In-memory auth provider for tests and local development. Stores
/// plaintext passwords; the hosted provider it stands in for does not.
pub struct InMemoryAuthProvider {
    accounts: Mutex<HashMap<String, Account>>,
    current: Mutex<Option<User>>,
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
        }
    }

    fn lock_accounts(&self) -> std::sync::MutexGuard<'_, HashMap<String, Account>> {
        self.accounts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Option<User>> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn current_user(&self) -> Result<User, AuthError> {
        self.lock_current().clone().ok_or(AuthError::NotSignedIn)
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let accounts = self.lock_accounts();
        let account = accounts
            .get(email)
            .ok_or_else(|| AuthError::UnknownAccount(email.to_string()))?;
        if account.password != password {
            return Err(AuthError::InvalidCredentials);
        }
        let user = account.user.clone();
        drop(accounts);
        *self.lock_current() = Some(user.clone());
        Ok(user)
    }

    async fn register(&self, email: &str, password: &str, name: &str) -> Result<User, AuthError> {
        let mut accounts = self.lock_accounts();
        if accounts.contains_key(email) {
            return Err(AuthError::AlreadyExists(email.to_string()));
        }
        let user = User::new(Uuid::new_v4().to_string(), email, name);
        accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        drop(accounts);
        *self.lock_current() = Some(user.clone());
        info!(user = %user.id, "account registered");
        Ok(user)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        *self.lock_current() = None;
        Ok(())
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        if self.lock_accounts().contains_key(email) {
            Ok(())
        } else {
            Err(AuthError::UnknownAccount(email.to_string()))
        }
    }
}
