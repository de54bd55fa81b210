use async_trait::async_trait;
use chrono::{DateTime, Utc};
use marquee_catalog::{PaymentMethod, PaymentStatus};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment declined: {0}")]
    Declined(String),

    #[error("payment provider error: {0}")]
    Provider(String),
}

/// Outcome of a charge, as reported by the provider.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub amount: f64,
    pub currency: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub paid_at: DateTime<Utc>,
}

/// Payment provider seam. One charge covers the whole seat selection.
#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    async fn charge(
        &self,
        user_id: &str,
        amount: f64,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt, PaymentError>;
}

/// Simulated payment gateway: sleeps for the configured delay and then
/// succeeds. Real gateway integration is explicitly out of scope.
pub struct MockPaymentAdapter {
    delay: Duration,
    currency: String,
}

impl MockPaymentAdapter {
    pub fn new(delay: Duration, currency: impl Into<String>) -> Self {
        Self {
            delay,
            currency: currency.into(),
        }
    }

    /// No delay, for tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, "RUB")
    }
}

#[async_trait]
impl PaymentAdapter for MockPaymentAdapter {
    async fn charge(
        &self,
        user_id: &str,
        amount: f64,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt, PaymentError> {
        tokio::time::sleep(self.delay).await;

        // Trigger for exercising decline paths.
        if user_id == "fail-payment" {
            return Err(PaymentError::Declined("card rejected".into()));
        }

        if amount <= 0.0 {
            return Err(PaymentError::Declined(format!(
                "non-positive amount {amount}"
            )));
        }

        Ok(PaymentReceipt {
            transaction_id: format!("mock_tx_{}", Uuid::new_v4().simple()),
            amount,
            currency: self.currency.clone(),
            method,
            status: PaymentStatus::Completed,
            paid_at: Utc::now(),
        })
    }
}
