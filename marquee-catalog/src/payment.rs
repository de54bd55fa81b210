use serde::{Deserialize, Serialize};

/// How a purchase was paid. Unknown methods decode as `CreditCard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    CreditCard,
    ApplePay,
    PayPal,
    GooglePay,
    BankTransfer,
}

impl PaymentMethod {
    fn from_tag(raw: &str) -> Self {
        match raw {
            "credit_card" => Self::CreditCard,
            "apple_pay" => Self::ApplePay,
            "pay_pal" => Self::PayPal,
            "google_pay" => Self::GooglePay,
            "bank_transfer" => Self::BankTransfer,
            _ => Self::CreditCard,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::ApplePay => "apple_pay",
            Self::PayPal => "pay_pal",
            Self::GooglePay => "google_pay",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(raw: String) -> Self {
        Self::from_tag(&raw)
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.as_tag().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}
