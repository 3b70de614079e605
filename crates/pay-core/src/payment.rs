//! # Payment Records
//!
//! `Payment` and `PaymentMethod` as the host commerce system stores them.
//! The gateway only touches state, remote ids and the authorization window.

use crate::details::PaymentDetails;
use crate::error::{PaymentError, PaymentResult};
use crate::money::Price;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Days a completed payment stays authorized
pub const AUTHORIZATION_WINDOW_DAYS: i64 = 29;

/// Single or recurring payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Single,
    Subscription,
}

impl PaymentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentType::Single => "single",
            PaymentType::Subscription => "subscription",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PaymentType::Single => "Single Payment",
            PaymentType::Subscription => "Recurring Payment",
        }
    }
}

/// Allowed payment types and their labels
pub const PAYMENT_TYPE_LABELS: [(PaymentType, &str); 2] = [
    (PaymentType::Single, PaymentType::Single.label()),
    (PaymentType::Subscription, PaymentType::Subscription.label()),
];

impl FromStr for PaymentType {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(PaymentType::Single),
            "subscription" => Ok(PaymentType::Subscription),
            other => Err(PaymentError::InvalidPaymentType {
                given: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    New,
    Pending,
    Completed,
    Failed,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::New => "new",
            PaymentState::Pending => "pending",
            PaymentState::Completed => "completed",
            PaymentState::Failed => "failed",
        }
    }

    /// States only move forward; completed and failed are terminal
    pub fn can_transition_to(&self, next: PaymentState) -> bool {
        matches!(
            (self, next),
            (PaymentState::New, PaymentState::Pending)
                | (PaymentState::New, PaymentState::Completed)
                | (PaymentState::New, PaymentState::Failed)
                | (PaymentState::Pending, PaymentState::Completed)
                | (PaymentState::Pending, PaymentState::Failed)
        )
    }
}

impl Default for PaymentState {
    fn default() -> Self {
        PaymentState::New
    }
}

impl std::fmt::Display for PaymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monetary transaction against an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,

    pub order_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,

    pub amount: Price,

    #[serde(default)]
    pub state: PaymentState,

    /// Provider token or payment/agreement id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorized_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Create a new payment in state `new`
    pub fn new(order_id: impl Into<String>, amount: Price) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.into(),
            payment_method_id: None,
            amount,
            state: PaymentState::New,
            remote_id: None,
            authorized_at: None,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    /// Builder: attach the payment method
    pub fn with_payment_method(mut self, payment_method_id: impl Into<String>) -> Self {
        self.payment_method_id = Some(payment_method_id.into());
        self
    }

    pub fn assert_state(&self, allowed: &[PaymentState]) -> PaymentResult<()> {
        if allowed.contains(&self.state) {
            return Ok(());
        }
        Err(PaymentError::InvalidState {
            payment_id: self.id.clone(),
            expected: allowed
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            actual: self.state.to_string(),
        })
    }

    pub fn transition_to(&mut self, next: PaymentState) -> PaymentResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(PaymentError::InvalidState {
                payment_id: self.id.clone(),
                expected: format!("a state preceding {}", next),
                actual: self.state.to_string(),
            });
        }
        self.state = next;
        Ok(())
    }

    /// Mark the payment completed at `now` with the provider's final id
    pub fn complete(&mut self, remote_id: impl Into<String>, now: DateTime<Utc>) -> PaymentResult<()> {
        self.transition_to(PaymentState::Completed)?;
        self.remote_id = Some(remote_id.into());
        self.authorized_at = Some(now);
        self.expires_at = Some(now + Duration::days(AUTHORIZATION_WINDOW_DAYS));
        Ok(())
    }
}

/// A payer's chosen method, created at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,

    /// Method type id (e.g. `paypal_ec`)
    pub method_type: String,

    pub reusable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,

    /// Staged widget payload; lives for one request and is never stored
    #[serde(skip)]
    pub payment_details: Option<PaymentDetails>,

    pub created_at: DateTime<Utc>,
}

impl PaymentMethod {
    pub fn new(method_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            method_type: method_type.into(),
            reusable: true,
            payment_type: None,
            remote_id: None,
            payment_details: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use chrono::TimeZone;

    #[test]
    fn test_payment_type_parse() {
        assert_eq!("single".parse::<PaymentType>().unwrap(), PaymentType::Single);
        assert_eq!(
            "subscription".parse::<PaymentType>().unwrap(),
            PaymentType::Subscription
        );
        assert!("recurring".parse::<PaymentType>().is_err());
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(PAYMENT_TYPE_LABELS.len(), 2);
        assert_eq!(PAYMENT_TYPE_LABELS[0], (PaymentType::Single, "Single Payment"));
        assert_eq!(PaymentType::Subscription.label(), "Recurring Payment");
    }

    #[test]
    fn test_states_only_move_forward() {
        assert!(PaymentState::New.can_transition_to(PaymentState::Completed));
        assert!(PaymentState::Pending.can_transition_to(PaymentState::Failed));
        assert!(!PaymentState::Completed.can_transition_to(PaymentState::New));
        assert!(!PaymentState::Failed.can_transition_to(PaymentState::Completed));
        assert!(!PaymentState::New.can_transition_to(PaymentState::New));
    }

    #[test]
    fn test_assert_state() {
        let payment = Payment::new("order-1", Price::from_cents(1000, Currency::USD));
        assert!(payment.assert_state(&[PaymentState::New]).is_ok());

        let err = payment.assert_state(&[PaymentState::Completed]).unwrap_err();
        assert!(matches!(err, PaymentError::InvalidState { .. }));
    }

    #[test]
    fn test_complete_sets_authorization_window() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap();
        let mut payment = Payment::new("order-1", Price::from_cents(1000, Currency::USD));

        payment.complete("PAY-123", now).unwrap();

        assert_eq!(payment.state, PaymentState::Completed);
        assert_eq!(payment.remote_id.as_deref(), Some("PAY-123"));
        assert_eq!(payment.authorized_at, Some(now));
        assert_eq!(payment.expires_at, Some(now + Duration::days(29)));

        assert!(payment.complete("PAY-456", now).is_err());
    }

    #[test]
    fn test_payment_details_are_not_serialized() {
        let mut method = PaymentMethod::new("paypal_ec");
        method.payment_type = Some(PaymentType::Single);
        method.payment_details = Some(PaymentDetails::Single(Default::default()));

        let value = serde_json::to_value(&method).unwrap();
        assert!(value.get("payment_details").is_none());
        assert_eq!(value["payment_type"], "single");
    }
}
