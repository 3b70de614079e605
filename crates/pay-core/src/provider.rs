//! # Provider Client
//!
//! The remote half of the two-phase express checkout protocol.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   ProviderClient (trait)                     │
//! │  ├── create_single_payment()        phase 1, single          │
//! │  ├── create_subscription_payment()  phase 1, plan+agreement  │
//! │  ├── execute_single_payment()       phase 2, single          │
//! │  └── execute_subscription_payment() phase 2, agreement       │
//! └──────────────────────────────────────────────────────────────┘
//!                              ▲
//!                     ┌────────┴────────┐
//!                     │  PayPalClient   │
//!                     │ (REST v1, OAuth)│
//!                     └─────────────────┘
//! ```
//!
//! Every failure is an `Err`: an empty token, a non-2xx response and a remote
//! state other than the expected one alike.

use crate::details::{SinglePaymentRequest, SubscriptionPaymentRequest};
use crate::error::PaymentResult;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Create a payment resource and return its id, which doubles as the
    /// checkout token for the buyer's approval popup.
    async fn create_single_payment(&self, payment: &SinglePaymentRequest) -> PaymentResult<String>;

    /// Create and activate a billing plan, create an agreement on it, and
    /// return the approval token of the agreement.
    async fn create_subscription_payment(
        &self,
        subscription: &SubscriptionPaymentRequest,
    ) -> PaymentResult<String>;

    /// Execute an approved payment; returns the executed payment's id.
    async fn execute_single_payment(&self, payment_id: &str) -> PaymentResult<String>;

    /// Execute an approved agreement; returns the active agreement's id.
    async fn execute_subscription_payment(&self, agreement_token: &str) -> PaymentResult<String>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str {
        "paypal"
    }
}

/// Type alias for a boxed provider client (dynamic dispatch)
pub type BoxedProviderClient = Arc<dyn ProviderClient>;
