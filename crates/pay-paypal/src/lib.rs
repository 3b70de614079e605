//! # pay-paypal
//!
//! PayPal Express Checkout gateway.
//!
//! ## Supported Flows
//!
//! - **Single payments**: a REST payment resource, executed after the buyer
//!   approves it in PayPal's popup
//! - **Subscriptions**: a billing plan activated on creation, plus a billing
//!   agreement executed after approval
//!
//! ## Configuration
//!
//! Set environment variables:
//! - `PAYPAL_CLIENT_ID`: REST app client ID
//! - `PAYPAL_CLIENT_SECRET`: REST app secret
//! - `PAYPAL_MODE`: `live` or `sandbox` (default)
//! - `PAYPAL_RECURRING_START_DATE`: `0` for an immediate start, `1`-`31` for a day of month
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_paypal::{PayPalConfig, PayPalExpressCheckout};
//! use pay_core::{CheckoutUrls, InMemoryPaymentStore};
//! use std::sync::Arc;
//!
//! let gateway = PayPalExpressCheckout::with_paypal_client(
//!     PayPalConfig::from_env()?,
//!     Arc::new(InMemoryPaymentStore::new()),
//!     CheckoutUrls::new("https://shop.example.com"),
//! );
//! ```

mod client;
mod config;
mod gateway;
mod method_type;
mod types;

pub use client::PayPalClient;
pub use config::{Mode, PayPalConfig};
pub use gateway::{PayPalExpressCheckout, GATEWAY_ID, GATEWAY_LABEL};
pub use method_type::{PayPalMethodType, METHOD_TYPE_ID, METHOD_TYPE_LABEL};
