//! # pay-core
//!
//! Core types and traits for the PayPal Express Checkout gateway.
//!
//! This crate provides:
//! - `PaymentGateway` and `PaymentMethodType`, the host-facing contracts
//! - `ProviderClient`, the remote-API contract the gateway drives
//! - `Payment`, `PaymentMethod`, `Order` and money types
//! - `PaymentDetails`, the validated checkout-widget payload
//! - `RecurringStart`, the first-billing-date calculator
//! - `PaymentStore` and `Clock`, the host persistence and time seams
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{Order, LineItem, Price, Currency, Payment, PaymentMethod, PaymentGateway};
//!
//! let order = Order::from_items(
//!     Currency::USD,
//!     vec![LineItem::new("Coffee", Price::new(4.50, Currency::USD), 2)],
//! )?;
//!
//! let mut method = PaymentMethod::new("paypal_ec");
//! gateway.create_payment_method(&mut method, &widget_payload).await?;
//!
//! let mut payment = Payment::new(&order.id, order.total()).with_payment_method(&method.id);
//! gateway.create_payment(&mut payment, &mut method, &order, false).await?;
//!
//! // Hand payment.remote_id to the widget, then after approval:
//! gateway.capture_payment(&mut payment, &mut method, None).await?;
//! ```

pub mod clock;
pub mod details;
pub mod error;
pub mod gateway;
pub mod money;
pub mod order;
pub mod payment;
pub mod provider;
pub mod recurring;
pub mod store;

// Re-exports for convenience
pub use clock::{BoxedClock, Clock, FixedClock, SystemClock};
pub use details::{
    BillingAgreement, BillingPlan, Item, ItemList, MerchantPreferences, Payer, PaymentDefinition,
    PaymentDetails, PlanAmount, RedirectUrls, SinglePaymentRequest, SubscriptionPaymentRequest,
    Transaction, TransactionAmount,
};
pub use error::{PaymentError, PaymentResult};
pub use gateway::{CheckoutUrls, FieldDefinition, PaymentGateway, PaymentMethodType};
pub use money::{Currency, Price};
pub use order::{LineItem, Order};
pub use payment::{
    Payment, PaymentMethod, PaymentState, PaymentType, AUTHORIZATION_WINDOW_DAYS,
    PAYMENT_TYPE_LABELS,
};
pub use provider::{BoxedProviderClient, ProviderClient};
pub use recurring::{format_start_date, RecurringStart};
pub use store::{BoxedPaymentStore, InMemoryPaymentStore, PaymentStore};
