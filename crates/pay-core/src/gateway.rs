//! # Payment Gateway Contract
//!
//! The lifecycle hooks a host commerce system calls on a payment gateway,
//! and the descriptor a gateway publishes for its payment method type.
//!
//! ```text
//! checkout widget          host                      gateway
//!      │  {type, data}       │                          │
//!      ├────────────────────►│ create_payment_method ──►│ validate, stage details
//!      │                     │ create_payment ─────────►│ build payload, phase 1
//!      │◄──── token ─────────┤                          │
//!      │  (buyer approves)   │                          │
//!      ├────────────────────►│ capture_payment ────────►│ phase 2, complete
//! ```

use crate::error::PaymentResult;
use crate::money::Price;
use crate::order::Order;
use crate::payment::{Payment, PaymentMethod};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Lifecycle hooks of an on-site payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Validate the widget's payment details and prepare the method.
    ///
    /// Nothing is persisted when validation fails.
    async fn create_payment_method(
        &self,
        method: &mut PaymentMethod,
        payment_details: &Value,
    ) -> PaymentResult<()>;

    /// Phase 1: register the payment with the provider.
    ///
    /// With `capture` set this is a no-op; capture happens after the buyer
    /// approves in the provider's popup.
    async fn create_payment(
        &self,
        payment: &mut Payment,
        method: &mut PaymentMethod,
        order: &Order,
        capture: bool,
    ) -> PaymentResult<()>;

    /// Phase 2: finalize an approved payment or agreement.
    async fn capture_payment(
        &self,
        payment: &mut Payment,
        method: &mut PaymentMethod,
        amount: Option<&Price>,
    ) -> PaymentResult<()>;

    async fn delete_payment_method(&self, method: &PaymentMethod) -> PaymentResult<()>;

    /// Not supported by express checkout
    async fn void_payment(&self, _payment: &mut Payment) -> PaymentResult<()> {
        Ok(())
    }

    /// Not supported by express checkout
    async fn refund_payment(
        &self,
        _payment: &mut Payment,
        _amount: Option<&Price>,
    ) -> PaymentResult<()> {
        Ok(())
    }

    /// Not supported by express checkout
    async fn update_payment_method(&self, _method: &mut PaymentMethod) -> PaymentResult<()> {
        Ok(())
    }

    fn gateway_id(&self) -> &'static str;

    fn display_label(&self) -> &'static str;

    /// Method type ids this gateway accepts
    fn payment_method_types(&self) -> &'static [&'static str];
}

/// A stored field declared by a payment method type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Allowed `(value, label)` pairs for list fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<(&'static str, &'static str)>>,
}

/// Schema and display label of a payment method type
pub trait PaymentMethodType: Send + Sync {
    fn id(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn field_definitions(&self) -> Vec<FieldDefinition>;

    /// Label shown to the buyer for a stored method
    fn build_label(&self, method: &PaymentMethod) -> String;
}

/// Return and cancel URLs handed to the provider
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    /// Base URL of the storefront (e.g., "https://shop.example.com")
    pub base_url: String,
    /// Path the buyer returns to after approving
    pub return_path: String,
    /// Path the buyer returns to after cancelling
    pub cancel_path: String,
}

impl CheckoutUrls {
    /// Both URLs default to the base URL itself
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            return_path: "/".to_string(),
            cancel_path: "/".to_string(),
        }
    }

    /// Builder: distinct return/cancel paths
    pub fn with_paths(mut self, return_path: impl Into<String>, cancel_path: impl Into<String>) -> Self {
        self.return_path = return_path.into();
        self.cancel_path = cancel_path.into();
        self
    }

    pub fn return_url(&self) -> String {
        format!("{}{}", self.base_url, self.return_path)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }
}

impl Default for CheckoutUrls {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_urls() {
        let urls = CheckoutUrls::new("https://shop.example.com/");

        assert_eq!(urls.return_url(), "https://shop.example.com/");
        assert_eq!(urls.cancel_url(), "https://shop.example.com/");

        let urls = urls.with_paths("/checkout/paypal/return", "/checkout/paypal/cancel");
        assert_eq!(urls.return_url(), "https://shop.example.com/checkout/paypal/return");
        assert_eq!(urls.cancel_url(), "https://shop.example.com/checkout/paypal/cancel");
    }
}
