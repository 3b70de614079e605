//! # Payment Store
//!
//! The host's persistence layer as the gateway sees it. Production hosts back
//! this with their own database; `InMemoryPaymentStore` serves the bundled
//! HTTP service and tests.

use crate::error::{PaymentError, PaymentResult};
use crate::payment::{Payment, PaymentMethod};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn save_payment(&self, payment: &Payment) -> PaymentResult<()>;

    async fn load_payment(&self, payment_id: &str) -> PaymentResult<Option<Payment>>;

    /// Persist a payment method. Staged payment details are never stored.
    async fn save_payment_method(&self, method: &PaymentMethod) -> PaymentResult<()>;

    async fn load_payment_method(&self, method_id: &str) -> PaymentResult<Option<PaymentMethod>>;

    /// Returns false when no such method existed
    async fn delete_payment_method(&self, method_id: &str) -> PaymentResult<bool>;
}

/// Type alias for a shared store (dynamic dispatch)
pub type BoxedPaymentStore = Arc<dyn PaymentStore>;

#[derive(Debug, Default)]
pub struct InMemoryPaymentStore {
    payments: RwLock<HashMap<String, Payment>>,
    methods: RwLock<HashMap<String, PaymentMethod>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payment_count(&self) -> usize {
        self.payments.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn payment_method_count(&self) -> usize {
        self.methods.read().map(|m| m.len()).unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> PaymentError {
    PaymentError::Internal("payment store lock poisoned".to_string())
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn save_payment(&self, payment: &Payment) -> PaymentResult<()> {
        self.payments
            .write()
            .map_err(poisoned)?
            .insert(payment.id.clone(), payment.clone());
        Ok(())
    }

    async fn load_payment(&self, payment_id: &str) -> PaymentResult<Option<Payment>> {
        Ok(self.payments.read().map_err(poisoned)?.get(payment_id).cloned())
    }

    async fn save_payment_method(&self, method: &PaymentMethod) -> PaymentResult<()> {
        let mut stored = method.clone();
        stored.payment_details = None;
        self.methods
            .write()
            .map_err(poisoned)?
            .insert(stored.id.clone(), stored);
        Ok(())
    }

    async fn load_payment_method(&self, method_id: &str) -> PaymentResult<Option<PaymentMethod>> {
        Ok(self.methods.read().map_err(poisoned)?.get(method_id).cloned())
    }

    async fn delete_payment_method(&self, method_id: &str) -> PaymentResult<bool> {
        Ok(self
            .methods
            .write()
            .map_err(poisoned)?
            .remove(method_id)
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details::PaymentDetails;
    use crate::money::{Currency, Price};
    use crate::payment::PaymentType;

    #[tokio::test]
    async fn test_payment_round_trip() {
        let store = InMemoryPaymentStore::new();
        let payment = Payment::new("order-1", Price::from_cents(500, Currency::USD));

        store.save_payment(&payment).await.unwrap();

        let loaded = store.load_payment(&payment.id).await.unwrap();
        assert_eq!(loaded, Some(payment));
        assert!(store.load_payment("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_staged_details_are_dropped() {
        let store = InMemoryPaymentStore::new();
        let mut method = PaymentMethod::new("paypal_ec");
        method.payment_type = Some(PaymentType::Single);
        method.payment_details = Some(PaymentDetails::Single(Default::default()));

        store.save_payment_method(&method).await.unwrap();

        let loaded = store.load_payment_method(&method.id).await.unwrap().unwrap();
        assert_eq!(loaded.payment_type, Some(PaymentType::Single));
        assert!(loaded.payment_details.is_none());
    }

    #[tokio::test]
    async fn test_delete_payment_method() {
        let store = InMemoryPaymentStore::new();
        let method = PaymentMethod::new("paypal_ec");
        store.save_payment_method(&method).await.unwrap();

        assert!(store.delete_payment_method(&method.id).await.unwrap());
        assert!(!store.delete_payment_method(&method.id).await.unwrap());
        assert_eq!(store.payment_method_count(), 0);
    }
}
