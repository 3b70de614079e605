//! # PayPal Express Checkout Gateway
//!
//! Drives the two-phase express checkout on behalf of the host: stages the
//! widget's payment details, enriches them with order data for phase 1, and
//! executes the approved payment or agreement in phase 2.
//!
//! Failures never mutate the payment: the error is logged and returned.

use crate::client::PayPalClient;
use crate::config::PayPalConfig;
use crate::method_type::METHOD_TYPE_ID;
use async_trait::async_trait;
use pay_core::{
    format_start_date, BoxedClock, BoxedPaymentStore, BoxedProviderClient, CheckoutUrls, Item,
    ItemList, Order, Payer, Payment, PaymentDetails, PaymentError, PaymentGateway, PaymentMethod,
    PaymentResult, PaymentState, PaymentType, PlanAmount, Price, RedirectUrls,
    SinglePaymentRequest, SubscriptionPaymentRequest, SystemClock, Transaction,
    TransactionAmount,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub const GATEWAY_ID: &str = "paypal_ec";
pub const GATEWAY_LABEL: &str = "PayPal (Express Checkout)";

const DEFAULT_INTENT: &str = "sale";
const DEFAULT_PAYER_METHOD: &str = "paypal";

/// On-site PayPal Express Checkout gateway
pub struct PayPalExpressCheckout {
    config: PayPalConfig,
    provider: BoxedProviderClient,
    store: BoxedPaymentStore,
    clock: BoxedClock,
    urls: CheckoutUrls,
}

impl PayPalExpressCheckout {
    pub fn new(
        config: PayPalConfig,
        provider: BoxedProviderClient,
        store: BoxedPaymentStore,
        urls: CheckoutUrls,
    ) -> Self {
        Self {
            config,
            provider,
            store,
            clock: Arc::new(SystemClock),
            urls,
        }
    }

    /// Gateway talking to PayPal's REST API with the given configuration
    pub fn with_paypal_client(
        config: PayPalConfig,
        store: BoxedPaymentStore,
        urls: CheckoutUrls,
    ) -> Self {
        let provider = Arc::new(PayPalClient::new(config.clone()));
        Self::new(config, provider, store, urls)
    }

    /// Builder: replace the wall clock
    pub fn with_clock(mut self, clock: BoxedClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &PayPalConfig {
        &self.config
    }

    pub fn urls(&self) -> &CheckoutUrls {
        &self.urls
    }

    /// Payment resource with defaults, redirect URLs, order total and line items
    fn single_payment_payload(
        &self,
        request: &SinglePaymentRequest,
        order: &Order,
    ) -> SinglePaymentRequest {
        let mut payload = request.clone();

        payload
            .intent
            .get_or_insert_with(|| DEFAULT_INTENT.to_string());
        payload
            .payer
            .get_or_insert_with(Payer::default)
            .payment_method
            .get_or_insert_with(|| DEFAULT_PAYER_METHOD.to_string());

        payload.redirect_urls = Some(RedirectUrls {
            return_url: self.urls.return_url(),
            cancel_url: self.urls.cancel_url(),
        });

        if payload.transactions.is_empty() {
            payload.transactions.push(Transaction::default());
        }
        if let Some(transaction) = payload.transactions.first_mut() {
            transaction.amount = Some(TransactionAmount::from_price(&order.total()));
            transaction.item_list.get_or_insert_with(ItemList::default).items =
                order.line_items.iter().map(Item::from_line_item).collect();
        }

        payload
    }

    /// Billing plan and agreement with return URLs, order total and start date
    fn subscription_payload(
        &self,
        request: &SubscriptionPaymentRequest,
        order: &Order,
    ) -> PaymentResult<SubscriptionPaymentRequest> {
        let mut payload = request.clone();

        let preferences = payload
            .billing_plan
            .merchant_preferences
            .get_or_insert_with(Default::default);
        preferences.return_url = Some(self.urls.return_url());
        preferences.cancel_url = Some(self.urls.cancel_url());

        let definition = payload
            .billing_plan
            .payment_definitions
            .first_mut()
            .ok_or_else(|| {
                PaymentError::InvalidRequest("Billing plan has no payment definition".to_string())
            })?;
        definition.amount = Some(PlanAmount::from_price(&order.total()));

        let start = self
            .config
            .recurring_start
            .first_billing_date(self.clock.now().fixed_offset())?;
        payload.billing_agreement.start_date = Some(format_start_date(&start));

        Ok(payload)
    }
}

#[async_trait]
impl PaymentGateway for PayPalExpressCheckout {
    #[instrument(skip(self, method, payment_details), fields(method_id = %method.id))]
    async fn create_payment_method(
        &self,
        method: &mut PaymentMethod,
        payment_details: &serde_json::Value,
    ) -> PaymentResult<()> {
        let details = PaymentDetails::from_checkout(payment_details).map_err(|e| {
            warn!("Rejected payment details: {}", e);
            e
        })?;

        method.reusable = false;
        method.payment_type = Some(details.payment_type());
        self.store.save_payment_method(method).await?;

        debug!("Staged {} payment details", details.payment_type());
        method.payment_details = Some(details);
        Ok(())
    }

    #[instrument(skip_all, fields(payment_id = %payment.id, order_id = %order.id))]
    async fn create_payment(
        &self,
        payment: &mut Payment,
        method: &mut PaymentMethod,
        order: &Order,
        capture: bool,
    ) -> PaymentResult<()> {
        payment.assert_state(&[PaymentState::New])?;

        if capture {
            debug!("Capture requested at creation; waiting for buyer approval");
            return Ok(());
        }

        if payment.payment_method_id.as_deref() != Some(method.id.as_str()) {
            return Err(PaymentError::InvalidRequest(format!(
                "Payment method {} does not belong to payment {}",
                method.id, payment.id
            )));
        }
        if order.is_empty() {
            return Err(PaymentError::InvalidRequest(
                "Order has no items".to_string(),
            ));
        }

        let payment_type = method.payment_type.ok_or_else(|| PaymentError::MissingField {
            field: "payment_type".to_string(),
        })?;
        let details = method
            .payment_details
            .as_ref()
            .ok_or_else(|| PaymentError::MissingField {
                field: "payment_details".to_string(),
            })?;
        if details.payment_type() != payment_type {
            return Err(PaymentError::InvalidRequest(format!(
                "Staged {} details on a {} payment method",
                details.payment_type(),
                payment_type
            )));
        }

        let result = match details {
            PaymentDetails::Single(request) => {
                let payload = self.single_payment_payload(request, order);
                self.provider.create_single_payment(&payload).await
            }
            PaymentDetails::Subscription(request) => {
                let payload = self.subscription_payload(request, order)?;
                self.provider.create_subscription_payment(&payload).await
            }
        };

        let token = result.map_err(|e| {
            error!(
                "Failed to create {} payment with {}: {}",
                payment_type,
                self.provider.provider_name(),
                e
            );
            e
        })?;

        method.remote_id = Some(token.clone());
        payment.remote_id = Some(token);
        self.store.save_payment_method(method).await?;
        self.store.save_payment(payment).await?;

        info!("Created {} payment, awaiting approval", payment_type);
        Ok(())
    }

    #[instrument(skip_all, fields(payment_id = %payment.id))]
    async fn capture_payment(
        &self,
        payment: &mut Payment,
        method: &mut PaymentMethod,
        amount: Option<&Price>,
    ) -> PaymentResult<()> {
        if let Some(amount) = amount {
            debug!(
                "Ignoring capture amount {}; capturing what the buyer approved",
                amount.display()
            );
        }

        payment.assert_state(&[PaymentState::New, PaymentState::Pending])?;

        let remote_id = method
            .remote_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PaymentError::MissingField {
                field: "remote_id".to_string(),
            })?;
        let payment_type = method.payment_type.ok_or_else(|| PaymentError::MissingField {
            field: "payment_type".to_string(),
        })?;

        let result = match payment_type {
            PaymentType::Single => self.provider.execute_single_payment(&remote_id).await,
            PaymentType::Subscription => {
                self.provider.execute_subscription_payment(&remote_id).await
            }
        };

        let executed_id = result.map_err(|e| {
            error!(
                "Failed to execute {} payment {}: {}",
                payment_type, remote_id, e
            );
            e
        })?;

        payment.complete(executed_id.clone(), self.clock.now())?;
        method.remote_id = Some(executed_id);
        self.store.save_payment(payment).await?;
        self.store.save_payment_method(method).await?;

        info!("Captured {} payment", payment_type);
        Ok(())
    }

    #[instrument(skip_all, fields(method_id = %method.id))]
    async fn delete_payment_method(&self, method: &PaymentMethod) -> PaymentResult<()> {
        if !self.store.delete_payment_method(&method.id).await? {
            return Err(PaymentError::NotFound {
                entity: "payment method".to_string(),
                id: method.id.clone(),
            });
        }
        debug!("Deleted payment method");
        Ok(())
    }

    fn gateway_id(&self) -> &'static str {
        GATEWAY_ID
    }

    fn display_label(&self) -> &'static str {
        GATEWAY_LABEL
    }

    fn payment_method_types(&self) -> &'static [&'static str] {
        &[METHOD_TYPE_ID]
    }
}
