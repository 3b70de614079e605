//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the gateway, the payment store and configuration.

use pay_core::{
    BoxedPaymentStore, CheckoutUrls, InMemoryPaymentStore, PaymentGateway, PaymentMethodType,
};
use pay_paypal::{PayPalConfig, PayPalExpressCheckout, PayPalMethodType};
use std::net::SocketAddr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Storefront URL PayPal sends the buyer back to
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: lookup("BASE_URL").unwrap_or_else(|| "http://localhost:8080".to_string()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway driving the checkout
    pub gateway: Arc<dyn PaymentGateway>,
    /// Descriptor of the gateway's payment method type
    pub method_type: Arc<dyn PaymentMethodType>,
    /// Payments and payment methods
    pub store: BoxedPaymentStore,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState talking to PayPal with settings from the environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let paypal = PayPalConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize PayPal: {}", e))?;

        let store: BoxedPaymentStore = Arc::new(InMemoryPaymentStore::new());
        let gateway = PayPalExpressCheckout::with_paypal_client(
            paypal,
            store.clone(),
            CheckoutUrls::new(&config.base_url),
        );

        Ok(Self::with_gateway(config, Arc::new(gateway), store))
    }

    /// Assemble state around an existing gateway and store
    pub fn with_gateway(
        config: AppConfig,
        gateway: Arc<dyn PaymentGateway>,
        store: BoxedPaymentStore,
    ) -> Self {
        Self {
            gateway,
            method_type: Arc::new(PayPalMethodType),
            store,
            config,
        }
    }
}
