//! # paypal-checkout
//!
//! Host service for the PayPal Express Checkout gateway.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export PAYPAL_CLIENT_ID=...
//! export PAYPAL_CLIENT_SECRET=...
//! export PAYPAL_MODE=sandbox
//! export PAYPAL_RECURRING_START_DATE=1
//!
//! # Run the server
//! paypal-checkout
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let state = AppState::new();
    let json_logs = state
        .as_ref()
        .map(|s| s.config.is_production())
        .unwrap_or(false);

    // Initialize logging (JSON lines in production)
    tracing_subscriber::registry()
        .with(json_logs.then(|| fmt::layer().json()))
        .with((!json_logs).then(fmt::layer))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let state = state?;
    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Gateway: {} ({})",
        state.gateway.display_label(),
        state.gateway.gateway_id()
    );

    let app = routes::create_router(state);

    info!("PayPal checkout starting on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("Checkout: POST http://{}/api/v1/checkout", addr);
        info!("Capture: POST http://{}/api/v1/payments/{{id}}/capture", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  PayPal Express Checkout
  ━━━━━━━━━━━━━━━━━━━━━━━
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
