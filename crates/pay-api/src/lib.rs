//! # pay-api
//!
//! HTTP host surface for the PayPal Express Checkout gateway.
//!
//! The checkout widget posts its payment details here, opens PayPal's
//! approval popup with the returned token, and asks for the capture once
//! the buyer approves.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/v1/payment-types` | Payment types and method fields |
//! | POST | `/api/v1/checkout` | Create payment method and payment |
//! | GET | `/api/v1/payments/{payment_id}` | Get payment |
//! | POST | `/api/v1/payments/{payment_id}/capture` | Execute approved payment |
//! | DELETE | `/api/v1/payment-methods/{method_id}` | Delete payment method |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
