//! # Request Handlers
//!
//! Axum request handlers driving the gateway lifecycle for a checkout widget.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pay_core::{
    Currency, LineItem, Order, Payment, PaymentError, PaymentMethod, PaymentType, Price,
    PAYMENT_TYPE_LABELS,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout request
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Order currency (defaults to USD)
    #[serde(default)]
    pub currency: Option<Currency>,
    /// Items to purchase
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
    /// Widget payload: `{"type": ..., "data": {...}}`
    #[serde(default)]
    pub payment_details: Value,
}

/// Item in checkout request
#[derive(Debug, Deserialize)]
pub struct CheckoutItem {
    pub name: String,
    /// Unit price in the smallest currency unit
    pub unit_amount: i64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Create checkout response
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    pub payment_id: String,
    pub payment_method_id: String,
    pub payment_type: PaymentType,
    /// Token the widget opens PayPal's approval popup with
    pub token: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn payment_error_to_response(err: PaymentError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

fn not_found(entity: &str, id: &str) -> ApiError {
    payment_error_to_response(PaymentError::NotFound {
        entity: entity.to_string(),
        id: id.to_string(),
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "paypal-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Payment types and the method type's stored fields
pub async fn payment_types(State(state): State<AppState>) -> impl IntoResponse {
    let payment_types: Vec<Value> = PAYMENT_TYPE_LABELS
        .iter()
        .map(|(payment_type, label)| serde_json::json!({ "id": payment_type, "label": label }))
        .collect();

    Json(serde_json::json!({
        "gateway": {
            "id": state.gateway.gateway_id(),
            "label": state.gateway.display_label(),
        },
        "payment_method_type": {
            "id": state.method_type.id(),
            "label": state.method_type.label(),
            "fields": state.method_type.field_definitions(),
        },
        "payment_types": payment_types,
    }))
}

/// Stage the widget's payment details and run phase 1
#[instrument(skip(state, request), fields(items = request.items.len()))]
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<Json<CreateCheckoutResponse>, ApiError> {
    if request.items.is_empty() {
        return Err(payment_error_to_response(PaymentError::InvalidRequest(
            "No items in checkout request".to_string(),
        )));
    }

    let currency = request.currency.unwrap_or_default();
    let order = Order::from_items(
        currency,
        request.items.iter().map(|item| {
            LineItem::new(
                item.name.clone(),
                Price::from_cents(item.unit_amount, currency),
                item.quantity,
            )
        }),
    )
    .map_err(payment_error_to_response)?;

    let mut method = PaymentMethod::new(state.method_type.id());
    state
        .gateway
        .create_payment_method(&mut method, &request.payment_details)
        .await
        .map_err(payment_error_to_response)?;

    let mut payment = Payment::new(&order.id, order.total()).with_payment_method(&method.id);

    info!(
        "Creating checkout: {} items, total={}",
        order.item_count(),
        order.total().display()
    );

    state
        .gateway
        .create_payment(&mut payment, &mut method, &order, false)
        .await
        .map_err(|e| {
            error!("Failed to create payment: {}", e);
            payment_error_to_response(e)
        })?;

    let (Some(payment_type), Some(token)) = (method.payment_type, payment.remote_id.clone()) else {
        return Err(payment_error_to_response(PaymentError::Internal(
            "payment created without a token".to_string(),
        )));
    };

    Ok(Json(CreateCheckoutResponse {
        payment_id: payment.id,
        payment_method_id: method.id,
        payment_type,
        token,
    }))
}

/// Run phase 2 for an approved payment
#[instrument(skip(state))]
pub async fn capture_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> Result<Json<Payment>, ApiError> {
    let mut payment = state
        .store
        .load_payment(&payment_id)
        .await
        .map_err(payment_error_to_response)?
        .ok_or_else(|| not_found("payment", &payment_id))?;

    let method_id = payment.payment_method_id.clone().unwrap_or_default();
    let mut method = state
        .store
        .load_payment_method(&method_id)
        .await
        .map_err(payment_error_to_response)?
        .ok_or_else(|| not_found("payment method", &method_id))?;

    state
        .gateway
        .capture_payment(&mut payment, &mut method, None)
        .await
        .map_err(|e| {
            error!("Failed to capture payment {}: {}", payment_id, e);
            payment_error_to_response(e)
        })?;

    Ok(Json(payment))
}

/// Get a payment by ID
pub async fn get_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> Result<Json<Payment>, ApiError> {
    state
        .store
        .load_payment(&payment_id)
        .await
        .map_err(payment_error_to_response)?
        .map(Json)
        .ok_or_else(|| not_found("payment", &payment_id))
}

/// Delete a payment method (local record only)
#[instrument(skip(state))]
pub async fn delete_payment_method(
    State(state): State<AppState>,
    Path(method_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let method = state
        .store
        .load_payment_method(&method_id)
        .await
        .map_err(payment_error_to_response)?
        .ok_or_else(|| not_found("payment method", &method_id))?;

    state
        .gateway
        .delete_payment_method(&method)
        .await
        .map_err(payment_error_to_response)?;

    Ok(StatusCode::NO_CONTENT)
}
