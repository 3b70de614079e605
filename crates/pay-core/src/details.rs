//! # Payment Details
//!
//! The payload the client-side checkout widget sends alongside the payment
//! method: `{"type": "single" | "subscription", "data": {...}}`.
//!
//! `data` follows PayPal's resource schemas (a payment resource for single
//! payments, a billing plan plus billing agreement for subscriptions). Only
//! the fields the gateway rewrites are typed; everything else the widget sends
//! is carried through untouched in the flattened `extra` maps.
//!
//! Validation happens once, at the boundary, in [`PaymentDetails::from_checkout`].

use crate::error::{PaymentError, PaymentResult};
use crate::money::Price;
use crate::order::LineItem;
use crate::payment::PaymentType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// At most one transaction per single payment
pub const MAX_TRANSACTIONS: usize = 1;

/// At most one payment definition per billing plan
pub const MAX_PAYMENT_DEFINITIONS: usize = 1;

/// Validated payment details, one variant per payment type
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentDetails {
    Single(SinglePaymentRequest),
    Subscription(SubscriptionPaymentRequest),
}

impl PaymentDetails {
    /// Parse and validate the raw widget payload.
    ///
    /// Fails with [`PaymentError::MissingField`] when `type` or `data` is
    /// absent or empty, [`PaymentError::InvalidPaymentType`] for an unknown
    /// type, [`PaymentError::InvalidRequest`] when `data` does not match the
    /// resource shape, and [`PaymentError::TooManyEntries`] when more than one
    /// transaction or payment definition is present.
    pub fn from_checkout(raw: &Value) -> PaymentResult<Self> {
        let payment_type = required(raw, "type")?;
        let data = required(raw, "data")?;

        let payment_type: PaymentType = match payment_type {
            Value::String(s) => s.parse()?,
            other => {
                return Err(PaymentError::InvalidPaymentType {
                    given: other.to_string(),
                })
            }
        };

        let details = match payment_type {
            PaymentType::Single => PaymentDetails::Single(parse_data(data)?),
            PaymentType::Subscription => PaymentDetails::Subscription(parse_data(data)?),
        };

        details.validate()?;
        Ok(details)
    }

    pub fn payment_type(&self) -> PaymentType {
        match self {
            PaymentDetails::Single(_) => PaymentType::Single,
            PaymentDetails::Subscription(_) => PaymentType::Subscription,
        }
    }

    /// Enforce the one-transaction / one-definition limit
    pub fn validate(&self) -> PaymentResult<()> {
        match self {
            PaymentDetails::Single(request) if request.transactions.len() > MAX_TRANSACTIONS => {
                Err(PaymentError::TooManyEntries {
                    field: "transactions".to_string(),
                    count: request.transactions.len(),
                })
            }
            PaymentDetails::Subscription(request)
                if request.billing_plan.payment_definitions.len() > MAX_PAYMENT_DEFINITIONS =>
            {
                Err(PaymentError::TooManyEntries {
                    field: "payment_definitions".to_string(),
                    count: request.billing_plan.payment_definitions.len(),
                })
            }
            _ => Ok(()),
        }
    }
}

fn required<'a>(raw: &'a Value, key: &str) -> PaymentResult<&'a Value> {
    raw.get(key)
        .filter(|value| !is_empty(value))
        .ok_or_else(|| PaymentError::MissingField {
            field: key.to_string(),
        })
}

/// Missing, null, false, zero, "", "0", [] and {} all count as empty
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn parse_data<T: DeserializeOwned>(data: &Value) -> PaymentResult<T> {
    T::deserialize(data)
        .map_err(|e| PaymentError::InvalidRequest(format!("Malformed payment data: {}", e)))
}

// =============================================================================
// Single payment (PayPal payment resource)
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SinglePaymentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_urls: Option<RedirectUrls>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Payer {
    pub fn paypal() -> Self {
        Self {
            payment_method: Some("paypal".to_string()),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<TransactionAmount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_list: Option<ItemList>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Transaction amount: `{currency, total}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionAmount {
    pub currency: String,

    #[serde(deserialize_with = "lenient::string")]
    pub total: String,
}

impl TransactionAmount {
    pub fn from_price(price: &Price) -> Self {
        Self {
            currency: price.currency.code(),
            total: price.to_decimal_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemList {
    #[serde(default)]
    pub items: Vec<Item>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A line item as PayPal lists it: `{name, currency, price, quantity}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,

    pub currency: String,

    #[serde(deserialize_with = "lenient::string")]
    pub price: String,

    #[serde(deserialize_with = "lenient::quantity")]
    pub quantity: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn from_line_item(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            currency: item.unit_price.currency.code(),
            price: item.unit_price.to_decimal_string(),
            quantity: item.quantity,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectUrls {
    pub return_url: String,
    pub cancel_url: String,
}

// =============================================================================
// Subscription (PayPal billing plan + billing agreement)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPaymentRequest {
    pub billing_plan: BillingPlan,
    pub billing_agreement: BillingAgreement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingPlan {
    #[serde(default)]
    pub payment_definitions: Vec<PaymentDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_preferences: Option<MerchantPreferences>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<PlanAmount>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Plan amount: `{value, currency}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAmount {
    #[serde(deserialize_with = "lenient::string")]
    pub value: String,

    pub currency: String,
}

impl PlanAmount {
    pub fn from_price(price: &Price) -> Self {
        Self {
            value: price.to_decimal_string(),
            currency: price.currency.code(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MerchantPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingAgreement {
    /// ISO-8601 first billing date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Widgets send amounts and quantities both as strings and as numbers
mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(D::Error::custom(format!(
                "expected string or number, found {}",
                other
            ))),
        }
    }

    pub fn quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_u64()
                .and_then(|q| u32::try_from(q).ok())
                .ok_or_else(|| D::Error::custom(format!("invalid quantity {}", n))),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid quantity {:?}", s))),
            other => Err(D::Error::custom(format!("invalid quantity {}", other))),
        }
    }
}
