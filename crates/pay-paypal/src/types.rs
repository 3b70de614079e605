//! PayPal REST v1 wire types that are not part of the widget payload.

use pay_core::{BillingAgreement, Payer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Link {
    pub href: String,
    pub rel: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentResource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub payer: Option<PayerResource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PayerResource {
    #[serde(default)]
    pub payer_info: Option<PayerInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PayerInfo {
    #[serde(default)]
    pub payer_id: Option<String>,
}

impl PaymentResource {
    pub fn payer_id(&self) -> Option<&str> {
        self.payer
            .as_ref()
            .and_then(|payer| payer.payer_info.as_ref())
            .and_then(|info| info.payer_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PaymentExecution<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlanResource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub state: Option<String>,
}

/// JSON Patch operation on a billing plan
#[derive(Debug, Serialize)]
pub(crate) struct PatchOperation {
    pub op: &'static str,
    pub path: &'static str,
    pub value: Value,
}

impl PatchOperation {
    pub fn activate_plan() -> Vec<PatchOperation> {
        vec![PatchOperation {
            op: "replace",
            path: "/",
            value: serde_json::json!({ "state": "ACTIVE" }),
        }]
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PlanReference<'a> {
    pub id: &'a str,
}

/// Agreement body: the widget's agreement plus the activated plan and payer
#[derive(Debug, Serialize)]
pub(crate) struct AgreementCreate<'a> {
    #[serde(flatten)]
    pub agreement: BillingAgreement,
    pub plan: PlanReference<'a>,
    pub payer: Payer,
}

impl<'a> AgreementCreate<'a> {
    pub fn new(agreement: &BillingAgreement, plan_id: &'a str) -> Self {
        let mut agreement = agreement.clone();
        agreement.extra.remove("plan");
        agreement.extra.remove("payer");
        Self {
            agreement,
            plan: PlanReference { id: plan_id },
            payer: Payer::paypal(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AgreementResource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PayPalErrorResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub debug_id: Option<String>,
}

impl PayPalErrorResponse {
    /// `NAME: message`, falling back to the OAuth `error` fields
    pub fn summary(&self) -> Option<String> {
        let name = self.name.as_deref().or(self.error.as_deref())?;
        let message = self
            .message
            .as_deref()
            .or(self.error_description.as_deref())
            .unwrap_or("");
        Some(format!("{}: {}", name, message))
    }
}
