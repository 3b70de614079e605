//! The `paypal_ec` payment method type: stored fields and buyer-facing label.

use pay_core::{FieldDefinition, PaymentMethod, PaymentMethodType, PAYMENT_TYPE_LABELS};

pub const METHOD_TYPE_ID: &str = "paypal_ec";
pub const METHOD_TYPE_LABEL: &str = "PayPal";

#[derive(Debug, Clone, Copy, Default)]
pub struct PayPalMethodType;

impl PaymentMethodType for PayPalMethodType {
    fn id(&self) -> &'static str {
        METHOD_TYPE_ID
    }

    fn label(&self) -> &'static str {
        METHOD_TYPE_LABEL
    }

    fn field_definitions(&self) -> Vec<FieldDefinition> {
        vec![
            FieldDefinition {
                name: "payment_type",
                label: "Payment type",
                description: "Single payment or recurring billing agreement",
                allowed_values: Some(
                    PAYMENT_TYPE_LABELS
                        .iter()
                        .map(|(payment_type, label)| (payment_type.as_str(), *label))
                        .collect(),
                ),
            },
            FieldDefinition {
                name: "remote_id",
                label: "Remote ID",
                description: "PayPal checkout token, payment id or agreement id",
                allowed_values: None,
            },
        ]
    }

    /// `**** single (PAYID-123)`
    fn build_label(&self, method: &PaymentMethod) -> String {
        format!(
            "**** {} ({})",
            method
                .payment_type
                .map(|payment_type| payment_type.as_str())
                .unwrap_or(""),
            method.remote_id.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pay_core::PaymentType;

    #[test]
    fn test_field_definitions() {
        let fields = PayPalMethodType.field_definitions();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "payment_type");
        assert_eq!(
            fields[0].allowed_values,
            Some(vec![
                ("single", "Single Payment"),
                ("subscription", "Recurring Payment")
            ])
        );
        assert_eq!(fields[1].name, "remote_id");
    }

    #[test]
    fn test_build_label() {
        let mut method = PaymentMethod::new(METHOD_TYPE_ID);
        method.payment_type = Some(PaymentType::Subscription);
        method.remote_id = Some("I-0LN988D3JACS".to_string());

        assert_eq!(
            PayPalMethodType.build_label(&method),
            "**** subscription (I-0LN988D3JACS)"
        );
    }
}
