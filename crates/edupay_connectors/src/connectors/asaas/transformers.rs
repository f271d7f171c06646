//! Wire types and status tables of the Asaas REST API.

use common_enums::{CanonicalPaymentStatus, PaymentMethod};
use edupay_interfaces::{
    configs::AsaasSettings,
    errors::GatewayError,
    types::{CustomerDetails, EnrollmentDetails, ExternalPaymentRef, WebhookOutcome},
};
use masking::Secret;
use serde::{Deserialize, Serialize};

pub struct AsaasAuthType {
    pub api_key: Secret<String>,
}

impl TryFrom<&AsaasSettings> for AsaasAuthType {
    type Error = error_stack::Report<GatewayError>;

    fn try_from(settings: &AsaasSettings) -> Result<Self, Self::Error> {
        settings
            .api_key
            .clone()
            .map(|api_key| Self { api_key })
            .ok_or_else(|| GatewayError::FailedToObtainAuthType.into())
    }
}

/// Billing type submitted on payment creation, passed through from the
/// enrollment's requested method, defaulting to boleto.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AsaasBillingType {
    #[default]
    Boleto,
    CreditCard,
    Pix,
}

impl From<PaymentMethod> for AsaasBillingType {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Boleto => Self::Boleto,
            PaymentMethod::CreditCard => Self::CreditCard,
            PaymentMethod::Pix => Self::Pix,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsaasCustomerRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf_cnpj: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
}

impl From<&CustomerDetails> for AsaasCustomerRequest {
    fn from(customer: &CustomerDetails) -> Self {
        Self {
            name: customer.full_name.clone(),
            email: customer.email.clone(),
            cpf_cnpj: customer.cpf.clone(),
            external_reference: Some(customer.id.clone()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AsaasCustomer {
    pub id: String,
}

/// Reply of `GET /customers`, a paginated listing filtered by the query.
#[derive(Debug, Serialize, Deserialize)]
pub struct AsaasCustomerListResponse {
    #[serde(default)]
    pub data: Vec<AsaasCustomer>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsaasPaymentRequest {
    pub customer: String,
    pub billing_type: AsaasBillingType,
    /// Asaas takes decimal major units, not cents.
    pub value: f64,
    pub due_date: String,
    pub description: String,
    pub external_reference: String,
}

impl AsaasPaymentRequest {
    pub fn new(enrollment: &EnrollmentDetails, customer_id: &str, due_date: String) -> Self {
        Self {
            customer: customer_id.to_string(),
            billing_type: enrollment.payment_method.unwrap_or_default().into(),
            value: enrollment.amount.get_amount_as_f64(),
            due_date,
            description: format!("Matrícula {} - {}", enrollment.code, enrollment.course.name),
            external_reference: enrollment.code.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AsaasPaymentStatus {
    Confirmed,
    Received,
    ReceivedInCash,
    Pending,
    Awaiting,
    Overdue,
    Refunded,
    ChargebackRequested,
    ChargebackDispute,
    ChargebackReversed,
    Deleted,
    #[serde(other)]
    Unknown,
}

impl From<AsaasPaymentStatus> for CanonicalPaymentStatus {
    fn from(status: AsaasPaymentStatus) -> Self {
        match status {
            AsaasPaymentStatus::Confirmed
            | AsaasPaymentStatus::Received
            | AsaasPaymentStatus::ReceivedInCash => Self::Active,
            AsaasPaymentStatus::Pending | AsaasPaymentStatus::Awaiting => Self::PendingPayment,
            AsaasPaymentStatus::Overdue => Self::Suspended,
            AsaasPaymentStatus::Refunded
            | AsaasPaymentStatus::ChargebackRequested
            | AsaasPaymentStatus::ChargebackDispute
            | AsaasPaymentStatus::ChargebackReversed
            | AsaasPaymentStatus::Deleted => Self::Cancelled,
            AsaasPaymentStatus::Unknown => Self::PendingPayment,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsaasPaymentResponse {
    pub id: String,
    pub status: AsaasPaymentStatus,
    pub invoice_url: Option<String>,
    pub bank_slip_url: Option<String>,
}

impl TryFrom<AsaasPaymentResponse> for ExternalPaymentRef {
    type Error = error_stack::Report<GatewayError>;

    fn try_from(response: AsaasPaymentResponse) -> Result<Self, Self::Error> {
        let payment_url = response
            .invoice_url
            .or(response.bank_slip_url)
            .ok_or(GatewayError::MissingRequiredField {
                field_name: "invoiceUrl",
            })?;
        Ok(Self {
            external_id: response.id,
            payment_url,
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AsaasWebhookEvent {
    PaymentConfirmed,
    PaymentReceived,
    PaymentOverdue,
    PaymentDeleted,
    PaymentRefunded,
    #[serde(other)]
    Unknown,
}

impl From<AsaasWebhookEvent> for CanonicalPaymentStatus {
    fn from(event: AsaasWebhookEvent) -> Self {
        match event {
            AsaasWebhookEvent::PaymentConfirmed | AsaasWebhookEvent::PaymentReceived => {
                Self::Active
            }
            AsaasWebhookEvent::PaymentOverdue => Self::Suspended,
            AsaasWebhookEvent::PaymentDeleted | AsaasWebhookEvent::PaymentRefunded => {
                Self::Cancelled
            }
            AsaasWebhookEvent::Unknown => Self::PendingPayment,
        }
    }
}

/// Asaas posts `{ "event": ..., "payment": { "id": ... } }`; both fields
/// are required for the notification to be interpretable.
#[derive(Debug, Serialize, Deserialize)]
pub struct AsaasWebhookBody {
    pub event: AsaasWebhookEvent,
    pub payment: AsaasWebhookPayment,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AsaasWebhookPayment {
    pub id: String,
}

impl From<AsaasWebhookBody> for WebhookOutcome {
    fn from(body: AsaasWebhookBody) -> Self {
        Self {
            status: body.event.into(),
            external_id: body.payment.id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(raw: &str) -> CanonicalPaymentStatus {
        let status: AsaasPaymentStatus =
            serde_json::from_value(serde_json::Value::String(raw.to_string())).unwrap();
        status.into()
    }

    #[test]
    fn payment_statuses_map_to_the_documented_canonical_values() {
        for raw in ["CONFIRMED", "RECEIVED", "RECEIVED_IN_CASH"] {
            assert_eq!(status_of(raw), CanonicalPaymentStatus::Active, "{raw}");
        }
        for raw in ["PENDING", "AWAITING"] {
            assert_eq!(status_of(raw), CanonicalPaymentStatus::PendingPayment, "{raw}");
        }
        assert_eq!(status_of("OVERDUE"), CanonicalPaymentStatus::Suspended);
        for raw in [
            "REFUNDED",
            "CHARGEBACK_REQUESTED",
            "CHARGEBACK_DISPUTE",
            "CHARGEBACK_REVERSED",
            "DELETED",
        ] {
            assert_eq!(status_of(raw), CanonicalPaymentStatus::Cancelled, "{raw}");
        }
    }

    #[test]
    fn unmapped_statuses_default_to_pending() {
        assert_eq!(
            status_of("AWAITING_RISK_ANALYSIS"),
            CanonicalPaymentStatus::PendingPayment
        );
        assert_eq!(status_of(""), CanonicalPaymentStatus::PendingPayment);
    }

    #[test]
    fn webhook_events_mirror_the_status_table() {
        let cases = [
            ("PAYMENT_CONFIRMED", CanonicalPaymentStatus::Active),
            ("PAYMENT_RECEIVED", CanonicalPaymentStatus::Active),
            ("PAYMENT_OVERDUE", CanonicalPaymentStatus::Suspended),
            ("PAYMENT_DELETED", CanonicalPaymentStatus::Cancelled),
            ("PAYMENT_REFUNDED", CanonicalPaymentStatus::Cancelled),
            ("PAYMENT_CREATED", CanonicalPaymentStatus::PendingPayment),
        ];
        for (raw, expected) in cases {
            let event: AsaasWebhookEvent =
                serde_json::from_value(serde_json::Value::String(raw.to_string())).unwrap();
            assert_eq!(CanonicalPaymentStatus::from(event), expected, "{raw}");
        }
    }

    #[test]
    fn payment_response_requires_a_payer_facing_url() {
        let response = AsaasPaymentResponse {
            id: "pay_1".to_string(),
            status: AsaasPaymentStatus::Pending,
            invoice_url: None,
            bank_slip_url: Some("https://asaas/slip".to_string()),
        };
        let reference = ExternalPaymentRef::try_from(response).unwrap();
        assert_eq!(reference.payment_url, "https://asaas/slip");

        let bare = AsaasPaymentResponse {
            id: "pay_1".to_string(),
            status: AsaasPaymentStatus::Pending,
            invoice_url: None,
            bank_slip_url: None,
        };
        assert!(ExternalPaymentRef::try_from(bare).is_err());
    }

    #[test]
    fn billing_type_defaults_to_boleto() {
        assert_eq!(AsaasBillingType::default(), AsaasBillingType::Boleto);
        assert_eq!(
            AsaasBillingType::from(PaymentMethod::Pix),
            AsaasBillingType::Pix
        );
        assert_eq!(
            serde_json::to_string(&AsaasBillingType::CreditCard).unwrap(),
            r#""CREDIT_CARD""#
        );
    }
}
