//! Wire types and status tables of the Lytex REST API.
//!
//! The upstream API is mid-migration: v2 endpoints coexist with
//! v1-shaped payloads and field names, so several structures here carry
//! serde aliases and the webhook body is a tagged union over both
//! generations.

use std::str::FromStr;

use common_enums::CanonicalPaymentStatus;
use common_utils::types::{FloatMajorUnit, MinorUnit};
use edupay_interfaces::{
    configs::LytexSettings,
    errors::GatewayError,
    types::{CustomerDetails, EnrollmentDetails, ExternalPaymentRef, WebhookOutcome},
};
use masking::Secret;
use serde::{Deserialize, Serialize};

/// Credit card is offered on an invoice only from this amount upward.
/// Fixed business rule, not per-call configuration.
const CREDIT_CARD_MIN_AMOUNT_MAJOR: f64 = 500.0;

pub struct LytexAuthType {
    pub client_id: Secret<String>,
    pub client_secret: Secret<String>,
}

impl TryFrom<&LytexSettings> for LytexAuthType {
    type Error = error_stack::Report<GatewayError>;

    fn try_from(settings: &LytexSettings) -> Result<Self, Self::Error> {
        match (settings.client_id.clone(), settings.client_secret.clone()) {
            (Some(client_id), Some(client_secret)) => Ok(Self {
                client_id,
                client_secret,
            }),
            _ => Err(GatewayError::FailedToObtainAuthType.into()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LytexTokenRequest {
    pub grant_type: &'static str,
    pub client_id: Secret<String>,
    pub client_secret: Secret<String>,
}

impl From<LytexAuthType> for LytexTokenRequest {
    fn from(auth: LytexAuthType) -> Self {
        Self {
            grant_type: "clientCredentials",
            client_id: auth.client_id,
            client_secret: auth.client_secret,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LytexTokenResponse {
    pub access_token: Secret<String>,
    /// Lifetime in seconds; some API revisions omit it.
    pub expires_in: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LytexClientRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf_cnpj: Option<Secret<String>>,
}

impl From<&CustomerDetails> for LytexClientRequest {
    fn from(customer: &CustomerDetails) -> Self {
        Self {
            name: customer.full_name.clone(),
            email: customer.email.clone(),
            cpf_cnpj: customer.cpf.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LytexClient {
    #[serde(alias = "_id")]
    pub id: String,
}

/// Client search reply; older revisions return `results`, newer `data`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LytexClientListResponse {
    #[serde(default, alias = "results")]
    pub data: Vec<LytexClient>,
}

/// Per-method toggles on the invoice checkout.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LytexMethodToggle {
    pub enable: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LytexPaymentMethods {
    pub boleto: LytexMethodToggle,
    pub pix: LytexMethodToggle,
    pub credit_card: LytexMethodToggle,
}

impl LytexPaymentMethods {
    pub fn for_amount(amount: FloatMajorUnit) -> Self {
        Self {
            boleto: LytexMethodToggle { enable: true },
            pix: LytexMethodToggle { enable: true },
            credit_card: LytexMethodToggle {
                enable: credit_card_enabled(amount),
            },
        }
    }
}

/// Whether the invoice amount clears the credit card minimum.
pub fn credit_card_enabled(amount: FloatMajorUnit) -> bool {
    amount.get_amount_as_f64() >= CREDIT_CARD_MIN_AMOUNT_MAJOR
}

/// Inline client block on the invoice, kept from the v1 payload shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LytexInvoiceClient {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf_cnpj: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LytexInvoiceItem {
    pub name: String,
    pub quantity: u32,
    /// Integer minor units (centavos), per the invoice API contract.
    pub value: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LytexInvoiceRequest {
    /// Provider-side client id when the lookup found one; the inline
    /// `client` block covers the case where it did not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub client: LytexInvoiceClient,
    pub items: Vec<LytexInvoiceItem>,
    pub due_date: String,
    pub reference_id: String,
    pub payment_methods: LytexPaymentMethods,
}

pub struct LytexRouterData<'a> {
    pub amount_minor: MinorUnit,
    pub due_date: String,
    pub client_id: Option<String>,
    pub enrollment: &'a EnrollmentDetails,
}

impl TryFrom<LytexRouterData<'_>> for LytexInvoiceRequest {
    type Error = error_stack::Report<GatewayError>;

    fn try_from(item: LytexRouterData<'_>) -> Result<Self, Self::Error> {
        let enrollment = item.enrollment;
        Ok(Self {
            client_id: item.client_id,
            client: LytexInvoiceClient {
                name: enrollment.student.full_name.clone(),
                email: enrollment.student.email.clone(),
                cpf_cnpj: enrollment.student.cpf.clone(),
            },
            items: vec![LytexInvoiceItem {
                name: enrollment.course.name.clone(),
                quantity: 1,
                value: item.amount_minor.get_amount_as_i64(),
            }],
            due_date: item.due_date,
            reference_id: enrollment.code.clone(),
            payment_methods: LytexPaymentMethods::for_amount(enrollment.amount),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LytexInvoiceResponse {
    #[serde(alias = "_id")]
    pub id: String,
    pub payment_url: Option<String>,
    pub checkout_url: Option<String>,
    pub link_checkout: Option<String>,
}

impl LytexInvoiceResponse {
    /// The payer-facing URL has moved between API revisions; probe the
    /// known locations in order.
    fn payment_url(self) -> Option<String> {
        self.payment_url
            .or(self.checkout_url)
            .or(self.link_checkout)
    }
}

impl TryFrom<LytexInvoiceResponse> for ExternalPaymentRef {
    type Error = error_stack::Report<GatewayError>;

    fn try_from(response: LytexInvoiceResponse) -> Result<Self, Self::Error> {
        let external_id = response.id.clone();
        let payment_url =
            response
                .payment_url()
                .ok_or(GatewayError::MissingRequiredField {
                    field_name: "paymentUrl",
                })?;
        Ok(Self {
            external_id,
            payment_url,
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LytexPaymentStatus {
    Paid,
    Unpaid,
    WaitingPayment,
    Expired,
    Canceled,
    Refunded,
}

impl From<LytexPaymentStatus> for CanonicalPaymentStatus {
    fn from(status: LytexPaymentStatus) -> Self {
        match status {
            LytexPaymentStatus::Paid => Self::Active,
            LytexPaymentStatus::Unpaid | LytexPaymentStatus::WaitingPayment => {
                Self::PendingPayment
            }
            LytexPaymentStatus::Expired => Self::Suspended,
            LytexPaymentStatus::Canceled | LytexPaymentStatus::Refunded => Self::Cancelled,
        }
    }
}

/// Normalize a raw provider status, case-insensitively; anything
/// unrecognized is pending.
pub fn map_payment_status(raw: &str) -> CanonicalPaymentStatus {
    LytexPaymentStatus::from_str(raw.trim())
        .map(CanonicalPaymentStatus::from)
        .unwrap_or_default()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LytexInvoiceStatusResponse {
    #[serde(alias = "paymentStatus")]
    pub status: String,
}

/// Webhook payloads differ between provider API generations: v2 wraps
/// the payment under `data` (with an optional `event` discriminator),
/// v1 carries the fields at the top level under varying names.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LytexWebhookBody {
    V2(LytexWebhookV2),
    V1(LytexWebhookV1),
}

#[derive(Debug, Deserialize)]
pub struct LytexWebhookV2 {
    #[serde(default)]
    pub event: Option<String>,
    pub data: LytexWebhookData,
}

#[derive(Debug, Deserialize)]
pub struct LytexWebhookData {
    #[serde(alias = "_id", alias = "paymentId")]
    pub id: String,
    #[serde(alias = "paymentStatus")]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct LytexWebhookV1 {
    #[serde(alias = "paymentId")]
    pub id: String,
    #[serde(alias = "paymentStatus")]
    pub status: String,
}

impl From<LytexWebhookBody> for WebhookOutcome {
    fn from(body: LytexWebhookBody) -> Self {
        let (id, raw_status) = match body {
            LytexWebhookBody::V2(v2) => (v2.data.id, v2.data.status),
            LytexWebhookBody::V1(v1) => (v1.id, v1.status),
        };
        Self {
            status: map_payment_status(&raw_status),
            external_id: id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_the_documented_canonical_values() {
        assert_eq!(map_payment_status("paid"), CanonicalPaymentStatus::Active);
        assert_eq!(
            map_payment_status("unpaid"),
            CanonicalPaymentStatus::PendingPayment
        );
        assert_eq!(
            map_payment_status("waiting_payment"),
            CanonicalPaymentStatus::PendingPayment
        );
        assert_eq!(
            map_payment_status("expired"),
            CanonicalPaymentStatus::Suspended
        );
        assert_eq!(
            map_payment_status("canceled"),
            CanonicalPaymentStatus::Cancelled
        );
        assert_eq!(
            map_payment_status("refunded"),
            CanonicalPaymentStatus::Cancelled
        );
    }

    #[test]
    fn status_matching_is_case_insensitive() {
        assert_eq!(map_payment_status("PAID"), CanonicalPaymentStatus::Active);
        assert_eq!(
            map_payment_status("Waiting_Payment"),
            CanonicalPaymentStatus::PendingPayment
        );
    }

    #[test]
    fn unknown_statuses_default_to_pending() {
        assert_eq!(
            map_payment_status("processing"),
            CanonicalPaymentStatus::PendingPayment
        );
        assert_eq!(map_payment_status(""), CanonicalPaymentStatus::PendingPayment);
    }

    #[test]
    fn credit_card_enablement_threshold() {
        assert!(!credit_card_enabled(FloatMajorUnit::new(499.99)));
        assert!(credit_card_enabled(FloatMajorUnit::new(500.00)));
        assert!(credit_card_enabled(FloatMajorUnit::new(500.01)));
    }

    #[test]
    fn webhook_v2_shape_decodes() {
        let body: LytexWebhookBody = serde_json::from_slice(
            br#"{"event":"invoice.paid","data":{"_id":"inv_1","paymentStatus":"paid"}}"#,
        )
        .unwrap();
        let outcome = WebhookOutcome::from(body);
        assert_eq!(outcome.external_id, "inv_1");
        assert_eq!(outcome.status, CanonicalPaymentStatus::Active);
    }

    #[test]
    fn webhook_v1_shape_decodes() {
        let body: LytexWebhookBody =
            serde_json::from_slice(br#"{"paymentId":"inv_2","status":"Expired"}"#).unwrap();
        let outcome = WebhookOutcome::from(body);
        assert_eq!(outcome.external_id, "inv_2");
        assert_eq!(outcome.status, CanonicalPaymentStatus::Suspended);
    }

    #[test]
    fn webhook_without_id_or_status_fails_to_decode() {
        assert!(
            serde_json::from_slice::<LytexWebhookBody>(br#"{"event":"invoice.updated"}"#).is_err()
        );
        assert!(serde_json::from_slice::<LytexWebhookBody>(br#"{"id":"inv_3"}"#).is_err());
    }

    #[test]
    fn invoice_amounts_are_integer_minor_units() {
        let enrollment = EnrollmentDetails {
            code: "ENR-1".to_string(),
            amount: FloatMajorUnit::new(199.90),
            course_id: "crs_1".to_string(),
            student_id: "stu_1".to_string(),
            payment_method: None,
            student: edupay_interfaces::types::StudentDetails {
                full_name: "Maria Souza".to_string(),
                email: "maria@uni.edu".to_string(),
                cpf: None,
            },
            course: edupay_interfaces::types::CourseDetails {
                name: "Direito Tributário".to_string(),
                price: FloatMajorUnit::new(199.90),
            },
        };
        let request = LytexInvoiceRequest::try_from(LytexRouterData {
            amount_minor: MinorUnit::new(19990),
            due_date: "2026-09-03".to_string(),
            client_id: None,
            enrollment: &enrollment,
        })
        .unwrap();

        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items.first().map(|i| i.value), Some(19990));
        assert!(!request.payment_methods.credit_card.enable);

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("clientId").is_none());
        assert_eq!(
            json.pointer("/paymentMethods/boleto/enable"),
            Some(&serde_json::Value::Bool(true))
        );
    }
}
