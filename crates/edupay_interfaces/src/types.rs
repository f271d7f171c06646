//! Types exchanged between callers, adapters and providers.

use common_enums::{CanonicalPaymentStatus, PaymentMethod};
use common_utils::types::FloatMajorUnit;
use masking::{PeekInterface, Secret};
use time::{Duration, OffsetDateTime};

use crate::consts;

/// Payer identity carried on an enrollment.
#[derive(Clone, Debug)]
pub struct StudentDetails {
    /// Full legal name.
    pub full_name: String,
    /// Contact e-mail, also the primary customer lookup key.
    pub email: String,
    /// CPF, when collected. Treated as PII.
    pub cpf: Option<Secret<String>>,
}

/// Course data consumed from the enrollment collaborator.
#[derive(Clone, Debug)]
pub struct CourseDetails {
    /// Course display name, used as the invoice line item.
    pub name: String,
    /// Listed course price in major units.
    pub price: FloatMajorUnit,
}

/// The slice of an enrollment this subsystem consumes.
#[derive(Clone, Debug)]
pub struct EnrollmentDetails {
    /// Enrollment code, forwarded as the external reference.
    pub code: String,
    /// Payable amount in major units; must be positive.
    pub amount: FloatMajorUnit,
    /// Course identifier.
    pub course_id: String,
    /// Student identifier.
    pub student_id: String,
    /// Requested payment method; boleto when absent.
    pub payment_method: Option<PaymentMethod>,
    /// Payer identity.
    pub student: StudentDetails,
    /// Course data.
    pub course: CourseDetails,
}

/// Payer data for standalone customer registration.
#[derive(Clone, Debug)]
pub struct CustomerDetails {
    /// Internal user id, used in placeholder ids.
    pub id: String,
    /// Full legal name.
    pub full_name: String,
    /// Contact e-mail.
    pub email: String,
    /// CPF, when collected.
    pub cpf: Option<Secret<String>>,
}

/// Lookup key for customer existence checks.
#[derive(Clone, Debug)]
pub struct CustomerLookup {
    /// Contact e-mail.
    pub email: String,
    /// CPF, when available; narrows the provider-side search.
    pub cpf: Option<Secret<String>>,
}

impl From<&CustomerDetails> for CustomerLookup {
    fn from(customer: &CustomerDetails) -> Self {
        Self {
            email: customer.email.clone(),
            cpf: customer.cpf.clone(),
        }
    }
}

/// Reference to a customer record at the provider.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExternalCustomerRef {
    /// Provider-side customer id, or a `<gateway>_tmp_` placeholder.
    pub customer_id: String,
    /// Whether the customer already existed before this call.
    pub already_exists: bool,
}

/// Result of a customer existence check.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CustomerExistence {
    /// Whether a matching customer record exists at the provider.
    pub exists: bool,
    /// The provider-side id, when one was found.
    pub customer_id: Option<String>,
}

/// Reference to a payment created at the provider. Immutable once
/// issued; the external id is the join key for status polls and
/// webhooks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExternalPaymentRef {
    /// Provider-side payment/invoice id.
    pub external_id: String,
    /// Payer-facing checkout URL.
    pub payment_url: String,
}

/// Decoded webhook notification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WebhookOutcome {
    /// Canonical status conveyed by the notification.
    pub status: CanonicalPaymentStatus,
    /// External id of the payment the notification refers to.
    pub external_id: String,
}

/// A provider bearer token with its expiry.
#[derive(Clone, Debug)]
pub struct AccessToken {
    /// The bearer token.
    pub token: Secret<String>,
    /// Instant after which the token is no longer accepted.
    pub expires_at: OffsetDateTime,
}

impl AccessToken {
    /// Build a token from the provider reply, falling back to the
    /// default TTL when the provider omits one.
    pub fn from_provider_reply(
        token: Secret<String>,
        expires_in_secs: Option<i64>,
        now: OffsetDateTime,
    ) -> Self {
        let ttl = expires_in_secs.unwrap_or(consts::DEFAULT_TOKEN_TTL_SECS);
        Self {
            token,
            expires_at: now + Duration::seconds(ttl),
        }
    }

    /// Whether the token is still safe to use at `now`: it must remain
    /// valid for at least the safety margin, so it cannot expire
    /// mid-request.
    pub fn is_usable(&self, now: OffsetDateTime) -> bool {
        now + Duration::seconds(consts::TOKEN_EXPIRY_SAFETY_MARGIN_SECS) < self.expires_at
    }

    /// Borrow the raw token value for header construction.
    pub fn peek_token(&self) -> &str {
        self.token.peek()
    }
}

/// Raw reply from a provider call.
#[derive(Clone, Debug)]
pub struct Response {
    /// HTTP status code.
    pub status_code: u16,
    /// Raw body bytes.
    pub response: bytes::Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_usable_only_outside_the_safety_margin() {
        let now = OffsetDateTime::UNIX_EPOCH;
        let token =
            AccessToken::from_provider_reply(Secret::new("tok".to_string()), Some(3600), now);

        assert!(token.is_usable(now));
        // 5 minutes before expiry the margin kicks in.
        assert!(!token.is_usable(now + Duration::seconds(3600 - 299)));
        assert!(!token.is_usable(now + Duration::seconds(3601)));
    }

    #[test]
    fn token_ttl_defaults_when_provider_omits_it() {
        let now = OffsetDateTime::UNIX_EPOCH;
        let token = AccessToken::from_provider_reply(Secret::new("tok".to_string()), None, now);
        assert_eq!(
            token.expires_at,
            now + Duration::seconds(consts::DEFAULT_TOKEN_TTL_SECS)
        );
    }
}
