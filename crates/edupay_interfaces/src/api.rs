//! The provider adapter contract.

use common_enums::CanonicalPaymentStatus;
use common_utils::errors::CustomResult;

use crate::{
    errors::GatewayError,
    types::{
        CustomerDetails, CustomerExistence, CustomerLookup, EnrollmentDetails,
        ExternalCustomerRef, ExternalPaymentRef, WebhookOutcome,
    },
};

/// Contract implemented by every billing provider adapter.
///
/// Adapters are strict: provider failures surface as errors. The
/// lenient behaviors the callers rely on — simulation without
/// credentials, degradation of status queries to pending, placeholder
/// customer ids — are layered on uniformly by the simulation-fallback
/// decorator, so the leniency policy lives in exactly one place.
#[async_trait::async_trait]
pub trait PaymentGateway: std::fmt::Debug + Send + Sync {
    /// Stable identifier of the provider, used in logs and id prefixes.
    fn id(&self) -> &'static str;

    /// Whether live credentials are configured. When `false` the
    /// decorator answers from simulation and the adapter is never hit.
    fn has_credentials(&self) -> bool;

    /// Resolve or create the payer at the provider and submit a
    /// payment for the enrollment's amount.
    async fn create_payment(
        &self,
        enrollment: &EnrollmentDetails,
    ) -> CustomResult<ExternalPaymentRef, GatewayError>;

    /// Poll the canonical status of a previously created payment.
    async fn get_payment_status(
        &self,
        external_id: &str,
    ) -> CustomResult<CanonicalPaymentStatus, GatewayError>;

    /// Decode an inbound webhook payload. Strict in every mode: a
    /// payload without an identifiable payment id and status must fail
    /// rather than be acknowledged as a status change.
    fn process_webhook(&self, body: &[u8]) -> CustomResult<WebhookOutcome, GatewayError>;

    /// Register the payer at the provider, checking for an existing
    /// record first so repeated calls never create duplicates.
    async fn register_student(
        &self,
        customer: &CustomerDetails,
    ) -> CustomResult<ExternalCustomerRef, GatewayError>;

    /// Look up whether the payer already has a customer record.
    async fn check_student_exists(
        &self,
        lookup: &CustomerLookup,
    ) -> CustomResult<CustomerExistence, GatewayError>;
}
