//! Simulation and degradation policy, layered over every adapter.
//!
//! The adapters themselves are strict; this decorator is the single
//! place that decides when to answer from simulation instead of the
//! provider and when to degrade a failure into a harmless default.
//! The ground rules:
//!
//! - Without credentials the wrapped adapter is never called; payments,
//!   registrations and status queries are all answered synthetically.
//! - Status polls degrade to pending on provider failure. Pending is
//!   the only safe downgrade: it never activates or cancels anything.
//! - Webhooks stay strict in every mode. Acknowledging a payload that
//!   could not be decoded would silently drop a real status change.

use common_enums::CanonicalPaymentStatus;
use common_utils::errors::CustomResult;
use edupay_env::logger;
use edupay_interfaces::{
    api::PaymentGateway,
    consts::{PLACEHOLDER_ID_INFIX, SIMULATED_ID_INFIX},
    errors::GatewayError,
    types::{
        CustomerDetails, CustomerExistence, CustomerLookup, EnrollmentDetails,
        ExternalCustomerRef, ExternalPaymentRef, WebhookOutcome,
    },
};
use time::OffsetDateTime;

/// Decorator adding the simulation and degradation policy to an
/// adapter.
///
/// `simulate_on_creation_failure` additionally turns a live payment
/// creation failure into a simulated payment instead of an error, for
/// providers whose sandbox is unreliable enough that enrollment flows
/// must not depend on it.
#[derive(Debug)]
pub struct SimulationFallback<G> {
    inner: G,
    simulate_on_creation_failure: bool,
}

impl<G: PaymentGateway> SimulationFallback<G> {
    pub fn new(inner: G, simulate_on_creation_failure: bool) -> Self {
        Self {
            inner,
            simulate_on_creation_failure,
        }
    }

    fn simulated_payment(&self) -> ExternalPaymentRef {
        let external_id = simulated_external_id(self.inner.id());
        ExternalPaymentRef {
            payment_url: format!("https://pay.simulated.invalid/checkout/{external_id}"),
            external_id,
        }
    }

    fn simulated_customer(&self, user_id: &str) -> ExternalCustomerRef {
        ExternalCustomerRef {
            customer_id: format!("{}_{SIMULATED_ID_INFIX}_{user_id}", self.inner.id()),
            already_exists: false,
        }
    }

    fn placeholder_customer(&self, user_id: &str) -> ExternalCustomerRef {
        ExternalCustomerRef {
            customer_id: format!("{}_{PLACEHOLDER_ID_INFIX}_{user_id}", self.inner.id()),
            already_exists: false,
        }
    }
}

/// Synthetic external id: `<gateway>_sim_<nanos>`. The infix keeps
/// simulated payments recognizable in stored data, the timestamp keeps
/// them unique.
fn simulated_external_id(gateway_id: &str) -> String {
    format!(
        "{gateway_id}_{SIMULATED_ID_INFIX}_{}",
        OffsetDateTime::now_utc().unix_timestamp_nanos()
    )
}

/// Whether an external id was issued by the simulation layer.
fn is_simulated_id(external_id: &str) -> bool {
    external_id.contains(&format!("_{SIMULATED_ID_INFIX}_"))
}

/// Deterministic status of a simulated payment, keyed on the last
/// decimal digit of the external id so demo flows can steer the
/// outcome: 1 active, 2 pending, 3 suspended, 4 cancelled, anything
/// else pending.
fn simulated_status(external_id: &str) -> CanonicalPaymentStatus {
    match external_id.chars().rev().find(char::is_ascii_digit) {
        Some('1') => CanonicalPaymentStatus::Active,
        Some('2') => CanonicalPaymentStatus::PendingPayment,
        Some('3') => CanonicalPaymentStatus::Suspended,
        Some('4') => CanonicalPaymentStatus::Cancelled,
        _ => CanonicalPaymentStatus::PendingPayment,
    }
}

#[async_trait::async_trait]
impl<G: PaymentGateway> PaymentGateway for SimulationFallback<G> {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    fn has_credentials(&self) -> bool {
        self.inner.has_credentials()
    }

    async fn create_payment(
        &self,
        enrollment: &EnrollmentDetails,
    ) -> CustomResult<ExternalPaymentRef, GatewayError> {
        let amount = enrollment.amount.get_amount_as_f64();
        if amount <= 0.0 || amount.is_nan() {
            return Err(GatewayError::InvalidAmount.into());
        }

        if !self.inner.has_credentials() {
            let payment = self.simulated_payment();
            logger::info!(
                gateway = self.inner.id(),
                external_id = %payment.external_id,
                enrollment = %enrollment.code,
                "no credentials configured, issuing simulated payment"
            );
            return Ok(payment);
        }

        match self.inner.create_payment(enrollment).await {
            Ok(payment) => Ok(payment),
            Err(error) if self.simulate_on_creation_failure => {
                let payment = self.simulated_payment();
                logger::warn!(
                    gateway = self.inner.id(),
                    ?error,
                    external_id = %payment.external_id,
                    enrollment = %enrollment.code,
                    "payment creation failed, falling back to simulation"
                );
                Ok(payment)
            }
            Err(error) => Err(error),
        }
    }

    async fn get_payment_status(
        &self,
        external_id: &str,
    ) -> CustomResult<CanonicalPaymentStatus, GatewayError> {
        if !self.inner.has_credentials() || is_simulated_id(external_id) {
            return Ok(simulated_status(external_id));
        }

        match self.inner.get_payment_status(external_id).await {
            Ok(status) => Ok(status),
            Err(error) => {
                logger::warn!(
                    gateway = self.inner.id(),
                    ?error,
                    external_id,
                    "status query failed, degrading to pending"
                );
                Ok(CanonicalPaymentStatus::PendingPayment)
            }
        }
    }

    fn process_webhook(&self, body: &[u8]) -> CustomResult<WebhookOutcome, GatewayError> {
        self.inner.process_webhook(body)
    }

    async fn register_student(
        &self,
        customer: &CustomerDetails,
    ) -> CustomResult<ExternalCustomerRef, GatewayError> {
        if !self.inner.has_credentials() {
            return Ok(self.simulated_customer(&customer.id));
        }

        match self.inner.register_student(customer).await {
            Ok(reference) => Ok(reference),
            Err(error) => {
                let placeholder = self.placeholder_customer(&customer.id);
                logger::warn!(
                    gateway = self.inner.id(),
                    ?error,
                    customer_id = %placeholder.customer_id,
                    "registration failed, issuing placeholder customer id"
                );
                Ok(placeholder)
            }
        }
    }

    async fn check_student_exists(
        &self,
        lookup: &CustomerLookup,
    ) -> CustomResult<CustomerExistence, GatewayError> {
        if !self.inner.has_credentials() {
            return Ok(CustomerExistence::default());
        }

        match self.inner.check_student_exists(lookup).await {
            Ok(existence) => Ok(existence),
            Err(error) => {
                logger::warn!(
                    gateway = self.inner.id(),
                    ?error,
                    "existence check failed, reporting not found"
                );
                Ok(CustomerExistence::default())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use common_utils::types::FloatMajorUnit;
    use edupay_interfaces::types::{CourseDetails, StudentDetails};

    use super::*;

    /// Inner adapter whose live calls always fail, for exercising the
    /// degradation paths.
    #[derive(Debug)]
    struct FailingInner {
        credentials: bool,
    }

    #[async_trait::async_trait]
    impl PaymentGateway for FailingInner {
        fn id(&self) -> &'static str {
            "failing"
        }

        fn has_credentials(&self) -> bool {
            self.credentials
        }

        async fn create_payment(
            &self,
            _enrollment: &EnrollmentDetails,
        ) -> CustomResult<ExternalPaymentRef, GatewayError> {
            Err(GatewayError::PaymentCreationFailed.into())
        }

        async fn get_payment_status(
            &self,
            _external_id: &str,
        ) -> CustomResult<CanonicalPaymentStatus, GatewayError> {
            Err(GatewayError::RequestDispatchFailed.into())
        }

        fn process_webhook(&self, _body: &[u8]) -> CustomResult<WebhookOutcome, GatewayError> {
            Err(GatewayError::WebhookBodyDecodingFailed.into())
        }

        async fn register_student(
            &self,
            _customer: &CustomerDetails,
        ) -> CustomResult<ExternalCustomerRef, GatewayError> {
            Err(GatewayError::CustomerRegistrationFailed.into())
        }

        async fn check_student_exists(
            &self,
            _lookup: &CustomerLookup,
        ) -> CustomResult<CustomerExistence, GatewayError> {
            Err(GatewayError::RequestDispatchFailed.into())
        }
    }

    fn enrollment(amount: f64) -> EnrollmentDetails {
        EnrollmentDetails {
            code: "ENR-77".to_string(),
            amount: FloatMajorUnit::new(amount),
            course_id: "crs_1".to_string(),
            student_id: "stu_42".to_string(),
            payment_method: None,
            student: StudentDetails {
                full_name: "João Lima".to_string(),
                email: "joao@uni.edu".to_string(),
                cpf: None,
            },
            course: CourseDetails {
                name: "Engenharia".to_string(),
                price: FloatMajorUnit::new(amount),
            },
        }
    }

    fn customer() -> CustomerDetails {
        CustomerDetails {
            id: "stu_42".to_string(),
            full_name: "João Lima".to_string(),
            email: "joao@uni.edu".to_string(),
            cpf: None,
        }
    }

    #[tokio::test]
    async fn nonpositive_amounts_are_rejected_before_any_call() {
        let gateway = SimulationFallback::new(FailingInner { credentials: false }, true);
        assert!(gateway.create_payment(&enrollment(0.0)).await.is_err());
        assert!(gateway.create_payment(&enrollment(-10.0)).await.is_err());
        assert!(gateway.create_payment(&enrollment(f64::NAN)).await.is_err());
    }

    #[tokio::test]
    async fn missing_credentials_yield_simulated_payments() {
        let gateway = SimulationFallback::new(FailingInner { credentials: false }, false);
        let payment = gateway.create_payment(&enrollment(100.0)).await.unwrap();
        assert!(payment.external_id.starts_with("failing_sim_"));
        assert!(payment.payment_url.contains(&payment.external_id));
    }

    #[tokio::test]
    async fn creation_failure_falls_back_only_when_enabled() {
        let lenient = SimulationFallback::new(FailingInner { credentials: true }, true);
        let payment = lenient.create_payment(&enrollment(100.0)).await.unwrap();
        assert!(payment.external_id.starts_with("failing_sim_"));

        let strict = SimulationFallback::new(FailingInner { credentials: true }, false);
        assert!(strict.create_payment(&enrollment(100.0)).await.is_err());
    }

    #[tokio::test]
    async fn status_failures_degrade_to_pending() {
        let gateway = SimulationFallback::new(FailingInner { credentials: true }, false);
        let status = gateway.get_payment_status("pay_real_9").await.unwrap();
        assert_eq!(status, CanonicalPaymentStatus::PendingPayment);
    }

    #[tokio::test]
    async fn simulated_ids_answer_deterministically_by_last_digit() {
        let gateway = SimulationFallback::new(FailingInner { credentials: false }, false);
        let cases = [
            ("failing_sim_1", CanonicalPaymentStatus::Active),
            ("failing_sim_2", CanonicalPaymentStatus::PendingPayment),
            ("failing_sim_3", CanonicalPaymentStatus::Suspended),
            ("failing_sim_4", CanonicalPaymentStatus::Cancelled),
            ("failing_sim_7", CanonicalPaymentStatus::PendingPayment),
            ("failing_sim_x", CanonicalPaymentStatus::PendingPayment),
        ];
        for (id, expected) in cases {
            assert_eq!(gateway.get_payment_status(id).await.unwrap(), expected, "{id}");
        }
    }

    #[tokio::test]
    async fn simulated_ids_bypass_the_live_adapter_even_with_credentials() {
        let gateway = SimulationFallback::new(FailingInner { credentials: true }, false);
        let status = gateway.get_payment_status("failing_sim_3").await.unwrap();
        assert_eq!(status, CanonicalPaymentStatus::Suspended);
    }

    #[tokio::test]
    async fn registration_failure_yields_a_placeholder_id() {
        let gateway = SimulationFallback::new(FailingInner { credentials: true }, false);
        let reference = gateway.register_student(&customer()).await.unwrap();
        assert_eq!(reference.customer_id, "failing_tmp_stu_42");
        assert!(!reference.already_exists);
    }

    #[tokio::test]
    async fn registration_without_credentials_yields_a_simulated_id() {
        let gateway = SimulationFallback::new(FailingInner { credentials: false }, false);
        let reference = gateway.register_student(&customer()).await.unwrap();
        assert_eq!(reference.customer_id, "failing_sim_stu_42");
    }

    #[tokio::test]
    async fn existence_check_failures_report_not_found() {
        let gateway = SimulationFallback::new(FailingInner { credentials: true }, false);
        let existence = gateway
            .check_student_exists(&CustomerLookup {
                email: "joao@uni.edu".to_string(),
                cpf: None,
            })
            .await
            .unwrap();
        assert!(!existence.exists);
        assert!(existence.customer_id.is_none());
    }

    #[tokio::test]
    async fn webhooks_stay_strict() {
        let gateway = SimulationFallback::new(FailingInner { credentials: false }, true);
        assert!(gateway.process_webhook(b"{}").is_err());
    }
}
