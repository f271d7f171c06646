pub mod transformers;

use common_enums::CanonicalPaymentStatus;
use common_utils::{
    errors::CustomResult,
    ext_traits::{ByteSliceExt, Encode},
    request::{Headers, Method, Request, RequestBuilder},
};
use edupay_env::logger;
use edupay_interfaces::{
    api::PaymentGateway,
    configs::AsaasSettings,
    errors::GatewayError,
    types::{
        CustomerDetails, CustomerExistence, CustomerLookup, EnrollmentDetails,
        ExternalCustomerRef, ExternalPaymentRef, Response, WebhookOutcome,
    },
};
use error_stack::{IntoReport, ResultExt};
use masking::{Mask, PeekInterface};
use time::{macros::format_description, Duration, OffsetDateTime};
use transformers as asaas;

use crate::{constants::headers, utils};

/// Days until a freshly created charge falls due.
const DUE_DATE_OFFSET_DAYS: i64 = 7;

/// Adapter for the Asaas REST API, authenticated with a static API key.
#[derive(Clone, Debug)]
pub struct Asaas {
    settings: AsaasSettings,
    client: reqwest::Client,
}

impl Asaas {
    pub fn new(settings: AsaasSettings, client: reqwest::Client) -> Self {
        Self { settings, client }
    }

    fn build_headers(&self) -> CustomResult<Headers, GatewayError> {
        let auth = asaas::AsaasAuthType::try_from(&self.settings)?;
        Ok(vec![
            (
                headers::CONTENT_TYPE.to_string(),
                "application/json".to_string().into(),
            ),
            (
                headers::ASAAS_ACCESS_TOKEN.to_string(),
                auth.api_key.into_masked(),
            ),
        ])
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url, path)
    }

    async fn call(&self, request: Request) -> CustomResult<Response, GatewayError> {
        let response = utils::send_request(&self.client, request).await?;
        utils::ensure_success(response)
    }

    /// Search for an existing customer by e-mail and, when available,
    /// CPF/CNPJ. One pass only; the check-then-create race window is
    /// accepted.
    async fn find_customer(
        &self,
        lookup: &CustomerLookup,
    ) -> CustomResult<Option<String>, GatewayError> {
        let mut pairs = vec![("email", lookup.email.as_str())];
        if let Some(cpf) = lookup.cpf.as_ref() {
            pairs.push(("cpfCnpj", cpf.peek().as_str()));
        }
        let request = RequestBuilder::new()
            .method(Method::Get)
            .url(&format!(
                "{}?{}",
                self.url("/customers"),
                utils::encode_query(&pairs)
            ))
            .headers(self.build_headers()?)
            .build();

        let response = self.call(request).await?;
        let listing: asaas::AsaasCustomerListResponse = response
            .response
            .parse_struct("AsaasCustomerListResponse")
            .change_context(GatewayError::ResponseDeserializationFailed)?;

        Ok(listing.data.into_iter().next().map(|customer| customer.id))
    }

    async fn create_customer(
        &self,
        customer: &CustomerDetails,
    ) -> CustomResult<String, GatewayError> {
        let body = asaas::AsaasCustomerRequest::from(customer)
            .encode_to_value("AsaasCustomerRequest")
            .change_context(GatewayError::RequestEncodingFailed)?;
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url(&self.url("/customers"))
            .headers(self.build_headers()?)
            .set_body(body)
            .build();

        let response = self
            .call(request)
            .await
            .change_context(GatewayError::CustomerRegistrationFailed)?;
        let created: asaas::AsaasCustomer = response
            .response
            .parse_struct("AsaasCustomer")
            .change_context(GatewayError::ResponseDeserializationFailed)?;

        logger::info!(customer_id = %created.id, "created asaas customer");
        Ok(created.id)
    }

    async fn resolve_customer(
        &self,
        customer: &CustomerDetails,
    ) -> CustomResult<ExternalCustomerRef, GatewayError> {
        if let Some(customer_id) = self.find_customer(&customer.into()).await? {
            return Ok(ExternalCustomerRef {
                customer_id,
                already_exists: true,
            });
        }
        Ok(ExternalCustomerRef {
            customer_id: self.create_customer(customer).await?,
            already_exists: false,
        })
    }

    fn due_date() -> CustomResult<String, GatewayError> {
        let date = (OffsetDateTime::now_utc() + Duration::days(DUE_DATE_OFFSET_DAYS)).date();
        date.format(format_description!("[year]-[month]-[day]"))
            .into_report()
            .change_context(GatewayError::PaymentCreationFailed)
    }
}

#[async_trait::async_trait]
impl PaymentGateway for Asaas {
    fn id(&self) -> &'static str {
        "asaas"
    }

    fn has_credentials(&self) -> bool {
        self.settings.api_key.is_some()
    }

    async fn create_payment(
        &self,
        enrollment: &EnrollmentDetails,
    ) -> CustomResult<ExternalPaymentRef, GatewayError> {
        let payer = CustomerDetails {
            id: enrollment.student_id.clone(),
            full_name: enrollment.student.full_name.clone(),
            email: enrollment.student.email.clone(),
            cpf: enrollment.student.cpf.clone(),
        };
        let customer = self.resolve_customer(&payer).await?;

        let body =
            asaas::AsaasPaymentRequest::new(enrollment, &customer.customer_id, Self::due_date()?)
                .encode_to_value("AsaasPaymentRequest")
                .change_context(GatewayError::RequestEncodingFailed)?;
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url(&self.url("/payments"))
            .headers(self.build_headers()?)
            .set_body(body)
            .build();

        let response = self
            .call(request)
            .await
            .change_context(GatewayError::PaymentCreationFailed)?;
        let payment: asaas::AsaasPaymentResponse = response
            .response
            .parse_struct("AsaasPaymentResponse")
            .change_context(GatewayError::ResponseDeserializationFailed)?;

        logger::info!(external_id = %payment.id, enrollment = %enrollment.code, "created asaas payment");
        ExternalPaymentRef::try_from(payment)
    }

    async fn get_payment_status(
        &self,
        external_id: &str,
    ) -> CustomResult<CanonicalPaymentStatus, GatewayError> {
        let request = RequestBuilder::new()
            .method(Method::Get)
            .url(&self.url(&format!("/payments/{external_id}")))
            .headers(self.build_headers()?)
            .build();

        let response = self.call(request).await?;
        let payment: asaas::AsaasPaymentResponse = response
            .response
            .parse_struct("AsaasPaymentResponse")
            .change_context(GatewayError::ResponseDeserializationFailed)?;

        Ok(payment.status.into())
    }

    fn process_webhook(&self, body: &[u8]) -> CustomResult<WebhookOutcome, GatewayError> {
        let notification: asaas::AsaasWebhookBody = body
            .parse_struct("AsaasWebhookBody")
            .change_context(GatewayError::WebhookBodyDecodingFailed)?;
        Ok(notification.into())
    }

    async fn register_student(
        &self,
        customer: &CustomerDetails,
    ) -> CustomResult<ExternalCustomerRef, GatewayError> {
        self.resolve_customer(customer).await
    }

    async fn check_student_exists(
        &self,
        lookup: &CustomerLookup,
    ) -> CustomResult<CustomerExistence, GatewayError> {
        let customer_id = self.find_customer(lookup).await?;
        Ok(CustomerExistence {
            exists: customer_id.is_some(),
            customer_id,
        })
    }
}
