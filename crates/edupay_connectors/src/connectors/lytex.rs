pub mod transformers;

use std::sync::{Arc, Mutex};

use common_enums::CanonicalPaymentStatus;
use common_utils::{
    errors::CustomResult,
    ext_traits::{ByteSliceExt, Encode},
    request::{Headers, Method, Request, RequestBuilder},
};
use edupay_env::logger;
use edupay_interfaces::{
    api::PaymentGateway,
    configs::LytexSettings,
    errors::GatewayError,
    types::{
        AccessToken, CustomerDetails, CustomerExistence, CustomerLookup, EnrollmentDetails,
        ExternalCustomerRef, ExternalPaymentRef, Response, WebhookOutcome,
    },
};
use error_stack::{IntoReport, ResultExt};
use masking::{ExposeInterface, Mask, Secret};
use time::{macros::format_description, Duration, OffsetDateTime};
use transformers as lytex;

use crate::{constants::headers, utils};

/// Days until a freshly created invoice falls due.
const DUE_DATE_OFFSET_DAYS: i64 = 7;

/// Cached bearer token shared by clones of the adapter.
///
/// Reads and writes each take the lock briefly; the lock is never held
/// across the refresh call. Two concurrent callers may therefore both
/// refresh, which costs one redundant token round trip and nothing else.
#[derive(Clone, Debug, Default)]
pub struct AccessTokenStore {
    inner: Arc<Mutex<Option<AccessToken>>>,
}

impl AccessTokenStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<AccessToken>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            // AccessToken operations cannot leave the slot in a bad
            // state, so a poisoned lock is still safe to read.
            poisoned.into_inner()
        })
    }

    pub fn get_if_usable(&self, now: OffsetDateTime) -> Option<AccessToken> {
        self.lock().as_ref().filter(|t| t.is_usable(now)).cloned()
    }

    pub fn put(&self, token: AccessToken) {
        *self.lock() = Some(token);
    }
}

/// Adapter for the Lytex REST API, authenticated with OAuth client
/// credentials exchanged for a short-lived bearer token.
#[derive(Clone, Debug)]
pub struct Lytex {
    settings: LytexSettings,
    client: reqwest::Client,
    token_store: AccessTokenStore,
}

impl Lytex {
    pub fn new(settings: LytexSettings, client: reqwest::Client) -> Self {
        Self {
            settings,
            client,
            token_store: AccessTokenStore::default(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url, path)
    }

    async fn call(&self, request: Request) -> CustomResult<Response, GatewayError> {
        let response = utils::send_request(&self.client, request).await?;
        utils::ensure_success(response)
    }

    /// Exchange the client credentials for a fresh bearer token.
    async fn fetch_access_token(&self) -> CustomResult<AccessToken, GatewayError> {
        let auth = lytex::LytexAuthType::try_from(&self.settings)?;
        let body = lytex::LytexTokenRequest::from(auth)
            .encode_to_value("LytexTokenRequest")
            .change_context(GatewayError::RequestEncodingFailed)?;
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url(&self.url("/v2/auth/obtain_token"))
            .header(headers::CONTENT_TYPE, "application/json".to_string().into())
            .set_body(body)
            .build();

        let response = self
            .call(request)
            .await
            .change_context(GatewayError::AccessTokenAuthFailed)?;
        let reply: lytex::LytexTokenResponse = response
            .response
            .parse_struct("LytexTokenResponse")
            .change_context(GatewayError::AccessTokenAuthFailed)?;

        logger::info!("obtained lytex access token");
        Ok(AccessToken::from_provider_reply(
            reply.access_token,
            reply.expires_in,
            OffsetDateTime::now_utc(),
        ))
    }

    /// Return a usable token, refreshing through the auth endpoint when
    /// the cached one is absent or inside its expiry margin.
    async fn access_token(&self) -> CustomResult<AccessToken, GatewayError> {
        let now = OffsetDateTime::now_utc();
        if let Some(token) = self.token_store.get_if_usable(now) {
            return Ok(token);
        }
        let token = self.fetch_access_token().await?;
        self.token_store.put(token.clone());
        Ok(token)
    }

    async fn build_headers(&self) -> CustomResult<Headers, GatewayError> {
        let token = self.access_token().await?;
        Ok(vec![
            (
                headers::CONTENT_TYPE.to_string(),
                "application/json".to_string().into(),
            ),
            (
                headers::AUTHORIZATION.to_string(),
                Secret::new(format!("Bearer {}", token.peek_token())).into_masked(),
            ),
        ])
    }

    /// Search for a client by e-mail. Lookup failures are tolerated:
    /// invoice creation inlines the client data anyway, so a broken
    /// search must not block payment.
    async fn find_customer(&self, lookup: &CustomerLookup) -> Option<String> {
        match self.try_find_customer(lookup).await {
            Ok(found) => found,
            Err(error) => {
                logger::warn!(?error, "lytex client lookup failed, proceeding without id");
                None
            }
        }
    }

    async fn try_find_customer(
        &self,
        lookup: &CustomerLookup,
    ) -> CustomResult<Option<String>, GatewayError> {
        let mut pairs = vec![("email", lookup.email.as_str())];
        let cpf = lookup.cpf.clone().map(ExposeInterface::expose);
        if let Some(cpf) = cpf.as_deref() {
            pairs.push(("cpfCnpj", cpf));
        }
        let request = RequestBuilder::new()
            .method(Method::Get)
            .url(&format!(
                "{}?{}",
                self.url("/v2/clients"),
                utils::encode_query(&pairs)
            ))
            .headers(self.build_headers().await?)
            .build();

        let response = self.call(request).await?;
        let listing: lytex::LytexClientListResponse = response
            .response
            .parse_struct("LytexClientListResponse")
            .change_context(GatewayError::ResponseDeserializationFailed)?;

        Ok(listing.data.into_iter().next().map(|client| client.id))
    }

    async fn create_customer(
        &self,
        customer: &CustomerDetails,
    ) -> CustomResult<String, GatewayError> {
        let body = lytex::LytexClientRequest::from(customer)
            .encode_to_value("LytexClientRequest")
            .change_context(GatewayError::RequestEncodingFailed)?;
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url(&self.url("/v2/clients"))
            .headers(self.build_headers().await?)
            .set_body(body)
            .build();

        let response = self
            .call(request)
            .await
            .change_context(GatewayError::CustomerRegistrationFailed)?;
        let created: lytex::LytexClient = response
            .response
            .parse_struct("LytexClient")
            .change_context(GatewayError::ResponseDeserializationFailed)?;

        logger::info!(client_id = %created.id, "created lytex client");
        Ok(created.id)
    }

    fn due_date() -> CustomResult<String, GatewayError> {
        let date = (OffsetDateTime::now_utc() + Duration::days(DUE_DATE_OFFSET_DAYS)).date();
        date.format(format_description!("[year]-[month]-[day]"))
            .into_report()
            .change_context(GatewayError::PaymentCreationFailed)
    }
}

#[async_trait::async_trait]
impl PaymentGateway for Lytex {
    fn id(&self) -> &'static str {
        "lytex"
    }

    fn has_credentials(&self) -> bool {
        self.settings.has_credentials()
    }

    async fn create_payment(
        &self,
        enrollment: &EnrollmentDetails,
    ) -> CustomResult<ExternalPaymentRef, GatewayError> {
        let amount_minor = enrollment
            .amount
            .to_minor_unit()
            .into_report()
            .change_context(GatewayError::AmountConversionFailed)?;
        let client_id = self
            .find_customer(&CustomerLookup {
                email: enrollment.student.email.clone(),
                cpf: enrollment.student.cpf.clone(),
            })
            .await;

        let body = lytex::LytexInvoiceRequest::try_from(lytex::LytexRouterData {
            amount_minor,
            due_date: Self::due_date()?,
            client_id,
            enrollment,
        })?
        .encode_to_value("LytexInvoiceRequest")
        .change_context(GatewayError::RequestEncodingFailed)?;
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url(&self.url("/v2/invoices"))
            .headers(self.build_headers().await?)
            .set_body(body)
            .build();

        let response = self
            .call(request)
            .await
            .change_context(GatewayError::PaymentCreationFailed)?;
        let invoice: lytex::LytexInvoiceResponse = response
            .response
            .parse_struct("LytexInvoiceResponse")
            .change_context(GatewayError::ResponseDeserializationFailed)?;

        logger::info!(external_id = %invoice.id, enrollment = %enrollment.code, "created lytex invoice");
        ExternalPaymentRef::try_from(invoice)
    }

    async fn get_payment_status(
        &self,
        external_id: &str,
    ) -> CustomResult<CanonicalPaymentStatus, GatewayError> {
        let request = RequestBuilder::new()
            .method(Method::Get)
            .url(&self.url(&format!("/v2/invoices/{external_id}")))
            .headers(self.build_headers().await?)
            .build();

        let response = self.call(request).await?;
        let invoice: lytex::LytexInvoiceStatusResponse = response
            .response
            .parse_struct("LytexInvoiceStatusResponse")
            .change_context(GatewayError::ResponseDeserializationFailed)?;

        Ok(lytex::map_payment_status(&invoice.status))
    }

    fn process_webhook(&self, body: &[u8]) -> CustomResult<WebhookOutcome, GatewayError> {
        let notification: lytex::LytexWebhookBody = body
            .parse_struct("LytexWebhookBody")
            .change_context(GatewayError::WebhookBodyDecodingFailed)?;
        Ok(notification.into())
    }

    async fn register_student(
        &self,
        customer: &CustomerDetails,
    ) -> CustomResult<ExternalCustomerRef, GatewayError> {
        if let Some(client_id) = self.find_customer(&customer.into()).await {
            return Ok(ExternalCustomerRef {
                customer_id: client_id,
                already_exists: true,
            });
        }
        Ok(ExternalCustomerRef {
            customer_id: self.create_customer(customer).await?,
            already_exists: false,
        })
    }

    async fn check_student_exists(
        &self,
        lookup: &CustomerLookup,
    ) -> CustomResult<CustomerExistence, GatewayError> {
        let client_id = self.try_find_customer(lookup).await?;
        Ok(CustomerExistence {
            exists: client_id.is_some(),
            customer_id: client_id,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn gateway() -> Lytex {
        Lytex::new(LytexSettings::default(), reqwest::Client::new())
    }

    #[test]
    fn credentials_reported_from_settings() {
        assert!(!gateway().has_credentials());
    }

    #[test]
    fn webhook_decodes_both_generations() {
        let v2 = br#"{"event":"invoice.paid","data":{"id":"inv_7","status":"paid"}}"#;
        let outcome = gateway().process_webhook(v2).unwrap();
        assert_eq!(outcome.external_id, "inv_7");
        assert_eq!(outcome.status, CanonicalPaymentStatus::Active);

        let v1 = br#"{"paymentId":"inv_8","paymentStatus":"canceled"}"#;
        let outcome = gateway().process_webhook(v1).unwrap();
        assert_eq!(outcome.external_id, "inv_8");
        assert_eq!(outcome.status, CanonicalPaymentStatus::Cancelled);
    }

    #[test]
    fn undecodable_webhook_is_rejected() {
        assert!(gateway().process_webhook(b"not json").is_err());
        assert!(gateway().process_webhook(br#"{"event":"x"}"#).is_err());
    }

    #[test]
    fn token_store_hands_back_only_usable_tokens() {
        let store = AccessTokenStore::default();
        let now = OffsetDateTime::now_utc();
        assert!(store.get_if_usable(now).is_none());

        store.put(AccessToken::from_provider_reply(
            Secret::new("tok".to_string()),
            Some(3600),
            now,
        ));
        assert!(store.get_if_usable(now).is_some());

        store.put(AccessToken::from_provider_reply(
            Secret::new("old".to_string()),
            Some(0),
            now,
        ));
        assert!(store.get_if_usable(now).is_none());
    }
}
