//! Error taxonomy of the gateway layer.

/// Errors raised by gateway adapters.
///
/// Strictness follows the money: anything that could mark a payment as
/// paid incorrectly surfaces as an error, while customer-registration
/// niceties are degraded by the simulation decorator before callers see
/// them.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Provider credentials are missing or of the wrong shape.
    #[error("Failed to obtain authentication credentials")]
    FailedToObtainAuthType,
    /// The client-credentials exchange failed.
    #[error("Failed to obtain an access token from the provider")]
    AccessTokenAuthFailed,
    /// The outbound call did not complete.
    #[error("Request to the provider did not complete")]
    RequestDispatchFailed,
    /// The provider answered outside the 2xx range.
    #[error("Provider returned an unexpected response: {status_code}")]
    UnexpectedResponse {
        /// HTTP status code of the reply.
        status_code: u16,
    },
    /// The provider reply could not be deserialized.
    #[error("Failed to deserialize the provider response")]
    ResponseDeserializationFailed,
    /// A request body could not be serialized.
    #[error("Failed to encode the request body")]
    RequestEncodingFailed,
    /// Invoice/payment creation failed at the provider.
    #[error("Payment creation failed at the provider")]
    PaymentCreationFailed,
    /// Customer creation failed at the provider.
    #[error("Customer registration failed at the provider")]
    CustomerRegistrationFailed,
    /// A webhook payload could not be interpreted.
    #[error("Failed to decode the webhook body")]
    WebhookBodyDecodingFailed,
    /// The webhook payload lacks a payment reference.
    #[error("Webhook payload carries no payment reference")]
    WebhookReferenceIdNotFound,
    /// A field required to talk to the provider was absent.
    #[error("Missing required field: {field_name}")]
    MissingRequiredField {
        /// Name of the absent field.
        field_name: &'static str,
    },
    /// Amount could not be converted to the provider's unit.
    #[error("Failed to convert the enrollment amount")]
    AmountConversionFailed,
    /// The enrollment amount is zero, negative or not a number.
    #[error("Enrollment amount must be positive")]
    InvalidAmount,
    /// The factory was asked for a provider it does not know.
    #[error("Unknown payment gateway: {name}")]
    UnknownGateway {
        /// The unrecognized provider name.
        name: String,
    },
}
