//! Header names used by the provider adapters.

pub(crate) mod headers {
    pub(crate) const AUTHORIZATION: &str = "Authorization";
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    /// Asaas authenticates with a bare `access_token` header rather
    /// than an `Authorization` scheme.
    pub(crate) const ASAAS_ACCESS_TOKEN: &str = "access_token";
}
