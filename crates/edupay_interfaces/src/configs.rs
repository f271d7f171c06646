//! Gateway configuration.
//!
//! Credentials come from the process environment. A missing credential
//! is not a startup failure: the affected provider runs in simulation
//! mode so the rest of the system stays testable and demoable.

use masking::Secret;
use serde::Deserialize;

use crate::consts;

/// Settings of every supported provider.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Settings {
    /// Asaas adapter settings.
    #[serde(default)]
    pub asaas: AsaasSettings,
    /// Lytex adapter settings.
    #[serde(default)]
    pub lytex: LytexSettings,
}

/// Asaas connection settings.
#[derive(Clone, Debug, Deserialize)]
pub struct AsaasSettings {
    /// REST endpoint base.
    #[serde(default = "AsaasSettings::default_base_url")]
    pub base_url: String,
    /// Static API key sent as the `access_token` header. Absent key
    /// puts the adapter in simulation mode.
    pub api_key: Option<Secret<String>>,
}

impl AsaasSettings {
    fn default_base_url() -> String {
        consts::ASAAS_DEFAULT_BASE_URL.to_string()
    }
}

impl Default for AsaasSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            api_key: None,
        }
    }
}

/// Lytex connection settings.
#[derive(Clone, Debug, Deserialize)]
pub struct LytexSettings {
    /// REST endpoint base.
    #[serde(default = "LytexSettings::default_base_url")]
    pub base_url: String,
    /// OAuth client id.
    pub client_id: Option<Secret<String>>,
    /// OAuth client secret. Either credential absent puts the adapter
    /// in simulation mode.
    pub client_secret: Option<Secret<String>>,
}

impl LytexSettings {
    fn default_base_url() -> String {
        consts::LYTEX_DEFAULT_BASE_URL.to_string()
    }

    /// Whether both halves of the client-credentials pair are present.
    pub fn has_credentials(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

impl Default for LytexSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            client_id: None,
            client_secret: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// Consumed variables: `ASAAS_API_KEY`, `ASAAS_API_URL`,
    /// `LYTEX_CLIENT_ID`, `LYTEX_CLIENT_SECRET`, `LYTEX_API_URL`.
    pub fn from_env() -> Self {
        Self {
            asaas: AsaasSettings {
                base_url: std::env::var("ASAAS_API_URL")
                    .unwrap_or_else(|_| AsaasSettings::default_base_url()),
                api_key: std::env::var("ASAAS_API_KEY").ok().map(Secret::new),
            },
            lytex: LytexSettings {
                base_url: std::env::var("LYTEX_API_URL")
                    .unwrap_or_else(|_| LytexSettings::default_base_url()),
                client_id: std::env::var("LYTEX_CLIENT_ID").ok().map(Secret::new),
                client_secret: std::env::var("LYTEX_CLIENT_SECRET").ok().map(Secret::new),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production_with_no_credentials() {
        let settings = Settings::default();
        assert_eq!(settings.asaas.base_url, consts::ASAAS_DEFAULT_BASE_URL);
        assert!(settings.asaas.api_key.is_none());
        assert!(!settings.lytex.has_credentials());
    }

    #[test]
    fn lytex_needs_both_credential_halves() {
        let settings = LytexSettings {
            client_id: Some(Secret::new("id".to_string())),
            ..Default::default()
        };
        assert!(!settings.has_credentials());
    }
}
