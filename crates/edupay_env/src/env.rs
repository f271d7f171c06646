//! Deployment environment awareness.

use std::str::FromStr;

use serde::Deserialize;

/// Environment variable that selects the running environment.
pub const RUN_ENV: &str = "RUN_ENV";

/// The environment the application runs in.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Env {
    /// Local development.
    #[default]
    Development,
    /// Pre-production.
    Sandbox,
    /// Production.
    Production,
}

/// Read the current environment from `RUN_ENV`, defaulting to
/// development when absent or unparseable.
pub fn which() -> Env {
    std::env::var(RUN_ENV)
        .ok()
        .and_then(|v| Env::from_str(&v).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_parses_case_insensitively() {
        assert_eq!(Env::from_str("PRODUCTION").ok(), Some(Env::Production));
        assert_eq!(Env::from_str("sandbox").ok(), Some(Env::Sandbox));
        assert!(Env::from_str("staging").is_err());
    }
}
