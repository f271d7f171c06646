//! Constants used across the gateway layer.

/// Production Asaas endpoint, used when `ASAAS_API_URL` is not set.
pub const ASAAS_DEFAULT_BASE_URL: &str = "https://api.asaas.com/v3";

/// Production Lytex endpoint, used when `LYTEX_API_URL` is not set.
pub const LYTEX_DEFAULT_BASE_URL: &str = "https://api-pay.lytex.com.br";

/// A cached bearer token is reused only while it stays valid for at
/// least this long, guarding against expiry mid-request.
pub const TOKEN_EXPIRY_SAFETY_MARGIN_SECS: i64 = 5 * 60;

/// Assumed token lifetime when the provider omits a TTL.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Infix of synthetic external ids issued in simulation mode, e.g.
/// `asaas_sim_17123...`.
pub const SIMULATED_ID_INFIX: &str = "sim";

/// Infix of placeholder customer ids synthesized when registration at
/// the provider fails, e.g. `lytex_tmp_stu42`. Placeholders are
/// reconciled later and must stay distinguishable in stored data.
pub const PLACEHOLDER_ID_INFIX: &str = "tmp";
