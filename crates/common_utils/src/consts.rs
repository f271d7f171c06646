//! Constants shared across the workspace.

/// Timeout applied to every outbound provider call. Calls that do not
/// return within this bound fail closed and are mapped per the caller's
/// degradation rules.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Number of decimal places in the base currency (BRL).
pub const BASE_CURRENCY_EXPONENT: u32 = 2;
