//! Canonical enums of the payment subsystem.

use serde::{Deserialize, Serialize};

/// The internal payment state every provider-specific status is
/// normalized into.
///
/// Unknown or unmapped provider statuses must resolve to
/// [`PendingPayment`](Self::PendingPayment): the fail-safe default is to
/// under-report success, never to report a charge as confirmed.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CanonicalPaymentStatus {
    /// Payment confirmed, enrollment is active.
    Active,
    /// Awaiting payment, or status could not be determined.
    #[default]
    PendingPayment,
    /// Payment overdue or expired.
    Suspended,
    /// Payment refunded, charged back or deleted.
    Cancelled,
}

/// Payment method requested on the enrollment.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    /// Brazilian bank slip, the default billing type.
    #[default]
    Boleto,
    /// Credit card.
    CreditCard,
    /// Pix instant transfer.
    Pix,
}

/// Supported billing providers.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GatewayKind {
    /// Asaas, authenticated with a static API key.
    Asaas,
    /// Lytex, authenticated with a client-credentials bearer token.
    Lytex,
}
