//! Currency unit types.

use std::fmt::Display;

use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal, RoundingStrategy,
};
use serde::{Deserialize, Serialize};

use crate::errors::AmountConversionError;

/// An amount in the smallest currency unit (centavos for BRL).
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// Form a minor unit amount from a raw integer.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// The amount as an `i64`.
    pub fn get_amount_as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount in decimal major units (reais), as carried on enrollments.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct FloatMajorUnit(f64);

impl FloatMajorUnit {
    /// Form a major unit amount from a float.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// The amount as an `f64`.
    pub fn get_amount_as_f64(&self) -> f64 {
        self.0
    }

    /// Convert to minor units, rounding half-up.
    ///
    /// The conversion contract is strict: `round_half_up(amount * 100)`.
    /// The float is first taken through its shortest decimal
    /// representation, so `10.005` becomes the decimal `10.005` (not its
    /// binary neighbour) and rounds to `1001`.
    pub fn to_minor_unit(self) -> Result<MinorUnit, AmountConversionError> {
        let decimal = Decimal::from_f64(self.0)
            .ok_or(AmountConversionError::NotRepresentable(self.0))?;
        (decimal * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(MinorUnit::new)
            .ok_or(AmountConversionError::Overflow(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_two_decimal_amounts_convert_exactly() {
        assert_eq!(
            FloatMajorUnit::new(199.90).to_minor_unit().ok(),
            Some(MinorUnit::new(19990))
        );
        assert_eq!(
            FloatMajorUnit::new(0.01).to_minor_unit().ok(),
            Some(MinorUnit::new(1))
        );
        assert_eq!(
            FloatMajorUnit::new(0.0).to_minor_unit().ok(),
            Some(MinorUnit::new(0))
        );
    }

    #[test]
    fn midpoints_round_half_up() {
        assert_eq!(
            FloatMajorUnit::new(10.005).to_minor_unit().ok(),
            Some(MinorUnit::new(1001))
        );
        assert_eq!(
            FloatMajorUnit::new(10.004).to_minor_unit().ok(),
            Some(MinorUnit::new(1000))
        );
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        assert!(FloatMajorUnit::new(f64::NAN).to_minor_unit().is_err());
        assert!(FloatMajorUnit::new(f64::INFINITY).to_minor_unit().is_err());
    }
}
