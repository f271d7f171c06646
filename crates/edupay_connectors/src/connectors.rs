pub mod asaas;
pub mod lytex;

use std::str::FromStr;

use common_enums::GatewayKind;
use common_utils::errors::CustomResult;
use edupay_interfaces::{api::PaymentGateway, configs::Settings, errors::GatewayError};

pub use self::{asaas::Asaas, lytex::Lytex};
use crate::simulation::SimulationFallback;

/// Build the adapter for a provider, wrapped in the simulation policy.
///
/// Names are matched case-insensitively. Asaas keeps creation failures
/// strict; Lytex falls back to a simulated payment when live creation
/// fails, its sandbox being too flaky to gate enrollment on.
pub fn create_payment_gateway(
    name: &str,
    settings: &Settings,
) -> CustomResult<Box<dyn PaymentGateway>, GatewayError> {
    let kind = GatewayKind::from_str(name).map_err(|_| GatewayError::UnknownGateway {
        name: name.to_string(),
    })?;
    let client = reqwest::Client::new();

    Ok(match kind {
        GatewayKind::Asaas => Box::new(SimulationFallback::new(
            Asaas::new(settings.asaas.clone(), client),
            false,
        )),
        GatewayKind::Lytex => Box::new(SimulationFallback::new(
            Lytex::new(settings.lytex.clone(), client),
            true,
        )),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn gateway_names_match_case_insensitively() {
        let settings = Settings::default();
        assert_eq!(create_payment_gateway("asaas", &settings).unwrap().id(), "asaas");
        assert_eq!(create_payment_gateway("Lytex", &settings).unwrap().id(), "lytex");
        assert_eq!(create_payment_gateway("ASAAS", &settings).unwrap().id(), "asaas");
    }

    #[test]
    fn unknown_names_are_rejected() {
        let error = create_payment_gateway("stripe", &Settings::default()).unwrap_err();
        assert!(matches!(
            error.current_context(),
            GatewayError::UnknownGateway { name } if name == "stripe"
        ));
    }
}
