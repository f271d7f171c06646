#![allow(clippy::unwrap_used)]

use masking::{ExposeInterface, Mask, Maskable, PeekInterface, Secret, WithoutType};

#[test]
fn debug_output_is_masked() {
    let api_key: Secret<String> = Secret::new("sk_live_abc123".to_string());
    let printed = format!("{api_key:?}");
    assert!(!printed.contains("sk_live_abc123"));
    assert!(printed.contains("String"));

    let anonymous: Secret<String, WithoutType> = Secret::new("12345678900".to_string());
    assert_eq!(format!("{anonymous:?}"), "*** ***");
}

#[test]
fn peek_and_expose_reveal_the_value() {
    let cpf: Secret<String> = Secret::new("12345678900".to_string());
    assert_eq!(cpf.peek(), "12345678900");
    assert_eq!(cpf.expose(), "12345678900");
}

#[test]
fn secrets_serialize_transparently() {
    #[derive(serde::Serialize)]
    struct Payload {
        cpf_cnpj: Secret<String>,
    }

    let payload = Payload {
        cpf_cnpj: Secret::new("12345678900".to_string()),
    };
    let json = serde_json::to_string(&payload).unwrap();
    assert_eq!(json, r#"{"cpf_cnpj":"12345678900"}"#);
}

#[test]
fn maskable_header_values() {
    let auth: Maskable<String> = "token-value".to_string().into_masked();
    let plain: Maskable<String> = "application/json".to_string().into();

    assert!(!format!("{auth:?}").contains("token-value"));
    assert!(format!("{plain:?}").contains("application/json"));
    assert_eq!(auth.into_inner(), "token-value");
    assert_eq!(plain.into_inner(), "application/json");
}
