//! Dispatch of described requests over HTTP.

use std::time::Duration;

use common_utils::{
    consts,
    errors::CustomResult,
    request::{Method, Request},
};
use edupay_env::logger;
use edupay_interfaces::{errors::GatewayError, types::Response};
use error_stack::{IntoReport, ResultExt};

/// Execute a described [`Request`] and collect the raw reply.
///
/// Transport failures and timeouts map to
/// [`GatewayError::RequestDispatchFailed`]; the status code is not
/// interpreted here, callers decide through [`ensure_success`].
pub async fn send_request(
    client: &reqwest::Client,
    request: Request,
) -> CustomResult<Response, GatewayError> {
    logger::info!(method = %request.method, url = %request.url, "calling billing provider");

    let method = match request.method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    };

    let mut builder = client
        .request(method, &request.url)
        .timeout(Duration::from_secs(consts::REQUEST_TIMEOUT_SECS));
    for (name, value) in request.headers {
        builder = builder.header(&name, value.into_inner());
    }
    if let Some(body) = request.body {
        builder = builder.json(&body);
    }

    let reply = builder
        .send()
        .await
        .into_report()
        .change_context(GatewayError::RequestDispatchFailed)?;
    let status_code = reply.status().as_u16();
    let body = reply
        .bytes()
        .await
        .into_report()
        .change_context(GatewayError::RequestDispatchFailed)?;

    Ok(Response {
        status_code,
        response: body,
    })
}

/// Accept 2xx replies, turn anything else into
/// [`GatewayError::UnexpectedResponse`] with the body attached for
/// diagnosis.
pub fn ensure_success(response: Response) -> CustomResult<Response, GatewayError> {
    if (200..300).contains(&response.status_code) {
        Ok(response)
    } else {
        let body = String::from_utf8_lossy(&response.response).into_owned();
        logger::warn!(
            status_code = response.status_code,
            body = %body,
            "provider returned an error status"
        );
        Err(GatewayError::UnexpectedResponse {
            status_code: response.status_code,
        })
        .into_report()
        .attach_printable(body)
    }
}

/// Build a query string from key/value pairs, percent-encoding values.
pub fn encode_query(pairs: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}
