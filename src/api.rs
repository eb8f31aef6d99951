use leptos::logging::log;
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::model::{AssignmentRequest, AssignmentResult, SummaryRow};

/// Shown when a rejection carries no usable message of its own.
pub const GENERIC_FAILURE: &str = "Something went wrong.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success status; the payload is the
    /// message extracted from its body.
    #[error("{0}")]
    Rejected(String),
    /// The request never completed or the response body was unreadable. The
    /// cause is logged at the point of failure, not carried here.
    #[error("could not reach the server")]
    Transport,
}

/// Submits a participant's entry to `POST {endpoint}/asignar`.
pub async fn submit_assignment(
    endpoint: &str,
    request: &AssignmentRequest,
) -> Result<AssignmentResult, ApiError> {
    let body = serde_json::to_string(request).map_err(|e| {
        log!("Failed to encode request: {}", e);
        ApiError::Transport
    })?;

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    let headers = web_sys::Headers::new().map_err(|e| transport("Failed to build headers", e))?;
    headers
        .append("Content-Type", "application/json")
        .map_err(|e| transport("Failed to build headers", e))?;
    init.set_headers(headers.as_ref());
    init.set_body(&JsValue::from_str(&body));

    let (ok, value) = fetch_value(&format!("{}/asignar", endpoint), &init).await?;
    if !ok {
        return Err(ApiError::Rejected(failure_message(&value)));
    }
    serde_json::from_value(value).map_err(|e| {
        log!("Malformed assignment response: {}", e);
        ApiError::Transport
    })
}

/// Loads the full organizer summary from `GET {endpoint}/resumen`.
pub async fn fetch_summary(endpoint: &str) -> Result<Vec<SummaryRow>, ApiError> {
    let init = web_sys::RequestInit::new();
    init.set_method("GET");

    let (ok, value) = fetch_value(&format!("{}/resumen", endpoint), &init).await?;
    if !ok {
        return Err(ApiError::Rejected(failure_message(&value)));
    }
    serde_json::from_value(value).map_err(|e| {
        log!("Malformed summary response: {}", e);
        ApiError::Transport
    })
}

/// Runs a fetch and parses the body as JSON, surfacing the success flag so
/// callers can still read error bodies. Any transport or parse problem is
/// logged and collapsed into [`ApiError::Transport`].
async fn fetch_value(url: &str, init: &web_sys::RequestInit) -> Result<(bool, Value), ApiError> {
    let window = web_sys::window().ok_or(ApiError::Transport)?;
    let request = web_sys::Request::new_with_str_and_init(url, init)
        .map_err(|e| transport("Failed to build request", e))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| transport("Fetch error", e))?;
    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|e| transport("Unexpected fetch result", e))?;
    let ok = resp.ok();

    let text_promise = resp.text().map_err(|e| transport("Failed to read body", e))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| transport("Failed to read body", e))?
        .as_string()
        .unwrap_or_default();
    let value = serde_json::from_str(&text).map_err(|e| {
        log!("Malformed response body: {}", e);
        ApiError::Transport
    })?;

    Ok((ok, value))
}

fn transport(context: &str, cause: JsValue) -> ApiError {
    log!("{}: {:?}", context, cause);
    ApiError::Transport
}

/// Extracts the display message from a rejection body: its `message` field,
/// else the first `msg` of an `errors` array, else a generic fallback. The
/// backend sometimes sends empty strings; those fall through to the next
/// candidate.
pub fn failure_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .or_else(|| {
            body.get("errors")
                .and_then(Value::as_array)
                .and_then(|errors| errors.first())
                .and_then(|error| error.get("msg"))
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
        })
        .unwrap_or(GENERIC_FAILURE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_message_prefers_message_field() {
        let body = json!({ "message": "not found", "errors": [{ "msg": "bad" }] });
        assert_eq!(failure_message(&body), "not found");
    }

    #[test]
    fn test_failure_message_falls_back_to_errors() {
        let body = json!({ "errors": [{ "msg": "bad" }, { "msg": "worse" }] });
        assert_eq!(failure_message(&body), "bad");
    }

    #[test]
    fn test_failure_message_generic_fallback() {
        assert_eq!(failure_message(&json!({})), GENERIC_FAILURE);
        assert_eq!(failure_message(&json!({ "errors": [] })), GENERIC_FAILURE);
        assert_eq!(
            failure_message(&json!({ "errors": [{ "reason": "bad" }] })),
            GENERIC_FAILURE
        );
    }

    #[test]
    fn test_failure_message_skips_empty_strings() {
        // An empty message is as good as no message.
        let body = json!({ "message": "", "errors": [{ "msg": "bad" }] });
        assert_eq!(failure_message(&body), "bad");
        let body = json!({ "message": "", "errors": [{ "msg": "" }] });
        assert_eq!(failure_message(&body), GENERIC_FAILURE);
    }

    #[test]
    fn test_failure_message_ignores_non_string_fields() {
        let body = json!({ "message": 42 });
        assert_eq!(failure_message(&body), GENERIC_FAILURE);
    }
}
