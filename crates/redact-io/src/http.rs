//! Requests to the privacy service over the browser `fetch` API.
//!
//! [`ApiClient`] copies the field lists built by `redact_core::request`
//! into a `FormData`, posts it, and hands the status code and body text
//! back to `redact_core` for decoding. Image parts are sent as `Blob`s
//! so the browser writes the `multipart/form-data` boundary itself.

use redact_core::request::decode_health;
use redact_core::{
    ApiConfig, ApiError, Endpoint, FilterSettings, FormRequest, FormValue, HealthReport,
    Operation, Outcome, SelectedFile,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::log;
use crate::object_url::bytes_to_blob;

/// `<meta name="...">` tag that overrides the service base URL.
pub const API_BASE_META: &str = "redact-api-base";

/// Client for the privacy service endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    #[must_use]
    pub const fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Build a client from the page, honouring a
    /// `<meta name="redact-api-base" content="...">` override.
    ///
    /// Falls back to same-origin requests when the tag is absent.
    #[must_use]
    pub fn from_document() -> Self {
        let base = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| {
                d.query_selector(&format!("meta[name=\"{API_BASE_META}\"]"))
                    .ok()
                    .flatten()
            })
            .and_then(|meta| meta.get_attribute("content"))
            .unwrap_or_default();
        if !base.is_empty() {
            log::info(&format!("using API base {base}"));
        }
        Self::new(ApiConfig::new(base))
    }

    /// Send `file` to the endpoint behind `operation` and decode the reply.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if no response arrives,
    /// [`ApiError::UnexpectedStatus`] for non-2xx replies,
    /// [`ApiError::Decode`] for malformed bodies, and
    /// [`ApiError::Browser`] if the request cannot be assembled.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
    pub async fn run(
        &self,
        operation: Operation,
        file: &SelectedFile,
        settings: &FilterSettings,
    ) -> Result<Outcome, ApiError> {
        let request = operation.request(&self.config, file, settings);
        log::info(&format!(
            "{operation}: POST {} ({} bytes, {})",
            request.url,
            file.bytes.len(),
            file.mime_type
        ));
        let (status, body) = post_form(&request).await?;
        operation.decode(status, &body)
    }

    /// Query `GET /health`.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    #[allow(clippy::future_not_send)]
    pub async fn health(&self) -> Result<HealthReport, ApiError> {
        let init = web_sys::RequestInit::new();
        init.set_method(Endpoint::Health.method());
        let request =
            web_sys::Request::new_with_str_and_init(&self.config.url(Endpoint::Health.path()), &init)
                .map_err(browser_error)?;
        let (status, body) = send(&request).await?;
        decode_health(status, &body)
    }
}

/// Post a multipart form and return `(status, body)`.
#[allow(clippy::future_not_send)]
async fn post_form(form_request: &FormRequest<'_>) -> Result<(u16, String), ApiError> {
    let form = web_sys::FormData::new().map_err(browser_error)?;
    for field in &form_request.fields {
        let appended = match &field.value {
            FormValue::Text(value) => form.append_with_str(field.name, value),
            FormValue::File {
                filename,
                mime_type,
                bytes,
            } => {
                let blob = bytes_to_blob(bytes, mime_type).map_err(browser_error)?;
                form.append_with_blob_and_filename(field.name, &blob, filename)
            }
        };
        appended.map_err(browser_error)?;
    }

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);
    let request = web_sys::Request::new_with_str_and_init(&form_request.url, &init)
        .map_err(browser_error)?;
    send(&request).await
}

/// Fetch `request` and read the whole body as text.
#[allow(clippy::future_not_send)]
async fn send(request: &web_sys::Request) -> Result<(u16, String), ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Browser("no global window".into()))?;

    // fetch() only rejects when no response was received at all.
    let response = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(|e| ApiError::Network(js_message(&e)))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|e| ApiError::Browser(format!("fetch did not return a Response: {e:?}")))?;

    let status = response.status();
    let text_promise = response.text().map_err(browser_error)?;
    // Headers already arrived, so a failure here is not a network error.
    let body = JsFuture::from(text_promise)
        .await
        .map_err(|e| ApiError::unreadable_body(status, &js_message(&e)))?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        log::warn(&format!("{} -> {status}", request.url()));
    }
    Ok((status, body))
}

fn browser_error(value: JsValue) -> ApiError {
    ApiError::Browser(js_message(&value))
}

/// Best-effort human-readable text for a thrown JS value.
fn js_message(value: &JsValue) -> String {
    value.dyn_ref::<js_sys::Error>().map_or_else(
        || value.as_string().unwrap_or_else(|| format!("{value:?}")),
        |e| String::from(e.message()),
    )
}
