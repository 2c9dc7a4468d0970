//! Saving the filtered result to disk.
//!
//! Dioxus has no built-in file download API.  This module triggers
//! downloads by programmatically clicking a temporary `<a download>`
//! element whose `href` is the result's data URL.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use redact_core::ImageData;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

/// Errors that can occur when triggering a file download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Download name for a filtered image, e.g. `street-redacted.png`.
#[must_use]
pub fn download_name(stem: &str, image: &ImageData) -> String {
    format!("{stem}-redacted.{}", image.extension())
}

/// Trigger a browser download of `image` as `filename`.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if any browser API call fails
/// (e.g., element creation or a missing document body).
pub fn download_image(image: &ImageData, filename: &str) -> Result<(), DownloadError> {
    let window =
        web_sys::window().ok_or_else(|| DownloadError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError::JsError("no document".into()))?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|e| DownloadError::JsError(format!("failed to cast element: {e:?}")))?;

    anchor.set_href(image.as_url());
    anchor.set_download(filename);

    let body = document
        .body()
        .ok_or_else(|| DownloadError::JsError("no document body".into()))?;
    body.append_child(&anchor)?;
    anchor.click();

    // The download has already started; a failed removal is not a failed download.
    let _ = body.remove_child(&anchor);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_name_uses_result_extension() {
        let png = ImageData::from_payload("data:image/png;base64,AAAA");
        assert_eq!(download_name("street", &png), "street-redacted.png");

        let jpg = ImageData::from_payload("data:image/jpeg;base64,AAAA");
        assert_eq!(download_name("a.b", &jpg), "a.b-redacted.jpg");
    }
}
