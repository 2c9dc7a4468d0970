//! Blob URLs for showing the selected original locally.
//!
//! The original image never leaves the browser for its preview: the
//! uploaded bytes are wrapped in a `Blob` and shown through an object
//! URL.

use redact_core::SelectedFile;
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur during Blob URL creation.
#[derive(Debug, thiserror::Error)]
pub enum ObjectUrlError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for ObjectUrlError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Wrap raw bytes in a `Blob` with the given MIME type.
///
/// # Errors
///
/// Returns the browser error if the `Blob` cannot be constructed.
pub fn bytes_to_blob(bytes: &[u8], mime_type: &str) -> Result<web_sys::Blob, JsValue> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
}

/// Create an object URL for the selected file, for use as an `<img src>`.
///
/// The returned URL must be revoked via [`revoke_object_url`] when the
/// file is replaced to avoid leaking the blob.
///
/// # Errors
///
/// Returns [`ObjectUrlError::JsError`] if Blob or URL creation fails.
pub fn file_to_object_url(file: &SelectedFile) -> Result<String, ObjectUrlError> {
    let blob = bytes_to_blob(&file.bytes, &file.mime_type)?;
    Ok(web_sys::Url::create_object_url_with_blob(&blob)?)
}

/// Revoke an object URL previously created by [`file_to_object_url`].
///
/// Silently ignores errors (the URL may already have been revoked).
pub fn revoke_object_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}
