//! Multipart request construction and response decoding (sans-IO).
//!
//! Builds the ordered list of form fields for each endpoint and turns
//! `(status, body)` pairs back into [`Outcome`]s. The browser layer in
//! `redact-io` only has to copy fields into a `FormData` and hand back
//! the status code and body text.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::settings::{ApiConfig, FilterSettings};
use crate::types::{FilterResponse, HealthReport, Outcome, PreviewResponse, SelectedFile};

/// Segmentation mode sent to the filter endpoint. The service only
/// implements automatic segmentation.
pub const FILTER_MODE: &str = "auto";

/// Service endpoints used by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST /v1/privacy/filter`
    Filter,
    /// `POST /v1/segment/text_preview`
    TextPreview,
    /// `GET /health`
    Health,
}

impl Endpoint {
    /// Absolute path of the endpoint.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Filter => "/v1/privacy/filter",
            Self::TextPreview => "/v1/segment/text_preview",
            Self::Health => "/health",
        }
    }

    /// HTTP method of the endpoint.
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::Filter | Self::TextPreview => "POST",
            Self::Health => "GET",
        }
    }
}

/// The two user-triggered operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Segmentation preview driven by the text prompt.
    Preview,
    /// Privacy filter that blurs the detected regions.
    Apply,
}

impl Operation {
    /// Endpoint the operation posts to.
    #[must_use]
    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::Preview => Endpoint::TextPreview,
            Self::Apply => Endpoint::Filter,
        }
    }

    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preview => "Preview",
            Self::Apply => "Apply",
        }
    }

    /// Build the multipart request for this operation.
    #[must_use]
    pub fn request<'a>(
        self,
        api: &ApiConfig,
        file: &'a SelectedFile,
        settings: &FilterSettings,
    ) -> FormRequest<'a> {
        match self {
            Self::Preview => preview_request(api, file, settings),
            Self::Apply => filter_request(api, file, settings),
        }
    }

    /// Decode the response to a request built by [`request`](Self::request).
    ///
    /// # Errors
    ///
    /// See [`decode_filter`] and [`decode_preview`].
    pub fn decode(self, status: u16, body: &str) -> Result<Outcome, ApiError> {
        match self {
            Self::Preview => decode_preview(status, body),
            Self::Apply => decode_filter(status, body),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Value of a single multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue<'a> {
    /// A file part. Borrowed so large images are not copied.
    File {
        filename: &'a str,
        mime_type: &'a str,
        bytes: &'a [u8],
    },
    /// A plain text part.
    Text(String),
}

/// A named multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField<'a> {
    pub name: &'static str,
    pub value: FormValue<'a>,
}

impl<'a> FormField<'a> {
    fn text(name: &'static str, value: impl ToString) -> Self {
        Self {
            name,
            value: FormValue::Text(value.to_string()),
        }
    }

    fn file(name: &'static str, file: &'a SelectedFile) -> Self {
        Self {
            name,
            value: FormValue::File {
                filename: &file.name,
                mime_type: &file.mime_type,
                bytes: &file.bytes,
            },
        }
    }
}

/// A `multipart/form-data` POST, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequest<'a> {
    /// Full request URL.
    pub url: String,
    /// Fields in the order they are appended.
    pub fields: Vec<FormField<'a>>,
}

impl FormRequest<'_> {
    /// Look up a text field by name.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|f| match &f.value {
            FormValue::Text(v) if f.name == name => Some(v.as_str()),
            _ => None,
        })
    }

    /// Field names in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

/// Build the request for `POST /v1/privacy/filter`.
#[must_use]
pub fn filter_request<'a>(
    api: &ApiConfig,
    file: &'a SelectedFile,
    settings: &FilterSettings,
) -> FormRequest<'a> {
    FormRequest {
        url: api.url(Endpoint::Filter.path()),
        fields: vec![
            FormField::file("image", file),
            FormField::text("mode", FILTER_MODE),
            FormField::text("blur_type", settings.blur_type),
            FormField::text("blur_strength", settings.blur_strength),
            FormField::text("min_area_ratio", settings.min_area_ratio),
            FormField::text("text_prompt", settings.effective_prompt()),
        ],
    }
}

/// Build the request for `POST /v1/segment/text_preview`.
#[must_use]
pub fn preview_request<'a>(
    api: &ApiConfig,
    file: &'a SelectedFile,
    settings: &FilterSettings,
) -> FormRequest<'a> {
    FormRequest {
        url: api.url(Endpoint::TextPreview.path()),
        fields: vec![
            FormField::file("image", file),
            FormField::text("text_prompt", settings.effective_prompt()),
            FormField::text("preview_mode", settings.preview_mode),
        ],
    }
}

/// Decode a filter response.
///
/// # Errors
///
/// Returns [`ApiError::UnexpectedStatus`] for non-2xx statuses and
/// [`ApiError::Decode`] when the body is not a filter response.
pub fn decode_filter(status: u16, body: &str) -> Result<Outcome, ApiError> {
    decode::<FilterResponse>(status, body).map(Outcome::from)
}

/// Decode a text-preview response.
///
/// # Errors
///
/// Returns [`ApiError::UnexpectedStatus`] for non-2xx statuses and
/// [`ApiError::Decode`] when the body is not a preview response.
pub fn decode_preview(status: u16, body: &str) -> Result<Outcome, ApiError> {
    decode::<PreviewResponse>(status, body).map(Outcome::from)
}

/// Decode a health response.
///
/// # Errors
///
/// Same as [`decode_filter`].
pub fn decode_health(status: u16, body: &str) -> Result<HealthReport, ApiError> {
    decode(status, body)
}

fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::UnexpectedStatus {
            status,
            body: body.to_owned(),
        });
    }
    Ok(serde_json::from_str(body)?)
}
