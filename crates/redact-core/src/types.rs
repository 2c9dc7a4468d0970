//! Shared types for the redact front-end.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Allowed file extensions for image uploads.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp"];

/// Check whether a filename has an allowed image extension.
#[must_use]
pub fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|a| a.eq_ignore_ascii_case(ext))
    })
}

/// MIME type for an image filename, by extension.
///
/// Unknown extensions map to `application/octet-stream`; the service
/// sniffs the actual format when decoding.
#[must_use]
pub fn mime_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// The image the user picked, held in memory for the page session.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Original filename including extension.
    pub name: String,
    /// MIME type derived from the extension.
    pub mime_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Wrap uploaded bytes, deriving the MIME type from `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = mime_type_for(&name).to_owned();
        Self {
            name,
            mime_type,
            bytes,
        }
    }

    /// Filename without its extension, used for download names.
    #[must_use]
    pub fn stem(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(base, _)| base)
    }
}

// Prints the byte count instead of the bytes.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// An image returned by the service, ready for `<img src>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData(String);

impl ImageData {
    /// Normalize a service payload into a data URL.
    ///
    /// The service returns `data:image/png;base64,...`; a bare base64
    /// body is wrapped with a PNG prefix.
    #[must_use]
    pub fn from_payload(payload: &str) -> Self {
        let payload = payload.trim();
        if payload.starts_with("data:") {
            Self(payload.to_owned())
        } else {
            Self(format!("data:image/png;base64,{payload}"))
        }
    }

    /// The data URL.
    #[must_use]
    pub fn as_url(&self) -> &str {
        &self.0
    }

    /// MIME type declared in the data URL header.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split([';', ',']).next())
            .filter(|m| !m.is_empty())
            .unwrap_or("image/png")
    }

    /// File extension matching [`mime_type`](Self::mime_type).
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self.mime_type() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/bmp" => "bmp",
            _ => "png",
        }
    }
}

/// Axis-aligned bounding box `[x1, y1, x2, y2]` in image pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i64; 4]", into = "[i64; 4]")]
pub struct BoundingBox {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl BoundingBox {
    /// Width in pixels (zero for inverted boxes).
    #[must_use]
    pub const fn width(self) -> i64 {
        if self.x2 > self.x1 {
            self.x2.saturating_sub(self.x1)
        } else {
            0
        }
    }

    /// Height in pixels (zero for inverted boxes).
    #[must_use]
    pub const fn height(self) -> i64 {
        if self.y2 > self.y1 {
            self.y2.saturating_sub(self.y1)
        } else {
            0
        }
    }
}

impl From<[i64; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [i64; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BoundingBox> for [i64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) - ({}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// A region the service flagged (preview) or obscured (apply).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRegion {
    /// Mask index within the segmentation result.
    pub mask_id: u32,
    /// Bounding box of the mask.
    #[serde(default)]
    pub bbox: BoundingBox,
    /// Mask area in pixels.
    #[serde(default)]
    pub area: u64,
}

/// Body of `POST /v1/privacy/filter`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterResponse {
    pub filtered_image_base64: String,
    #[serde(default)]
    pub applied_regions: Vec<AppliedRegion>,
}

/// Body of `POST /v1/segment/text_preview`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreviewResponse {
    pub preview_image_base64: String,
    #[serde(default)]
    pub applied_regions: Vec<AppliedRegion>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    /// `"ok"` or `"model_not_loaded"`.
    pub status: String,
    /// `"mock"` or `"real"`.
    #[serde(default)]
    pub mode: Option<String>,
    /// Inference device, e.g. `cuda:0`.
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub model_loaded: bool,
}

impl HealthReport {
    /// Whether the service reports itself ready to segment.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == "ok" && self.model_loaded
    }

    /// Short badge text, e.g. `"ready (mock, cpu)"`.
    #[must_use]
    pub fn summary(&self) -> String {
        let state = if self.is_ready() { "ready" } else { "model not loaded" };
        let details: Vec<&str> = [self.mode.as_deref(), self.device.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if details.is_empty() {
            state.to_owned()
        } else {
            format!("{state} ({})", details.join(", "))
        }
    }
}

/// A decoded, display-ready result from either endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Annotated (preview) or filtered (apply) image.
    pub image: ImageData,
    /// Regions reported alongside the image.
    pub regions: Vec<AppliedRegion>,
}

impl From<FilterResponse> for Outcome {
    fn from(r: FilterResponse) -> Self {
        Self {
            image: ImageData::from_payload(&r.filtered_image_base64),
            regions: r.applied_regions,
        }
    }
}

impl From<PreviewResponse> for Outcome {
    fn from(r: PreviewResponse) -> Self {
        Self {
            image: ImageData::from_payload(&r.preview_image_base64),
            regions: r.applied_regions,
        }
    }
}
