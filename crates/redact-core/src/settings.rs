//! User-adjustable filter settings and API location.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Blur strength the service uses when none is given.
pub const DEFAULT_BLUR_STRENGTH: u32 = 21;

/// Smallest blur strength the strength slider allows.
pub const MIN_BLUR_STRENGTH: u32 = 1;

/// Largest blur strength the strength slider allows.
pub const MAX_BLUR_STRENGTH: u32 = 99;

/// Default minimum mask area as a fraction of the image area.
pub const DEFAULT_MIN_AREA_RATIO: f64 = 0.01;

/// Upper bound for the minimum mask area ratio.
pub const MAX_MIN_AREA_RATIO: f64 = 0.5;

/// Prompt sent when the user leaves the prompt field blank.
pub const DEFAULT_TEXT_PROMPT: &str = "all objects";

/// How the service obscures each detected region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlurType {
    /// Gaussian blur over the masked pixels.
    #[default]
    Gaussian,
    /// Coarse pixel blocks.
    Pixelate,
    /// Flat fill colour.
    Solid,
}

impl BlurType {
    /// All variants in display order, for populating select inputs.
    pub const ALL: [Self; 3] = [Self::Gaussian, Self::Pixelate, Self::Solid];

    /// Value sent in the `blur_type` form field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gaussian => "gaussian",
            Self::Pixelate => "pixelate",
            Self::Solid => "solid",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gaussian => "Gaussian blur",
            Self::Pixelate => "Pixelate",
            Self::Solid => "Solid fill",
        }
    }
}

impl fmt::Display for BlurType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown enum value from a form input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseSettingError {
    kind: &'static str,
    value: String,
}

impl FromStr for BlurType {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseSettingError {
                kind: "blur type",
                value: s.to_owned(),
            })
    }
}

/// Display style for the segmentation preview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    /// Per-pixel confidence rendered as a colour ramp.
    #[default]
    Heatmap,
    /// Translucent mask fills over the original image.
    Overlay,
}

impl PreviewMode {
    /// All variants in display order.
    pub const ALL: [Self; 2] = [Self::Heatmap, Self::Overlay];

    /// Value sent in the `preview_mode` form field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heatmap => "heatmap",
            Self::Overlay => "overlay",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Heatmap => "Heatmap",
            Self::Overlay => "Mask overlay",
        }
    }
}

impl fmt::Display for PreviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreviewMode {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParseSettingError {
                kind: "preview mode",
                value: s.to_owned(),
            })
    }
}

/// Parameters sent alongside the image on preview and apply.
///
/// Defaults mirror the service's own form defaults so an untouched UI
/// behaves exactly like a bare request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// How each region is obscured.
    pub blur_type: BlurType,

    /// Kernel size / block size passed through to the service.
    ///
    /// Kept within [`MIN_BLUR_STRENGTH`]..=[`MAX_BLUR_STRENGTH`] by
    /// [`with_blur_strength`](Self::with_blur_strength).
    pub blur_strength: u32,

    /// Masks smaller than this fraction of the image are ignored.
    pub min_area_ratio: f64,

    /// Free-text description of what to segment.
    pub text_prompt: String,

    /// Display style for the preview pass.
    pub preview_mode: PreviewMode,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            blur_type: BlurType::default(),
            blur_strength: DEFAULT_BLUR_STRENGTH,
            min_area_ratio: DEFAULT_MIN_AREA_RATIO,
            text_prompt: DEFAULT_TEXT_PROMPT.to_owned(),
            preview_mode: PreviewMode::default(),
        }
    }
}

impl FilterSettings {
    /// Return a copy with the blur strength clamped into range.
    #[must_use]
    pub fn with_blur_strength(mut self, strength: u32) -> Self {
        self.blur_strength = strength.clamp(MIN_BLUR_STRENGTH, MAX_BLUR_STRENGTH);
        self
    }

    /// Return a copy with the area ratio clamped into `0.0..=MAX_MIN_AREA_RATIO`.
    ///
    /// NaN falls back to the default ratio.
    #[must_use]
    pub fn with_min_area_ratio(mut self, ratio: f64) -> Self {
        self.min_area_ratio = if ratio.is_nan() {
            DEFAULT_MIN_AREA_RATIO
        } else {
            ratio.clamp(0.0, MAX_MIN_AREA_RATIO)
        };
        self
    }

    /// The prompt actually sent: trimmed, or the default when blank.
    #[must_use]
    pub fn effective_prompt(&self) -> &str {
        let trimmed = self.text_prompt.trim();
        if trimmed.is_empty() {
            DEFAULT_TEXT_PROMPT
        } else {
            trimmed
        }
    }
}

/// Where the privacy service lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// URL prefix for every endpoint. Empty means same origin.
    pub base_url: String,
}

impl ApiConfig {
    /// Create a config pointing at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Join the base URL and an absolute endpoint path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}{path}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_form_defaults() {
        let s = FilterSettings::default();
        assert_eq!(s.blur_type, BlurType::Gaussian);
        assert_eq!(s.blur_strength, 21);
        assert!((s.min_area_ratio - 0.01).abs() < f64::EPSILON);
        assert_eq!(s.text_prompt, "all objects");
        assert_eq!(s.preview_mode, PreviewMode::Heatmap);
    }

    #[test]
    fn blur_strength_is_clamped() {
        let s = FilterSettings::default();
        assert_eq!(s.clone().with_blur_strength(0).blur_strength, MIN_BLUR_STRENGTH);
        assert_eq!(s.clone().with_blur_strength(500).blur_strength, MAX_BLUR_STRENGTH);
        assert_eq!(s.with_blur_strength(35).blur_strength, 35);
    }

    #[test]
    fn area_ratio_is_clamped_and_nan_resets() {
        let s = FilterSettings::default();
        assert!(s.clone().with_min_area_ratio(-1.0).min_area_ratio.abs() < f64::EPSILON);
        assert!(
            (s.clone().with_min_area_ratio(2.0).min_area_ratio - MAX_MIN_AREA_RATIO).abs()
                < f64::EPSILON
        );
        assert!(
            (s.with_min_area_ratio(f64::NAN).min_area_ratio - DEFAULT_MIN_AREA_RATIO).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn blank_prompt_falls_back_to_default() {
        let mut s = FilterSettings {
            text_prompt: "   ".to_owned(),
            ..FilterSettings::default()
        };
        assert_eq!(s.effective_prompt(), DEFAULT_TEXT_PROMPT);
        s.text_prompt = "  faces and plates ".to_owned();
        assert_eq!(s.effective_prompt(), "faces and plates");
    }

    #[test]
    fn enums_parse_their_wire_strings() {
        for t in BlurType::ALL {
            assert_eq!(t.as_str().parse::<BlurType>(), Ok(t));
        }
        for m in PreviewMode::ALL {
            assert_eq!(m.as_str().parse::<PreviewMode>(), Ok(m));
        }
        assert!("gauss".parse::<BlurType>().is_err());
        assert!("".parse::<PreviewMode>().is_err());
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&BlurType::Pixelate).ok().as_deref(),
            Some("\"pixelate\"")
        );
        assert_eq!(
            serde_json::to_string(&PreviewMode::Overlay).ok().as_deref(),
            Some("\"overlay\"")
        );
    }

    #[test]
    fn partial_settings_json_fills_defaults() {
        let s: FilterSettings =
            serde_json::from_str(r#"{"blur_type":"solid"}"#).unwrap();
        assert_eq!(s.blur_type, BlurType::Solid);
        assert_eq!(s.blur_strength, DEFAULT_BLUR_STRENGTH);
    }

    #[test]
    fn api_url_tolerates_trailing_slash() {
        assert_eq!(ApiConfig::default().url("/health"), "/health");
        assert_eq!(
            ApiConfig::new("http://localhost:8000/").url("/v1/privacy/filter"),
            "http://localhost:8000/v1/privacy/filter"
        );
    }
}
