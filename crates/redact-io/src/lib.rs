//! redact-io: Browser I/O and Dioxus component library.
//!
//! Sends requests to the privacy service with `fetch`, shows local
//! previews through Blob URLs, downloads results, logs to the browser
//! console, and provides the UI components for the redact web app.

pub mod components;
pub mod download;
pub mod http;
pub mod log;
pub mod object_url;

pub use components::{
    ActionBar, FileUpload, FilterControls, HealthBadge, ImagePanel, RegionTable, StatusBanner,
};
pub use http::ApiClient;
