//! redact-core: Request building and UI state for the redact front-end (sans-IO).
//!
//! Everything the browser app needs that does not touch the browser:
//! filter settings, the multipart field lists for each service endpoint,
//! response decoding, and the upload/preview controller that decides
//! which actions are enabled and what the status area says.
//!
//! The crate has **no I/O dependencies**. Sending requests, reading
//! files, and rendering live in `redact-io`.

pub mod controller;
pub mod error;
pub mod request;
pub mod settings;
pub mod status;
pub mod types;

pub use controller::{BeginError, Controller, DisplayedResult, Finished, Phase, Ticket};
pub use error::ApiError;
pub use request::{Endpoint, FormField, FormRequest, FormValue, Operation};
pub use settings::{ApiConfig, BlurType, FilterSettings, PreviewMode};
pub use status::Status;
pub use types::{AppliedRegion, BoundingBox, HealthReport, ImageData, Outcome, SelectedFile};
