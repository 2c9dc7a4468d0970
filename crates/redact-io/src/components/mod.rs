//! Dioxus UI components for redact.
//!
//! Provides the image picker and drop zone, filter controls, the action
//! buttons, image panels, the status area, the region table, and the
//! service health badge.

mod actions;
mod controls;
mod health;
mod image_panel;
mod regions;
mod status;
mod upload;

pub use actions::ActionBar;
pub use controls::FilterControls;
pub use health::HealthBadge;
pub use image_panel::ImagePanel;
pub use regions::RegionTable;
pub use status::StatusBanner;
pub use upload::FileUpload;
