//! The single status area shown under the action buttons.

/// Presentation state of the status area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    /// Nothing to report; the area is not rendered.
    #[default]
    Hidden,
    /// A request is in flight.
    Loading(String),
    /// The last request succeeded.
    Success(String),
    /// The last request failed.
    Error(String),
}

impl Status {
    /// Message text, if the area is visible.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Hidden => None,
            Self::Loading(m) | Self::Success(m) | Self::Error(m) => Some(m),
        }
    }

    /// CSS modifier class for the area (`status loading` etc.).
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Hidden => "status",
            Self::Loading(_) => "status loading",
            Self::Success(_) => "status success",
            Self::Error(_) => "status error",
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
