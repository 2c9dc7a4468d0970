//! Status area under the action buttons.

use dioxus::prelude::*;
use redact_core::Status;

/// Props for the [`StatusBanner`] component.
#[derive(Props, Clone, PartialEq)]
pub struct StatusBannerProps {
    status: Status,
}

/// Shows the current loading/success/error message, or nothing.
#[component]
pub fn StatusBanner(props: StatusBannerProps) -> Element {
    let Some(message) = props.status.message() else {
        return rsx! {};
    };
    let class = props.status.class();
    let role = if props.status.is_error() { "alert" } else { "status" };

    rsx! {
        div { id: "status", class: "{class}", role: "{role}", "{message}" }
    }
}
