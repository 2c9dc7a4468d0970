//! Titled image panel with a placeholder.

use dioxus::prelude::*;

/// Props for the [`ImagePanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImagePanelProps {
    /// Panel heading.
    title: String,
    /// Image URL (object URL or data URL). `None` shows the placeholder.
    src: Option<String>,
    /// Text shown in place of the image.
    placeholder: String,
    /// Optional line under the image, e.g. the region count.
    #[props(default)]
    caption: Option<String>,
    /// Dims the image while a request for it is running.
    #[props(default)]
    busy: bool,
}

/// Renders an image, or a placeholder box when there is none yet.
///
/// The image keeps its aspect ratio and fills the panel width.
#[component]
pub fn ImagePanel(props: ImagePanelProps) -> Element {
    let image_class = if props.busy { "panel-image busy" } else { "panel-image" };

    rsx! {
        section { class: "panel",
            h2 { class: "panel-title", "{props.title}" }

            if let Some(ref src) = props.src {
                img {
                    class: "{image_class}",
                    src: "{src}",
                    alt: "{props.title}",
                }
            } else {
                div { class: "panel-placeholder", "{props.placeholder}" }
            }

            if let Some(ref caption) = props.caption {
                p { class: "panel-caption", "{caption}" }
            }
        }
    }
}
