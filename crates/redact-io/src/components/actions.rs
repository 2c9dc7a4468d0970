//! Preview / Apply / Download buttons.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdDownload, LdEye, LdShieldCheck};
use redact_core::{ImageData, Operation};

use crate::download;
use crate::log;

/// Props for the [`ActionBar`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ActionBarProps {
    /// Whether the Preview button is enabled.
    can_preview: bool,
    /// Whether the Apply button is enabled.
    can_apply: bool,
    /// The operation currently running, shown on its button.
    #[props(default)]
    running: Option<Operation>,
    /// Filtered image available for download. `None` disables Download.
    #[props(default)]
    download: Option<ImageData>,
    /// Base filename (without extension) for downloads.
    #[props(default = String::from("image"))]
    filename: String,
    /// Called when Preview or Apply is clicked.
    on_action: EventHandler<Operation>,
}

/// Button row for the two requests plus a download of the last filtered image.
///
/// Buttons are disabled (not hidden) when unavailable so the layout does
/// not jump while a request runs.
#[component]
pub fn ActionBar(props: ActionBarProps) -> Element {
    // Remembers which image failed so the message goes away with it.
    let mut download_error = use_signal(|| Option::<(ImageData, String)>::None);
    let has_download = props.download.is_some();
    let visible_error = download_error
        .read()
        .as_ref()
        .and_then(|failed| error_for(failed, props.download.as_ref()))
        .map(str::to_owned);

    let on_action = props.on_action;
    let download_click = {
        let image = props.download.clone();
        let filename = props.filename.clone();
        move |_| {
            if let Some(ref image) = image {
                let name = download::download_name(&filename, image);
                if let Err(e) = download::download_image(image, &name) {
                    log::error(&format!("download failed: {e}"));
                    download_error.set(Some((image.clone(), format!("Download failed: {e}"))));
                } else {
                    download_error.set(None);
                }
            }
        }
    };

    let label = |op: Operation| -> String {
        if props.running == Some(op) {
            format!("{}...", op.label())
        } else {
            op.label().to_owned()
        }
    };
    let preview_label = label(Operation::Preview);
    let apply_label = label(Operation::Apply);

    rsx! {
        div { class: "actions",
            div { class: "button-row",
                button {
                    id: "preview-btn",
                    class: "btn btn-secondary",
                    disabled: !props.can_preview,
                    onclick: move |_| on_action.call(Operation::Preview),
                    Icon { width: 16, height: 16, icon: LdEye }
                    "{preview_label}"
                }
                button {
                    id: "submit-btn",
                    class: "btn btn-primary",
                    disabled: !props.can_apply,
                    onclick: move |_| on_action.call(Operation::Apply),
                    Icon { width: 16, height: 16, icon: LdShieldCheck }
                    "{apply_label}"
                }
                button {
                    id: "download-btn",
                    class: "btn btn-secondary",
                    disabled: !has_download,
                    onclick: download_click,
                    Icon { width: 16, height: 16, icon: LdDownload }
                    "Download"
                }
            }

            if let Some(ref err) = visible_error {
                p { class: "text-error text-small", "{err}" }
            }
        }
    }
}

/// The download error to show, if it belongs to the image on offer now.
fn error_for<'a>(failed: &'a (ImageData, String), current: Option<&ImageData>) -> Option<&'a str> {
    let (image, message) = failed;
    (current == Some(image)).then_some(message.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(url: &str) -> (ImageData, String) {
        (ImageData::from_payload(url), "Download failed: blocked".into())
    }

    #[test]
    fn error_shows_for_the_failed_image() {
        let failed = failure("data:image/png;base64,AAAA");
        let current = ImageData::from_payload("data:image/png;base64,AAAA");
        assert_eq!(
            error_for(&failed, Some(&current)),
            Some("Download failed: blocked")
        );
    }

    #[test]
    fn error_hides_once_the_result_changes() {
        let failed = failure("data:image/png;base64,AAAA");
        let next = ImageData::from_payload("data:image/png;base64,BBBB");
        assert_eq!(error_for(&failed, Some(&next)), None);
        assert_eq!(error_for(&failed, None), None);
    }
}
