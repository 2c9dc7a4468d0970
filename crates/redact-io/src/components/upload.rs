//! Image picker with drag-and-drop.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use redact_core::SelectedFile;
use redact_core::types::has_allowed_extension;

use crate::log;

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Called with the chosen image, or `None` when the picker is cleared.
    on_select: EventHandler<Option<SelectedFile>>,
}

/// A drop zone with a file picker button.
///
/// Accepts PNG, JPEG, BMP, and WebP images. A rejected or unreadable
/// file shows an inline error and does not touch the current selection.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut filename = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<String>::None);

    // Shared by the picker and the drop handler.
    let process_files = move |files: Vec<FileData>| async move {
        let Some(file) = files.first() else {
            filename.set(None);
            error.set(None);
            props.on_select.call(None);
            return;
        };
        let name = file.name();
        if !has_allowed_extension(&name) {
            error.set(Some(format!("Unsupported file type: {name}")));
            return;
        }
        match file.read_bytes().await {
            Ok(bytes) => {
                log::info(&format!("selected {name} ({} bytes)", bytes.len()));
                filename.set(Some(name.clone()));
                error.set(None);
                props.on_select.call(Some(SelectedFile::new(name, bytes.to_vec())));
            }
            Err(e) => {
                log::error(&format!("failed to read {name}: {e}"));
                error.set(Some(format!("Failed to read file: {e}")));
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        // Dropping text or a link carries no files; keep the selection.
        let files = evt.files();
        if !files.is_empty() {
            process_files(files).await;
        }
    };

    let zone_class = if dragging() {
        "drop-zone dragging"
    } else {
        "drop-zone"
    };

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            if let Some(ref name) = filename() {
                p { class: "text-success", "Loaded: {name}" }
            }

            if let Some(ref err) = error() {
                p { class: "text-error", "{err}" }
            }

            p { class: "text-secondary", "Drop an image here or " }

            label { class: "btn btn-primary",
                input {
                    r#type: "file",
                    id: "image-input",
                    accept: ".png,.jpg,.jpeg,.bmp,.webp",
                    class: "hidden",
                    onchange: handle_files,
                }
                Icon { width: 16, height: 16, icon: LdUpload }
                "Choose Image"
            }

            p { class: "text-muted text-small", "PNG, JPEG, BMP, WebP" }
        }
    }
}
