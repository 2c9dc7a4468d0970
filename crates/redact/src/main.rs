use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdShield;
use redact_core::{ApiConfig, Controller, FilterSettings, Operation, SelectedFile};
use redact_io::object_url::{file_to_object_url, revoke_object_url};
use redact_io::{
    ActionBar, ApiClient, FileUpload, FilterControls, HealthBadge, ImagePanel, RegionTable,
    StatusBanner, log,
};

fn main() {
    dioxus::launch(app);
}

/// Build the API client: a compile-time `REDACT_API_BASE` wins, then a
/// `<meta name="redact-api-base">` tag, then same origin.
fn api_client() -> ApiClient {
    option_env!("REDACT_API_BASE").map_or_else(ApiClient::from_document, |base| {
        ApiClient::new(ApiConfig::new(base))
    })
}

/// Root application component.
///
/// Owns the controller, filter settings, and the local preview URL of
/// the original image, and wires the upload, controls, action, status,
/// and image components together.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let client = use_hook(api_client);
    let mut controller = use_signal(Controller::new);
    let mut settings = use_signal(FilterSettings::default);
    let mut original_url = use_signal(|| Option::<String>::None);

    // --- File selection handler ---
    let on_select = move |file: Option<SelectedFile>| {
        if let Some(old) = original_url.write().take() {
            revoke_object_url(&old);
        }
        let url = file
            .as_ref()
            .and_then(|f| match file_to_object_url(f) {
                Ok(url) => Some(url),
                Err(e) => {
                    log::warn(&format!("no local preview for {}: {e}", f.name));
                    None
                }
            });
        original_url.set(url);
        controller.write().select_file(file);
    };

    // --- Preview / Apply handler ---
    // One request at a time: `begin` refuses while another is running,
    // and the buttons are disabled until `finish`.
    let on_action = {
        let client = client.clone();
        move |operation: Operation| {
            let begun = controller.write().begin(operation);
            let ticket = match begun {
                Ok(ticket) => ticket,
                Err(e) => {
                    log::warn(&format!("{operation} ignored: {e}"));
                    return;
                }
            };
            let Some(file) = controller.peek().file().cloned() else {
                return;
            };
            let cfg = settings.peek().clone();
            let client = client.clone();

            spawn(async move {
                let outcome = client.run(operation, &file, &cfg).await;
                match &outcome {
                    Ok(o) => log::info(&format!("{operation}: {} regions", o.regions.len())),
                    Err(e) => log::error(&format!("{operation} failed: {e}")),
                }
                controller.write().finish(ticket, outcome);
            });
        }
    };

    let on_settings_change = move |new_settings: FilterSettings| {
        settings.set(new_settings);
    };

    // --- Derived view state ---
    let ctl = controller.read();
    let busy = ctl.in_flight().is_some();
    let running = ctl.in_flight();
    let can_preview = ctl.can_preview();
    let can_apply = ctl.can_apply();
    let status = ctl.status().clone();
    let stem = ctl
        .file()
        .map_or_else(|| String::from("image"), |f| f.stem().to_owned());
    let result = ctl.result().cloned();
    drop(ctl);

    let result_title = match result.as_ref().map(|r| r.operation) {
        Some(Operation::Preview) => "Segmentation preview",
        _ => "Filtered result",
    };
    let result_src = result
        .as_ref()
        .map(|r| r.outcome.image.as_url().to_owned());
    let caption = result.as_ref().map(redact_core::DisplayedResult::region_text);
    let download = result
        .as_ref()
        .filter(|r| r.operation == Operation::Apply)
        .map(|r| r.outcome.image.clone());
    let regions = result
        .map(|r| r.outcome.regions)
        .unwrap_or_default();

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "app",
            header { class: "app-header",
                div { class: "brand",
                    Icon { width: 24, height: 24, icon: LdShield }
                    div {
                        h1 { "redact" }
                        p { class: "text-muted text-small",
                            "Blur faces, plates, and other private regions before you share an image"
                        }
                    }
                }
                HealthBadge { client: client.clone() }
            }

            main { class: "app-main",
                // Left column: input and actions
                aside { class: "sidebar",
                    FileUpload { on_select: on_select }

                    FilterControls {
                        settings: settings(),
                        on_change: on_settings_change,
                        disabled: busy,
                    }

                    ActionBar {
                        can_preview: can_preview,
                        can_apply: can_apply,
                        running: running,
                        download: download,
                        filename: stem,
                        on_action: on_action,
                    }

                    StatusBanner { status: status }
                }

                // Right column: original and result side by side
                section { class: "images",
                    ImagePanel {
                        title: "Original",
                        src: original_url(),
                        placeholder: "Choose an image to get started",
                    }
                    ImagePanel {
                        title: result_title,
                        src: result_src,
                        placeholder: "Run Preview or Apply to see the result",
                        caption: caption,
                        busy: busy,
                    }
                    RegionTable { regions: regions }
                }
            }
        }
    }
}
