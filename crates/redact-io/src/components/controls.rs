//! Filter parameter controls.
//!
//! Renders the blur type select, strength and minimum-area sliders, the
//! text prompt, and the preview mode select. Every change produces a
//! complete new [`FilterSettings`] through `on_change`.

use dioxus::prelude::*;
use redact_core::settings::{MAX_BLUR_STRENGTH, MAX_MIN_AREA_RATIO, MIN_BLUR_STRENGTH};
use redact_core::{BlurType, FilterSettings, PreviewMode};

use crate::log;

/// Props for the [`FilterControls`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FilterControlsProps {
    /// Current settings (read-only).
    settings: FilterSettings,
    /// Callback fired when any parameter changes.
    on_change: EventHandler<FilterSettings>,
    /// Disables every input while a request is running.
    #[props(default)]
    disabled: bool,
}

/// Renders every filter parameter.
#[component]
#[allow(clippy::too_many_lines)]
pub fn FilterControls(props: FilterControlsProps) -> Element {
    let settings = &props.settings;
    let on_change = props.on_change;
    let disabled = props.disabled;

    let blur_options: Vec<(&str, &str)> = BlurType::ALL
        .iter()
        .map(|t| (t.as_str(), t.label()))
        .collect();
    let mode_options: Vec<(&str, &str)> = PreviewMode::ALL
        .iter()
        .map(|m| (m.as_str(), m.label()))
        .collect();

    let settings_blur = settings.clone();
    let settings_strength = settings.clone();
    let settings_area = settings.clone();
    let settings_prompt = settings.clone();
    let settings_mode = settings.clone();

    rsx! {
        div { class: "controls",
            {render_text(
                "text-prompt",
                "Text prompt",
                "What to look for, e.g. \"faces, license plates\".",
                &settings.text_prompt,
                disabled,
                move |v: String| {
                    let mut s = settings_prompt.clone();
                    s.text_prompt = v;
                    on_change.call(s);
                },
            )}

            {render_select(
                "blur-type",
                "Blur type",
                "How each detected region is obscured.",
                &blur_options,
                settings.blur_type.as_str(),
                disabled,
                move |v: String| match v.parse::<BlurType>() {
                    Ok(t) => {
                        let mut s = settings_blur.clone();
                        s.blur_type = t;
                        on_change.call(s);
                    }
                    Err(err) => log::warn(&format!("blur type select: {err}")),
                },
            )}

            {render_slider(
                "blur-strength",
                "Blur strength",
                "",
                f64::from(settings.blur_strength),
                f64::from(MIN_BLUR_STRENGTH),
                f64::from(MAX_BLUR_STRENGTH),
                2.0,
                0,
                disabled,
                move |v: f64| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let strength = v.round() as u32;
                    on_change.call(settings_strength.clone().with_blur_strength(strength));
                },
            )}

            {render_slider(
                "min-area-ratio",
                "Minimum region size",
                "Ignore regions smaller than this fraction of the image.",
                settings.min_area_ratio,
                0.0,
                MAX_MIN_AREA_RATIO,
                0.005,
                3,
                disabled,
                move |v: f64| {
                    on_change.call(settings_area.clone().with_min_area_ratio(v));
                },
            )}

            {render_select(
                "preview-mode",
                "Preview mode",
                "Display style for the segmentation preview.",
                &mode_options,
                settings.preview_mode.as_str(),
                disabled,
                move |v: String| match v.parse::<PreviewMode>() {
                    Ok(m) => {
                        let mut s = settings_mode.clone();
                        s.preview_mode = m;
                        on_change.call(s);
                    }
                    Err(err) => log::warn(&format!("preview mode select: {err}")),
                },
            )}
        }
    }
}

/// Render a labeled range slider with an optional description.
#[allow(clippy::too_many_arguments)]
fn render_slider(
    id: &str,
    label: &str,
    description: &str,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
    decimals: usize,
    disabled: bool,
    on_input: impl Fn(f64) + 'static,
) -> Element {
    let display = format!("{value:.decimals$}");
    let id = id.to_string();
    let label = label.to_string();
    let description = description.to_string();

    rsx! {
        div { class: "field",
            div { class: "field-header",
                label { r#for: "{id}", class: "field-label", "{label}" }
                span { id: "{id}-value", class: "field-value", "{display}" }
            }
            if !description.is_empty() {
                p { class: "field-description", "{description}" }
            }
            input {
                r#type: "range",
                id: "{id}",
                min: "{min}",
                max: "{max}",
                step: "{step}",
                value: "{value}",
                disabled: disabled,
                oninput: move |e| {
                    match e.value().parse::<f64>() {
                        Ok(v) => on_input(v),
                        Err(err) => {
                            log::warn(&format!("slider parse failure: {err:?} from {:?}", e.value()));
                        }
                    }
                },
            }
        }
    }
}

/// Render a labeled select dropdown with an optional description.
fn render_select(
    id: &str,
    label: &str,
    description: &str,
    options: &[(&str, &str)],
    selected: &str,
    disabled: bool,
    on_change: impl Fn(String) + 'static,
) -> Element {
    let id = id.to_string();
    let label = label.to_string();
    let description = description.to_string();
    let options: Vec<(String, String)> = options
        .iter()
        .map(|(v, l)| ((*v).to_string(), (*l).to_string()))
        .collect();
    let selected = selected.to_string();

    rsx! {
        div { class: "field",
            label { r#for: "{id}", class: "field-label", "{label}" }
            if !description.is_empty() {
                p { class: "field-description", "{description}" }
            }
            select {
                id: "{id}",
                value: "{selected}",
                disabled: disabled,
                onchange: move |e| {
                    on_change(e.value());
                },

                for (value, display) in options.iter() {
                    option {
                        value: "{value}",
                        selected: value == &selected,
                        "{display}"
                    }
                }
            }
        }
    }
}

/// Render a labeled single-line text input.
fn render_text(
    id: &str,
    label: &str,
    description: &str,
    value: &str,
    disabled: bool,
    on_input: impl Fn(String) + 'static,
) -> Element {
    let id = id.to_string();
    let label = label.to_string();
    let description = description.to_string();
    let value = value.to_string();

    rsx! {
        div { class: "field",
            label { r#for: "{id}", class: "field-label", "{label}" }
            if !description.is_empty() {
                p { class: "field-description", "{description}" }
            }
            input {
                r#type: "text",
                id: "{id}",
                value: "{value}",
                placeholder: "all objects",
                disabled: disabled,
                oninput: move |e| on_input(e.value()),
            }
        }
    }
}
