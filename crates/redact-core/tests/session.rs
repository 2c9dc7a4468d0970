//! Integration test: drive the controller through a full page session,
//! decoding canned service responses the way the browser layer does.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use redact_core::{
    ApiConfig, ApiError, Controller, FilterSettings, Finished, Operation, Phase, SelectedFile,
    Status,
};

const PREVIEW_BODY: &str = r#"{
    "preview_image_base64": "data:image/png;base64,UFJFVklFVw==",
    "applied_regions": [
        {"mask_id": 0, "bbox": [12, 40, 96, 180], "area": 9800},
        {"mask_id": 1, "bbox": [200, 35, 260, 150], "area": 5100}
    ]
}"#;

const FILTER_BODY: &str = r#"{
    "filtered_image_base64": "data:image/png;base64,RklMVEVSRUQ=",
    "applied_regions": [
        {"mask_id": 0, "bbox": [12, 40, 96, 180], "area": 9800},
        {"mask_id": 1, "bbox": [200, 35, 260, 150], "area": 5100},
        {"mask_id": 4, "bbox": [300, 220, 340, 240], "area": 640}
    ]
}"#;

/// Build the request, "send" it, and feed the canned reply back.
fn round_trip(
    controller: &mut Controller,
    settings: &FilterSettings,
    op: Operation,
    status: u16,
    body: &str,
) -> Finished {
    let ticket = controller.begin(op).expect("request should start");
    let file = controller.file().cloned().expect("file is selected");
    let request = op.request(&ApiConfig::default(), &file, settings);
    assert_eq!(request.url, op.endpoint().path());
    controller.finish(ticket, op.decode(status, body))
}

#[test]
fn select_preview_apply_session() {
    let mut controller = Controller::new();
    let settings = FilterSettings::default();

    controller.select_file(Some(SelectedFile::new("street.png", vec![0x89, b'P', b'N', b'G'])));
    assert!(controller.can_preview() && controller.can_apply());

    let finished = round_trip(&mut controller, &settings, Operation::Preview, 200, PREVIEW_BODY);
    assert_eq!(finished, Finished::Displayed);
    assert_eq!(controller.phase(), Phase::Previewed);
    assert_eq!(
        controller.region_text().as_deref(),
        Some("Found 2 candidate regions")
    );

    let finished = round_trip(&mut controller, &settings, Operation::Apply, 200, FILTER_BODY);
    assert_eq!(finished, Finished::Displayed);
    assert_eq!(controller.phase(), Phase::Applied);
    assert_eq!(controller.region_text().as_deref(), Some("Processed 3 regions"));

    let shown = controller.result().expect("result is displayed");
    assert_eq!(shown.outcome.image.as_url(), "data:image/png;base64,RklMVEVSRUQ=");
    assert_eq!(shown.outcome.regions[2].mask_id, 4);
}

#[test]
fn preview_outage_then_apply_still_works() {
    let mut controller = Controller::new();
    let settings = FilterSettings::default();
    controller.select_file(Some(SelectedFile::new("a.jpg", vec![0xFF, 0xD8])));

    let ticket = controller.begin(Operation::Preview).unwrap();
    controller.finish(ticket, Err(ApiError::Network("Failed to fetch".into())));
    assert!(controller.status().is_error());
    assert!(controller.can_apply(), "apply stays available after preview outage");
    assert_eq!(controller.phase(), Phase::Selected);

    round_trip(&mut controller, &settings, Operation::Apply, 200, FILTER_BODY);
    assert_eq!(controller.status(), &Status::Success("Done!".into()));
}

#[test]
fn server_error_surfaces_status_and_body() {
    let mut controller = Controller::new();
    let settings = FilterSettings::default();
    controller.select_file(Some(SelectedFile::new("a.bmp", vec![b'B', b'M'])));

    let finished = round_trip(
        &mut controller,
        &settings,
        Operation::Apply,
        413,
        "Request Entity Too Large",
    );
    assert_eq!(finished, Finished::Failed);
    assert_eq!(
        controller.status().message(),
        Some("Error: request failed: 413 - Request Entity Too Large")
    );
    assert!(controller.result().is_none());
    assert!(controller.can_apply());
}
