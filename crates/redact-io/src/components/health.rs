//! Service health badge for the header.

use dioxus::prelude::*;
use redact_core::{ApiError, HealthReport};

use crate::http::ApiClient;
use crate::log;

/// Props for the [`HealthBadge`] component.
#[derive(Props, Clone, PartialEq)]
pub struct HealthBadgeProps {
    client: ApiClient,
}

/// Queries `GET /health` once on mount and shows the result.
///
/// Purely informational: an unreachable service shows "offline" but
/// the upload flow stays usable.
#[component]
pub fn HealthBadge(props: HealthBadgeProps) -> Element {
    let client = props.client;
    let health = use_resource(move || {
        let client = client.clone();
        async move {
            let report = client.health().await;
            if let Err(ref err) = report {
                log::warn(&format!("health check failed: {err}"));
            }
            report
        }
    });

    let (class, text) = match &*health.read() {
        None => ("badge", String::from("checking service...")),
        Some(Ok(report)) => badge_for(report),
        Some(Err(err)) => ("badge badge-offline", offline_text(err)),
    };

    rsx! {
        span { class: "{class}", title: "Privacy service status", "{text}" }
    }
}

fn badge_for(report: &HealthReport) -> (&'static str, String) {
    let class = if report.is_ready() {
        "badge badge-ok"
    } else {
        "badge badge-warn"
    };
    (class, format!("service {}", report.summary()))
}

fn offline_text(err: &ApiError) -> String {
    match err {
        ApiError::UnexpectedStatus { status, .. } => format!("service offline ({status})"),
        _ => String::from("service offline"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_text_shows_status_code() {
        let err = ApiError::UnexpectedStatus {
            status: 503,
            body: String::new(),
        };
        assert_eq!(offline_text(&err), "service offline (503)");
        assert_eq!(
            offline_text(&ApiError::Network("Failed to fetch".into())),
            "service offline"
        );
    }

    #[test]
    fn badge_reflects_readiness() {
        let ready = HealthReport {
            status: "ok".into(),
            mode: Some("real".into()),
            device: Some("cuda:0".into()),
            model_loaded: true,
        };
        assert_eq!(
            badge_for(&ready),
            ("badge badge-ok", "service ready (real, cuda:0)".to_owned())
        );
    }
}
