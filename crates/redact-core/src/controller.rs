//! Upload/preview controller state machine.
//!
//! Tracks the selected file, which actions are enabled, the status area,
//! and the latest displayed result. The controller never performs I/O:
//! the UI calls [`Controller::begin`], sends the request itself, then
//! reports the outcome through [`Controller::finish`].
//!
//! ```text
//! NoFile --select--> Selected --preview ok--> Previewed
//!                       |                        |
//!                       +-------apply ok---------+--> Applied
//! ```
//!
//! Selecting a new file from any phase returns to `Selected`; clearing
//! the selection returns to `NoFile`.

use std::rc::Rc;

use crate::error::ApiError;
use crate::request::Operation;
use crate::status::Status;
use crate::types::{Outcome, SelectedFile};

/// Where the session is in the select → preview → apply sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No image chosen; both actions disabled.
    #[default]
    NoFile,
    /// An image is chosen but nothing has been sent.
    Selected,
    /// The last successful request was a preview.
    Previewed,
    /// The last successful request was the privacy filter.
    Applied,
}

/// Handle for one in-flight request.
///
/// Carries the generation it was issued under so a result that arrives
/// after the user picked another file can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    operation: Operation,
    generation: u64,
}

impl Ticket {
    #[must_use]
    pub const fn operation(self) -> Operation {
        self.operation
    }
}

/// Why a request could not be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BeginError {
    #[error("no image selected")]
    NoFile,
    #[error("a {0} request is already running")]
    Busy(Operation),
}

/// What [`Controller::finish`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finished {
    /// The result was shown.
    Displayed,
    /// The error was shown in the status area.
    Failed,
    /// The ticket belonged to a replaced file; nothing changed on screen.
    Stale,
}

/// The image and regions currently shown in the result panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedResult {
    /// Which request produced it.
    pub operation: Operation,
    pub outcome: Outcome,
}

impl DisplayedResult {
    /// Text shown under the result image.
    #[must_use]
    pub fn region_text(&self) -> String {
        let n = self.outcome.regions.len();
        let noun = if n == 1 { "region" } else { "regions" };
        match self.operation {
            Operation::Apply => format!("Processed {n} {noun}"),
            Operation::Preview => format!("Found {n} candidate {noun}"),
        }
    }
}

/// Page-session state for the upload/preview flow.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    file: Option<Rc<SelectedFile>>,
    phase: Phase,
    in_flight: Option<Operation>,
    status: Status,
    result: Option<DisplayedResult>,
    generation: u64,
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace or clear the selected file.
    ///
    /// Any previous result and status are cleared and the generation is
    /// bumped so a request still in flight for the old file is ignored
    /// when it completes. The in-flight marker itself stays until that
    /// request finishes, keeping at most one request outstanding.
    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        self.generation += 1;
        self.result = None;
        self.status = Status::Hidden;
        self.phase = if file.is_some() {
            Phase::Selected
        } else {
            Phase::NoFile
        };
        self.file = file.map(Rc::new);
    }

    #[must_use]
    pub fn file(&self) -> Option<&Rc<SelectedFile>> {
        self.file.as_ref()
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    #[must_use]
    pub const fn result(&self) -> Option<&DisplayedResult> {
        self.result.as_ref()
    }

    /// The operation currently waiting on the network, if any.
    #[must_use]
    pub const fn in_flight(&self) -> Option<Operation> {
        self.in_flight
    }

    /// Whether the Preview button is enabled.
    #[must_use]
    pub const fn can_preview(&self) -> bool {
        self.file.is_some() && self.in_flight.is_none()
    }

    /// Whether the Apply button is enabled.
    #[must_use]
    pub const fn can_apply(&self) -> bool {
        self.file.is_some() && self.in_flight.is_none()
    }

    /// Mark `operation` as started and show the loading status.
    ///
    /// # Errors
    ///
    /// Returns [`BeginError::NoFile`] without a selected file and
    /// [`BeginError::Busy`] while another request is in flight.
    pub fn begin(&mut self, operation: Operation) -> Result<Ticket, BeginError> {
        if let Some(running) = self.in_flight {
            return Err(BeginError::Busy(running));
        }
        if self.file.is_none() {
            return Err(BeginError::NoFile);
        }
        self.in_flight = Some(operation);
        self.status = Status::Loading(loading_message(operation).to_owned());
        Ok(Ticket {
            operation,
            generation: self.generation,
        })
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Failures only touch the status area: the file, phase, and any
    /// previously displayed result are kept.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<Outcome, ApiError>) -> Finished {
        self.in_flight = None;
        if ticket.generation != self.generation {
            return Finished::Stale;
        }

        match outcome {
            Ok(outcome) => {
                self.phase = match ticket.operation {
                    Operation::Preview => Phase::Previewed,
                    Operation::Apply => Phase::Applied,
                };
                self.status = Status::Success(success_message(ticket.operation).to_owned());
                self.result = Some(DisplayedResult {
                    operation: ticket.operation,
                    outcome,
                });
                Finished::Displayed
            }
            Err(err) => {
                self.status = Status::Error(failure_message(ticket.operation, &err));
                Finished::Failed
            }
        }
    }

    /// Text shown under the result image, if a result is displayed.
    #[must_use]
    pub fn region_text(&self) -> Option<String> {
        self.result.as_ref().map(DisplayedResult::region_text)
    }
}

const fn loading_message(operation: Operation) -> &'static str {
    match operation {
        Operation::Preview => "Generating preview...",
        Operation::Apply => "Processing, please wait...",
    }
}

const fn success_message(operation: Operation) -> &'static str {
    match operation {
        Operation::Preview => "Preview ready",
        Operation::Apply => "Done!",
    }
}

fn failure_message(operation: Operation, err: &ApiError) -> String {
    match (operation, err) {
        (Operation::Preview, ApiError::Network(detail)) => format!(
            "Preview service unreachable ({detail}). You can still use Apply to filter the image."
        ),
        _ => format!("Error: {err}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{AppliedRegion, BoundingBox, ImageData};

    fn file(name: &str) -> SelectedFile {
        SelectedFile::new(name, vec![1, 2, 3])
    }

    fn outcome(regions: u32) -> Outcome {
        Outcome {
            image: ImageData::from_payload("data:image/png;base64,AAAA"),
            regions: (0..regions)
                .map(|mask_id| AppliedRegion {
                    mask_id,
                    bbox: BoundingBox::default(),
                    area: 1,
                })
                .collect(),
        }
    }

    #[test]
    fn starts_with_everything_disabled() {
        let c = Controller::new();
        assert_eq!(c.phase(), Phase::NoFile);
        assert!(!c.can_preview());
        assert!(!c.can_apply());
        assert_eq!(c.status(), &Status::Hidden);
    }

    #[test]
    fn selecting_enables_and_clearing_disables() {
        let mut c = Controller::new();
        c.select_file(Some(file("a.png")));
        assert!(c.can_preview());
        assert!(c.can_apply());
        assert_eq!(c.phase(), Phase::Selected);

        c.select_file(None);
        assert!(!c.can_preview());
        assert!(!c.can_apply());
        assert_eq!(c.phase(), Phase::NoFile);
        assert!(c.file().is_none());
    }

    #[test]
    fn begin_without_file_is_rejected() {
        let mut c = Controller::new();
        assert_eq!(c.begin(Operation::Apply), Err(BeginError::NoFile));
        assert_eq!(c.status(), &Status::Hidden);
    }

    #[test]
    fn buttons_are_disabled_while_in_flight() {
        let mut c = Controller::new();
        c.select_file(Some(file("a.png")));
        let ticket = c.begin(Operation::Preview).unwrap();
        assert!(!c.can_preview());
        assert!(!c.can_apply());
        assert!(matches!(c.status(), Status::Loading(_)));
        assert_eq!(
            c.begin(Operation::Apply),
            Err(BeginError::Busy(Operation::Preview))
        );

        c.finish(ticket, Ok(outcome(0)));
        assert!(c.can_apply());
    }

    #[test]
    fn apply_success_reports_region_count() {
        let mut c = Controller::new();
        c.select_file(Some(file("a.png")));
        let ticket = c.begin(Operation::Apply).unwrap();
        assert_eq!(c.finish(ticket, Ok(outcome(4))), Finished::Displayed);

        assert_eq!(c.phase(), Phase::Applied);
        assert_eq!(c.region_text().as_deref(), Some("Processed 4 regions"));
        assert_eq!(c.status(), &Status::Success("Done!".into()));
    }

    #[test]
    fn single_region_is_singular() {
        let mut c = Controller::new();
        c.select_file(Some(file("a.png")));
        let ticket = c.begin(Operation::Apply).unwrap();
        c.finish(ticket, Ok(outcome(1)));
        assert_eq!(c.region_text().as_deref(), Some("Processed 1 region"));
    }

    #[test]
    fn preview_success_shows_candidates() {
        let mut c = Controller::new();
        c.select_file(Some(file("a.png")));
        let ticket = c.begin(Operation::Preview).unwrap();
        c.finish(ticket, Ok(outcome(3)));
        assert_eq!(c.phase(), Phase::Previewed);
        assert_eq!(c.region_text().as_deref(), Some("Found 3 candidate regions"));
        assert_eq!(c.result().unwrap().operation, Operation::Preview);
    }

    #[test]
    fn failure_keeps_file_and_buttons() {
        let mut c = Controller::new();
        c.select_file(Some(file("a.png")));
        let before = c.file().cloned();
        let ticket = c.begin(Operation::Apply).unwrap();
        let finished = c.finish(
            ticket,
            Err(ApiError::UnexpectedStatus {
                status: 500,
                body: "boom".into(),
            }),
        );

        assert_eq!(finished, Finished::Failed);
        assert_eq!(c.file().cloned(), before);
        assert!(c.can_preview());
        assert!(c.can_apply());
        assert_eq!(c.phase(), Phase::Selected);
        assert_eq!(
            c.status(),
            &Status::Error("Error: request failed: 500 - boom".into())
        );
    }

    #[test]
    fn failure_keeps_previous_result_visible() {
        let mut c = Controller::new();
        c.select_file(Some(file("a.png")));
        let t = c.begin(Operation::Preview).unwrap();
        c.finish(t, Ok(outcome(2)));
        let t = c.begin(Operation::Apply).unwrap();
        c.finish(t, Err(ApiError::Decode("eof".into())));

        assert_eq!(c.phase(), Phase::Previewed);
        assert_eq!(c.region_text().as_deref(), Some("Found 2 candidate regions"));
    }

    #[test]
    fn preview_network_failure_points_to_apply() {
        let mut c = Controller::new();
        c.select_file(Some(file("a.png")));
        let t = c.begin(Operation::Preview).unwrap();
        c.finish(t, Err(ApiError::Network("Failed to fetch".into())));

        let msg = c.status().message().unwrap();
        assert!(msg.contains("Failed to fetch"));
        assert!(msg.contains("Apply"));
    }

    #[test]
    fn apply_network_failure_is_plain_error() {
        let mut c = Controller::new();
        c.select_file(Some(file("a.png")));
        let t = c.begin(Operation::Apply).unwrap();
        c.finish(t, Err(ApiError::Network("Failed to fetch".into())));
        assert_eq!(
            c.status(),
            &Status::Error("Error: network error: Failed to fetch".into())
        );
    }

    #[test]
    fn preview_with_unreadable_body_is_not_reported_unreachable() {
        let mut c = Controller::new();
        c.select_file(Some(file("a.png")));
        let t = c.begin(Operation::Preview).unwrap();
        c.finish(t, Err(ApiError::unreadable_body(502, "stream aborted")));

        let msg = c.status().message().unwrap();
        assert!(msg.starts_with("Error: invalid response: 502"));
        assert!(!msg.contains("unreachable"));
    }

    #[test]
    fn new_file_clears_result_and_status() {
        let mut c = Controller::new();
        c.select_file(Some(file("a.png")));
        let t = c.begin(Operation::Apply).unwrap();
        c.finish(t, Ok(outcome(2)));

        c.select_file(Some(file("b.png")));
        assert!(c.result().is_none());
        assert_eq!(c.status(), &Status::Hidden);
        assert_eq!(c.phase(), Phase::Selected);
        assert_eq!(c.file().unwrap().name, "b.png");
    }

    #[test]
    fn result_for_replaced_file_is_dropped() {
        let mut c = Controller::new();
        c.select_file(Some(file("a.png")));
        let t = c.begin(Operation::Apply).unwrap();

        c.select_file(Some(file("b.png")));
        // Still one request outstanding until the old one lands.
        assert!(!c.can_apply());

        assert_eq!(c.finish(t, Ok(outcome(5))), Finished::Stale);
        assert!(c.result().is_none());
        assert_eq!(c.phase(), Phase::Selected);
        assert_eq!(c.status(), &Status::Hidden);
        assert!(c.can_apply());
    }
}
