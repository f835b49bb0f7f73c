//! The submit cycle: validate input, send one request, render or report.
//!
//! [`AnalysisHandler::submit`] takes `&mut self`, so a handler can never
//! have two requests in flight. The trigger control is restored by a drop
//! guard, which also covers a caller dropping the future mid-request.

use crate::client::AnalysisClient;
use crate::error::AnalysisError;
use crate::models::{AnalysisRequest, AnalysisResult};
use crate::view::AnalysisView;
use std::ops::{Deref, DerefMut};
use tracing::{debug, error, info};

pub const WORKING_STATUS: &str = "Analyzing your thinking...";
pub const COMPLETE_STATUS: &str = "Analysis complete ✅";
pub const CANCELLED_STATUS: &str = "Analysis cancelled.";

/// Where the handler is in its request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Requesting,
    /// Last request failed; behaves like `Idle` for the next submit.
    Failed,
}

/// Result of one submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank input. Nothing was sent.
    Rejected,
    /// The result was rendered into the view.
    Rendered(AnalysisResult),
    /// The request failed; the message is what follows `"Error: "`.
    Failed(String),
}

/// Called with the view after every visible transition.
pub type StatusListener = Box<dyn FnMut(&AnalysisView) + Send>;

pub struct AnalysisHandler {
    client: AnalysisClient,
    view: AnalysisView,
    state: RequestState,
    listener: Option<StatusListener>,
}

impl AnalysisHandler {
    pub fn new(client: AnalysisClient, view: AnalysisView) -> Self {
        Self {
            client,
            view,
            state: RequestState::Idle,
            listener: None,
        }
    }

    /// Observe view transitions, e.g. to drive a spinner.
    pub fn with_listener(mut self, listener: StatusListener) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn view(&self) -> &AnalysisView {
        &self.view
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Analyze `raw` and write the outcome into the view.
    ///
    /// Never returns an error: failures end up in the status line.
    pub async fn submit(&mut self, raw: &str) -> SubmitOutcome {
        let Some(request) = AnalysisRequest::new(raw) else {
            self.view.status = AnalysisError::EmptyInput.to_string();
            self.notify();
            return SubmitOutcome::Rejected;
        };

        let outcome = {
            let mut in_flight = InFlight::begin(&mut self.view, &mut self.state);
            if let Some(listener) = self.listener.as_mut() {
                listener(&*in_flight);
            }

            match self.client.analyze(&request).await {
                Ok(result) => {
                    info!("Analysis received");
                    in_flight.render(&result);
                    in_flight.status = COMPLETE_STATUS.to_string();
                    in_flight.finish(RequestState::Idle);
                    SubmitOutcome::Rendered(result)
                }
                Err(e) => {
                    error!("Analysis failed (status {:?}): {:?}", e.status(), e);
                    let message = e.to_string();
                    in_flight.status = format!("Error: {}", message);
                    in_flight.finish(RequestState::Failed);
                    SubmitOutcome::Failed(message)
                }
            }
        };

        debug!("Handler state: {:?}", self.state);
        self.notify();
        outcome
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.view);
        }
    }
}

/// Holds the view while a request is outstanding.
///
/// Dropping it re-enables the trigger and leaves `Requesting`. A guard
/// dropped before `finish` marks the request as cancelled.
struct InFlight<'a> {
    view: &'a mut AnalysisView,
    state: &'a mut RequestState,
    finished: Option<RequestState>,
}

impl<'a> InFlight<'a> {
    fn begin(view: &'a mut AnalysisView, state: &'a mut RequestState) -> Self {
        view.trigger_enabled = false;
        view.status = WORKING_STATUS.to_string();
        view.result_visible = false;
        *state = RequestState::Requesting;
        Self {
            view,
            state,
            finished: None,
        }
    }

    fn finish(&mut self, state: RequestState) {
        self.finished = Some(state);
    }
}

impl Deref for InFlight<'_> {
    type Target = AnalysisView;

    fn deref(&self) -> &AnalysisView {
        self.view
    }
}

impl DerefMut for InFlight<'_> {
    fn deref_mut(&mut self) -> &mut AnalysisView {
        self.view
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.view.trigger_enabled = true;
        *self.state = match self.finished {
            Some(state) => state,
            None => {
                self.view.status = CANCELLED_STATUS.to_string();
                RequestState::Idle
            }
        };
    }
}
