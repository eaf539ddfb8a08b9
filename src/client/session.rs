//! Prompt form state
//!
//! Holds what a front-end shows for one prompt box: the prompt being edited,
//! the last answer or error, and whether a submission is in flight.

use crate::client::relay_client::{ClientError, PromptTransport};

/// What the front-end should render right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Idle,
    Busy,
    Answer(&'a str),
    Error(&'a str),
}

/// Outcome of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Completed,
    /// Another submission was already in flight; nothing was sent
    Ignored,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    prompt: String,
    answer: Option<String>,
    error: Option<String>,
    in_flight: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Start a submission.
    ///
    /// Returns the prompt to send, or `None` when a submission is already in
    /// flight; overlapping submissions are dropped rather than queued.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.in_flight {
            tracing::debug!("Submission ignored, previous request still in flight");
            return None;
        }

        self.answer = None;
        self.error = None;
        self.in_flight = true;
        Some(self.prompt.clone())
    }

    /// Record the outcome of the submission started by [`Self::begin_submit`]
    pub fn finish_submit(&mut self, result: Result<String, ClientError>) {
        match result {
            Ok(answer) => {
                self.answer = Some(answer);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Error fetching from API route");
                self.answer = None;
                self.error = Some(err.to_string());
            }
        }
        self.in_flight = false;
    }

    /// Submit the current prompt through `transport` and record the outcome.
    ///
    /// The in-flight flag is cleared even if this future is dropped before
    /// the transport answers.
    pub async fn submit<T>(&mut self, transport: &T) -> Submission
    where
        T: PromptTransport + ?Sized,
    {
        let Some(prompt) = self.begin_submit() else {
            return Submission::Ignored;
        };

        let guard = InFlightGuard { session: self };
        let result = transport.send_prompt(&prompt).await;
        guard.session.finish_submit(result);

        Submission::Completed
    }

    pub fn view(&self) -> View<'_> {
        if self.in_flight {
            return View::Busy;
        }
        match (&self.error, &self.answer) {
            (Some(error), _) => View::Error(error),
            (None, Some(answer)) => View::Answer(answer),
            (None, None) => View::Idle,
        }
    }
}

struct InFlightGuard<'a> {
    session: &'a mut ChatSession,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.session.in_flight = false;
    }
}
