//! The idle → analyzing → result flow.
//!
//! `submit` takes `&mut self` for the whole request, so a session can never
//! have two analyses in flight.

use tg_core::{AnalysisResult, TgError, TgResult};
use tracing::{debug, info};

use crate::client::Analyzer;

/// Minimum trimmed input length accepted for analysis.
pub const MIN_INPUT_CHARS: usize = 10;

/// Where a session is in its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Analyzing,
    Result,
}

impl SessionStatus {
    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Analyzing => "analyzing",
            Self::Result => "result",
        }
    }

    /// Check if transition to another status is valid.
    pub fn can_transition_to(&self, to: &Self) -> bool {
        matches!(
            (self, to),
            (Self::Idle, Self::Analyzing)
                | (Self::Analyzing, Self::Result)
                | (Self::Analyzing, Self::Idle)
                | (Self::Result, Self::Idle)
                | (Self::Idle, Self::Idle)
        )
    }
}

/// One user's analysis flow.
#[derive(Debug)]
pub struct AnalysisSession {
    status: SessionStatus,
    result: Option<AnalysisResult>,
    error: Option<String>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Idle,
            result: None,
            error: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Message of the last failed submission, cleared on the next one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether `text` is long enough to submit.
    pub fn accepts(text: &str) -> bool {
        text.trim().chars().count() >= MIN_INPUT_CHARS
    }

    /// Analyze `text` and move to the result state.
    ///
    /// Short input is rejected without calling the analyzer. On failure the
    /// session returns to idle with the error message recorded, ready for
    /// another attempt.
    pub async fn submit<A>(&mut self, analyzer: &A, text: &str) -> TgResult<&AnalysisResult>
    where
        A: Analyzer + ?Sized,
    {
        if self.status != SessionStatus::Idle {
            return Err(TgError::InvalidStateTransition {
                from: self.status.as_str().to_string(),
                to: SessionStatus::Analyzing.as_str().to_string(),
            });
        }

        if !Self::accepts(text) {
            let err = TgError::validation(format!(
                "Input must be at least {} characters",
                MIN_INPUT_CHARS
            ));
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.transition(SessionStatus::Analyzing)?;
        self.error = None;

        match analyzer.analyze(text).await {
            Ok(result) => {
                info!(verdict = %result.verdict, confidence = result.confidence, "Analysis complete");
                self.transition(SessionStatus::Result)?;
                Ok(self.result.insert(result))
            }
            Err(e) => {
                debug!(error = %e, "Analysis failed, returning to idle");
                self.error = Some(e.to_string());
                self.transition(SessionStatus::Idle)?;
                Err(e)
            }
        }
    }

    /// Discard the result and any error and return to idle.
    pub fn reset(&mut self) {
        self.result = None;
        self.error = None;
        self.status = SessionStatus::Idle;
    }

    fn transition(&mut self, to: SessionStatus) -> TgResult<()> {
        if !self.status.can_transition_to(&to) {
            return Err(TgError::InvalidStateTransition {
                from: self.status.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }
        self.status = to;
        Ok(())
    }
}
