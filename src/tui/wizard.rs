//! Generic multi-step flow used by every payment screen.
//!
//! A wizard owns the current step, the form being filled in, the one
//! in-flight simulated action (if any) and the fabricated result of the
//! last completed action.

use std::fmt::Debug;
use std::time::Duration;

use thiserror::Error;

use crate::tui::backend::{PendingTask, SimulatedBackend};
use crate::tui::screen_trait::ScreenId;
use crate::tui::validation::{FieldErrors, Validate};

/// Enumerated steps of one screen's flow
pub trait WizardStep: Copy + PartialEq + Debug {
    fn initial() -> Self;
    fn processing() -> Self;
    fn success() -> Self;
}

#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    #[error("invalid form: {0}")]
    Invalid(FieldErrors),

    #[error("an action is already in progress")]
    Busy,
}

#[derive(Debug)]
pub struct StepWizard<S: WizardStep, F: Default, R> {
    step: S,
    pub form: F,
    in_flight: Option<PendingTask>,
    result: Option<R>,
}

impl<S: WizardStep, F: Default, R> Default for StepWizard<S, F, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: WizardStep, F: Default, R> StepWizard<S, F, R> {
    pub fn new() -> Self {
        Self {
            step: S::initial(),
            form: F::default(),
            in_flight: None,
            result: None,
        }
    }

    pub fn step(&self) -> S {
        self.step
    }

    pub fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Ticket of the in-flight action, if any
    pub fn pending_ticket(&self) -> Option<u64> {
        self.in_flight.as_ref().map(PendingTask::ticket)
    }

    pub fn go_to_step(&mut self, step: S) -> Result<(), WizardError> {
        if self.is_busy() {
            return Err(WizardError::Busy);
        }
        tracing::debug!(from = ?self.step, to = ?step, "wizard step");
        self.step = step;
        Ok(())
    }

    /// Validate the form and, if it passes, move to the processing step and
    /// schedule the simulated action. Returns the completion ticket.
    pub fn submit(
        &mut self,
        backend: &SimulatedBackend,
        owner: ScreenId,
        delay: Duration,
    ) -> Result<u64, WizardError>
    where
        F: Validate,
    {
        if self.is_busy() {
            return Err(WizardError::Busy);
        }
        self.form.validate().map_err(WizardError::Invalid)?;

        let task = backend.schedule(owner, delay);
        let ticket = task.ticket();
        self.in_flight = Some(task);
        self.step = S::processing();
        tracing::info!(?owner, ticket, "submitted");
        Ok(ticket)
    }

    /// Accept the completion for the in-flight action. Stale or unknown
    /// tickets are ignored and `false` is returned.
    pub fn complete(&mut self, ticket: u64, result: R) -> bool {
        if self.pending_ticket() != Some(ticket) {
            tracing::debug!(ticket, "ignoring stale completion");
            return false;
        }
        self.in_flight = None;
        self.step = S::success();
        self.result = Some(result);
        true
    }

    pub fn cancel_pending(&mut self) {
        if let Some(task) = self.in_flight.take() {
            tracing::debug!(ticket = task.ticket(), "cancelled pending action");
        }
    }

    /// Return to the first step, abandoning any in-flight action. The form is kept.
    pub fn back(&mut self) {
        self.cancel_pending();
        self.step = S::initial();
    }

    /// Start over: first step, empty form, no result
    pub fn reset(&mut self) {
        self.back();
        self.form = F::default();
        self.result = None;
    }
}
