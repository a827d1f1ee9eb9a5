//! Session state - score, progress and the active trial's answer
//!
//! The state is owned by the caller and passed into engine calls. It only
//! changes through the trial state machine:
//! `AwaitingSelection -> (toggle)* -> Validated -> advance -> AwaitingSelection`.

use crate::error::{Result, SymbolSearchError};
use crate::game::Countdown;
use crate::trial::{validate, Selection, Trial, Verdict};
use serde::Serialize;
use std::time::Duration;

/// Where the active trial is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TrialPhase {
    AwaitingSelection { selection: Selection },
    Validated { selection: Selection, verdict: Verdict },
}

impl Default for TrialPhase {
    fn default() -> Self {
        TrialPhase::AwaitingSelection {
            selection: Selection::default(),
        }
    }
}

/// Final or running score report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub correct: u32,
    pub total: u32,
    pub completed: u32,
    pub finished: bool,
    pub remaining_secs: i64,
}

/// Progress of one player's session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    trial_index: u32,
    correct_count: u32,
    max_trials: u32,
    countdown: Countdown,
    current_trial: Option<Trial>,
    phase: TrialPhase,
}

impl SessionState {
    /// Fresh session with no trial generated yet
    pub fn new(max_trials: u32, countdown: Countdown) -> Self {
        Self {
            trial_index: 0,
            correct_count: 0,
            max_trials,
            countdown,
            current_trial: None,
            phase: TrialPhase::default(),
        }
    }

    /// Completed trials so far
    #[inline]
    pub fn trial_index(&self) -> u32 {
        self.trial_index
    }

    #[inline]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[inline]
    pub fn max_trials(&self) -> u32 {
        self.max_trials
    }

    #[inline]
    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    #[inline]
    pub fn current_trial(&self) -> Option<&Trial> {
        self.current_trial.as_ref()
    }

    #[inline]
    pub fn phase(&self) -> &TrialPhase {
        &self.phase
    }

    pub fn selection(&self) -> &Selection {
        match &self.phase {
            TrialPhase::AwaitingSelection { selection } => selection,
            TrialPhase::Validated { selection, .. } => selection,
        }
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match &self.phase {
            TrialPhase::AwaitingSelection { .. } => None,
            TrialPhase::Validated { verdict, .. } => Some(verdict),
        }
    }

    #[inline]
    pub fn is_validated(&self) -> bool {
        matches!(self.phase, TrialPhase::Validated { .. })
    }

    #[inline]
    pub fn trials_exhausted(&self) -> bool {
        self.trial_index >= self.max_trials
    }

    /// Terminal once every trial is done or the time budget is spent
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.trials_exhausted() || self.countdown.is_expired(elapsed)
    }

    /// Whether the "next trial" action is available
    pub fn can_advance(&self) -> bool {
        self.current_trial.is_some() && self.is_validated() && !self.trials_exhausted()
    }

    /// Toggle the search-row symbol at `index`
    pub fn toggle_symbol(&mut self, index: usize) -> Result<()> {
        let symbol = self
            .active_trial()?
            .symbol_at(index)
            .cloned()
            .ok_or(SymbolSearchError::InvalidSelection(index))?;
        self.awaiting_selection()?.toggle(symbol);
        Ok(())
    }

    /// Toggle the "none of the targets appear" answer
    pub fn toggle_none(&mut self) -> Result<()> {
        self.active_trial()?;
        self.awaiting_selection()?.toggle_none();
        Ok(())
    }

    /// Judge the current selection; a trial gets exactly one verdict
    pub fn submit(&mut self) -> Result<&Verdict> {
        let trial = self.active_trial()?;
        let selection = match &self.phase {
            TrialPhase::AwaitingSelection { selection } => selection.clone(),
            TrialPhase::Validated { .. } => {
                return Err(SymbolSearchError::InvalidTransition(
                    "trial already validated".to_string(),
                ))
            }
        };

        let verdict = validate(trial, &selection);
        tracing::debug!(
            trial = self.trial_index + 1,
            correct = verdict.correct,
            "trial validated"
        );
        self.phase = TrialPhase::Validated { selection, verdict };

        self.verdict()
            .ok_or_else(|| SymbolSearchError::InvalidTransition("verdict not recorded".to_string()))
    }

    /// Score report; a verdict not yet advanced past still counts
    pub fn summary(&self, elapsed: Duration) -> SessionSummary {
        let pending = match &self.phase {
            TrialPhase::Validated { verdict, .. } if verdict.correct => 1,
            _ => 0,
        };
        SessionSummary {
            correct: self.correct_count + pending,
            total: self.max_trials,
            completed: self.trial_index + u32::from(self.is_validated()),
            finished: self.is_finished(elapsed),
            remaining_secs: self.countdown.remaining_secs(elapsed),
        }
    }

    /// Drop all progress, keeping the limits
    pub fn reset(&mut self) {
        *self = SessionState::new(self.max_trials, self.countdown);
    }

    /// Check that the session may move past the current trial
    pub(crate) fn check_can_advance(&self) -> Result<()> {
        if self.trials_exhausted() {
            return Err(SymbolSearchError::InvalidTransition(format!(
                "session already completed {} trials",
                self.max_trials
            )));
        }
        if self.current_trial.is_none() {
            return Err(SymbolSearchError::InvalidTransition(
                "no active trial".to_string(),
            ));
        }
        if !self.is_validated() {
            return Err(SymbolSearchError::InvalidTransition(
                "current trial has no verdict yet".to_string(),
            ));
        }
        Ok(())
    }

    /// Record the current verdict and install `next` as the active trial
    ///
    /// `next` is `None` once the last trial has been completed.
    pub(crate) fn complete_trial(&mut self, next: Option<Trial>) {
        if let TrialPhase::Validated { verdict, .. } = &self.phase {
            if verdict.correct {
                self.correct_count += 1;
            }
        }
        self.trial_index += 1;
        self.current_trial = next;
        self.phase = TrialPhase::default();
    }

    /// Install the first trial of a fresh session
    pub(crate) fn begin(&mut self, trial: Trial) {
        self.current_trial = Some(trial);
        self.phase = TrialPhase::default();
    }

    fn active_trial(&self) -> Result<&Trial> {
        self.current_trial
            .as_ref()
            .ok_or_else(|| SymbolSearchError::InvalidTransition("no active trial".to_string()))
    }

    fn awaiting_selection(&mut self) -> Result<&mut Selection> {
        match &mut self.phase {
            TrialPhase::AwaitingSelection { selection } => Ok(selection),
            TrialPhase::Validated { .. } => Err(SymbolSearchError::InvalidTransition(
                "selection is locked after validation".to_string(),
            )),
        }
    }
}
