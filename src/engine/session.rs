//! GameSession - Stateful session handle for the Python-Rust boundary
//!
//! The UI layer holds one `GameSession` per player. It owns the session
//! state, the random source and the wall-clock start time, and feeds the
//! elapsed time into the pure state calls.

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{Result, SymbolSearchError};
use crate::game::{SessionState, SessionSummary};
use crate::trial::Verdict;

use super::TrialEngine;

// ============================================================================
// GameSession PyClass
// ============================================================================

/// GameSession - one player's running quiz
///
/// # Thread Safety
/// GameSession is Send + Sync because every field is: the engine is shared through
/// an `Arc` and never mutated, the rest is owned plain data.
#[pyclass]
pub struct GameSession {
    engine: Arc<TrialEngine>,
    state: SessionState,
    rng: StdRng,
    started_at: Instant,
    /// Time counted as already spent before `started_at`
    head_start: Duration,
}

impl GameSession {
    /// Start a session with its first trial; `seed` makes it reproducible
    pub fn new(engine: Arc<TrialEngine>, seed: Option<u64>) -> Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = engine.start_session(&mut rng)?;

        Ok(Self {
            engine,
            state,
            rng,
            started_at: Instant::now(),
            head_start: Duration::ZERO,
        })
    }

    #[inline]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[inline]
    fn elapsed(&self) -> Duration {
        self.started_at.elapsed() + self.head_start
    }

    fn ensure_running(&self) -> Result<()> {
        if self.state.is_finished(self.elapsed()) {
            return Err(SymbolSearchError::InvalidTransition(
                "session is finished".to_string(),
            ));
        }
        Ok(())
    }

    /// Judge the current selection
    pub fn submit(&mut self) -> Result<Verdict> {
        self.ensure_running()?;
        self.state.submit().cloned()
    }

    /// Move to the next trial; false once the session is over
    pub fn advance(&mut self) -> Result<bool> {
        if self.state.is_finished(self.elapsed()) {
            return Ok(false);
        }
        let next = self.engine.advance(&mut self.state, &mut self.rng)?;
        Ok(next.is_some())
    }

    pub fn score(&self) -> SessionSummary {
        self.state.summary(self.elapsed())
    }

    /// Count `by` as already spent
    #[cfg(test)]
    pub(crate) fn skip_ahead(&mut self, by: Duration) {
        self.head_start += by;
    }
}

fn verdict_to_dict<'py>(py: Python<'py>, verdict: &Verdict) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("correct", verdict.correct)?;
    let expected: Vec<&str> = verdict.expected.iter().map(|s| s.as_str()).collect();
    dict.set_item("expected", expected)?;
    dict.set_item("message", &verdict.message)?;
    Ok(dict)
}

// ============================================================================
// PyMethods Implementation
// ============================================================================

#[pymethods]
impl GameSession {
    // ------------------------------------------------------------------------
    // Getter Properties
    // ------------------------------------------------------------------------

    /// 1-based number of the trial on screen, capped at max_trials
    #[getter]
    fn trial_number(&self) -> u32 {
        (self.state.trial_index() + 1).min(self.state.max_trials())
    }

    /// Completed trials
    #[getter]
    fn trial_index(&self) -> u32 {
        self.state.trial_index()
    }

    #[getter]
    fn correct_count(&self) -> u32 {
        self.state.correct_count()
    }

    #[getter]
    fn max_trials(&self) -> u32 {
        self.state.max_trials()
    }

    /// Whole seconds left; zero or negative once time is up
    #[getter]
    fn remaining_seconds(&self) -> i64 {
        self.state.countdown().remaining_secs(self.elapsed())
    }

    #[getter]
    fn is_finished(&self) -> bool {
        self.state.is_finished(self.elapsed())
    }

    #[getter]
    fn is_validated(&self) -> bool {
        self.state.is_validated()
    }

    /// Target symbols of the current trial (empty once finished)
    #[getter]
    fn targets(&self) -> Vec<String> {
        self.state
            .current_trial()
            .map(|t| t.targets().iter().map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }

    /// Search row of the current trial (empty once finished)
    #[getter]
    fn search_row(&self) -> Vec<String> {
        self.state
            .current_trial()
            .map(|t| t.search_row().iter().map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }

    /// Row positions currently marked as selected
    #[getter]
    fn selected_indices(&self) -> Vec<usize> {
        let selection = self.state.selection();
        self.state
            .current_trial()
            .map(|t| {
                t.search_row()
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| selection.contains(*s))
                    .map(|(i, _)| i)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[getter]
    fn none_selected(&self) -> bool {
        self.state.selection().is_none_apply()
    }

    /// Feedback text of the current verdict, if any
    #[getter]
    fn feedback(&self) -> Option<String> {
        self.state.verdict().map(|v| v.message.clone())
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    /// Toggle the search-row symbol at `index`
    ///
    /// # Raises
    /// IndexError if `index` is outside the row, RuntimeError after validation
    fn toggle_symbol(&mut self, index: usize) -> PyResult<()> {
        self.ensure_running()?;
        self.state.toggle_symbol(index)?;
        Ok(())
    }

    /// Toggle the "none of the targets appear" answer
    fn toggle_none(&mut self) -> PyResult<()> {
        self.ensure_running()?;
        self.state.toggle_none()?;
        Ok(())
    }

    /// Validate the current selection
    ///
    /// # Returns
    /// Dict with `correct`, `expected` (list of symbols) and `message`
    fn validate(&mut self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let verdict = self.submit()?;
        Ok(verdict_to_dict(py, &verdict)?.into_any().unbind())
    }

    /// Advance to the next trial
    ///
    /// # Returns
    /// True if a new trial is ready, False when the session has ended
    fn next_trial(&mut self) -> PyResult<bool> {
        Ok(self.advance()?)
    }

    /// Score report: correct, total, completed, finished, remaining_secs
    fn summary(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let summary = self.score();
        let dict = PyDict::new(py);
        dict.set_item("correct", summary.correct)?;
        dict.set_item("total", summary.total)?;
        dict.set_item("completed", summary.completed)?;
        dict.set_item("finished", summary.finished)?;
        dict.set_item("remaining_secs", summary.remaining_secs)?;
        Ok(dict.into_any().unbind())
    }

    /// Start over with a fresh first trial and a full time budget
    fn restart(&mut self) -> PyResult<()> {
        self.engine.restart(&mut self.state, &mut self.rng)?;
        self.started_at = Instant::now();
        self.head_start = Duration::ZERO;
        Ok(())
    }

    /// Serialize the session state to JSON
    fn snapshot_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.state)
            .map_err(|e| PyRuntimeError::new_err(format!("Snapshot failed: {}", e)))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, PresenceMode};

    fn session(seed: u64) -> GameSession {
        let engine = TrialEngine::new(GameConfig {
            presence_mode: PresenceMode::Controlled,
            max_trials: 3,
            ..Default::default()
        })
        .unwrap();
        GameSession::new(Arc::new(engine), Some(seed)).unwrap()
    }

    #[test]
    fn test_seeded_sessions_match() {
        let a = session(5);
        let b = session(5);
        assert_eq!(a.targets(), b.targets());
        assert_eq!(a.search_row(), b.search_row());
    }

    #[test]
    fn test_play_through() {
        let mut game = session(9);
        assert_eq!(game.trial_number(), 1);

        for round in 0..3 {
            game.toggle_none().unwrap();
            assert!(game.none_selected());
            game.submit().unwrap();
            assert!(game.feedback().is_some());
            let more = game.advance().unwrap();
            assert_eq!(more, round < 2);
        }

        assert!(game.is_finished());
        assert!(game.targets().is_empty());
        assert_eq!(game.trial_index(), 3);
        assert_eq!(game.trial_number(), 3);
        assert!(!game.advance().unwrap());
    }

    #[test]
    fn test_selected_indices() {
        let mut game = session(21);
        game.toggle_symbol(1).unwrap();
        game.toggle_symbol(3).unwrap();
        assert_eq!(game.selected_indices(), vec![1, 3]);
        game.toggle_symbol(1).unwrap();
        assert_eq!(game.selected_indices(), vec![3]);
    }

    #[test]
    fn test_expired_session_rejects_actions() {
        let mut game = session(2);
        game.skip_ahead(Duration::from_secs(121));

        assert!(game.is_finished());
        assert!(game.remaining_seconds() <= -1);
        assert!(game.submit().is_err());
        assert!(!game.advance().unwrap());
        assert!(game.score().finished);
    }

    #[test]
    fn test_restart_resets_clock_and_score() {
        let mut game = session(3);
        game.skip_ahead(Duration::from_secs(60));
        assert!(game.remaining_seconds() <= 60);
        game.submit().unwrap();
        game.advance().unwrap();
        game.restart().unwrap();

        assert_eq!(game.trial_index(), 0);
        assert_eq!(game.correct_count(), 0);
        assert!(!game.is_validated());
        assert!(game.remaining_seconds() >= 119);
    }

    #[test]
    fn test_snapshot_json() {
        let game = session(4);
        let json = game.snapshot_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["trial_index"], 0);
        assert_eq!(value["max_trials"], 3);
        assert_eq!(value["phase"]["phase"], "awaiting_selection");
    }
}
