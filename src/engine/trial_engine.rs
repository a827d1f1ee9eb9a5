//! Main trial engine

use crate::config::GameConfig;
use crate::error::Result;
use crate::game::{Countdown, SessionState};
use crate::trial::{generate_trial, validate, Selection, Trial, Verdict};
use rand::Rng;

/// Main trial engine
///
/// Holds only validated configuration; every session-changing call takes the
/// caller's [`SessionState`] explicitly.
#[derive(Debug, Clone)]
pub struct TrialEngine {
    config: GameConfig,
}

impl TrialEngine {
    /// Build an engine, surfacing configuration errors before any trial exists
    pub fn new(config: GameConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            tracing::warn!(error = %err, "rejected game configuration");
            return Err(err);
        }
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn generate_trial<R: Rng>(&self, rng: &mut R) -> Result<Trial> {
        generate_trial(
            &self.config.alphabet,
            self.config.presence_mode,
            &self.config.shape,
            rng,
        )
    }

    pub fn validate(&self, trial: &Trial, selection: &Selection) -> Verdict {
        validate(trial, selection)
    }

    /// Fresh session state with the first trial already generated
    pub fn start_session<R: Rng>(&self, rng: &mut R) -> Result<SessionState> {
        let mut session = SessionState::new(
            self.config.max_trials,
            Countdown::from_secs(self.config.time_limit_secs),
        );
        session.begin(self.generate_trial(rng)?);
        Ok(session)
    }

    /// Move past the validated trial
    ///
    /// Scores the verdict, bumps the trial index and clears the selection.
    /// Returns the next trial, or `None` when the last trial was just
    /// completed. Time exhaustion is the caller's check via
    /// [`SessionState::is_finished`].
    pub fn advance<'s, R: Rng>(
        &self,
        session: &'s mut SessionState,
        rng: &mut R,
    ) -> Result<Option<&'s Trial>> {
        session.check_can_advance()?;

        let next = if session.trial_index() + 1 < session.max_trials() {
            Some(self.generate_trial(rng)?)
        } else {
            None
        };
        session.complete_trial(next);

        if session.trials_exhausted() {
            tracing::info!(
                correct = session.correct_count(),
                total = session.max_trials(),
                "session completed"
            );
        } else {
            tracing::debug!(trial = session.trial_index() + 1, "advanced to next trial");
        }

        Ok(session.current_trial())
    }

    /// Reset `session` and deal its first trial
    pub fn restart<R: Rng>(&self, session: &mut SessionState, rng: &mut R) -> Result<()> {
        let first = self.generate_trial(rng)?;
        session.reset();
        session.begin(first);
        Ok(())
    }
}
