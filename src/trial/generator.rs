//! Trial generation - target sampling and search row construction

use crate::config::{PresenceMode, Symbol, SymbolAlphabet, TrialShape};
use crate::error::{Result, SymbolSearchError};
use crate::trial::{SearchRow, TargetList, Trial};
use rand::seq::{index, SliceRandom};
use rand::Rng;

/// Generate a trial under `mode`
///
/// Uncontrolled rows are drawn from the whole alphabet, so the number of
/// targets present is whatever the sampling produces. Controlled rows get a
/// presence count drawn uniformly from `0..=target_count`.
pub fn generate_trial<R: Rng>(
    alphabet: &SymbolAlphabet,
    mode: PresenceMode,
    shape: &TrialShape,
    rng: &mut R,
) -> Result<Trial> {
    shape.check(alphabet, mode)?;

    match mode {
        PresenceMode::Uncontrolled => {
            let targets: TargetList = sample_distinct(alphabet.symbols(), shape.target_count, rng);
            let row: SearchRow = sample_distinct(alphabet.symbols(), shape.row_size, rng);

            let trial = Trial::new(targets, row);
            tracing::debug!(
                mode = %mode,
                presence = trial.presence_count(),
                "generated trial"
            );
            Ok(trial)
        }
        PresenceMode::Controlled => {
            let presence = rng.gen_range(0..=shape.target_count);
            generate_trial_with_presence(alphabet, shape, presence, rng)
        }
    }
}

/// Generate a controlled trial with exactly `presence` targets in the row
///
/// Filler symbols come from outside the target set, so no target can land in
/// the row by chance. The row is shuffled after the chosen targets are added.
pub fn generate_trial_with_presence<R: Rng>(
    alphabet: &SymbolAlphabet,
    shape: &TrialShape,
    presence: usize,
    rng: &mut R,
) -> Result<Trial> {
    shape.check(alphabet, PresenceMode::Controlled)?;
    if presence > shape.target_count {
        return Err(SymbolSearchError::Configuration(format!(
            "presence count {} exceeds target_count {}",
            presence, shape.target_count
        )));
    }

    let targets: TargetList = sample_distinct(alphabet.symbols(), shape.target_count, rng);

    let fillers: Vec<Symbol> = alphabet
        .iter()
        .filter(|s| !targets.contains(*s))
        .cloned()
        .collect();

    let mut row: SearchRow = sample_distinct(&fillers, shape.row_size - presence, rng);
    row.extend(sample_distinct::<_, TargetList>(&targets, presence, rng));
    row.shuffle(rng);

    let trial = Trial::new(targets, row);
    tracing::debug!(
        mode = %PresenceMode::Controlled,
        presence = trial.presence_count(),
        "generated trial"
    );
    Ok(trial)
}

/// Draw `amount` distinct symbols uniformly without replacement, in random order
fn sample_distinct<R, C>(pool: &[Symbol], amount: usize, rng: &mut R) -> C
where
    R: Rng,
    C: FromIterator<Symbol>,
{
    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect()
}
