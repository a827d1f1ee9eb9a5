//! Answer validation - exact set comparison against the presence set

use crate::config::Symbol;
use crate::trial::{TargetList, Trial};
use ahash::AHashSet;
use serde::Serialize;
use smallvec::SmallVec;

/// The player's answer for the current trial
///
/// Picking symbols and declaring "none apply" are mutually exclusive, so they
/// live in one tagged value instead of two flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "symbols", rename_all = "snake_case")]
pub enum Selection {
    /// Symbols picked from the search row, in pick order
    Specific(SmallVec<[Symbol; 5]>),
    /// The player declared that no target appears in the row
    NoneApply,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Specific(SmallVec::new())
    }
}

impl Selection {
    pub fn specific(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut selection = Selection::default();
        for symbol in symbols {
            if !selection.contains(&symbol) {
                selection.toggle(symbol);
            }
        }
        selection
    }

    /// Add `symbol` if absent, remove it if present; leaves "none apply"
    pub fn toggle(&mut self, symbol: Symbol) {
        match self {
            Selection::NoneApply => {
                let mut picks = SmallVec::new();
                picks.push(symbol);
                *self = Selection::Specific(picks);
            }
            Selection::Specific(picks) => {
                if let Some(pos) = picks.iter().position(|s| *s == symbol) {
                    picks.remove(pos);
                } else {
                    picks.push(symbol);
                }
            }
        }
    }

    /// Switch "none apply" on (dropping queued picks) or back off
    pub fn toggle_none(&mut self) {
        *self = match self {
            Selection::NoneApply => Selection::default(),
            Selection::Specific(_) => Selection::NoneApply,
        };
    }

    #[inline]
    pub fn is_none_apply(&self) -> bool {
        matches!(self, Selection::NoneApply)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        match self {
            Selection::NoneApply => false,
            Selection::Specific(picks) => picks.contains(symbol),
        }
    }

    /// Symbols that count as the answer; empty under "none apply"
    pub fn effective(&self) -> &[Symbol] {
        match self {
            Selection::NoneApply => &[],
            Selection::Specific(picks) => picks.as_slice(),
        }
    }
}

/// Correctness judgment and feedback text for a submitted selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub correct: bool,
    pub expected: TargetList,
    pub message: String,
}

/// Judge `selection` against the trial's presence set
///
/// Exact set equality: a subset or superset of the present targets is wrong.
pub fn validate(trial: &Trial, selection: &Selection) -> Verdict {
    let expected: AHashSet<&Symbol> = trial.present_targets().iter().collect();
    let chosen: AHashSet<&Symbol> = selection.effective().iter().collect();
    let correct = chosen == expected;

    let message = match (correct, expected.is_empty()) {
        (true, true) => "Correct. None of the target symbols were present.".to_string(),
        (true, false) => format!(
            "Correct. You selected exactly the present symbols: {}",
            join_symbols(trial.present_targets())
        ),
        (false, true) => {
            "Incorrect. You should not have selected any symbol (expected: none).".to_string()
        }
        (false, false) => format!(
            "Incorrect. You should have selected: {}",
            join_symbols(trial.present_targets())
        ),
    };

    Verdict {
        correct,
        expected: trial.present_targets().iter().cloned().collect(),
        message,
    }
}

fn join_symbols(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
