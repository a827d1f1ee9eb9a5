//! Trial construction and answer validation

pub mod generator;
pub mod validator;


pub use generator::*;
pub use validator::*;

use crate::config::Symbol;
use serde::Serialize;
use smallvec::SmallVec;

/// Inline capacity for target lists (two targets in the reference shape)
pub type TargetList = SmallVec<[Symbol; 2]>;
/// Inline capacity for search rows (five symbols in the reference shape)
pub type SearchRow = SmallVec<[Symbol; 5]>;

/// One instance of targets + search row + presence set
///
/// `present_targets` is derived once in [`Trial::new`] and never recomputed,
/// so it always reflects the row the trial was built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trial {
    targets: TargetList,
    search_row: SearchRow,
    present_targets: TargetList,
}

impl Trial {
    pub fn new(
        targets: impl IntoIterator<Item = Symbol>,
        search_row: impl IntoIterator<Item = Symbol>,
    ) -> Self {
        let targets: TargetList = targets.into_iter().collect();
        let search_row: SearchRow = search_row.into_iter().collect();
        let present_targets = targets
            .iter()
            .filter(|t| search_row.contains(*t))
            .cloned()
            .collect();

        Self {
            targets,
            search_row,
            present_targets,
        }
    }

    #[inline]
    pub fn targets(&self) -> &[Symbol] {
        &self.targets
    }

    #[inline]
    pub fn search_row(&self) -> &[Symbol] {
        &self.search_row
    }

    /// Targets occurring in the search row, in target order
    #[inline]
    pub fn present_targets(&self) -> &[Symbol] {
        &self.present_targets
    }

    #[inline]
    pub fn presence_count(&self) -> usize {
        self.present_targets.len()
    }

    pub fn is_target(&self, symbol: &Symbol) -> bool {
        self.targets.contains(symbol)
    }

    pub fn symbol_at(&self, index: usize) -> Option<&Symbol> {
        self.search_row.get(index)
    }
}
