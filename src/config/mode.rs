//! Presence mode - how target symbols end up in the search row

use crate::error::SymbolSearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many targets appear in a generated search row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceMode {
    /// Row sampled independently of the targets; matches happen by chance
    #[default]
    Uncontrolled,
    /// Presence count drawn uniformly, targets injected at random positions
    Controlled,
}

impl PresenceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceMode::Uncontrolled => "uncontrolled",
            PresenceMode::Controlled => "controlled",
        }
    }
}

impl fmt::Display for PresenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresenceMode {
    type Err = SymbolSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uncontrolled" => Ok(PresenceMode::Uncontrolled),
            "controlled" => Ok(PresenceMode::Controlled),
            other => Err(SymbolSearchError::Configuration(format!(
                "unknown presence mode: {}",
                other
            ))),
        }
    }
}
