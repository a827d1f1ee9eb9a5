//! Configuration module for game settings
//!
//! This module holds the trial shape, session limits and alphabet, and
//! handles loading them from JSON or from Python dicts.

mod alphabet;
mod mode;

pub use alphabet::*;
pub use mode::*;

use crate::error::{Result, SymbolSearchError};
use pyo3::types::{PyAnyMethods, PyDict, PyDictMethods};
use pyo3::Bound;
use serde::{Deserialize, Serialize};

/// Default number of trials per session
pub const DEFAULT_MAX_TRIALS: u32 = 10;
/// Default session time limit in seconds
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 120;
/// Largest time limit whose remaining seconds still fit a signed countdown
pub const MAX_TIME_LIMIT_SECS: u64 = i64::MAX as u64;
/// Default number of target symbols per trial
pub const DEFAULT_TARGET_COUNT: usize = 2;
/// Default number of symbols in the search row
pub const DEFAULT_ROW_SIZE: usize = 5;

/// Size of a single trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialShape {
    pub target_count: usize,
    pub row_size: usize,
}

impl Default for TrialShape {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            row_size: DEFAULT_ROW_SIZE,
        }
    }
}

impl TrialShape {
    /// Minimum alphabet size needed to build this shape under `mode`
    ///
    /// Controlled rows are filled from symbols outside the targets, so the
    /// targets and the row must fit side by side.
    pub fn required_symbols(&self, mode: PresenceMode) -> usize {
        match mode {
            PresenceMode::Uncontrolled => self.target_count.max(self.row_size),
            PresenceMode::Controlled => self.target_count + self.row_size,
        }
    }

    /// Check that `alphabet` can supply this shape under `mode`
    pub fn check(&self, alphabet: &SymbolAlphabet, mode: PresenceMode) -> Result<()> {
        if self.target_count == 0 {
            return Err(SymbolSearchError::Configuration(
                "target_count must be at least 1".to_string(),
            ));
        }
        if self.row_size == 0 {
            return Err(SymbolSearchError::Configuration(
                "row_size must be at least 1".to_string(),
            ));
        }
        if mode == PresenceMode::Controlled && self.row_size < self.target_count {
            return Err(SymbolSearchError::Configuration(format!(
                "controlled mode needs row_size ({}) >= target_count ({})",
                self.row_size, self.target_count
            )));
        }

        let required = self.required_symbols(mode);
        if alphabet.len() < required {
            return Err(SymbolSearchError::Configuration(format!(
                "{} mode needs at least {} distinct symbols, alphabet has {}",
                mode,
                required,
                alphabet.len()
            )));
        }
        Ok(())
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub alphabet: SymbolAlphabet,
    pub presence_mode: PresenceMode,
    pub shape: TrialShape,
    pub max_trials: u32,
    pub time_limit_secs: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            alphabet: SymbolAlphabet::default(),
            presence_mode: PresenceMode::default(),
            shape: TrialShape::default(),
            max_trials: DEFAULT_MAX_TRIALS,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
        }
    }
}

impl GameConfig {
    /// Validate session limits and the alphabet against the trial shape
    pub fn validate(&self) -> Result<()> {
        if self.max_trials == 0 {
            return Err(SymbolSearchError::Configuration(
                "max_trials must be at least 1".to_string(),
            ));
        }
        if self.time_limit_secs == 0 {
            return Err(SymbolSearchError::Configuration(
                "time_limit_secs must be at least 1".to_string(),
            ));
        }
        if self.time_limit_secs > MAX_TIME_LIMIT_SECS {
            return Err(SymbolSearchError::Configuration(format!(
                "time_limit_secs must be at most {}",
                MAX_TIME_LIMIT_SECS
            )));
        }
        self.shape.check(&self.alphabet, self.presence_mode)
    }

    /// Load and validate a configuration from JSON; missing fields use defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Helper to get optional attribute from either dict or object
fn get_attr_opt<'py>(
    obj: &Bound<'py, pyo3::PyAny>,
    name: &str,
) -> Option<Bound<'py, pyo3::PyAny>> {
    let value = if let Ok(dict) = obj.cast::<PyDict>() {
        dict.get_item(name).ok().flatten()
    } else {
        obj.getattr(name).ok()
    };
    value.filter(|v| !v.is_none())
}

/// Deserialize a game config from a Python dict
/// Expected format: {"alphabet": [...], "presence_mode": "controlled", ...}
pub fn deserialize_game_config(config: &Bound<'_, PyDict>) -> pyo3::PyResult<GameConfig> {
    let obj = config.as_any();
    let defaults = GameConfig::default();

    let alphabet = match get_attr_opt(obj, "alphabet") {
        Some(value) => {
            let glyphs: Vec<String> = value.extract()?;
            SymbolAlphabet::new(glyphs)?
        }
        None => defaults.alphabet,
    };

    let presence_mode = match get_attr_opt(obj, "presence_mode") {
        Some(value) => value.extract::<String>()?.parse::<PresenceMode>()?,
        None => defaults.presence_mode,
    };

    // Shape may be nested under "shape" or given as top-level keys
    let shape_obj = get_attr_opt(obj, "shape");
    let shape_source = shape_obj.as_ref().unwrap_or(obj);
    let shape = TrialShape {
        target_count: get_attr_opt(shape_source, "target_count")
            .map(|v| v.extract())
            .transpose()?
            .unwrap_or(defaults.shape.target_count),
        row_size: get_attr_opt(shape_source, "row_size")
            .map(|v| v.extract())
            .transpose()?
            .unwrap_or(defaults.shape.row_size),
    };

    let max_trials: u32 = get_attr_opt(obj, "max_trials")
        .map(|v| v.extract())
        .transpose()?
        .unwrap_or(defaults.max_trials);
    let time_limit_secs: u64 = get_attr_opt(obj, "time_limit_secs")
        .map(|v| v.extract())
        .transpose()?
        .unwrap_or(defaults.time_limit_secs);

    let config = GameConfig {
        alphabet,
        presence_mode,
        shape,
        max_trials,
        time_limit_secs,
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyo3::Python;

    fn alphabet_of(n: usize) -> SymbolAlphabet {
        SymbolAlphabet::new((0..n).map(|i| format!("S{}", i))).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_trials, 10);
        assert_eq!(config.time_limit_secs, 120);
        assert_eq!(config.shape, TrialShape { target_count: 2, row_size: 5 });
    }

    #[test]
    fn test_required_symbols() {
        let shape = TrialShape::default();
        assert_eq!(shape.required_symbols(PresenceMode::Uncontrolled), 5);
        assert_eq!(shape.required_symbols(PresenceMode::Controlled), 7);
    }

    #[test]
    fn test_alphabet_too_small() {
        let shape = TrialShape::default();
        assert!(shape.check(&alphabet_of(5), PresenceMode::Uncontrolled).is_ok());
        assert!(shape.check(&alphabet_of(4), PresenceMode::Uncontrolled).is_err());
        assert!(shape.check(&alphabet_of(7), PresenceMode::Controlled).is_ok());

        let err = shape.check(&alphabet_of(6), PresenceMode::Controlled).unwrap_err();
        assert!(matches!(err, SymbolSearchError::Configuration(_)));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = GameConfig {
            max_trials: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            time_limit_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_time_limit_upper_bound() {
        let config = GameConfig {
            time_limit_secs: MAX_TIME_LIMIT_SECS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = GameConfig {
            time_limit_secs: u64::MAX,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SymbolSearchError::Configuration(_)));
    }

    #[test]
    fn test_controlled_row_smaller_than_targets() {
        let shape = TrialShape {
            target_count: 3,
            row_size: 2,
        };
        assert!(shape.check(&alphabet_of(20), PresenceMode::Controlled).is_err());
        assert!(shape.check(&alphabet_of(20), PresenceMode::Uncontrolled).is_ok());
    }

    #[test]
    fn test_from_json_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_from_json_full() {
        let json = r#"{
            "alphabet": ["A","B","C","D","E","F","G","H"],
            "presence_mode": "controlled",
            "shape": {"target_count": 2, "row_size": 5},
            "max_trials": 4,
            "time_limit_secs": 30
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.alphabet.len(), 8);
        assert_eq!(config.presence_mode, PresenceMode::Controlled);
        assert_eq!(config.max_trials, 4);
        assert_eq!(config.time_limit_secs, 30);
    }

    #[test]
    fn test_from_json_errors() {
        let err = GameConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, SymbolSearchError::Deserialization(_)));

        let json = r#"{"alphabet": ["A","B","C","D","E","F"], "presence_mode": "controlled"}"#;
        let err = GameConfig::from_json(json).unwrap_err();
        assert!(matches!(err, SymbolSearchError::Configuration(_)));
    }

    // ------------------------------------------------------------------------
    // Python dict loading
    // ------------------------------------------------------------------------

    #[test]
    fn test_deserialize_nested_shape() {
        Python::initialize();
        Python::attach(|py| {
            let shape = PyDict::new(py);
            shape.set_item("target_count", 3).unwrap();
            shape.set_item("row_size", 4).unwrap();

            let dict = PyDict::new(py);
            dict.set_item("presence_mode", "Controlled").unwrap();
            dict.set_item("shape", shape).unwrap();
            dict.set_item("max_trials", 6).unwrap();
            dict.set_item("time_limit_secs", 45).unwrap();

            let config = deserialize_game_config(&dict).unwrap();
            assert_eq!(config.presence_mode, PresenceMode::Controlled);
            assert_eq!(config.shape, TrialShape { target_count: 3, row_size: 4 });
            assert_eq!(config.max_trials, 6);
            assert_eq!(config.time_limit_secs, 45);
            assert_eq!(config.alphabet, SymbolAlphabet::default());
        });
    }

    #[test]
    fn test_deserialize_top_level_shape_and_defaults() {
        Python::initialize();
        Python::attach(|py| {
            let dict = PyDict::new(py);
            dict.set_item("alphabet", vec!["A", "B", "C", "D", "E", "F"]).unwrap();
            dict.set_item("row_size", 6).unwrap();
            dict.set_item("max_trials", py.None()).unwrap();

            let config = deserialize_game_config(&dict).unwrap();
            assert_eq!(config.alphabet.len(), 6);
            assert_eq!(config.presence_mode, PresenceMode::Uncontrolled);
            assert_eq!(config.shape, TrialShape { target_count: 2, row_size: 6 });
            assert_eq!(config.max_trials, DEFAULT_MAX_TRIALS);
            assert_eq!(config.time_limit_secs, DEFAULT_TIME_LIMIT_SECS);
        });
    }

    #[test]
    fn test_deserialize_rejects_invalid_config() {
        Python::initialize();
        Python::attach(|py| {
            let dict = PyDict::new(py);
            dict.set_item("alphabet", vec!["A", "B", "C", "D", "E", "F"]).unwrap();
            dict.set_item("presence_mode", "controlled").unwrap();
            let err = deserialize_game_config(&dict).unwrap_err();
            assert!(err.is_instance_of::<pyo3::exceptions::PyValueError>(py));

            let dict = PyDict::new(py);
            dict.set_item("presence_mode", "sometimes").unwrap();
            assert!(deserialize_game_config(&dict).is_err());
        });
    }
}
