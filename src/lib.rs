//! Symbol Search Core - timed symbol-matching quiz engine
//!
//! This crate provides the trial generation, answer validation and session
//! bookkeeping for a symbol search cognitive test, with Python bindings via
//! PyO3 so a thin UI layer can host the game.

use pyo3::prelude::*;

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod trial;

use crate::config::{GameConfig, DEFAULT_SYMBOLS};
use crate::engine::{GameSession, TrialEngine};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use pyo3::types::PyDict;
use std::sync::Arc;

// ============================================================================
// Cached Configuration
// ============================================================================

/// Cached configuration containing the shared engine
struct CachedConfig {
    engine: Arc<TrialEngine>,
}

/// Global cached configuration
static CACHED_CONFIG: OnceCell<Arc<RwLock<CachedConfig>>> = OnceCell::new();

// ============================================================================
// Helper Functions
// ============================================================================

/// Store `config` as the engine used by new sessions
fn cache_config(config: GameConfig) -> PyResult<()> {
    let engine = TrialEngine::new(config)?;
    let cached = CachedConfig {
        engine: Arc::new(engine),
    };

    // If already initialized, update the config
    if let Some(existing) = CACHED_CONFIG.get() {
        let mut guard = existing.write();
        *guard = cached;
    } else {
        let _ = CACHED_CONFIG.set(Arc::new(RwLock::new(cached)));
    }

    Ok(())
}

// ============================================================================
// Python Functions
// ============================================================================

/// Initialize the game configuration (call once at startup)
///
/// Sessions created afterwards share the cached engine. Calling this again
/// replaces the configuration for new sessions only.
///
/// # Arguments
/// * `config` - Optional dict with `alphabet`, `presence_mode`, `shape`
///   (`target_count`, `row_size`), `max_trials`, `time_limit_secs`.
///   Missing keys use the defaults (20 glyphs, uncontrolled, 2 targets,
///   5 row symbols, 10 trials, 120 seconds).
///
/// # Raises
/// ValueError if the alphabet cannot supply the requested trial shape
#[pyfunction]
#[pyo3(signature = (config=None))]
fn init_config(config: Option<&Bound<'_, PyDict>>) -> PyResult<()> {
    let config = match config {
        Some(dict) => config::deserialize_game_config(dict)?,
        None => GameConfig::default(),
    };
    cache_config(config)
}

/// Initialize the game configuration from a JSON string
#[pyfunction]
fn init_config_json(json: &str) -> PyResult<()> {
    let config = GameConfig::from_json(json)?;
    cache_config(config)
}

/// Check if config is initialized
#[pyfunction]
fn is_config_initialized() -> bool {
    CACHED_CONFIG.get().is_some()
}

/// Start a new session using the cached config
///
/// # Arguments
/// * `seed` - Optional seed for a reproducible trial sequence
///
/// # Returns
/// A GameSession with its first trial ready
///
/// # Raises
/// RuntimeError if `init_config` was not called first
#[pyfunction]
#[pyo3(signature = (seed=None))]
fn new_session(seed: Option<u64>) -> PyResult<GameSession> {
    let config_arc = CACHED_CONFIG
        .get()
        .ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(
                "Config not initialized. Call init_config() first.",
            )
        })?
        .clone();

    let engine = config_arc.read().engine.clone();
    Ok(GameSession::new(engine, seed)?)
}

/// The built-in glyph set
#[pyfunction]
fn default_alphabet() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Python Module Definition
// ============================================================================

/// Python module definition
#[pymodule]
fn symbol_search_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_config, m)?)?;
    m.add_function(wrap_pyfunction!(init_config_json, m)?)?;
    m.add_function(wrap_pyfunction!(is_config_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(new_session, m)?)?;
    m.add_function(wrap_pyfunction!(default_alphabet, m)?)?;
    m.add_class::<GameSession>()?;
    Ok(())
}
