//! Trial engine and the Python-facing session handle

mod session;
mod trial_engine;

pub use session::*;
pub use trial_engine::*;
