//! Session bookkeeping - progress, score and time budget

mod clock;
mod state;


pub use clock::*;
pub use state::*;
