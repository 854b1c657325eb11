//! Straight-line performance estimates for the tuning screen.
//!
//! Each estimate is recomputed from scratch whenever a tuning parameter
//! changes, so the model is a fixed-step integration that finishes in well
//! under a millisecond.

mod simulator;
mod tuning;

pub use simulator::{
    estimate_all, estimate_quarter_mile, estimate_top_speed, estimate_zero_to_sixty,
    PerformanceFigures, PerformanceSimulator,
};
pub use tuning::TuningState;
