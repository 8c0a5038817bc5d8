//! Pullback-reversal screener.
//!
//! The trigger engine (`signals`) decides, for one symbol's daily bars,
//! whether the EMA10/EMA20 pullback setup holds as of the last bar. The
//! remaining modules fetch bars, fan symbols out and serve the results.

pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod screener;
pub mod services;
pub mod signals;
