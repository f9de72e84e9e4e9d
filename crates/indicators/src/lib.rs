//! Tau Indicators
//!
//! Technical indicator engine for the Tau market-data toolkit.
//! Provides oscillator, volatility and performance formulas on top of
//! shared rolling primitives.
//!
//! # Features
//! - Optional-valued series arithmetic with explicit warm-up regions
//! - Moving-average dispatcher with silent fallback to the simple mean
//! - Pluggable accelerated RSI backend selected by a capability probe
//! - Signal tables with threshold breach and cross detection
//!
//! # Available Indicators
//! - ER: Efficiency Ratio
//! - RSI: Relative Strength Index (Wilder smoothing)
//! - RVI: Relative Volatility Index (refined and thirds variants)
//! - PDIST: Price Distance
//! - PCTRET: Percent Return (lagged and cumulative)
//! - PVR: Price Volume Rank

pub mod accel;
pub mod impl_;
pub mod ma;
pub mod postprocess;
pub mod rolling;
pub mod signals;

// Re-export main types
pub use accel::{available, register, Backend, Native};
pub use ma::ma;
pub use postprocess::postprocess;
pub use rolling::TieSide;
pub use signals::{signals, SignalOptions};

// Re-export indicator implementations
pub use impl_::{
    er::ER,
    pdist::PriceDistance,
    percent_return::PercentReturn,
    pvr::PVR,
    rsi::RSI,
    rvi::RVI,
};
