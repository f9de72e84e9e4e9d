//! Indicator implementations
//!
//! Contains all concrete indicator formulas built on the shared
//! machinery.

pub mod er;
pub mod pdist;
pub mod percent_return;
pub mod pvr;
pub mod rsi;
pub mod rvi;
