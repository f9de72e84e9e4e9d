//! Tau Types
//!
//! Core data structures for the tau indicator library.
//! This crate provides the series and frame containers, the raw
//! parameter record with its resolution rules, and the shared enums
//! for categories, moving-average modes and fill methods.

#![deny(clippy::all)]

pub mod error;
pub mod frame;
pub mod params;
pub mod series;

// Re-export main types for convenience
pub use error::FrameError;
pub use frame::Frame;
pub use params::{FillMethod, MaMode, Params, ParseMaModeError};
pub use series::{Category, ParseCategoryError, Series};
