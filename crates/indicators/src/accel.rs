//! Optional accelerated-backend seam.
//!
//! A process may register one external numeric backend. Indicator
//! configs that opt in resolve their backend once at construction and
//! fall back to the native kernels silently when nothing is
//! registered.

use std::sync::{Arc, OnceLock};

/// Numeric routines an external backend may replace.
///
/// Implementations must stay behaviorally interchangeable with
/// [`Native`] within floating tolerance; delegation is a pure
/// optimization, never a semantic switch.
pub trait Backend: Send + Sync {
    /// Backend name, for diagnostics
    fn name(&self) -> &str;

    /// Classic Wilder-smoothed relative strength index over `values`,
    /// scaled to `0..=scalar`.
    fn rsi(&self, values: &[Option<f64>], length: usize, scalar: f64) -> Vec<Option<f64>>;
}

/// In-repo reference implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct Native;

impl Backend for Native {
    fn name(&self) -> &str {
        "native"
    }

    fn rsi(&self, values: &[Option<f64>], length: usize, scalar: f64) -> Vec<Option<f64>> {
        crate::impl_::rsi::rsi_values(values, length, scalar, 1, tau_types::MaMode::Rma)
    }
}

static REGISTERED: OnceLock<Arc<dyn Backend>> = OnceLock::new();

/// Registers the process-wide accelerated backend.
///
/// Only the first registration wins; returns whether this call
/// installed the backend.
pub fn register(backend: Arc<dyn Backend>) -> bool {
    REGISTERED.set(backend).is_ok()
}

/// Whether an accelerated backend is registered
#[must_use]
pub fn available() -> bool {
    REGISTERED.get().is_some()
}

/// Resolves the backend for a config constructed with `accelerated`.
///
/// A missing registration is a silent fallback to [`Native`], per the
/// permissive-degrade contract.
#[must_use]
pub fn resolve(accelerated: bool) -> Arc<dyn Backend> {
    if accelerated {
        if let Some(backend) = REGISTERED.get() {
            return Arc::clone(backend);
        }
        tracing::debug!("accelerated backend requested but none registered, using native kernels");
    }
    Arc::new(Native)
}
