#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! The kernels in this crate share three conventions:
//!
//! - **Caller-owned workspaces**: O(n²) scratch lives in explicit objects
//!   ([`GaussianWorkspace`], [`InverseWorkspace`], [`Svd`]) resized lazily
//!   on shape change, never in hidden process-wide state. Workspaces must
//!   not be shared between concurrent call sites.
//! - **Value-based failure**: singular inputs and non-convergence are
//!   reported as `bool`/`Option` plus NaN-filled outputs, not as errors, so
//!   hot loops stay allocation-free. A zero determinant is a value.
//! - **Debug-checked contracts**: squareness and `m ≥ n` preconditions are
//!   `debug_assert!`s; release builds trust the caller.

/// Module for the pivoted-elimination determinant.
pub mod determinant;

/// Module for pivoted Gauss-Jordan matrix inversion.
pub mod inverse;

/// Module for the Golub–Reinsch singular value decomposition.
pub mod svd;

pub use crate::determinant::{det, det_in, GaussianWorkspace};
pub use crate::inverse::{matinv, matinv_into, InverseWorkspace};
pub use crate::svd::{svd, svd_into, Svd, MAX_QR_ITERATIONS};
