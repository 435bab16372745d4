#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `flatmat-matrix` provides [`FlatMatrix`], a dense matrix stored as one
//! contiguous row-major buffer plus a shape vector. The shape may encode
//! any number of logical dimensions; every consumer treats the matrix as
//! `nrow` rows of `restdim` contiguous elements, which is the only 2-D
//! view the numerical kernels in the sibling crates rely on.
//!
//! # Key features
//!
//! - **Placeholder inference**: one shape entry may be `0` at construction
//!   and is resolved from the data length.
//! - **Allocation-averse resizing**: [`FlatMatrix::set_dim`] reallocates
//!   only when the element count changes, so repeated kernel calls with
//!   stable shapes never allocate.
//! - **Exclusive ownership**: a matrix owns its buffer; `clone` breaks
//!   aliasing, and `&`/`&mut` borrows keep kernel inputs and outputs
//!   disjoint.
//! - **NaN conventions**: `PartialEq` treats NaN as equal to NaN so tests
//!   can compare failure outputs; [`FlatMatrix::has_nan`] is the production
//!   probe for NaN-filled failure results.
//!
//! # Quick start
//!
//! ```rust
//! use flatmat_matrix::FlatMatrix;
//!
//! let m = FlatMatrix::from_dim_vec(&[0, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! assert_eq!(m.dim, vec![2, 3]);
//! assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
//! ```

/// Matrix module containing the flat-buffer matrix implementation and
/// error types.
pub mod matrix;

/// Serde module for serialization and deserialization of the `(dim, data)`
/// pair when the `serde` feature is enabled.
#[cfg(feature = "serde")]
pub mod serde;

pub use crate::matrix::{complete_dim, FlatMatrix, MatrixError};
