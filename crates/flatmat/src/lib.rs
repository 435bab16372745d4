#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! This crate re-exports the flatmat workspace members under short module
//! names:
//!
//! - [`matrix`] — the [`matrix::FlatMatrix`] shape+buffer data model;
//! - [`ops`] — elementwise arithmetic, matrix products and transpose;
//! - [`linalg`] — determinant, Gauss-Jordan inversion and the
//!   Golub–Reinsch SVD with their caller-owned workspaces.
//!
//! # Quick start
//!
//! ```rust
//! use flatmat::linalg::{det, matinv};
//! use flatmat::matrix::FlatMatrix;
//! use flatmat::ops::matmul;
//!
//! let a = FlatMatrix::from_dim_vec(&[2, 2], vec![4.0, 7.0, 2.0, 6.0]).unwrap();
//! let inv = matinv(&a).unwrap();
//! let prod = matmul(&a, &inv).unwrap();
//!
//! assert!((det(&a) - 10.0).abs() < 1e-12);
//! assert!((prod.data[0] - 1.0).abs() < 1e-12);
//! ```

#[doc(inline)]
pub use flatmat_matrix as matrix;

#[doc(inline)]
pub use flatmat_matrix_ops as ops;

#[doc(inline)]
pub use flatmat_linalg as linalg;
