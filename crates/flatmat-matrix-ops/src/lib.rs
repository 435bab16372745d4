#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `flatmat-matrix-ops` provides the shape-checked arithmetic layer over
//! [`flatmat_matrix::FlatMatrix`]: elementwise operations (no
//! broadcasting), the row-major matrix product with its
//! transposed-right-operand variant, and the transpose kernel.
//!
//! Every kernel comes in two forms:
//!
//! - an **allocating** form that validates shapes and returns
//!   `Result<FlatMatrix<T>, MatrixOpsError>`;
//! - an **in-place** `_into`/`_assign` form for hot loops, which sizes the
//!   caller-owned output via `set_dim` (no allocation when shapes are
//!   stable) and checks shape contracts with `debug_assert!` only.
//!
//! The four concrete elementwise operations are instantiations of one
//! generic kernel, [`ops::zip_apply`].

/// Error module for the operations of this crate.
pub mod error;

/// Ops module containing the elementwise, product and transpose kernels.
pub mod ops;

pub use crate::error::MatrixOpsError;
pub use crate::ops::{
    add, add_assign, div, div_assign, matmul, matmul_bt, matmul_bt_into, matmul_into, mul,
    mul_assign, scale, scale_assign, sub, sub_assign, transpose, transpose_into, zip_apply,
    zip_apply_assign,
};
