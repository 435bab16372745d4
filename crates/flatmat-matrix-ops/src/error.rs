use flatmat_matrix::MatrixError;
use thiserror::Error;

/// An error type for matrix operations.
#[derive(Error, Debug, PartialEq)]
pub enum MatrixOpsError {
    /// Operand shapes differ where identical shapes are required.
    #[error("shape mismatch: {0:?} != {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Inner dimensions do not agree for a matrix product.
    #[error("inner dimension mismatch: left operand has {left} columns, right operand has {right} rows")]
    InnerDimMismatch {
        /// Column count of the left operand.
        left: usize,
        /// Row count of the right operand.
        right: usize,
    },

    /// Matrix error
    #[error("error with the matrix: {0}")]
    MatrixError(#[from] MatrixError),
}
