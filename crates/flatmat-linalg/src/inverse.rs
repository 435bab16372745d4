use flatmat_matrix::FlatMatrix;
use num_traits::Float;

/// Reusable scratch for [`matinv_into`]: the augmented `[A | I]` buffer and
/// the row-permutation vector.
///
/// Row swaps during pivoting only exchange entries of the permutation
/// vector; the augmented rows never move. Resized lazily on shape change.
/// Each concurrent call site must own its own workspace.
#[derive(Debug, Clone)]
pub struct InverseWorkspace<T> {
    aug: Vec<T>,
    perm: Vec<usize>,
}

impl<T> InverseWorkspace<T> {
    /// Creates an empty workspace; the first call sizes it.
    pub fn new() -> Self {
        Self {
            aug: Vec::new(),
            perm: Vec::new(),
        }
    }
}

impl<T> Default for InverseWorkspace<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Inverts a square matrix by pivoted Gauss-Jordan elimination into a
/// caller-owned output.
///
/// An augmented `[A | I]` system is eliminated column by column: the
/// remaining row with the largest-magnitude entry in the pivot column is
/// swapped into place (through the permutation vector, first-found wins
/// ties), the pivot row is normalized, and the pivot column is cleared
/// from every other row. After `n` pivots the identity side holds the
/// inverse, read out through the accumulated permutation.
///
/// Returns `false` on an exact-zero pivot — the matrix is singular — with
/// `out` filled with NaN so callers can branch on either signal without
/// any allocation. Squareness is a debug-checked programming-error
/// contract.
///
/// # Example
///
/// ```
/// use flatmat_matrix::FlatMatrix;
/// use flatmat_linalg::{matinv_into, InverseWorkspace};
///
/// let a = FlatMatrix::from_dim_vec(&[2, 2], vec![4.0, 0.0, 0.0, 2.0]).unwrap();
/// let mut inv = FlatMatrix::from_dim(&[2, 2]).unwrap();
/// let mut ws = InverseWorkspace::new();
/// assert!(matinv_into(&a, &mut inv, &mut ws));
/// assert_eq!(inv.data, vec![0.25, 0.0, 0.0, 0.5]);
/// ```
pub fn matinv_into<T: Float>(
    a: &FlatMatrix<T>,
    out: &mut FlatMatrix<T>,
    ws: &mut InverseWorkspace<T>,
) -> bool {
    debug_assert!(a.is_square(), "matinv: matrix must be square");
    let n = a.nrow();
    let width = 2 * n;
    out.set_dim(&[n, n]);

    ws.aug.clear();
    ws.aug.resize(n * width, T::zero());
    ws.perm.clear();
    ws.perm.extend(0..n);
    let aug = &mut ws.aug;
    let perm = &mut ws.perm;

    for i in 0..n {
        aug[i * width..i * width + n].copy_from_slice(a.row(i));
        aug[i * width + n + i] = T::one();
    }

    for j in 0..n {
        // Partial pivoting: largest |entry| among the not-yet-pivoted rows.
        let mut p = j;
        let mut best = aug[perm[j] * width + j].abs();
        for i in (j + 1)..n {
            let v = aug[perm[i] * width + j].abs();
            if v > best {
                best = v;
                p = i;
            }
        }
        if best == T::zero() {
            log::debug!("matinv: exact zero pivot in column {j}, matrix is singular");
            out.fill_nan();
            return false;
        }
        perm.swap(j, p);

        let prow = perm[j] * width;
        let pivot_inv = T::one() / aug[prow + j];
        for k in 0..width {
            aug[prow + k] = aug[prow + k] * pivot_inv;
        }

        for i in 0..n {
            if i == j {
                continue;
            }
            let r = perm[i] * width;
            let factor = aug[r + j];
            if factor != T::zero() {
                for k in 0..width {
                    aug[r + k] = aug[r + k] - factor * aug[prow + k];
                }
            }
        }
    }

    // The identity side is the inverse, but its rows live at the permuted
    // physical positions.
    for i in 0..n {
        let r = perm[i] * width;
        out.row_mut(i).copy_from_slice(&aug[r + n..r + width]);
    }
    true
}

/// Allocating convenience over [`matinv_into`]; `None` for a singular
/// matrix.
pub fn matinv<T: Float>(a: &FlatMatrix<T>) -> Option<FlatMatrix<T>> {
    let n = a.nrow();
    let mut out = FlatMatrix::from_dim(&[n, n]).ok()?;
    let mut ws = InverseWorkspace::new();
    if matinv_into(a, &mut out, &mut ws) {
        Some(out)
    } else {
        None
    }
}
