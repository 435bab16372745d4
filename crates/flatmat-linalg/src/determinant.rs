use flatmat_matrix::FlatMatrix;
use num_traits::Float;

/// Reusable elimination buffer for [`det_in`].
///
/// Holds the row-major working copy the forward elimination destroys.
/// Resized lazily: repeated calls with the same matrix size reuse the
/// allocation. Not safe to share between concurrent call sites; each
/// caller owns its workspace.
#[derive(Debug, Clone)]
pub struct GaussianWorkspace<T> {
    work: Vec<T>,
}

impl<T> GaussianWorkspace<T> {
    /// Creates an empty workspace; the first call sizes it.
    pub fn new() -> Self {
        Self { work: Vec::new() }
    }
}

impl<T> Default for GaussianWorkspace<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Determinant of a square matrix by forward Gaussian elimination with
/// partial pivoting, reusing the caller's workspace.
///
/// At each column the remaining row with the largest-magnitude entry is
/// swapped to the diagonal (first-found wins ties), flipping the sign
/// accumulator. The determinant is the sign-adjusted product of the
/// resulting diagonal. An exact-zero pivot short-circuits to `0.0` — a
/// zero determinant is a value, not a failure.
///
/// Squareness is a debug-checked programming-error contract.
pub fn det_in<T: Float>(a: &FlatMatrix<T>, ws: &mut GaussianWorkspace<T>) -> T {
    debug_assert!(a.is_square(), "det: matrix must be square");
    let n = a.nrow();

    ws.work.clear();
    ws.work.extend_from_slice(&a.data);
    let w = &mut ws.work;

    let mut sign = T::one();
    for j in 0..n {
        // Largest |entry| in column j on or below the diagonal.
        let mut p = j;
        let mut best = w[j * n + j].abs();
        for i in (j + 1)..n {
            let v = w[i * n + j].abs();
            if v > best {
                best = v;
                p = i;
            }
        }
        if best == T::zero() {
            return T::zero();
        }
        if p != j {
            for k in j..n {
                w.swap(j * n + k, p * n + k);
            }
            sign = -sign;
        }

        let pivot = w[j * n + j];
        for i in (j + 1)..n {
            let factor = w[i * n + j] / pivot;
            if factor != T::zero() {
                for k in (j + 1)..n {
                    w[i * n + k] = w[i * n + k] - factor * w[j * n + k];
                }
            }
        }
    }

    let mut det = sign;
    for j in 0..n {
        det = det * w[j * n + j];
    }
    det
}

/// Allocating convenience over [`det_in`].
///
/// # Example
///
/// ```
/// use flatmat_matrix::FlatMatrix;
/// use flatmat_linalg::det;
///
/// let a = FlatMatrix::from_dim_vec(&[2, 2], vec![3.0, 1.0, 4.0, 2.0]).unwrap();
/// assert_eq!(det(&a), 2.0);
/// ```
pub fn det<T: Float>(a: &FlatMatrix<T>) -> T {
    det_in(a, &mut GaussianWorkspace::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mat(n: usize, data: &[f64]) -> FlatMatrix<f64> {
        FlatMatrix::from_dim_vec(&[n, n], data.to_vec()).unwrap()
    }

    #[test]
    fn det_identity() {
        assert_eq!(det(&FlatMatrix::<f64>::identity(4)), 1.0);
    }

    #[test]
    fn det_2x2() {
        let a = mat(2, &[1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(det(&a), -2.0, max_relative = 1e-12);
    }

    #[test]
    fn det_known_4x4() {
        let a = mat(
            4,
            &[
                1.0, 4.0, 2.0, 17.0, //
                54.0, 23.0, 12.0, 56.0, //
                7.0, 324.0, 23.0, 56.0, //
                542.0, 3.0, 23.0, 43.0,
            ],
        );
        assert_relative_eq!(det(&a), 9053872.0, max_relative = 1e-10);
    }

    #[test]
    fn det_singular_is_exact_zero() {
        // Rank-1 matrix: elimination hits an exact zero pivot.
        let a = mat(3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 3.0, 6.0, 9.0]);
        assert_eq!(det(&a), 0.0);

        let b = mat(3, &[123.0; 9]);
        assert_eq!(det(&b), 0.0);
    }

    #[test]
    fn det_row_swap_flips_sign() {
        // Permuted identity: one row swap, determinant -1.
        let a = mat(3, &[0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_relative_eq!(det(&a), -1.0, max_relative = 1e-12);
    }

    #[test]
    fn det_workspace_reuse() {
        let a = mat(2, &[2.0, 0.0, 0.0, 5.0]);
        let b = mat(2, &[1.0, 1.0, 0.0, 1.0]);
        let mut ws = GaussianWorkspace::new();
        assert_relative_eq!(det_in(&a, &mut ws), 10.0, max_relative = 1e-12);
        assert_relative_eq!(det_in(&b, &mut ws), 1.0, max_relative = 1e-12);
        // Shape change is handled by the same workspace.
        let c = mat(3, &[1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0]);
        assert_relative_eq!(det_in(&c, &mut ws), 6.0, max_relative = 1e-12);
    }
}
