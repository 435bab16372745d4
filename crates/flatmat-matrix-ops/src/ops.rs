use flatmat_matrix::FlatMatrix;
use num_traits::Float;

use crate::error::MatrixOpsError;

/// Apply a binary operator element-by-element over two matrices, writing
/// into `out`.
///
/// `out` is resized via `set_dim` (no allocation when the shape is stable),
/// so it may be a scratch matrix of any previous shape. The operands must
/// have identical shapes; this is a programming-error contract checked only
/// in debug builds. `add`, `sub`, `mul` and `div` are instantiations of
/// this kernel.
pub fn zip_apply<T, F>(a: &FlatMatrix<T>, b: &FlatMatrix<T>, out: &mut FlatMatrix<T>, f: F)
where
    T: Float,
    F: Fn(T, T) -> T,
{
    debug_assert_eq!(a.dim, b.dim, "elementwise operands must have identical shapes");
    out.set_dim(&a.dim);
    for ((o, &x), &y) in out
        .data
        .iter_mut()
        .zip(a.data.iter())
        .zip(b.data.iter())
    {
        *o = f(x, y);
    }
}

/// Apply a binary operator element-by-element, accumulating into `a`.
pub fn zip_apply_assign<T, F>(a: &mut FlatMatrix<T>, b: &FlatMatrix<T>, f: F)
where
    T: Float,
    F: Fn(T, T) -> T,
{
    debug_assert_eq!(a.dim, b.dim, "elementwise operands must have identical shapes");
    for (x, &y) in a.data.iter_mut().zip(b.data.iter()) {
        *x = f(*x, y);
    }
}

fn ensure_same_dim<T>(a: &FlatMatrix<T>, b: &FlatMatrix<T>) -> Result<(), MatrixOpsError> {
    if a.dim != b.dim {
        return Err(MatrixOpsError::ShapeMismatch(a.dim.clone(), b.dim.clone()));
    }
    Ok(())
}

/// Element-wise sum of two matrices of identical shape.
///
/// No broadcasting: the shapes must match exactly.
///
/// # Example
///
/// ```
/// use flatmat_matrix::FlatMatrix;
/// use flatmat_matrix_ops::ops::add;
///
/// let a = FlatMatrix::from_dim_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let b = FlatMatrix::from_dim_vec(&[2, 2], vec![4.0, 3.0, 2.0, 1.0]).unwrap();
/// let c = add(&a, &b).unwrap();
/// assert_eq!(c.data, vec![5.0, 5.0, 5.0, 5.0]);
/// ```
pub fn add<T: Float>(a: &FlatMatrix<T>, b: &FlatMatrix<T>) -> Result<FlatMatrix<T>, MatrixOpsError> {
    ensure_same_dim(a, b)?;
    let mut out = FlatMatrix::from_dim(&a.dim)?;
    zip_apply(a, b, &mut out, |x, y| x + y);
    Ok(out)
}

/// Element-wise difference of two matrices of identical shape.
pub fn sub<T: Float>(a: &FlatMatrix<T>, b: &FlatMatrix<T>) -> Result<FlatMatrix<T>, MatrixOpsError> {
    ensure_same_dim(a, b)?;
    let mut out = FlatMatrix::from_dim(&a.dim)?;
    zip_apply(a, b, &mut out, |x, y| x - y);
    Ok(out)
}

/// Element-wise product of two matrices of identical shape.
pub fn mul<T: Float>(a: &FlatMatrix<T>, b: &FlatMatrix<T>) -> Result<FlatMatrix<T>, MatrixOpsError> {
    ensure_same_dim(a, b)?;
    let mut out = FlatMatrix::from_dim(&a.dim)?;
    zip_apply(a, b, &mut out, |x, y| x * y);
    Ok(out)
}

/// Element-wise quotient of two matrices of identical shape.
pub fn div<T: Float>(a: &FlatMatrix<T>, b: &FlatMatrix<T>) -> Result<FlatMatrix<T>, MatrixOpsError> {
    ensure_same_dim(a, b)?;
    let mut out = FlatMatrix::from_dim(&a.dim)?;
    zip_apply(a, b, &mut out, |x, y| x / y);
    Ok(out)
}

/// In-place element-wise sum: `a += b`.
pub fn add_assign<T: Float>(a: &mut FlatMatrix<T>, b: &FlatMatrix<T>) {
    zip_apply_assign(a, b, |x, y| x + y);
}

/// In-place element-wise difference: `a -= b`.
pub fn sub_assign<T: Float>(a: &mut FlatMatrix<T>, b: &FlatMatrix<T>) {
    zip_apply_assign(a, b, |x, y| x - y);
}

/// In-place element-wise product: `a *= b`.
pub fn mul_assign<T: Float>(a: &mut FlatMatrix<T>, b: &FlatMatrix<T>) {
    zip_apply_assign(a, b, |x, y| x * y);
}

/// In-place element-wise quotient: `a /= b`.
pub fn div_assign<T: Float>(a: &mut FlatMatrix<T>, b: &FlatMatrix<T>) {
    zip_apply_assign(a, b, |x, y| x / y);
}

/// Multiply every element by a scalar.
pub fn scale<T: Float>(a: &FlatMatrix<T>, s: T) -> FlatMatrix<T> {
    a.map(|&x| x * s)
}

/// In-place scalar multiply.
pub fn scale_assign<T: Float>(a: &mut FlatMatrix<T>, s: T) {
    for x in a.data.iter_mut() {
        *x = *x * s;
    }
}

/// Matrix product into a caller-owned output: `out[i,j] = Σ_k a[i,k]·b[k,j]`.
///
/// Shapes are taken from the 2-D view, so the same kernel covers
/// matrix×vector (`b` of shape `[k]` produces `out` of shape `[m, 1]`).
/// Requires `a.restdim() == b.nrow()` (debug-checked); `out` is sized by
/// the kernel and must not alias either input, which the borrow rules
/// already enforce.
pub fn matmul_into<T: Float>(a: &FlatMatrix<T>, b: &FlatMatrix<T>, out: &mut FlatMatrix<T>) {
    let m = a.nrow();
    let k = a.restdim();
    let n = b.restdim();
    debug_assert_eq!(k, b.nrow(), "matmul: inner dimensions must agree");
    out.set_dim(&[m, n]);
    for i in 0..m {
        let arow = a.row(i);
        let orow = out.row_mut(i);
        for (j, o) in orow.iter_mut().enumerate() {
            let mut acc = T::zero();
            for (l, &av) in arow.iter().enumerate() {
                acc = acc + av * b.data[l * n + j];
            }
            *o = acc;
        }
    }
}

/// Allocating matrix product.
///
/// # Example
///
/// ```
/// use flatmat_matrix::FlatMatrix;
/// use flatmat_matrix_ops::ops::matmul;
///
/// let a = FlatMatrix::from_dim_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let i = FlatMatrix::identity(2);
/// assert_eq!(matmul(&a, &i).unwrap(), a);
/// ```
pub fn matmul<T: Float>(
    a: &FlatMatrix<T>,
    b: &FlatMatrix<T>,
) -> Result<FlatMatrix<T>, MatrixOpsError> {
    if a.restdim() != b.nrow() {
        return Err(MatrixOpsError::InnerDimMismatch {
            left: a.restdim(),
            right: b.nrow(),
        });
    }
    let mut out = FlatMatrix::from_dim(&[a.nrow(), b.restdim()])?;
    matmul_into(a, b, &mut out);
    Ok(out)
}

/// Matrix product with the right operand already transposed:
/// `out[i,j] = Σ_k a[i,k]·bt[j,k]`.
///
/// Both operands stream row-major-contiguously, which is the cache-friendly
/// access pattern when the caller naturally holds `Bᵀ` — it avoids
/// materializing a transposed copy. Requires `a.restdim() == bt.restdim()`.
pub fn matmul_bt_into<T: Float>(a: &FlatMatrix<T>, bt: &FlatMatrix<T>, out: &mut FlatMatrix<T>) {
    let m = a.nrow();
    let n = bt.nrow();
    debug_assert_eq!(
        a.restdim(),
        bt.restdim(),
        "matmul_bt: inner dimensions must agree"
    );
    out.set_dim(&[m, n]);
    for i in 0..m {
        let arow = a.row(i);
        let orow = out.row_mut(i);
        for (j, o) in orow.iter_mut().enumerate() {
            let brow = bt.row(j);
            let mut acc = T::zero();
            for (&x, &y) in arow.iter().zip(brow.iter()) {
                acc = acc + x * y;
            }
            *o = acc;
        }
    }
}

/// Allocating variant of [`matmul_bt_into`].
pub fn matmul_bt<T: Float>(
    a: &FlatMatrix<T>,
    bt: &FlatMatrix<T>,
) -> Result<FlatMatrix<T>, MatrixOpsError> {
    if a.restdim() != bt.restdim() {
        return Err(MatrixOpsError::InnerDimMismatch {
            left: a.restdim(),
            right: bt.restdim(),
        });
    }
    let mut out = FlatMatrix::from_dim(&[a.nrow(), bt.nrow()])?;
    matmul_bt_into(a, bt, &mut out);
    Ok(out)
}

/// Transpose of the 2-D view into a caller-owned output:
/// `out[j,i] = a[i,j]`.
///
/// A single pass over the source buffer writes the destination at a stride
/// of `out`'s row width, wrapping back by `out.data.len() - 1` whenever the
/// index runs off the end. Source and destination are distinct buffers by
/// construction.
pub fn transpose_into<T: Float>(a: &FlatMatrix<T>, out: &mut FlatMatrix<T>) {
    let r = a.nrow();
    let c = a.restdim();
    out.set_dim(&[c, r]);
    let len = out.data.len();
    let mut idx = 0usize;
    for &v in a.data.iter() {
        out.data[idx] = v;
        idx += r;
        if idx >= len {
            idx = idx - len + 1;
        }
    }
}

/// Allocating transpose of the 2-D view.
///
/// # Example
///
/// ```
/// use flatmat_matrix::FlatMatrix;
/// use flatmat_matrix_ops::ops::transpose;
///
/// let a = FlatMatrix::from_dim_vec(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let t = transpose(&a);
/// assert_eq!(t.dim, vec![3, 2]);
/// assert_eq!(t.data, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
/// ```
pub fn transpose<T: Float>(a: &FlatMatrix<T>) -> FlatMatrix<T> {
    let mut out = FlatMatrix {
        dim: vec![a.restdim(), a.nrow()],
        data: vec![T::nan(); a.numel()],
    };
    transpose_into(a, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat(dim: &[usize], data: &[f64]) -> FlatMatrix<f64> {
        FlatMatrix::from_dim_vec(dim, data.to_vec()).unwrap()
    }

    #[test]
    fn elementwise_ops() -> Result<(), MatrixOpsError> {
        let a = mat(&[2, 2], &[1.0, 2.0, 3.0, 4.0]);
        let b = mat(&[2, 2], &[4.0, 3.0, 2.0, 1.0]);

        assert_eq!(add(&a, &b)?.data, vec![5.0, 5.0, 5.0, 5.0]);
        assert_eq!(sub(&a, &b)?.data, vec![-3.0, -1.0, 1.0, 3.0]);
        assert_eq!(mul(&a, &b)?.data, vec![4.0, 6.0, 6.0, 4.0]);
        assert_eq!(div(&a, &b)?.data, vec![0.25, 2.0 / 3.0, 1.5, 4.0]);
        Ok(())
    }

    #[test]
    fn elementwise_assign_ops() {
        let mut a = mat(&[2, 2], &[1.0, 2.0, 3.0, 4.0]);
        let b = mat(&[2, 2], &[1.0, 1.0, 1.0, 1.0]);
        add_assign(&mut a, &b);
        assert_eq!(a.data, vec![2.0, 3.0, 4.0, 5.0]);
        sub_assign(&mut a, &b);
        assert_eq!(a.data, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn elementwise_no_broadcasting() {
        let a = mat(&[2, 2], &[1.0; 4]);
        let b = mat(&[4], &[1.0; 4]);
        let result = add(&a, &b);
        assert_eq!(
            result.unwrap_err(),
            MatrixOpsError::ShapeMismatch(vec![2, 2], vec![4])
        );
    }

    #[test]
    fn scale_ops() {
        let a = mat(&[2], &[1.0, -2.0]);
        assert_eq!(scale(&a, 3.0).data, vec![3.0, -6.0]);

        let mut b = mat(&[2], &[1.0, -2.0]);
        scale_assign(&mut b, -1.0);
        assert_eq!(b.data, vec![-1.0, 2.0]);
    }

    #[test]
    fn matmul_known_product() -> Result<(), MatrixOpsError> {
        let a = mat(&[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = mat(&[3, 2], &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let c = matmul(&a, &b)?;
        assert_eq!(c.dim, vec![2, 2]);
        assert_eq!(c.data, vec![58.0, 64.0, 139.0, 154.0]);
        Ok(())
    }

    #[test]
    fn matmul_identity_both_sides() -> Result<(), MatrixOpsError> {
        let a = mat(&[3, 3], &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0, 7.0, 8.0, 9.0]);
        let i = FlatMatrix::identity(3);
        assert_eq!(matmul(&a, &i)?, a);
        assert_eq!(matmul(&i, &a)?, a);
        Ok(())
    }

    #[test]
    fn matmul_vector_operand() -> Result<(), MatrixOpsError> {
        let a = mat(&[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let x = mat(&[3], &[1.0, 0.0, -1.0]);
        let y = matmul(&a, &x)?;
        assert_eq!(y.dim, vec![2, 1]);
        assert_eq!(y.data, vec![-2.0, -2.0]);
        Ok(())
    }

    #[test]
    fn matmul_inner_dim_mismatch() {
        let a = mat(&[2, 3], &[0.0; 6]);
        let b = mat(&[2, 3], &[0.0; 6]);
        assert_eq!(
            matmul(&a, &b).unwrap_err(),
            MatrixOpsError::InnerDimMismatch { left: 3, right: 2 }
        );
    }

    #[test]
    fn matmul_bt_matches_matmul() -> Result<(), MatrixOpsError> {
        let a = mat(&[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = mat(&[3, 2], &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let bt = transpose(&b);
        assert_eq!(matmul_bt(&a, &bt)?, matmul(&a, &b)?);
        Ok(())
    }

    #[test]
    fn matmul_into_reuses_output() {
        let a = mat(&[4, 4], &[1.0; 16]);
        let b = mat(&[4, 4], &[2.0; 16]);
        let mut out = FlatMatrix::<f64>::from_dim(&[4, 4]).unwrap();

        matmul_into(&a, &b, &mut out);
        let ptr = out.data.as_ptr();
        matmul_into(&a, &b, &mut out);
        assert_eq!(out.data.as_ptr(), ptr);
        assert_eq!(out.data, vec![8.0; 16]);
    }

    #[test]
    fn transpose_known() {
        let a = mat(&[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = transpose(&a);
        assert_eq!(t.dim, vec![3, 2]);
        assert_eq!(t.data, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn transpose_involution() {
        let a = mat(&[3, 4], &(1..=12).map(|v| v as f64).collect::<Vec<_>>());
        let tt = transpose(&transpose(&a));
        assert_eq!(tt, a);
    }

    #[test]
    fn transpose_row_and_column_vectors() {
        let a = mat(&[1, 4], &[1.0, 2.0, 3.0, 4.0]);
        let t = transpose(&a);
        assert_eq!(t.dim, vec![4, 1]);
        assert_eq!(t.data, a.data);
    }
}
