use num_traits::Float;
use thiserror::Error;

/// An error type for matrix construction and shape manipulation.
///
/// Shape mismatches between already-constructed matrices inside the hot
/// numerical kernels are programming errors and are checked with
/// `debug_assert!` there; this enum covers the fallible entry points that
/// take arbitrary caller input.
#[derive(Error, Debug, PartialEq)]
pub enum MatrixError {
    /// The shape does not match the provided data.
    ///
    /// The product of the (resolved) dimensions must equal the number of
    /// elements in the data buffer exactly.
    #[error("shape mismatch: shape {dim:?} holds {expected} elements, but got {actual} elements in data")]
    InvalidShape {
        /// The offending shape.
        dim: Vec<usize>,
        /// Expected number of elements based on the shape.
        expected: usize,
        /// Actual number of elements in the data.
        actual: usize,
    },

    /// More than one dimension was given as the `0` placeholder.
    ///
    /// At most one entry of a shape may be `0` at construction time; a
    /// second placeholder makes the inference ambiguous.
    #[error("ambiguous shape {0:?}: more than one zero placeholder")]
    AmbiguousPlaceholder(Vec<usize>),

    /// The placeholder dimension cannot be inferred because the element
    /// count does not divide evenly by the known dimensions.
    #[error("cannot infer placeholder in {dim:?}: {total} elements do not divide by {known}")]
    IndivisiblePlaceholder {
        /// The shape containing the placeholder.
        dim: Vec<usize>,
        /// Total number of elements in the data.
        total: usize,
        /// Product of the non-placeholder dimensions.
        known: usize,
    },

    /// A shape needs at least one dimension.
    #[error("empty shape: a matrix needs at least one dimension")]
    EmptyShape,

    /// Index exceeds the matrix bounds.
    #[error("index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index that was attempted.
        index: usize,
        /// The size of the dimension being indexed.
        size: usize,
    },

    /// Matrix shapes incompatible for the requested operation.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        actual: String,
    },
}

impl MatrixError {
    /// Creates an `InvalidShape` error with clear context.
    pub fn invalid_shape(dim: &[usize], expected: usize, actual: usize) -> Self {
        Self::InvalidShape {
            dim: dim.to_vec(),
            expected,
            actual,
        }
    }

    /// Creates an `IndexOutOfBounds` error with clear context.
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// Creates a `DimensionMismatch` error with formatted shapes.
    pub fn dimension_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::DimensionMismatch {
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }
    }
}

/// Resolves a shape against a known element count.
///
/// At most one entry of `dim` may be the placeholder value `0`; it is
/// replaced by `total / product(other dims)`, which must divide evenly.
/// Without a placeholder the product of `dim` must equal `total` exactly.
///
/// # Examples
///
/// ```
/// use flatmat_matrix::complete_dim;
///
/// assert_eq!(complete_dim(&[2, 0], 6).unwrap(), vec![2, 3]);
/// assert_eq!(complete_dim(&[0], 5).unwrap(), vec![5]);
/// assert!(complete_dim(&[0, 0], 4).is_err());
/// assert!(complete_dim(&[2, 0], 5).is_err());
/// ```
pub fn complete_dim(dim: &[usize], total: usize) -> Result<Vec<usize>, MatrixError> {
    if dim.is_empty() {
        return Err(MatrixError::EmptyShape);
    }

    let placeholders = dim.iter().filter(|&&d| d == 0).count();
    if placeholders > 1 {
        return Err(MatrixError::AmbiguousPlaceholder(dim.to_vec()));
    }

    if placeholders == 0 {
        let expected: usize = dim.iter().product();
        if expected != total {
            return Err(MatrixError::invalid_shape(dim, expected, total));
        }
        return Ok(dim.to_vec());
    }

    let known: usize = dim.iter().filter(|&&d| d != 0).product();
    if total % known != 0 {
        return Err(MatrixError::IndivisiblePlaceholder {
            dim: dim.to_vec(),
            total,
            known,
        });
    }
    let resolved = total / known;
    Ok(dim
        .iter()
        .map(|&d| if d == 0 { resolved } else { d })
        .collect())
}

/// A dense matrix stored as a single flat, row-major buffer plus a shape
/// vector.
///
/// The shape may encode any number of logical dimensions, but every kernel
/// treats the matrix as `nrow` rows of `restdim` contiguous elements — the
/// 2-D view over the flat buffer. The only structural invariant is
/// `data.len() == dim.iter().product()`.
///
/// Ownership is exclusive: a `FlatMatrix` owns its buffer, and `clone` is
/// the documented way to break aliasing. Kernels take read-only inputs by
/// `&` and outputs by `&mut`, so the borrow checker rules out input/output
/// aliasing statically.
///
/// # Examples
///
/// ```
/// use flatmat_matrix::FlatMatrix;
///
/// // Placeholder dimension inferred from the data length.
/// let m = FlatMatrix::from_dim_vec(&[2, 0], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(m.dim, vec![2, 3]);
/// assert_eq!(m.nrow(), 2);
/// assert_eq!(m.restdim(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct FlatMatrix<T> {
    /// The shape of the matrix, outermost dimension first.
    pub dim: Vec<usize>,
    /// The elements in row-major order.
    pub data: Vec<T>,
}

impl<T> FlatMatrix<T> {
    /// Number of logical dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.dim.len()
    }

    /// Number of rows (the outermost dimension).
    #[inline]
    pub fn nrow(&self) -> usize {
        self.dim[0]
    }

    /// Number of columns of the 2-D view: `dim[1]` for matrices with two or
    /// more dimensions, `1` for vectors.
    #[inline]
    pub fn ncol(&self) -> usize {
        if self.dim.len() >= 2 {
            self.dim[1]
        } else {
            1
        }
    }

    /// Row width in elements: the product of all dimensions but the first
    /// (`1` for vectors). This is the stride between consecutive rows.
    #[inline]
    pub fn restdim(&self) -> usize {
        if self.dim.len() < 2 {
            1
        } else {
            self.dim[1..].iter().product()
        }
    }

    /// Total number of elements.
    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the 2-D view is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrow() == self.restdim()
    }

    /// Row `i` of the 2-D view as a contiguous slice of `restdim` elements.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        let w = self.restdim();
        &self.data[i * w..(i + 1) * w]
    }

    /// Row `i` of the 2-D view as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        let w = self.restdim();
        &mut self.data[i * w..(i + 1) * w]
    }

    /// Returns an iterator over the elements in row-major order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Returns a mutable iterator over the elements in row-major order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Apply a function to each element, producing a new matrix of the same
    /// shape.
    pub fn map<U, F>(&self, f: F) -> FlatMatrix<U>
    where
        F: Fn(&T) -> U,
    {
        FlatMatrix {
            dim: self.dim.clone(),
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> FlatMatrix<T> {
    /// Creates a matrix from an explicit shape and data buffer.
    ///
    /// At most one entry of `dim` may be the `0` placeholder; it is
    /// resolved from the data length (see [`complete_dim`]).
    ///
    /// # Errors
    ///
    /// Fails when the resolved shape does not cover the data exactly, when
    /// more than one placeholder is given, or when the placeholder does not
    /// divide evenly.
    pub fn from_dim_vec(dim: &[usize], data: Vec<T>) -> Result<Self, MatrixError> {
        let dim = complete_dim(dim, data.len())?;
        Ok(Self { dim, data })
    }

    /// Creates a matrix of the given shape with every element set to
    /// `value`. The shape must be fully specified (no placeholder).
    pub fn from_dim_val(dim: &[usize], value: T) -> Result<Self, MatrixError> {
        if dim.is_empty() {
            return Err(MatrixError::EmptyShape);
        }
        let numel: usize = dim.iter().product();
        Ok(Self {
            dim: dim.to_vec(),
            data: vec![value; numel],
        })
    }

    /// Copies the given rows of the 2-D view into a new matrix.
    ///
    /// The output keeps the trailing dimensions of `self` and has
    /// `indices.len()` rows.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self, MatrixError> {
        let w = self.restdim();
        let nrow = self.nrow();
        let mut data = Vec::with_capacity(indices.len() * w);
        for &i in indices {
            if i >= nrow {
                return Err(MatrixError::index_out_of_bounds(i, nrow));
            }
            data.extend_from_slice(self.row(i));
        }
        let mut dim = self.dim.clone();
        dim[0] = indices.len();
        Ok(Self { dim, data })
    }

    /// Copies the given columns of the 2-D view into a new matrix.
    ///
    /// Column indices address the `restdim`-wide rows, so the result is
    /// always 2-D (`[nrow, indices.len()]`) regardless of how many logical
    /// dimensions `self` encodes.
    pub fn select_cols(&self, indices: &[usize]) -> Result<Self, MatrixError> {
        let w = self.restdim();
        for &j in indices {
            if j >= w {
                return Err(MatrixError::index_out_of_bounds(j, w));
            }
        }
        let nrow = self.nrow();
        let mut data = Vec::with_capacity(nrow * indices.len());
        for i in 0..nrow {
            let row = self.row(i);
            for &j in indices {
                data.push(row[j].clone());
            }
        }
        Ok(Self {
            dim: vec![nrow, indices.len()],
            data,
        })
    }

    /// Concatenates the rows of several matrices side by side.
    ///
    /// All parts must agree on every dimension but the last; a vector shape
    /// `[n]` is treated as `[n, 1]` for this check. The result keeps the
    /// common leading dimensions and sums the last ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatmat_matrix::FlatMatrix;
    ///
    /// let a = FlatMatrix::from_dim_vec(&[2, 2], vec![1.0, 2.0, 5.0, 6.0]).unwrap();
    /// let b = FlatMatrix::from_dim_vec(&[2], vec![9.0, 10.0]).unwrap();
    /// let c = FlatMatrix::concat_cols(&[&a, &b]).unwrap();
    /// assert_eq!(c.dim, vec![2, 3]);
    /// assert_eq!(c.data, vec![1.0, 2.0, 9.0, 5.0, 6.0, 10.0]);
    /// ```
    pub fn concat_cols(parts: &[&FlatMatrix<T>]) -> Result<FlatMatrix<T>, MatrixError> {
        let first = parts.first().ok_or(MatrixError::EmptyShape)?;
        let lead = leading_dims(&first.dim);
        let mut widths = Vec::with_capacity(parts.len());
        for p in parts {
            if leading_dims(&p.dim) != lead {
                return Err(MatrixError::dimension_mismatch(lead, &p.dim));
            }
            widths.push(last_width(&p.dim));
        }

        let outer: usize = lead.iter().product();
        let total_w: usize = widths.iter().sum();
        let mut data = Vec::with_capacity(outer * total_w);
        for o in 0..outer {
            for (p, &w) in parts.iter().zip(&widths) {
                data.extend_from_slice(&p.data[o * w..(o + 1) * w]);
            }
        }

        let mut dim = lead.to_vec();
        dim.push(total_w);
        Ok(FlatMatrix { dim, data })
    }
}

/// All dimensions but the last, with `[n]` read as `[n, 1]`.
fn leading_dims(dim: &[usize]) -> &[usize] {
    if dim.len() <= 1 {
        dim
    } else {
        &dim[..dim.len() - 1]
    }
}

/// The last dimension, with `[n]` read as `[n, 1]`.
fn last_width(dim: &[usize]) -> usize {
    if dim.len() <= 1 {
        1
    } else {
        dim[dim.len() - 1]
    }
}

impl<T: Float> FlatMatrix<T> {
    /// Creates an uninitialized (NaN-filled) scratch matrix of the given
    /// shape. The shape must be fully specified (no placeholder).
    pub fn from_dim(dim: &[usize]) -> Result<Self, MatrixError> {
        Self::from_dim_val(dim, T::nan())
    }

    /// Creates a zero-filled matrix of the given shape.
    pub fn zeros(dim: &[usize]) -> Result<Self, MatrixError> {
        Self::from_dim_val(dim, T::zero())
    }

    /// Creates the `n`×`n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut data = vec![T::zero(); n * n];
        for i in 0..n {
            data[i * n + i] = T::one();
        }
        Self {
            dim: vec![n, n],
            data,
        }
    }

    /// Creates a square diagonal matrix from the given diagonal entries.
    pub fn from_diag(diag: &[T]) -> Self {
        let n = diag.len();
        let mut data = vec![T::zero(); n * n];
        for (i, &d) in diag.iter().enumerate() {
            data[i * n + i] = d;
        }
        Self {
            dim: vec![n, n],
            data,
        }
    }

    /// Creates a matrix of the given shape, calling `f(row, col)` over the
    /// 2-D view (`nrow` rows of `restdim` columns) to generate the data.
    pub fn from_dim_fn<F>(dim: &[usize], f: F) -> Result<Self, MatrixError>
    where
        F: Fn(usize, usize) -> T,
    {
        let mut out = Self::from_dim(dim)?;
        for i in 0..out.nrow() {
            for (j, v) in out.row_mut(i).iter_mut().enumerate() {
                *v = f(i, j);
            }
        }
        Ok(out)
    }

    /// Resizes the matrix in place.
    ///
    /// The buffer is reallocated (and NaN-filled) only when the element
    /// count changes; a same-count reshape just replaces the shape vector,
    /// and an identical shape is a no-op. Repeated kernel calls with stable
    /// shapes therefore never allocate.
    pub fn set_dim(&mut self, dim: &[usize]) {
        debug_assert!(!dim.is_empty(), "set_dim: empty shape");
        if self.dim == dim {
            return;
        }
        let numel: usize = dim.iter().product();
        if numel != self.data.len() {
            self.data.clear();
            self.data.resize(numel, T::nan());
        }
        self.dim.clear();
        self.dim.extend_from_slice(dim);
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) {
        for v in self.data.iter_mut() {
            *v = value;
        }
    }

    /// Sets every element to NaN, the failure sentinel of the kernels.
    pub fn fill_nan(&mut self) {
        self.fill(T::nan());
    }

    /// Returns true if any element is NaN.
    ///
    /// This is the production probe for "computation not applicable"
    /// results; it is distinct from the NaN-equals-NaN convention of
    /// [`PartialEq`], which exists for test reproducibility.
    pub fn has_nan(&self) -> bool {
        self.data.iter().any(|v| v.is_nan())
    }
}

/// Exact comparison: shapes must match and elements must match bit-for-bit
/// in value, with NaN considered equal to NaN so reproducibility tests can
/// compare failure outputs.
impl<T: Float> PartialEq for FlatMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dim == other.dim
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }
}

impl<T> approx::AbsDiffEq for FlatMatrix<T>
where
    T: Float + approx::AbsDiffEq<Epsilon = T>,
{
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.dim == other.dim
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| T::abs_diff_eq(a, b, epsilon))
    }
}

impl<T> approx::RelativeEq for FlatMatrix<T>
where
    T: Float + approx::RelativeEq + approx::AbsDiffEq<Epsilon = T>,
{
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.dim == other.dim
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| T::relative_eq(a, b, epsilon, max_relative))
    }
}

impl<T: std::fmt::Display> std::fmt::Display for FlatMatrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let w = self.restdim();
        for i in 0..self.nrow() {
            write!(f, "[")?;
            for (j, v) in self.data[i * w..(i + 1) * w].iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
