//! Dense linear algebra for small systems.
//!
//! Sizes here are tiny (a few dozen parameters, a few hundred samples), so
//! a flat row-major `Vec<f64>` and textbook algorithms are plenty.

use crate::{OptimError, OptimResult};
use std::ops::{Index, IndexMut};

/// Row-major dense matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix by evaluating `f(row, col)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut m = Self::zeros(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                m[(r, c)] = f(r, c);
            }
        }
        m
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row slice.
    #[inline]
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// `Aᵀ A`, the Gram matrix (cols x cols).
    pub fn gram(&self) -> Matrix {
        self.weighted_gram(None)
    }

    /// `Aᵀ W A` with diagonal weights `w` (one per row).
    pub fn weighted_gram(&self, w: Option<&[f64]>) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.cols);
        for r in 0..self.rows {
            let wr = w.map_or(1.0, |w| w[r]);
            let row = self.row(r);
            for i in 0..self.cols {
                let ri = row[i] * wr;
                for j in i..self.cols {
                    out[(i, j)] += ri * row[j];
                }
            }
        }
        for i in 0..self.cols {
            for j in 0..i {
                out[(i, j)] = out[(j, i)];
            }
        }
        out
    }

    /// `Aᵀ v`.
    pub fn transpose_mul_vec(&self, v: &[f64]) -> OptimResult<Vec<f64>> {
        check_len(self.rows, v.len())?;
        let mut out = vec![0.0; self.cols];
        for (r, &vr) in v.iter().enumerate() {
            for (o, &a) in out.iter_mut().zip(self.row(r)) {
                *o += a * vr;
            }
        }
        Ok(out)
    }

    /// `A v`.
    pub fn mul_vec(&self, v: &[f64]) -> OptimResult<Vec<f64>> {
        check_len(self.cols, v.len())?;
        Ok((0..self.rows).map(|r| dot(self.row(r), v)).collect())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        &mut self.data[r * self.cols + c]
    }
}

#[inline]
fn check_len(expected: usize, found: usize) -> OptimResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(OptimError::DimensionMismatch { expected, found })
    }
}

/// Dot product of two equal-length slices.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean norm.
#[inline]
pub fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Solves the square system `A x = b` by Gaussian elimination with partial
/// pivoting.
///
/// # Errors
///
/// - [`OptimError::DimensionMismatch`] if `A` is not square or `b` has the
///   wrong length
/// - [`OptimError::Singular`] if a pivot vanishes
pub fn solve(a: &Matrix, b: &[f64]) -> OptimResult<Vec<f64>> {
    let n = a.rows();
    check_len(n, a.cols())?;
    check_len(n, b.len())?;

    let mut m = a.clone();
    let mut x = b.to_vec();
    let scale = m.data.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let tiny = scale * 1e-14;

    for k in 0..n {
        let pivot = (k..n)
            .max_by(|&i, &j| m[(i, k)].abs().total_cmp(&m[(j, k)].abs()))
            .unwrap_or(k);
        if m[(pivot, k)].abs() <= tiny || !m[(pivot, k)].is_finite() {
            return Err(OptimError::Singular);
        }
        if pivot != k {
            for c in 0..n {
                m.data.swap(k * n + c, pivot * n + c);
            }
            x.swap(k, pivot);
        }
        for i in k + 1..n {
            let f = m[(i, k)] / m[(k, k)];
            if f == 0.0 {
                continue;
            }
            for c in k..n {
                m[(i, c)] -= f * m[(k, c)];
            }
            x[i] -= f * x[k];
        }
    }

    for k in (0..n).rev() {
        let tail: f64 = (k + 1..n).map(|c| m[(k, c)] * x[c]).sum();
        x[k] = (x[k] - tail) / m[(k, k)];
    }
    Ok(x)
}

/// Solves `min |A x - b|²` by Householder QR.
///
/// # Errors
///
/// - [`OptimError::EmptyProblem`] for an empty matrix
/// - [`OptimError::Underdetermined`] if `A` has more columns than rows
/// - [`OptimError::Singular`] if `A` is rank deficient
///
/// # Example
///
/// ```rust
/// use cmap_optim::linalg::{Matrix, lstsq};
///
/// // Fit y = 1 + 2t through three exact points
/// let t: [f64; 3] = [0.0, 0.5, 1.0];
/// let a = Matrix::from_fn(3, 2, |r, c| t[r].powi(c as i32));
/// let x = lstsq(&a, &[1.0, 2.0, 3.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12 && (x[1] - 2.0).abs() < 1e-12);
/// ```
pub fn lstsq(a: &Matrix, b: &[f64]) -> OptimResult<Vec<f64>> {
    let (m, n) = (a.rows(), a.cols());
    if m == 0 || n == 0 {
        return Err(OptimError::EmptyProblem);
    }
    if m < n {
        return Err(OptimError::Underdetermined { residuals: m, params: n });
    }
    check_len(m, b.len())?;

    let mut r = a.clone();
    let mut qtb = b.to_vec();
    let scale = r.data.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));

    for k in 0..n {
        // Householder vector for column k below the diagonal
        let alpha_norm = (k..m).map(|i| r[(i, k)] * r[(i, k)]).sum::<f64>().sqrt();
        if alpha_norm <= scale * 1e-13 {
            return Err(OptimError::Singular);
        }
        let alpha = if r[(k, k)] > 0.0 { -alpha_norm } else { alpha_norm };
        let mut v: Vec<f64> = (k..m).map(|i| r[(i, k)]).collect();
        v[0] -= alpha;
        let v_norm2 = dot(&v, &v);
        if v_norm2 == 0.0 {
            continue;
        }

        for c in k..n {
            let s = (k..m).map(|i| v[i - k] * r[(i, c)]).sum::<f64>() * 2.0 / v_norm2;
            for i in k..m {
                r[(i, c)] -= s * v[i - k];
            }
        }
        let s = (k..m).map(|i| v[i - k] * qtb[i]).sum::<f64>() * 2.0 / v_norm2;
        for i in k..m {
            qtb[i] -= s * v[i - k];
        }
    }

    // Back substitution on the upper triangle
    let mut x = vec![0.0; n];
    for k in (0..n).rev() {
        let tail: f64 = (k + 1..n).map(|c| r[(k, c)] * x[c]).sum();
        x[k] = (qtb[k] - tail) / r[(k, k)];
    }
    Ok(x)
}
