use crate::somelinalg::SolverError;
use enum_dispatch::enum_dispatch;
use nalgebra::{DMatrix, DVector};

/// Structural representation of a banded matrix: main diagonal `d`, bands
/// `l1`/`u1` on the first sub/super diagonal and `l2`/`u2` at offset `m`
/// (for a tridiagonal matrix the outer bands are zero). All five vectors
/// have length `n`; entries that fall outside the matrix are never read.
/// Lengths are validated once at construction, the matrix is immutable
/// during the solve.
#[derive(Debug, Clone, PartialEq)]
pub struct BandedMatrix {
    n: usize,
    m: usize,
    d: DVector<f64>,
    l1: DVector<f64>,
    l2: DVector<f64>,
    u1: DVector<f64>,
    u2: DVector<f64>,
}

impl BandedMatrix {
    /// `m` is the offset of the outer bands `l2`/`u2` from the main diagonal,
    /// must be at least 2 (offset 1 is taken by `l1`/`u1`). With `m = 2` the
    /// five bands are the classic pentadiagonal layout.
    pub fn new(
        m: usize,
        d: DVector<f64>,
        l1: DVector<f64>,
        l2: DVector<f64>,
        u1: DVector<f64>,
        u2: DVector<f64>,
    ) -> Result<BandedMatrix, SolverError> {
        let n = d.len();
        if n == 0 {
            return Err(SolverError::DimensionMismatch(
                "main diagonal is empty".to_string(),
            ));
        }
        if m < 2 {
            return Err(SolverError::DimensionMismatch(format!(
                "outer band offset m = {} but must be >= 2",
                m
            )));
        }
        for (name, band) in [("l1", &l1), ("l2", &l2), ("u1", &u1), ("u2", &u2)] {
            if band.len() != n {
                return Err(SolverError::DimensionMismatch(format!(
                    "band {} has length {} while main diagonal has length {}",
                    name,
                    band.len(),
                    n
                )));
            }
        }
        Ok(BandedMatrix { n, m, d, l1, l2, u1, u2 })
    }

    /// tridiagonal matrix: outer bands are zero, offset m = 2
    pub fn tridiagonal(
        d: DVector<f64>,
        l1: DVector<f64>,
        u1: DVector<f64>,
    ) -> Result<BandedMatrix, SolverError> {
        let n = d.len();
        let zeros = DVector::zeros(n);
        BandedMatrix::new(2, d, l1, zeros.clone(), u1, zeros)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn band_offset(&self) -> usize {
        self.m
    }

    /// assemble the full dense matrix - used for diagnostics and for
    /// reference solutions in tests, not in the iteration hot loop
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut a = DMatrix::zeros(self.n, self.n);
        for i in 0..self.n {
            a[(i, i)] = self.d[i];
            if i >= 1 {
                a[(i, i - 1)] = self.l1[i];
            }
            if i >= self.m {
                a[(i, i - self.m)] = self.l2[i];
            }
            if i + 1 < self.n {
                a[(i, i + 1)] = self.u1[i];
            }
            if i + self.m < self.n {
                a[(i, i + self.m)] = self.u2[i];
            }
        }
        a
    }
}

/// One matrix-vector operation interface with two backing representations,
/// banded and dense. Stationary solvers are generic over this trait so the
/// same sweep drives both.
#[enum_dispatch]
pub trait MatVec {
    /// dot product of row `i` with `vec`. Precondition: `i < nrows()`,
    /// `vec.len() == nrows()`.
    fn row_mul(&self, vec: &DVector<f64>, i: usize) -> f64;
    /// main diagonal entry of row `i`
    fn diag(&self, i: usize) -> f64;
    fn nrows(&self) -> usize;
    /// full product `A * vec` written into `out`
    fn mul_to(&self, vec: &DVector<f64>, out: &mut DVector<f64>) {
        for i in 0..self.nrows() {
            out[i] = self.row_mul(vec, i);
        }
    }
}

impl MatVec for BandedMatrix {
    fn row_mul(&self, vec: &DVector<f64>, i: usize) -> f64 {
        let mut sum = self.d[i] * vec[i];
        if i >= 1 {
            sum += self.l1[i] * vec[i - 1];
        }
        if i >= self.m {
            sum += self.l2[i] * vec[i - self.m];
        }
        if i + 1 < self.n {
            sum += self.u1[i] * vec[i + 1];
        }
        if i + self.m < self.n {
            sum += self.u2[i] * vec[i + self.m];
        }
        sum
    }

    fn diag(&self, i: usize) -> f64 {
        self.d[i]
    }

    fn nrows(&self) -> usize {
        self.n
    }
}

impl MatVec for DMatrix<f64> {
    fn row_mul(&self, vec: &DVector<f64>, i: usize) -> f64 {
        self.row(i).transpose().dot(vec)
    }

    fn diag(&self, i: usize) -> f64 {
        self[(i, i)]
    }

    fn nrows(&self) -> usize {
        self.shape().0
    }
}

/// system matrix selected by variant tag
#[enum_dispatch(MatVec)]
#[derive(Debug, Clone, PartialEq)]
pub enum SystemMatrix {
    Banded(BandedMatrix),
    Dense(DMatrix<f64>),
}

/// residual r = f - A*x computed row by row through the banded structure
pub fn residual<M: MatVec>(m: &M, f: &DVector<f64>, x: &DVector<f64>) -> DVector<f64> {
    DVector::from_fn(f.len(), |i, _| f[i] - m.row_mul(x, i))
}

#[cfg(test)]
mod banded_tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_matrix(m: usize) -> BandedMatrix {
        let n = 6;
        let d = DVector::from_fn(n, |i, _| 10.0 + i as f64);
        let l1 = DVector::from_fn(n, |i, _| if i >= 1 { -1.0 } else { 0.0 });
        let l2 = DVector::from_fn(n, |i, _| if i >= m { 0.5 } else { 0.0 });
        let u1 = DVector::from_fn(n, |i, _| if i + 1 < n { 2.0 } else { 0.0 });
        let u2 = DVector::from_fn(n, |i, _| if i + m < n { -0.25 } else { 0.0 });
        BandedMatrix::new(m, d, l1, l2, u1, u2).unwrap()
    }

    #[test]
    fn row_mul_matches_dense_product() {
        for m in [2, 3] {
            let banded = sample_matrix(m);
            let dense = banded.to_dense();
            let x = DVector::from_fn(banded.n(), |i, _| (i as f64 + 1.0) * 0.3);
            let full = &dense * &x;
            for i in 0..banded.n() {
                assert_relative_eq!(banded.row_mul(&x, i), full[i], epsilon = 1e-14);
                assert_relative_eq!(dense.row_mul(&x, i), full[i], epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn mul_to_matches_dense_product() {
        let banded = sample_matrix(2);
        let dense = banded.to_dense();
        let x = DVector::from_fn(banded.n(), |i, _| 1.0 - 0.1 * i as f64);
        let mut out = DVector::zeros(banded.n());
        banded.mul_to(&x, &mut out);
        assert_relative_eq!((out - &dense * &x).norm(), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn construction_rejects_wrong_band_length() {
        let d = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let short = DVector::from_vec(vec![0.0, 1.0]);
        let zeros = DVector::zeros(3);
        let err = BandedMatrix::new(2, d, short, zeros.clone(), zeros.clone(), zeros).unwrap_err();
        assert!(matches!(err, SolverError::DimensionMismatch(_)));
    }

    #[test]
    fn construction_rejects_band_offset_below_two() {
        let d = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let zeros = DVector::zeros(3);
        let err = BandedMatrix::new(
            1,
            d,
            zeros.clone(),
            zeros.clone(),
            zeros.clone(),
            zeros,
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::DimensionMismatch(_)));
    }

    #[test]
    fn residual_is_zero_at_exact_solution() {
        let banded = sample_matrix(2);
        let x = DVector::from_fn(banded.n(), |i, _| (i as f64).sin() + 2.0);
        let f = &banded.to_dense() * &x;
        let r = residual(&banded, &f, &x);
        assert_relative_eq!(r.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn system_matrix_variants_agree() {
        let banded = sample_matrix(3);
        let dense = banded.to_dense();
        let x = DVector::from_fn(banded.n(), |i, _| 0.7 * i as f64 - 1.0);
        let by_band = SystemMatrix::Banded(banded);
        let by_dense = SystemMatrix::Dense(dense);
        for i in 0..by_band.nrows() {
            assert_relative_eq!(
                by_band.row_mul(&x, i),
                by_dense.row_mul(&x, i),
                epsilon = 1e-13
            );
            assert_relative_eq!(by_band.diag(i), by_dense.diag(i), epsilon = 1e-14);
        }
    }
}
