//! some linear algebra functions used throughout the code
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// banded matrix storage (main diagonal + two bands on each side) and
/// matrix-vector products for banded and dense representations
pub mod banded;
/// stationary iterative solvers: Jacobi and Zeidel (Gauss-Seidel) with relaxation
pub mod stationary;

use thiserror::Error;

/// error taxonomy of the solvers. Non-convergence is a checked error,
/// not a sentinel iteration count - caller must match on the result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("zero entry on the main diagonal at row {row}")]
    SingularDiagonal { row: usize },
    #[error("no convergence after {iterations} iterations, residual norm = {residual:.3e}")]
    NotConverged { iterations: usize, residual: f64 },
    #[error("jacobian is singular, linear step of Newton method failed")]
    SingularJacobian,
}
