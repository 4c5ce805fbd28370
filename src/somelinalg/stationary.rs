use crate::somelinalg::SolverError;
use crate::somelinalg::banded::{MatVec, SystemMatrix, residual};
use log::{debug, error, info};
use nalgebra::DVector;
use simplelog::LevelFilter;
use simplelog::*;
use strum_macros::Display;

/// default iteration cap of the solvers
pub const MAX_ITERATIONS: usize = 50_000;
/// default convergence tolerance on the Euclidean residual norm
pub const TOLERANCE: f64 = 1e-10;

/// Explicit configuration of a stationary solve. The residual norm is
/// Euclidean, the same norm is used for the convergence test and for the
/// reported residual, so `tolerance` always means ||f - A*x||_2.
#[derive(Debug, Clone, PartialEq)]
pub struct IterParams {
    pub max_iterations: usize,
    pub tolerance: f64,
    /// relaxation factor w; w = 1 is the classic un-relaxed iteration,
    /// w < 1 damps the update, w > 1 accelerates it
    pub relaxation: f64,
}

impl Default for IterParams {
    fn default() -> Self {
        IterParams {
            max_iterations: MAX_ITERATIONS,
            tolerance: TOLERANCE,
            relaxation: 1.0,
        }
    }
}

fn check_task<M: MatVec>(
    m: &M,
    f: &DVector<f64>,
    x0: &DVector<f64>,
) -> Result<usize, SolverError> {
    let n = m.nrows();
    if f.len() != n {
        return Err(SolverError::DimensionMismatch(format!(
            "rhs has length {} while matrix has {} rows",
            f.len(),
            n
        )));
    }
    if x0.len() != n {
        return Err(SolverError::DimensionMismatch(format!(
            "initial guess has length {} while matrix has {} rows",
            x0.len(),
            n
        )));
    }
    // the update divides by the diagonal, so a zero entry is detected here
    // once instead of producing NaN/Inf inside the sweep
    for i in 0..n {
        if m.diag(i) == 0.0 {
            return Err(SolverError::SingularDiagonal { row: i });
        }
    }
    Ok(n)
}

/// Jacobi iteration with relaxation: every sweep computes the next iterate
/// from the previous one, `x1[i] = x0[i] + w * (f[i] - (A*x0)[i]) / d[i]`,
/// then the buffers are swapped.
///
/// Returns `(x, iterations, residual_norm)` on convergence,
/// `SolverError::NotConverged` when `max_iterations` sweeps are not enough.
pub fn jacobi<M: MatVec>(
    m: &M,
    f: &DVector<f64>,
    x0: &DVector<f64>,
    params: &IterParams,
) -> Result<(DVector<f64>, usize, f64), SolverError> {
    let n = check_task(m, f, x0)?;
    let w = params.relaxation;
    let mut x0 = x0.clone();
    let mut x1 = DVector::zeros(n);
    let mut rnorm = f64::INFINITY;
    for iteration in 1..=params.max_iterations {
        for i in 0..n {
            x1[i] = x0[i] + w * (f[i] - m.row_mul(&x0, i)) / m.diag(i);
        }
        rnorm = residual(m, f, &x1).norm();
        debug!("Jacobi iteration = {}, residual norm = {:.3e}", iteration, rnorm);
        if rnorm < params.tolerance {
            info!(
                "Jacobi converged in {} iterations, residual norm = {:.3e}",
                iteration, rnorm
            );
            return Ok((x1, iteration, rnorm));
        }
        std::mem::swap(&mut x0, &mut x1);
    }
    error!(
        "Jacobi: no convergence after {} iterations, residual norm = {:.3e}",
        params.max_iterations, rnorm
    );
    Err(SolverError::NotConverged {
        iterations: params.max_iterations,
        residual: rnorm,
    })
}

/// Zeidel (Gauss-Seidel) iteration with relaxation: a single buffer is
/// updated in place sweeping i = 0..n, so entries below `i` are already the
/// new values while entries above are still the old ones. Typically
/// converges in fewer sweeps than Jacobi on the same system.
///
/// Same convergence and failure contract as [`jacobi`].
pub fn zeidel<M: MatVec>(
    m: &M,
    f: &DVector<f64>,
    x0: &DVector<f64>,
    params: &IterParams,
) -> Result<(DVector<f64>, usize, f64), SolverError> {
    let n = check_task(m, f, x0)?;
    let w = params.relaxation;
    let mut x = x0.clone();
    let mut rnorm = f64::INFINITY;
    for iteration in 1..=params.max_iterations {
        for i in 0..n {
            let update = w * (f[i] - m.row_mul(&x, i)) / m.diag(i);
            x[i] += update;
        }
        rnorm = residual(m, f, &x).norm();
        debug!("Zeidel iteration = {}, residual norm = {:.3e}", iteration, rnorm);
        if rnorm < params.tolerance {
            info!(
                "Zeidel converged in {} iterations, residual norm = {:.3e}",
                iteration, rnorm
            );
            return Ok((x, iteration, rnorm));
        }
    }
    error!(
        "Zeidel: no convergence after {} iterations, residual norm = {:.3e}",
        params.max_iterations, rnorm
    );
    Err(SolverError::NotConverged {
        iterations: params.max_iterations,
        residual: rnorm,
    })
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum SolverMethod {
    Jacobi,
    Zeidel,
}

/// Driver for a banded SLAE task: holds the matrix, the right-hand side,
/// the initial guess and the solver settings, runs the chosen stationary
/// method and keeps the result with its iteration count and residual.
pub struct SLAE {
    pub matrix: SystemMatrix,
    pub rhs: DVector<f64>,
    pub initial_guess: DVector<f64>,
    pub method: SolverMethod,
    pub params: IterParams,
    pub loglevel: Option<String>,

    pub i: usize, // iteration counter of the last solve
    pub residual_norm: f64,
    pub result: Option<DVector<f64>>,
}

impl SLAE {
    pub fn new(matrix: SystemMatrix, rhs: DVector<f64>, initial_guess: DVector<f64>) -> SLAE {
        assert!(
            !rhs.is_empty(),
            "Right-hand side should not be empty."
        );
        assert!(
            !initial_guess.is_empty(),
            "Initial guess should not be empty."
        );
        SLAE {
            matrix,
            rhs,
            initial_guess,
            method: SolverMethod::Zeidel,
            params: IterParams::default(),
            loglevel: Some("info".to_string()),
            i: 0,
            residual_norm: f64::INFINITY,
            result: None,
        }
    }

    pub fn set_solver_params(
        &mut self,
        loglevel: Option<String>,
        method: Option<SolverMethod>,
        max_iterations: Option<usize>,
        tolerance: Option<f64>,
        relaxation: Option<f64>,
    ) {
        self.loglevel = if let Some(level) = loglevel {
            assert!(
                level == "debug"
                    || level == "info"
                    || level == "warn"
                    || level == "error"
                    || level == "off"
                    || level == "none",
                "loglevel must be debug/info, warn, error or off"
            );
            Some(level)
        } else {
            self.loglevel.clone()
        };
        if let Some(method) = method {
            self.method = method;
        }
        if let Some(max_iterations) = max_iterations {
            assert!(
                max_iterations > 0,
                "Max iterations should be a positive number."
            );
            self.params.max_iterations = max_iterations;
        }
        if let Some(tolerance) = tolerance {
            assert!(
                tolerance > 0.0,
                "Tolerance should be a positive number."
            );
            self.params.tolerance = tolerance;
        }
        if let Some(relaxation) = relaxation {
            assert!(
                relaxation > 0.0 && relaxation < 2.0,
                "Relaxation factor should be in (0, 2)."
            );
            self.params.relaxation = relaxation;
        }
    }

    /// run the selected stationary method on the stored task
    pub fn main_loop(&mut self) -> Result<DVector<f64>, SolverError> {
        info!(
            "solving SLAE of size {} with {} method, w = {}",
            self.matrix.nrows(),
            self.method,
            self.params.relaxation
        );
        let solved = match self.method {
            SolverMethod::Jacobi => jacobi(&self.matrix, &self.rhs, &self.initial_guess, &self.params),
            SolverMethod::Zeidel => zeidel(&self.matrix, &self.rhs, &self.initial_guess, &self.params),
        };
        match solved {
            Ok((x, iterations, rnorm)) => {
                self.i = iterations;
                self.residual_norm = rnorm;
                self.result = Some(x.clone());
                Ok(x)
            }
            Err(e) => {
                if let SolverError::NotConverged { iterations, residual } = &e {
                    self.i = *iterations;
                    self.residual_norm = *residual;
                }
                Err(e)
            }
        }
    }

    // wrapper around main_loop to implement logging
    pub fn solve(&mut self) -> Result<DVector<f64>, SolverError> {
        let is_logging_disabled = self
            .loglevel
            .as_ref()
            .map(|level| level == "off" || level == "none")
            .unwrap_or(false);

        if is_logging_disabled {
            self.main_loop()
        } else {
            let loglevel = self.loglevel.clone();
            let log_option = if let Some(level) = loglevel {
                match level.as_str() {
                    "debug" => LevelFilter::Debug,
                    "info" => LevelFilter::Info,
                    "warn" => LevelFilter::Warn,
                    "error" => LevelFilter::Error,
                    _ => panic!("loglevel must be debug, info, warn or error"),
                }
            } else {
                LevelFilter::Info
            };
            let logger_instance = CombinedLogger::init(vec![TermLogger::new(
                log_option,
                Config::default(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )]);

            match logger_instance {
                Ok(()) => {
                    let res = self.main_loop();
                    info!(" \n \n Program ended");
                    res
                }
                Err(_) => self.main_loop(),
            }
        }
    }

    pub fn get_result(&self) -> Option<DVector<f64>> {
        self.result.clone()
    }
}
