use crate::somelinalg::SolverError;
use log::{error, info, warn};
use nalgebra::{Matrix2, Vector2};

/// dimension of the nonlinear system, fixed at compile time
pub const N: usize = 2;

/// Newton method for F(x) = 0 with x of length [`N`]. The residual function
/// and its jacobian are problem-specific pure functions supplied by the
/// caller; every iteration evaluates both at the current x and solves the
/// dense linear system `A * delta = -F` by LU, then updates `x + delta`.
/// Convergence is tested on the Euclidean norm of F.
pub struct NewtonSolver<F, J> {
    pub fun: F,           // residual function F(x)
    pub jac: J,           // jacobian of F at x
    pub initial_guess: Vector2<f64>,
    pub tolerance: f64,
    pub max_iterations: usize,

    max_error: f64,
    pub i: usize, // iteration counter
    pub result: Option<Vector2<f64>>,
}

impl<F, J> NewtonSolver<F, J>
where
    F: Fn(&Vector2<f64>) -> Vector2<f64>,
    J: Fn(&Vector2<f64>) -> Matrix2<f64>,
{
    pub fn new(
        fun: F,
        jac: J,
        initial_guess: Vector2<f64>,
        tolerance: f64,
        max_iterations: usize,
    ) -> NewtonSolver<F, J> {
        assert!(
            tolerance >= 0.0,
            "Tolerance should be a non-negative number."
        );
        assert!(
            max_iterations > 0,
            "Max iterations should be a positive number."
        );
        NewtonSolver {
            fun,
            jac,
            initial_guess,
            tolerance,
            max_iterations,
            max_error: 0.0,
            i: 0,
            result: None,
        }
    }

    /// one Newton step: evaluate F and the jacobian at x, solve the 2x2
    /// system for the correction and return the updated state
    pub fn iteration(&mut self, x: Vector2<f64>) -> Result<Vector2<f64>, SolverError> {
        let f_value = (self.fun)(&x);
        let a = (self.jac)(&x);
        let delta = a
            .lu()
            .solve(&(-f_value))
            .ok_or(SolverError::SingularJacobian)?;
        Ok(x + delta)
    }

    /// main function to solve the system of equations
    pub fn main_loop(&mut self) -> Result<(Vector2<f64>, usize, f64), SolverError> {
        let mut x = self.initial_guess;
        let mut fnorm = (self.fun)(&x).norm();
        self.max_error = fnorm;
        while self.i < self.max_iterations {
            if fnorm < self.tolerance {
                self.result = Some(x);
                return Ok((x, self.i, fnorm));
            }
            x = self.iteration(x)?;
            self.i += 1;
            fnorm = (self.fun)(&x).norm();
            if fnorm > self.max_error && self.i > 1 {
                warn!("Error is increasing");
            }
            self.max_error = fnorm;
            info!("iteration = {}, ||F|| = {:.3e}", self.i, fnorm);
        }
        if fnorm < self.tolerance {
            self.result = Some(x);
            return Ok((x, self.i, fnorm));
        }
        error!("Maximum number of iterations reached. No solution found.");
        Err(SolverError::NotConverged {
            iterations: self.i,
            residual: fnorm,
        })
    }

    pub fn get_result(&self) -> Option<Vector2<f64>> {
        self.result
    }
}
