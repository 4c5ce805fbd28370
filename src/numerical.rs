/// Newton method for a small nonlinear system F(x) = 0 of fixed dimension
/// ```
///  use RustedSLAE::numerical::newton::NewtonSolver;
///  use nalgebra::{Matrix2, Vector2};
///  // first define the residual function and its jacobian
///  let fun = |x: &Vector2<f64>| Vector2::new(x[0] * x[0] + x[1] * x[1] - 4.0, x[0] - x[1]);
///  let jac = |x: &Vector2<f64>| Matrix2::new(2.0 * x[0], 2.0 * x[1], 1.0, -1.0);
///  // solve starting from an initial guess
///  let mut solver = NewtonSolver::new(fun, jac, Vector2::new(1.5, 1.0), 1e-10, 100);
///  solver.main_loop().unwrap();
///  println!("result = {:?} \n", solver.get_result().unwrap());
/// ```
pub mod newton;
