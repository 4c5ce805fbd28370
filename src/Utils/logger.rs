use nalgebra::DVector;
use std::fs::File;
use std::io::{self, Write};

/// save the solution vector together with the iteration count and the final
/// residual norm into a tab-separated text file
pub fn save_solution_to_file(
    x: &DVector<f64>,
    iterations: usize,
    residual_norm: f64,
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "iterations\t{}", iterations)?;
    writeln!(file, "residual_norm\t{:e}", residual_norm)?;
    writeln!(file, "x")?;
    for x_i in x.iter() {
        writeln!(file, "{}", x_i)?;
    }
    Ok(())
}

#[cfg(test)]
mod logger_tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn writes_solution_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("solution.txt");
        let x = DVector::from_vec(vec![0.25, 0.5]);
        save_solution_to_file(&x, 12, 3.5e-11, path.to_str().unwrap()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("iterations\t12"));
        assert!(content.contains("0.25"));
        assert!(content.contains("0.5"));
    }
}
