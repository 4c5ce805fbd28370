/// Reads the SLAE task from whitespace-delimited text files. The matrix file
/// starts with a header `n m` (dimension and outer band offset) followed by
/// five blocks of `n` numbers each: main diagonal d, lower bands l1 and l2,
/// upper bands u1 and u2. A vector file is just a list of numeric literals.
/// Dimension consistency between matrix and vectors is checked by the solver
/// entry points, not here.
use crate::somelinalg::SolverError;
use crate::somelinalg::banded::BandedMatrix;
use nalgebra::DVector;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskParserError {
    #[error("failed to read task file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse '{token}' as a number")]
    BadNumber { token: String },
    #[error("file ended early: expected {expected} values, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error(transparent)]
    BadMatrix(#[from] SolverError),
}

fn parse_numbers(tokens: &[&str]) -> Result<Vec<f64>, TaskParserError> {
    tokens
        .iter()
        .map(|token| {
            token.parse::<f64>().map_err(|_| TaskParserError::BadNumber {
                token: token.to_string(),
            })
        })
        .collect()
}

/// read the banded matrix: header `n m`, then bands d, l1, l2, u1, u2
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<BandedMatrix, TaskParserError> {
    let content = fs::read_to_string(path)?;
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(TaskParserError::Truncated {
            expected: 2,
            found: tokens.len(),
        });
    }
    let n = tokens[0]
        .parse::<usize>()
        .map_err(|_| TaskParserError::BadNumber {
            token: tokens[0].to_string(),
        })?;
    let m = tokens[1]
        .parse::<usize>()
        .map_err(|_| TaskParserError::BadNumber {
            token: tokens[1].to_string(),
        })?;
    if n == 0 {
        return Err(TaskParserError::BadMatrix(SolverError::DimensionMismatch(
            "matrix dimension n = 0".to_string(),
        )));
    }
    let expected = 2 + 5 * n;
    if tokens.len() < expected {
        return Err(TaskParserError::Truncated {
            expected,
            found: tokens.len(),
        });
    }
    let mut bands = tokens[2..expected]
        .chunks(n)
        .map(|chunk| parse_numbers(chunk).map(DVector::from_vec))
        .collect::<Result<Vec<_>, _>>()?;
    let u2 = bands.pop().unwrap();
    let u1 = bands.pop().unwrap();
    let l2 = bands.pop().unwrap();
    let l1 = bands.pop().unwrap();
    let d = bands.pop().unwrap();
    Ok(BandedMatrix::new(m, d, l1, l2, u1, u2)?)
}

/// read a vector (right-hand side or initial guess) from a text file
pub fn read_vector<P: AsRef<Path>>(path: P) -> Result<DVector<f64>, TaskParserError> {
    let content = fs::read_to_string(path)?;
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(TaskParserError::Truncated {
            expected: 1,
            found: 0,
        });
    }
    Ok(DVector::from_vec(parse_numbers(&tokens)?))
}
