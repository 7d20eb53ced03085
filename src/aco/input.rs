//! Row-by-row entry of an initial pheromone matrix.
//!
//! Each row must hold exactly `n` whitespace-separated, finite,
//! non-negative numbers. A bad row is reported and asked for again; the
//! diagonal is zeroed once all rows are in.

use std::io::{BufRead, Write};

use tracing::debug;

use super::matrix::{Matrix, PheromoneMatrix};
use crate::error::InputError;

/// Parses one row of `expected` pheromone values.
pub fn parse_pheromone_row(line: &str, expected: usize) -> Result<Vec<f64>, InputError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(InputError::WrongTokenCount {
            expected,
            found: tokens.len(),
        });
    }

    tokens
        .into_iter()
        .map(|token| {
            let value: f64 = token.parse().map_err(|_| InputError::InvalidNumber {
                token: token.to_string(),
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(InputError::NegativeValue {
                    token: token.to_string(),
                });
            }
            Ok(value)
        })
        .collect()
}

/// Prompts on `output` for `size` rows read from `input`.
///
/// Invalid rows print a message and are asked for again. Running out of
/// input is an error.
pub fn read_pheromone_matrix<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    size: usize,
) -> Result<PheromoneMatrix, InputError> {
    let example = example_row(size);
    let mut rows = Vec::with_capacity(size);

    for row in 0..size {
        loop {
            write!(
                output,
                "Enter Pheromone values for row {row} (e.g., '{example}'): "
            )?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(InputError::UnexpectedEof { row });
            }

            match parse_pheromone_row(&line, size) {
                Ok(values) => {
                    rows.push(values);
                    break;
                }
                Err(err) if err.is_retryable() => {
                    debug!(row, error = %err, "rejected pheromone row");
                    writeln!(
                        output,
                        "Invalid input. Please enter exactly {size} numbers separated by spaces."
                    )?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    Ok(PheromoneMatrix::new(Matrix::from_rows(&rows)?)?)
}

fn example_row(size: usize) -> String {
    const SAMPLE: [&str; 4] = ["0.0", "0.2", "0.1", "0.3"];
    (0..size)
        .map(|i| SAMPLE[i % SAMPLE.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_valid_row() {
        let row = parse_pheromone_row("0.0 0.2  0.1\t0.3\n", 4).unwrap();
        assert_eq!(row, vec![0.0, 0.2, 0.1, 0.3]);
    }

    #[test]
    fn test_parse_wrong_count() {
        let err = parse_pheromone_row("0.1 0.2", 4).unwrap_err();
        assert!(matches!(
            err,
            InputError::WrongTokenCount {
                expected: 4,
                found: 2
            }
        ));
    }

    #[test]
    fn test_parse_non_numeric() {
        let err = parse_pheromone_row("0.1 x 0.2 0.3", 4).unwrap_err();
        assert!(matches!(err, InputError::InvalidNumber { ref token } if token == "x"));
    }

    #[test]
    fn test_parse_rejects_negative_and_nan() {
        assert!(matches!(
            parse_pheromone_row("0.1 -0.2", 2),
            Err(InputError::NegativeValue { .. })
        ));
        assert!(matches!(
            parse_pheromone_row("NaN 0.2", 2),
            Err(InputError::NegativeValue { .. })
        ));
    }

    #[test]
    fn test_read_matrix_with_retry() {
        let text = "0 1\nbad row\n1 0\n";
        let mut input = Cursor::new(text.as_bytes());
        let mut output = Vec::new();

        let matrix = read_pheromone_matrix(&mut input, &mut output, 2).unwrap();
        assert_eq!(matrix.get(0, 1), 1.0);
        assert_eq!(matrix.get(1, 0), 1.0);

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("Invalid input").count(), 1);
        assert_eq!(printed.matches("row 1").count(), 2);
        assert!(printed.contains("(e.g., '0.0 0.2')"));
    }

    #[test]
    fn test_read_matrix_zeroes_diagonal() {
        let text = "5 0.2 0.1\n0.2 5 0.4\n0.1 0.4 5\n";
        let mut input = Cursor::new(text.as_bytes());
        let matrix = read_pheromone_matrix(&mut input, &mut Vec::new(), 3).unwrap();
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), 0.0);
        }
        assert_eq!(matrix.get(1, 2), 0.4);
    }

    #[test]
    fn test_read_matrix_eof() {
        let mut input = Cursor::new("0 1\n".as_bytes());
        let err = read_pheromone_matrix(&mut input, &mut Vec::new(), 2).unwrap_err();
        assert!(matches!(err, InputError::UnexpectedEof { row: 1 }));
    }
}
