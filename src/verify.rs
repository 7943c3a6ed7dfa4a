//! Проверка результата по аналитической формуле
//!
//! Для инициализации A[i][j] = i, B[i][j] = j + 2 множитель B[k][j] не
//! зависит от k, поэтому Σ_k A[i][k] * B[k][j] = Σ_k i * (j + 2) = i * (j + 2) * N.

use crate::matrix::Matrix;
use tracing::{debug, warn};

/// Формула ожидаемого значения C[i][j] для [`MatrixType::Indexed`](crate::MatrixType::Indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oracle {
    /// `i * (j + 2) * N` - точная сумма
    ClosedForm,
    /// `i * N(N+3)/2` = Σ_k i * (k + 2).
    ///
    /// Верна только для B[k][j] = k + 2, то есть не для этой инициализации:
    /// совпадает с результатом лишь в строке i = 0.
    KIndexedSum,
}

impl Oracle {
    /// Ожидаемое значение элемента (i, j) матрицы размера `size`
    pub fn expected(self, size: usize, i: usize, j: usize) -> i64 {
        let (n, i, j) = (size as i64, i as i64, j as i64);
        match self {
            Oracle::ClosedForm => i * (j + 2) * n,
            Oracle::KIndexedSum => i * (n * (n + 3) / 2),
        }
    }
}

/// Итог проверки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Success,
    /// Первый несовпавший элемент в порядке row-major
    Mismatch { row: usize, col: usize, expected: i64, actual: i64 },
}

impl Verification {
    pub fn is_success(&self) -> bool {
        matches!(self, Verification::Success)
    }
}

/// Полный проход по C построчно; останавливается на первом несовпадении
pub fn verify(c: &Matrix, oracle: Oracle) -> Verification {
    let size = c.size();
    for ((row, col), &value) in c.indexed_iter() {
        let expected = oracle.expected(size, row, col);
        let actual = i64::from(value);
        if actual != expected {
            warn!(row, col, expected, actual, ?oracle, "verification mismatch");
            return Verification::Mismatch {
                row,
                col,
                expected,
                actual,
            };
        }
    }
    debug!(size, ?oracle, "verification passed");
    Verification::Success
}
