//! Операции над матрицами

use super::types::{Element, Matrix, MatrixType};
use crate::backend::MatmulKernel;
use crate::error::{MatmulError, Result};
use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Инициализирует матрицы A и B заданного типа и размера
pub fn initialize_matrices(matrix_type: MatrixType, size: usize) -> Result<(Matrix, Matrix)> {
    match matrix_type {
        MatrixType::Indexed => {
            let a = Matrix::from_fn(size, |i, _| i as Element)?;
            let b = Matrix::from_fn(size, |_, j| j as Element + 2)?;
            Ok((a, b))
        }
        MatrixType::Random { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            let a = Matrix::from_fn(size, |_, _| rng.gen_range(-16..16))?;
            let b = Matrix::from_fn(size, |_, _| rng.gen_range(-16..16))?;
            Ok((a, b))
        }
    }
}

/// Проверяет, что A, B и C одного размера, и возвращает этот размер
pub fn check_operands(a: &Matrix, b: &Matrix, c: &Matrix) -> Result<usize> {
    let size = a.size();
    if b.size() != size || c.size() != size {
        return Err(MatmulError::DimensionMismatch {
            a: size,
            b: b.size(),
            c: c.size(),
        });
    }
    Ok(size)
}

/// Скалярное произведение строки `i` матрицы A на столбец `j` матрицы B.
///
/// Арифметика 32-битная с переполнением по модулю 2^32, одинаковая для всех ядер.
#[inline]
pub(crate) fn dot_cell(
    a: ArrayView2<'_, Element>,
    b: ArrayView2<'_, Element>,
    i: usize,
    j: usize,
) -> Element {
    let row = a.row(i);
    let col = b.column(j);
    row.iter()
        .zip(col.iter())
        .fold(0, |acc: Element, (&x, &y)| acc.wrapping_add(x.wrapping_mul(y)))
}

/// CPU реализация матричного умножения: последовательный тройной цикл
pub fn cpu_matrix_multiply(a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
    let size = check_operands(a, b, c)?;
    debug!(size, "cpu matmul start");

    let (a, b) = (a.view(), b.view());
    let mut out = c.view_mut();
    for i in 0..size {
        for j in 0..size {
            let mut sum: Element = 0;
            for k in 0..size {
                sum = sum.wrapping_add(a[[i, k]].wrapping_mul(b[[k, j]]));
            }
            out[[i, j]] = sum;
        }
    }
    Ok(())
}

/// Эталонное однопоточное ядро
#[derive(Debug, Clone, Default)]
pub struct CpuKernel;

impl MatmulKernel for CpuKernel {
    fn name(&self) -> &str {
        "cpu"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
        cpu_matrix_multiply(a, b, c)
    }
}

/// Итог поэлементного сравнения двух результатов
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub diff_count: usize,
    pub max_diff: u64,
    pub first_diff: Option<(usize, usize)>,
}

impl Comparison {
    pub fn matches(&self) -> bool {
        self.diff_count == 0
    }
}

/// Сравнивает результаты ускорителя и CPU
pub fn compare_results(expected: &Matrix, actual: &Matrix) -> Result<Comparison> {
    if expected.size() != actual.size() {
        return Err(MatmulError::BufferSize {
            size: expected.size(),
            expected: expected.len(),
            got: actual.len(),
        });
    }

    let mut report = Comparison {
        diff_count: 0,
        max_diff: 0,
        first_diff: None,
    };
    for ((idx, &e), &g) in expected.indexed_iter().zip(actual.iter()) {
        if e != g {
            let diff = (i64::from(e) - i64::from(g)).unsigned_abs();
            report.diff_count += 1;
            report.max_diff = report.max_diff.max(diff);
            if report.first_diff.is_none() {
                report.first_diff = Some(idx);
            }
        }
    }
    debug!(
        diff_count = report.diff_count,
        max_diff = report.max_diff,
        "compared results"
    );
    Ok(report)
}

/// Левый верхний угол матрицы (не больше `n`×`n`) для вывода
pub fn format_corner(m: &Matrix, n: usize) -> String {
    let shown = n.min(m.size());
    let mut out = String::new();
    for i in 0..shown {
        for j in 0..shown {
            if let Some(v) = m.get(i, j) {
                out.push_str(&format!("{v} "));
            }
        }
        if shown < m.size() {
            out.push_str("...");
        }
        out.push('\n');
    }
    if shown < m.size() {
        out.push_str("...\n");
    }
    out
}
