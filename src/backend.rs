//! Общий интерфейс ядер умножения матриц

use std::fmt::Debug;

use crate::error::Result;
use crate::matrix::Matrix;

/// Ядро умножения квадратных матриц: C = A @ B.
///
/// Реализации отличаются только способом исполнения (последовательно на CPU,
/// на ускорителе по ячейкам или по тайлам). Результат у всех побитово
/// одинаковый.
pub trait MatmulKernel: Send + Sync + Debug {
    /// Имя ядра для отчётов ("cpu", "offload-naive", ...)
    fn name(&self) -> &str;

    /// Записывает A @ B в `c`.
    ///
    /// Все три матрицы должны иметь одинаковый размер N. При ошибке `c`
    /// остаётся нетронутой.
    fn multiply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()>;
}
