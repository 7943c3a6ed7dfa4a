//! Модуль для работы с матрицами
//!
//! Предоставляет:
//! - Плотное хранилище матриц
//! - Эталонное CPU умножение и сравнение результатов
//! - Ядра с выгрузкой на ускоритель (по ячейкам и по тайлам)

mod types;
pub mod operations;
pub mod kernels;

pub use types::{Element, Matrix, MatrixType};
pub use operations::{
    compare_results, cpu_matrix_multiply, format_corner, initialize_matrices, Comparison,
    CpuKernel,
};
pub use kernels::{NaiveOffload, TiledOffload};
