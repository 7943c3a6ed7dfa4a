//! Типы матриц и связанные структуры

use crate::error::{MatmulError, Result};
use ndarray::{Array2, ArrayView2, ArrayViewMut2};

/// Тип элемента матрицы
pub type Element = i32;

/// Тип матриц для вычислений
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixType {
    /// A[i][j] = i, B[i][j] = j + 2; результат известен в замкнутой форме
    Indexed,
    /// Случайные небольшие целые числа с фиксированным зерном
    Random { seed: u64 },
}

/// Квадратная матрица N×N, хранящаяся построчно (row-major).
///
/// Индекс элемента (i, j) в плоском буфере равен `i * N + j`.
/// Все обращения проверяются на выход за границы.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    data: Array2<Element>,
}

impl Matrix {
    /// Нулевая матрица заданного размера
    pub fn zeros(size: usize) -> Result<Self> {
        Self::from_fn(size, |_, _| 0)
    }

    /// Заполняет матрицу построчно значениями `f(i, j)`.
    ///
    /// # Errors
    /// Возвращает [`MatmulError::Allocation`], если буфер не удалось выделить.
    pub fn from_fn<F>(size: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> Element,
    {
        let mut buf = allocate(size)?;
        for i in 0..size {
            for j in 0..size {
                buf.push(f(i, j));
            }
        }
        Ok(Self {
            data: Array2::from_shape_vec((size, size), buf)?,
        })
    }

    /// Оборачивает готовый плоский буфер длины `size * size`
    pub fn from_vec(size: usize, data: Vec<Element>) -> Result<Self> {
        let expected = size.checked_mul(size).ok_or(MatmulError::Allocation { size })?;
        if data.len() != expected {
            return Err(MatmulError::BufferSize {
                size,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data: Array2::from_shape_vec((size, size), data)?,
        })
    }

    /// Сторона матрицы N
    pub fn size(&self) -> usize {
        self.data.nrows()
    }

    /// Число элементов N*N
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<Element> {
        self.data.get((i, j)).copied()
    }

    /// Строка `i` как вектор
    pub fn row(&self, i: usize) -> Option<Vec<Element>> {
        (i < self.size()).then(|| self.data.row(i).to_vec())
    }

    /// Элементы в порядке row-major
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.data.iter()
    }

    /// Элементы вместе с индексами (i, j) в порядке row-major
    pub fn indexed_iter(&self) -> impl Iterator<Item = ((usize, usize), &Element)> {
        self.data.indexed_iter()
    }

    pub fn view(&self) -> ArrayView2<'_, Element> {
        self.data.view()
    }

    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, Element> {
        self.data.view_mut()
    }

    /// Копирует содержимое другой матрицы того же размера
    pub fn copy_from(&mut self, other: &Matrix) -> Result<()> {
        if self.size() != other.size() {
            return Err(MatmulError::BufferSize {
                size: self.size(),
                expected: self.len(),
                got: other.len(),
            });
        }
        self.data.assign(&other.data);
        Ok(())
    }

    /// Плоский row-major буфер
    pub fn to_vec(&self) -> Vec<Element> {
        self.data.iter().copied().collect()
    }
}

/// Резервирует буфер под N*N элементов, не прерывая процесс при нехватке памяти
fn allocate(size: usize) -> Result<Vec<Element>> {
    let len = size.checked_mul(size).ok_or(MatmulError::Allocation { size })?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| MatmulError::Allocation { size })?;
    Ok(buf)
}
