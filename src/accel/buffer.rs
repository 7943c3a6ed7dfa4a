//! Буферы в памяти устройства

use crate::matrix::{Element, Matrix};
use ndarray::{ArrayView2, ArrayViewMut2};

/// Матрица, принадлежащая устройству.
///
/// Создаётся только через [`Device::copy_in`](super::Device::copy_in) или
/// [`Device::alloc`](super::Device::alloc); хост видит содержимое лишь после
/// [`Device::copy_out`](super::Device::copy_out).
#[derive(Debug)]
pub struct DeviceBuffer {
    data: Matrix,
}

impl DeviceBuffer {
    pub(crate) fn new(data: Matrix) -> Self {
        Self { data }
    }

    pub fn size(&self) -> usize {
        self.data.size()
    }

    pub(crate) fn view(&self) -> ArrayView2<'_, Element> {
        self.data.view()
    }

    pub(crate) fn view_mut(&mut self) -> ArrayViewMut2<'_, Element> {
        self.data.view_mut()
    }

    pub(crate) fn as_matrix(&self) -> &Matrix {
        &self.data
    }
}
