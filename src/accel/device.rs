//! Устройство: пул вычислительных блоков и протокол копирования

use super::buffer::DeviceBuffer;
use crate::config::RunConfig;
use crate::error::Result;
use crate::matrix::Matrix;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

/// Ускоритель с собственным пулом вычислительных блоков.
///
/// Вычислительная область запускается через [`Device::launch`]; возврат из
/// неё означает, что все блоки завершили работу.
#[derive(Debug)]
pub struct Device {
    pool: ThreadPool,
}

impl Device {
    /// Поднимает пул из `execution_units` блоков (`None` - по числу ядер).
    ///
    /// # Errors
    /// [`MatmulError::Accelerator`](crate::MatmulError::Accelerator), если пул
    /// не удалось создать. Запасного пути на CPU нет.
    pub fn new(execution_units: Option<usize>) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(execution_units.unwrap_or(0))
            .thread_name(|i| format!("accel-unit-{i}"))
            .build()?;
        info!(units = pool.current_num_threads(), "accelerator ready");
        Ok(Self { pool })
    }

    pub fn from_config(config: &RunConfig) -> Result<Self> {
        Self::new(config.execution_units)
    }

    pub fn execution_units(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Копирует матрицу хоста в память устройства
    pub fn copy_in(&self, host: &Matrix) -> Result<DeviceBuffer> {
        let mut data = Matrix::zeros(host.size())?;
        data.copy_from(host)?;
        debug!(size = host.size(), "copy in");
        Ok(DeviceBuffer::new(data))
    }

    /// Выделяет буфер результата на устройстве
    pub fn alloc(&self, size: usize) -> Result<DeviceBuffer> {
        Ok(DeviceBuffer::new(Matrix::zeros(size)?))
    }

    /// Выполняет вычислительную область на блоках устройства и ждёт её завершения
    pub fn launch<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Копирует буфер устройства обратно в матрицу хоста
    pub fn copy_out(&self, buffer: &DeviceBuffer, host: &mut Matrix) -> Result<()> {
        host.copy_from(buffer.as_matrix())?;
        debug!(size = buffer.size(), "copy out");
        Ok(())
    }
}
