//! Ядра умножения с выгрузкой на ускоритель
//!
//! Оба ядра используют один протокол: A и B копируются на устройство,
//! вычислительная область выполняется на его блоках, C копируется обратно
//! только после завершения всех ячеек.

use super::operations::{check_operands, dot_cell};
use super::types::Matrix;
use crate::accel::Device;
use crate::backend::MatmulKernel;
use crate::config::{validate_tiling, RunConfig};
use crate::error::Result;
use ndarray::Zip;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Каждая ячейка (i, j) - независимая единица работы
#[derive(Debug, Clone)]
pub struct NaiveOffload {
    device: Arc<Device>,
}

impl NaiveOffload {
    pub fn new(device: Arc<Device>) -> Self {
        Self { device }
    }
}

impl MatmulKernel for NaiveOffload {
    fn name(&self) -> &str {
        "offload-naive"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
        let size = check_operands(a, b, c)?;
        debug!(size, units = self.device.execution_units(), "naive offload");

        let a_dev = self.device.copy_in(a)?;
        let b_dev = self.device.copy_in(b)?;
        let mut c_dev = self.device.alloc(size)?;

        let (av, bv) = (a_dev.view(), b_dev.view());
        let out = c_dev.view_mut();
        self.device.launch(|| {
            Zip::indexed(out).par_for_each(|(i, j), cell| *cell = dot_cell(av, bv, i, j));
        });

        self.device.copy_out(&c_dev, c)
    }
}

/// Пространство (i, j) разбито на тайлы `tile_width`×`tile_width`;
/// единица работы - целый тайл.
#[derive(Debug, Clone)]
pub struct TiledOffload {
    device: Arc<Device>,
    tile_width: usize,
}

impl TiledOffload {
    pub fn new(device: Arc<Device>, config: &RunConfig) -> Result<Self> {
        validate_tiling(config.size, config.tile_width)?;
        Ok(Self {
            device,
            tile_width: config.tile_width,
        })
    }

    pub fn tile_width(&self) -> usize {
        self.tile_width
    }
}

impl MatmulKernel for TiledOffload {
    fn name(&self) -> &str {
        "offload-tiled"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
        let size = check_operands(a, b, c)?;
        let tw = self.tile_width;
        validate_tiling(size, tw)?;
        let tiles_per_side = size / tw;
        debug!(
            size,
            tile_width = tw,
            tiles = tiles_per_side * tiles_per_side,
            units = self.device.execution_units(),
            "tiled offload"
        );

        let a_dev = self.device.copy_in(a)?;
        let b_dev = self.device.copy_in(b)?;
        let mut c_dev = self.device.alloc(size)?;

        let (av, bv) = (a_dev.view(), b_dev.view());
        let mut out = c_dev.view_mut();
        // тайлы идут в порядке row-major: номер t -> (t / tiles_per_side, t % tiles_per_side)
        let tiles: Vec<_> = out
            .exact_chunks_mut((tw, tw))
            .into_iter()
            .enumerate()
            .collect();
        self.device.launch(|| {
            tiles.into_par_iter().for_each(|(t, mut tile)| {
                let row0 = t / tiles_per_side * tw;
                let col0 = t % tiles_per_side * tw;
                for ((di, dj), cell) in tile.indexed_iter_mut() {
                    *cell = dot_cell(av, bv, row0 + di, col0 + dj);
                }
            });
        });

        self.device.copy_out(&c_dev, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatmulError;
    use crate::matrix::{cpu_matrix_multiply, initialize_matrices, MatrixType};

    fn device() -> Arc<Device> {
        Arc::new(Device::new(Some(4)).unwrap())
    }

    fn reference(a: &Matrix, b: &Matrix) -> Matrix {
        let mut c = Matrix::zeros(a.size()).unwrap();
        cpu_matrix_multiply(a, b, &mut c).unwrap();
        c
    }

    #[test]
    fn test_naive_matches_cpu() {
        let (a, b) = initialize_matrices(MatrixType::Random { seed: 1 }, 24).unwrap();
        let mut c = Matrix::zeros(24).unwrap();
        NaiveOffload::new(device()).multiply(&a, &b, &mut c).unwrap();
        assert_eq!(c, reference(&a, &b));
    }

    #[test]
    fn test_tiled_matches_naive() {
        let (a, b) = initialize_matrices(MatrixType::Random { seed: 2 }, 24).unwrap();
        let dev = device();
        let mut naive = Matrix::zeros(24).unwrap();
        NaiveOffload::new(dev.clone())
            .multiply(&a, &b, &mut naive)
            .unwrap();

        for tw in [1, 2, 3, 4, 6, 8, 12, 24] {
            let cfg = RunConfig::new(24, tw).unwrap();
            let mut tiled = Matrix::zeros(24).unwrap();
            TiledOffload::new(dev.clone(), &cfg)
                .unwrap()
                .multiply(&a, &b, &mut tiled)
                .unwrap();
            assert_eq!(tiled, naive, "tile width {tw}");
        }
    }

    #[test]
    fn test_tiled_rejects_bad_config() {
        let cfg = RunConfig {
            size: 10,
            tile_width: 4,
            execution_units: None,
        };
        assert!(matches!(
            TiledOffload::new(device(), &cfg),
            Err(MatmulError::TileMismatch {
                size: 10,
                tile_width: 4
            })
        ));
    }

    #[test]
    fn test_tiled_rejects_non_dividing_operands() {
        // конфигурация валидна для 8, но операнды 6×6
        let cfg = RunConfig::new(8, 4).unwrap();
        let kernel = TiledOffload::new(device(), &cfg).unwrap();
        let (a, b) = initialize_matrices(MatrixType::Indexed, 6).unwrap();
        let mut c = Matrix::from_fn(6, |_, _| -1).unwrap();
        let err = kernel.multiply(&a, &b, &mut c).unwrap_err();
        assert!(matches!(err, MatmulError::TileMismatch { size: 6, tile_width: 4 }));
        assert!(c.iter().all(|&v| v == -1));
    }

    #[test]
    fn test_mismatch_leaves_result_untouched() {
        let a = Matrix::zeros(3).unwrap();
        let b = Matrix::zeros(4).unwrap();
        let mut c = Matrix::from_fn(3, |_, _| 9).unwrap();
        assert!(NaiveOffload::new(device()).multiply(&a, &b, &mut c).is_err());
        assert!(c.iter().all(|&v| v == 9));
    }

    #[test]
    fn test_single_and_empty() {
        let dev = device();
        for size in [0, 1] {
            let (a, b) = initialize_matrices(MatrixType::Indexed, size).unwrap();
            let expected = reference(&a, &b);

            let mut naive = Matrix::zeros(size).unwrap();
            NaiveOffload::new(dev.clone())
                .multiply(&a, &b, &mut naive)
                .unwrap();
            assert_eq!(naive, expected);

            let cfg = RunConfig::new(size, 1).unwrap();
            let mut tiled = Matrix::zeros(size).unwrap();
            TiledOffload::new(dev.clone(), &cfg)
                .unwrap()
                .multiply(&a, &b, &mut tiled)
                .unwrap();
            assert_eq!(tiled, expected);
        }
    }

    #[test]
    fn test_names() {
        let dev = device();
        assert_eq!(NaiveOffload::new(dev.clone()).name(), "offload-naive");
        let cfg = RunConfig::new(16, 8).unwrap();
        let tiled = TiledOffload::new(dev, &cfg).unwrap();
        assert_eq!(tiled.name(), "offload-tiled");
        assert_eq!(tiled.tile_width(), 8);
    }
}
