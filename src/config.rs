//! Параметры запуска: размер матриц, ширина тайла, число вычислительных блоков

use crate::error::{MatmulError, Result};

/// Размер матриц по умолчанию
pub const DEFAULT_SIZE: usize = 512;
/// Ширина тайла по умолчанию
pub const DEFAULT_TILE_WIDTH: usize = 16;

/// Неизменяемые параметры одного запуска.
///
/// Инвариант: `tile_width > 0` и `size % tile_width == 0`.
/// Проверяется в [`RunConfig::new`], до запуска любого ядра.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub size: usize,
    pub tile_width: usize,
    /// `None` - все доступные ядра
    pub execution_units: Option<usize>,
}

impl RunConfig {
    pub fn new(size: usize, tile_width: usize) -> Result<Self> {
        validate_tiling(size, tile_width)?;
        Ok(Self {
            size,
            tile_width,
            execution_units: None,
        })
    }

    pub fn with_execution_units(mut self, units: usize) -> Self {
        self.execution_units = Some(units);
        self
    }

    /// Количество тайлов вдоль одной стороны матрицы
    pub fn tiles_per_side(&self) -> usize {
        self.size / self.tile_width
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            tile_width: DEFAULT_TILE_WIDTH,
            execution_units: None,
        }
    }
}

/// Проверяет, что тайлы покрывают матрицу без остатка
pub fn validate_tiling(size: usize, tile_width: usize) -> Result<()> {
    if tile_width == 0 {
        return Err(MatmulError::ZeroTileWidth);
    }
    if size % tile_width != 0 {
        return Err(MatmulError::TileMismatch { size, tile_width });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.size, 512);
        assert_eq!(cfg.tile_width, 16);
        assert_eq!(cfg.tiles_per_side(), 32);
        assert!(RunConfig::new(cfg.size, cfg.tile_width).is_ok());
    }

    #[test]
    fn test_rejects_non_dividing_tile() {
        let err = RunConfig::new(512, 24).unwrap_err();
        assert!(matches!(
            err,
            MatmulError::TileMismatch {
                size: 512,
                tile_width: 24
            }
        ));
    }

    #[test]
    fn test_rejects_zero_tile() {
        assert!(matches!(
            RunConfig::new(16, 0),
            Err(MatmulError::ZeroTileWidth)
        ));
    }

    #[test]
    fn test_empty_matrix_accepts_any_tile() {
        let cfg = RunConfig::new(0, 16).unwrap();
        assert_eq!(cfg.tiles_per_side(), 0);
    }

    #[test]
    fn test_execution_units() {
        let cfg = RunConfig::new(8, 4).unwrap().with_execution_units(2);
        assert_eq!(cfg.execution_units, Some(2));
    }
}
