//! Ошибки библиотеки

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatmulError {
    #[error("buffer holds {got} elements, expected {expected} for a {size}x{size} matrix")]
    BufferSize {
        size: usize,
        expected: usize,
        got: usize,
    },
    #[error("operand dimension mismatch: [{a}x{a}] @ [{b}x{b}] -> [{c}x{c}]")]
    DimensionMismatch { a: usize, b: usize, c: usize },
    #[error("tile width must be greater than zero")]
    ZeroTileWidth,
    #[error("tile width {tile_width} does not evenly divide matrix size {size}")]
    TileMismatch { size: usize, tile_width: usize },
    #[error("failed to allocate a {size}x{size} matrix")]
    Allocation { size: usize },
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("accelerator unavailable: {0}")]
    Accelerator(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, MatmulError>;
