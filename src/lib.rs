//! Integer matrix multiplication offloaded to a parallel accelerator

pub mod accel;
pub mod backend;
pub mod config;
pub mod error;
pub mod matrix;
pub mod utils;
pub mod verify;

// Реэкспорт основных типов для удобства
pub use accel::{Device, DeviceBuffer};
pub use backend::MatmulKernel;
pub use config::{RunConfig, DEFAULT_SIZE, DEFAULT_TILE_WIDTH};
pub use error::{MatmulError, Result};
pub use matrix::{CpuKernel, Element, Matrix, MatrixType, NaiveOffload, TiledOffload};
pub use verify::{verify, Oracle, Verification};
