//! Модуль ускорителя
//!
//! Ускоритель моделируется выделенным пулом потоков: данные явно копируются
//! в память устройства, вычисляются там и копируются обратно.

pub mod buffer;
pub mod device;

pub use buffer::DeviceBuffer;
pub use device::Device;
