//! Вспомогательные функции и утилиты

use crate::backend::MatmulKernel;
use crate::error::Result;
use crate::matrix::Matrix;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Измеряет время выполнения функции
pub fn measure_time<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let duration = start.elapsed();
    (result, duration)
}

/// Замер одного запуска ядра
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub kernel: String,
    pub elapsed: Duration,
}

impl Timing {
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Во сколько раз этот запуск быстрее `baseline`
    pub fn speedup_over(&self, baseline: &Timing) -> f64 {
        baseline.seconds() / self.seconds()
    }
}

/// Запускает ядро один раз и замеряет время по монотонным часам
pub fn time_kernel(
    kernel: &dyn MatmulKernel,
    a: &Matrix,
    b: &Matrix,
    c: &mut Matrix,
) -> Result<Timing> {
    let (result, elapsed) = measure_time(|| kernel.multiply(a, b, c));
    result?;
    info!(kernel = kernel.name(), size = a.size(), ?elapsed, "kernel finished");
    Ok(Timing {
        kernel: kernel.name().to_string(),
        elapsed,
    })
}

/// Логи идут в stderr, чтобы не смешиваться с отчётом в stdout.
/// Уровень берётся из `RUST_LOG`, по умолчанию `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::CpuKernel;

    #[test]
    fn test_measure_time() {
        let (v, d) = measure_time(|| 40 + 2);
        assert_eq!(v, 42);
        assert!(d < Duration::from_secs(1));
    }

    #[test]
    fn test_time_kernel() {
        let a = Matrix::from_vec(2, vec![1, 2, 3, 4]).unwrap();
        let b = Matrix::from_vec(2, vec![5, 6, 7, 8]).unwrap();
        let mut c = Matrix::zeros(2).unwrap();
        let t = time_kernel(&CpuKernel, &a, &b, &mut c).unwrap();
        assert_eq!(t.kernel, "cpu");
        assert!(t.seconds() >= 0.0);
        assert_eq!(c.to_vec(), vec![19, 22, 43, 50]);
    }

    #[test]
    fn test_time_kernel_propagates_error() {
        let a = Matrix::zeros(2).unwrap();
        let b = Matrix::zeros(3).unwrap();
        let mut c = Matrix::zeros(2).unwrap();
        assert!(time_kernel(&CpuKernel, &a, &b, &mut c).is_err());
    }

    #[test]
    fn test_speedup() {
        let slow = Timing {
            kernel: "cpu".into(),
            elapsed: Duration::from_millis(400),
        };
        let fast = Timing {
            kernel: "offload-naive".into(),
            elapsed: Duration::from_millis(100),
        };
        assert!((fast.speedup_over(&slow) - 4.0).abs() < 1e-9);
    }
}
