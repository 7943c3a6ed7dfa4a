//! Базовое умножение: CPU против выгрузки на ускоритель по ячейкам

use acc_matmul::matrix::{compare_results, initialize_matrices};
use acc_matmul::utils::{init_tracing, time_kernel};
use acc_matmul::{CpuKernel, Device, Matrix, MatrixType, NaiveOffload};
use anyhow::{bail, Context, Result};
use std::sync::Arc;

const N: usize = 512;

fn main() -> Result<()> {
    init_tracing();

    let (a, b) = initialize_matrices(MatrixType::Indexed, N).context("allocating operands")?;
    let mut c = Matrix::zeros(N).context("allocating result")?;
    let mut c_cpu = Matrix::zeros(N).context("allocating CPU result")?;

    let cpu_time = time_kernel(&CpuKernel, &a, &b, &mut c_cpu)?;
    println!("CPU time: {:.6} seconds", cpu_time.seconds());

    let device = Arc::new(Device::new(None).context("starting accelerator")?);
    let naive = NaiveOffload::new(device);
    let acc_time = time_kernel(&naive, &a, &b, &mut c)?;
    println!("OpenACC Basic time: {:.6} seconds", acc_time.seconds());

    let cmp = compare_results(&c_cpu, &c)?;
    if !cmp.matches() {
        bail!(
            "offloaded result differs from CPU in {} elements (first at {:?})",
            cmp.diff_count,
            cmp.first_diff
        );
    }
    Ok(())
}
