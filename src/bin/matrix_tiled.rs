//! Тайловое умножение на ускорителе с проверкой результата

use acc_matmul::matrix::initialize_matrices;
use acc_matmul::utils::{init_tracing, time_kernel};
use acc_matmul::{
    verify, Device, Matrix, MatrixType, Oracle, RunConfig, TiledOffload, Verification,
};
use anyhow::{Context, Result};
use std::process::ExitCode;
use std::sync::Arc;

const N: usize = 512;
const TILE_WIDTH: usize = 16;

fn main() -> Result<ExitCode> {
    init_tracing();

    // N должно делиться на TILE_WIDTH; проверяем до любых вычислений
    let config = RunConfig::new(N, TILE_WIDTH).context("invalid tiling configuration")?;

    let (a, b) = initialize_matrices(MatrixType::Indexed, config.size)
        .context("allocating operands")?;
    let mut c = Matrix::zeros(config.size).context("allocating result")?;

    let device = Arc::new(Device::from_config(&config).context("starting accelerator")?);
    let tiled = TiledOffload::new(device, &config)?;

    let timing = time_kernel(&tiled, &a, &b, &mut c)?;
    println!(
        "OpenACC Tiled Matrix Multiplication time: {:.6} seconds",
        timing.seconds()
    );

    match verify(&c, Oracle::ClosedForm) {
        Verification::Success => {
            println!("Success: All values are computed correctly.");
            Ok(ExitCode::SUCCESS)
        }
        Verification::Mismatch { row, col, .. } => {
            println!("Error: Incorrect computation at element [{row}][{col}]");
            Ok(ExitCode::FAILURE)
        }
    }
}
