//! Сравнение CPU и ускорителя: базовое и тайловое умножение матриц

use acc_matmul::matrix::{compare_results, format_corner, initialize_matrices, Comparison};
use acc_matmul::utils::{init_tracing, time_kernel, Timing};
use acc_matmul::{
    verify, CpuKernel, Device, MatmulKernel, Matrix, MatrixType, NaiveOffload, Oracle, RunConfig,
    TiledOffload, Verification,
};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use prettytable::{row, Table};
use std::process::ExitCode;
use std::sync::Arc;

const MATRIX_SIZE: usize = 512;
const TILE_WIDTHS: [usize; 10] = [1, 2, 4, 8, 16, 32, 64, 128, 256, 512];

/// Один запуск ядра и его проверки
struct Run {
    timing: Timing,
    tile_width: Option<usize>,
    /// `None` у эталонного CPU запуска
    comparison: Option<Comparison>,
    verification: Verification,
}

fn run_kernel(
    kernel: &dyn MatmulKernel,
    tile_width: Option<usize>,
    a: &Matrix,
    b: &Matrix,
    reference: &Matrix,
) -> Result<Run> {
    let mut c = Matrix::zeros(a.size())?;
    let timing = time_kernel(kernel, a, b, &mut c)
        .with_context(|| format!("kernel {} failed", kernel.name()))?;
    Ok(Run {
        timing,
        tile_width,
        comparison: Some(compare_results(reference, &c)?),
        verification: verify(&c, Oracle::ClosedForm),
    })
}

fn main() -> Result<ExitCode> {
    init_tracing();

    let matrix_type = MatrixType::Indexed;

    println!("Умножение целочисленных матриц: CPU и ускоритель");
    println!("Размер матриц: {}x{}", MATRIX_SIZE, MATRIX_SIZE);

    let device = Arc::new(Device::new(None).context("Не удалось запустить ускоритель")?);
    println!("Вычислительных блоков: {}", device.execution_units());

    let (a, b) = initialize_matrices(matrix_type, MATRIX_SIZE)?;
    println!("\nВходная матрица A:\n{}", format_corner(&a, 4));
    println!("Входная матрица B:\n{}", format_corner(&b, 4));

    println!("Запуск вычислений на CPU...");
    let mut c_cpu = Matrix::zeros(MATRIX_SIZE)?;
    let cpu_time = time_kernel(&CpuKernel, &a, &b, &mut c_cpu)?;
    println!("\nРезультирующая матрица C (CPU):\n{}", format_corner(&c_cpu, 4));

    let k_indexed = verify(&c_cpu, Oracle::KIndexedSum);
    println!(
        "Формула i*N(N+3)/2 (верна только для B[k][j] = k+2): {}",
        describe(&k_indexed)
    );

    let mut runs = vec![Run {
        timing: cpu_time.clone(),
        tile_width: None,
        comparison: None,
        verification: verify(&c_cpu, Oracle::ClosedForm),
    }];

    println!("\nЗапуск вычислений на ускорителе...");
    let naive = NaiveOffload::new(device.clone());
    runs.push(run_kernel(&naive, None, &a, &b, &c_cpu)?);

    let pb = ProgressBar::new(TILE_WIDTHS.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    for tile_width in TILE_WIDTHS {
        pb.set_message(format!("тайл {tile_width}"));
        let config = RunConfig::new(MATRIX_SIZE, tile_width)?;
        let tiled = TiledOffload::new(device.clone(), &config)?;
        runs.push(run_kernel(&tiled, Some(tile_width), &a, &b, &c_cpu)?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let mut table = Table::new();
    table.add_row(row!["Ядро", "Тайл", "Время, с", "Ускорение", "Совпадает с CPU", "Проверка"]);
    for run in &runs {
        table.add_row(row![
            run.timing.kernel,
            run.tile_width.map_or_else(|| "-".to_string(), |t| t.to_string()),
            format!("{:.6}", run.timing.seconds()),
            format!("{:.2}x", run.timing.speedup_over(&cpu_time)),
            comparison_cell(run.comparison.as_ref()),
            describe(&run.verification)
        ]);
    }
    println!("\nИтоговая статистика:");
    table.printstd();

    let all_ok = runs.iter().all(|r| {
        r.comparison.as_ref().map_or(true, Comparison::matches) && r.verification.is_success()
    });
    println!(
        "Результаты ускорителя и CPU {}",
        if all_ok { "совпадают" } else { "различаются" }
    );

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn comparison_cell(comparison: Option<&Comparison>) -> &'static str {
    match comparison {
        None => "эталон",
        Some(c) if c.matches() => "да",
        Some(_) => "нет",
    }
}

fn describe(v: &Verification) -> String {
    match v {
        Verification::Success => "успех".to_string(),
        Verification::Mismatch {
            row,
            col,
            expected,
            actual,
        } => format!("ошибка в [{row}][{col}]: ожидалось {expected}, получено {actual}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_is_not_compared_with_itself() {
        assert_eq!(comparison_cell(None), "эталон");

        let same = Matrix::from_vec(2, vec![1, 2, 3, 4]).unwrap();
        let other = Matrix::from_vec(2, vec![1, 2, 3, 5]).unwrap();
        let ok = compare_results(&same, &same).unwrap();
        let bad = compare_results(&same, &other).unwrap();
        assert_eq!(comparison_cell(Some(&ok)), "да");
        assert_eq!(comparison_cell(Some(&bad)), "нет");
    }

    #[test]
    fn test_run_kernel_verifies_indexed_product() {
        let (a, b) = initialize_matrices(MatrixType::Indexed, 8).unwrap();
        let mut reference = Matrix::zeros(8).unwrap();
        CpuKernel.multiply(&a, &b, &mut reference).unwrap();

        let device = Arc::new(Device::new(Some(2)).unwrap());
        let run = run_kernel(&NaiveOffload::new(device), None, &a, &b, &reference).unwrap();
        assert_eq!(comparison_cell(run.comparison.as_ref()), "да");
        assert!(run.verification.is_success());
    }
}
