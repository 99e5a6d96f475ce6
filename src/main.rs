//! Residual-check runner for the syrk reference and the blocked trsm.

use microblas::check::{Verdict, syrk_experiment, syrk_thresholds, trsm_experiment, trsm_thresholds};
use microblas::matrix::{syrk, trsv};
use microblas::{Diag, Matrix, MatrixMut, NativeKernels, Result, Struc, Trans, Uplo, trsm_blocked};
use num_complex::{Complex32, Complex64};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;

const SIZES: [usize; 4] = [16, 64, 128, 200];

fn main() -> Result<()> {
    println!("=== Residual Checks ===\n");

    let mut rng = StdRng::seed_from_u64(2024);
    let mut failures = 0;

    failures += run_datatype::<f32>("s", &mut rng)?;
    failures += run_datatype::<Complex32>("c", &mut rng)?;
    failures += run_datatype::<f64>("d", &mut rng)?;
    failures += run_datatype::<Complex64>("z", &mut rng)?;

    println!("=== Blocked trsm vs trsv (d, upper) ===\n");
    for &m in &SIZES {
        let (blocked_ms, reference_ms) = time_trsm(m, 64);
        println!(
            "m={:<4} n=64   blocked {:8.3} ms   trsv columns {:8.3} ms  ({:.1}×)",
            m,
            blocked_ms,
            reference_ms,
            reference_ms / blocked_ms
        );
    }
    println!();

    if failures > 0 {
        println!("{} check(s) FAILED", failures);
        std::process::exit(1);
    }
    println!("all checks passed");
    Ok(())
}

/// Print one table of residuals for datatype `T`, returning how many failed.
fn run_datatype<T: NativeKernels>(name: &str, rng: &mut StdRng) -> Result<usize> {
    println!("datatype {} ({:?})", name, T::DATATYPE);
    println!("{}", "-".repeat(72));
    println!(
        "{:<6} {:>5} {:>5} {:<7} {:<16} {:>12}  {}",
        "op", "m", "n/k", "uplo", "trans/diag", "residual", "result"
    );

    let mut failures = 0;
    let syrk_tol = syrk_thresholds(T::DATATYPE);
    let trsm_tol = trsm_thresholds(T::DATATYPE);

    for &m in &SIZES {
        for uplo in [Uplo::Lower, Uplo::Upper] {
            let k = m / 2 + 1;
            let resid = syrk_experiment::<T, _, _>(m, k, uplo, Trans::NoTranspose, rng, syrk)?;
            let verdict = syrk_tol.classify(resid);
            if verdict == Verdict::Fail {
                failures += 1;
            }
            println!(
                "{:<6} {:>5} {:>5} {:<7} {:<16} {:>12.3e}  {}",
                "syrk",
                m,
                k,
                format!("{:?}", uplo),
                "n",
                resid,
                verdict
            );

            for (trans, diag) in [(Trans::NoTranspose, Diag::NonUnit), (Trans::ConjTranspose, Diag::Unit)] {
                let n = m / 4 + 3;
                let resid = trsm_experiment::<T, _, _>(m, n, uplo, trans, diag, rng, trsm_blocked)?;
                let verdict = trsm_tol.classify(resid);
                if verdict == Verdict::Fail {
                    failures += 1;
                }
                println!(
                    "{:<6} {:>5} {:>5} {:<7} {:<16} {:>12.3e}  {}",
                    "trsm",
                    m,
                    n,
                    format!("{:?}", uplo),
                    format!("{:?}/{:?}", trans, diag),
                    resid,
                    verdict
                );
            }
        }
    }
    println!();
    Ok(failures)
}

/// Time the blocked solve against column-by-column `trsv` on the same input.
fn time_trsm(m: usize, n: usize) -> (f64, f64) {
    let a_data: Vec<f64> = (0..m * m)
        .map(|v| {
            let (i, j) = (v % m, v / m);
            if i == j { 2.0 } else { ((v % 7) as f64 - 3.0) / (m as f64 * 4.0) }
        })
        .collect();
    let b0: Vec<f64> = (0..m * n).map(|v| (v % 13) as f64 - 6.0).collect();

    let Ok(a) = Matrix::col_major(&a_data, m, m) else {
        return (f64::NAN, f64::NAN);
    };
    let a = a.with_struc(Struc::Triangular);

    let mut b = b0.clone();
    let start = Instant::now();
    if let Ok(mut bm) = MatrixMut::col_major(&mut b, m, n) {
        trsm_blocked(1.0, &a, &mut bm);
    }
    let blocked = start.elapsed().as_secs_f64() * 1000.0;

    let mut b = b0;
    let start = Instant::now();
    for col in b.chunks_mut(m) {
        trsv(&a, col);
    }
    let reference = start.elapsed().as_secs_f64() * 1000.0;

    (blocked, reference)
}
