use crate::{BondTable, DataError, EnergyTable, Matrix};

/// Signed error (method - benchmark) per (system, method) cell. The benchmark
/// column is kept and comes out all-zero.
pub fn signed_errors(energy: &EnergyTable, benchmark: &str) -> Result<Matrix, DataError> {
    let bench_idx = energy.method_index(benchmark)?;
    let values = energy
        .rows()
        .map(|(_, row)| {
            let bench = row[bench_idx];
            row.iter().map(|v| v - bench).collect()
        })
        .collect();
    Ok(Matrix {
        row_labels: energy.systems.clone(),
        col_labels: energy.methods.clone(),
        values,
    })
}

/// Absolute error |method - benchmark| per system for every method other than
/// the benchmark itself.
pub fn absolute_errors(energy: &EnergyTable, benchmark: &str) -> Result<Matrix, DataError> {
    let bench_idx = energy.method_index(benchmark)?;
    let col_labels: Vec<String> = energy
        .methods
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != bench_idx)
        .map(|(_, m)| m.clone())
        .collect();
    let values = energy
        .rows()
        .map(|(_, row)| {
            let bench = row[bench_idx];
            row.iter()
                .enumerate()
                .filter(|(idx, _)| *idx != bench_idx)
                .map(|(_, v)| (v - bench).abs())
                .collect()
        })
        .collect();
    Ok(Matrix {
        row_labels: energy.systems.clone(),
        col_labels,
        values,
    })
}

/// Energy of every cell relative to the chosen reference system. The reference
/// row is kept and comes out all-zero.
pub fn relative_energies(energy: &EnergyTable, reference: &str) -> Result<Matrix, DataError> {
    let ref_idx = energy.system_index(reference)?;
    let values = energy
        .rows()
        .map(|(_, row)| {
            row.iter()
                .enumerate()
                .map(|(col, v)| v - energy.value(ref_idx, col))
                .collect()
        })
        .collect();
    Ok(Matrix {
        row_labels: energy.systems.clone(),
        col_labels: energy.methods.clone(),
        values,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

/// Ordinary least squares fit of y = slope * x + intercept.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Result<Regression, DataError> {
    if x.len() != y.len() {
        return Err(DataError::LengthMismatch);
    }
    let n = x.len();
    if n < 2 {
        return Err(DataError::DegenerateFit);
    }

    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 {
        return Err(DataError::DegenerateFit);
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // a flat comparison series correlates perfectly with its own fit
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };

    Ok(Regression {
        slope,
        intercept,
        r_squared,
    })
}

/// Bland-Altman agreement between two methods: per-system (mean, difference)
/// points plus the mean difference and its 95% limits of agreement.
#[derive(Debug, Clone, PartialEq)]
pub struct Agreement {
    /// One (mean of both methods, comparison - benchmark) pair per system.
    pub points: Vec<(f64, f64)>,
    pub mean_diff: f64,
    pub sd_diff: f64,
    pub lower_limit: f64,
    pub upper_limit: f64,
}

pub fn bland_altman(
    energy: &EnergyTable,
    benchmark: &str,
    comparison: &str,
) -> Result<Agreement, DataError> {
    let bench_idx = energy.method_index(benchmark)?;
    let comp_idx = energy.method_index(comparison)?;

    let points: Vec<(f64, f64)> = energy
        .rows()
        .map(|(_, row)| {
            let b = row[bench_idx];
            let c = row[comp_idx];
            ((b + c) * 0.5, c - b)
        })
        .collect();

    if points.len() < 2 {
        return Err(DataError::DegenerateFit);
    }

    let n = points.len() as f64;
    let mean_diff = points.iter().map(|(_, d)| d).sum::<f64>() / n;
    // sample standard deviation (n - 1)
    let var = points
        .iter()
        .map(|(_, d)| (d - mean_diff).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    let sd_diff = var.sqrt();

    Ok(Agreement {
        points,
        mean_diff,
        sd_diff,
        lower_limit: mean_diff - 1.96 * sd_diff,
        upper_limit: mean_diff + 1.96 * sd_diff,
    })
}

/// |R1 - R2| per bond record, reshaped into a System x Method matrix. Cells
/// with no record are NaN and skipped by the renderers; duplicate pairs are a
/// hard error rather than being silently dropped.
pub fn asynchronicity(bonds: &BondTable) -> Result<Matrix, DataError> {
    let systems = bonds.systems();
    let methods = bonds.methods();
    let mut values = vec![vec![f64::NAN; methods.len()]; systems.len()];

    for rec in &bonds.records {
        let row = systems
            .iter()
            .position(|s| *s == rec.system)
            .ok_or_else(|| DataError::UnknownSystem(rec.system.clone()))?;
        let col = methods
            .iter()
            .position(|m| *m == rec.method)
            .ok_or_else(|| DataError::UnknownMethod(rec.method.clone()))?;
        if !values[row][col].is_nan() {
            return Err(DataError::DuplicatePair {
                system: rec.system.clone(),
                method: rec.method.clone(),
            });
        }
        values[row][col] = (rec.r1 - rec.r2).abs();
    }

    Ok(Matrix {
        row_labels: systems,
        col_labels: methods,
        values,
    })
}

/// One point on the diagnostic map: structural deviation vs energy error for a
/// (system, method) pair, both against the benchmark method.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticPoint {
    pub system: String,
    pub method: String,
    pub rmsd: f64,
    pub abs_error: f64,
}

/// Joins the two tables against the benchmark method. RMSD is taken over the
/// (R1, R2) pair versus the benchmark geometry of the same system; pairs with
/// no benchmark geometry or no energy cell are skipped.
pub fn diagnostic_points(
    energy: &EnergyTable,
    bonds: &BondTable,
    benchmark: &str,
) -> Result<Vec<DiagnosticPoint>, DataError> {
    let bench_idx = energy.method_index(benchmark)?;

    let mut points = Vec::new();
    for rec in &bonds.records {
        if rec.method == benchmark {
            continue;
        }
        let Some(reference) = bonds.find(&rec.system, benchmark) else {
            continue;
        };
        let Ok(sys_idx) = energy.system_index(&rec.system) else {
            continue;
        };
        let Ok(method_idx) = energy.method_index(&rec.method) else {
            continue;
        };

        let d1 = rec.r1 - reference.r1;
        let d2 = rec.r2 - reference.r2;
        let rmsd = ((d1 * d1 + d2 * d2) * 0.5).sqrt();
        let abs_error = (energy.value(sys_idx, method_idx) - energy.value(sys_idx, bench_idx)).abs();

        points.push(DiagnosticPoint {
            system: rec.system.clone(),
            method: rec.method.clone(),
            rmsd,
            abs_error,
        });
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BondRecord, sample_energy_table_seeded};
    use approx::assert_relative_eq;

    fn small_energy() -> EnergyTable {
        EnergyTable::new(
            vec!["TS1".into(), "TS2".into(), "TS3".into()],
            vec!["Bench".into(), "A".into()],
            vec![vec![10.0, 11.0], vec![20.0, 18.5], vec![15.0, 15.0]],
        )
        .unwrap()
    }

    #[test]
    fn signed_error_of_benchmark_against_itself_is_zero() {
        let m = signed_errors(&small_energy(), "Bench").unwrap();
        for row in &m.values {
            assert_eq!(row[0], 0.0);
        }
        assert_relative_eq!(m.values[0][1], 1.0);
        assert_relative_eq!(m.values[1][1], -1.5);
    }

    #[test]
    fn absolute_errors_are_non_negative_and_skip_the_benchmark() {
        let m = absolute_errors(&small_energy(), "Bench").unwrap();
        assert_eq!(m.col_labels, vec!["A".to_string()]);
        for row in &m.values {
            for &v in row {
                assert!(v >= 0.0);
            }
        }
        assert_relative_eq!(m.values[0][0], 1.0);
        assert_relative_eq!(m.values[1][0], 1.5);
        assert_relative_eq!(m.values[2][0], 0.0);
    }

    #[test]
    fn unknown_benchmark_is_reported() {
        let err = signed_errors(&small_energy(), "CCSDTQ").unwrap_err();
        assert!(matches!(err, DataError::UnknownMethod(_)));
    }

    #[test]
    fn relative_energy_reference_row_is_zero() {
        let m = relative_energies(&small_energy(), "TS2").unwrap();
        for &v in &m.values[1] {
            assert_eq!(v, 0.0);
        }
        assert_relative_eq!(m.values[0][0], -10.0);
        assert_relative_eq!(m.values[0][1], -7.5);
    }

    #[test]
    fn relative_energy_unknown_reference_is_reported() {
        let err = relative_energies(&small_energy(), "TS99").unwrap_err();
        match err {
            DataError::UnknownSystem(name) => assert_eq!(name, "TS99"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn fitting_identical_series_is_the_identity_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let fit = linear_fit(&x, &x).unwrap();
        assert_relative_eq!(fit.slope, 1.0);
        assert_relative_eq!(fit.intercept, 0.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn fit_recovers_a_known_line() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v - 1.0).collect();
        let fit = linear_fit(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 2.0);
        assert_relative_eq!(fit.intercept, -1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn degenerate_fits_are_rejected() {
        assert!(matches!(
            linear_fit(&[1.0], &[1.0]),
            Err(DataError::DegenerateFit)
        ));
        assert!(matches!(
            linear_fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(DataError::DegenerateFit)
        ));
    }

    #[test]
    fn bland_altman_mean_line_matches_the_mean_difference() {
        let energy = small_energy();
        let agreement = bland_altman(&energy, "Bench", "A").unwrap();
        let mean: f64 = agreement.points.iter().map(|(_, d)| d).sum::<f64>()
            / agreement.points.len() as f64;
        assert_relative_eq!(agreement.mean_diff, mean);
        assert!(agreement.lower_limit < agreement.mean_diff);
        assert!(agreement.upper_limit > agreement.mean_diff);
    }

    #[test]
    fn bland_altman_limits_cover_about_95_percent_of_synthetic_points() {
        let energy = sample_energy_table_seeded(13);
        let agreement = bland_altman(&energy, "DLPNO-CCSD(T)", "B3LYP-D3").unwrap();
        let inside = agreement
            .points
            .iter()
            .filter(|(_, d)| *d >= agreement.lower_limit && *d <= agreement.upper_limit)
            .count();
        let frac = inside as f64 / agreement.points.len() as f64;
        // 12 near-normal draws; anything from ~10/12 up is consistent with 95%
        assert!(frac >= 0.8, "only {frac} of points inside the limits");
    }

    #[test]
    fn asynchronicity_is_non_negative_and_zero_for_symmetric_ts() {
        let bonds = BondTable::new(vec![
            BondRecord {
                system: "TS1".into(),
                method: "A".into(),
                r1: 2.2,
                r2: 2.2,
            },
            BondRecord {
                system: "TS1".into(),
                method: "B".into(),
                r1: 2.0,
                r2: 2.3,
            },
        ]);
        let m = asynchronicity(&bonds).unwrap();
        assert_eq!(m.values[0][0], 0.0);
        assert_relative_eq!(m.values[0][1], 0.3);
    }

    #[test]
    fn duplicate_pairs_fail_the_reshape() {
        let rec = BondRecord {
            system: "TS1".into(),
            method: "A".into(),
            r1: 2.0,
            r2: 2.1,
        };
        let bonds = BondTable::new(vec![rec.clone(), rec]);
        let err = asynchronicity(&bonds).unwrap_err();
        match err {
            DataError::DuplicatePair { system, method } => {
                assert_eq!(system, "TS1");
                assert_eq!(method, "A");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn diagnostic_points_join_both_tables() {
        let energy = EnergyTable::new(
            vec!["TS1".into()],
            vec!["Bench".into(), "A".into()],
            vec![vec![10.0, 11.0]],
        )
        .unwrap();
        let bonds = BondTable::new(vec![
            BondRecord {
                system: "TS1".into(),
                method: "Bench".into(),
                r1: 2.0,
                r2: 2.0,
            },
            BondRecord {
                system: "TS1".into(),
                method: "A".into(),
                r1: 2.3,
                r2: 1.6,
            },
        ]);
        let points = diagnostic_points(&energy, &bonds, "Bench").unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].method, "A");
        assert_relative_eq!(points[0].abs_error, 1.0);
        // sqrt((0.3^2 + 0.4^2) / 2)
        assert_relative_eq!(points[0].rmsd, (0.125_f64).sqrt());
    }

    #[test]
    fn single_row_energy_example() {
        let energy = EnergyTable::new(
            vec!["TS1".into()],
            vec!["Bench".into(), "A".into()],
            vec![vec![10.0, 11.0]],
        )
        .unwrap();
        let abs = absolute_errors(&energy, "Bench").unwrap();
        let signed = signed_errors(&energy, "Bench").unwrap();
        assert_relative_eq!(abs.values[0][0], 1.0);
        assert_relative_eq!(signed.values[0][1], 1.0);
    }
}
