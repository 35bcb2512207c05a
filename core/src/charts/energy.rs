use std::hash::{DefaultHasher, Hash, Hasher};

use crate::analysis::{absolute_errors, relative_energies, signed_errors};
use crate::plot::{HeatScale, LineStyle, MarkerShape, PlotItem, PlotSpec, Range, Series};
use crate::{DataError, EnergyTable};

/// Chemical-accuracy threshold in kcal/mol.
pub const CHEMICAL_ACCURACY: f64 = 1.0;

const JITTER_WIDTH: f64 = 0.36;

/// Per-method distribution of |method - benchmark| with the chemical-accuracy
/// reference line. One jittered strip per non-benchmark method.
pub fn absolute_error_distribution(
    energy: &EnergyTable,
    benchmark: &str,
) -> Result<PlotSpec, DataError> {
    let errors = absolute_errors(energy, benchmark)?;
    let n_methods = errors.col_labels.len();

    let max_err = errors
        .values
        .iter()
        .flatten()
        .fold(0.0_f64, |acc, v| acc.max(*v));
    let y_range = Range::new(0.0, max_err.max(CHEMICAL_ACCURACY)).padded(0.08);
    let x_range = Range::new(-0.5, n_methods as f64 - 0.5);

    let mut spec = PlotSpec::new(
        format!("Absolute error vs {benchmark}"),
        x_range,
        y_range,
    );
    spec.x_label = "Method".into();
    spec.y_label = "|error| (kcal/mol)".into();
    spec.x_ticks = Some(
        errors
            .col_labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (idx as f64, label.clone()))
            .collect(),
    );

    spec.items.push(PlotItem::HLine {
        y: CHEMICAL_ACCURACY,
        style: LineStyle::Dashed,
        label: Some("chemical accuracy".into()),
    });

    for (col, method) in errors.col_labels.iter().enumerate() {
        let points = errors
            .row_labels
            .iter()
            .enumerate()
            .map(|(row, system)| (col as f64 + jitter(system), errors.values[row][col]))
            .collect();
        spec.items.push(PlotItem::Points(Series {
            label: method.clone(),
            points,
            color_index: col,
            shape: MarkerShape::cycle(col),
        }));
    }

    Ok(spec)
}

/// Diverging heatmap of method - benchmark, centered at zero with a symmetric
/// bound at the largest observed |signed error|.
pub fn signed_error_heatmap(energy: &EnergyTable, benchmark: &str) -> Result<PlotSpec, DataError> {
    let matrix = signed_errors(energy, benchmark)?;
    let bound = matrix.max_abs();

    let mut spec = grid_spec(
        format!("Signed error vs {benchmark} (kcal/mol)"),
        matrix.col_labels.len(),
        matrix.row_labels.len(),
    );
    spec.items.push(PlotItem::HeatMap {
        matrix,
        scale: HeatScale::Diverging { bound },
    });
    Ok(spec)
}

/// Sequential heatmap of the raw energy table.
pub fn energy_heatmap(energy: &EnergyTable) -> PlotSpec {
    let matrix = energy.to_matrix();
    let mut spec = grid_spec(
        "Barrier heights (kcal/mol)".to_string(),
        matrix.col_labels.len(),
        matrix.row_labels.len(),
    );
    spec.items.push(PlotItem::HeatMap {
        matrix,
        scale: HeatScale::Sequential,
    });
    spec
}

/// One line per method across systems, relative to the chosen reference
/// system, with a zero reference line.
pub fn relative_energy_lines(
    energy: &EnergyTable,
    reference: &str,
) -> Result<PlotSpec, DataError> {
    let matrix = relative_energies(energy, reference)?;
    let n_systems = matrix.row_labels.len();

    let y_range = Range::of(matrix.values.iter().flatten().copied().chain([0.0]))
        .unwrap_or(Range::new(0.0, 1.0))
        .padded(0.08);
    let x_range = Range::new(-0.5, n_systems as f64 - 0.5);

    let mut spec = PlotSpec::new(format!("Energy relative to {reference}"), x_range, y_range);
    spec.x_label = "System".into();
    spec.y_label = "relative energy (kcal/mol)".into();
    spec.x_ticks = Some(
        matrix
            .row_labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (idx as f64, label.clone()))
            .collect(),
    );

    spec.items.push(PlotItem::HLine {
        y: 0.0,
        style: LineStyle::Solid,
        label: None,
    });

    for (col, method) in matrix.col_labels.iter().enumerate() {
        let points = (0..n_systems)
            .map(|row| (row as f64, matrix.values[row][col]))
            .collect();
        spec.items.push(PlotItem::Line {
            label: Some(method.clone()),
            points,
            color_index: col,
            style: LineStyle::Solid,
        });
    }

    Ok(spec)
}

fn grid_spec(title: String, cols: usize, rows: usize) -> PlotSpec {
    PlotSpec::new(
        title,
        Range::new(0.0, cols.max(1) as f64),
        Range::new(0.0, rows.max(1) as f64),
    )
}

/// Deterministic strip jitter hashed from the system name, so a re-render
/// leaves every point where it was.
fn jitter(system: &str) -> f64 {
    let mut hasher = DefaultHasher::new();
    system.hash(&mut hasher);
    let unit = (hasher.finish() % 1_000) as f64 / 1_000.0;
    (unit - 0.5) * JITTER_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table() -> EnergyTable {
        EnergyTable::new(
            vec!["TS1".into(), "TS2".into()],
            vec!["Bench".into(), "A".into(), "B".into()],
            vec![vec![10.0, 11.0, 9.0], vec![20.0, 23.0, 19.5]],
        )
        .unwrap()
    }

    #[test]
    fn distribution_carries_the_accuracy_line_and_one_series_per_method() {
        let spec = absolute_error_distribution(&table(), "Bench").unwrap();
        let mut series = 0;
        let mut ref_line = None;
        for item in &spec.items {
            match item {
                PlotItem::Points(s) => {
                    series += 1;
                    for &(_, y) in &s.points {
                        assert!(y >= 0.0);
                    }
                }
                PlotItem::HLine { y, style, .. } => {
                    ref_line = Some((*y, *style));
                }
                _ => {}
            }
        }
        assert_eq!(series, 2);
        assert_eq!(ref_line, Some((CHEMICAL_ACCURACY, LineStyle::Dashed)));
        assert!(spec.y_range.max >= 3.0); // max |error| in the fixture
    }

    #[test]
    fn distribution_jitter_stays_within_the_method_slot() {
        let spec = absolute_error_distribution(&table(), "Bench").unwrap();
        for item in &spec.items {
            if let PlotItem::Points(s) = item {
                for &(x, _) in &s.points {
                    assert!((x - x.round()).abs() <= JITTER_WIDTH / 2.0 + 1e-9);
                }
            }
        }
    }

    #[test]
    fn signed_heatmap_bound_is_symmetric_about_zero() {
        let spec = signed_error_heatmap(&table(), "Bench").unwrap();
        let (matrix, scale) = spec.heatmap().unwrap();
        match scale {
            HeatScale::Diverging { bound } => {
                assert_relative_eq!(bound, 3.0);
                assert!(bound >= matrix.max_abs());
            }
            other => panic!("unexpected scale: {other:?}"),
        }
        // benchmark column compared with itself
        for row in &matrix.values {
            assert_eq!(row[0], 0.0);
        }
    }

    #[test]
    fn raw_heatmap_is_sequential() {
        let spec = energy_heatmap(&table());
        let (_, scale) = spec.heatmap().unwrap();
        assert_eq!(scale, HeatScale::Sequential);
    }

    #[test]
    fn relative_lines_pass_through_zero_at_the_reference() {
        let spec = relative_energy_lines(&table(), "TS1").unwrap();
        let mut lines = 0;
        for item in &spec.items {
            if let PlotItem::Line { points, label, .. } = item {
                if label.is_some() {
                    lines += 1;
                    assert_eq!(points[0], (0.0, 0.0));
                }
            }
        }
        assert_eq!(lines, 3);
    }
}
