use crate::analysis::{bland_altman, linear_fit};
use crate::plot::{LineStyle, MarkerShape, PlotItem, PlotSpec, Range, Series};
use crate::{DataError, EnergyTable};

/// Scatter of (benchmark, comparison) barrier heights with the 1:1 diagonal,
/// the least-squares fit line, and the fit statistics.
pub fn method_regression(
    energy: &EnergyTable,
    benchmark: &str,
    comparison: &str,
) -> Result<PlotSpec, DataError> {
    let bench_idx = energy.method_index(benchmark)?;
    let comp_idx = energy.method_index(comparison)?;
    let x = energy.method_column(bench_idx);
    let y = energy.method_column(comp_idx);
    let fit = linear_fit(&x, &y)?;

    let range = Range::of(x.iter().chain(&y).copied())
        .ok_or(DataError::DegenerateFit)?
        .padded(0.05);

    let mut spec = PlotSpec::new(
        format!("{comparison} vs {benchmark}"),
        range,
        range,
    );
    spec.x_label = format!("{benchmark} (kcal/mol)");
    spec.y_label = format!("{comparison} (kcal/mol)");
    spec.equal_aspect = true;

    spec.items.push(PlotItem::Line {
        label: Some("1:1".into()),
        points: vec![(range.min, range.min), (range.max, range.max)],
        color_index: 1,
        style: LineStyle::Dashed,
    });
    spec.items.push(PlotItem::Line {
        label: Some("fit".into()),
        points: vec![
            (range.min, fit.slope * range.min + fit.intercept),
            (range.max, fit.slope * range.max + fit.intercept),
        ],
        color_index: 2,
        style: LineStyle::Solid,
    });
    spec.items.push(PlotItem::Points(Series {
        label: comparison.to_string(),
        points: x.into_iter().zip(y).collect(),
        color_index: 0,
        shape: MarkerShape::Circle,
    }));
    spec.items.push(PlotItem::Note {
        frac: (0.04, 0.06),
        text: format!(
            "slope {:.3}  intercept {:+.3}  R2 {:.4}",
            fit.slope, fit.intercept, fit.r_squared
        ),
    });

    Ok(spec)
}

/// Bland-Altman agreement view: per-system (mean, difference) points with the
/// mean-difference line and the 95% limits of agreement.
pub fn bland_altman_plot(
    energy: &EnergyTable,
    benchmark: &str,
    comparison: &str,
) -> Result<PlotSpec, DataError> {
    let agreement = bland_altman(energy, benchmark, comparison)?;

    let x_range = Range::of(agreement.points.iter().map(|(m, _)| *m))
        .ok_or(DataError::DegenerateFit)?
        .padded(0.08);
    let y_range = Range::of(
        agreement
            .points
            .iter()
            .map(|(_, d)| *d)
            .chain([agreement.lower_limit, agreement.upper_limit]),
    )
    .ok_or(DataError::DegenerateFit)?
    .padded(0.15);

    let mut spec = PlotSpec::new(
        format!("Agreement: {comparison} - {benchmark}"),
        x_range,
        y_range,
    );
    spec.x_label = "mean of both methods (kcal/mol)".into();
    spec.y_label = format!("{comparison} - {benchmark} (kcal/mol)");

    spec.items.push(PlotItem::HLine {
        y: agreement.mean_diff,
        style: LineStyle::Solid,
        label: Some(format!("mean {:+.2}", agreement.mean_diff)),
    });
    spec.items.push(PlotItem::HLine {
        y: agreement.upper_limit,
        style: LineStyle::Dashed,
        label: Some("+1.96 SD".into()),
    });
    spec.items.push(PlotItem::HLine {
        y: agreement.lower_limit,
        style: LineStyle::Dashed,
        label: Some("-1.96 SD".into()),
    });
    spec.items.push(PlotItem::Points(Series {
        label: comparison.to_string(),
        points: agreement.points,
        color_index: 0,
        shape: MarkerShape::Circle,
    }));

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table() -> EnergyTable {
        EnergyTable::new(
            vec!["TS1".into(), "TS2".into(), "TS3".into(), "TS4".into()],
            vec!["Bench".into(), "A".into()],
            vec![
                vec![10.0, 11.0],
                vec![20.0, 19.0],
                vec![30.0, 31.5],
                vec![40.0, 38.5],
            ],
        )
        .unwrap()
    }

    #[test]
    fn regressing_the_benchmark_on_itself_is_the_identity() {
        let spec = method_regression(&table(), "Bench", "Bench").unwrap();
        let note = spec
            .items
            .iter()
            .find_map(|item| match item {
                PlotItem::Note { text, .. } => Some(text.clone()),
                _ => None,
            })
            .unwrap();
        assert!(note.contains("slope 1.000"), "note was: {note}");
        assert!(note.contains("R2 1.0000"), "note was: {note}");
    }

    #[test]
    fn regression_axes_are_shared_and_square() {
        let spec = method_regression(&table(), "Bench", "A").unwrap();
        assert!(spec.equal_aspect);
        assert_eq!(spec.x_range, spec.y_range);
        // diagonal endpoints sit on y = x
        let diag = spec
            .items
            .iter()
            .find_map(|item| match item {
                PlotItem::Line {
                    label: Some(l),
                    points,
                    ..
                } if l == "1:1" => Some(points.clone()),
                _ => None,
            })
            .unwrap();
        for (x, y) in diag {
            assert_relative_eq!(x, y);
        }
    }

    #[test]
    fn unknown_comparison_method_is_reported() {
        let err = method_regression(&table(), "Bench", "HF").unwrap_err();
        assert!(matches!(err, DataError::UnknownMethod(_)));
    }

    #[test]
    fn bland_altman_lines_bracket_the_mean() {
        let spec = bland_altman_plot(&table(), "Bench", "A").unwrap();
        let mut hlines: Vec<f64> = Vec::new();
        for item in &spec.items {
            if let PlotItem::HLine { y, .. } = item {
                hlines.push(*y);
            }
        }
        assert_eq!(hlines.len(), 3);
        let mean = hlines[0];
        assert!(hlines[1] > mean && hlines[2] < mean);
        // limits stay inside the padded y range
        for y in hlines {
            assert!(y >= spec.y_range.min && y <= spec.y_range.max);
        }
    }
}
