use crate::analysis::diagnostic_points;
use crate::plot::{LineStyle, MarkerShape, PlotItem, PlotSpec, Range, Series, ZoneTint};
use crate::{BondTable, DataError, EnergyTable};

/// Tolerance thresholds splitting the diagnostic map into its three zones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Structural tolerance in angstrom.
    pub rmsd: f64,
    /// Energy tolerance in kcal/mol.
    pub energy: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            rmsd: 0.3,
            energy: 1.0,
        }
    }
}

/// Structure-vs-energy diagnostic map. Background zones classify every
/// (system, method) pair: both errors within tolerance (safe), structure fine
/// but energy off (electronic error), or structure off regardless of energy
/// (structural failure).
pub fn diagnostic_map(
    energy: &EnergyTable,
    bonds: &BondTable,
    benchmark: &str,
    tolerances: Tolerances,
) -> Result<PlotSpec, DataError> {
    let points = diagnostic_points(energy, bonds, benchmark)?;

    let max_rmsd = points.iter().fold(0.0_f64, |acc, p| acc.max(p.rmsd));
    let max_err = points.iter().fold(0.0_f64, |acc, p| acc.max(p.abs_error));
    // keep all three zones visible even when every point is safe
    let x_max = (tolerances.rmsd * 1.5).max(max_rmsd * 1.1);
    let y_max = (tolerances.energy * 1.5).max(max_err * 1.1);

    let mut spec = PlotSpec::new(
        format!("Structure vs energy (benchmark: {benchmark})"),
        Range::new(0.0, x_max),
        Range::new(0.0, y_max),
    );
    spec.x_label = "RMSD (Å)".into();
    spec.y_label = "absolute energy error (kcal/mol)".into();

    spec.items.push(PlotItem::Zone {
        x0: 0.0,
        x1: tolerances.rmsd,
        y0: 0.0,
        y1: tolerances.energy,
        tint: ZoneTint::Safe,
    });
    spec.items.push(PlotItem::Zone {
        x0: 0.0,
        x1: tolerances.rmsd,
        y0: tolerances.energy,
        y1: y_max,
        tint: ZoneTint::Warn,
    });
    spec.items.push(PlotItem::Zone {
        x0: tolerances.rmsd,
        x1: x_max,
        y0: 0.0,
        y1: y_max,
        tint: ZoneTint::Fail,
    });
    spec.items.push(PlotItem::VLine {
        x: tolerances.rmsd,
        style: LineStyle::Dashed,
        label: Some("RMSD tol".into()),
    });
    spec.items.push(PlotItem::HLine {
        y: tolerances.energy,
        style: LineStyle::Dashed,
        label: Some("E tol".into()),
    });

    let mut methods: Vec<String> = Vec::new();
    for p in &points {
        if !methods.contains(&p.method) {
            methods.push(p.method.clone());
        }
    }
    for (idx, method) in methods.into_iter().enumerate() {
        let series_points = points
            .iter()
            .filter(|p| p.method == method)
            .map(|p| (p.rmsd, p.abs_error))
            .collect();
        spec.items.push(PlotItem::Points(Series {
            label: method,
            points: series_points,
            color_index: idx,
            shape: MarkerShape::cycle(idx),
        }));
    }

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BondRecord;
    use approx::assert_relative_eq;

    fn fixtures() -> (EnergyTable, BondTable) {
        let energy = EnergyTable::new(
            vec!["TS1".into(), "TS2".into()],
            vec!["Bench".into(), "A".into()],
            vec![vec![10.0, 12.5], vec![20.0, 20.2]],
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
                r1: 2.5,
                r2: 2.0,
            },
            BondRecord {
                system: "TS2".into(),
                method: "Bench".into(),
                r1: 2.1,
                r2: 2.3,
            },
            BondRecord {
                system: "TS2".into(),
                method: "A".into(),
                r1: 2.12,
                r2: 2.31,
            },
        ]);
        (energy, bonds)
    }

    #[test]
    fn zones_partition_the_plot_area() {
        let (energy, bonds) = fixtures();
        let tol = Tolerances::default();
        let spec = diagnostic_map(&energy, &bonds, "Bench", tol).unwrap();

        let zones: Vec<(f64, f64, f64, f64, ZoneTint)> = spec
            .items
            .iter()
            .filter_map(|item| match item {
                PlotItem::Zone { x0, x1, y0, y1, tint } => Some((*x0, *x1, *y0, *y1, *tint)),
                _ => None,
            })
            .collect();
        assert_eq!(zones.len(), 3);

        let (x_max, y_max) = (spec.x_range.max, spec.y_range.max);
        assert_eq!(zones[0], (0.0, tol.rmsd, 0.0, tol.energy, ZoneTint::Safe));
        assert_eq!(zones[1], (0.0, tol.rmsd, tol.energy, y_max, ZoneTint::Warn));
        assert_eq!(zones[2], (tol.rmsd, x_max, 0.0, y_max, ZoneTint::Fail));
    }

    #[test]
    fn tolerance_lines_are_dashed_at_the_boundaries() {
        let (energy, bonds) = fixtures();
        let spec = diagnostic_map(&energy, &bonds, "Bench", Tolerances::default()).unwrap();

        let vline = spec.items.iter().find_map(|item| match item {
            PlotItem::VLine { x, style, .. } => Some((*x, *style)),
            _ => None,
        });
        let hline = spec.items.iter().find_map(|item| match item {
            PlotItem::HLine { y, style, .. } => Some((*y, *style)),
            _ => None,
        });
        assert_eq!(vline, Some((0.3, LineStyle::Dashed)));
        assert_eq!(hline, Some((1.0, LineStyle::Dashed)));
    }

    #[test]
    fn axes_keep_every_zone_visible() {
        let (energy, bonds) = fixtures();
        let tol = Tolerances::default();
        let spec = diagnostic_map(&energy, &bonds, "Bench", tol).unwrap();
        assert!(spec.x_range.max >= tol.rmsd * 1.5);
        assert!(spec.y_range.max >= tol.energy * 1.5);
        // TS1/A sits at rmsd sqrt(0.125), |dE| 2.5 and must be inside
        assert!(spec.y_range.max >= 2.5);
    }

    #[test]
    fn benchmark_rows_are_not_plotted_against_themselves() {
        let (energy, bonds) = fixtures();
        let spec = diagnostic_map(&energy, &bonds, "Bench", Tolerances::default()).unwrap();
        let series: Vec<&Series> = spec
            .items
            .iter()
            .filter_map(|item| match item {
                PlotItem::Points(s) => Some(s),
                _ => None,
            })
            .collect();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "A");
        assert_eq!(series[0].points.len(), 2);
        assert_relative_eq!(series[0].points[0].1, 2.5);
    }
}
