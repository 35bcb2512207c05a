use crate::analysis::asynchronicity;
use crate::plot::{HeatScale, LineStyle, MarkerShape, PlotItem, PlotSpec, Range, Series};
use crate::{BondTable, DataError};

/// R1 vs R2 per (system, method) with an equal-aspect diagonal spanning the
/// observed range plus 5% on both ends.
pub fn bond_scatter(bonds: &BondTable) -> Result<PlotSpec, DataError> {
    let range = Range::of(
        bonds
            .records
            .iter()
            .flat_map(|rec| [rec.r1, rec.r2]),
    )
    .ok_or(DataError::DegenerateFit)?
    .padded(0.05);

    let mut spec = PlotSpec::new("TS bond lengths", range, range);
    spec.x_label = "R1 (Å)".into();
    spec.y_label = "R2 (Å)".into();
    spec.equal_aspect = true;

    spec.items.push(PlotItem::Line {
        label: Some("R1 = R2".into()),
        points: vec![(range.min, range.min), (range.max, range.max)],
        color_index: 1,
        style: LineStyle::Dashed,
    });

    for (idx, method) in bonds.methods().into_iter().enumerate() {
        let points = bonds
            .records
            .iter()
            .filter(|rec| rec.method == method)
            .map(|rec| (rec.r1, rec.r2))
            .collect();
        spec.items.push(PlotItem::Points(Series {
            label: method,
            points,
            color_index: idx,
            shape: MarkerShape::cycle(idx),
        }));
    }

    Ok(spec)
}

/// Sequential heatmap of |R1 - R2| per (system, method). Fails loudly on
/// duplicate pairs instead of dropping them.
pub fn asynchronicity_heatmap(bonds: &BondTable) -> Result<PlotSpec, DataError> {
    let matrix = asynchronicity(bonds)?;
    let mut spec = PlotSpec::new(
        "Asynchronicity |R1 - R2| (Å)",
        Range::new(0.0, matrix.col_labels.len().max(1) as f64),
        Range::new(0.0, matrix.row_labels.len().max(1) as f64),
    );
    spec.items.push(PlotItem::HeatMap {
        matrix,
        scale: HeatScale::Sequential,
    });
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BondRecord;
    use approx::assert_relative_eq;

    fn bonds() -> BondTable {
        BondTable::new(vec![
            BondRecord {
                system: "TS1".into(),
                method: "A".into(),
                r1: 2.0,
                r2: 2.4,
            },
            BondRecord {
                system: "TS2".into(),
                method: "A".into(),
                r1: 1.8,
                r2: 2.2,
            },
            BondRecord {
                system: "TS1".into(),
                method: "B".into(),
                r1: 2.1,
                r2: 2.1,
            },
        ])
    }

    #[test]
    fn scatter_diagonal_spans_the_observed_range_plus_five_percent() {
        let spec = bond_scatter(&bonds()).unwrap();
        assert!(spec.equal_aspect);
        // observed range is 1.8..2.4, span 0.6
        assert_relative_eq!(spec.x_range.min, 1.8 - 0.03);
        assert_relative_eq!(spec.x_range.max, 2.4 + 0.03);
        assert_eq!(spec.x_range, spec.y_range);

        let diag = spec
            .items
            .iter()
            .find_map(|item| match item {
                PlotItem::Line { points, style, .. } if *style == LineStyle::Dashed => {
                    Some(points.clone())
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(diag.first().copied(), Some((spec.x_range.min, spec.x_range.min)));
        assert_eq!(diag.last().copied(), Some((spec.x_range.max, spec.x_range.max)));
    }

    #[test]
    fn scatter_groups_one_series_per_method() {
        let spec = bond_scatter(&bonds()).unwrap();
        let labels: Vec<String> = spec
            .items
            .iter()
            .filter_map(|item| match item {
                PlotItem::Points(s) => Some(s.label.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn empty_bond_table_cannot_render() {
        assert!(bond_scatter(&BondTable::default()).is_err());
    }

    #[test]
    fn heatmap_carries_the_asynchronicity_matrix() {
        let spec = asynchronicity_heatmap(&bonds()).unwrap();
        let (matrix, scale) = spec.heatmap().unwrap();
        assert_eq!(scale, HeatScale::Sequential);
        assert_relative_eq!(matrix.values[0][0], 0.4);
        assert_relative_eq!(matrix.values[0][1], 0.0);
        assert!(matrix.values[1][1].is_nan()); // no (TS2, B) record
    }
}
