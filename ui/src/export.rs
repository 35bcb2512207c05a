use std::path::Path;

use anyhow::{Context, Result};
use core::plot::{LineStyle, MarkerShape, PlotItem, PlotSpec, ZoneTint};
use plotters::prelude::*;

use crate::theme::{Palette, ThemeKind};

/// Fixed export resolution; the original dashboard exported at 1600 wide for a
/// consistent aspect ratio.
pub const EXPORT_SIZE: (u32, u32) = (1600, 900);

const ZONE_OPACITY: f64 = 0.08;
const DASH_COUNT: usize = 28;

/// Renders one or more chart specs stacked into a single SVG at the fixed
/// target resolution.
pub fn export_svg(
    specs: &[PlotSpec],
    theme: ThemeKind,
    marker: i32,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    if specs.is_empty() {
        anyhow::bail!("nothing to export");
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating export dir {}", parent.display()))?;
        }
    }

    let palette = theme.palette();
    let root = SVGBackend::new(path, EXPORT_SIZE).into_drawing_area();
    root.fill(&color(palette.bg))?;

    let panels = root.split_evenly((specs.len(), 1));
    for (spec, panel) in specs.iter().zip(panels.iter()) {
        if spec.heatmap().is_some() {
            render_heatmap(spec, panel, &palette)?;
        } else {
            render_xy(spec, panel, &palette, marker)?;
        }
    }

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn render_xy(
    spec: &PlotSpec,
    panel: &DrawingArea<SVGBackend, plotters::coord::Shift>,
    palette: &Palette,
    marker: i32,
) -> Result<()> {
    let text = color(palette.text);
    let muted = color(palette.muted);
    let border = color(palette.border);

    let mut chart = ChartBuilder::on(panel)
        .caption(&spec.title, ("sans-serif", 26).into_font().color(&text))
        .margin(14)
        .x_label_area_size(44)
        .y_label_area_size(64)
        .build_cartesian_2d(
            spec.x_range.min..spec.x_range.max,
            spec.y_range.min..spec.y_range.max,
        )?;

    let ticks = spec.x_ticks.clone();
    let x_formatter = move |v: &f64| -> String {
        match &ticks {
            Some(ticks) => ticks
                .iter()
                .find(|(pos, _)| (pos - v).abs() < 0.5)
                .map(|(_, label)| label.clone())
                .unwrap_or_default(),
            None => format!("{v:.1}"),
        }
    };

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&spec.x_label)
        .y_desc(&spec.y_label)
        .label_style(("sans-serif", 16).into_font().color(&muted))
        .axis_style(border)
        .light_line_style(color(palette.panel))
        .bold_line_style(color(palette.border).mix(0.5))
        .x_label_formatter(&x_formatter);
    if let Some(ticks) = &spec.x_ticks {
        mesh.x_labels(ticks.len().max(2));
    }
    mesh.draw()?;

    let mut labelled = false;
    for item in &spec.items {
        match item {
            PlotItem::Zone { x0, x1, y0, y1, tint } => {
                let fill = match tint {
                    ZoneTint::Safe => palette.safe,
                    ZoneTint::Warn => palette.warn,
                    ZoneTint::Fail => palette.fail,
                };
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(*x0, *y0), (*x1, *y1)],
                    color(fill).mix(ZONE_OPACITY).filled(),
                )))?;
            }
            PlotItem::HLine { y, style, .. } => {
                draw_styled_line(
                    &mut chart,
                    (spec.x_range.min, *y),
                    (spec.x_range.max, *y),
                    muted,
                    *style,
                )?;
            }
            PlotItem::VLine { x, style, .. } => {
                draw_styled_line(
                    &mut chart,
                    (*x, spec.y_range.min),
                    (*x, spec.y_range.max),
                    muted,
                    *style,
                )?;
            }
            PlotItem::Line {
                points,
                color_index,
                style,
                label,
            } => {
                let line_color = color(palette.series_color(*color_index));
                match style {
                    LineStyle::Solid => {
                        let series = chart.draw_series(std::iter::once(PathElement::new(
                            points.clone(),
                            line_color.stroke_width(2),
                        )))?;
                        if let Some(label) = label {
                            labelled = true;
                            let legend_color = line_color;
                            series.label(label).legend(move |(x, y)| {
                                PathElement::new(
                                    vec![(x, y), (x + 16, y)],
                                    legend_color.stroke_width(2),
                                )
                            });
                        }
                    }
                    LineStyle::Dashed => {
                        for window in points.windows(2) {
                            draw_styled_line(
                                &mut chart,
                                window[0],
                                window[1],
                                line_color,
                                LineStyle::Dashed,
                            )?;
                        }
                    }
                }
            }
            PlotItem::Points(series) => {
                labelled = true;
                let fill = color(palette.series_color(series.color_index));
                let style = fill.filled();
                let anno = match series.shape {
                    MarkerShape::Circle => chart.draw_series(
                        series
                            .points
                            .iter()
                            .map(|&(x, y)| Circle::new((x, y), marker, style)),
                    )?,
                    MarkerShape::Square => {
                        chart.draw_series(series.points.iter().map(|&(x, y)| {
                            EmptyElement::at((x, y))
                                + Rectangle::new([(-marker, -marker), (marker, marker)], style)
                        }))?
                    }
                    MarkerShape::Diamond => {
                        chart.draw_series(series.points.iter().map(|&(x, y)| {
                            EmptyElement::at((x, y))
                                + Polygon::new(
                                    vec![(0, -marker), (marker, 0), (0, marker), (-marker, 0)],
                                    style,
                                )
                        }))?
                    }
                };
                anno.label(&series.label)
                    .legend(move |(x, y)| Circle::new((x, y), 5, fill.filled()));
            }
            PlotItem::HeatMap { .. } => {}
            PlotItem::Note { frac, text } => {
                let x = spec.x_range.min + spec.x_range.span() * frac.0 as f64;
                let y = spec.y_range.max - spec.y_range.span() * frac.1 as f64;
                chart.draw_series(std::iter::once(Text::new(
                    text.clone(),
                    (x, y),
                    ("sans-serif", 18).into_font().color(&color(palette.text)),
                )))?;
            }
        }
    }

    if labelled {
        chart
            .configure_series_labels()
            .border_style(border)
            .background_style(color(palette.panel).mix(0.85))
            .label_font(("sans-serif", 16).into_font().color(&text))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    Ok(())
}

fn render_heatmap(
    spec: &PlotSpec,
    panel: &DrawingArea<SVGBackend, plotters::coord::Shift>,
    palette: &Palette,
) -> Result<()> {
    let Some((matrix, scale)) = spec.heatmap() else {
        return Ok(());
    };
    let rows = matrix.row_labels.len();
    let cols = matrix.col_labels.len();
    let (min, max) = matrix.min_max().unwrap_or((0.0, 1.0));

    let text = color(palette.text);
    let muted = color(palette.muted);

    let mut chart = ChartBuilder::on(panel)
        .caption(&spec.title, ("sans-serif", 26).into_font().color(&text))
        .margin(14)
        .x_label_area_size(60)
        .y_label_area_size(120)
        .build_cartesian_2d(0.0..cols.max(1) as f64, 0.0..rows.max(1) as f64)?;

    let col_labels = matrix.col_labels.clone();
    let row_labels = matrix.row_labels.clone();
    let x_formatter = move |v: &f64| -> String {
        let idx = v.floor() as usize;
        col_labels.get(idx).cloned().unwrap_or_default()
    };
    // row 0 is drawn at the top
    let y_formatter = move |v: &f64| -> String {
        let idx = rows.saturating_sub(1 + v.floor() as usize);
        row_labels.get(idx).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(cols.max(1))
        .y_labels(rows.max(1))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .label_style(("sans-serif", 15).into_font().color(&muted))
        .axis_style(color(palette.border))
        .draw()?;

    chart.draw_series(matrix.values.iter().enumerate().flat_map(|(i, row)| {
        row.iter().enumerate().map(move |(j, &v)| {
            let cell = palette.heat_color(v, scale, min, max);
            Rectangle::new(
                [
                    (j as f64, (rows - 1 - i) as f64),
                    (j as f64 + 1.0, (rows - i) as f64),
                ],
                color(cell).filled(),
            )
        })
    }))?;

    Ok(())
}

type XyChart<'a, 'b> = ChartContext<
    'a,
    SVGBackend<'b>,
    Cartesian2d<plotters::coord::types::RangedCoordf64, plotters::coord::types::RangedCoordf64>,
>;

fn draw_styled_line(
    chart: &mut XyChart,
    from: (f64, f64),
    to: (f64, f64),
    line_color: RGBColor,
    style: LineStyle,
) -> Result<()> {
    match style {
        LineStyle::Solid => {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![from, to],
                line_color.stroke_width(2),
            )))?;
        }
        LineStyle::Dashed => {
            for seg in dash_segments(from, to) {
                chart.draw_series(std::iter::once(PathElement::new(
                    seg,
                    line_color.stroke_width(2),
                )))?;
            }
        }
    }
    Ok(())
}

/// Breaks a segment into evenly spaced dashes in data coordinates.
fn dash_segments(from: (f64, f64), to: (f64, f64)) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::with_capacity(DASH_COUNT);
    let step = 1.0 / (DASH_COUNT * 2) as f64;
    for i in 0..DASH_COUNT {
        let t0 = 2.0 * i as f64 * step;
        let t1 = t0 + step;
        let at = |t: f64| {
            (
                from.0 + (to.0 - from.0) * t,
                from.1 + (to.1 - from.1) * t,
            )
        };
        out.push(vec![at(t0), at(t1)]);
    }
    out
}

fn color(hex: u32) -> RGBColor {
    RGBColor(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::charts::{Tolerances, absolute_error_distribution, diagnostic_map, signed_error_heatmap};
    use core::{sample_bond_table_seeded, sample_energy_table_seeded};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path() -> std::path::PathBuf {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("benchlab-export-{nonce}.svg"))
    }

    #[test]
    fn exports_a_scatter_and_a_heatmap_stacked() {
        let energy = sample_energy_table_seeded(3);
        let specs = vec![
            absolute_error_distribution(&energy, "DLPNO-CCSD(T)").unwrap(),
            signed_error_heatmap(&energy, "DLPNO-CCSD(T)").unwrap(),
        ];

        let path = temp_path();
        export_svg(&specs, ThemeKind::Dark, 5, &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("1600"));
    }

    #[test]
    fn exports_the_diagnostic_map_with_zones() {
        let energy = sample_energy_table_seeded(5);
        let bonds = sample_bond_table_seeded(5);
        let spec =
            diagnostic_map(&energy, &bonds, "DLPNO-CCSD(T)", Tolerances::default()).unwrap();

        let path = temp_path();
        export_svg(&[spec], ThemeKind::Light, 5, &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn refuses_an_empty_export() {
        assert!(export_svg(&[], ThemeKind::Dark, 5, temp_path()).is_err());
    }
}
