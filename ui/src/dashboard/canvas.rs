use core::plot::{LineStyle, MarkerShape, PlotItem, PlotSpec, ZoneTint};
use gpui::{
    BorderStyle, Bounds, Canvas, PathBuilder, canvas, point, px, quad, rgb, rgba, size,
    transparent_black,
};

use crate::theme::Palette;

const DASH_LEN: f32 = 6.0;
const GAP_LEN: f32 = 4.0;
const ZONE_ALPHA: u32 = 0x22;

/// Paints one chart spec into a gpui canvas. Axis labels, legends, and notes
/// are rendered as regular elements around the canvas, not in here.
pub(super) fn plot_canvas(spec: PlotSpec, palette: Palette, marker_px: f32) -> Canvas<PlotSpec> {
    canvas(
        move |_, _, _| spec.clone(),
        move |bounds, spec, window, _| {
            window.paint_quad(quad(
                bounds,
                px(0.),
                rgb(palette.bg),
                px(0.),
                transparent_black(),
                BorderStyle::default(),
            ));

            let mut width = f32::from(bounds.size.width);
            let mut height = f32::from(bounds.size.height);
            let mut ox = f32::from(bounds.origin.x);
            let mut oy = f32::from(bounds.origin.y);
            if width <= 0.0 || height <= 0.0 {
                return;
            }

            if spec.equal_aspect {
                let side = width.min(height);
                ox += (width - side) * 0.5;
                oy += (height - side) * 0.5;
                width = side;
                height = side;
            }

            let x_span = spec.x_range.span().max(1e-12);
            let y_span = spec.y_range.span().max(1e-12);
            let to_x = |x: f64| -> f32 {
                let t = ((x - spec.x_range.min) / x_span).clamp(0.0, 1.0);
                ox + t as f32 * width
            };
            let to_y = |y: f64| -> f32 {
                let t = ((y - spec.y_range.min) / y_span).clamp(0.0, 1.0);
                oy + (1.0 - t as f32) * height
            };

            if let Some((matrix, scale)) = spec.heatmap() {
                paint_heatmap(window, &palette, matrix, scale, ox, oy, width, height);
                return;
            }

            // gridlines (min/mid/max)
            for frac in [0.0f32, 0.5, 1.0] {
                let y = oy + height * (1.0 - frac);
                let mut builder = PathBuilder::stroke(px(1.));
                builder.move_to(point(px(ox), px(y)));
                builder.line_to(point(px(ox + width), px(y)));
                if let Ok(path) = builder.build() {
                    window.paint_path(path, rgb(palette.border));
                }
            }

            for item in &spec.items {
                match item {
                    PlotItem::Zone { x0, x1, y0, y1, tint } => {
                        let fill = match tint {
                            ZoneTint::Safe => palette.safe,
                            ZoneTint::Warn => palette.warn,
                            ZoneTint::Fail => palette.fail,
                        };
                        let left = to_x(*x0);
                        let top = to_y(*y1);
                        let zone_bounds = Bounds {
                            origin: point(px(left), px(top)),
                            size: size(px(to_x(*x1) - left), px(to_y(*y0) - top)),
                        };
                        window.paint_quad(quad(
                            zone_bounds,
                            px(0.),
                            rgba((fill << 8) | ZONE_ALPHA),
                            px(0.),
                            transparent_black(),
                            BorderStyle::default(),
                        ));
                    }
                    PlotItem::HLine { y, style, .. } => {
                        let y = to_y(*y);
                        paint_line(
                            window,
                            (ox, y),
                            (ox + width, y),
                            palette.muted,
                            *style,
                        );
                    }
                    PlotItem::VLine { x, style, .. } => {
                        let x = to_x(*x);
                        paint_line(
                            window,
                            (x, oy),
                            (x, oy + height),
                            palette.muted,
                            *style,
                        );
                    }
                    PlotItem::Line {
                        points,
                        color_index,
                        style,
                        ..
                    } => {
                        let color = palette.series_color(*color_index);
                        for window_pair in points.windows(2) {
                            paint_line(
                                window,
                                (to_x(window_pair[0].0), to_y(window_pair[0].1)),
                                (to_x(window_pair[1].0), to_y(window_pair[1].1)),
                                color,
                                *style,
                            );
                        }
                    }
                    PlotItem::Points(series) => {
                        let color = palette.series_color(series.color_index);
                        for &(x, y) in &series.points {
                            paint_marker(
                                window,
                                series.shape,
                                to_x(x),
                                to_y(y),
                                marker_px,
                                color,
                            );
                        }
                    }
                    PlotItem::HeatMap { .. } | PlotItem::Note { .. } => {}
                }
            }
        },
    )
}

fn paint_heatmap(
    window: &mut gpui::Window,
    palette: &Palette,
    matrix: &core::Matrix,
    scale: core::plot::HeatScale,
    ox: f32,
    oy: f32,
    width: f32,
    height: f32,
) {
    let rows = matrix.row_labels.len();
    let cols = matrix.col_labels.len();
    if rows == 0 || cols == 0 {
        return;
    }
    let (min, max) = matrix.min_max().unwrap_or((0.0, 1.0));
    let cell_w = width / cols as f32;
    let cell_h = height / rows as f32;

    for (i, row) in matrix.values.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            let color = palette.heat_color(value, scale, min, max);
            let cell_bounds = Bounds {
                origin: point(
                    px(ox + j as f32 * cell_w),
                    px(oy + i as f32 * cell_h),
                ),
                size: size(px((cell_w - 1.0).max(1.0)), px((cell_h - 1.0).max(1.0))),
            };
            window.paint_quad(quad(
                cell_bounds,
                px(0.),
                rgb(color),
                px(0.),
                transparent_black(),
                BorderStyle::default(),
            ));
        }
    }
}

fn paint_line(
    window: &mut gpui::Window,
    from: (f32, f32),
    to: (f32, f32),
    color: u32,
    style: LineStyle,
) {
    match style {
        LineStyle::Solid => {
            let mut builder = PathBuilder::stroke(px(1.5));
            builder.move_to(point(px(from.0), px(from.1)));
            builder.line_to(point(px(to.0), px(to.1)));
            if let Ok(path) = builder.build() {
                window.paint_path(path, rgb(color));
            }
        }
        LineStyle::Dashed => {
            let dx = to.0 - from.0;
            let dy = to.1 - from.1;
            let len = (dx * dx + dy * dy).sqrt();
            if len <= f32::EPSILON {
                return;
            }
            let (ux, uy) = (dx / len, dy / len);
            let mut builder = PathBuilder::stroke(px(1.5));
            let mut t = 0.0f32;
            while t < len {
                let t_end = (t + DASH_LEN).min(len);
                builder.move_to(point(px(from.0 + ux * t), px(from.1 + uy * t)));
                builder.line_to(point(px(from.0 + ux * t_end), px(from.1 + uy * t_end)));
                t = t_end + GAP_LEN;
            }
            if let Ok(path) = builder.build() {
                window.paint_path(path, rgb(color));
            }
        }
    }
}

fn paint_marker(
    window: &mut gpui::Window,
    shape: MarkerShape,
    x: f32,
    y: f32,
    size_px: f32,
    color: u32,
) {
    let half = size_px * 0.5;
    match shape {
        MarkerShape::Circle | MarkerShape::Square => {
            let radius = if matches!(shape, MarkerShape::Circle) {
                half
            } else {
                1.0
            };
            let marker_bounds = Bounds {
                origin: point(px(x - half), px(y - half)),
                size: size(px(size_px), px(size_px)),
            };
            window.paint_quad(quad(
                marker_bounds,
                px(radius),
                rgb(color),
                px(0.),
                transparent_black(),
                BorderStyle::default(),
            ));
        }
        MarkerShape::Diamond => {
            let mut builder = PathBuilder::fill();
            builder.move_to(point(px(x), px(y - half)));
            builder.line_to(point(px(x + half), px(y)));
            builder.line_to(point(px(x), px(y + half)));
            builder.line_to(point(px(x - half), px(y)));
            builder.close();
            if let Ok(path) = builder.build() {
                window.paint_path(path, rgb(color));
            }
        }
    }
}
