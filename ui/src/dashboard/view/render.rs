use core::plot::{PlotItem, PlotSpec};
use gpui::{Context, Div, Render, SharedString, Window, div, prelude::*, px, rgb};

use crate::theme::Palette;

use super::super::canvas::plot_canvas;
use super::overlays::settings::settings_overlay;
use super::sections::{footer::dashboard_footer, header::dashboard_header, sidebar::sidebar_panel};
use super::widgets::{legend_swatch, stat_row};
use super::DashboardView;

impl Render for DashboardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let palette = self.theme.palette();

        let header = dashboard_header(self, cx, &palette);
        let sidebar = sidebar_panel(self, cx, &palette);
        let content = build_content(self, &palette);
        let footer = dashboard_footer(self.status_line(), &palette);
        let settings = settings_overlay(self, cx, &palette);

        let main_column = div()
            .flex()
            .flex_col()
            .flex_1()
            .min_w(px(0.))
            .gap_3()
            .p_3()
            .child(content);

        let body = div()
            .flex()
            .flex_1()
            .w_full()
            .min_h(px(520.))
            .child(sidebar)
            .child(main_column);

        let root = div()
            .flex()
            .flex_col()
            .w_full()
            .h_full()
            .bg(rgb(palette.bg))
            .text_color(rgb(palette.text))
            .child(header)
            .child(body)
            .child(footer);

        let mut layered = div().relative().w_full().h_full().child(root);
        if let Some(settings) = settings {
            layered = layered.child(settings);
        }
        layered
    }
}

fn build_content(view: &DashboardView, palette: &Palette) -> Div {
    match view.active_spec() {
        Ok(None) => overview_panel(view, palette),
        Ok(Some(spec)) => chart_panel(view, &spec, palette),
        Err(err) => error_panel(err.to_string(), palette),
    }
}

fn overview_panel(view: &DashboardView, palette: &Palette) -> Div {
    let systems = view.systems();
    let methods = view.methods();
    let bond_records = view
        .bonds
        .as_ref()
        .map(|b| b.systems().len() * b.methods().len())
        .unwrap_or(0);

    let summary = div()
        .bg(rgb(palette.panel))
        .border_1()
        .border_color(rgb(palette.border))
        .rounded_md()
        .p_4()
        .flex()
        .flex_col()
        .gap_2()
        .max_w(px(520.))
        .child(div().text_sm().text_color(rgb(palette.muted)).child("Loaded data"))
        .child(stat_row("Systems", systems.len().to_string(), palette))
        .child(stat_row("Methods", methods.len().to_string(), palette))
        .child(stat_row(
            "Benchmark",
            view.benchmark.clone().unwrap_or_else(|| "-".to_string()),
            palette,
        ))
        .child(stat_row("Bond pairs", bond_records.to_string(), palette));

    let hint = if view.energy.is_none() && view.bonds.is_none() {
        "No tables loaded. Load files from the command line or use the sample data button."
    } else {
        "Pick a chart from the sidebar. Benchmark and reference selections live in Settings."
    };

    div()
        .flex_1()
        .flex()
        .flex_col()
        .gap_3()
        .child(div().text_lg().child("Benchmark overview"))
        .child(summary)
        .child(div().text_sm().text_color(rgb(palette.muted)).child(hint))
}

fn error_panel(message: String, palette: &Palette) -> Div {
    div()
        .flex_1()
        .flex()
        .flex_col()
        .items_center()
        .justify_center()
        .gap_4()
        .child(div().text_lg().child("Chart unavailable"))
        .child(
            div()
                .max_w(px(640.))
                .p_4()
                .rounded_md()
                .bg(rgb(palette.panel_alt))
                .border_1()
                .border_color(rgb(palette.border))
                .text_sm()
                .child(message),
        )
}

fn chart_panel(view: &DashboardView, spec: &PlotSpec, palette: &Palette) -> Div {
    let title_row = div()
        .flex()
        .items_center()
        .justify_between()
        .child(div().text_lg().child(SharedString::from(spec.title.clone())))
        .child(
            div()
                .text_xs()
                .text_color(rgb(palette.muted))
                .child(SharedString::from(format!(
                    "{} vs {}",
                    spec.y_label, spec.x_label
                ))),
        );

    let mut column = div()
        .flex_1()
        .flex()
        .flex_col()
        .gap_2()
        .child(title_row);

    if let Some(legend) = legend_row(spec, palette) {
        column = column.child(legend);
    }
    for note in note_lines(spec) {
        column = column.child(
            div()
                .text_xs()
                .text_color(rgb(palette.highlight))
                .child(note),
        );
    }

    let chart = plot_canvas(spec.clone(), *palette, view.marker.canvas_px())
        .flex_1()
        .w_full()
        .h_full();

    let chart_row = div()
        .flex_1()
        .flex()
        .w_full()
        .min_h(px(320.))
        .child(y_axis(spec, palette))
        .child(
            div()
                .flex_1()
                .w_full()
                .h_full()
                .relative()
                .border_1()
                .border_color(rgb(palette.border))
                .rounded_md()
                .child(chart),
        );

    column.child(chart_row).child(x_axis(spec, palette))
}

fn y_axis(spec: &PlotSpec, palette: &Palette) -> Div {
    let labels: [String; 3] = if let Some((matrix, _)) = spec.heatmap() {
        let rows = &matrix.row_labels;
        [
            rows.first().cloned().unwrap_or_default(),
            rows.get(rows.len() / 2).cloned().unwrap_or_default(),
            rows.last().cloned().unwrap_or_default(),
        ]
    } else {
        let (min, max) = (spec.y_range.min, spec.y_range.max);
        [
            format!("{max:.2}"),
            format!("{:.2}", (min + max) * 0.5),
            format!("{min:.2}"),
        ]
    };

    div()
        .w(px(92.))
        .h_full()
        .flex()
        .flex_col()
        .justify_between()
        .items_end()
        .px_2()
        .text_xs()
        .text_color(rgb(palette.muted))
        .child(labels[0].clone())
        .child(labels[1].clone())
        .child(labels[2].clone())
}

fn x_axis(spec: &PlotSpec, palette: &Palette) -> Div {
    let labels: [String; 3] = if let Some((matrix, _)) = spec.heatmap() {
        let cols = &matrix.col_labels;
        [
            cols.first().cloned().unwrap_or_default(),
            cols.get(cols.len() / 2).cloned().unwrap_or_default(),
            cols.last().cloned().unwrap_or_default(),
        ]
    } else if let Some(ticks) = &spec.x_ticks {
        [
            ticks.first().map(|(_, l)| l.clone()).unwrap_or_default(),
            ticks
                .get(ticks.len() / 2)
                .map(|(_, l)| l.clone())
                .unwrap_or_default(),
            ticks.last().map(|(_, l)| l.clone()).unwrap_or_default(),
        ]
    } else {
        let (min, max) = (spec.x_range.min, spec.x_range.max);
        [
            format!("{min:.2}"),
            format!("{:.2}", (min + max) * 0.5),
            format!("{max:.2}"),
        ]
    };

    div()
        .h(px(28.))
        .pl(px(92.))
        .pr_3()
        .flex()
        .items_center()
        .justify_between()
        .text_xs()
        .text_color(rgb(palette.muted))
        .bg(rgb(palette.panel))
        .child(labels[0].clone())
        .child(labels[1].clone())
        .child(labels[2].clone())
}

/// Legend built from labelled items; the canvas itself never draws text.
fn legend_row(spec: &PlotSpec, palette: &Palette) -> Option<Div> {
    let mut entries: Vec<(u32, String)> = Vec::new();
    for item in &spec.items {
        match item {
            PlotItem::Points(series) => {
                entries.push((palette.series_color(series.color_index), series.label.clone()));
            }
            PlotItem::Line {
                label: Some(label),
                color_index,
                ..
            } => {
                entries.push((palette.series_color(*color_index), label.clone()));
            }
            PlotItem::HLine { label: Some(label), .. }
            | PlotItem::VLine { label: Some(label), .. } => {
                entries.push((palette.muted, label.clone()));
            }
            _ => {}
        }
    }
    if entries.is_empty() {
        return None;
    }

    let mut row = div().flex().flex_wrap().items_center().gap_3().text_xs();
    for (color, label) in entries {
        row = row.child(
            div()
                .flex()
                .items_center()
                .gap_1()
                .text_color(rgb(palette.muted))
                .child(legend_swatch(color))
                .child(label),
        );
    }
    Some(row)
}

fn note_lines(spec: &PlotSpec) -> Vec<String> {
    spec.items
        .iter()
        .filter_map(|item| match item {
            PlotItem::Note { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::charts::method_regression;
    use core::sample_energy_table_seeded;

    #[test]
    fn regression_legend_includes_fit_and_diagonal() {
        let energy = sample_energy_table_seeded(2);
        let spec = method_regression(&energy, "DLPNO-CCSD(T)", "M06-2X").unwrap();
        let palette = crate::theme::ThemeKind::Dark.palette();
        assert!(legend_row(&spec, &palette).is_some());
        assert_eq!(note_lines(&spec).len(), 1);
    }
}
