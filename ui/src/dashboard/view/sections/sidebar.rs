use gpui::{Context, Div, MouseButton, MouseDownEvent, div, prelude::*, px, rgb};

use crate::components::button_effect;
use crate::dashboard::view::widgets::stat_row;
use crate::dashboard::view::{DashboardView, Page};
use crate::theme::Palette;

const SIDEBAR_WIDTH: f32 = 240.0;

pub(crate) fn sidebar_panel(
    view: &mut DashboardView,
    cx: &mut Context<DashboardView>,
    palette: &Palette,
) -> Div {
    div()
        .w(px(SIDEBAR_WIDTH))
        .bg(rgb(palette.bg))
        .border_r_1()
        .border_color(rgb(palette.border))
        .p_3()
        .flex()
        .flex_col()
        .gap_3()
        .child(nav_panel(view, cx, palette))
        .child(data_panel(view, cx, palette))
}

fn nav_panel(
    view: &mut DashboardView,
    cx: &mut Context<DashboardView>,
    palette: &Palette,
) -> Div {
    let mut list = div()
        .flex()
        .flex_col()
        .gap_2()
        .min_w(px(0.))
        .id("page-list")
        .overflow_y_scroll();

    for &page in Page::ALL {
        let available = view.page_available(page);
        let active = view.page == page;
        let row_id: gpui::SharedString = format!("page-row-{}", page.label()).into();

        let bg = if active { palette.panel_alt } else { palette.panel };
        let text_color = if available { palette.text } else { palette.muted };
        let border = if active { palette.accent } else { palette.border };

        let row = div()
            .px_3()
            .py_2()
            .rounded_md()
            .bg(rgb(bg))
            .border_1()
            .border_color(rgb(border))
            .text_sm()
            .text_color(rgb(text_color))
            .child(page.label());

        if available {
            let handler = cx.listener(
                move |this: &mut DashboardView, _: &MouseDownEvent, window, _| {
                    this.set_page(page);
                    window.refresh();
                },
            );
            let label = page.label();
            list = list.child(button_effect::apply(
                row.on_mouse_down(MouseButton::Left, handler)
                    .id(row_id)
                    .debug_selector(move || format!("page-row-{label}")),
                bg,
            ));
        } else {
            list = list.child(row);
        }
    }

    div()
        .bg(rgb(palette.bg))
        .border_1()
        .border_color(rgb(palette.border))
        .rounded_md()
        .p_3()
        .flex()
        .flex_col()
        .gap_3()
        .child(
            div()
                .text_sm()
                .text_color(rgb(palette.text))
                .child("Charts"),
        )
        .child(list)
}

fn data_panel(
    view: &mut DashboardView,
    cx: &mut Context<DashboardView>,
    palette: &Palette,
) -> Div {
    let load_sample = cx.listener(|this: &mut DashboardView, _: &MouseDownEvent, window, _| {
        this.load_sample_data();
        window.refresh();
    });

    let energy_label = if view.energy.is_some() {
        view.energy_source.clone()
    } else {
        "-".to_string()
    };
    let bond_label = if view.bonds.is_some() {
        view.bond_source.clone()
    } else {
        "-".to_string()
    };

    div()
        .bg(rgb(palette.bg))
        .border_1()
        .border_color(rgb(palette.border))
        .rounded_md()
        .p_3()
        .flex()
        .flex_col()
        .gap_2()
        .child(
            div()
                .flex()
                .items_center()
                .justify_between()
                .child(div().text_sm().text_color(rgb(palette.text)).child("Data"))
                .child(button_effect::apply(
                    div()
                        .px_2()
                        .py_1()
                        .rounded_md()
                        .bg(rgb(palette.panel_alt))
                        .text_xs()
                        .text_color(rgb(palette.muted))
                        .on_mouse_down(MouseButton::Left, load_sample)
                        .child("Sample")
                        .id("data-sample")
                        .debug_selector(|| "data-sample".to_string()),
                    palette.panel_alt,
                )),
        )
        .child(stat_row("Energies", energy_label, palette))
        .child(stat_row("Bonds", bond_label, palette))
        .child(stat_row("Systems", view.systems().len().to_string(), palette))
        .child(stat_row("Methods", view.methods().len().to_string(), palette))
}
