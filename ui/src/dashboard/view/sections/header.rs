use gpui::{Context, Div, MouseButton, MouseDownEvent, SharedString, div, prelude::*, rgb};

use crate::components::button_effect;
use crate::dashboard::view::DashboardView;
use crate::dashboard::view::widgets::header_chip;
use crate::theme::Palette;

pub(crate) fn dashboard_header(
    view: &mut DashboardView,
    cx: &mut Context<DashboardView>,
    palette: &Palette,
) -> Div {
    let open_settings = cx.listener(|this: &mut DashboardView, _: &MouseDownEvent, window, _| {
        this.settings_open = !this.settings_open;
        window.refresh();
    });
    let export_chart = cx.listener(|this: &mut DashboardView, _: &MouseDownEvent, window, _| {
        this.export_active_chart();
        window.refresh();
    });

    let page_label = SharedString::from(view.page.label());

    div()
        .flex()
        .justify_between()
        .items_center()
        .p_3()
        .bg(rgb(palette.panel_alt))
        .border_b_1()
        .border_color(rgb(palette.border))
        .child(
            div()
                .flex()
                .items_center()
                .gap_3()
                .child(div().text_lg().child("benchlab"))
                .child(
                    div()
                        .text_sm()
                        .text_color(rgb(palette.muted))
                        .child(page_label),
                ),
        )
        .child(
            div()
                .flex()
                .items_center()
                .gap_2()
                .child(button_effect::apply(
                    header_chip("Export SVG", palette)
                        .on_mouse_down(MouseButton::Left, export_chart)
                        .id("header-export"),
                    palette.panel_alt,
                ))
                .child(button_effect::apply(
                    header_chip("Settings", palette)
                        .on_mouse_down(MouseButton::Left, open_settings)
                        .id("header-settings"),
                    palette.panel_alt,
                )),
        )
}
