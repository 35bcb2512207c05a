use gpui::{
    Context, Div, MouseButton, MouseDownEvent, MouseMoveEvent, ScrollWheelEvent, SharedString,
    Stateful, Window, div, prelude::*, px, rgb, rgba,
};

use crate::components::button_effect;
use crate::dashboard::view::{DashboardView, MarkerSize};
use crate::theme::{Palette, ThemeKind};

fn section(title: &str, content: impl IntoElement, palette: &Palette) -> Div {
    div()
        .flex()
        .flex_col()
        .gap_2()
        .child(
            div()
                .text_sm()
                .text_color(rgb(palette.muted))
                .child(title.to_string()),
        )
        .child(content)
}

fn row(label: &str, content: impl IntoElement, palette: &Palette) -> Div {
    div()
        .flex()
        .items_center()
        .justify_between()
        .gap_3()
        .child(
            div()
                .text_sm()
                .text_color(rgb(palette.text))
                .child(label.to_string()),
        )
        .child(content)
}

fn chip_button(
    label: impl Into<SharedString>,
    active: bool,
    palette: &Palette,
    handle: impl Fn(&mut DashboardView, &MouseDownEvent, &mut Window, &mut Context<DashboardView>)
    + 'static,
    cx: &mut Context<DashboardView>,
) -> Stateful<Div> {
    let handle = cx.listener(handle);
    let label = label.into();
    let id: SharedString = format!("settings-chip-{label}").into();
    let chip = div()
        .px_3()
        .py_1()
        .rounded_md()
        .bg(rgb(palette.panel_alt))
        .border_1()
        .border_color(if active {
            rgb(palette.accent)
        } else {
            rgb(palette.border)
        })
        .text_sm()
        .text_color(rgb(palette.text))
        .child(label)
        .on_mouse_down(MouseButton::Left, handle)
        .id(id);
    button_effect::apply(chip, palette.panel_alt)
}

fn chip_group(
    options: Vec<String>,
    selected: Option<&str>,
    palette: &Palette,
    pick: impl Fn(&mut DashboardView, String) + Clone + 'static,
    cx: &mut Context<DashboardView>,
) -> Div {
    let mut group = div().flex().flex_wrap().items_center().gap_1();
    for option in options {
        let active = selected == Some(option.as_str());
        let pick = pick.clone();
        let value = option.clone();
        group = group.child(chip_button(
            option,
            active,
            palette,
            move |this, _, window, _| {
                pick(this, value.clone());
                window.refresh();
            },
            cx,
        ));
    }
    group
}

pub(crate) fn settings_overlay(
    view: &mut DashboardView,
    cx: &mut Context<DashboardView>,
    palette: &Palette,
) -> Option<Div> {
    if !view.settings_open {
        return None;
    }

    let close_panel = cx.listener(|this: &mut DashboardView, _: &MouseDownEvent, window, cx| {
        this.settings_open = false;
        cx.stop_propagation();
        window.refresh();
    });
    let close_overlay = cx.listener(|this: &mut DashboardView, _: &MouseDownEvent, window, cx| {
        this.settings_open = false;
        cx.stop_propagation();
        window.refresh();
    });
    let block_click = cx.listener(|_: &mut DashboardView, _: &MouseDownEvent, _, cx| {
        cx.stop_propagation();
    });
    let block_mouse_move = cx.listener(|_: &mut DashboardView, _: &MouseMoveEvent, _, cx| {
        cx.stop_propagation();
    });
    let block_scroll = cx.listener(|_: &mut DashboardView, _: &ScrollWheelEvent, _, cx| {
        cx.stop_propagation();
    });

    let methods = view.methods();
    let systems = view.systems();

    let benchmark_row = row(
        "Benchmark",
        chip_group(
            methods.clone(),
            view.benchmark.as_deref(),
            palette,
            |this, method| this.set_benchmark(method),
            cx,
        ),
        palette,
    );
    let comparison_row = row(
        "Comparison",
        chip_group(
            methods,
            view.comparison.as_deref(),
            palette,
            |this, method| this.set_comparison(method),
            cx,
        ),
        palette,
    );
    let reference_row = row(
        "Reference",
        chip_group(
            systems,
            view.reference_system.as_deref(),
            palette,
            |this, system| this.set_reference_system(system),
            cx,
        ),
        palette,
    );

    let theme = view.theme;
    let theme_row = row(
        "Theme",
        div()
            .flex()
            .items_center()
            .gap_1()
            .child(chip_button(
                ThemeKind::Dark.label(),
                theme == ThemeKind::Dark,
                palette,
                |this, _, window, _| {
                    this.theme = ThemeKind::Dark;
                    window.refresh();
                },
                cx,
            ))
            .child(chip_button(
                ThemeKind::Light.label(),
                theme == ThemeKind::Light,
                palette,
                |this, _, window, _| {
                    this.theme = ThemeKind::Light;
                    window.refresh();
                },
                cx,
            )),
        palette,
    );

    let marker = view.marker;
    let mut marker_group = div().flex().items_center().gap_1();
    for option in [MarkerSize::Small, MarkerSize::Medium, MarkerSize::Large] {
        marker_group = marker_group.child(chip_button(
            option.label(),
            marker == option,
            palette,
            move |this, _, window, _| {
                this.marker = option;
                window.refresh();
            },
            cx,
        ));
    }
    let marker_row = row("Markers", marker_group, palette);

    let reset_row = row(
        "Defaults",
        chip_button(
            "Reset",
            false,
            palette,
            |this, _, window, _| {
                this.reset_settings();
                window.refresh();
            },
            cx,
        ),
        palette,
    );

    let panel = div()
        .w(px(420.))
        .bg(rgb(palette.bg))
        .border_1()
        .border_color(rgb(palette.border))
        .rounded_md()
        .p_4()
        .flex()
        .flex_col()
        .gap_4()
        .on_mouse_down(MouseButton::Left, block_click)
        .child(
            div()
                .flex()
                .items_center()
                .justify_between()
                .child(
                    div()
                        .text_lg()
                        .text_color(rgb(palette.text))
                        .child("Settings"),
                )
                .child(button_effect::apply(
                    div()
                        .px_2()
                        .py_1()
                        .rounded_md()
                        .bg(rgb(palette.panel_alt))
                        .border_1()
                        .border_color(rgb(palette.border))
                        .text_sm()
                        .text_color(rgb(palette.text))
                        .on_mouse_down(MouseButton::Left, close_panel)
                        .child("Close")
                        .id("settings-close"),
                    palette.panel_alt,
                )),
        )
        .child(section(
            "Analysis",
            div()
                .flex()
                .flex_col()
                .gap_3()
                .child(benchmark_row)
                .child(comparison_row)
                .child(reference_row),
            palette,
        ))
        .child(section(
            "Appearance",
            div()
                .flex()
                .flex_col()
                .gap_3()
                .child(theme_row)
                .child(marker_row),
            palette,
        ))
        .child(section(
            "Actions",
            div().flex().flex_col().gap_3().child(reset_row),
            palette,
        ));

    Some(
        div()
            .absolute()
            .left(px(0.))
            .top(px(0.))
            .w_full()
            .h_full()
            .bg(rgba(0x00000000))
            .on_mouse_down(MouseButton::Left, close_overlay)
            .on_mouse_move(block_mouse_move)
            .on_scroll_wheel(block_scroll)
            .child(div().absolute().right(px(16.)).top(px(68.)).child(panel)),
    )
}
