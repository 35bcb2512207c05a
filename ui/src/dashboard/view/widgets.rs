use gpui::{Div, SharedString, div, prelude::*, rgb};

use crate::theme::Palette;

pub(crate) fn header_chip(label: impl Into<SharedString>, palette: &Palette) -> Div {
    let label = label.into();
    div()
        .px_3()
        .py_2()
        .rounded_md()
        .bg(rgb(palette.panel_alt))
        .border_1()
        .border_color(rgb(palette.border))
        .text_sm()
        .text_color(rgb(palette.text))
        .child(label)
}

pub(crate) fn stat_row(
    label: impl Into<SharedString>,
    value: impl Into<String>,
    palette: &Palette,
) -> Div {
    let label = label.into();
    div()
        .flex()
        .items_center()
        .justify_between()
        .text_xs()
        .text_color(rgb(palette.muted))
        .child(label)
        .child(
            div()
                .text_sm()
                .text_color(rgb(palette.text))
                .child(value.into()),
        )
}

/// Small filled square used in chart legends.
pub(crate) fn legend_swatch(color: u32) -> Div {
    div()
        .w(gpui::px(10.))
        .h(gpui::px(10.))
        .rounded_sm()
        .bg(rgb(color))
}
