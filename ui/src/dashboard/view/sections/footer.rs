use gpui::{SharedString, div, prelude::*, rgb};

use crate::theme::Palette;

pub(crate) fn dashboard_footer(status: SharedString, palette: &Palette) -> impl IntoElement {
    div()
        .flex()
        .justify_between()
        .items_center()
        .p_3()
        .bg(rgb(palette.panel_alt))
        .border_t_1()
        .border_color(rgb(palette.border))
        .text_sm()
        .text_color(rgb(palette.muted))
        .child("energies in kcal/mol | bond lengths in Å")
        .child(status)
}
