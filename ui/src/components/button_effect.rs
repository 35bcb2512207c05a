use gpui::{Div, Stateful, prelude::*, rgb};

use crate::theme::lerp;

/// Hover/active feedback derived from the button's base background, so the
/// same helper works under both themes.
pub fn apply(button: Stateful<Div>, base_bg: u32) -> Stateful<Div> {
    let hover_bg = if is_light(base_bg) {
        lerp(base_bg, 0x000000, 0.08)
    } else {
        lerp(base_bg, 0xffffff, 0.10)
    };
    let active_bg = if is_light(base_bg) {
        lerp(base_bg, 0x000000, 0.16)
    } else {
        lerp(base_bg, 0x000000, 0.25)
    };
    apply_custom(button, hover_bg, active_bg)
}

pub fn apply_custom(button: Stateful<Div>, hover_bg: u32, active_bg: u32) -> Stateful<Div> {
    button
        .cursor_pointer()
        .hover(move |s| s.bg(rgb(hover_bg)))
        .active(move |s| s.bg(rgb(active_bg)))
        .on_hover(|_, window, _| window.refresh())
}

fn is_light(color: u32) -> bool {
    let r = ((color >> 16) & 0xff) as f32;
    let g = ((color >> 8) & 0xff) as f32;
    let b = (color & 0xff) as f32;
    0.299 * r + 0.587 * g + 0.114 * b > 127.0
}
