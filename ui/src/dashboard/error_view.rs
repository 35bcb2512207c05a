use gpui::{Render, SharedString, Window, div, prelude::*, px, rgb};

use crate::theme::ThemeKind;

/// Full-window panel shown when the requested data files cannot be loaded.
pub(super) struct ErrorView {
    source: String,
    message: String,
}

impl ErrorView {
    pub(super) fn new(source: String, message: String) -> Self {
        Self { source, message }
    }
}

impl Render for ErrorView {
    fn render(&mut self, _window: &mut Window, _cx: &mut gpui::Context<Self>) -> impl IntoElement {
        let palette = ThemeKind::default().palette();
        let source = SharedString::from(self.source.clone());
        let message = SharedString::from(self.message.clone());

        div()
            .flex()
            .flex_col()
            .w_full()
            .h_full()
            .bg(rgb(palette.bg))
            .text_color(rgb(palette.text))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .items_center()
                    .justify_center()
                    .gap_4()
                    .p_8()
                    .w_full()
                    .h_full()
                    .text_center()
                    .child(div().text_lg().child("Load error"))
                    .child(
                        div()
                            .text_sm()
                            .text_color(rgb(palette.muted))
                            .child(source),
                    )
                    .child(
                        div()
                            .max_w(px(640.))
                            .p_4()
                            .rounded_md()
                            .bg(rgb(palette.panel_alt))
                            .border_1()
                            .border_color(rgb(palette.border))
                            .child(message),
                    ),
            )
    }
}
