use core::{BondTable, EnergyTable};
use gpui::{App, Application, Bounds, WindowBounds, WindowOptions, prelude::*, px, size};

mod canvas;
mod error_view;
mod view;

use error_view::ErrorView;
use view::DashboardView;

#[derive(Clone)]
pub struct DashboardMeta {
    pub energy_source: String,
    pub bond_source: String,
    pub benchmark: Option<String>,
}

pub fn launch_dashboard(
    energy: Option<EnergyTable>,
    bonds: Option<BondTable>,
    meta: DashboardMeta,
) {
    Application::new().run(move |cx: &mut App| {
        let bounds = Bounds::centered(None, size(px(1280.), px(860.)), cx);
        cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                focus: true,
                ..Default::default()
            },
            move |_, cx| {
                cx.new(|_| DashboardView::new(energy.clone(), bonds.clone(), meta.clone()))
            },
        )
        .expect("failed to open window");
        cx.activate(true);
    });
}

/// Opens a window that only shows the load failure. Used when the tables
/// requested on the command line cannot be read.
pub fn launch_error(source: String, message: String) {
    Application::new().run(move |cx: &mut App| {
        let bounds = Bounds::centered(None, size(px(720.), px(480.)), cx);
        cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                focus: true,
                ..Default::default()
            },
            move |_, cx| cx.new(|_| ErrorView::new(source.clone(), message.clone())),
        )
        .expect("failed to open window");
        cx.activate(true);
    });
}
