mod overlays;
mod render;
mod sections;
mod state;
mod widgets;

pub(crate) use state::{DashboardView, MarkerSize, Page};
