mod components;
mod dashboard;
pub mod export;
pub mod logging;
pub mod theme;

pub use dashboard::{DashboardMeta, launch_dashboard, launch_error};
