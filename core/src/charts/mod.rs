//! The chart modules: pure functions of (table, options) -> [`PlotSpec`].

mod consistency;
mod diagnostic;
mod energy;
mod geometry;

pub use consistency::{bland_altman_plot, method_regression};
pub use diagnostic::{Tolerances, diagnostic_map};
pub use energy::{
    CHEMICAL_ACCURACY, absolute_error_distribution, energy_heatmap, relative_energy_lines,
    signed_error_heatmap,
};
pub use geometry::{asynchronicity_heatmap, bond_scatter};
