use core::charts::{
    Tolerances, absolute_error_distribution, asynchronicity_heatmap, bland_altman_plot,
    bond_scatter, diagnostic_map, energy_heatmap, method_regression, relative_energy_lines,
    signed_error_heatmap,
};
use core::plot::PlotSpec;
use core::{BondTable, DataError, EnergyTable, sample_bond_table, sample_energy_table};
use gpui::SharedString;

use crate::export::export_svg;
use crate::logging::log_session;
use crate::theme::ThemeKind;

use super::super::DashboardMeta;

const EXPORT_DIR: &str = "tmp/exports";

/// One selectable chart page. `Overview` is the landing page with the data
/// summary, everything else renders a single chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Page {
    Overview,
    ErrorDistribution,
    SignedHeatmap,
    EnergyHeatmap,
    RelativeEnergies,
    Regression,
    BlandAltman,
    BondScatter,
    Asynchronicity,
    Diagnostic,
}

impl Page {
    pub(crate) const ALL: &[Page] = &[
        Page::Overview,
        Page::ErrorDistribution,
        Page::SignedHeatmap,
        Page::EnergyHeatmap,
        Page::RelativeEnergies,
        Page::Regression,
        Page::BlandAltman,
        Page::BondScatter,
        Page::Asynchronicity,
        Page::Diagnostic,
    ];

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::ErrorDistribution => "Error distribution",
            Page::SignedHeatmap => "Signed errors",
            Page::EnergyHeatmap => "Raw energies",
            Page::RelativeEnergies => "Relative energies",
            Page::Regression => "Regression",
            Page::BlandAltman => "Bland-Altman",
            Page::BondScatter => "Bond lengths",
            Page::Asynchronicity => "Asynchronicity",
            Page::Diagnostic => "Diagnostic map",
        }
    }

    pub(crate) fn needs_energy(&self) -> bool {
        !matches!(self, Page::Overview | Page::BondScatter | Page::Asynchronicity)
    }

    pub(crate) fn needs_bonds(&self) -> bool {
        matches!(
            self,
            Page::BondScatter | Page::Asynchronicity | Page::Diagnostic
        )
    }
}

/// Point marker size selectable from the settings overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum MarkerSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl MarkerSize {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            MarkerSize::Small => "S",
            MarkerSize::Medium => "M",
            MarkerSize::Large => "L",
        }
    }

    pub(crate) fn canvas_px(&self) -> f32 {
        match self {
            MarkerSize::Small => 5.0,
            MarkerSize::Medium => 7.0,
            MarkerSize::Large => 10.0,
        }
    }

    pub(crate) fn export_px(&self) -> i32 {
        match self {
            MarkerSize::Small => 3,
            MarkerSize::Medium => 5,
            MarkerSize::Large => 7,
        }
    }
}

pub(crate) struct DashboardView {
    pub(super) energy: Option<EnergyTable>,
    pub(super) bonds: Option<BondTable>,
    pub(super) energy_source: String,
    pub(super) bond_source: String,
    pub(super) page: Page,
    pub(super) benchmark: Option<String>,
    pub(super) reference_system: Option<String>,
    pub(super) comparison: Option<String>,
    pub(super) theme: ThemeKind,
    pub(super) marker: MarkerSize,
    pub(super) tolerances: Tolerances,
    pub(super) settings_open: bool,
    pub(super) status: Option<String>,
}

impl DashboardView {
    pub(crate) fn new(
        energy: Option<EnergyTable>,
        bonds: Option<BondTable>,
        meta: DashboardMeta,
    ) -> Self {
        let mut view = Self {
            energy,
            bonds,
            energy_source: meta.energy_source,
            bond_source: meta.bond_source,
            page: Page::Overview,
            benchmark: meta.benchmark,
            reference_system: None,
            comparison: None,
            theme: ThemeKind::default(),
            marker: MarkerSize::default(),
            tolerances: Tolerances::default(),
            settings_open: false,
            status: None,
        };
        view.reconcile_selection();
        view
    }

    /// Every method name across both loaded tables, energy table first.
    pub(super) fn methods(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        if let Some(energy) = &self.energy {
            out.extend(energy.methods.iter().cloned());
        }
        if let Some(bonds) = &self.bonds {
            for method in bonds.methods() {
                if !out.iter().any(|m| m == &method) {
                    out.push(method);
                }
            }
        }
        out
    }

    pub(super) fn systems(&self) -> Vec<String> {
        if let Some(energy) = &self.energy {
            return energy.systems.clone();
        }
        if let Some(bonds) = &self.bonds {
            return bonds.systems();
        }
        Vec::new()
    }

    /// Keeps the benchmark/reference/comparison selections valid after a data
    /// reload. Falls back to the first method, first system, and the first
    /// non-benchmark method.
    pub(super) fn reconcile_selection(&mut self) {
        let methods = self.methods();
        if !self
            .benchmark
            .as_ref()
            .is_some_and(|b| methods.iter().any(|m| m == b))
        {
            self.benchmark = methods.first().cloned();
        }
        if !self
            .comparison
            .as_ref()
            .is_some_and(|c| methods.iter().any(|m| m == c) && self.benchmark.as_ref() != Some(c))
        {
            self.comparison = methods
                .iter()
                .find(|m| Some(*m) != self.benchmark.as_ref())
                .cloned();
        }
        let systems = self.systems();
        if !self
            .reference_system
            .as_ref()
            .is_some_and(|s| systems.iter().any(|sys| sys == s))
        {
            self.reference_system = systems.first().cloned();
        }
    }

    pub(super) fn set_page(&mut self, page: Page) {
        if self.page_available(page) {
            self.page = page;
        }
    }

    pub(super) fn page_available(&self, page: Page) -> bool {
        (!page.needs_energy() || self.energy.is_some())
            && (!page.needs_bonds() || self.bonds.is_some())
    }

    pub(super) fn set_benchmark(&mut self, method: String) {
        if self.comparison.as_ref() == Some(&method) {
            self.comparison = self.benchmark.take();
        }
        self.benchmark = Some(method);
        self.reconcile_selection();
    }

    pub(super) fn set_comparison(&mut self, method: String) {
        if self.benchmark.as_ref() != Some(&method) {
            self.comparison = Some(method);
        }
    }

    pub(super) fn set_reference_system(&mut self, system: String) {
        self.reference_system = Some(system);
    }

    pub(super) fn reset_settings(&mut self) {
        self.benchmark = None;
        self.reference_system = None;
        self.comparison = None;
        self.theme = ThemeKind::default();
        self.marker = MarkerSize::default();
        self.tolerances = Tolerances::default();
        self.reconcile_selection();
    }

    pub(super) fn load_sample_data(&mut self) {
        self.energy = Some(sample_energy_table());
        self.bonds = Some(sample_bond_table());
        self.energy_source = "sample".to_string();
        self.bond_source = "sample".to_string();
        self.reconcile_selection();
        self.status = Some("loaded sample data".to_string());
        log_session("[data] loaded generated sample tables");
    }

    /// Builds the chart for the active page. `Ok(None)` means the page has no
    /// chart (the overview); an `Err` is rendered in place of the canvas.
    pub(super) fn active_spec(&self) -> Result<Option<PlotSpec>, DataError> {
        let benchmark = self.benchmark.as_deref().unwrap_or_default();
        match self.page {
            Page::Overview => Ok(None),
            Page::ErrorDistribution => {
                let energy = self.energy.as_ref().ok_or(DataError::NoMethodColumns)?;
                absolute_error_distribution(energy, benchmark).map(Some)
            }
            Page::SignedHeatmap => {
                let energy = self.energy.as_ref().ok_or(DataError::NoMethodColumns)?;
                signed_error_heatmap(energy, benchmark).map(Some)
            }
            Page::EnergyHeatmap => {
                let energy = self.energy.as_ref().ok_or(DataError::NoMethodColumns)?;
                Ok(Some(energy_heatmap(energy)))
            }
            Page::RelativeEnergies => {
                let energy = self.energy.as_ref().ok_or(DataError::NoMethodColumns)?;
                let reference = self.reference_system.as_deref().unwrap_or_default();
                relative_energy_lines(energy, reference).map(Some)
            }
            Page::Regression => {
                let energy = self.energy.as_ref().ok_or(DataError::NoMethodColumns)?;
                let comparison = self.comparison.as_deref().unwrap_or_default();
                method_regression(energy, benchmark, comparison).map(Some)
            }
            Page::BlandAltman => {
                let energy = self.energy.as_ref().ok_or(DataError::NoMethodColumns)?;
                let comparison = self.comparison.as_deref().unwrap_or_default();
                bland_altman_plot(energy, benchmark, comparison).map(Some)
            }
            Page::BondScatter => {
                let bonds = self.bonds.as_ref().ok_or(DataError::NoMethodColumns)?;
                bond_scatter(bonds).map(Some)
            }
            Page::Asynchronicity => {
                let bonds = self.bonds.as_ref().ok_or(DataError::NoMethodColumns)?;
                asynchronicity_heatmap(bonds).map(Some)
            }
            Page::Diagnostic => {
                let energy = self.energy.as_ref().ok_or(DataError::NoMethodColumns)?;
                let bonds = self.bonds.as_ref().ok_or(DataError::NoMethodColumns)?;
                diagnostic_map(energy, bonds, benchmark, self.tolerances).map(Some)
            }
        }
    }

    pub(super) fn export_active_chart(&mut self) {
        let spec = match self.active_spec() {
            Ok(Some(spec)) => spec,
            Ok(None) => {
                self.status = Some("nothing to export on this page".to_string());
                return;
            }
            Err(err) => {
                self.status = Some(format!("export failed: {err}"));
                return;
            }
        };
        let ts_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let path = std::path::Path::new(EXPORT_DIR)
            .join(format!("{}_{ts_ms}.svg", slug(self.page.label())));
        match export_svg(&[spec], self.theme, self.marker.export_px(), &path) {
            Ok(()) => {
                log_session(format!("[export] wrote {}", path.display()));
                self.status = Some(format!("exported {}", path.display()));
            }
            Err(err) => {
                log_session(format!("[export] failed: {err}"));
                self.status = Some(format!("export failed: {err}"));
            }
        }
    }

    pub(super) fn status_line(&self) -> SharedString {
        let status = self.status.clone().unwrap_or_else(|| {
            format!(
                "energy: {} | bonds: {}",
                describe(&self.energy_source, self.energy.is_some()),
                describe(&self.bond_source, self.bonds.is_some()),
            )
        });
        SharedString::from(status)
    }
}

fn describe(source: &str, loaded: bool) -> String {
    if loaded {
        source.to_string()
    } else {
        "not loaded".to_string()
    }
}

fn slug(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::{sample_bond_table_seeded, sample_energy_table_seeded};

    fn view_with_both() -> DashboardView {
        DashboardView::new(
            Some(sample_energy_table_seeded(1)),
            Some(sample_bond_table_seeded(1)),
            DashboardMeta {
                energy_source: "energy.csv".to_string(),
                bond_source: "bonds.csv".to_string(),
                benchmark: None,
            },
        )
    }

    #[test]
    fn defaults_pick_first_method_and_first_distinct_comparison() {
        let view = view_with_both();
        assert_eq!(view.benchmark.as_deref(), Some("DLPNO-CCSD(T)"));
        assert_eq!(view.comparison.as_deref(), Some("wB97X-D"));
        assert_eq!(view.reference_system.as_deref(), Some("TS01"));
    }

    #[test]
    fn energy_pages_are_gated_when_only_bonds_are_loaded() {
        let view = DashboardView::new(
            None,
            Some(sample_bond_table_seeded(1)),
            DashboardMeta {
                energy_source: String::new(),
                bond_source: "bonds.csv".to_string(),
                benchmark: None,
            },
        );
        assert!(!view.page_available(Page::ErrorDistribution));
        assert!(!view.page_available(Page::Diagnostic));
        assert!(view.page_available(Page::BondScatter));
        assert!(view.page_available(Page::Asynchronicity));
        assert!(view.page_available(Page::Overview));
    }

    #[test]
    fn set_page_ignores_unavailable_pages() {
        let mut view = DashboardView::new(
            Some(sample_energy_table_seeded(1)),
            None,
            DashboardMeta {
                energy_source: "energy.csv".to_string(),
                bond_source: String::new(),
                benchmark: None,
            },
        );
        view.set_page(Page::BondScatter);
        assert_eq!(view.page, Page::Overview);
        view.set_page(Page::Regression);
        assert_eq!(view.page, Page::Regression);
    }

    #[test]
    fn picking_the_comparison_as_benchmark_swaps_the_two() {
        let mut view = view_with_both();
        view.set_benchmark("wB97X-D".to_string());
        assert_eq!(view.benchmark.as_deref(), Some("wB97X-D"));
        assert_eq!(view.comparison.as_deref(), Some("DLPNO-CCSD(T)"));
    }

    #[test]
    fn every_available_page_yields_a_spec_or_overview() {
        for &page in Page::ALL {
            let mut probe = view_with_both();
            probe.set_page(page);
            let spec = probe.active_spec().unwrap();
            assert_eq!(spec.is_none(), page == Page::Overview);
        }
    }

    #[test]
    fn sample_load_fills_both_tables() {
        let mut view = DashboardView::new(
            None,
            None,
            DashboardMeta {
                energy_source: String::new(),
                bond_source: String::new(),
                benchmark: None,
            },
        );
        assert!(view.methods().is_empty());
        view.load_sample_data();
        assert!(view.energy.is_some());
        assert!(view.bonds.is_some());
        assert_eq!(view.benchmark.as_deref(), Some("DLPNO-CCSD(T)"));
    }
}
