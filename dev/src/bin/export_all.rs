//! Renders every chart to SVG from the generated sample tables. Useful for
//! eyeballing the chart constructors without opening a window.

use std::path::PathBuf;

use anyhow::{Context, Result};
use benchlab_core::charts::{
    Tolerances, absolute_error_distribution, asynchronicity_heatmap, bland_altman_plot,
    bond_scatter, diagnostic_map, energy_heatmap, method_regression, relative_energy_lines,
    signed_error_heatmap,
};
use benchlab_core::{sample_bond_table_seeded, sample_energy_table_seeded};
use clap::Parser;
use ui::export::export_svg;
use ui::theme::ThemeKind;

#[derive(Parser, Debug)]
#[command(name = "export_all")]
struct Args {
    /// Directory to write one SVG per chart into.
    #[arg(long, default_value = "tmp/charts")]
    out: PathBuf,

    /// Seed for the sample generator.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Render with the light palette instead of the dark one.
    #[arg(long)]
    light: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let energy = sample_energy_table_seeded(args.seed);
    let bonds = sample_bond_table_seeded(args.seed);
    let benchmark = energy.methods.first().cloned().unwrap_or_default();
    let comparison = energy.methods.get(2).cloned().unwrap_or_default();
    let reference = energy.systems.first().cloned().unwrap_or_default();

    let theme = if args.light {
        ThemeKind::Light
    } else {
        ThemeKind::Dark
    };

    let charts = [
        ("error_distribution", absolute_error_distribution(&energy, &benchmark)?),
        ("signed_errors", signed_error_heatmap(&energy, &benchmark)?),
        ("raw_energies", energy_heatmap(&energy)),
        ("relative_energies", relative_energy_lines(&energy, &reference)?),
        ("regression", method_regression(&energy, &benchmark, &comparison)?),
        ("bland_altman", bland_altman_plot(&energy, &benchmark, &comparison)?),
        ("bond_lengths", bond_scatter(&bonds)?),
        ("asynchronicity", asynchronicity_heatmap(&bonds)?),
        (
            "diagnostic_map",
            diagnostic_map(&energy, &bonds, &benchmark, Tolerances::default())?,
        ),
    ];

    for (name, spec) in charts {
        let path = args.out.join(format!("{name}.svg"));
        export_svg(&[spec], theme, 5, &path)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
