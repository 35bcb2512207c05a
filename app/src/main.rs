use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use core::{
    BondColumns, BondTable, EnergyTable, LoadOptions, load_bond_csv, load_bond_parquet,
    load_energy_csv, load_energy_parquet, sample_bond_table, sample_energy_table,
};

mod input;
use input::{InputFormat, detect_format};

#[derive(Parser, Debug)]
#[command(name = "benchlab")]
struct Args {
    /// Path to the energy table: a System column plus one column per method,
    /// values in kcal/mol.
    #[arg(long)]
    energy: Option<PathBuf>,

    /// Path to the bond table with System, Method, R1, R2 columns (Angstrom).
    #[arg(long)]
    bonds: Option<PathBuf>,

    /// Explicitly set the file format. If omitted, inferred from extension.
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Name of the benchmark method column. Defaults to the first method.
    #[arg(long)]
    benchmark: Option<String>,

    /// Start with generated sample tables instead of files.
    #[arg(long)]
    sample: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.sample {
        let meta = ui::DashboardMeta {
            energy_source: "sample".to_string(),
            bond_source: "sample".to_string(),
            benchmark: args.benchmark,
        };
        ui::launch_dashboard(Some(sample_energy_table()), Some(sample_bond_table()), meta);
        return Ok(());
    }

    let energy = match &args.energy {
        Some(path) => match load_energy(path, args.format) {
            Ok(table) => Some(table),
            Err(message) => {
                ui::launch_error(path.display().to_string(), message);
                return Ok(());
            }
        },
        None => None,
    };
    let bonds = match &args.bonds {
        Some(path) => match load_bonds(path, args.format) {
            Ok(table) => Some(table),
            Err(message) => {
                ui::launch_error(path.display().to_string(), message);
                return Ok(());
            }
        },
        None => None,
    };

    let meta = ui::DashboardMeta {
        energy_source: source_label(args.energy.as_deref()),
        bond_source: source_label(args.bonds.as_deref()),
        benchmark: args.benchmark,
    };
    ui::launch_dashboard(energy, bonds, meta);
    Ok(())
}

fn load_energy(path: &Path, format: Option<InputFormat>) -> Result<EnergyTable, String> {
    let format = resolve_format(path, format)?;
    match format {
        InputFormat::Csv => load_energy_csv(path, LoadOptions::default()),
        InputFormat::Parquet => load_energy_parquet(path, LoadOptions::default()),
    }
    .map_err(|e| format!("failed to load {}: {e}", path.display()))
}

fn load_bonds(path: &Path, format: Option<InputFormat>) -> Result<BondTable, String> {
    let format = resolve_format(path, format)?;
    match format {
        InputFormat::Csv => load_bond_csv(path, BondColumns::default()),
        InputFormat::Parquet => load_bond_parquet(path, BondColumns::default()),
    }
    .map_err(|e| format!("failed to load {}: {e}", path.display()))
}

fn resolve_format(path: &Path, format: Option<InputFormat>) -> Result<InputFormat, String> {
    format
        .or_else(|| detect_format(path))
        .ok_or_else(|| "could not determine file format (use --format)".to_string())
}

fn source_label(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}
