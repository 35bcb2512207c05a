//! Writes the generated sample tables to CSV so the dashboard and the loaders
//! can be exercised against real files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use benchlab_core::{sample_bond_table_seeded, sample_energy_table_seeded};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "sample_dump")]
struct Args {
    /// Directory to write energies.csv and bonds.csv into.
    #[arg(long, default_value = "tmp/sample")]
    out: PathBuf,

    /// Seed for the sample generator.
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let energy = sample_energy_table_seeded(args.seed);
    let energy_path = args.out.join("energies.csv");
    let mut writer = csv::Writer::from_path(&energy_path)
        .with_context(|| format!("opening {}", energy_path.display()))?;
    let mut header = vec!["System".to_string()];
    header.extend(energy.methods.iter().cloned());
    writer.write_record(&header)?;
    for (system, values) in energy.rows() {
        let mut record = vec![system.to_string()];
        record.extend(values.iter().map(|v| format!("{v:.6}")));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    println!("wrote {}", energy_path.display());

    let bonds = sample_bond_table_seeded(args.seed);
    let bond_path = args.out.join("bonds.csv");
    let mut writer = csv::Writer::from_path(&bond_path)
        .with_context(|| format!("opening {}", bond_path.display()))?;
    writer.write_record(["System", "Method", "R1", "R2"])?;
    for record in &bonds.records {
        writer.write_record([
            record.system.as_str(),
            record.method.as_str(),
            &format!("{:.6}", record.r1),
            &format!("{:.6}", record.r2),
        ])?;
    }
    writer.flush()?;
    println!("wrote {}", bond_path.display());

    Ok(())
}
