//! Data layer of the benchmark dashboard: table types, file ingestion,
//! synthetic sample data, derived-table analysis, and declarative chart
//! construction. No GUI dependency lives here.

pub mod analysis;
pub mod charts;
mod error;
mod load;
pub mod plot;
mod sample;
mod types;

pub use error::DataError;
pub use load::{load_bond_csv, load_bond_parquet, load_energy_csv, load_energy_parquet};
pub use sample::{
    SAMPLE_METHODS, sample_bond_table, sample_bond_table_seeded, sample_energy_table,
    sample_energy_table_seeded,
};
pub use types::{BondColumns, BondRecord, BondTable, EnergyTable, LoadOptions, Matrix};
