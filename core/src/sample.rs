use crate::{BondRecord, BondTable, EnergyTable};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Method names with their energy noise (kcal/mol) and geometry noise (angstrom)
/// relative to the benchmark. The first entry doubles as the default benchmark.
pub const SAMPLE_METHODS: &[(&str, f64, f64)] = &[
    ("DLPNO-CCSD(T)", 0.0, 0.0),
    ("wB97X-D", 0.8, 0.010),
    ("M06-2X", 1.4, 0.020),
    ("B3LYP-D3", 2.2, 0.035),
    ("PBE0", 1.8, 0.028),
];

const SAMPLE_SYSTEM_COUNT: usize = 12;

pub fn sample_energy_table() -> EnergyTable {
    generate_energy(&mut rand::rng())
}

pub fn sample_energy_table_seeded(seed: u64) -> EnergyTable {
    generate_energy(&mut StdRng::seed_from_u64(seed))
}

pub fn sample_bond_table() -> BondTable {
    generate_bonds(&mut rand::rng())
}

pub fn sample_bond_table_seeded(seed: u64) -> BondTable {
    generate_bonds(&mut StdRng::seed_from_u64(seed))
}

fn generate_energy(rng: &mut impl Rng) -> EnergyTable {
    let systems = system_names();
    let methods: Vec<String> = SAMPLE_METHODS.iter().map(|(m, _, _)| m.to_string()).collect();

    let mut rows = Vec::with_capacity(systems.len());
    for _ in &systems {
        let baseline = rng.random_range(5.0..45.0);
        let row = SAMPLE_METHODS
            .iter()
            .map(|(_, noise, _)| baseline + gauss(rng) * noise)
            .collect();
        rows.push(row);
    }

    EnergyTable::new(systems, methods, rows).expect("generated table is well formed")
}

fn generate_bonds(rng: &mut impl Rng) -> BondTable {
    let mut records = Vec::with_capacity(SAMPLE_SYSTEM_COUNT * SAMPLE_METHODS.len());
    for system in system_names() {
        let base_r1 = rng.random_range(1.9..2.5);
        let base_r2 = rng.random_range(1.9..2.5);
        for (method, _, geo_noise) in SAMPLE_METHODS {
            records.push(BondRecord {
                system: system.clone(),
                method: method.to_string(),
                r1: base_r1 + gauss(rng) * geo_noise,
                r2: base_r2 + gauss(rng) * geo_noise,
            });
        }
    }
    BondTable::new(records)
}

fn system_names() -> Vec<String> {
    (1..=SAMPLE_SYSTEM_COUNT).map(|i| format!("TS{i:02}")).collect()
}

/// Approximately standard-normal draw (Irwin-Hall, 12 uniforms).
fn gauss(rng: &mut impl Rng) -> f64 {
    (0..12).map(|_| rng.random_range(0.0..1.0)).sum::<f64>() - 6.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_table_shape_and_benchmark_column() {
        let table = sample_energy_table_seeded(7);
        assert_eq!(table.systems.len(), SAMPLE_SYSTEM_COUNT);
        assert_eq!(table.methods.len(), SAMPLE_METHODS.len());
        assert_eq!(table.methods[0], "DLPNO-CCSD(T)");
        // zero noise: the benchmark column is exactly the baseline
        for (idx, _) in table.systems.iter().enumerate() {
            let bench = table.value(idx, 0);
            assert!((5.0..45.0).contains(&bench));
        }
    }

    #[test]
    fn bond_table_covers_every_pair_once() {
        let table = sample_bond_table_seeded(7);
        assert_eq!(
            table.records.len(),
            SAMPLE_SYSTEM_COUNT * SAMPLE_METHODS.len()
        );
        assert_eq!(table.systems().len(), SAMPLE_SYSTEM_COUNT);
        assert_eq!(table.methods().len(), SAMPLE_METHODS.len());
        for rec in &table.records {
            assert!((1.5..3.0).contains(&rec.r1), "r1 out of range: {}", rec.r1);
            assert!((1.5..3.0).contains(&rec.r2), "r2 out of range: {}", rec.r2);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        assert_eq!(sample_energy_table_seeded(42), sample_energy_table_seeded(42));
        assert_eq!(sample_bond_table_seeded(42), sample_bond_table_seeded(42));
    }
}
