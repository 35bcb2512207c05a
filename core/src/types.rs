use crate::DataError;

/// Wide-format table of barrier heights: one row per system, one column per
/// method, values in kcal/mol.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyTable {
    pub systems: Vec<String>,
    pub methods: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl EnergyTable {
    pub fn new(
        systems: Vec<String>,
        methods: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, DataError> {
        if methods.is_empty() {
            return Err(DataError::NoMethodColumns);
        }
        if values.len() != systems.len() || values.iter().any(|row| row.len() != methods.len()) {
            return Err(DataError::LengthMismatch);
        }
        for (idx, system) in systems.iter().enumerate() {
            if systems[..idx].contains(system) {
                return Err(DataError::DuplicateSystem(system.clone()));
            }
        }
        Ok(Self {
            systems,
            methods,
            values,
        })
    }

    pub fn value(&self, system_idx: usize, method_idx: usize) -> f64 {
        self.values[system_idx][method_idx]
    }

    pub fn method_index(&self, method: &str) -> Result<usize, DataError> {
        self.methods
            .iter()
            .position(|m| m == method)
            .ok_or_else(|| DataError::UnknownMethod(method.to_string()))
    }

    pub fn system_index(&self, system: &str) -> Result<usize, DataError> {
        self.systems
            .iter()
            .position(|s| s == system)
            .ok_or_else(|| DataError::UnknownSystem(system.to_string()))
    }

    /// All values of one method column, in system order.
    pub fn method_column(&self, method_idx: usize) -> Vec<f64> {
        self.values.iter().map(|row| row[method_idx]).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.systems
            .iter()
            .zip(&self.values)
            .map(|(s, row)| (s.as_str(), row.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn to_matrix(&self) -> Matrix {
        Matrix {
            row_labels: self.systems.clone(),
            col_labels: self.methods.clone(),
            values: self.values.clone(),
        }
    }
}

/// One measured transition-state geometry: the two forming/breaking bond
/// lengths for a (system, method) pair, in angstrom.
#[derive(Debug, Clone, PartialEq)]
pub struct BondRecord {
    pub system: String,
    pub method: String,
    pub r1: f64,
    pub r2: f64,
}

/// Long-format bond-length table keyed by (system, method).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BondTable {
    pub records: Vec<BondRecord>,
}

impl BondTable {
    pub fn new(records: Vec<BondRecord>) -> Self {
        Self { records }
    }

    /// Unique system names in first-seen order.
    pub fn systems(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for rec in &self.records {
            if !out.contains(&rec.system) {
                out.push(rec.system.clone());
            }
        }
        out
    }

    /// Unique method names in first-seen order.
    pub fn methods(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for rec in &self.records {
            if !out.contains(&rec.method) {
                out.push(rec.method.clone());
            }
        }
        out
    }

    pub fn find(&self, system: &str, method: &str) -> Option<&BondRecord> {
        self.records
            .iter()
            .find(|r| r.system == system && r.method == method)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Column names expected in a bond-length file.
#[derive(Debug, Clone)]
pub struct BondColumns {
    pub system: String,
    pub method: String,
    pub r1: String,
    pub r2: String,
}

impl Default for BondColumns {
    fn default() -> Self {
        Self {
            system: "System".into(),
            method: "Method".into(),
            r1: "R1".into(),
            r2: "R2".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Name of the system key column in an energy file.
    pub system_column: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            system_column: "System".into(),
        }
    }
}

/// Labelled System x Method grid shared by the derived tables and heatmaps.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut seen = false;
        for row in &self.values {
            for &v in row {
                min = min.min(v);
                max = max.max(v);
                seen = true;
            }
        }
        seen.then_some((min, max))
    }

    pub fn max_abs(&self) -> f64 {
        self.values
            .iter()
            .flatten()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_table_rejects_duplicate_systems() {
        let err = EnergyTable::new(
            vec!["TS1".into(), "TS1".into()],
            vec!["A".into()],
            vec![vec![1.0], vec![2.0]],
        )
        .unwrap_err();
        match err {
            DataError::DuplicateSystem(name) => assert_eq!(name, "TS1"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn energy_table_rejects_ragged_rows() {
        let err = EnergyTable::new(
            vec!["TS1".into()],
            vec!["A".into(), "B".into()],
            vec![vec![1.0]],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::LengthMismatch));
    }

    #[test]
    fn energy_table_requires_a_method_column() {
        let err = EnergyTable::new(vec!["TS1".into()], vec![], vec![vec![]]).unwrap_err();
        assert!(matches!(err, DataError::NoMethodColumns));
    }

    #[test]
    fn bond_table_collects_unique_labels_in_order() {
        let table = BondTable::new(vec![
            BondRecord {
                system: "TS1".into(),
                method: "A".into(),
                r1: 2.0,
                r2: 2.1,
            },
            BondRecord {
                system: "TS2".into(),
                method: "A".into(),
                r1: 1.9,
                r2: 2.2,
            },
            BondRecord {
                system: "TS1".into(),
                method: "B".into(),
                r1: 2.05,
                r2: 2.05,
            },
        ]);
        assert_eq!(table.systems(), vec!["TS1".to_string(), "TS2".to_string()]);
        assert_eq!(table.methods(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(table.find("TS1", "B").unwrap().r1, 2.05);
        assert!(table.find("TS2", "B").is_none());
    }

    #[test]
    fn matrix_extrema() {
        let m = Matrix {
            row_labels: vec!["TS1".into()],
            col_labels: vec!["A".into(), "B".into()],
            values: vec![vec![-3.0, 2.0]],
        };
        assert_eq!(m.min_max(), Some((-3.0, 2.0)));
        assert_eq!(m.max_abs(), 3.0);
    }
}
