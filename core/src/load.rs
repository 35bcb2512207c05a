use crate::{BondColumns, BondRecord, BondTable, DataError, EnergyTable, LoadOptions};
use polars::prelude::*;
use std::path::Path;

pub fn load_energy_csv(
    path: impl AsRef<Path>,
    options: LoadOptions,
) -> Result<EnergyTable, DataError> {
    let pl_path = PlPathRef::from_local_path(path.as_ref()).into_owned();
    let lf = LazyCsvReader::new(pl_path).with_has_header(true);
    let df = lf.finish()?.collect()?;
    parse_energy_frame(df, &options)
}

pub fn load_energy_parquet(
    path: impl AsRef<Path>,
    options: LoadOptions,
) -> Result<EnergyTable, DataError> {
    let pl_path = PlPathRef::from_local_path(path.as_ref()).into_owned();
    let lf = LazyFrame::scan_parquet(pl_path, ScanArgsParquet::default())?;
    let df = lf.collect()?;
    parse_energy_frame(df, &options)
}

pub fn load_bond_csv(
    path: impl AsRef<Path>,
    columns: BondColumns,
) -> Result<BondTable, DataError> {
    let pl_path = PlPathRef::from_local_path(path.as_ref()).into_owned();
    let lf = LazyCsvReader::new(pl_path).with_has_header(true);
    let df = lf.finish()?.collect()?;
    parse_bond_frame(df, &columns)
}

pub fn load_bond_parquet(
    path: impl AsRef<Path>,
    columns: BondColumns,
) -> Result<BondTable, DataError> {
    let pl_path = PlPathRef::from_local_path(path.as_ref()).into_owned();
    let lf = LazyFrame::scan_parquet(pl_path, ScanArgsParquet::default())?;
    let df = lf.collect()?;
    parse_bond_frame(df, &columns)
}

fn parse_energy_frame(df: DataFrame, options: &LoadOptions) -> Result<EnergyTable, DataError> {
    let system_col = df
        .column(&options.system_column)
        .map_err(|_| DataError::MissingColumn(options.system_column.clone()))?;

    let mut systems = Vec::with_capacity(system_col.len());
    for idx in 0..system_col.len() {
        systems.push(to_label(
            system_col.get(idx)?,
            &options.system_column,
            idx,
        )?);
    }

    let mut methods = Vec::new();
    let mut columns: Vec<Vec<f64>> = Vec::new();
    for col in df.get_columns() {
        let name = col.name().to_string();
        if name == options.system_column {
            continue;
        }
        if col.len() != systems.len() {
            return Err(DataError::LengthMismatch);
        }
        let mut values = Vec::with_capacity(col.len());
        for idx in 0..col.len() {
            values.push(to_f64(col.get(idx)?, &name, idx)?);
        }
        methods.push(name);
        columns.push(values);
    }

    if methods.is_empty() {
        return Err(DataError::NoMethodColumns);
    }

    let rows = (0..systems.len())
        .map(|row| columns.iter().map(|col| col[row]).collect())
        .collect();

    EnergyTable::new(systems, methods, rows)
}

fn parse_bond_frame(df: DataFrame, columns: &BondColumns) -> Result<BondTable, DataError> {
    let system = df
        .column(&columns.system)
        .map_err(|_| DataError::MissingColumn(columns.system.clone()))?;
    let method = df
        .column(&columns.method)
        .map_err(|_| DataError::MissingColumn(columns.method.clone()))?;
    let r1 = df
        .column(&columns.r1)
        .map_err(|_| DataError::MissingColumn(columns.r1.clone()))?;
    let r2 = df
        .column(&columns.r2)
        .map_err(|_| DataError::MissingColumn(columns.r2.clone()))?;

    let len = system.len();
    if method.len() != len || r1.len() != len || r2.len() != len {
        return Err(DataError::LengthMismatch);
    }

    let mut records = Vec::with_capacity(len);
    for idx in 0..len {
        records.push(BondRecord {
            system: to_label(system.get(idx)?, &columns.system, idx)?,
            method: to_label(method.get(idx)?, &columns.method, idx)?,
            r1: to_f64(r1.get(idx)?, &columns.r1, idx)?,
            r2: to_f64(r2.get(idx)?, &columns.r2, idx)?,
        });
    }

    Ok(BondTable::new(records))
}

fn to_label(value: AnyValue, column: &str, row: usize) -> Result<String, DataError> {
    match value {
        AnyValue::String(s) => Ok(s.to_string()),
        AnyValue::StringOwned(s) => Ok(s.to_string()),
        other => Err(DataError::InvalidLabel {
            column: column.to_string(),
            row,
            value: format!("{other:?}"),
        }),
    }
}

fn to_f64(value: AnyValue, column: &str, row: usize) -> Result<f64, DataError> {
    match value {
        AnyValue::Float64(v) => Ok(v),
        AnyValue::Float32(v) => Ok(v as f64),
        AnyValue::Int64(v) => Ok(v as f64),
        AnyValue::Int32(v) => Ok(v as f64),
        AnyValue::UInt64(v) => Ok(v as f64),
        AnyValue::UInt32(v) => Ok(v as f64),
        AnyValue::String(s) => s.parse::<f64>().map_err(|_| DataError::InvalidNumber {
            column: column.to_string(),
            row,
            value: s.to_string(),
        }),
        AnyValue::StringOwned(s) => to_f64(AnyValue::String(&s), column, row),
        other => Err(DataError::InvalidNumber {
            column: column.to_string(),
            row,
            value: format!("{other:?}"),
        }),
    }
}
