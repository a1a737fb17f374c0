use crate::{
    error::{ReportError, Result},
    tasks::schema::ColumnSchema,
};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, error};
use std::{path::Path, str::FromStr};

/// One benchmark run: how many processors it used and how long it took.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub processors: u32,
    pub elapsed: f64,
}

fn column_index(headers: &StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers.iter().position(|h| h == column).ok_or_else(|| {
        error!(
            "column not found in CSV header (path={}, column={column}, header={headers:?})",
            path.display()
        );
        ReportError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        }
    })
}

fn parse_field<T: FromStr>(
    record: &StringRecord,
    idx: usize,
    column: &str,
    path: &Path,
    row: usize,
) -> Result<T> {
    let value = record.get(idx).unwrap_or_default();
    value.parse::<T>().map_err(|_| {
        error!(
            "error parsing CSV value (path={}, row={row}, column={column}, value={value})",
            path.display()
        );
        ReportError::InvalidValue {
            path: path.to_path_buf(),
            row,
            column: column.to_string(),
            value: value.to_string(),
        }
    })
}

/// Read the (processor count, elapsed time) pairs of a CSV performance log,
/// in file order. Columns are looked up by header name, so any other columns
/// in the file are ignored.
pub fn read_measurements(path: &Path, schema: &ColumnSchema) -> Result<Vec<Measurement>> {
    if !path.exists() {
        error!("input file does not exist (path={})", path.display());
        return Err(ReportError::MissingFile(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let processors_idx = column_index(&headers, &schema.processors, path)?;
    let time_idx = column_index(&headers, &schema.time, path)?;

    let mut measurements = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = idx + 1;

        let processors = parse_field(&record, processors_idx, &schema.processors, path, row)?;
        let elapsed: f64 = parse_field(&record, time_idx, &schema.time, path, row)?;
        // `inf` and `NaN` parse as f64 but cannot be charted
        if !elapsed.is_finite() {
            error!(
                "non-finite elapsed time (path={}, row={row}, column={}, value={elapsed})",
                path.display(),
                schema.time
            );
            return Err(ReportError::InvalidValue {
                path: path.to_path_buf(),
                row,
                column: schema.time.clone(),
                value: elapsed.to_string(),
            });
        }

        measurements.push(Measurement {
            processors,
            elapsed,
        });
    }

    debug!(
        "read {} measurements from {}",
        measurements.len(),
        path.display()
    );

    Ok(measurements)
}

/// Collapse rows that share a processor count into a single row holding the
/// mean elapsed time. Rows keep the order in which each count first appears.
pub fn average_repeats(measurements: &[Measurement]) -> Vec<Measurement> {
    let mut groups: Vec<(u32, f64, usize)> = Vec::new();
    for m in measurements {
        match groups.iter_mut().find(|(p, _, _)| *p == m.processors) {
            Some((_, total, count)) => {
                *total += m.elapsed;
                *count += 1;
            }
            None => groups.push((m.processors, m.elapsed, 1)),
        }
    }

    groups
        .into_iter()
        .map(|(processors, total, count)| Measurement {
            processors,
            elapsed: total / count as f64,
        })
        .collect()
}
