use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::data::stats::{ColumnStats, DatasetStats};
use crate::error::{BpnnError, Result};

/// Index-aligned input and expected-output vectors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatternTable {
    pub inputs: Vec<Vec<f64>>,
    pub outputs: Vec<Vec<f64>>,
}

impl PatternTable {
    pub fn new(inputs: Vec<Vec<f64>>, outputs: Vec<Vec<f64>>) -> PatternTable {
        assert_eq!(inputs.len(), outputs.len(), "inputs and outputs must have equal length");
        PatternTable { inputs, outputs }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn input(&self, index: usize) -> &[f64] {
        &self.inputs[index]
    }

    pub fn output(&self, index: usize) -> &[f64] {
        &self.outputs[index]
    }
}

/// A loaded pattern table together with the statistics of the raw values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub patterns: PatternTable,
    pub stats: DatasetStats,
}

impl Dataset {
    /// Reads a data file: `in_columns` inputs then `out_columns` outputs per row.
    pub fn load(path: impl AsRef<Path>, in_columns: usize, out_columns: usize) -> Result<Dataset> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| BpnnError::io(path, e))?;
        let dataset = Dataset::from_reader(BufReader::new(file), in_columns, out_columns)
            .map_err(|e| match e {
                BpnnError::EmptyDataset { .. } => BpnnError::EmptyDataset { path: path.into() },
                other => other,
            })?;
        info!(
            "loaded {} patterns ({} inputs, {} outputs) from {}",
            dataset.patterns.len(), in_columns, out_columns, path.display()
        );
        Ok(dataset)
    }

    /// Parses rows of whitespace-separated numbers.
    ///
    /// Leading blank lines and lines starting with `#` are skipped; the first
    /// blank line after the data block (or EOF) ends it. Values beyond
    /// `in_columns + out_columns` on a row are ignored.
    pub fn from_reader<R: BufRead>(reader: R, in_columns: usize, out_columns: usize) -> Result<Dataset> {
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        let mut started = false;

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|e| BpnnError::Data { line: line_no, message: e.to_string() })?;
            let trimmed = line.trim();

            if !started {
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                started = true;
            } else if trimmed.is_empty() {
                debug!("data block ends at line {line_no}");
                break;
            }

            let values = parse_row(trimmed, in_columns + out_columns, line_no)?;
            let (input, output) = values.split_at(in_columns);
            inputs.push(input.to_vec());
            outputs.push(output.to_vec());
        }

        if inputs.is_empty() {
            return Err(BpnnError::EmptyDataset { path: "<reader>".into() });
        }

        let stats = DatasetStats {
            inputs: ColumnStats::from_rows(&inputs, in_columns),
            outputs: ColumnStats::from_rows(&outputs, out_columns),
        };
        Ok(Dataset { patterns: PatternTable::new(inputs, outputs), stats })
    }
}

fn parse_row(line: &str, width: usize, line_no: usize) -> Result<Vec<f64>> {
    let values = line.split_whitespace()
        .take(width)
        .map(|cell| cell.parse::<f64>().map_err(|_| BpnnError::Data {
            line: line_no,
            message: format!("'{cell}' is not a number"),
        }))
        .collect::<Result<Vec<f64>>>()?;
    if values.len() < width {
        return Err(BpnnError::Data {
            line: line_no,
            message: format!("expected {width} values, found {}", values.len()),
        });
    }
    Ok(values)
}
