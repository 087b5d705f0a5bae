use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Serialize, Deserialize};

use crate::data::patterns::PatternTable;
use crate::data::stats::{ColumnStats, DatasetStats};
use crate::error::BpnnError;

/// Column transform applied to the pattern table before training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scaling {
    None,
    /// Min-max normalisation onto `[0, 1]`.
    Normal,
    /// Z-score standardisation.
    Mean,
}

impl Scaling {
    /// Rescales inputs and outputs in place using pre-computed statistics.
    ///
    /// Constant columns divide by zero and turn into NaN; this is logged but
    /// not prevented.
    pub fn apply(&self, table: &mut PatternTable, stats: &DatasetStats) {
        match self {
            Scaling::None => {}
            Scaling::Normal => {
                warn_constant("input", &stats.inputs);
                warn_constant("output", &stats.outputs);
                transform(&mut table.inputs, &stats.inputs.min, &range(&stats.inputs));
                transform(&mut table.outputs, &stats.outputs.min, &range(&stats.outputs));
            }
            Scaling::Mean => {
                warn_constant("input", &stats.inputs);
                warn_constant("output", &stats.outputs);
                transform(&mut table.inputs, &stats.inputs.mean, &stats.inputs.std_dev);
                transform(&mut table.outputs, &stats.outputs.mean, &stats.outputs.std_dev);
            }
        }
    }
}

fn range(stats: &ColumnStats) -> Vec<f64> {
    stats.max.iter().zip(stats.min.iter()).map(|(hi, lo)| hi - lo).collect()
}

fn transform(rows: &mut [Vec<f64>], offset: &[f64], divisor: &[f64]) {
    for row in rows {
        for ((v, o), d) in row.iter_mut().zip(offset.iter()).zip(divisor.iter()) {
            *v = (*v - o) / d;
        }
    }
}

fn warn_constant(kind: &str, stats: &ColumnStats) {
    for col in stats.constant_columns() {
        warn!("{kind} column {col} is constant; scaling will produce NaN");
    }
}

impl FromStr for Scaling {
    type Err = BpnnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Scaling::None),
            "normal" => Ok(Scaling::Normal),
            "mean" => Ok(Scaling::Mean),
            other => Err(BpnnError::config(
                "scaling",
                format!("unknown scaling '{other}', expected none, normal or mean"),
            )),
        }
    }
}

impl fmt::Display for Scaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scaling::None => "none",
            Scaling::Normal => "normal",
            Scaling::Mean => "mean",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::patterns::Dataset;
    use approx::assert_abs_diff_eq;

    fn dataset() -> Dataset {
        let text = "1 10 5\n2 30 6\n4 20 9\n9 60 8\n";
        Dataset::from_reader(text.as_bytes(), 2, 1).unwrap()
    }

    #[test]
    fn none_leaves_table_untouched() {
        let mut ds = dataset();
        let before = ds.patterns.clone();
        Scaling::None.apply(&mut ds.patterns, &ds.stats);
        assert_eq!(ds.patterns, before);
    }

    #[test]
    fn normal_maps_extremes_to_unit_interval() {
        let mut ds = dataset();
        Scaling::Normal.apply(&mut ds.patterns, &ds.stats);
        assert_eq!(ds.patterns.input(0), &[0.0, 0.0]);
        assert_eq!(ds.patterns.input(3), &[1.0, 1.0]);
        assert_eq!(ds.patterns.output(0), &[0.0]);
        assert_eq!(ds.patterns.output(2), &[1.0]);
    }

    #[test]
    fn mean_standardises_columns() {
        let mut ds = dataset();
        let stats_before = ds.stats.clone();
        Scaling::Mean.apply(&mut ds.patterns, &ds.stats);
        let after = ColumnStats::from_rows(&ds.patterns.inputs, 2);
        for col in 0..2 {
            assert_abs_diff_eq!(after.mean[col], 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(after.std_dev[col], 1.0, epsilon = 1e-12);
        }
        assert_eq!(ds.stats, stats_before);
    }

    #[test]
    fn constant_column_turns_into_nan() {
        for scaling in [Scaling::Normal, Scaling::Mean] {
            let mut ds = Dataset::from_reader("1 5 0\n2 5 1\n".as_bytes(), 2, 1).unwrap();
            scaling.apply(&mut ds.patterns, &ds.stats);
            assert!(ds.patterns.input(0)[1].is_nan(), "{scaling}");
            assert!(ds.patterns.input(1)[1].is_nan(), "{scaling}");
            assert!(ds.patterns.inputs.iter().all(|row| row[0].is_finite()), "{scaling}");
            assert!(ds.patterns.outputs.iter().all(|row| row[0].is_finite()), "{scaling}");
        }

        let mut ds = Dataset::from_reader("1 5 0\n2 5 1\n".as_bytes(), 2, 1).unwrap();
        Scaling::Mean.apply(&mut ds.patterns, &ds.stats);
        assert_eq!(ds.patterns.input(0)[0], -1.0);
        assert_eq!(ds.patterns.input(1)[0], 1.0);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("NORMAL".parse::<Scaling>().unwrap(), Scaling::Normal);
        assert_eq!(" mean\r".parse::<Scaling>().unwrap(), Scaling::Mean);
        assert!("minmax".parse::<Scaling>().is_err());
    }
}
