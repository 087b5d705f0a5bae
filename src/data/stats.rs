use serde::{Serialize, Deserialize};

/// Per-column min, max, mean and population standard deviation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnStats {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
}

impl ColumnStats {
    /// Min, max and mean in one pass; the standard deviation in a second pass
    /// against the finished means.
    pub fn from_rows(rows: &[Vec<f64>], width: usize) -> ColumnStats {
        let mut min = vec![f64::INFINITY; width];
        let mut max = vec![f64::NEG_INFINITY; width];
        let mut mean = vec![0.0; width];

        for row in rows {
            for (col, &v) in row.iter().enumerate().take(width) {
                mean[col] += v;
                if v < min[col] {
                    min[col] = v;
                }
                if v > max[col] {
                    max[col] = v;
                }
            }
        }
        let n = rows.len() as f64;
        for m in &mut mean {
            *m /= n;
        }

        let mut std_dev = vec![0.0; width];
        for row in rows {
            for (col, &v) in row.iter().enumerate().take(width) {
                let d = v - mean[col];
                std_dev[col] += d * d;
            }
        }
        for s in &mut std_dev {
            *s = (*s / n).sqrt();
        }

        ColumnStats { min, max, mean, std_dev }
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// Indices of columns whose values never change (zero range).
    #[allow(clippy::float_cmp)]
    pub fn constant_columns(&self) -> Vec<usize> {
        self.min.iter()
            .zip(self.max.iter())
            .enumerate()
            .filter(|(_, (lo, hi))| lo == hi)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Statistics of the input and output columns of a pattern table, taken
/// before any scaling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatasetStats {
    pub inputs: ColumnStats,
    pub outputs: ColumnStats,
}
