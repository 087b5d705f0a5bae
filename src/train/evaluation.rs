use serde::{Serialize, Deserialize};

use crate::cost::EnergyCost;

/// Network predictions next to their expected values for a set of patterns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Evaluation {
    /// Output-column count, known even when no rows were evaluated.
    pub columns: usize,
    /// `(predicted, expected)` per evaluated pattern, in pattern order.
    pub rows: Vec<(Vec<f64>, Vec<f64>)>,
}

impl Evaluation {
    pub fn new(columns: usize) -> Evaluation {
        Evaluation { columns, rows: Vec::new() }
    }

    pub fn push(&mut self, predicted: Vec<f64>, expected: Vec<f64>) {
        self.rows.push((predicted, expected));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Per output column, how many rows whose rounded prediction differs
    /// from the expected value.
    #[allow(clippy::float_cmp)]
    pub fn misclassified(&self) -> Vec<usize> {
        let mut wrong = vec![0; self.columns];
        for (predicted, expected) in &self.rows {
            for (col, (p, e)) in predicted.iter().zip(expected.iter()).enumerate() {
                if p.round() != *e {
                    wrong[col] += 1;
                }
            }
        }
        wrong
    }

    /// Misclassification rate per output column in percent; empty when no
    /// rows were evaluated.
    pub fn error_percentages(&self) -> Vec<f64> {
        if self.rows.is_empty() {
            return Vec::new();
        }
        let n = self.rows.len() as f64;
        self.misclassified().into_iter()
            .map(|wrong| 100.0 * wrong as f64 / n)
            .collect()
    }

    pub fn mean_energy(&self) -> f64 {
        EnergyCost::mean(&self.rows)
    }
}
