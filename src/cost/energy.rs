/// Quadratic "energy" cost: `E = 1/2 * sum_j (expected_j - predicted_j)^2`.
///
/// Reported alongside training and evaluation; the weight updates use the
/// delta rule directly and never call into this.
pub struct EnergyCost;

impl EnergyCost {
    pub fn cost(predicted: &[f64], expected: &[f64]) -> f64 {
        0.5 * predicted.iter().zip(expected.iter())
            .map(|(o, t)| (t - o).powi(2))
            .sum::<f64>()
    }

    /// Mean energy over a set of `(predicted, expected)` rows; `0.0` when empty.
    pub fn mean(rows: &[(Vec<f64>, Vec<f64>)]) -> f64 {
        if rows.is_empty() {
            return 0.0;
        }
        rows.iter().map(|(p, e)| EnergyCost::cost(p, e)).sum::<f64>() / rows.len() as f64
    }
}
