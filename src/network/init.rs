use rand::Rng;

/// Uniform initialisation ranges for weights and thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightInit {
    pub weight_range: (f64, f64),
    pub threshold_range: (f64, f64),
}

impl WeightInit {
    pub fn new(weight_range: (f64, f64), threshold_range: (f64, f64)) -> WeightInit {
        WeightInit { weight_range, threshold_range }
    }

    pub fn weight<R: Rng>(&self, rng: &mut R) -> f64 {
        uniform(rng, self.weight_range)
    }

    /// A degenerate range `[t, t]` pins every threshold to exactly `t`
    /// without consuming a random draw.
    #[allow(clippy::float_cmp)]
    pub fn threshold<R: Rng>(&self, rng: &mut R) -> f64 {
        let (min, max) = self.threshold_range;
        if min == max {
            min
        } else {
            uniform(rng, self.threshold_range)
        }
    }
}

fn uniform<R: Rng>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    min + rng.gen::<f64>() * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn draws_stay_in_range() {
        let init = WeightInit::new((-0.5, 0.5), (0.1, 0.2));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let w = init.weight(&mut rng);
            assert!((-0.5..=0.5).contains(&w));
            let t = init.threshold(&mut rng);
            assert!((0.1..=0.2).contains(&t));
        }
    }

    #[test]
    fn equal_threshold_bounds_are_fixed() {
        let init = WeightInit::new((-1.0, 1.0), (0.3, 0.3));
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            assert_eq!(init.threshold(&mut rng), 0.3);
        }
    }
}
