//! Seeded Train/Test Split

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices assigned to each side of the split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `n` row indices with `seed` and hold out a `test_fraction` share
///
/// The test side gets `ceil(test_fraction * n)` rows, capped so at least one
/// training row remains. Nothing is held out when `n < 2` or the fraction
/// is not positive.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Split {
    let mut indices: Vec<usize> = (0..n).collect();

    if n < 2 || !(test_fraction > 0.0) {
        return Split {
            train: indices,
            test: Vec::new(),
        };
    }

    let n_test = ((test_fraction * n as f64).ceil() as usize).clamp(1, n - 1);

    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Split {
        train,
        test: indices,
    }
}
