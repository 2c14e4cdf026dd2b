//! Numeric helpers shared by the predictors and the response policy

use rand::{Rng, distr::StandardUniform, prelude::IndexedRandom};

/// Index of the largest value; earlier indices win ties.
///
/// Non-finite values never win against finite ones. An empty slice yields 0.
///
/// # Examples
///
/// ```
/// use roshambo::utils::argmax;
///
/// assert_eq!(argmax(&[0.2, 0.5, 0.3]), 1);
/// assert_eq!(argmax(&[0.4, 0.2, 0.4]), 0);
/// ```
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (idx, &value) in values.iter().enumerate() {
        if value.is_finite() && value > best_value {
            best = idx;
            best_value = value;
        }
    }
    best
}

/// Numerically stable softmax over a fixed-size logit vector.
///
/// Falls back to the uniform distribution if the exponentials degenerate.
pub fn softmax<const N: usize>(logits: &[f64; N]) -> [f64; N] {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut exps = [0.0; N];
    let mut sum = 0.0;
    for (slot, &logit) in exps.iter_mut().zip(logits) {
        *slot = (logit - max).exp();
        sum += *slot;
    }

    if sum == 0.0 || !sum.is_finite() {
        return [1.0 / N as f64; N];
    }

    for slot in exps.iter_mut() {
        *slot /= sum;
    }
    exps
}

/// Normalize non-negative weights to probabilities that sum to 1.0.
///
/// A zero or non-finite total falls back to the uniform distribution.
///
/// # Examples
///
/// ```
/// use roshambo::utils::normalize_weights;
///
/// assert_eq!(normalize_weights(&[1.0, 2.0, 1.0]), [0.25, 0.5, 0.25]);
/// assert_eq!(normalize_weights(&[0.0, 0.0, 0.0]), [1.0 / 3.0; 3]);
/// ```
pub fn normalize_weights<const N: usize>(weights: &[f64; N]) -> [f64; N] {
    let sum: f64 = weights.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return [1.0 / N as f64; N];
    }
    weights.map(|w| w / sum)
}

/// Performs weighted random sampling from a collection of items.
///
/// Draws a threshold in `[0, total)` and walks the items subtracting weights
/// until the threshold is crossed. All-zero weights fall back to a uniform
/// choice; the last item is returned if rounding leaves the threshold
/// uncrossed.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use roshambo::utils::weighted_sample;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let items = vec![("a", 1.0), ("b", 2.0), ("c", 1.0)];
/// assert!(weighted_sample(&mut rng, &items).is_some());
/// ```
pub fn weighted_sample<R, T, W>(rng: &mut R, items: &[(T, W)]) -> Option<T>
where
    R: Rng,
    T: Clone,
    W: Into<f64> + Copy,
{
    if items.is_empty() {
        return None;
    }

    let total: f64 = items.iter().map(|(_, w)| (*w).into()).sum();
    if total <= 0.0 {
        return items.choose(rng).map(|(item, _)| item.clone());
    }

    let mut threshold = rng.sample::<f64, _>(StandardUniform) * total;
    for (item, weight) in items {
        let w = (*weight).into();
        if threshold < w {
            return Some(item.clone());
        }
        threshold -= w;
    }

    items.last().map(|(item, _)| item.clone())
}
