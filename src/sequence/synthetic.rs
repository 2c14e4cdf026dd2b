//! Synthetic pretraining corpus
//!
//! Before any real games exist the sequence network can be warmed up on
//! generated windows. Most windows are uniformly random; the rest follow one
//! of the habitual cycles people fall into (double up, then rotate). Every
//! window is labelled with the move that beats its last move, i.e. the
//! common tendency to switch to whatever would have won the previous round.

use rand::{Rng, prelude::IndexedRandom};

use crate::{rps::Move, sequence::network::Sample};

/// Share of generated windows drawn uniformly at random.
pub const RANDOM_SHARE: f64 = 0.7;

/// Habitual cycles; a window is read off one of these starting at slot 0.
pub const HABIT_CYCLES: [[Move; 4]; 3] = [
    [Move::Rock, Move::Rock, Move::Paper, Move::Scissors],
    [Move::Paper, Move::Paper, Move::Scissors, Move::Rock],
    [Move::Scissors, Move::Scissors, Move::Rock, Move::Paper],
];

fn habit_window(cycle: &[Move; 4], window: usize) -> Vec<Move> {
    (0..window).map(|i| cycle[i % cycle.len()]).collect()
}

/// Generate `count` labelled windows of length `window`.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use roshambo::sequence::synthetic::generate;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let samples = generate(100, 5, &mut rng);
/// assert_eq!(samples.len(), 100);
/// assert!(samples.iter().all(|s| s.label == s.window[4].counter()));
/// ```
pub fn generate<R: Rng>(count: usize, window: usize, rng: &mut R) -> Vec<Sample> {
    if window == 0 {
        return Vec::new();
    }

    (0..count)
        .map(|_| {
            let moves: Vec<Move> = if rng.random::<f64>() < RANDOM_SHARE {
                (0..window)
                    .map(|_| Move::from_index(rng.random_range(0..Move::ALL.len())))
                    .collect()
            } else {
                let cycle = HABIT_CYCLES
                    .choose(rng)
                    .unwrap_or(&HABIT_CYCLES[0]);
                habit_window(cycle, window)
            };
            let label = moves[window - 1].counter();
            Sample {
                window: moves,
                label,
            }
        })
        .collect()
}
