//! Trainable parameter set of the sequence model

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    rps::{Move, moves::MOVE_COUNT},
    utils::softmax,
};

/// A labelled training example: a window of player moves and the move that
/// followed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub window: Vec<Move>,
    pub label: Move,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// One-hidden-layer softmax classifier over a one-hot move window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    window: usize,
    hidden: usize,
    /// Input → hidden weights, row-major `[hidden][window * 3]`
    w1: Vec<f64>,
    b1: Vec<f64>,
    /// Hidden → output weights, row-major `[3][hidden]`
    w2: Vec<f64>,
    b2: [f64; MOVE_COUNT],
}

struct ForwardPass {
    pre_activation: Vec<f64>,
    activation: Vec<f64>,
    probs: [f64; MOVE_COUNT],
}

impl Network {
    /// Create a freshly initialised network.
    ///
    /// Weights are drawn uniformly from `±sqrt(6 / (fan_in + fan_out))`;
    /// biases start at zero. The same seed always yields the same network.
    pub fn new(window: usize, hidden: usize, seed: Option<u64>) -> Self {
        let mut rng = build_rng(seed);
        let input = window * MOVE_COUNT;

        let limit1 = (6.0 / (input + hidden).max(1) as f64).sqrt();
        let limit2 = (6.0 / (hidden + MOVE_COUNT) as f64).sqrt();

        let w1 = (0..hidden * input)
            .map(|_| rng.random_range(-limit1..=limit1))
            .collect();
        let w2 = (0..MOVE_COUNT * hidden)
            .map(|_| rng.random_range(-limit2..=limit2))
            .collect();

        Self {
            window,
            hidden,
            w1,
            b1: vec![0.0; hidden],
            w2,
            b2: [0.0; MOVE_COUNT],
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn hidden(&self) -> usize {
        self.hidden
    }

    pub fn input_len(&self) -> usize {
        self.window * MOVE_COUNT
    }

    /// Whether the parameter vectors have the sizes the dimensions imply.
    pub fn is_well_formed(&self) -> bool {
        let input = self.input_len();
        self.w1.len() == self.hidden * input
            && self.b1.len() == self.hidden
            && self.w2.len() == MOVE_COUNT * self.hidden
            && self.w1.iter().chain(&self.b1).chain(&self.w2).chain(&self.b2).all(|w| w.is_finite())
    }

    /// Concatenated one-hot encoding of a move window, oldest move first.
    ///
    /// Missing positions (a window shorter than the network's) stay zero.
    pub fn encode(&self, window: &[Move]) -> Vec<f64> {
        let mut input = vec![0.0; self.input_len()];
        for (slot, mv) in window.iter().take(self.window).enumerate() {
            input[slot * MOVE_COUNT + mv.index()] = 1.0;
        }
        input
    }

    fn forward(&self, input: &[f64]) -> ForwardPass {
        let input_len = self.input_len();
        let mut pre_activation = self.b1.clone();
        for (j, pre) in pre_activation.iter_mut().enumerate() {
            let row = &self.w1[j * input_len..(j + 1) * input_len];
            *pre += row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>();
        }
        let activation: Vec<f64> = pre_activation.iter().map(|&z| z.max(0.0)).collect();

        let mut logits = self.b2;
        for (c, logit) in logits.iter_mut().enumerate() {
            let row = &self.w2[c * self.hidden..(c + 1) * self.hidden];
            *logit += row.iter().zip(&activation).map(|(w, h)| w * h).sum::<f64>();
        }

        ForwardPass {
            pre_activation,
            activation,
            probs: softmax(&logits),
        }
    }

    /// Distribution over the next move given a window of moves.
    pub fn probabilities(&self, window: &[Move]) -> [f64; MOVE_COUNT] {
        self.forward(&self.encode(window)).probs
    }

    /// One SGD step on a single sample; returns the cross-entropy loss
    /// before the update.
    pub fn train_step(&mut self, sample: &Sample, learning_rate: f64) -> f64 {
        let input = self.encode(&sample.window);
        let pass = self.forward(&input);
        let target = sample.label.index();

        let loss = -pass.probs[target].max(1e-12).ln();

        // d(loss)/d(logits) for softmax + cross-entropy
        let mut grad_logits = pass.probs;
        grad_logits[target] -= 1.0;

        // Back-propagate into the hidden layer before touching w2.
        let mut grad_hidden = vec![0.0; self.hidden];
        for (j, grad) in grad_hidden.iter_mut().enumerate() {
            if pass.pre_activation[j] <= 0.0 {
                continue;
            }
            *grad = (0..MOVE_COUNT)
                .map(|c| self.w2[c * self.hidden + j] * grad_logits[c])
                .sum();
        }

        for c in 0..MOVE_COUNT {
            for j in 0..self.hidden {
                self.w2[c * self.hidden + j] -= learning_rate * grad_logits[c] * pass.activation[j];
            }
            self.b2[c] -= learning_rate * grad_logits[c];
        }

        let input_len = self.input_len();
        for (j, &grad) in grad_hidden.iter().enumerate() {
            if grad == 0.0 {
                continue;
            }
            let row = &mut self.w1[j * input_len..(j + 1) * input_len];
            for (w, &x) in row.iter_mut().zip(&input) {
                *w -= learning_rate * grad * x;
            }
            self.b1[j] -= learning_rate * grad;
        }

        loss
    }

    /// Fit on the samples for `epochs` in-order passes.
    ///
    /// Returns the mean loss of the final pass, or `None` when there was
    /// nothing to train on.
    pub fn fit(&mut self, samples: &[Sample], epochs: usize, learning_rate: f64) -> Option<f64> {
        if samples.is_empty() || epochs == 0 {
            return None;
        }

        let mut last_epoch_loss = 0.0;
        for _ in 0..epochs {
            let total: f64 = samples
                .iter()
                .map(|sample| self.train_step(sample, learning_rate))
                .sum();
            last_epoch_loss = total / samples.len() as f64;
        }
        Some(last_epoch_loss)
    }

    /// Mean cross-entropy over the samples without updating anything.
    pub fn loss(&self, samples: &[Sample]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        let total: f64 = samples
            .iter()
            .map(|s| -self.probabilities(&s.window)[s.label.index()].max(1e-12).ln())
            .sum();
        Some(total / samples.len() as f64)
    }
}
