//! Stochastic content generators for test variations
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use jtree_core::Value;

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("JTREE_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    /// Returns 0, 1, 2, ... with decreasing probability
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Poisson-like count (simplified)
    pub fn poisson(&mut self, lambda: f64) -> usize {
        let l = (-lambda).exp();
        let mut k = 0;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= self.rng.gen::<f64>();
            if p <= l {
                break;
            }
        }
        k - 1
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Short run of insignificant whitespace, at least one character
    pub fn whitespace(&mut self) -> String {
        const SPACE: &[char] = &[' ', ' ', ' ', '\t', '\n', '\r'];
        (0..1 + self.geometric(0.5))
            .map(|_| SPACE[self.rng.gen_range(0..SPACE.len())])
            .collect()
    }

    /// A line comment, newline included
    pub fn comment(&mut self) -> String {
        const WORDS: &[&str] = &["note", "TODO", "see above", "[1, 2]", "{\"k\": 0}", "//", "é"];
        let word = WORDS[self.rng.gen_range(0..WORDS.len())];
        format!("// {word}\n")
    }

    /// One or more comment lines
    pub fn comment_lines(&mut self) -> String {
        (0..self.geometric(0.5) + 1).map(|_| self.comment()).collect()
    }

    /// Inject random blank lines
    pub fn blank_lines(&mut self) -> String {
        "\n".repeat(self.geometric(0.3))
    }

    /// Random key for a dict
    pub fn key(&mut self) -> String {
        let len = self.geometric(0.7);
        let chars = b"abcdefghijklmnopqrstuvwxyz0123456789_ \"\\/";
        (0..len)
            .map(|_| chars[self.rng.gen_range(0..chars.len())] as char)
            .collect()
    }

    /// Random value tree, at most `depth` levels of containers deep
    pub fn value(&mut self, depth: usize) -> Value {
        let pick = if depth == 0 {
            self.rng.gen_range(0..5)
        } else {
            self.rng.gen_range(0..7)
        };
        match pick {
            0 => Value::Null,
            1 => Value::Bool(self.chance(0.5)),
            2 => Value::Int(self.rng.gen()),
            3 => Value::Float(self.rng.gen_range(-1.0e6..1.0e6)),
            4 => Value::String(self.key()),
            5 => {
                let len = self.geometric(0.7);
                Value::List((0..len).map(|_| self.value(depth - 1)).collect())
            }
            _ => {
                let len = self.geometric(0.7);
                (0..len).map(|_| (self.key(), self.value(depth - 1))).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut g1 = Gen::new(42);
        let mut g2 = Gen::new(42);

        for _ in 0..10 {
            assert_eq!(g1.value(3), g2.value(3));
            assert_eq!(g1.geometric(0.9), g2.geometric(0.9));
        }
    }

    #[test]
    fn test_geometric_distribution() {
        let mut gen = Gen::new(12345);
        let samples: Vec<usize> = (0..1000).map(|_| gen.geometric(0.9)).collect();

        // With α=0.9, we expect mean ≈ 9 (geometric mean = α/(1-α))
        let mean: f64 = samples.iter().sum::<usize>() as f64 / samples.len() as f64;
        assert!(mean > 5.0 && mean < 15.0, "Mean {} out of expected range", mean);
    }
}
