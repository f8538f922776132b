//! Injectable random source.
//!
//! Components never reach for an ambient generator; they draw from whatever
//! [`Entropy`] the screen was built with. Production uses [`RngEntropy`], tests replay
//! fixed sequences through [`ScriptedEntropy`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait Entropy {
    /// Uniform integer in `0..upper`. Returns 0 when `upper` is 0.
    fn below(&mut self, upper: usize) -> usize;

    /// Uniform float in `[0, 1)`.
    fn fraction(&mut self) -> f64;
}

impl<E: Entropy + ?Sized> Entropy for &mut E {
    fn below(&mut self, upper: usize) -> usize {
        (**self).below(upper)
    }

    fn fraction(&mut self) -> f64 {
        (**self).fraction()
    }
}

impl<E: Entropy + ?Sized> Entropy for Box<E> {
    fn below(&mut self, upper: usize) -> usize {
        (**self).below(upper)
    }

    fn fraction(&mut self) -> f64 {
        (**self).fraction()
    }
}

#[derive(Debug, Clone)]
pub struct RngEntropy<R> {
    rng: R,
}

impl RngEntropy<StdRng> {
    pub fn from_os() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RngEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Entropy for RngEntropy<R> {
    fn below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }

    fn fraction(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of fractions, cycling when exhausted.
///
/// `below(n)` maps the next fraction `f` to `floor(f * n)`, so a script written in
/// terms of fractions drives both integer picks and continuous draws.
#[derive(Debug, Clone)]
pub struct ScriptedEntropy {
    values: Vec<f64>,
    pos: usize,
}

impl ScriptedEntropy {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values: Vec<f64> = values.into();
        let values = values
            .into_iter()
            .map(|v| if v.is_finite() { v.clamp(0.0, 0.999_999) } else { 0.0 })
            .collect();
        Self { values, pos: 0 }
    }

    /// Always yields the same fraction.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl Entropy for ScriptedEntropy {
    fn below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        let picked = (self.fraction() * upper as f64) as usize;
        picked.min(upper - 1)
    }

    fn fraction(&mut self) -> f64 {
        if self.values.is_empty() {
            self.pos += 1;
            return 0.0;
        }
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/entropy.rs"]
mod tests;
