use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{KeyGenError, Result};

/// Supplies the decimal digits used to fill a key body.
pub trait DigitSource {
    /// Returns the next digit, always in `0..=9`.
    fn next_digit(&mut self) -> u8;
}

/// Uniformly random digits drawn from an [`Rng`].
#[derive(Debug, Clone)]
pub struct RandomDigits<R = StdRng> {
    rng: R,
}

impl RandomDigits<StdRng> {
    pub fn new() -> Self {
        RandomDigits {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomDigits<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomDigits<R> {
    pub fn from_rng(rng: R) -> Self {
        RandomDigits { rng }
    }
}

impl<R: Rng> DigitSource for RandomDigits<R> {
    fn next_digit(&mut self) -> u8 {
        self.rng.gen_range(0..10)
    }
}

/// Replays a fixed digit sequence, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct SequenceDigits {
    digits: Vec<u8>,
    position: usize,
}

impl SequenceDigits {
    /// Builds a source from a non-empty string of `0-9` characters.
    pub fn parse(digits: &str) -> Result<Self> {
        if digits.is_empty() {
            return Err(KeyGenError::InvalidInput(
                "digit sequence must not be empty".to_string(),
            ));
        }
        let digits = digits
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or_else(|| KeyGenError::InvalidInput(format!("{:?} is not a digit", c)))
            })
            .collect::<Result<Vec<u8>>>()?;
        Ok(SequenceDigits {
            digits,
            position: 0,
        })
    }
}

impl DigitSource for SequenceDigits {
    fn next_digit(&mut self) -> u8 {
        let digit = self.digits[self.position];
        self.position = (self.position + 1) % self.digits.len();
        digit
    }
}
