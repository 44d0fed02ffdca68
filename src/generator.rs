use tracing::{debug, info, warn};

use crate::digit_source::{DigitSource, RandomDigits};
use crate::error::{KeyGenError, Result};
use crate::key_store::KeyStore;
use crate::luhn;
use crate::serial_key::SerialKey;

/// Digits before the check digit: prefix plus random fill.
pub const BODY_LEN: usize = 15;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Candidates tried per key before giving up with `RetriesExhausted`.
    pub max_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

pub struct SerialKeyGenerator<D = RandomDigits> {
    digits: D,
    config: GeneratorConfig,
}

impl SerialKeyGenerator<RandomDigits> {
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self::with_source(RandomDigits::new(), config)
    }
}

impl Default for SerialKeyGenerator<RandomDigits> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DigitSource> SerialKeyGenerator<D> {
    pub fn with_source(digits: D, config: GeneratorConfig) -> Self {
        SerialKeyGenerator { digits, config }
    }

    /// Builds `{prefix}{random fill}{check digit}-{suffix}` with a 16 digit
    /// numeric portion.
    pub fn generate_candidate(&mut self, prefix: &str, suffix: &str) -> Result<SerialKey> {
        check_prefix(prefix)?;

        let mut numeric = String::with_capacity(BODY_LEN + 1);
        numeric.push_str(prefix);
        for _ in prefix.len()..BODY_LEN {
            numeric.push(to_char(self.digits.next_digit())?);
        }
        let check_digit = luhn::compute_check_digit(&numeric)?;
        numeric.push(to_char(check_digit)?);

        Ok(SerialKey::from_parts(numeric, suffix))
    }

    /// Generates `count` Luhn-valid keys, saving each to `store` as it is
    /// accepted. Returns them in acceptance order.
    pub fn generate_valid_keys<S>(
        &mut self,
        prefix: &str,
        suffix: &str,
        count: usize,
        store: &mut S,
    ) -> Result<Vec<SerialKey>>
    where
        S: KeyStore + ?Sized,
    {
        if count == 0 {
            return Err(KeyGenError::InvalidCount(0));
        }
        check_prefix(prefix)?;

        info!(prefix, suffix, count, "generating serial keys");
        let mut keys = Vec::with_capacity(count);
        while keys.len() < count {
            let key = self.next_valid_key(prefix, suffix)?;
            store.save(&key)?;
            debug!(key = %key, accepted = keys.len() + 1, "accepted serial key");
            keys.push(key);
        }
        Ok(keys)
    }

    fn next_valid_key(&mut self, prefix: &str, suffix: &str) -> Result<SerialKey> {
        for attempt in 1..=self.config.max_attempts {
            let candidate = self.generate_candidate(prefix, suffix)?;
            if luhn::is_valid(&candidate.numeric_digits())? {
                return Ok(candidate);
            }
            warn!(attempt, candidate = %candidate, "candidate failed Luhn re-validation");
        }
        Err(KeyGenError::RetriesExhausted {
            attempts: self.config.max_attempts,
        })
    }
}

/// Converts a caller-supplied count into a positive `usize`.
pub fn positive_count(requested: i64) -> Result<usize> {
    match usize::try_from(requested) {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(KeyGenError::InvalidCount(requested)),
    }
}

fn check_prefix(prefix: &str) -> Result<()> {
    let length = prefix.chars().count();
    if length > BODY_LEN {
        return Err(KeyGenError::PrefixTooLong {
            length,
            max: BODY_LEN,
        });
    }
    if let Some(c) = prefix.chars().find(|c| !c.is_ascii_digit()) {
        return Err(KeyGenError::InvalidInput(format!(
            "prefix {:?} contains non-digit character {:?}",
            prefix, c
        )));
    }
    Ok(())
}

fn to_char(digit: u8) -> Result<char> {
    char::from_digit(u32::from(digit), 10)
        .ok_or_else(|| KeyGenError::InvalidInput(format!("{} is not a decimal digit", digit)))
}
