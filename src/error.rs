use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyGenError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prefix too long: {length} digits exceeds the {max} digit budget")]
    PrefixTooLong { length: usize, max: usize },

    #[error("Invalid count: {0} (expected a positive integer)")]
    InvalidCount(i64),

    #[error("No Luhn-valid candidate after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("Key store error: {0}")]
    Store(#[from] KeyStoreError),
}

impl KeyGenError {
    /// True when the caller supplied bad input, as opposed to a backend failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            KeyGenError::InvalidInput(_)
                | KeyGenError::PrefixTooLong { .. }
                | KeyGenError::InvalidCount(_)
        )
    }
}

#[derive(Error, Debug)]
pub enum KeyStoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Stored value is not a serial key: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, KeyGenError>;
