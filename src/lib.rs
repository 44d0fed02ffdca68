pub mod api;
pub mod config;
pub mod digit_source;
pub mod error;
pub mod generator;
pub mod key_store;
pub mod logger;
pub mod luhn;
pub mod redis_key_store;
pub mod serial_key;

pub use digit_source::{DigitSource, RandomDigits, SequenceDigits};
pub use error::{KeyGenError, KeyStoreError, Result};
pub use generator::{GeneratorConfig, SerialKeyGenerator};
pub use key_store::{InMemoryKeyStore, KeyStore, StoreBackend, StoreSettings};
pub use redis_key_store::RedisKeyStore;
pub use serial_key::SerialKey;
