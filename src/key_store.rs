use clap::ValueEnum;

use crate::error::KeyStoreError;
use crate::redis_key_store::RedisKeyStore;
use crate::serial_key::SerialKey;

/// Append-only record of accepted keys for one generation run.
pub trait KeyStore {
    /// Appends `key`. Duplicates are kept.
    fn save(&mut self, key: &SerialKey) -> Result<(), KeyStoreError>;
    /// Every key saved so far, in insertion order.
    fn get_all(&self) -> Result<Vec<SerialKey>, KeyStoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryKeyStore {
    keys: Vec<SerialKey>,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        InMemoryKeyStore { keys: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyStore for InMemoryKeyStore {
    fn save(&mut self, key: &SerialKey) -> Result<(), KeyStoreError> {
        self.keys.push(key.clone());
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<SerialKey>, KeyStoreError> {
        Ok(self.keys.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    Memory,
    Redis,
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub redis_url: String,
}

impl StoreSettings {
    pub fn in_memory() -> Self {
        StoreSettings {
            backend: StoreBackend::Memory,
            redis_url: String::new(),
        }
    }
}

/// Opens a fresh, empty store for one generation run.
pub fn open_store(settings: &StoreSettings) -> Result<Box<dyn KeyStore + Send>, KeyStoreError> {
    match settings.backend {
        StoreBackend::Memory => Ok(Box::new(InMemoryKeyStore::new())),
        StoreBackend::Redis => Ok(Box::new(RedisKeyStore::new(&settings.redis_url)?)),
    }
}
