use redis::{Client, Commands};
use uuid::Uuid;

use crate::error::KeyStoreError;
use crate::key_store::KeyStore;
use crate::serial_key::SerialKey;

/// Keeps one run's keys in a Redis list under `serial_keys:{run_id}`.
#[derive(Clone, Debug)]
pub struct RedisKeyStore {
    client: Client,
    run_id: String,
    list_key: String,
}

impl RedisKeyStore {
    pub fn new(redis_url: &str) -> Result<Self, KeyStoreError> {
        Self::with_run_id(redis_url, &Uuid::new_v4().to_string())
    }

    pub fn with_run_id(redis_url: &str, run_id: &str) -> Result<Self, KeyStoreError> {
        let client = Client::open(redis_url)?;
        client.get_connection()?;
        Ok(RedisKeyStore {
            client,
            run_id: run_id.to_string(),
            list_key: format!("serial_keys:{}", run_id),
        })
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn list_key(&self) -> &str {
        &self.list_key
    }
}

impl KeyStore for RedisKeyStore {
    fn save(&mut self, key: &SerialKey) -> Result<(), KeyStoreError> {
        let mut conn = self.client.get_connection()?;
        let _: () = conn.rpush(&self.list_key, key.as_str())?;
        tracing::debug!(list = %self.list_key, key = %key, "saved serial key to redis");
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<SerialKey>, KeyStoreError> {
        let mut conn = self.client.get_connection()?;
        let values: Vec<String> = conn.lrange(&self.list_key, 0, -1)?;
        values
            .into_iter()
            .map(|value| match SerialKey::parse(&value) {
                Ok(key) => Ok(key),
                Err(_) => Err(KeyStoreError::Corrupt(value)),
            })
            .collect()
    }
}
