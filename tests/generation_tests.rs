use regex::Regex;
use serial_keygen::luhn::is_valid;
use serial_keygen::{
    GeneratorConfig, InMemoryKeyStore, KeyGenError, KeyStore, KeyStoreError, SequenceDigits,
    SerialKey, SerialKeyGenerator,
};

/// Accepts a fixed number of saves, then fails like an unreachable backend.
struct FlakyStore {
    inner: InMemoryKeyStore,
    remaining: usize,
}

impl KeyStore for FlakyStore {
    fn save(&mut self, key: &SerialKey) -> Result<(), KeyStoreError> {
        if self.remaining == 0 {
            return Err(KeyStoreError::Corrupt(key.to_string()));
        }
        self.remaining -= 1;
        self.inner.save(key)
    }

    fn get_all(&self) -> Result<Vec<SerialKey>, KeyStoreError> {
        self.inner.get_all()
    }
}

#[test]
fn test_generate_ten_keys_with_prefix_and_suffix() {
    let mut generator = SerialKeyGenerator::new();
    let mut store = InMemoryKeyStore::new();

    let keys = generator
        .generate_valid_keys("1234", "24", 10, &mut store)
        .unwrap();

    let shape = Regex::new(r"^1234[0-9]{11}[0-9]-24$").unwrap();
    assert_eq!(keys.len(), 10);
    for key in &keys {
        assert!(shape.is_match(key.as_str()), "unexpected key {}", key);
        assert!(is_valid(&key.as_str().replace('-', "")[..16]).unwrap());
        assert!(is_valid(&key.numeric_digits()).unwrap());
    }

    assert_eq!(store.get_all().unwrap(), keys);
}

#[test]
fn test_deterministic_generation_with_injected_digits() {
    let mut generator = SerialKeyGenerator::with_source(
        SequenceDigits::parse("0123456789").unwrap(),
        GeneratorConfig::default(),
    );
    let mut store = InMemoryKeyStore::new();

    let keys = generator
        .generate_valid_keys("1234", "24", 2, &mut store)
        .unwrap();

    let stored: Vec<String> = store
        .get_all()
        .unwrap()
        .into_iter()
        .map(SerialKey::into_string)
        .collect();
    assert_eq!(stored, vec!["1234012345678909-24", "1234123456789011-24"]);
    assert_eq!(keys[0].as_str(), stored[0]);
}

#[test]
fn test_zero_count_is_rejected_without_saving() {
    let mut generator = SerialKeyGenerator::new();
    let mut store = InMemoryKeyStore::new();

    let err = generator
        .generate_valid_keys("1234", "24", 0, &mut store)
        .unwrap_err();
    assert!(matches!(err, KeyGenError::InvalidCount(0)));
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn test_store_failure_is_surfaced() {
    let mut generator = SerialKeyGenerator::new();
    let mut store = FlakyStore {
        inner: InMemoryKeyStore::new(),
        remaining: 2,
    };

    let err = generator
        .generate_valid_keys("1234", "24", 5, &mut store)
        .unwrap_err();
    assert!(matches!(err, KeyGenError::Store(KeyStoreError::Corrupt(_))));
    assert_eq!(store.get_all().unwrap().len(), 2);
}

#[test]
fn test_store_is_readable_between_runs() {
    let mut generator = SerialKeyGenerator::new();
    let mut store = InMemoryKeyStore::new();

    let first = generator.generate_valid_keys("99", "A", 2, &mut store).unwrap();
    assert_eq!(store.get_all().unwrap(), first);

    let second = generator.generate_valid_keys("99", "A", 3, &mut store).unwrap();
    let all = store.get_all().unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(&all[..2], &first[..]);
    assert_eq!(&all[2..], &second[..]);
}

#[test]
fn test_digit_suffix_stays_out_of_the_checksum() {
    let mut generator = SerialKeyGenerator::new();
    let mut store = InMemoryKeyStore::new();

    let keys = generator
        .generate_valid_keys("1234", "24", 10, &mut store)
        .unwrap();

    for key in &keys {
        assert!(is_valid(&key.numeric_digits()).unwrap());
        // Counting the suffix digits adds a constant 8 to a valid sum.
        let all_digits: String = key.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
        assert_eq!(all_digits.len(), 18);
        assert!(!is_valid(&all_digits).unwrap(), "{} passed with its suffix", key);
    }
}
