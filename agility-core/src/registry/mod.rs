//! Runtime algorithm registry.
//!
//! A [`Registry`] maps algorithm names to suites for each [`SuiteKind`] and
//! owns the [`PrefixTables`] the wire codec encodes through. It is filled
//! during start-up and read afterwards; registration takes a write lock per
//! table, lookups take a read lock.
//!
//! Registering the same name twice is a programming error and panics. The
//! `try_register_*` twins return the error instead.

pub mod prefix;

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::codec::WireCodec;
use crate::crypto::{
    keccak256_160_suite, keccak256_suite, sha256_160_suite, sha256_suite, AddressSuite,
    Ed25519Suite, HashSuite, KeySuite, Secp256k1Suite, SuiteKind,
};
use crate::error::ConfigError;

pub use prefix::{PrefixTable, PrefixTables, RESERVED_TAG};

/// Name-keyed suites of one kind.
struct SuiteTable<S: ?Sized> {
    kind: SuiteKind,
    suites: RwLock<HashMap<&'static str, Arc<S>>>,
}

impl<S: ?Sized> SuiteTable<S> {
    fn new(kind: SuiteKind) -> Self {
        Self {
            kind,
            suites: RwLock::new(HashMap::new()),
        }
    }

    fn insert(&self, algorithm: &'static str, suite: Arc<S>) -> Result<(), ConfigError> {
        let mut suites = self.suites.write().unwrap_or_else(PoisonError::into_inner);
        match suites.entry(algorithm) {
            Entry::Occupied(_) => Err(ConfigError::DuplicateAlgorithm {
                kind: self.kind,
                algorithm: algorithm.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(suite);
                tracing::debug!("Registered {} suite: {}", self.kind, algorithm);
                Ok(())
            }
        }
    }

    fn get(&self, algorithm: &str) -> Result<Arc<S>, ConfigError> {
        let suites = self.suites.read().unwrap_or_else(PoisonError::into_inner);
        suites
            .get(algorithm)
            .cloned()
            .ok_or_else(|| ConfigError::NotFound {
                kind: self.kind,
                algorithm: algorithm.to_string(),
            })
    }

    fn contains(&self, algorithm: &str) -> bool {
        let suites = self.suites.read().unwrap_or_else(PoisonError::into_inner);
        suites.contains_key(algorithm)
    }

    fn names(&self) -> Vec<&'static str> {
        let suites = self.suites.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<_> = suites.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Check this table against its prefix table in both directions.
    fn validate(&self, prefixes: &PrefixTable) -> Result<(), ConfigError> {
        for algorithm in self.names() {
            if prefixes.tag(algorithm).is_none() {
                return Err(ConfigError::MissingTag {
                    kind: self.kind,
                    algorithm: algorithm.to_string(),
                });
            }
        }
        for (algorithm, tag) in prefixes.entries() {
            if !self.contains(algorithm) {
                return Err(ConfigError::MissingSuite {
                    kind: self.kind,
                    tag,
                    algorithm: algorithm.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Algorithm registry shared by every codec and entity operation.
pub struct Registry {
    prefixes: PrefixTables,
    hashes: SuiteTable<dyn HashSuite>,
    addresses: SuiteTable<dyn AddressSuite>,
    keys: SuiteTable<dyn KeySuite>,
}

impl Registry {
    /// Create an empty registry over the given prefix tables.
    pub fn new(prefixes: PrefixTables) -> Self {
        Self {
            prefixes,
            hashes: SuiteTable::new(SuiteKind::Hash),
            addresses: SuiteTable::new(SuiteKind::Address),
            keys: SuiteTable::new(SuiteKind::Key),
        }
    }

    /// Registry with every built-in suite over the canonical prefix tables.
    ///
    /// # Panics
    ///
    /// If the built-in suites and tables disagree.
    pub fn standard() -> Self {
        let registry = Self::new(PrefixTables::canonical());
        registry.register_hash_suite(sha256_suite());
        registry.register_hash_suite(keccak256_suite());
        registry.register_address_suite(sha256_160_suite());
        registry.register_address_suite(keccak256_160_suite());
        registry.register_key_suite(Ed25519Suite);
        registry.register_key_suite(Secp256k1Suite);
        if let Err(e) = registry.validate() {
            fatal(e);
        }
        registry
    }

    /// Register a hash suite under its algorithm name.
    ///
    /// # Panics
    ///
    /// If the name is already taken.
    pub fn register_hash_suite<S: HashSuite + 'static>(&self, suite: S) {
        if let Err(e) = self.try_register_hash_suite(suite) {
            fatal(e);
        }
    }

    /// Register an address suite under its algorithm name.
    ///
    /// # Panics
    ///
    /// If the name is already taken.
    pub fn register_address_suite<S: AddressSuite + 'static>(&self, suite: S) {
        if let Err(e) = self.try_register_address_suite(suite) {
            fatal(e);
        }
    }

    /// Register a key suite under its algorithm name.
    ///
    /// # Panics
    ///
    /// If the name is already taken.
    pub fn register_key_suite<S: KeySuite + 'static>(&self, suite: S) {
        if let Err(e) = self.try_register_key_suite(suite) {
            fatal(e);
        }
    }

    /// Register a hash suite, reporting a name collision as an error.
    pub fn try_register_hash_suite<S: HashSuite + 'static>(
        &self,
        suite: S,
    ) -> Result<(), ConfigError> {
        self.hashes.insert(suite.algorithm(), Arc::new(suite))
    }

    /// Register an address suite, reporting a name collision as an error.
    pub fn try_register_address_suite<S: AddressSuite + 'static>(
        &self,
        suite: S,
    ) -> Result<(), ConfigError> {
        self.addresses.insert(suite.algorithm(), Arc::new(suite))
    }

    /// Register a key suite, reporting a name collision as an error.
    pub fn try_register_key_suite<S: KeySuite + 'static>(
        &self,
        suite: S,
    ) -> Result<(), ConfigError> {
        self.keys.insert(suite.algorithm(), Arc::new(suite))
    }

    /// Look up a hash suite.
    pub fn hash_suite(&self, algorithm: &str) -> Result<Arc<dyn HashSuite>, ConfigError> {
        self.hashes.get(algorithm)
    }

    /// Look up an address suite.
    pub fn address_suite(&self, algorithm: &str) -> Result<Arc<dyn AddressSuite>, ConfigError> {
        self.addresses.get(algorithm)
    }

    /// Look up a key suite.
    pub fn key_suite(&self, algorithm: &str) -> Result<Arc<dyn KeySuite>, ConfigError> {
        self.keys.get(algorithm)
    }

    /// Registered algorithm names of `kind`, sorted.
    pub fn algorithms(&self, kind: SuiteKind) -> Vec<&'static str> {
        match kind {
            SuiteKind::Hash => self.hashes.names(),
            SuiteKind::Address => self.addresses.names(),
            SuiteKind::Key => self.keys.names(),
        }
    }

    /// Check that every registered suite has a tag and every tag has a suite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hashes.validate(&self.prefixes.hash)?;
        self.addresses.validate(&self.prefixes.address)?;
        self.keys.validate(&self.prefixes.key)?;
        tracing::debug!(
            "Registry validated: {} hash, {} address, {} key suites",
            self.hashes.names().len(),
            self.addresses.names().len(),
            self.keys.names().len()
        );
        Ok(())
    }

    /// Prefix tables this registry encodes through.
    pub fn prefixes(&self) -> &PrefixTables {
        &self.prefixes
    }

    /// Wire codec bound to this registry.
    pub fn codec(&self) -> WireCodec<'_> {
        WireCodec::new(self)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("hash", &self.hashes.names())
            .field("address", &self.addresses.names())
            .field("key", &self.keys.names())
            .finish()
    }
}

/// Log and abort on a broken registry.
fn fatal(e: ConfigError) -> ! {
    tracing::error!("Fatal crypto registry configuration: {}", e);
    panic!("fatal crypto registry configuration: {e}");
}
