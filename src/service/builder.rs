//! Builder pattern for configuring Pokemon service instances.
//!
//! Configuration only covers listing: how many records a page holds when the
//! caller does not say, and the largest page a caller may ask for.

use crate::error::{BuildError, BuildResult};
use crate::service::PokemonService;
use crate::storage::StorageProvider;
use std::env;

/// Environment variable holding the default page size.
pub const DEFAULT_LIMIT_ENV: &str = "POKEDEX_DEFAULT_LIMIT";
/// Environment variable holding the largest allowed page size.
pub const MAX_LIMIT_ENV: &str = "POKEDEX_MAX_LIMIT";

/// Configuration for a [`PokemonService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Page size used when a list query has no limit.
    pub default_limit: usize,

    /// Upper bound applied to any requested limit.
    pub max_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the environment.
    ///
    /// Unset variables keep their defaults. Values that do not parse as a
    /// non-negative integer are rejected.
    pub fn from_env() -> BuildResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> BuildResult<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(DEFAULT_LIMIT_ENV) {
            config.default_limit = parse_limit(DEFAULT_LIMIT_ENV, &value)?;
        }
        if let Some(value) = lookup(MAX_LIMIT_ENV) {
            config.max_limit = parse_limit(MAX_LIMIT_ENV, &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> BuildResult<()> {
        if self.default_limit == 0 {
            return Err(BuildError::InvalidConfiguration {
                message: "default_limit must be greater than zero".to_string(),
            });
        }

        if self.max_limit < self.default_limit {
            return Err(BuildError::InvalidConfiguration {
                message: format!(
                    "max_limit ({}) cannot be smaller than default_limit ({})",
                    self.max_limit, self.default_limit
                ),
            });
        }

        Ok(())
    }

    /// Page size for a requested limit.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

fn parse_limit(key: &str, value: &str) -> BuildResult<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|e| BuildError::InvalidConfiguration {
            message: format!("{} must be a non-negative integer, got '{}': {}", key, value, e),
        })
}

/// Builder for configuring and creating [`PokemonService`] instances.
///
/// # Examples
///
/// ```rust
/// use pokedex::service::PokemonServiceBuilder;
/// use pokedex::storage::InMemoryStorage;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = PokemonServiceBuilder::new(InMemoryStorage::new())
///     .with_default_limit(20)
///     .with_max_limit(50)
///     .build()?;
/// assert_eq!(service.config().default_limit, 20);
/// # Ok(())
/// # }
/// ```
pub struct PokemonServiceBuilder<S> {
    storage: S,
    config: ServiceConfig,
}

impl<S: StorageProvider> PokemonServiceBuilder<S> {
    /// Create a new builder with the given storage backend.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            config: ServiceConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.config.default_limit = limit;
        self
    }

    pub fn with_max_limit(mut self, limit: usize) -> Self {
        self.config.max_limit = limit;
        self
    }

    /// Validate the configuration and build the service.
    pub fn build(self) -> BuildResult<PokemonService<S>> {
        self.config.validate()?;
        Ok(PokemonService::with_config(self.storage, self.config))
    }
}
