use crate::error::SkipListError;
use crate::internal::utils::{DEFAULT_MAX_LEVELS, LEVEL_LIMIT};

/// Construction parameters of a [SkipList](crate::SkipList).
///
/// `max_levels` is the highest level index a node may ever reach, so the
/// sentinels carry `max_levels + 1` link slots. Without a `seed` the level
/// sampler is seeded from OS entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub max_levels: usize,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_levels: DEFAULT_MAX_LEVELS,
            seed: None,
        }
    }
}

impl Config {
    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects level counts the list cannot be built with.
    pub fn validate(&self) -> Result<(), SkipListError> {
        if self.max_levels == 0 || self.max_levels > LEVEL_LIMIT {
            return Err(SkipListError::InvalidMaxLevels {
                requested: self.max_levels,
                limit: LEVEL_LIMIT,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();

        assert_eq!(config.max_levels, DEFAULT_MAX_LEVELS);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = Config::default().with_max_levels(4).with_seed(42);

        assert_eq!(config.max_levels, 4);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_bounds() {
        assert!(matches!(
            Config::default().with_max_levels(0).validate(),
            Err(SkipListError::InvalidMaxLevels { requested: 0, .. })
        ));
        assert!(Config::default().with_max_levels(1).validate().is_ok());
        assert!(Config::default()
            .with_max_levels(LEVEL_LIMIT)
            .validate()
            .is_ok());
        assert!(Config::default()
            .with_max_levels(LEVEL_LIMIT + 1)
            .validate()
            .is_err());
    }
}
