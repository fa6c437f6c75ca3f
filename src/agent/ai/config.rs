use std::time::Duration;

use crate::error::ConfigError;

/// Deepest search the engine accepts
pub const MAX_SEARCH_DEPTH: u8 = 64;

/// Budget for one move computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum iterative-deepening depth, in plies
    pub max_depth: u8,
    /// Wall-clock budget; the search stops at the first check after it runs out
    pub time_limit: Duration,
}

impl EngineConfig {
    pub fn new(max_depth: u8, time_limit: Duration) -> Result<Self, ConfigError> {
        let config = Self { max_depth, time_limit };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 || self.max_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::DepthOutOfRange {
                depth: self.max_depth,
                max: MAX_SEARCH_DEPTH,
            });
        }
        if self.time_limit.is_zero() {
            return Err(ConfigError::ZeroTimeBudget);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            time_limit: Duration::from_secs(5),
        }
    }
}
