//! Autocomplete configuration.

use std::time::Duration;

/// Configuration for stop-name suggestions.
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    /// Quiet period after the last keystroke before suggesting.
    pub debounce: Duration,

    /// Maximum number of suggestions per field.
    pub limit: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            limit: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SuggestConfig::default();
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.limit, 5);
    }
}
