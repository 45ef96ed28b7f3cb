mod builders;
mod printer;
mod properties;

use crate::config::ContractConfig;

/// A minimal configuration for an unlimited, free, non-delegated token.
pub(crate) fn base_config() -> ContractConfig {
    ContractConfig {
        token_name: "Test Token".to_string(),
        short_name: "TEST".to_string(),
        ..ContractConfig::default()
    }
}
