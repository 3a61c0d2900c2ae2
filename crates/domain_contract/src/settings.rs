//! Engine configuration

use core_kernel::Currency;
use serde::{Deserialize, Serialize};

/// Tunable parameters of the lifecycle engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Days ahead the expiring-soon classification looks, inclusive
    pub expiring_soon_window_days: u32,
    /// Minimum attachments on a refund request
    pub refund_attachment_min: usize,
    /// Maximum attachments on a refund request
    pub refund_attachment_max: usize,
    /// Currency all monetary amounts are denominated in
    pub default_currency: Currency,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            expiring_soon_window_days: 15,
            refund_attachment_min: 1,
            refund_attachment_max: 3,
            default_currency: Currency::USD,
        }
    }
}

impl EngineSettings {
    /// Loads settings from `ENGINE_`-prefixed environment variables
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::Environment::with_prefix("ENGINE"))
            .build()?
            .try_deserialize()
    }
}
