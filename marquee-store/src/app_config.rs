use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub project_id: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Simulated payment settles after this long.
    #[serde(default = "default_payment_delay_ms")]
    pub payment_delay_ms: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_payment_delay_ms() -> u64 {
    2000
}

fn default_currency() -> String {
    "RUB".to_string()
}

fn default_event_capacity() -> usize {
    64
}

impl BusinessRules {
    pub fn payment_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.payment_delay_ms)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment-specific file, optional.
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in.
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("MARQUEE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
