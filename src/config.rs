use std::{env, fmt, time::Duration};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000/calculate";
const DEFAULT_REGION: &str = "Washington";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub service_url: String,
    /// Region sent with every calculation, regardless of user input.
    pub region: String,
    /// `None` waits on the calculation service indefinitely.
    pub timeout: Option<Duration>,
}

#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.key, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            service_url: DEFAULT_SERVICE_URL.to_string(),
            region: DEFAULT_REGION.to_string(),
            timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Unparsable ports fall back to the default.
        if let Some(port) = lookup("PORT").and_then(|value| value.parse::<u16>().ok()) {
            config.port = port;
        }
        if let Some(url) = lookup("CALC_SERVICE_URL").filter(|value| !value.trim().is_empty()) {
            config.service_url = url.trim().to_string();
        }
        if let Some(region) = lookup("CALC_REGION").filter(|value| !value.trim().is_empty()) {
            config.region = region.trim().to_string();
        }
        if let Some(raw) = lookup("CALC_TIMEOUT_SECS") {
            // A zero timeout would fail every request.
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError {
                    key: "CALC_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
