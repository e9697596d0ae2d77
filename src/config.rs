use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::OnceLock;
use std::time::Duration;

use crate::http::parser::ParserConfig;

static CONFIG: OnceLock<ServerConfig> = OnceLock::new();

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,

    pub parser: ParserConfig,

    #[serde(deserialize_with = "deserialize_duration")]
    pub read_timeout: Duration,

    #[serde(deserialize_with = "deserialize_duration")]
    pub write_timeout: Duration,

    pub static_files_root: String,

    pub server_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 42069,

            parser: ParserConfig::default(),

            read_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(30),

            static_files_root: "./assets".to_string(),

            server_name: "httpfromtcp/0.1".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Fail to read {path}: {err}, falling back to default config");
                return ServerConfig::default();
            }
        };

        Self::from_toml(&content).unwrap_or_else(|err| {
            tracing::warn!(
                "Fail to deserialize config file {path}: {err}, falling back to default config"
            );
            ServerConfig::default()
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<ServerConfig>(content)
    }
}

/// Installs the process-wide configuration. Only the first call has an effect.
pub fn set_config(cfg: ServerConfig) {
    if CONFIG.set(cfg).is_err() {
        tracing::warn!("Config already set, ignoring");
    }
}

/// Returns the process-wide configuration, defaulting it if it was never set.
pub fn config() -> &'static ServerConfig {
    CONFIG.get_or_init(ServerConfig::default)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}
