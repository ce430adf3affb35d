use crate::core::PeekError::{self, ConfigError};
use config::Config as CConfig;
use serde::{Deserialize, Serialize};

use super::ServerConfig;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// Path to the registry file listing one `label = path;delim:<char>`
    /// entry per line.
    pub tables: String,
}

impl Config {
    pub fn from_str(toml_str: &str) -> Result<Config, PeekError> {
        let config = CConfig::builder()
            .add_source(config::File::from_str(toml_str, config::FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigError(e.to_string()))?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Config, PeekError> {
        let toml_str = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("reading {path}: {e}")))?;
        Self::from_str(&toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_correct_toml() {
        let toml = r#"
        tables = "tables.reg"

        [server]
        host = "127.0.0.1"
        port = 3000
        "#;
        let conf = Config::from_str(toml);
        assert_eq!(
            conf,
            Ok(Config {
                server: ServerConfig {
                    host: String::from("127.0.0.1"),
                    port: 3000
                },
                tables: String::from("tables.reg"),
            })
        );
    }

    #[test]
    fn server_section_is_optional() {
        let conf = Config::from_str(r#"tables = "t.reg""#).unwrap();
        assert_eq!(conf.server, ServerConfig::default());
    }

    #[test]
    fn missing_tables_path_is_rejected() {
        let conf = Config::from_str("[server]\nport = 1");
        assert!(matches!(conf, Err(ConfigError(_))));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let conf = Config::from_str("tables = \"t\"\nbogus = 1");
        assert!(matches!(conf, Err(ConfigError(_))));
    }
}
