use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_db_url")]
    pub db_url: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_environment(config::Environment::default())
    }

    /// Loads configuration from the given environment source.
    pub fn from_environment(environment: config::Environment) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(environment)
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Address the web server binds to.
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_db_url() -> String {
    "sqlite://thoughts.db?mode=rwc".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let source = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        config::Environment::default().source(Some(source))
    }

    #[test]
    fn can_fall_back_to_defaults() {
        let config = Config::from_environment(environment(&[])).unwrap();

        assert_eq!(config.db_url, "sqlite://thoughts.db?mode=rwc");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.server_address(), "0.0.0.0:8080");
    }

    #[test]
    fn can_read_values_from_environment() {
        let config = Config::from_environment(environment(&[
            ("DB_URL", "sqlite::memory:"),
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
        ]))
        .unwrap();

        assert_eq!(config.db_url, "sqlite::memory:");
        assert_eq!(config.server_address(), "127.0.0.1:3000");
    }
}
