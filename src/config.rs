use crate::qr::QrSettings;
use std::net::{IpAddr, Ipv4Addr};

pub const DEFAULT_PORT: u16 = 5000;
const PORT_ENV: &str = "PORT";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a TCP port number, got {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub address: IpAddr,
    pub port: u16,
    pub qr: QrSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            qr: QrSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_port_var(std::env::var(PORT_ENV).ok())
    }

    fn from_port_var(port: Option<String>) -> Result<Self, ConfigError> {
        let port = match port {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            port,
            ..Self::default()
        })
    }

    pub fn with_overrides(mut self, address: Option<IpAddr>, port: Option<u16>) -> Self {
        if let Some(address) = address {
            self.address = address;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn rocket_config(&self) -> rocket::Config {
        rocket::Config {
            address: self.address,
            port: self.port,
            log_level: rocket::config::LogLevel::Normal,
            ..rocket::Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_defaults_to_5000() {
        let config = AppConfig::from_port_var(None).expect("config");
        assert_eq!(config.port, 5000);
        assert_eq!(config.address, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn test_port_from_env_value() {
        let config = AppConfig::from_port_var(Some("8080".into())).expect("config");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = AppConfig::from_port_var(Some("http".into())).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("http".into()));
        assert_eq!(
            err.to_string(),
            "PORT must be a TCP port number, got \"http\""
        );
    }

    #[test]
    fn test_out_of_range_port_is_rejected() {
        assert!(AppConfig::from_port_var(Some("70000".into())).is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = AppConfig::default()
            .with_overrides(Some(IpAddr::V4(Ipv4Addr::LOCALHOST)), Some(9000));
        assert_eq!(config.address, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.port, 9000);

        let untouched = AppConfig::default().with_overrides(None, None);
        assert_eq!(untouched, AppConfig::default());
    }

    #[test]
    fn test_rocket_config_carries_bind_address() {
        let rocket_config = AppConfig::default().rocket_config();
        assert_eq!(rocket_config.port, 5000);
        assert_eq!(rocket_config.address, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }
}
