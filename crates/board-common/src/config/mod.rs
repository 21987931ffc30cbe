//! Configuration loading

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BotConfig, ConfigError, DatabaseConfig, Environment, JwtConfig,
    ServerConfig,
};
