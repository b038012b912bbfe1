//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, DemoAccountConfig, Environment, RedisConfig,
    ServerConfig, SessionConfig, StoreBackend, StoreConfig,
};
