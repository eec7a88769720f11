mod config;

pub use config::{
    ConfigError, DatabaseSettings, ImageSettings, ServerSettings, Settings, TmdbSettings,
};
