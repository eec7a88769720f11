use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TMDB api key is not set (config [tmdb].api_key or TMDB_API_KEY)")]
    MissingTmdbApiKey,

    #[error("database url is not set (config [database].url or DATABASE_URL)")]
    MissingDatabaseUrl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub tmdb: TmdbSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbSettings {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub images: ImageSettings,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            images: ImageSettings::default(),
        }
    }
}

/// Image width tier (in pixels) per wire field. Each rendered image URL
/// picks the tier configured for the field it appears on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub movie_poster_width: u32,
    pub detail_poster_width: u32,
    pub cast_profile_width: u32,
    pub crew_profile_width: u32,
    pub company_logo_width: u32,
    pub reviewer_avatar_width: u32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            movie_poster_width: 185,
            detail_poster_width: 500,
            cast_profile_width: 185,
            crew_profile_width: 185,
            company_logo_width: 92,
            reviewer_avatar_width: 45,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 2,
        }
    }
}

impl Settings {
    /// Load settings from an optional TOML file, then apply environment
    /// overrides for the secrets (`TMDB_API_KEY`, `DATABASE_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                toml::from_str(&content)?
            }
            None => Settings::default(),
        };
        settings.apply_env();
        settings.validate()?;
        Ok(settings)
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            if !key.is_empty() {
                self.tmdb.api_key = key;
            }
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                self.database.url = url;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tmdb.api_key.is_empty() {
            return Err(ConfigError::MissingTmdbApiKey);
        }
        if self.database.url.is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            tmdb: TmdbSettings::default(),
            database: DatabaseSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_full_config_parses() {
        let settings: Settings = toml::from_str(
            r#"
            [server]
            bind_addr = "0.0.0.0:9000"

            [tmdb]
            api_key = "secret"

            [tmdb.images]
            movie_poster_width = 342

            [database]
            url = "postgres://localhost/reelgate"
            max_connections = 20
            "#,
        )
        .unwrap();

        assert_eq!(settings.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(settings.tmdb.api_key, "secret");
        assert_eq!(settings.tmdb.images.movie_poster_width, 342);
        // Unset tiers keep their defaults.
        assert_eq!(settings.tmdb.images.company_logo_width, 92);
        assert_eq!(settings.database.max_connections, 20);
        assert_eq!(settings.database.min_connections, 2);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
            [tmdb]
            api_key = "secret"

            [database]
            url = "postgres://localhost/reelgate"
            "#,
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.server.bind_addr, "127.0.0.1:8080");
        assert!(!settings.tmdb.api_key.is_empty());
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let settings: Settings = toml::from_str(
            r#"
            [database]
            url = "postgres://localhost/reelgate"
            "#,
        )
        .unwrap();

        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingTmdbApiKey));
    }

    #[test]
    fn test_missing_database_url_is_rejected() {
        let settings: Settings = toml::from_str(
            r#"
            [tmdb]
            api_key = "secret"
            "#,
        )
        .unwrap();

        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingDatabaseUrl));
    }

    #[test]
    fn test_default_tmdb_endpoints() {
        let settings = Settings::default();
        assert_eq!(settings.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(settings.tmdb.image_base_url, "https://image.tmdb.org/t/p");
    }
}
