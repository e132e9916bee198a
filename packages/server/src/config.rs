use config::{Config, ConfigError, Environment, File};
use pointtable_core::Palette;
use pointtable_core::merge::{DEFAULT_ARTS_COLOR, DEFAULT_SPORTS_COLOR};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Credentials for the administrator account created on startup.
#[derive(Debug, Deserialize, Clone)]
pub struct AdminSeedConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of issued tokens. Default: 24.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    pub admin: Option<AdminSeedConfig>,
}

fn default_token_ttl_hours() -> i64 {
    24
}

/// Presentation settings for the combined leaderboard.
#[derive(Debug, Deserialize, Clone)]
pub struct StandingsConfig {
    #[serde(default = "default_arts_color")]
    pub arts_color: String,
    #[serde(default = "default_sports_color")]
    pub sports_color: String,
}

fn default_arts_color() -> String {
    DEFAULT_ARTS_COLOR.into()
}
fn default_sports_color() -> String {
    DEFAULT_SPORTS_COLOR.into()
}

impl Default for StandingsConfig {
    fn default() -> Self {
        Self {
            arts_color: default_arts_color(),
            sports_color: default_sports_color(),
        }
    }
}

impl StandingsConfig {
    pub fn palette(&self) -> Palette {
        Palette {
            arts: self.arts_color.clone(),
            sports: self.sports_color.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub standings: StandingsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://pointtable.db?mode=rwc")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., POINTTABLE__AUTH__JWT_SECRET)
            .add_source(
                Environment::with_prefix("POINTTABLE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
