//! Server configuration loading

use todo_shared::config::{AppConfig, ConfigError, Environment};

/// Load `.env` files, then build and validate the application config
///
/// The environment-specific file (`.env.development`, `.env.production`, ...)
/// is read first so its values win over the generic `.env`. Variables already
/// set in the process environment win over both.
pub fn load() -> Result<AppConfig, ConfigError> {
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    config.validate()?;
    Ok(config)
}
