/// Settings loading from config.toml
pub mod settings;

/// Bot token loading from the environment
pub mod token;

pub use settings::AppConfig;
