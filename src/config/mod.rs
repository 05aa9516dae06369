/// Database connection and table creation
pub mod database;

/// Settings loaded from `tracker.toml`
pub mod settings;
