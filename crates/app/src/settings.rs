//! Handles settings for the application. Configuration is written in
//! `settings.toml`; every key has a default so the file is optional.

use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level passed to the tracing env filter.
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    /// Milliseconds between settlement phases.
    pub phase_delay_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Account {
    /// Starting wallet balance for the donor session.
    pub wallet_allowance: i64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub account: Account,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.phase_delay_ms", 1500)?
            .set_default("account.wallet_allowance", engine::DEFAULT_WALLET_ALLOWANCE)?
            .add_source(File::with_name("settings").required(false))
            .build()?;

        settings.try_deserialize()
    }
}
