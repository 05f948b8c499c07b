use anyhow::Context as _;
use aquaflow_client_core::{Client, FileSessionStore};
use aquaflow_shared::const_config::client::CLIENT_DEFAULT_BACKEND_URL;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Configuration {
    pub backend: BackendSettings,
    pub session: SessionSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct BackendSettings {
    pub base_url: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SessionSettings {
    /// Folder the session file is kept in. Relative paths are relative to the
    /// working directory.
    pub directory: PathBuf,
}

impl Configuration {
    pub fn build_client(&self) -> Client {
        Client::new(
            self.backend.base_url.clone(),
            Arc::new(FileSessionStore::new(&self.session.directory)),
        )
    }
}

/// Loads from the `configuration` folder in the working directory unless
/// `APP_CONFIG_DIR` points elsewhere
pub fn get_configuration() -> anyhow::Result<Configuration> {
    let configuration_directory = match std::env::var("APP_CONFIG_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir()
            .context("failed to determine the current directory")?
            .join("configuration"),
    };

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    load_configuration(&configuration_directory, &environment)
}

pub fn load_configuration(
    configuration_directory: &Path,
    environment: &Environment,
) -> anyhow::Result<Configuration> {
    let environment_filename = format!("{}.toml", environment.as_str());
    let settings = config::Config::builder()
        .set_default("backend.base_url", CLIENT_DEFAULT_BACKEND_URL)?
        .set_default("session.directory", ".aquaflow")?
        .add_source(config::File::from(configuration_directory.join("base.toml")).required(false))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_BACKEND__BASE_URL=https://example.com` would set `Settings.backend.base_url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("failed to build configuration")?;

    settings
        .try_deserialize::<Configuration>()
        .context("failed to deserialize configuration")
}

/// The possible runtime environment for our application.
#[derive(Debug, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
