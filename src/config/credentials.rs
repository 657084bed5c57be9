use crate::domain::model::Credentials;
use crate::utils::error::{PublishError, Result};
use crate::utils::validation::Validate;
use std::path::{Path, PathBuf};

pub const CREDENTIALS_FILE_NAME: &str = ".codrspace_credentials";

const USERNAME_KEY: &str = "username";
const API_KEY_KEY: &str = "api_key";

/// `~/.codrspace_credentials`
pub fn default_credentials_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| PublishError::ConfigError {
        message: "Unable to determine home directory for the credentials file".to_string(),
    })?;
    Ok(home.join(CREDENTIALS_FILE_NAME))
}

/// Parses newline-separated `key=value` pairs. Only `username` and `api_key`
/// are recognized; other keys are ignored and a repeated key's last value wins.
pub fn parse_credentials(raw: &str) -> Result<Credentials> {
    let mut username = None;
    let mut api_key = None;

    for (index, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(PublishError::CredentialFormatError { line: index + 1 })?;

        match key.trim() {
            USERNAME_KEY => username = Some(value.trim().to_string()),
            API_KEY_KEY => api_key = Some(value.trim().to_string()),
            other => tracing::debug!("Ignoring unknown credentials key '{}'", other),
        }
    }

    match (username, api_key) {
        (Some(username), Some(api_key)) => {
            let credentials = Credentials::new(username, api_key);
            credentials.validate()?;
            Ok(credentials)
        }
        (username, api_key) => {
            let missing = [(USERNAME_KEY, username.is_none()), (API_KEY_KEY, api_key.is_none())]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(key, _)| key.to_string())
                .collect();
            Err(PublishError::MissingCredentialsError { missing })
        }
    }
}

pub fn load_credentials(path: &Path) -> Result<Credentials> {
    tracing::debug!("Reading credentials from {}", path.display());
    let raw = std::fs::read_to_string(path)?;
    parse_credentials(&raw)
}
