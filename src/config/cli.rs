use crate::config::credentials::{default_credentials_path, load_credentials};
use crate::config::DEFAULT_BASE_URL;
use crate::domain::model::Credentials;
use crate::utils::error::{PublishError, Result};
use crate::utils::validation::{validate_path, validate_required_field, validate_url, Validate};
use clap::Parser;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Parser)]
#[command(name = "codrspace-post", version)]
#[command(about = "Create or update a codrspace blog post from a text file")]
#[command(
    long_about = "Create or update a codrspace blog post from a text file.\n\n\
                  The file may start with 'Title:', 'Slug:' and 'Status:' lines \
                  (status is 'draft' or 'published'). Without a title line the first \
                  line is used as the title. If a post with the same slug already \
                  exists, it is updated instead."
)]
pub struct CliConfig {
    /// Post file to publish
    #[arg(value_name = "FILENAME")]
    pub filename: Option<PathBuf>,

    /// Username; only used together with API_KEY
    #[arg(value_name = "USERNAME")]
    pub username: Option<String>,

    /// API key; only used together with USERNAME
    #[arg(value_name = "API_KEY")]
    pub api_key: Option<String>,

    /// Anything after API_KEY. Its presence disables command-line credentials.
    #[arg(value_name = "EXTRA", num_args = 0.., hide = true)]
    pub extra_args: Vec<String>,

    /// Credentials file with username=... and api_key=... lines [default: ~/.codrspace_credentials]
    #[arg(long = "credentials", env = "CODRSPACE_CREDENTIALS")]
    pub credentials_file: Option<PathBuf>,

    #[arg(long, env = "CODRSPACE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn filename(&self) -> Result<&Path> {
        validate_required_field("filename", &self.filename).map(PathBuf::as_path)
    }

    pub fn credentials_path(&self) -> Result<PathBuf> {
        match &self.credentials_file {
            Some(path) => Ok(path.clone()),
            None => default_credentials_path(),
        }
    }

    /// Command-line credentials win when both are given; otherwise the
    /// credentials file must exist.
    pub fn resolve_credentials(&self) -> Result<Credentials> {
        if !self.extra_args.is_empty() {
            tracing::warn!(
                "Ignoring {} extra argument(s); command-line credentials need exactly USERNAME API_KEY, using the credentials file",
                self.extra_args.len()
            );
        } else if let (Some(username), Some(api_key)) = (&self.username, &self.api_key) {
            tracing::debug!("Using credentials from the command line");
            let credentials = Credentials::new(username.as_str(), api_key.as_str());
            credentials.validate()?;
            return Ok(credentials);
        }

        if self.username.is_some() && self.api_key.is_none() {
            tracing::warn!("USERNAME given without API_KEY, falling back to the credentials file");
        }

        let path = self.credentials_path()?;
        if !path.exists() {
            return Err(PublishError::ConfigError {
                message: format!(
                    "Must have \"{}\" credentials file or specify username/api_key on command-line",
                    path.display()
                ),
            });
        }

        load_credentials(&path)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let filename = self.filename()?;
        validate_path("filename", &filename.to_string_lossy())?;
        validate_url("base_url", &self.base_url)?;
        if let Some(path) = &self.credentials_file {
            validate_path("credentials", &path.to_string_lossy())?;
        }
        Ok(())
    }
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("filename", &self.filename)
            .field("username", &self.username)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("extra_args", &self.extra_args.len())
            .field("credentials_file", &self.credentials_file)
            .field("base_url", &self.base_url)
            .field("verbose", &self.verbose)
            .field("log_json", &self.log_json)
            .finish()
    }
}
