use thiserror::Error;

pub const UPDATE_FAILED_MESSAGE: &str = "Failed creating new post and updating existing post";

#[derive(Error, Debug)]
pub enum PublishError {
    /// Built through `From`, which strips the request URL: credentials
    /// travel in its query string.
    #[error("API request failed: {0}")]
    ApiError(reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid credentials line {line}, should be key=value")]
    CredentialFormatError { line: usize },

    #[error("Credentials require both username and api_key (missing: {})", .missing.join(", "))]
    MissingCredentialsError { missing: Vec<String> },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("HTTP {status} from {url}: {body}")]
    HttpError {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Unable to parse error message for existing ID (API error: \"{body}\")")]
    ParseError { body: String },

    /// The update retry failed; the create conflict stays the source.
    #[error("{conflict}\n{msg} (update error: {update})", msg = UPDATE_FAILED_MESSAGE)]
    UpdateFailed {
        #[source]
        conflict: Box<PublishError>,
        update: Box<PublishError>,
    },
}

pub type Result<T> = std::result::Result<T, PublishError>;

impl From<reqwest::Error> for PublishError {
    fn from(error: reqwest::Error) -> Self {
        PublishError::ApiError(error.without_url())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Http,
    Parse,
    Io,
}

impl PublishError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PublishError::ConfigError { .. }
            | PublishError::MissingConfigError { .. }
            | PublishError::InvalidConfigValueError { .. }
            | PublishError::CredentialFormatError { .. }
            | PublishError::MissingCredentialsError { .. } => ErrorCategory::Configuration,
            PublishError::ValidationError { .. } => ErrorCategory::Validation,
            PublishError::ApiError(_)
            | PublishError::HttpError { .. }
            | PublishError::UpdateFailed { .. } => ErrorCategory::Http,
            PublishError::ParseError { .. } | PublishError::SerializationError(_) => {
                ErrorCategory::Parse
            }
            PublishError::IoError(_) => ErrorCategory::Io,
        }
    }

    /// Status code of an HTTP error response, if this is one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            PublishError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PublishError::ApiError(e) if e.is_connect() => {
                "Could not connect to the blog API".to_string()
            }
            PublishError::HttpError { status, body, .. } => {
                format!("The blog API rejected the request ({}): {}", status, body)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PublishError::MissingConfigError { .. } => {
                "Pass the post file as the first argument: codrspace-post <filename> [<username> <api_key>]"
            }
            PublishError::ConfigError { .. }
            | PublishError::CredentialFormatError { .. }
            | PublishError::MissingCredentialsError { .. } => {
                "Create ~/.codrspace_credentials with username=... and api_key=... lines, or pass both on the command line"
            }
            PublishError::InvalidConfigValueError { .. } => "Check the command-line arguments",
            PublishError::ValidationError { .. } => {
                "Use 'Status: draft' or 'Status: published' in the post header"
            }
            PublishError::HttpError { status: 401, .. }
            | PublishError::HttpError { status: 403, .. } => "Check your username and api_key",
            PublishError::HttpError { .. } | PublishError::UpdateFailed { .. } => {
                "Check the post data and try again, or change the slug to create a new post"
            }
            PublishError::ApiError(_) => "Check your network connection and the API base URL",
            PublishError::ParseError { .. } | PublishError::SerializationError(_) => {
                "The API returned an unexpected response; check the API base URL"
            }
            PublishError::IoError(_) => "Check that the file exists and is readable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn conflict() -> PublishError {
        PublishError::HttpError {
            status: 400,
            url: "http://example.com/api/v1/post/".to_string(),
            body: "Post already exists, id: 42".to_string(),
        }
    }

    #[test]
    fn test_update_failed_keeps_conflict_as_source() {
        let err = PublishError::UpdateFailed {
            conflict: Box::new(conflict()),
            update: Box::new(PublishError::HttpError {
                status: 500,
                url: "http://example.com/api/v1/post/42/".to_string(),
                body: "boom".to_string(),
            }),
        };

        let message = err.to_string();
        assert!(message.starts_with("HTTP 400"));
        assert!(message.contains(UPDATE_FAILED_MESSAGE));
        assert!(message.contains("HTTP 500"));

        let source = err.source().expect("conflict should be the source");
        assert!(source.to_string().contains("id: 42"));
        assert_eq!(err.category(), ErrorCategory::Http);
    }

    #[test]
    fn test_categories() {
        let missing = PublishError::MissingCredentialsError {
            missing: vec!["api_key".to_string()],
        };
        assert_eq!(missing.category(), ErrorCategory::Configuration);
        assert_eq!(
            missing.to_string(),
            "Credentials require both username and api_key (missing: api_key)"
        );

        let invalid = PublishError::ValidationError {
            message: "bad".to_string(),
        };
        assert_eq!(invalid.category(), ErrorCategory::Validation);

        let parse = PublishError::ParseError {
            body: "nope".to_string(),
        };
        assert_eq!(parse.category(), ErrorCategory::Parse);
        assert_eq!(conflict().http_status(), Some(400));
        assert_eq!(parse.http_status(), None);
    }
}
