use crate::utils::error::{PublishError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(PublishError::ValidationError {
                message: format!(
                    "Invalid status argument '{}', expected 'draft' or 'published'",
                    other
                ),
            }),
        }
    }
}

/// A post as sent to the API: `{title, content, status, slug?}`. An untitled
/// post sends `"title": null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub status: PostStatus,
    pub content: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
        }
    }

    /// Query parameters the API authenticates with.
    pub fn query_params(&self) -> [(&'static str, &str); 2] {
        [
            ("username", self.username.as_str()),
            ("api_key", self.api_key.as_str()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Validate for Credentials {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("username", &self.username)?;
        validate_non_empty_string("api_key", &self.api_key)?;
        Ok(())
    }
}

/// The `{id, url}` pair the API answers a successful create or update with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublishedPost {
    pub id: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Created(PublishedPost),
    Updated(PublishedPost),
}

impl PublishOutcome {
    pub fn post(&self) -> &PublishedPost {
        match self {
            PublishOutcome::Created(post) | PublishOutcome::Updated(post) => post,
        }
    }
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishOutcome::Created(post) => {
                write!(f, "New post id {} created at: {}", post.id, post.url)
            }
            PublishOutcome::Updated(post) => {
                write!(f, "Post id {} updated, see changes at: {}", post.id, post.url)
            }
        }
    }
}
