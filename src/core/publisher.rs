use crate::core::front_matter::parse_post;
use crate::domain::model::{Credentials, PostRecord, PublishOutcome};
use crate::domain::ports::BlogApi;
use crate::utils::error::{PublishError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Status code the API answers a create with when the post already exists.
pub const CONFLICT_STATUS: u16 = 400;

static CONFLICT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"id: (\d+)").unwrap());

/// Extracts the existing post id from a conflict response body. The token may
/// be part of a longer key, so `post_id: 42` yields 42.
pub fn post_id_from_conflict(body: &str) -> Result<u64> {
    CONFLICT_ID
        .captures(body)
        .and_then(|captures| captures.get(1))
        .and_then(|id| id.as_str().parse::<u64>().ok())
        .ok_or_else(|| PublishError::ParseError {
            body: body.to_string(),
        })
}

#[derive(Debug)]
enum PublishState {
    Start,
    Creating,
    Conflict(PublishError),
    Updating { id: u64, conflict: PublishError },
    Done(PublishOutcome),
}

pub struct Publisher<A: BlogApi> {
    api: A,
}

impl<A: BlogApi> Publisher<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Reads and parses `path`, then publishes it. Parse and validation
    /// failures return before any request is made.
    pub async fn publish_file(
        &self,
        path: impl AsRef<Path>,
        credentials: &Credentials,
    ) -> Result<PublishOutcome> {
        let path = path.as_ref();
        tracing::debug!("Reading post from {}", path.display());

        let raw = tokio::fs::read_to_string(path).await?;
        let post = parse_post(&raw)?;

        tracing::info!(
            "Publishing '{}' as {}",
            post.title.as_deref().unwrap_or("<untitled>"),
            post.status
        );
        self.publish(&post, credentials).await
    }

    /// Creates the post; a 400 on create is taken to mean it already exists,
    /// and the post named by the `id: <n>` token in the response is updated
    /// instead.
    pub async fn publish(
        &self,
        post: &PostRecord,
        credentials: &Credentials,
    ) -> Result<PublishOutcome> {
        let mut state = PublishState::Start;

        loop {
            tracing::trace!("Publish state: {:?}", state);

            state = match state {
                PublishState::Start => PublishState::Creating,

                PublishState::Creating => match self.api.create_post(post, credentials).await {
                    Ok(created) => PublishState::Done(PublishOutcome::Created(created)),
                    Err(err) if err.http_status() == Some(CONFLICT_STATUS) => {
                        tracing::info!("Post already exists, looking up its id");
                        PublishState::Conflict(err)
                    }
                    Err(err) => return Err(err),
                },

                PublishState::Conflict(conflict) => {
                    let body = match &conflict {
                        PublishError::HttpError { body, .. } => body.as_str(),
                        _ => "",
                    };
                    let id = post_id_from_conflict(body)?;
                    tracing::info!("Updating existing post id {}", id);
                    PublishState::Updating { id, conflict }
                }

                PublishState::Updating { id, conflict } => {
                    match self.api.update_post(id, post, credentials).await {
                        Ok(updated) => PublishState::Done(PublishOutcome::Updated(updated)),
                        Err(update) => {
                            return Err(PublishError::UpdateFailed {
                                conflict: Box::new(conflict),
                                update: Box::new(update),
                            })
                        }
                    }
                }

                PublishState::Done(outcome) => return Ok(outcome),
            };
        }
    }
}
