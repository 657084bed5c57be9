use crate::domain::model::{Credentials, PostRecord, PublishedPost};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote blog API. Non-2xx responses surface as `PublishError::HttpError`.
#[async_trait]
pub trait BlogApi: Send + Sync {
    async fn create_post(&self, post: &PostRecord, credentials: &Credentials)
        -> Result<PublishedPost>;

    async fn update_post(
        &self,
        id: u64,
        post: &PostRecord,
        credentials: &Credentials,
    ) -> Result<PublishedPost>;
}
