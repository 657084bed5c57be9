pub mod front_matter;
pub mod publisher;

pub use crate::domain::model::{Credentials, PostRecord, PostStatus, PublishOutcome, PublishedPost};
pub use crate::domain::ports::BlogApi;
pub use crate::utils::error::Result;
