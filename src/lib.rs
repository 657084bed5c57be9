pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::CodrspaceClient;
pub use core::{front_matter::parse_post, publisher::Publisher};
pub use domain::model::{Credentials, PostRecord, PostStatus, PublishOutcome, PublishedPost};
pub use utils::error::{PublishError, Result};
