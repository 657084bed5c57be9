#[cfg(feature = "cli")]
pub mod cli;
pub mod credentials;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const DEFAULT_BASE_URL: &str = "http://codrspace.com/api/v1/";
