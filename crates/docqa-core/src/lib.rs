//! Shared types for the document question-answering helpers.
//!
//! Holds the [`Answer`] value returned by every answerer, the
//! [`ErrorKind`] taxonomy the integration crates report through, and the
//! env-var backed [`AppConfig`].

mod answer;
mod app_config;
mod config;
mod error;

pub use answer::Answer;
pub use app_config::{AppConfig, AwsCredentials, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ErrorKind};
