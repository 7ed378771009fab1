#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod providers;

use serde::Deserialize;

pub use providers::*;

/// Top-level relay configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Backend rotation list; position in the list is rotation order
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    /// Request tuning shared by every backend
    #[serde(default)]
    pub request: RequestConfig,
}
