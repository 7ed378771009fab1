use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Configuration for one backend in the rotation list
///
/// Names are display labels, not keys: several entries may name the same
/// provider with different models, and each entry is rotated independently.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Human-readable provider label
    pub name: String,
    /// Endpoint root, e.g. `https://api.groq.com/openai/v1`
    pub base_url: Url,
    /// Secret credential
    ///
    /// Absent or empty means the deployer has not configured this backend;
    /// it stays in the rotation and fails authentication like any other
    /// failing backend rather than being special-cased out.
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Backend-specific model identifier
    pub model: String,
    /// Auth header construction strategy
    #[serde(default)]
    pub auth: AuthSchemeConfig,
}

/// How auth headers are built for a backend
///
/// A closed set of named strategies rather than freeform header maps, so
/// configuration stays data and header construction stays code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum AuthSchemeConfig {
    /// `Authorization: Bearer <token>`
    #[default]
    Bearer,
    /// Bearer token plus fixed extra headers (e.g. `OpenRouter` attribution)
    BearerWithHeaders {
        /// Headers sent verbatim alongside the bearer token
        #[serde(default)]
        headers: Vec<ExtraHeader>,
    },
}

/// A fixed header attached alongside the bearer token
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtraHeader {
    /// Header name
    pub name: String,
    /// Header value
    pub value: String,
}

/// Request tuning shared by every backend
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RequestConfig {
    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,
    /// Sampling temperature sent with every completion request
    pub temperature: f64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 15_000,
            temperature: 0.7,
        }
    }
}
