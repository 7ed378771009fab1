//! Immutable backend configuration

use http::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use relay_config::{AuthSchemeConfig, ProviderConfig};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Auth header construction strategy, parsed from configuration
///
/// A closed set of variants so descriptors stay plain data; the only
/// executable logic is [`BackendDescriptor::headers`].
#[derive(Debug, Clone)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// Bearer token plus fixed extra headers
    BearerWithHeaders {
        /// Pre-validated extra headers sent with every request
        headers: Vec<(HeaderName, HeaderValue)>,
    },
}

/// Immutable configuration for one callable backend
///
/// Never mutated during rotation; the auth header set is validated and
/// prebuilt at construction so a malformed descriptor fails at startup,
/// while an empty token is accepted and simply fails authentication
/// through the normal per-attempt path.
#[derive(Debug)]
pub struct BackendDescriptor {
    /// Display label; not unique across the rotation list
    pub name: String,
    /// Endpoint root the completions path is appended to
    pub base_url: Url,
    /// Backend-specific model identifier
    pub model: String,
    /// Secret credential; empty means "unconfigured"
    token: SecretString,
    /// Prebuilt auth headers, `Authorization` marked sensitive
    headers: HeaderMap,
}

impl BackendDescriptor {
    /// Build a descriptor, validating the auth header set
    ///
    /// # Errors
    ///
    /// Returns an error if the token or an extra header cannot be
    /// represented as an HTTP header value.
    pub fn new(
        name: impl Into<String>,
        base_url: Url,
        token: SecretString,
        model: impl Into<String>,
        scheme: &AuthScheme,
    ) -> anyhow::Result<Self> {
        let name = name.into();

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| anyhow::anyhow!("provider '{name}': token is not a valid header value: {e}"))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        if let AuthScheme::BearerWithHeaders { headers: extra } = scheme {
            for (header_name, header_value) in extra {
                headers.insert(header_name.clone(), header_value.clone());
            }
        }

        Ok(Self {
            name,
            base_url,
            model: model.into(),
            token,
            headers,
        })
    }

    /// Build a descriptor from one rotation entry in the configuration
    ///
    /// An absent `api_key` becomes an empty token, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an extra header name or value is malformed.
    pub fn from_config(config: &ProviderConfig) -> anyhow::Result<Self> {
        let scheme = match &config.auth {
            AuthSchemeConfig::Bearer => AuthScheme::Bearer,
            AuthSchemeConfig::BearerWithHeaders { headers } => {
                let parsed = headers
                    .iter()
                    .map(|header| {
                        let name = HeaderName::try_from(header.name.as_str()).map_err(|e| {
                            anyhow::anyhow!("provider '{}': invalid header name '{}': {e}", config.name, header.name)
                        })?;
                        let value = HeaderValue::try_from(header.value.as_str()).map_err(|e| {
                            anyhow::anyhow!("provider '{}': invalid value for header '{}': {e}", config.name, header.name)
                        })?;
                        Ok((name, value))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;
                AuthScheme::BearerWithHeaders { headers: parsed }
            }
        };

        let token = config
            .api_key
            .clone()
            .unwrap_or_else(|| SecretString::from(String::new()));

        Self::new(
            config.name.clone(),
            config.base_url.clone(),
            token,
            config.model.clone(),
            &scheme,
        )
    }

    /// The full auth header set for one request
    pub fn headers(&self) -> HeaderMap {
        self.headers.clone()
    }

    /// Whether a credential has been configured
    ///
    /// Diagnostics only; unconfigured backends are still called and fail
    /// through the normal auth path.
    pub fn has_token(&self) -> bool {
        !self.token.expose_secret().is_empty()
    }

    /// The completions endpoint, tolerant of a trailing slash in the root
    pub fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }
}
