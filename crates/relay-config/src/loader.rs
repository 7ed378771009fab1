use std::path::Path;

use crate::RelayConfig;

impl RelayConfig {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded = crate::env::expand_env(&raw)
            .map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// An empty provider list is accepted: it surfaces at request time as
    /// immediate exhaustion rather than a load-time crash, and an empty
    /// `api_key` is accepted as "unconfigured" (see `ProviderConfig`).
    ///
    /// # Errors
    ///
    /// Returns an error if any rotation entry is missing a usable name or
    /// model identifier
    pub fn validate(&self) -> anyhow::Result<()> {
        for (position, provider) in self.providers.iter().enumerate() {
            if provider.name.trim().is_empty() {
                anyhow::bail!("provider at rotation position {position} has an empty name");
            }
            if provider.model.trim().is_empty() {
                anyhow::bail!("provider '{}' has an empty model identifier", provider.name);
            }
        }

        if self.request.timeout_ms == 0 {
            anyhow::bail!("request.timeout_ms must be greater than 0");
        }

        Ok(())
    }
}
