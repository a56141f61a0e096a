use crate::OuraError;
use secrecy::SecretString;

pub const DEFAULT_BASE_URL: &str = "https://api.ouraring.com";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_token: SecretString,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, OuraError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, OuraError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let token = get("OURA_API_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| OuraError::Config("OURA_API_TOKEN missing".into()))?;
        let base_url = get("OURA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        Ok(Self {
            api_token: SecretString::new(token.into()),
            base_url,
        })
    }
}
