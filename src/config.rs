use crate::errors::AppError;
use crate::models::{Credentials, Environment};
use url::Url;

pub const DEFAULT_CULTURE: &str = "ru-RU";

/// Construction-time settings of a [`crate::datapump_client::DataPumpClient`].
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub credentials: Credentials,
    /// Skip TLS peer verification. Refused for production.
    pub accept_invalid_certs: bool,
    /// Replaces the environment's fixed URL (staging proxies, mock servers).
    pub endpoint_override: Option<String>,
}

impl Config {
    /// Creates a test-environment config with the default culture.
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            environment: Environment::Test,
            credentials: Credentials {
                user_name: user_name.into(),
                password: password.into(),
                culture: DEFAULT_CULTURE.to_string(),
            },
            accept_invalid_certs: false,
            endpoint_override: None,
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.credentials.culture = culture.into();
        self
    }

    pub fn with_endpoint_override(mut self, url: impl Into<String>) -> Self {
        self.endpoint_override = Some(url.into());
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Loads settings from the process environment (and `.env`, if present).
    ///
    /// * `FCB_USER_NAME`, `FCB_PASSWORD` - required, non-empty
    /// * `FCB_ENVIRONMENT` - `production` or anything else for test
    /// * `FCB_CULTURE` - defaults to `ru-RU`
    /// * `FCB_ACCEPT_INVALID_CERTS` - `true`/`1` to skip TLS verification
    /// * `FCB_ENDPOINT_OVERRIDE` - optional http(s) URL
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let user_name = std::env::var("FCB_USER_NAME")
            .map_err(|_| anyhow::anyhow!("FCB_USER_NAME environment variable required"))
            .and_then(|user| {
                if user.trim().is_empty() {
                    anyhow::bail!("FCB_USER_NAME cannot be empty");
                }
                Ok(user)
            })?;

        let password = std::env::var("FCB_PASSWORD")
            .map_err(|_| anyhow::anyhow!("FCB_PASSWORD environment variable required"))
            .and_then(|pass| {
                if pass.trim().is_empty() {
                    anyhow::bail!("FCB_PASSWORD cannot be empty");
                }
                Ok(pass)
            })?;

        let environment = Environment::from_setting(std::env::var("FCB_ENVIRONMENT").ok().as_deref());

        let culture = std::env::var("FCB_CULTURE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CULTURE.to_string());

        let accept_invalid_certs = std::env::var("FCB_ACCEPT_INVALID_CERTS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let endpoint_override = std::env::var("FCB_ENDPOINT_OVERRIDE")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let config = Self {
            environment,
            credentials: Credentials {
                user_name,
                password,
                culture,
            },
            accept_invalid_certs,
            endpoint_override,
        };
        config.validate().map_err(|e| anyhow::anyhow!("{}", e))?;

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Environment: {}", config.environment);
        tracing::debug!("Culture: {}", config.credentials.culture);
        if let Some(ref url) = config.endpoint_override {
            tracing::info!("Endpoint override configured: {}", url);
        }

        Ok(config)
    }

    /// Checks the combination of settings.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.accept_invalid_certs && self.environment == Environment::Production {
            return Err(AppError::Config(
                "Certificate verification cannot be disabled for production".to_string(),
            ));
        }
        self.endpoint().map(|_| ())
    }

    /// Resolves the URL every request of this config is posted to.
    pub fn endpoint(&self) -> Result<Url, AppError> {
        let raw = self
            .endpoint_override
            .as_deref()
            .unwrap_or_else(|| self.environment.url());

        let url = Url::parse(raw)
            .map_err(|e| AppError::Config(format!("Invalid endpoint URL '{}': {}", raw, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::Config(format!(
                "Endpoint URL must start with http:// or https://: {}",
                raw
            )));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("user", "pass");
        assert_eq!(config.environment, Environment::Test);
        assert_eq!(config.credentials.culture, "ru-RU");
        assert!(!config.accept_invalid_certs);
        assert_eq!(config.endpoint().unwrap().as_str(), Environment::TEST_URL.replace(":80", ""));
    }

    #[test]
    fn test_production_endpoint() {
        let config = Config::new("user", "pass").with_environment(Environment::Production);
        let url = config.endpoint().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("secure.1cb.kz"));
        assert_eq!(url.port_or_known_default(), Some(443));
    }

    #[test]
    fn test_override_wins() {
        let config = Config::new("user", "pass")
            .with_environment(Environment::Production)
            .with_endpoint_override("http://127.0.0.1:8080/soap");
        assert_eq!(config.endpoint().unwrap().as_str(), "http://127.0.0.1:8080/soap");

        let bad = Config::new("user", "pass").with_endpoint_override("ftp://example.com");
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_insecure_tls_refused_for_production() {
        let config = Config::new("user", "pass")
            .with_environment(Environment::Production)
            .with_accept_invalid_certs(true);
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let test_env = Config::new("user", "pass").with_accept_invalid_certs(true);
        assert!(test_env.validate().is_ok());
    }
}
