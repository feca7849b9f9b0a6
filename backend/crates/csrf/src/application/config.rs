//! Application Configuration
//!
//! Configuration for the CSRF application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::crypto::SecretKey;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Cookie lifetime for both the session and token cookies (600000 ms)
pub const DEFAULT_COOKIE_MAX_AGE: Duration = Duration::from_secs(600);

/// Route serving fresh tokens
pub const DEFAULT_TOKEN_PATH: &str = "/csrf-token";

/// Shortest `CSRF_SECRET` accepted in production, in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Fallback secret for non-production runs only
pub const DEVELOPMENT_SECRET: &str = "development-only-csrf-secret-do-not-deploy";

pub const ENV_APP_ENV: &str = "APP_ENV";
pub const ENV_CSRF_SECRET: &str = "CSRF_SECRET";
pub const ENV_COOKIE_MAX_AGE_SECS: &str = "CSRF_COOKIE_MAX_AGE_SECS";

/// Deployment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// `production` / `prod` (any case) select production; everything else is development
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("CSRF_SECRET must be set in production")]
    MissingSecret,

    #[error("CSRF_SECRET must be at least {min} bytes in production, got {actual}")]
    WeakSecret { min: usize, actual: usize },

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// CSRF application configuration
#[derive(Debug, Clone)]
pub struct CsrfConfig {
    pub environment: Environment,
    /// HMAC key for token derivation
    pub secret: SecretKey,
    /// HttpOnly cookie carrying the session identifier
    pub session_cookie: CookieConfig,
    /// Script-readable cookie carrying the latest token
    pub token_cookie: CookieConfig,
    pub token_path: String,
}

impl CsrfConfig {
    /// Development config: fallback secret, plain cookie names, no `Secure`
    pub fn development() -> Self {
        Self::build(
            Environment::Development,
            SecretKey::from_bytes(DEVELOPMENT_SECRET),
        )
    }

    /// Production config: `__Host-` cookie names and `Secure`
    pub fn production(secret: SecretKey) -> Self {
        Self::build(Environment::Production, secret)
    }

    /// Pick the config for `environment`. Production requires a secret of at
    /// least [`MIN_SECRET_LEN`] bytes.
    pub fn for_environment(
        environment: Environment,
        secret: Option<SecretKey>,
    ) -> Result<Self, ConfigError> {
        let secret = secret.filter(|s| !s.is_empty());

        match (environment, secret) {
            (Environment::Production, Some(secret)) if secret.len() < MIN_SECRET_LEN => {
                Err(ConfigError::WeakSecret {
                    min: MIN_SECRET_LEN,
                    actual: secret.len(),
                })
            }
            (Environment::Production, Some(secret)) => Ok(Self::production(secret)),
            (Environment::Production, None) => Err(ConfigError::MissingSecret),
            (Environment::Development, Some(secret)) => {
                Ok(Self::build(Environment::Development, secret))
            }
            (Environment::Development, None) => {
                tracing::warn!("CSRF_SECRET not set, using development fallback secret");
                Ok(Self::development())
            }
        }
    }

    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup(ENV_APP_ENV)
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        let secret = lookup(ENV_CSRF_SECRET).map(|raw| SecretKey::from_bytes(raw.trim()));

        let mut config = Self::for_environment(environment, secret)?;

        if let Some(raw) = lookup(ENV_COOKIE_MAX_AGE_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: ENV_COOKIE_MAX_AGE_SECS,
                    value: raw.clone(),
                })?;
            config = config.with_max_age(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Override the lifetime of both cookies
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.session_cookie.max_age = Some(max_age);
        self.token_cookie.max_age = Some(max_age);
        self
    }

    pub fn with_token_path(mut self, path: impl Into<String>) -> Self {
        self.token_path = path.into();
        self
    }

    pub fn cookie_max_age(&self) -> Option<Duration> {
        self.session_cookie.max_age
    }

    fn build(environment: Environment, secret: SecretKey) -> Self {
        let production = environment.is_production();
        // The `__Host-` prefix requires Secure, Path=/ and no Domain.
        let prefix = if production { "__Host-" } else { "" };

        let session_cookie = CookieConfig {
            name: format!("{prefix}csrf-session"),
            secure: production,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age: Some(DEFAULT_COOKIE_MAX_AGE),
        };

        let token_cookie = CookieConfig {
            name: format!("{prefix}csrf"),
            http_only: false,
            ..session_cookie.clone()
        };

        Self {
            environment,
            secret,
            session_cookie,
            token_cookie,
            token_path: DEFAULT_TOKEN_PATH.to_string(),
        }
    }
}
