use std::env;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://api.pingdom.com/api/2.1";

#[derive(Clone)]
pub struct PingdomConfig {
    pub username: String,
    pub password: String,
    pub app_key: String,
    /// Enables multi-user authentication when non-empty.
    pub account_email: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl PingdomConfig {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            app_key: app_key.into(),
            account_email: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn with_account_email(mut self, account_email: impl Into<String>) -> Self {
        self.account_email = account_email.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).unwrap_or_else(|| {
                warn!("{} not set, using empty value", key);
                String::new()
            })
        };

        let timeout = lookup("PINGDOM_TIMEOUT_SECS").and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                warn!("PINGDOM_TIMEOUT_SECS is not a number ({}), ignoring", raw);
                None
            }
        });

        let config = Self {
            username: required("PINGDOM_USERNAME"),
            password: required("PINGDOM_PASSWORD"),
            app_key: required("PINGDOM_APP_KEY"),
            account_email: lookup("PINGDOM_ACCOUNT_EMAIL").unwrap_or_default(),
            base_url: lookup("PINGDOM_BASE_URL").unwrap_or_else(|| {
                warn!("PINGDOM_BASE_URL not set, using default");
                DEFAULT_BASE_URL.to_string()
            }),
            timeout,
        };

        if !config.is_configured() {
            warn!("Pingdom client not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty() && !self.app_key.is_empty()
    }
}

// Keeps secrets out of logs.
impl std::fmt::Debug for PingdomConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PingdomConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("app_key", &"<redacted>")
            .field("account_email", &self.account_email)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
