use axum::http::HeaderValue;
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;
use crate::models::CheckoutSettings;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STRIPE_TIMEOUT_SECS: u64 = 10;

/// Everything the service reads from its environment, validated once at
/// startup. Redirect URLs are kept exactly as configured so Stripe sees
/// placeholders like `{CHECKOUT_SESSION_ID}` untouched.
#[derive(Clone)]
pub struct Config {
    pub stripe_secret_key: String,
    pub allowed_origin: HeaderValue,
    pub success_url: String,
    pub cancel_url: String,
    pub port: u16,
    pub stripe_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let stripe_secret_key = required("STRIPE_SECRET_KEY")?;

        let allowed_origin = HeaderValue::from_str(&required("FRONTEND_ORIGIN")?)
            .map_err(|err| invalid("FRONTEND_ORIGIN", err))?;

        let success_url = redirect_url("SUCCESS_URL", required("SUCCESS_URL")?)?;
        let cancel_url = redirect_url("CANCEL_URL", required("CANCEL_URL")?)?;

        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|err| invalid("PORT", err))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match lookup("STRIPE_TIMEOUT_SECS") {
            Some(secs) => secs
                .trim()
                .parse::<u64>()
                .map_err(|err| invalid("STRIPE_TIMEOUT_SECS", err))?,
            None => DEFAULT_STRIPE_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(invalid("STRIPE_TIMEOUT_SECS", "must be at least 1"));
        }

        Ok(Self {
            stripe_secret_key,
            allowed_origin,
            success_url,
            cancel_url,
            port,
            stripe_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            success_url: self.success_url.clone(),
            cancel_url: self.cancel_url.clone(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("stripe_secret_key", &"[redacted]")
            .field("allowed_origin", &self.allowed_origin)
            .field("success_url", &self.success_url)
            .field("cancel_url", &self.cancel_url)
            .field("port", &self.port)
            .field("stripe_timeout", &self.stripe_timeout)
            .finish()
    }
}

/// Must parse as an absolute URL; the original text is what gets stored.
fn redirect_url(name: &'static str, value: String) -> Result<String, ConfigError> {
    Url::parse(&value).map_err(|err| invalid(name, err))?;
    Ok(value)
}

fn invalid(name: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn base() -> HashMap<String, String> {
        vars(&[
            ("STRIPE_SECRET_KEY", "sk_test_123"),
            ("FRONTEND_ORIGIN", "https://cfrc.github.io"),
            ("SUCCESS_URL", "https://cfrc.github.io/thanks.html"),
            ("CANCEL_URL", "https://cfrc.github.io/donate.html"),
        ])
    }

    fn load(vars: &HashMap<String, String>) -> Result<Config, ConfigError> {
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let config = load(&base()).unwrap();

        assert_eq!(config.stripe_secret_key, "sk_test_123");
        assert_eq!(config.allowed_origin, "https://cfrc.github.io");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.stripe_timeout, Duration::from_secs(10));
        assert_eq!(
            config.checkout_settings(),
            CheckoutSettings {
                success_url: "https://cfrc.github.io/thanks.html".to_string(),
                cancel_url: "https://cfrc.github.io/donate.html".to_string(),
            }
        );
    }

    #[test]
    fn optional_values_override_defaults() {
        let mut env = base();
        env.insert("PORT".to_string(), "3000".to_string());
        env.insert("STRIPE_TIMEOUT_SECS".to_string(), "4".to_string());

        let config = load(&env).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.stripe_timeout, Duration::from_secs(4));
    }

    #[test]
    fn each_required_value_is_enforced() {
        for name in [
            "STRIPE_SECRET_KEY",
            "FRONTEND_ORIGIN",
            "SUCCESS_URL",
            "CANCEL_URL",
        ] {
            let mut env = base();
            env.remove(name);
            match load(&env) {
                Err(ConfigError::Missing(missing)) => assert_eq!(missing, name),
                other => panic!("expected {name} to be missing, got {other:?}"),
            }
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut env = base();
        env.insert("STRIPE_SECRET_KEY".to_string(), "  ".to_string());
        assert!(matches!(
            load(&env),
            Err(ConfigError::Missing("STRIPE_SECRET_KEY"))
        ));
    }

    #[test]
    fn redirect_urls_are_forwarded_verbatim() {
        let mut env = base();
        env.insert(
            "SUCCESS_URL".to_string(),
            "https://cfrc.github.io/thanks/{CHECKOUT_SESSION_ID}".to_string(),
        );
        env.insert("CANCEL_URL".to_string(), "https://cfrc.github.io".to_string());

        let settings = load(&env).unwrap().checkout_settings();
        assert_eq!(
            settings.success_url,
            "https://cfrc.github.io/thanks/{CHECKOUT_SESSION_ID}"
        );
        assert_eq!(settings.cancel_url, "https://cfrc.github.io");
    }

    #[test]
    fn debug_output_hides_the_secret_key() {
        let config = load(&base()).unwrap();
        let printed = format!("{config:?}");

        assert!(!printed.contains("sk_test_123"));
        assert!(printed.contains("[redacted]"));
        assert!(printed.contains("https://cfrc.github.io/thanks.html"));
    }

    #[test]
    fn rejects_relative_redirect_urls() {
        let mut env = base();
        env.insert("SUCCESS_URL".to_string(), "/thanks".to_string());
        assert!(matches!(
            load(&env),
            Err(ConfigError::Invalid {
                name: "SUCCESS_URL",
                ..
            })
        ));
    }

    #[test]
    fn rejects_bad_port_and_timeout() {
        let mut env = base();
        env.insert("PORT".to_string(), "http".to_string());
        assert!(matches!(
            load(&env),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));

        let mut env = base();
        env.insert("STRIPE_TIMEOUT_SECS".to_string(), "0".to_string());
        assert!(matches!(
            load(&env),
            Err(ConfigError::Invalid {
                name: "STRIPE_TIMEOUT_SECS",
                ..
            })
        ));
    }
}
