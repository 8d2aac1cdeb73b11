use std::time::Duration;

use equipsched_core::roles::Role;
use equipsched_events::delivery::email::{EmailConfig, DEFAULT_REMINDER_DELAY};
use equipsched_events::notices::DEFAULT_DISMISS_AFTER;

/// Scheduler configuration loaded from environment variables.
///
/// All fields have defaults suitable for the demo walkthrough. Invalid
/// values are logged and replaced by the default rather than aborting.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// How long a notice stays visible (default: `5` seconds).
    pub notice_dismiss: Duration,
    /// Simulated email settings, including the reminder delay.
    pub email: EmailConfig,
    /// Role the session starts with (default: `scheduler`).
    pub default_role: Role,
    /// Whether to start from the built-in catalog with its sample booking.
    pub seed_demo_data: bool,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                     |
    /// |-----------------------|-----------------------------|
    /// | `NOTICE_DISMISS_SECS` | `5`                         |
    /// | `REMINDER_DELAY_SECS` | `3`                         |
    /// | `EMAIL_FROM`          | `noreply@equipsched.local`  |
    /// | `DEFAULT_ROLE`        | `scheduler`                 |
    /// | `SEED_DEMO_DATA`      | `true`                      |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let notice_dismiss = parse_secs(&lookup, "NOTICE_DISMISS_SECS", DEFAULT_DISMISS_AFTER);
        let reminder_delay = parse_secs(&lookup, "REMINDER_DELAY_SECS", DEFAULT_REMINDER_DELAY);

        let mut email = EmailConfig {
            reminder_delay,
            ..EmailConfig::default()
        };
        if let Some(from) = lookup("EMAIL_FROM") {
            email.from_address = from;
        }

        let default_role = match lookup("DEFAULT_ROLE") {
            Some(raw) => raw.parse::<Role>().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Invalid DEFAULT_ROLE, using scheduler");
                Role::default()
            }),
            None => Role::default(),
        };

        let seed_demo_data = match lookup("SEED_DEMO_DATA").as_deref() {
            None => true,
            Some(v) => parse_bool(v).unwrap_or_else(|| {
                tracing::warn!(value = v, "Invalid SEED_DEMO_DATA, using true");
                true
            }),
        };

        Self {
            notice_dismiss,
            email,
            default_role,
            seed_demo_data,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Duration) -> Duration {
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                tracing::warn!(key, value = %raw, "Invalid duration, using default");
                default
            }
        },
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.notice_dismiss, Duration::from_secs(5));
        assert_eq!(config.email.reminder_delay, Duration::from_secs(3));
        assert_eq!(config.default_role, Role::Scheduler);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("NOTICE_DISMISS_SECS", "2"),
            ("REMINDER_DELAY_SECS", "1"),
            ("EMAIL_FROM", "yard@example.com"),
            ("DEFAULT_ROLE", "operator"),
            ("SEED_DEMO_DATA", "off"),
        ]));
        assert_eq!(config.notice_dismiss, Duration::from_secs(2));
        assert_eq!(config.email.reminder_delay, Duration::from_secs(1));
        assert_eq!(config.email.from_address, "yard@example.com");
        assert_eq!(config.default_role, Role::Operator);
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("NOTICE_DISMISS_SECS", "soon"),
            ("DEFAULT_ROLE", "guest"),
            ("SEED_DEMO_DATA", "maybe"),
        ]));
        assert_eq!(config.notice_dismiss, Duration::from_secs(5));
        assert_eq!(config.default_role, Role::Scheduler);
        assert!(config.seed_demo_data);
    }
}
