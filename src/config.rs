use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::scroll::ScrollPolicy;

pub const EMAIL_VAR: &str = "LINKEDIN_EMAIL";
pub const PASSWORD_VAR: &str = "LINKEDIN_PASSWORD";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Login credentials. Both values are mandatory; there is no built-in
/// fallback account.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve credentials through `lookup`; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingCredential(key))
        };
        Ok(Self {
            email: fetch(EMAIL_VAR)?,
            password: fetch(PASSWORD_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What to do with a comment container whose text never passes the
/// genuine-comment check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Misclassified {
    #[default]
    Discard,
    /// Keep the record with `[Comment content not available]` as content.
    Placeholder,
}

/// Pages that are loaded by scrolling, each with its own pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Comments,
    Reactions,
    Posts,
    JobSearch,
    ProfileDetails,
}

impl Activity {
    pub fn default_policy(self) -> ScrollPolicy {
        match self {
            Activity::Comments => ScrollPolicy::new(3, 15),
            Activity::Reactions => ScrollPolicy::new(2, 5),
            Activity::Posts => ScrollPolicy::new(3, 10),
            Activity::JobSearch => ScrollPolicy::new(2, 10),
            Activity::ProfileDetails => ScrollPolicy::new(2, 5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub webdriver_url: String,
    pub headless: bool,
    pub page_load_timeout: Duration,
    /// How long to poll for an element before giving up.
    pub element_timeout: Duration,
    /// Pause after each navigation for client-side rendering.
    pub settle_delay: Duration,
    pub request_delay: Duration,
    pub request_jitter: Duration,
    pub scroll_pause: Option<Duration>,
    pub max_scrolls: Option<usize>,
    /// Where page sources are written when nothing could be found on a
    /// page. `None` disables dumping.
    pub debug_dir: Option<PathBuf>,
    pub misclassified: Misclassified,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: false,
            page_load_timeout: Duration::from_secs(30),
            element_timeout: Duration::from_secs(10),
            settle_delay: Duration::from_secs(3),
            request_delay: Duration::from_secs(2),
            request_jitter: Duration::from_millis(500),
            scroll_pause: None,
            max_scrolls: None,
            debug_dir: Some(default_debug_dir()),
            misclassified: Misclassified::Discard,
        }
    }
}

impl Settings {
    /// Scroll policy for `activity` with any global overrides applied.
    pub fn scroll_policy(&self, activity: Activity) -> ScrollPolicy {
        let mut policy = activity.default_policy();
        if let Some(pause) = self.scroll_pause {
            policy.pause = pause;
        }
        if let Some(max) = self.max_scrolls {
            policy.max_scrolls = max;
        }
        policy
    }

    /// Settings with every wait zeroed and dumping off, for fixture runs.
    #[cfg(test)]
    pub fn instant() -> Self {
        Self {
            settle_delay: Duration::ZERO,
            request_delay: Duration::ZERO,
            request_jitter: Duration::ZERO,
            scroll_pause: Some(Duration::ZERO),
            element_timeout: Duration::ZERO,
            debug_dir: None,
            ..Self::default()
        }
    }
}

pub fn default_debug_dir() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "harvest") {
        proj_dirs.data_dir().join("debug")
    } else {
        PathBuf::from("debug")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_credentials_require_both_values() {
        let result = Credentials::from_lookup(lookup_from(&[(EMAIL_VAR, "me@example.com")]));
        assert!(matches!(result, Err(ConfigError::MissingCredential(PASSWORD_VAR))));

        let result = Credentials::from_lookup(lookup_from(&[(PASSWORD_VAR, "secret")]));
        assert!(matches!(result, Err(ConfigError::MissingCredential(EMAIL_VAR))));
    }

    #[test]
    fn test_blank_credentials_are_missing() {
        let result = Credentials::from_lookup(lookup_from(&[
            (EMAIL_VAR, "me@example.com"),
            (PASSWORD_VAR, "   "),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (EMAIL_VAR, "me@example.com"),
            (PASSWORD_VAR, "hunter2"),
        ]))
        .unwrap();
        let shown = format!("{:?}", creds);
        assert!(shown.contains("me@example.com"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn test_missing_credential_message_names_variable() {
        let err = ConfigError::MissingCredential(EMAIL_VAR);
        assert!(err.to_string().contains("export LINKEDIN_EMAIL"));
    }

    #[test]
    fn test_scroll_policy_overrides() {
        let settings = Settings::default();
        assert_eq!(
            settings.scroll_policy(Activity::Comments),
            ScrollPolicy::new(3, 15)
        );

        let settings = Settings {
            max_scrolls: Some(2),
            scroll_pause: Some(Duration::from_millis(100)),
            ..Settings::default()
        };
        let policy = settings.scroll_policy(Activity::Reactions);
        assert_eq!(policy.max_scrolls, 2);
        assert_eq!(policy.pause, Duration::from_millis(100));
    }
}
