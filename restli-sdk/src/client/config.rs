//! Per-client configuration.

use crate::constants::{NON_VERSIONED_BASE_URL, VERSIONED_BASE_URL};

/// Where requests go and what the client logs.
///
/// ```
/// use restli_sdk::client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .base_url("http://localhost:8080/v2")
///     .debug(true);
///
/// assert_eq!(config.base_url_for(None), "http://localhost:8080/v2");
/// assert_eq!(config.base_url_for(Some("202401")), "https://api.linkedin.com/rest");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ClientConfig {
    base_url: String,
    versioned_base_url: String,
    debug: bool,
    log_success_responses: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: NON_VERSIONED_BASE_URL.to_string(),
            versioned_base_url: VERSIONED_BASE_URL.to_string(),
            debug: false,
            log_success_responses: false,
        }
    }
}

impl ClientConfig {
    /// Production API hosts, logging off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the process environment.
    ///
    /// | Variable                       | Setting                   |
    /// |--------------------------------|---------------------------|
    /// | `RESTLI_BASE_URL`              | [`Self::base_url`]        |
    /// | `RESTLI_VERSIONED_BASE_URL`    | [`Self::versioned_base_url`] |
    /// | `RESTLI_DEBUG`                 | [`Self::debug`]           |
    /// | `RESTLI_LOG_SUCCESS_RESPONSES` | [`Self::log_success_responses`] |
    ///
    /// Unset variables keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let vars: Vec<(String, String)> = std::env::vars().collect();
        Self::from_env_vars(&vars)
    }

    /// Like [`Self::from_env`], reading from an explicit variable list.
    ///
    /// Flags accept `true`, `1` or `yes` (any case).
    ///
    /// ```
    /// use restli_sdk::client::ClientConfig;
    ///
    /// let vars = vec![
    ///     ("RESTLI_BASE_URL".to_string(), "http://mock/v2".to_string()),
    ///     ("RESTLI_DEBUG".to_string(), "yes".to_string()),
    /// ];
    /// let config = ClientConfig::from_env_vars(&vars);
    /// assert_eq!(config.base_url_for(None), "http://mock/v2");
    /// assert!(config.is_debug());
    /// assert!(!config.logs_success_responses());
    /// ```
    #[must_use]
    pub fn from_env_vars(vars: &[(String, String)]) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(vars, "RESTLI_BASE_URL") {
            config.base_url = url.to_string();
        }
        if let Some(url) = lookup(vars, "RESTLI_VERSIONED_BASE_URL") {
            config.versioned_base_url = url.to_string();
        }
        config.debug = flag(vars, "RESTLI_DEBUG");
        config.log_success_responses = flag(vars, "RESTLI_LOG_SUCCESS_RESPONSES");
        config
    }

    /// Base URL for unversioned requests.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Base URL for requests that carry a `LinkedIn-Version`.
    #[must_use]
    pub fn versioned_base_url(mut self, url: impl Into<String>) -> Self {
        self.versioned_base_url = url.into();
        self
    }

    /// Log failed requests.
    #[must_use]
    pub const fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Also log successful responses. Only has an effect with [`Self::debug`].
    #[must_use]
    pub const fn log_success_responses(mut self, enabled: bool) -> Self {
        self.log_success_responses = enabled;
        self
    }

    /// Base URL selected by the presence of a version.
    #[must_use]
    pub fn base_url_for(&self, version: Option<&str>) -> &str {
        if version.is_some() {
            &self.versioned_base_url
        } else {
            &self.base_url
        }
    }

    /// Whether failures are logged.
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        self.debug
    }

    /// Whether successes are logged too.
    #[must_use]
    pub const fn logs_success_responses(&self) -> bool {
        self.debug && self.log_success_responses
    }

    pub(crate) const fn set_debug(&mut self, enabled: bool, log_success_responses: bool) {
        self.debug = enabled;
        self.log_success_responses = log_success_responses;
    }
}

fn lookup<'a>(vars: &'a [(String, String)], name: &str) -> Option<&'a str> {
    vars.iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.is_empty())
}

fn flag(vars: &[(String, String)], name: &str) -> bool {
    lookup(vars, name).is_some_and(|v| {
        let v = v.to_lowercase();
        v == "true" || v == "1" || v == "yes"
    })
}
