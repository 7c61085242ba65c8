use crate::errors::ClientError;
use reqwest::Url;
use std::{env, time::Duration};
use tracing::warn;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub api_url: Url,
    pub request_timeout: Option<Duration>,
    pub notice_timeout: Option<Duration>,
}

impl PanelConfig {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let api_url = lookup("GRADE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        Ok(Self {
            api_url: parse_url(&api_url)?,
            request_timeout: parse_millis(&lookup, "GRADE_REQUEST_TIMEOUT_SECS", 1000),
            notice_timeout: parse_millis(&lookup, "GRADE_NOTICE_TIMEOUT_MS", 1),
        })
    }

    pub fn with_api_url(api_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            api_url: parse_url(api_url)?,
            request_timeout: None,
            notice_timeout: None,
        })
    }
}

/// Filter built from `RUST_LOG`-style directives, `info` when unset or unparsable.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn parse_url(raw: &str) -> Result<Url, ClientError> {
    Url::parse(raw.trim()).map_err(|err| ClientError::config(format!("GRADE_API_URL '{raw}': {err}")))
}

fn parse_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    millis_per_unit: u64,
) -> Option<Duration> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(value) => Some(Duration::from_millis(value.saturating_mul(millis_per_unit))),
        Err(_) => {
            warn!("ignoring {key}={raw}: not a whole number");
            None
        }
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = PanelConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:5000/");
        assert!(config.request_timeout.is_none());
        assert!(config.notice_timeout.is_none());
    }

    #[test]
    fn reads_timeouts_in_their_units() {
        let config = PanelConfig::from_lookup(lookup_from(&[
            ("GRADE_API_URL", "http://grades.local:8080"),
            ("GRADE_REQUEST_TIMEOUT_SECS", "3"),
            ("GRADE_NOTICE_TIMEOUT_MS", "1200"),
        ]))
        .unwrap();
        assert_eq!(config.api_url.host_str(), Some("grades.local"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.notice_timeout, Some(Duration::from_millis(1200)));
    }

    #[test]
    fn garbage_timeout_falls_back() {
        let config =
            PanelConfig::from_lookup(lookup_from(&[("GRADE_REQUEST_TIMEOUT_SECS", "soon")])).unwrap();
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn log_filter_honours_directives() {
        assert_eq!(log_filter(Some("warn")).to_string(), "warn");
        assert_eq!(log_filter(None).to_string(), "info");
    }

    #[test]
    fn bad_url_is_a_config_error() {
        let err = PanelConfig::from_lookup(lookup_from(&[("GRADE_API_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
