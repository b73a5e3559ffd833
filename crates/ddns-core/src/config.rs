//! Configuration types for the DDNS synchronization agent
//!
//! Configuration is read exactly once at startup. [`SyncConfig::from_env`]
//! reads the process environment; [`SyncConfig::from_lookup`] takes any key
//! lookup function so the same parsing and validation can run against a map.
//!
//! ## Variables
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `CLOUDFLARE_API_TOKEN` | yes | |
//! | `CLOUDFLARE_ZONE_NAME` | yes | |
//! | `CLOUDFLARE_RECORD_NAME` | yes | |
//! | `CURRENT_IP_INFO_ENDPOINT` | no | `https://ipinfo.io/ip` |
//! | `DURATION_BETWEEN_UPDATES` | no | `5m` |
//! | `CLOUDFLARE_API_BASE_URL` | no | `https://api.cloudflare.com/client/v4` |
//! | `DDNS_HTTP_TIMEOUT` | no | `30s` |
//! | `DDNS_OVERLAP_POLICY` | no | `allow` |
//! | `DDNS_ON_CYCLE_ERROR` | no | `continue` |
//! | `DDNS_MATCH_POLICY` | no | `last` |
//! | `DDNS_LOG_LEVEL` | no | `info` |
//!
//! Durations use Go syntax: a sequence of decimal numbers with unit suffixes,
//! e.g. `300ms`, `90s`, `1h30m`.

use crate::error::{Error, Result};
use crate::reconciler::ReconciliationTarget;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const API_TOKEN_VAR: &str = "CLOUDFLARE_API_TOKEN";
pub const ZONE_NAME_VAR: &str = "CLOUDFLARE_ZONE_NAME";
pub const RECORD_NAME_VAR: &str = "CLOUDFLARE_RECORD_NAME";
pub const IP_INFO_ENDPOINT_VAR: &str = "CURRENT_IP_INFO_ENDPOINT";
pub const UPDATE_INTERVAL_VAR: &str = "DURATION_BETWEEN_UPDATES";
pub const API_BASE_URL_VAR: &str = "CLOUDFLARE_API_BASE_URL";
pub const HTTP_TIMEOUT_VAR: &str = "DDNS_HTTP_TIMEOUT";
pub const OVERLAP_POLICY_VAR: &str = "DDNS_OVERLAP_POLICY";
pub const FAILURE_POLICY_VAR: &str = "DDNS_ON_CYCLE_ERROR";
pub const MATCH_POLICY_VAR: &str = "DDNS_MATCH_POLICY";
pub const LOG_LEVEL_VAR: &str = "DDNS_LOG_LEVEL";

pub const DEFAULT_IP_INFO_ENDPOINT: &str = "https://ipinfo.io/ip";
pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// API credential for the DNS provider
///
/// `Debug` and `Display` never show the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<REDACTED>)")
    }
}

/// What the scheduler does when a tick arrives while a cycle is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Dispatch anyway; cycles may run concurrently
    #[default]
    Allow,
    /// Skip this tick
    Skip,
}

/// What the scheduler does when a cycle fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and wait for the next dispatch
    #[default]
    Continue,
    /// Stop the scheduler and hand the error to the caller
    Exit,
}

/// How a single zone or record is picked when the provider returns several
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// The last element of the provider's ordering wins
    #[default]
    Last,
    /// More than one match is an error
    Strict,
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(OverlapPolicy::Allow),
            "skip" => Ok(OverlapPolicy::Skip),
            other => Err(format!("'{}' is not one of: allow, skip", other)),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "exit" => Ok(FailurePolicy::Exit),
            other => Err(format!("'{}' is not one of: continue, exit", other)),
        }
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last" => Ok(MatchPolicy::Last),
            "strict" => Ok(MatchPolicy::Strict),
            other => Err(format!("'{}' is not one of: last, strict", other)),
        }
    }
}

/// Scheduling and selection policies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyConfig {
    pub overlap: OverlapPolicy,
    pub on_cycle_error: FailurePolicy,
    pub matching: MatchPolicy,
}

/// Informational finding about an accepted configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNotice {
    /// The update interval differs from the default
    CustomInterval(Duration),
    /// An endpoint is reached over plain HTTP
    PlainHttp { var: &'static str, url: String },
}

impl ConfigNotice {
    /// Whether the notice should be logged as a warning
    pub fn is_warning(&self) -> bool {
        matches!(self, ConfigNotice::PlainHttp { .. })
    }
}

impl fmt::Display for ConfigNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigNotice::CustomInterval(interval) => write!(
                f,
                "custom duration between updates was specified, using {:?}",
                interval
            ),
            ConfigNotice::PlainHttp { var, url } => write!(
                f,
                "{} uses plain HTTP ({}). Consider using HTTPS.",
                var, url
            ),
        }
    }
}

/// Complete, validated agent configuration
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Provider credential
    pub api_token: ApiToken,

    /// Zone to manage (e.g. "example.com")
    pub zone_name: String,

    /// A record to keep in sync (e.g. "home.example.com")
    pub record_name: String,

    /// Endpoint returning the caller's public address as plain text
    pub ip_info_url: String,

    /// Period between cycle dispatches
    pub update_interval: Duration,

    /// Provider API base URL
    pub api_base_url: String,

    /// Per-request timeout for outbound HTTP calls
    pub http_timeout: Duration,

    /// Scheduling and selection policies
    pub policies: PolicyConfig,

    /// Log verbosity (trace, debug, info, warn, error)
    pub log_level: String,
}

impl SyncConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a key lookup function
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_token = get(API_TOKEN_VAR).ok_or_else(|| missing(API_TOKEN_VAR, "API token"))?;
        let zone_name = get(ZONE_NAME_VAR).ok_or_else(|| missing(ZONE_NAME_VAR, "zone name"))?;
        let record_name =
            get(RECORD_NAME_VAR).ok_or_else(|| missing(RECORD_NAME_VAR, "record name"))?;

        let ip_info_url =
            get(IP_INFO_ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_IP_INFO_ENDPOINT.to_string());

        let update_interval = match get(UPDATE_INTERVAL_VAR) {
            Some(raw) => parse_duration_var(UPDATE_INTERVAL_VAR, &raw)?,
            None => DEFAULT_UPDATE_INTERVAL,
        };

        let http_timeout = match get(HTTP_TIMEOUT_VAR) {
            Some(raw) => parse_duration_var(HTTP_TIMEOUT_VAR, &raw)?,
            None => DEFAULT_HTTP_TIMEOUT,
        };

        let policies = PolicyConfig {
            overlap: parse_enum_var(OVERLAP_POLICY_VAR, get(OVERLAP_POLICY_VAR))?,
            on_cycle_error: parse_enum_var(FAILURE_POLICY_VAR, get(FAILURE_POLICY_VAR))?,
            matching: parse_enum_var(MATCH_POLICY_VAR, get(MATCH_POLICY_VAR))?,
        };

        let config = Self {
            api_token: ApiToken::new(api_token.trim()),
            zone_name: zone_name.trim().to_string(),
            record_name: record_name.trim().to_string(),
            ip_info_url: ip_info_url.trim().to_string(),
            update_interval,
            api_base_url: get(API_BASE_URL_VAR)
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            http_timeout,
            policies,
            log_level: get(LOG_LEVEL_VAR)
                .map(|level| level.trim().to_lowercase())
                .unwrap_or_else(|| "info".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_token.expose().is_empty() {
            return Err(missing(API_TOKEN_VAR, "API token"));
        }

        validate_domain_name(ZONE_NAME_VAR, &self.zone_name)?;
        validate_domain_name(RECORD_NAME_VAR, &self.record_name)?;

        validate_url(IP_INFO_ENDPOINT_VAR, &self.ip_info_url)?;
        validate_url(API_BASE_URL_VAR, &self.api_base_url)?;

        if self.update_interval.is_zero() {
            return Err(Error::config(format!(
                "{} must be greater than zero",
                UPDATE_INTERVAL_VAR
            )));
        }

        if self.http_timeout.is_zero() {
            return Err(Error::config(format!(
                "{} must be greater than zero",
                HTTP_TIMEOUT_VAR
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(Error::config(format!(
                    "{} '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                    LOG_LEVEL_VAR, self.log_level
                )));
            }
        }

        Ok(())
    }

    /// Things worth reporting about an accepted configuration
    ///
    /// Loading and validation never log; the caller reports these once its
    /// logger is installed.
    pub fn notices(&self) -> Vec<ConfigNotice> {
        let mut notices = Vec::new();

        if self.update_interval != DEFAULT_UPDATE_INTERVAL {
            notices.push(ConfigNotice::CustomInterval(self.update_interval));
        }

        for (var, url) in [
            (IP_INFO_ENDPOINT_VAR, &self.ip_info_url),
            (API_BASE_URL_VAR, &self.api_base_url),
        ] {
            if url.starts_with("http://") {
                notices.push(ConfigNotice::PlainHttp {
                    var,
                    url: url.clone(),
                });
            }
        }

        notices
    }

    /// The zone/record pair this agent keeps in sync
    pub fn target(&self) -> ReconciliationTarget {
        ReconciliationTarget::new(self.zone_name.clone(), self.record_name.clone())
    }
}

fn missing(var: &str, what: &str) -> Error {
    Error::config(format!("no {} found in env var '{}'", what, var))
}

fn parse_duration_var(var: &str, raw: &str) -> Result<Duration> {
    parse_duration(raw).map_err(|reason| {
        Error::config(format!(
            "{} value '{}' could not be parsed: {}",
            var, raw, reason
        ))
    })
}

fn parse_enum_var<T>(var: &str, raw: Option<String>) -> Result<T>
where
    T: FromStr<Err = String> + Default,
{
    match raw {
        Some(raw) => raw
            .parse()
            .map_err(|reason| Error::config(format!("{}: {}", var, reason))),
        None => Ok(T::default()),
    }
}

fn validate_url(var: &str, url: &str) -> Result<()> {
    if url.starts_with("https://") {
        return Ok(());
    }

    if url.starts_with("http://") {
        return Ok(());
    }

    Err(Error::config(format!(
        "{} must use HTTP or HTTPS scheme. Got: {}",
        var, url
    )))
}

/// Basic RFC 1035 shape check for zone and record names
///
/// A leading `*` label is accepted for wildcard records and a single trailing
/// dot is ignored.
fn validate_domain_name(var: &str, domain: &str) -> Result<()> {
    let name = domain.strip_suffix('.').unwrap_or(domain);

    if name.is_empty() {
        return Err(Error::config(format!("{} cannot be empty", var)));
    }

    if name.len() > 253 {
        return Err(Error::config(format!(
            "{} is too long: {} chars (max 253)",
            var,
            name.len()
        )));
    }

    for (index, label) in name.split('.').enumerate() {
        if label.is_empty() {
            return Err(Error::config(format!(
                "{} has an empty label: '{}'",
                var, domain
            )));
        }

        if index == 0 && label == "*" {
            continue;
        }

        if label.len() > 63 {
            return Err(Error::config(format!(
                "{} label too long: {} chars (max 63). Label: '{}'",
                var,
                label.len(),
                label
            )));
        }

        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::config(format!(
                "{} label contains invalid characters: '{}'",
                var, label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::config(format!(
                "{} label cannot start or end with hyphen: '{}'",
                var, label
            )));
        }
    }

    Ok(())
}

/// Parse a Go-style duration string (`"300ms"`, `"1.5h"`, `"2h45m"`)
///
/// Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare `"0"`
/// is accepted. Negative durations are rejected.
pub fn parse_duration(input: &str) -> std::result::Result<Duration, String> {
    const NANOS_PER_UNIT: &[(&str, u128)] = &[
        ("ns", 1),
        ("us", 1_000),
        ("µs", 1_000),
        ("μs", 1_000),
        ("ms", 1_000_000),
        ("s", 1_000_000_000),
        ("m", 60 * 1_000_000_000),
        ("h", 3_600 * 1_000_000_000),
    ];

    let s = input.trim();
    let (negative, mut rest) = if let Some(stripped) = s.strip_prefix('-') {
        (true, stripped)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err("invalid duration".to_string());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number = &rest[..number_end];
        rest = &rest[number_end..];

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
            return Err("invalid duration".to_string());
        }

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];

        if unit.is_empty() {
            return Err(format!("missing unit in duration '{}'", input));
        }
        let scale = NANOS_PER_UNIT
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, nanos)| *nanos)
            .ok_or_else(|| format!("unknown unit '{}' in duration '{}'", unit, input))?;

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| "invalid duration".to_string())?
        };
        let mut nanos = whole
            .checked_mul(scale)
            .ok_or_else(|| "duration out of range".to_string())?;

        // digits past nanosecond precision do not matter
        let fraction = &fraction[..fraction.len().min(18)];
        if !fraction.is_empty() {
            let digits: u128 = fraction.parse().map_err(|_| "invalid duration".to_string())?;
            nanos += digits * scale / 10u128.pow(fraction.len() as u32);
        }

        total = total
            .checked_add(nanos)
            .ok_or_else(|| "duration out of range".to_string())?;
    }

    if negative && total > 0 {
        return Err("duration must not be negative".to_string());
    }

    let total = u64::try_from(total).map_err(|_| "duration out of range".to_string())?;
    Ok(Duration::from_nanos(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn required() -> HashMap<&'static str, String> {
        HashMap::from([
            (API_TOKEN_VAR, "cf-token-0123456789abcdef".to_string()),
            (ZONE_NAME_VAR, "example.com".to_string()),
            (RECORD_NAME_VAR, "home.example.com".to_string()),
        ])
    }

    fn load(vars: &HashMap<&'static str, String>) -> Result<SyncConfig> {
        SyncConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&required()).unwrap();

        assert_eq!(config.zone_name, "example.com");
        assert_eq!(config.record_name, "home.example.com");
        assert_eq!(config.ip_info_url, DEFAULT_IP_INFO_ENDPOINT);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.update_interval, Duration::from_secs(300));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.policies, PolicyConfig::default());
        assert_eq!(config.log_level, "info");
        assert!(config.notices().is_empty());
    }

    #[test]
    fn test_missing_zone_name_is_rejected() {
        let mut vars = required();
        vars.remove(ZONE_NAME_VAR);

        let err = load(&vars).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(ZONE_NAME_VAR));
        assert_eq!(err.to_string().matches("Configuration error").count(), 1);
    }

    #[test]
    fn test_each_required_var_is_named_when_missing() {
        for var in [API_TOKEN_VAR, ZONE_NAME_VAR, RECORD_NAME_VAR] {
            let mut vars = required();
            vars.insert(var, "   ".to_string());

            let err = load(&vars).unwrap_err();
            assert!(err.to_string().contains(var), "{}: {}", var, err);
        }
    }

    #[test]
    fn test_custom_values() {
        let mut vars = required();
        vars.insert(IP_INFO_ENDPOINT_VAR, "https://api.ipify.org".to_string());
        vars.insert(UPDATE_INTERVAL_VAR, "1m30s".to_string());
        vars.insert(API_BASE_URL_VAR, "http://127.0.0.1:8080/client/v4/".to_string());
        vars.insert(HTTP_TIMEOUT_VAR, "5s".to_string());
        vars.insert(OVERLAP_POLICY_VAR, "skip".to_string());
        vars.insert(FAILURE_POLICY_VAR, "EXIT".to_string());
        vars.insert(MATCH_POLICY_VAR, "strict".to_string());
        vars.insert(LOG_LEVEL_VAR, "Debug".to_string());

        let config = load(&vars).unwrap();
        assert_eq!(config.ip_info_url, "https://api.ipify.org");
        assert_eq!(config.update_interval, Duration::from_secs(90));
        assert_eq!(config.api_base_url, "http://127.0.0.1:8080/client/v4");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.policies.overlap, OverlapPolicy::Skip);
        assert_eq!(config.policies.on_cycle_error, FailurePolicy::Exit);
        assert_eq!(config.policies.matching, MatchPolicy::Strict);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_notices_report_custom_interval_and_plain_http() {
        let mut vars = required();
        vars.insert(UPDATE_INTERVAL_VAR, "90s".to_string());
        vars.insert(IP_INFO_ENDPOINT_VAR, "http://192.0.2.1/ip".to_string());

        let notices = load(&vars).unwrap().notices();
        assert_eq!(
            notices,
            vec![
                ConfigNotice::CustomInterval(Duration::from_secs(90)),
                ConfigNotice::PlainHttp {
                    var: IP_INFO_ENDPOINT_VAR,
                    url: "http://192.0.2.1/ip".to_string(),
                },
            ]
        );
        assert!(!notices[0].is_warning());
        assert!(notices[1].is_warning());
        assert_eq!(
            notices[0].to_string(),
            "custom duration between updates was specified, using 90s"
        );
    }

    #[test]
    fn test_invalid_interval_is_fatal() {
        for raw in ["5", "five minutes", "-5m", "0", "10x"] {
            let mut vars = required();
            vars.insert(UPDATE_INTERVAL_VAR, raw.to_string());

            let err = load(&vars).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{}", raw);
            assert!(err.to_string().contains(UPDATE_INTERVAL_VAR), "{}", raw);
        }
    }

    #[test]
    fn test_invalid_policy_is_fatal() {
        let mut vars = required();
        vars.insert(OVERLAP_POLICY_VAR, "sometimes".to_string());

        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains(OVERLAP_POLICY_VAR));
    }

    #[test]
    fn test_endpoint_scheme_is_checked() {
        let mut vars = required();
        vars.insert(IP_INFO_ENDPOINT_VAR, "ftp://example.com/ip".to_string());

        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_domain_names_are_checked() {
        let mut vars = required();
        vars.insert(RECORD_NAME_VAR, "bad..example.com".to_string());
        assert!(load(&vars).is_err());

        let mut vars = required();
        vars.insert(RECORD_NAME_VAR, "*.example.com".to_string());
        assert!(load(&vars).is_ok());

        let mut vars = required();
        vars.insert(ZONE_NAME_VAR, "-example.com".to_string());
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_token_is_redacted() {
        let config = load(&required()).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("cf-token-0123456789abcdef"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_target() {
        let target = load(&required()).unwrap().target();
        assert_eq!(target.zone_name(), "example.com");
        assert_eq!(target.record_name(), "home.example.com");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("5m"), Ok(Duration::from_secs(300)));
        assert_eq!(parse_duration("1h30m"), Ok(Duration::from_secs(5400)));
        assert_eq!(parse_duration("1.5h"), Ok(Duration::from_secs(5400)));
        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_duration(".5s"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("10us"), Ok(Duration::from_micros(10)));
        assert_eq!(parse_duration("10µs"), Ok(Duration::from_micros(10)));
        assert_eq!(parse_duration("42ns"), Ok(Duration::from_nanos(42)));
        assert_eq!(parse_duration("+2s"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("1m0s"), Ok(Duration::from_secs(60)));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        for raw in ["", "5", "m", ".s", "1.2.3s", "5 m", "3d", "-1s", "1e3s"] {
            assert!(parse_duration(raw).is_err(), "accepted '{}'", raw);
        }
    }
}
