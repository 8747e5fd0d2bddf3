use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::Result;
use crate::error::Error;

/// Production endpoint of the document creation API.
pub const DEFAULT_ENDPOINT: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";

/// Granularity of the rate limit window. The window spans exactly one unit.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub fn parse(value: &str) -> Result<TimeUnit> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ns" | "nanos" | "nanoseconds" => Ok(TimeUnit::Nanoseconds),
            "us" | "micros" | "microseconds" => Ok(TimeUnit::Microseconds),
            "ms" | "millis" | "milliseconds" => Ok(TimeUnit::Milliseconds),
            "s" | "sec" | "secs" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "m" | "min" | "mins" | "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "h" | "hour" | "hours" => Ok(TimeUnit::Hours),
            "d" | "day" | "days" => Ok(TimeUnit::Days),
            other => Err(Error::validation(format!(
                "invalid time_unit `{other}`; expected one of: ns|us|ms|seconds|minutes|hours|days"
            ))),
        }
    }

    #[must_use]
    pub const fn as_duration(self) -> Duration {
        match self {
            TimeUnit::Nanoseconds => Duration::from_nanos(1),
            TimeUnit::Microseconds => Duration::from_micros(1),
            TimeUnit::Milliseconds => Duration::from_millis(1),
            TimeUnit::Seconds => Duration::from_secs(1),
            TimeUnit::Minutes => Duration::from_secs(60),
            TimeUnit::Hours => Duration::from_secs(60 * 60),
            TimeUnit::Days => Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TimeUnit::parse(s)
    }
}

/// Raw rate limit values typically passed from app-level config.
#[derive(Clone, Debug)]
pub struct RawRateLimitConfig {
    pub time_unit: String,
    pub request_limit: i64,
}

/// Documents client configuration.
#[derive(Clone, Debug)]
pub struct DocumentsConfig {
    pub endpoint: Url,
    pub time_unit: TimeUnit,
    pub request_limit: u32,
    pub request_timeout: Option<Duration>,
}

impl DocumentsConfig {
    pub fn from_raw(endpoint: &str, raw: RawRateLimitConfig) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let time_unit = TimeUnit::from_str(&raw.time_unit)?;
        let request_limit = u32::try_from(raw.request_limit)
            .ok()
            .filter(|limit| *limit > 0)
            .ok_or_else(|| {
                Error::validation(format!(
                    "request_limit must be a positive integer, got {}",
                    raw.request_limit
                ))
            })?;

        Self::new(endpoint, time_unit, request_limit)
    }

    pub fn new(endpoint: Url, time_unit: TimeUnit, request_limit: u32) -> Result<Self> {
        if request_limit == 0 {
            return Err(Error::validation(
                "request_limit must be a positive integer, got 0",
            ));
        }
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::validation(format!(
                "endpoint must be an http(s) url, got scheme `{}`",
                endpoint.scheme()
            )));
        }

        Ok(Self {
            endpoint,
            time_unit,
            request_limit,
            request_timeout: None,
        })
    }

    /// Configuration against [`DEFAULT_ENDPOINT`].
    pub fn production(time_unit: TimeUnit, request_limit: u32) -> Result<Self> {
        Self::new(Url::parse(DEFAULT_ENDPOINT)?, time_unit, request_limit)
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.time_unit.as_duration()
    }
}
