//! Unit-tagged leg values as reported by a directions service.
//!
//! Text such as `"1 小時 30 分"` or `"500 公尺"` is read once at the oracle
//! boundary into [`Reading`]s; the estimator only sums typed quantities.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    fn from_marker(marker: &str) -> Option<Self> {
        match marker.to_lowercase().as_str() {
            "分" | "分鐘" | "分钟" | "min" | "mins" | "minute" | "minutes" => Some(Self::Minutes),
            "小時" | "小时" | "h" | "hr" | "hrs" | "hour" | "hours" => Some(Self::Hours),
            "天" | "日" | "day" | "days" => Some(Self::Days),
            _ => None,
        }
    }

    fn minutes(self) -> f64 {
        match self {
            Self::Minutes => 1.0,
            Self::Hours => 60.0,
            Self::Days => 1440.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Kilometers,
    Meters,
}

impl DistanceUnit {
    fn from_marker(marker: &str) -> Option<Self> {
        match marker.to_lowercase().as_str() {
            "公里" | "km" | "kms" => Some(Self::Kilometers),
            "公尺" | "米" | "m" => Some(Self::Meters),
            _ => None,
        }
    }

    fn to_kilometers(self, value: f64) -> f64 {
        match self {
            Self::Kilometers => value,
            Self::Meters => value / 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity<U> {
    pub value: f64,
    pub unit: U,
}

impl<U> Quantity<U> {
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }
}

/// One leg value: either typed quantities (compound values such as
/// 1 h 30 min carry several) or the raw text that could not be read.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading<U> {
    Parsed(Vec<Quantity<U>>),
    Unparsed(String),
}

impl Reading<TimeUnit> {
    pub fn minutes(value: f64) -> Self {
        Self::Parsed(vec![Quantity::new(value, TimeUnit::Minutes)])
    }

    pub fn parse(text: &str) -> Self {
        match scan(text, TimeUnit::from_marker) {
            Some(parts) => Self::Parsed(parts),
            None => Self::Unparsed(text.to_string()),
        }
    }

    /// Total in minutes; `None` for unread text.
    pub fn to_minutes(&self) -> Option<f64> {
        match self {
            Self::Parsed(parts) => Some(parts.iter().map(|q| q.value * q.unit.minutes()).sum()),
            Self::Unparsed(_) => None,
        }
    }
}

impl Reading<DistanceUnit> {
    pub fn kilometers(value: f64) -> Self {
        Self::Parsed(vec![Quantity::new(value, DistanceUnit::Kilometers)])
    }

    pub fn parse(text: &str) -> Self {
        match scan(text, DistanceUnit::from_marker) {
            Some(parts) => Self::Parsed(parts),
            None => Self::Unparsed(text.to_string()),
        }
    }

    /// Total in kilometres; `None` for unread text.
    pub fn to_kilometers(&self) -> Option<f64> {
        match self {
            Self::Parsed(parts) => Some(parts.iter().map(|q| q.unit.to_kilometers(q.value)).sum()),
            Self::Unparsed(_) => None,
        }
    }
}

/// Minutes in a duration text such as `"1小時30分"` or `"45 mins"`.
pub fn normalize_duration(text: &str) -> Result<f64> {
    Reading::<TimeUnit>::parse(text)
        .to_minutes()
        .ok_or_else(|| Error::Parse {
            text: text.to_string(),
            expected: "duration",
        })
}

/// Kilometres in a distance text such as `"500公尺"` or `"12.3 km"`.
pub fn normalize_distance(text: &str) -> Result<f64> {
    Reading::<DistanceUnit>::parse(text)
        .to_kilometers()
        .ok_or_else(|| Error::Parse {
            text: text.to_string(),
            expected: "distance",
        })
}

/// Split text into `<number><marker>` pairs. Every marker must be known.
fn scan<U>(text: &str, unit_of: fn(&str) -> Option<U>) -> Option<Vec<Quantity<U>>> {
    let mut parts = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
            .unwrap_or(rest.len());
        if number_end == 0 {
            return None;
        }
        let value: f64 = rest[..number_end].replace(',', "").parse().ok()?;
        rest = rest[number_end..].trim_start();

        let marker_end = rest
            .find(|c: char| c.is_ascii_digit() || c.is_whitespace())
            .unwrap_or(rest.len());
        let unit = unit_of(&rest[..marker_end])?;
        parts.push(Quantity::new(value, unit));
        rest = rest[marker_end..].trim_start();
    }

    if parts.is_empty() { None } else { Some(parts) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(normalize_duration("1小時30分").unwrap(), 90.0);
        assert_eq!(normalize_duration("1 小時 30 分鐘").unwrap(), 90.0);
        assert_eq!(normalize_duration("1 hour 30 mins").unwrap(), 90.0);
    }

    #[test]
    fn test_plain_minutes() {
        assert_eq!(normalize_duration("25 分").unwrap(), 25.0);
        assert_eq!(normalize_duration("7 mins").unwrap(), 7.0);
    }

    #[test]
    fn test_fractional_hours() {
        assert_eq!(normalize_duration("1.5 小時").unwrap(), 90.0);
    }

    #[test]
    fn test_meters_become_kilometers() {
        assert_eq!(normalize_distance("500公尺").unwrap(), 0.5);
        assert_eq!(normalize_distance("500 m").unwrap(), 0.5);
    }

    #[test]
    fn test_kilometers() {
        assert_eq!(normalize_distance("12.3 公里").unwrap(), 12.3);
        assert_eq!(normalize_distance("1,204 km").unwrap(), 1204.0);
    }

    #[test]
    fn test_unknown_marker_is_parse_error() {
        let err = normalize_duration("3 fortnights").unwrap_err();
        assert!(matches!(err, Error::Parse { expected: "duration", .. }));
        assert!(normalize_distance("5 miles").is_err());
    }

    #[test]
    fn test_malformed_number_is_unparsed() {
        assert_eq!(
            Reading::<TimeUnit>::parse("約 5 分"),
            Reading::Unparsed("約 5 分".to_string())
        );
        assert!(normalize_distance("1.2.3 km").is_err());
        assert!(normalize_distance("").is_err());
    }
}
