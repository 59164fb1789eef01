//! 时间戳的宽松解析与固定偏移输出
//!
//! 上游以 Java `ZonedDateTime` 的字符串形式输出时间，可能带有 `[Europe/Oslo]`
//! 这类区域后缀，也可能省略秒。这里统一解析成 `DateTime<FixedOffset>`，
//! 输出时始终使用数字偏移（不使用 `Z`，不带区域后缀）。

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{de, Deserialize, Deserializer, Serializer};

pub type Timestamp = DateTime<FixedOffset>;

/// 解析时间字符串，丢弃区域后缀
pub fn parse(input: &str) -> Result<Timestamp, chrono::ParseError> {
    let trimmed = match input.find('[') {
        Some(idx) if input.ends_with(']') => &input[..idx],
        _ => input,
    };
    DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M%:z"))
        .or_else(|e| match trimmed.strip_suffix('Z') {
            // 分钟精度且以 Z 结尾；无偏移量的输入不补 UTC
            Some(zulu) => {
                DateTime::parse_from_str(&format!("{}+00:00", zulu), "%Y-%m-%dT%H:%M%:z")
            }
            None => Err(e),
        })
}

pub fn format(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

pub fn serialize<S: Serializer>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
}

/// 可空时间字段，缺失与 `null` 都映射为 `None`
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&super::format(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw)
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", raw, e))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offset_with_fraction() {
        let ts = parse("2024-03-01T10:15:30.123456+01:00").expect("parse");
        assert_eq!(format(&ts), "2024-03-01T10:15:30.123456+01:00");
    }

    #[test]
    fn strips_region_suffix() {
        let ts = parse("2024-06-01T10:15:30.5+02:00[Europe/Oslo]").expect("parse");
        assert_eq!(ts.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(format(&ts), "2024-06-01T10:15:30.500+02:00");
    }

    #[test]
    fn accepts_minute_precision() {
        let ts = parse("2024-01-01T10:00+01:00").expect("parse");
        assert_eq!(format(&ts), "2024-01-01T10:00:00+01:00");

        let ts = parse("2024-01-01T10:00Z[UTC]").expect("parse");
        assert_eq!(format(&ts), "2024-01-01T10:00:00+00:00");
    }

    #[test]
    fn zulu_is_rendered_as_numeric_offset() {
        let ts = parse("2024-01-01T10:00:00Z").expect("parse");
        assert_eq!(format(&ts), "2024-01-01T10:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_err());
        assert!(parse("2024-01-01").is_err());
    }

    #[test]
    fn rejects_timestamp_without_offset() {
        assert!(parse("2024-01-01T10:00").is_err());
        assert!(parse("2024-01-01T10:00:00").is_err());
        assert!(parse("2024-01-01T10:00[Europe/Oslo]").is_err());
    }
}
