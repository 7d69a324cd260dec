//! (De)serialize a [`Duration`] as whole milliseconds.
//!
//! Used with `#[serde(with = "crate::serde_millis")]` on options fields so
//! configuration files read `max_interval = 60000` instead of a
//! `{ secs, nanos }` table. Values are signed so that a negative setting
//! loads as zero and is then replaced by the field's default, the same way
//! negative counts are.

use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let millis = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
    serializer.serialize_i64(millis)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = i64::deserialize(deserializer)?;
    Ok(u64::try_from(millis)
        .map(Duration::from_millis)
        .unwrap_or(Duration::ZERO))
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super")]
        interval: Duration,
    }

    #[test]
    fn test_reads_milliseconds() {
        let wrapper: Wrapper = toml::from_str("interval = 1500").unwrap();
        assert_eq!(wrapper.interval, Duration::from_millis(1500));
    }

    #[test]
    fn test_negative_reads_as_zero() {
        let wrapper: Wrapper = toml::from_str("interval = -1").unwrap();
        assert_eq!(wrapper.interval, Duration::ZERO);
    }

    #[test]
    fn test_writes_milliseconds() {
        let wrapper = Wrapper {
            interval: Duration::from_secs(2),
        };
        assert_eq!(toml::to_string(&wrapper).unwrap().trim(), "interval = 2000");
    }

    #[test]
    fn test_oversized_duration_clamps_on_write() {
        let wrapper = Wrapper {
            interval: Duration::MAX,
        };
        let written = toml::to_string(&wrapper).unwrap();
        let read: Wrapper = toml::from_str(&written).unwrap();
        assert_eq!(read.interval, Duration::from_millis(i64::MAX as u64));
    }
}
