//! Wire timestamp
//!
//! The platform stores timestamps as a `{seconds, nanoseconds}` pair. Models
//! keep that shape so cached JSON round-trips without loss; mappers convert
//! to `chrono` for entities.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// `{seconds, nanoseconds}` since the Unix epoch; the default is the epoch itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WireTimestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl WireTimestamp {
    pub fn new(seconds: i64, nanoseconds: u32) -> Self {
        Self { seconds, nanoseconds }
    }

    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            seconds: at.timestamp(),
            nanoseconds: at.timestamp_subsec_nanos(),
        }
    }

    /// Out-of-range values collapse to the Unix epoch
    pub fn to_datetime(self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.seconds, self.nanoseconds)
            .single()
            .unwrap_or_default()
    }
}

impl From<DateTime<Utc>> for WireTimestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self::from_datetime(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let ts = WireTimestamp::new(1_700_000_000, 123_000_000);
        let json = serde_json::to_value(ts).unwrap();
        assert_eq!(json, serde_json::json!({ "seconds": 1_700_000_000i64, "nanoseconds": 123_000_000u32 }));
    }

    #[test]
    fn test_datetime_conversion_preserves_nanos() {
        let at = Utc.timestamp_opt(1_700_000_000, 987_654_321).single().unwrap();
        let ts = WireTimestamp::from(at);
        assert_eq!(ts.seconds, 1_700_000_000);
        assert_eq!(ts.nanoseconds, 987_654_321);
        assert_eq!(ts.to_datetime(), at);
    }

    #[test]
    fn test_invalid_nanos_fall_back_to_epoch() {
        let ts = WireTimestamp::new(0, 2_000_000_000);
        assert_eq!(ts.to_datetime(), DateTime::<Utc>::default());
    }
}
