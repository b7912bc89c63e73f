use chrono::{DateTime, Local, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A before/after enhancement pair kept in the local history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementRecord {
    /// Unique identifier (UUID v4, hyphenated).
    pub id: String,
    /// Durable URL of the source image (or the user-supplied URL verbatim).
    pub original_url: String,
    /// Durable URL of the enhanced image.
    pub enhanced_url: String,
    /// Creation time, stored as ISO 8601 with millisecond precision.
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl EnhancementRecord {
    /// Build a record with a fresh id stamped with the current time.
    pub fn new(original_url: String, enhanced_url: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            original_url,
            enhanced_url,
            timestamp: Utc::now().trunc_subsecs(3),
        }
    }

    /// Display form used by listings, e.g. `Oct 18, 2026, 09:30 AM`.
    pub fn display_timestamp(&self) -> String {
        format_timestamp(&self.timestamp.with_timezone(&Local))
    }
}

pub fn format_timestamp<Tz: chrono::TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// `2026-10-18T09:30:00.123Z` on the wire.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
