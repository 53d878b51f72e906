use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Status string carried by every successful payload and by the snapshot file.
pub const STATUS_SUCCESS: &str = "success";

/// Wall-clock format used for the `time` field of a record.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One recognized text together with the moment it was ingested.
///
/// Records are immutable once built; the store hands out clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    text: String,
    time: String,
    timestamp: i64,
}

impl ResultRecord {
    /// Build a record stamped with the current local time.
    pub fn now(text: impl Into<String>) -> Self {
        Self::at(text, Local::now())
    }

    /// Build a record stamped with the given instant.
    pub fn at<Tz: TimeZone>(text: impl Into<String>, instant: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            text: text.into(),
            time: instant.format(TIME_FORMAT).to_string(),
            timestamp: instant.timestamp(),
        }
    }

    /// Rebuild a record from its stored fields, e.g. when reading a snapshot.
    pub fn from_parts(text: impl Into<String>, time: impl Into<String>, timestamp: i64) -> Self {
        Self {
            text: text.into(),
            time: time.into(),
            timestamp,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Local wall-clock time of ingestion, `HH:MM:SS`.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Seconds since the Unix epoch at ingestion.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// On-disk form of the history: `{ "status": "success", "texts": [...] }`.
///
/// The same shape is returned by the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: String,
    pub texts: Vec<ResultRecord>,
}

impl Snapshot {
    pub fn new(texts: Vec<ResultRecord>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            texts,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Current local wall-clock time formatted as `HH:MM:SS`.
pub fn current_time_string() -> String {
    Local::now().format(TIME_FORMAT).to_string()
}

/// Current Unix time in whole seconds.
pub fn current_timestamp() -> i64 {
    Local::now().timestamp()
}
