/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Form values captured at validation time, keyed by input name.
pub type FormSnapshot = serde_json::Map<String, serde_json::Value>;
