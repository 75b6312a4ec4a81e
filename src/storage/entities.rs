use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

/// One finished tracking session as it is stored inside a task file. Files are JSON arrays of
/// these, oldest first.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct TaskRecordEntity {
    /// Local time at which the timer was started.
    pub date: NaiveDateTime,
    /// Whole minutes spent.
    #[serde(with = "duration_ser")]
    pub duration: u32,
    #[serde(default)]
    pub description: String,
}

impl TaskRecordEntity {
    pub fn new(date: NaiveDateTime, duration: u32, description: impl Into<String>) -> Self {
        Self {
            date,
            duration,
            description: description.into(),
        }
    }
}

/// Durations are written as integers. Older files carry them as strings ("30"), those are still
/// read but anything that isn't a non-negative whole number is rejected.
mod duration_ser {
    use serde::{self, de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(*duration)
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StoredDuration {
        Number(u32),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match StoredDuration::deserialize(deserializer) {
            Ok(StoredDuration::Number(v)) => Ok(v),
            Ok(StoredDuration::Text(s)) => s.trim().parse::<u32>().map_err(|e| {
                de::Error::custom(format!("duration {s:?} is not a whole number of minutes: {e}"))
            }),
            Err(_) => Err(de::Error::custom(
                "duration should be a non-negative whole number of minutes",
            )),
        }
    }
}
