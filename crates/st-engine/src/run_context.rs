//! Values fixed once per run

use chrono::{Local, NaiveDateTime};

/// Who is generating scripts and when; created once at process start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub script_author: String,
    pub started_at: NaiveDateTime,
}

impl RunContext {
    pub fn new(script_author: impl Into<String>, started_at: NaiveDateTime) -> Self {
        Self {
            script_author: script_author.into(),
            started_at,
        }
    }

    /// Started now, in local time
    pub fn now(script_author: impl Into<String>) -> Self {
        Self::new(script_author, Local::now().naive_local())
    }

    /// ISO-8601 local date-time, e.g. `2024-03-01T09:30:00`
    pub fn creation_timestamp(&self) -> String {
        self.started_at.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
