//! Announcement feed model: append-only broadcasts, no state machine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Broadcast priority, defaulting to `Medium`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Wire value used in JSON bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!(
                "priority must be one of high, medium, low; got {other:?}"
            )),
        }
    }
}

/// A broadcast message shown to all users.
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    id: i64,
    title: String,
    description: String,
    priority: Priority,
    date: DateTime<Utc>,
}

impl Announcement {
    /// Build an announcement from persisted fields.
    pub fn from_record(
        id: i64,
        title: String,
        description: String,
        priority: Priority,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            priority,
            date,
        }
    }

    /// Sequential identifier assigned by the store.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Broadcast headline.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Broadcast body text.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Broadcast priority.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Publication timestamp, set once and used as the listing sort key.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

/// Fields required to publish a new announcement.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}
