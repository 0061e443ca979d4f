//! Task due-date level and its presentation mappings.

use crate::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Due-date classification of a task.
///
/// Badge text, context name and color are all derived from this single
/// value. Each mapping is an exhaustive match so a new level cannot be added
/// without deciding all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum TaskLevel {
    /// No due-date classification.
    Primary = 0,
    /// Acknowledged for the current period.
    Done = 1,
    /// Due soon.
    Warning = 2,
    /// Overdue.
    Danger = 3,
}

impl TaskLevel {
    pub const ALL: [TaskLevel; 4] = [Self::Primary, Self::Done, Self::Warning, Self::Danger];

    /// Message code of the badge shown next to the task.
    pub fn badge_text(self) -> &'static str {
        match self {
            Self::Primary => "todo",
            Self::Done => "done",
            Self::Warning => "soon",
            Self::Danger => "late",
        }
    }

    /// Bootstrap-style context name.
    pub fn context(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Done => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// Hex color matching [`Self::context`].
    pub fn color(self) -> &'static str {
        match self {
            Self::Primary => "#0d6efd",
            Self::Done => "#198754",
            Self::Warning => "#ffc107",
            Self::Danger => "#dc3545",
        }
    }

    /// Whether the task needs attention (soon or overdue).
    pub fn needs_attention(self) -> bool {
        matches!(self, Self::Warning | Self::Danger)
    }
}

impl TryFrom<i64> for TaskLevel {
    type Error = ModelError;

    fn try_from(value: i64) -> ModelResult<Self> {
        match value {
            0 => Ok(Self::Primary),
            1 => Ok(Self::Done),
            2 => Ok(Self::Warning),
            3 => Ok(Self::Danger),
            other => Err(ModelError::InvalidLevel(other)),
        }
    }
}

impl From<TaskLevel> for i64 {
    fn from(level: TaskLevel) -> Self {
        level as i64
    }
}
