use std::fmt;

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::output::colored_hex;

/// Issue urgency. On the wire this is an integer where a *smaller* non-zero
/// value is more urgent and 0 means "no priority".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Priority {
    #[default]
    None = 0,
    Urgent = 1,
    High = 2,
    Medium = 3,
    Low = 4,
}

impl From<i32> for Priority {
    /// Values outside 0..=4 are treated as unset.
    fn from(value: i32) -> Self {
        match value {
            1 => Self::Urgent,
            2 => Self::High,
            3 => Self::Medium,
            4 => Self::Low,
            _ => Self::None,
        }
    }
}

impl From<Priority> for i32 {
    fn from(priority: Priority) -> Self {
        priority as i32
    }
}

impl Priority {
    pub fn from_i32(value: i32) -> Self {
        value.into()
    }

    pub fn as_i32(self) -> i32 {
        self.into()
    }

    pub fn is_set(self) -> bool {
        self != Self::None
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "No Priority",
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Badge colour as `#rrggbb`.
    pub fn hex_color(self) -> &'static str {
        match self {
            Self::Urgent => "#dc2626",
            Self::High => "#f97316",
            Self::Medium => "#eab308",
            Self::Low => "#22c55e",
            Self::None => "#666666",
        }
    }

    /// Label tinted with its badge colour.
    pub fn colored(self) -> String {
        let styled = colored_hex(self.label(), self.hex_color());
        if matches!(self, Self::Urgent | Self::High) {
            styled.bold().to_string()
        } else {
            styled
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
