//! Priority, event kind and status definitions

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Name rendered for a rank that maps to no known variant.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Severity of a log entry, ordered from most verbose to most severe.
///
/// Ordering follows the underlying rank, so `Priority::Debug2` is the lowest
/// and a threshold of `Debug2` admits every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Priority {
    Debug2 = 1,
    Debug1 = 2,
    Debug0 = 3,
    #[default]
    Info = 4,
    Warn = 5,
    Err = 6,
    Crit = 7,
    Sec = 8,
}

impl Priority {
    pub const ALL: [Priority; 8] = [
        Priority::Debug2,
        Priority::Debug1,
        Priority::Debug0,
        Priority::Info,
        Priority::Warn,
        Priority::Err,
        Priority::Crit,
        Priority::Sec,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Priority::Debug2 => "Debug2",
            Priority::Debug1 => "Debug1",
            Priority::Debug0 => "Debug0",
            Priority::Info => "Info",
            Priority::Warn => "Warn",
            Priority::Err => "Err",
            Priority::Crit => "Crit",
            Priority::Sec => "Sec",
        }
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.rank() == rank)
    }

    /// Canonical name for a raw rank, `"Unknown"` when the rank is not recognized.
    pub fn name_of_rank(rank: u8) -> &'static str {
        Self::from_rank(rank).map_or(UNKNOWN_NAME, |p| p.to_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, <Self as FromStr>::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug2" => Ok(Priority::Debug2),
            "debug1" => Ok(Priority::Debug1),
            "debug0" => Ok(Priority::Debug0),
            "info" => Ok(Priority::Info),
            "warn" | "warning" => Ok(Priority::Warn),
            "err" | "error" => Ok(Priority::Err),
            "crit" | "critical" => Ok(Priority::Crit),
            "sec" | "security" => Ok(Priority::Sec),
            _ => Err(format!("Invalid priority: '{}'", s)),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

/// Category of a log entry, selecting the payload shape that accompanies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventKind {
    Change = 1,
    Activity = 2,
    Debug = 3,
}

impl EventKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            EventKind::Change => "Change",
            EventKind::Activity => "Activity",
            EventKind::Debug => "Debug",
        }
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(EventKind::Change),
            2 => Some(EventKind::Activity),
            3 => Some(EventKind::Debug),
            _ => None,
        }
    }

    pub fn name_of_rank(rank: u8) -> &'static str {
        Self::from_rank(rank).map_or(UNKNOWN_NAME, |k| k.to_str())
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "change" => Ok(EventKind::Change),
            "activity" => Ok(EventKind::Activity),
            "debug" => Ok(EventKind::Debug),
            _ => Err(format!("Invalid event kind: '{}'", s)),
        }
    }
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

/// Binary outcome of the operation an entry describes.
///
/// Serialized as its integer value (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Status {
    #[default]
    Success = 0,
    Failure = 1,
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(Status::Success),
            1 => Ok(Status::Failure),
            other => Err(de::Error::custom(format!("Invalid status: {}", other))),
        }
    }
}
