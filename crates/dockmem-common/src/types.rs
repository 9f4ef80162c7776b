//! Domain primitive types used across the dockmem workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Daemon-assigned identifier of a container.
///
/// May be empty when a lookup by name found nothing; the daemon rejects
/// requests made with an empty identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a new container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if no identifier was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the daemon's container listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContainerSummary {
    /// Full container identifier.
    #[serde(rename = "Id")]
    pub id: ContainerId,
    /// Names the container is known by, each with a leading `/`.
    #[serde(rename = "Names", default)]
    pub names: Vec<String>,
}

impl ContainerSummary {
    /// Returns `true` if any of the container's names equals `name`.
    ///
    /// `name` must already carry the daemon's `/` prefix.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

/// Memory section of a stats record, in bytes.
///
/// Either field may be absent from a record. Values are signed and passed
/// through as sent, negative ones included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Memory currently used by the container.
    #[serde(default)]
    pub usage: Option<i64>,
    /// Memory limit applied to the container.
    #[serde(default)]
    pub limit: Option<i64>,
}

/// A single snapshot decoded from the daemon's stats stream.
///
/// Only the memory section is kept; every other field the daemon sends is
/// ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    /// Memory statistics of the snapshot.
    #[serde(default)]
    pub memory_stats: MemoryStats,
}

impl StatRecord {
    /// Builds a record carrying both usage and limit byte counts.
    #[must_use]
    pub const fn new(usage: i64, limit: i64) -> Self {
        Self {
            memory_stats: MemoryStats {
                usage: Some(usage),
                limit: Some(limit),
            },
        }
    }
}

/// Latest known memory figures of a container, in bytes.
///
/// Starts at zero. A record that omits a field leaves that field at the
/// value of the last record that carried it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryReading {
    /// Memory in use.
    pub usage: i64,
    /// Memory limit.
    pub limit: i64,
}

impl MemoryReading {
    /// Folds the fields present in `stats` into the reading.
    pub const fn update(&mut self, stats: &MemoryStats) {
        if let Some(usage) = stats.usage {
            self.usage = usage;
        }
        if let Some(limit) = stats.limit {
            self.limit = limit;
        }
    }
}
