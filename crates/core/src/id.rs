//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a medicine record.
///
/// Fresh ids are derived from the creation timestamp (milliseconds since the
/// Unix epoch); the seed list uses small fixed ids.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicineId(i64);

impl MedicineId {
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }
}

impl core::fmt::Display for MedicineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for MedicineId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_id(format!("MedicineId: {e}")))?;
        Ok(Self(raw))
    }
}

/// Timestamp-derived id allocator.
///
/// Two records created within the same millisecond (or after a clock step
/// backwards) still get distinct ids: the generator never hands out a value at
/// or below the highest id it has seen.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an id that already exists so it is never reissued.
    pub fn observe(&mut self, id: MedicineId) {
        self.last = self.last.max(id.0);
    }

    /// Allocate the next id for a record created at `now`.
    pub fn next_at(&mut self, now: DateTime<Utc>) -> MedicineId {
        let candidate = now.timestamp_millis();
        let next = if candidate > self.last {
            candidate
        } else {
            self.last + 1
        };
        self.last = next;
        MedicineId(next)
    }
}
