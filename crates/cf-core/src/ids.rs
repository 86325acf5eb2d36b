use core::fmt;
use core::num::NonZeroU32;
use core::str::FromStr;

use uuid::Uuid;

use crate::CoreError;

/// Stable unique identifier carried by every activity record.
///
/// Records that arrive without an id get a fresh v4 UUID, so two uploads of the
/// same spreadsheet row are still distinct records.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id, mostly useful for fixtures.
    pub fn from_u128(v: u128) -> Self {
        Self(Uuid::from_u128(v))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for RecordId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| CoreError::InvalidId {
                value: s.to_string(),
            })
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a calculated result in the accumulator arena.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<ResultIndex>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultIndex(NonZeroU32);

impl ResultIndex {
    /// Create from a 0-based slot position by storing position+1.
    pub fn from_position(position: usize) -> Result<Self, CoreError> {
        u32::try_from(position)
            .ok()
            .and_then(|p| p.checked_add(1))
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(CoreError::InvalidArg {
                what: "result index exceeds u32 range",
            })
    }

    /// Recover the 0-based slot position.
    pub fn position(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for ResultIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResultIndex({})", self.position())
    }
}

impl fmt::Display for ResultIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ResultIndex {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.position() as u64)
    }
}
