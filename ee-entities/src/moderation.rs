use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::activity::Activity;

pub type ModerationStatusPrimitive = i16;

/// Lifecycle of publicly submitted entries (places, events).
///
/// Every entry starts out as `Pending`. Approval and rejection are
/// terminal, there is no re-submission flow.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ModerationStatus {
    Rejected = -1,
    Pending  =  0,
    Approved =  1,
}

impl ModerationStatus {
    pub const fn default() -> Self {
        Self::Pending
    }

    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Debug, Error)]
#[error("Invalid moderation status primitive: {0}")]
pub struct InvalidModerationStatusPrimitive(ModerationStatusPrimitive);

impl TryFrom<ModerationStatusPrimitive> for ModerationStatus {
    type Error = InvalidModerationStatusPrimitive;
    fn try_from(from: ModerationStatusPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidModerationStatusPrimitive(from))
    }
}

impl From<ModerationStatus> for ModerationStatusPrimitive {
    fn from(from: ModerationStatus) -> Self {
        from.to_i16().expect("moderation status primitive")
    }
}

/// Who decided, when, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationLog {
    pub activity: Activity,
    pub notes: Option<String>,
}
