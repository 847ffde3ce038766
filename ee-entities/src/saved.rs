use crate::{id::Id, time::Timestamp};

/// A user's bookmark of a place.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedStore {
    pub user_id    : Id,
    pub place_id   : Id,
    pub created_at : Timestamp,
}
