use crate::{activity::Activity, id::Id, time::Timestamp};

/// A community event, subject to the same moderation
/// lifecycle as places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: Id,
    pub title: String,
    pub description: Option<String>,
    pub city: String,
    pub category: String,
    pub start: Timestamp,
    pub created: Activity,
}
