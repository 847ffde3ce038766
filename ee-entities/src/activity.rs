use crate::{id::Id, time::Timestamp};

/// A timestamped action, optionally attributed to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub at: Timestamp,
    pub by: Option<Id>,
}

impl Activity {
    pub fn now(by: Option<Id>) -> Self {
        Self {
            at: Timestamp::now(),
            by,
        }
    }

    pub fn anonymize(self) -> Self {
        Self { by: None, ..self }
    }
}
