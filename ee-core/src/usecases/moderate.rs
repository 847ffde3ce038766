use super::prelude::*;

/// An admin's decision on a pending place or event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationDecision {
    pub status: ModerationStatus,
    pub notes: Option<String>,
    pub reviewer: Id,
}

impl ModerationDecision {
    fn validate(&self) -> Result<()> {
        if !self.status.is_decided() {
            return Err(Error::ModerationDecision);
        }
        if self.status == ModerationStatus::Rejected
            && self.notes.as_deref().map_or(true, |n| n.trim().is_empty())
        {
            return Err(Error::ModerationNotes);
        }
        Ok(())
    }

    fn into_log(self, now: Timestamp) -> (ModerationStatus, ModerationLog) {
        let Self {
            status,
            notes,
            reviewer,
        } = self;
        let log = ModerationLog {
            activity: Activity {
                at: now,
                by: Some(reviewer),
            },
            notes,
        };
        (status, log)
    }
}

/// Applies a moderation decision to a pending place.
/// Approval and rejection are terminal.
pub fn moderate_place<R: PlaceRepo>(
    repo: &R,
    id: &str,
    decision: ModerationDecision,
    now: Timestamp,
) -> Result<()> {
    decision.validate()?;
    let (_, current) = repo.get_place(id)?;
    if current.is_decided() {
        return Err(Error::AlreadyModerated);
    }
    let (status, log) = decision.into_log(now);
    log::info!("Changing moderation status of place {id} to {status}");
    let count = repo.moderate_places(&[id], status, &log)?;
    debug_assert_eq!(1, count);
    Ok(())
}

/// Applies a moderation decision to a pending event.
pub fn moderate_event<R: EventRepo>(
    repo: &R,
    id: &str,
    decision: ModerationDecision,
    now: Timestamp,
) -> Result<()> {
    decision.validate()?;
    let (_, current) = repo.get_event(id)?;
    if current.is_decided() {
        return Err(Error::AlreadyModerated);
    }
    let (status, log) = decision.into_log(now);
    log::info!("Changing moderation status of event {id} to {status}");
    let count = repo.moderate_events(&[id], status, &log)?;
    debug_assert_eq!(1, count);
    Ok(())
}
