use super::prelude::*;
use crate::util::validate;

#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub city: String,
    pub category: String,
    pub start: i64,
}

/// Time window filter relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTimeFilter {
    Upcoming,
    Past,
}

impl EventTimeFilter {
    pub fn try_from_param(param: &str) -> Result<Self> {
        match param {
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            _ => Err(Error::TimeFilter),
        }
    }
}

pub fn store_event<R: EventRepo>(
    repo: &R,
    new_event: NewEvent,
    submitter: Option<&Id>,
) -> Result<Event> {
    let NewEvent {
        title,
        description,
        city,
        category,
        start,
    } = new_event;
    if !validate::is_valid_title(&title) {
        return Err(Error::Title);
    }
    if city.trim().is_empty() || category.trim().is_empty() {
        return Err(Error::Text);
    }
    let event = Event {
        id: Id::new(),
        title: title.trim().to_string(),
        description,
        city,
        category,
        start: Timestamp::from_secs(start),
        created: Activity::now(submitter.cloned()),
    };
    log::debug!("Creating event {} ({})", event.title, event.id);
    repo.create_event(&event, ModerationStatus::Pending)?;
    Ok(event)
}

/// Searches approved events, optionally restricted to past or
/// upcoming ones.
pub fn query_events<R: EventRepo>(
    repo: &R,
    city: Option<String>,
    category: Option<String>,
    time: Option<EventTimeFilter>,
    pagination: &Pagination,
    now: Timestamp,
) -> Result<Vec<Event>> {
    let (start_min, start_max) = match time {
        Some(EventTimeFilter::Upcoming) => (Some(now), None),
        Some(EventTimeFilter::Past) => (None, Some(now)),
        None => (None, None),
    };
    let filter = EventFilter {
        city,
        category,
        start_min,
        start_max,
    };
    Ok(repo.query_events(&filter, ModerationStatus::Approved, pagination)?)
}

#[cfg(test)]
mod tests {
    use super::{
        super::{moderate_event, tests::MockDb, ModerationDecision},
        *,
    };

    fn new_event(title: &str, start: i64) -> NewEvent {
        NewEvent {
            title: title.into(),
            description: None,
            city: "Lisboa".into(),
            category: "market".into(),
            start,
        }
    }

    fn approve_event(db: &MockDb, id: &str) {
        moderate_event(
            db,
            id,
            ModerationDecision {
                status: ModerationStatus::Approved,
                notes: None,
                reviewer: Id::new(),
            },
            Timestamp::from_secs(0),
        )
        .unwrap();
    }

    #[test]
    fn filter_past_and_upcoming_events() {
        let db = MockDb::default();
        let now = Timestamp::from_secs(1_000);
        let past = store_event(&db, new_event("Past market", 500), None).unwrap();
        let upcoming = store_event(&db, new_event("Upcoming market", 1_500), None).unwrap();
        approve_event(&db, past.id.as_str());
        approve_event(&db, upcoming.id.as_str());

        let all = query_events(&db, None, None, None, &Pagination::default(), now).unwrap();
        assert_eq!(2, all.len());

        let upcoming_only = query_events(
            &db,
            None,
            None,
            Some(EventTimeFilter::Upcoming),
            &Pagination::default(),
            now,
        )
        .unwrap();
        assert_eq!(1, upcoming_only.len());
        assert_eq!("Upcoming market", upcoming_only[0].title);

        let past_only = query_events(
            &db,
            None,
            None,
            Some(EventTimeFilter::Past),
            &Pagination::default(),
            now,
        )
        .unwrap();
        assert_eq!(1, past_only.len());
        assert_eq!("Past market", past_only[0].title);
    }

    #[test]
    fn pending_events_are_hidden() {
        let db = MockDb::default();
        let now = Timestamp::from_secs(1_000);
        store_event(&db, new_event("Pending market", 1_500), None).unwrap();
        assert!(
            query_events(&db, None, None, None, &Pagination::default(), now)
                .unwrap()
                .is_empty()
        );
    }
}
