use super::*;

impl<'a> EventRepo for DbReadOnly<'a> {
    fn create_event(&self, _event: &Event, _status: ModerationStatus) -> Result<()> {
        unreachable!();
    }
    fn moderate_events(
        &self,
        _ids: &[&str],
        _status: ModerationStatus,
        _log: &ModerationLog,
    ) -> Result<usize> {
        unreachable!();
    }

    fn get_event(&self, id: &str) -> Result<(Event, ModerationStatus)> {
        get_event(&mut self.conn.borrow_mut(), id)
    }
    fn query_events(
        &self,
        filter: &EventFilter,
        status: ModerationStatus,
        pagination: &Pagination,
    ) -> Result<Vec<Event>> {
        query_events(&mut self.conn.borrow_mut(), filter, status, pagination)
    }
}

impl<'a> EventRepo for DbReadWrite<'a> {
    fn create_event(&self, event: &Event, status: ModerationStatus) -> Result<()> {
        create_event(&mut self.conn.borrow_mut(), event, status)
    }
    fn moderate_events(
        &self,
        ids: &[&str],
        status: ModerationStatus,
        log: &ModerationLog,
    ) -> Result<usize> {
        moderate_events(&mut self.conn.borrow_mut(), ids, status, log)
    }

    fn get_event(&self, id: &str) -> Result<(Event, ModerationStatus)> {
        get_event(&mut self.conn.borrow_mut(), id)
    }
    fn query_events(
        &self,
        filter: &EventFilter,
        status: ModerationStatus,
        pagination: &Pagination,
    ) -> Result<Vec<Event>> {
        query_events(&mut self.conn.borrow_mut(), filter, status, pagination)
    }
}

impl<'a> EventRepo for DbConnection<'a> {
    fn create_event(&self, event: &Event, status: ModerationStatus) -> Result<()> {
        create_event(&mut self.conn.borrow_mut(), event, status)
    }
    fn moderate_events(
        &self,
        ids: &[&str],
        status: ModerationStatus,
        log: &ModerationLog,
    ) -> Result<usize> {
        moderate_events(&mut self.conn.borrow_mut(), ids, status, log)
    }

    fn get_event(&self, id: &str) -> Result<(Event, ModerationStatus)> {
        get_event(&mut self.conn.borrow_mut(), id)
    }
    fn query_events(
        &self,
        filter: &EventFilter,
        status: ModerationStatus,
        pagination: &Pagination,
    ) -> Result<Vec<Event>> {
        query_events(&mut self.conn.borrow_mut(), filter, status, pagination)
    }
}

fn create_event(conn: &mut SqliteConnection, event: &Event, status: ModerationStatus) -> Result<()> {
    use schema::events::dsl;
    let new_event = models::NewEvent {
        id: event.id.as_str(),
        title: &event.title,
        description: event.description.as_deref(),
        city: &event.city,
        category: &event.category,
        start_at: event.start.as_secs(),
        created_at: event.created.at.as_secs(),
        created_by: event.created.by.as_ref().map(Id::as_str),
    };
    diesel::insert_into(schema::events::table)
        .values((new_event, dsl::status.eq(ModerationStatusPrimitive::from(status))))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_event(conn: &mut SqliteConnection, id: &str) -> Result<(Event, ModerationStatus)> {
    use schema::events::dsl;
    let entity = dsl::events
        .filter(dsl::id.eq(id))
        .first::<models::EventEntity>(conn)
        .map_err(from_diesel_err)?;
    event_from_entity(entity)
}

fn query_events(
    conn: &mut SqliteConnection,
    filter: &EventFilter,
    status: ModerationStatus,
    pagination: &Pagination,
) -> Result<Vec<Event>> {
    use schema::events::dsl;
    let mut query = dsl::events
        .filter(dsl::status.eq(ModerationStatusPrimitive::from(status)))
        .order(dsl::start_at.asc())
        .into_boxed();
    if let Some(city) = &filter.city {
        query = query.filter(dsl::city.like(city.clone()));
    }
    if let Some(category) = &filter.category {
        query = query.filter(dsl::category.eq(category.clone()));
    }
    if let Some(start_min) = filter.start_min {
        query = query.filter(dsl::start_at.ge(start_min.as_secs()));
    }
    if let Some(start_max) = filter.start_max {
        query = query.filter(dsl::start_at.lt(start_max.as_secs()));
    }
    if let Some(limit) = pagination.limit {
        query = query.limit(limit as i64);
    }
    if let Some(offset) = pagination.offset {
        query = query.offset(offset as i64);
    }
    query
        .load::<models::EventEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(|entity| event_from_entity(entity).map(|(event, _)| event))
        .collect()
}

fn moderate_events(
    conn: &mut SqliteConnection,
    ids: &[&str],
    status: ModerationStatus,
    log: &ModerationLog,
) -> Result<usize> {
    use schema::events::dsl;
    diesel::update(
        dsl::events
            .filter(dsl::id.eq_any(ids))
            .filter(dsl::status.eq(ModerationStatusPrimitive::from(ModerationStatus::Pending))),
    )
    .set((
        dsl::status.eq(ModerationStatusPrimitive::from(status)),
        dsl::reviewed_at.eq(Some(log.activity.at.as_secs())),
        dsl::reviewed_by.eq(log.activity.by.as_ref().map(Id::as_str)),
        dsl::review_notes.eq(log.notes.as_deref()),
    ))
    .execute(conn)
    .map_err(from_diesel_err)
}
