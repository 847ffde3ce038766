use std::collections::HashMap;

use super::*;

impl<'a> PlaceRepo for DbReadOnly<'a> {
    fn create_place(&self, _place: &Place, _status: ModerationStatus) -> Result<()> {
        unreachable!();
    }
    fn update_place(&self, _place: &Place) -> Result<()> {
        unreachable!();
    }
    fn moderate_places(
        &self,
        _ids: &[&str],
        _status: ModerationStatus,
        _log: &ModerationLog,
    ) -> Result<usize> {
        unreachable!();
    }

    fn get_place(&self, id: &str) -> Result<(Place, ModerationStatus)> {
        get_place(&mut self.conn.borrow_mut(), id)
    }
    fn query_places(
        &self,
        filter: &PlaceFilter,
        status: ModerationStatus,
        pagination: &Pagination,
    ) -> Result<Vec<Place>> {
        query_places(&mut self.conn.borrow_mut(), filter, status, pagination)
    }
    fn count_places(&self) -> Result<usize> {
        count_places(&mut self.conn.borrow_mut())
    }
}

impl<'a> PlaceRepo for DbReadWrite<'a> {
    fn create_place(&self, place: &Place, status: ModerationStatus) -> Result<()> {
        create_place(&mut self.conn.borrow_mut(), place, status)
    }
    fn update_place(&self, place: &Place) -> Result<()> {
        update_place(&mut self.conn.borrow_mut(), place)
    }
    fn moderate_places(
        &self,
        ids: &[&str],
        status: ModerationStatus,
        log: &ModerationLog,
    ) -> Result<usize> {
        moderate_places(&mut self.conn.borrow_mut(), ids, status, log)
    }

    fn get_place(&self, id: &str) -> Result<(Place, ModerationStatus)> {
        get_place(&mut self.conn.borrow_mut(), id)
    }
    fn query_places(
        &self,
        filter: &PlaceFilter,
        status: ModerationStatus,
        pagination: &Pagination,
    ) -> Result<Vec<Place>> {
        query_places(&mut self.conn.borrow_mut(), filter, status, pagination)
    }
    fn count_places(&self) -> Result<usize> {
        count_places(&mut self.conn.borrow_mut())
    }
}

impl<'a> PlaceRepo for DbConnection<'a> {
    fn create_place(&self, place: &Place, status: ModerationStatus) -> Result<()> {
        create_place(&mut self.conn.borrow_mut(), place, status)
    }
    fn update_place(&self, place: &Place) -> Result<()> {
        update_place(&mut self.conn.borrow_mut(), place)
    }
    fn moderate_places(
        &self,
        ids: &[&str],
        status: ModerationStatus,
        log: &ModerationLog,
    ) -> Result<usize> {
        moderate_places(&mut self.conn.borrow_mut(), ids, status, log)
    }

    fn get_place(&self, id: &str) -> Result<(Place, ModerationStatus)> {
        get_place(&mut self.conn.borrow_mut(), id)
    }
    fn query_places(
        &self,
        filter: &PlaceFilter,
        status: ModerationStatus,
        pagination: &Pagination,
    ) -> Result<Vec<Place>> {
        query_places(&mut self.conn.borrow_mut(), filter, status, pagination)
    }
    fn count_places(&self) -> Result<usize> {
        count_places(&mut self.conn.borrow_mut())
    }
}

fn into_new_place(place: &Place) -> models::NewPlace {
    models::NewPlace {
        id: place.id.as_str(),
        name: &place.name,
        description: &place.description,
        street: place.address.street.as_deref(),
        city: &place.address.city,
        region: place.address.region.as_deref(),
        country: &place.address.country,
        lat: place.pos.map(MapPoint::lat),
        lng: place.pos.map(MapPoint::lng),
        category: &place.category,
        vegan: place.diets.vegan,
        vegetarian: place.diets.vegetarian,
        gluten_free: place.diets.gluten_free,
        dairy_free: place.diets.dairy_free,
        organic: place.diets.organic,
        avg_rating: place.avg_rating.map(|r| r as i16),
        created_at: place.created.at.as_secs(),
        created_by: place.created.by.as_ref().map(Id::as_str),
    }
}

fn replace_tags(conn: &mut SqliteConnection, place_id: &str, tags: &[String]) -> Result<()> {
    use schema::place_tags::dsl;
    diesel::delete(dsl::place_tags.filter(dsl::place_id.eq(place_id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if tags.is_empty() {
        return Ok(());
    }
    let new_tags: Vec<_> = tags
        .iter()
        .map(|tag| models::NewPlaceTag { place_id, tag })
        .collect();
    diesel::insert_into(schema::place_tags::table)
        .values(&new_tags)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

pub(super) fn load_tags(
    conn: &mut SqliteConnection,
    place_ids: &[&str],
) -> Result<HashMap<String, Vec<String>>> {
    use schema::place_tags::dsl;
    let rows = dsl::place_tags
        .filter(dsl::place_id.eq_any(place_ids))
        .load::<(String, String)>(conn)
        .map_err(from_diesel_err)?;
    let mut tags: HashMap<String, Vec<String>> = HashMap::new();
    for (place_id, tag) in rows {
        tags.entry(place_id).or_default().push(tag);
    }
    Ok(tags)
}

fn create_place(conn: &mut SqliteConnection, place: &Place, status: ModerationStatus) -> Result<()> {
    use schema::places::dsl;
    let new_place = into_new_place(place);
    diesel::insert_into(schema::places::table)
        .values((new_place, dsl::status.eq(ModerationStatusPrimitive::from(status))))
        .execute(conn)
        .map_err(from_diesel_err)?;
    replace_tags(conn, place.id.as_str(), &place.tags)
}

fn update_place(conn: &mut SqliteConnection, place: &Place) -> Result<()> {
    use schema::places::dsl;
    let new_place = into_new_place(place);
    let count = diesel::update(dsl::places.filter(dsl::id.eq(place.id.as_str())))
        .set(&new_place)
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    replace_tags(conn, place.id.as_str(), &place.tags)
}

fn get_place(conn: &mut SqliteConnection, id: &str) -> Result<(Place, ModerationStatus)> {
    use schema::places::dsl;
    let entity = dsl::places
        .filter(dsl::id.eq(id))
        .first::<models::PlaceEntity>(conn)
        .map_err(from_diesel_err)?;
    let mut tags = load_tags(conn, &[id])?;
    place_from_entity(entity, tags.remove(id).unwrap_or_default())
}

fn query_places(
    conn: &mut SqliteConnection,
    filter: &PlaceFilter,
    status: ModerationStatus,
    pagination: &Pagination,
) -> Result<Vec<Place>> {
    use schema::{place_tags, places::dsl};
    let mut query = dsl::places
        .filter(dsl::status.eq(ModerationStatusPrimitive::from(status)))
        .order(dsl::name.asc())
        .into_boxed();
    if let Some(city) = &filter.city {
        // LIKE without wildcards for case-insensitive comparison
        query = query.filter(dsl::city.like(city.clone()));
    }
    if let Some(category) = &filter.category {
        query = query.filter(dsl::category.eq(category.clone()));
    }
    for tag in &filter.tags {
        query = query.filter(
            dsl::id.eq_any(
                place_tags::table
                    .select(place_tags::dsl::place_id)
                    .filter(place_tags::dsl::tag.eq(tag.clone())),
            ),
        );
    }
    if filter.diets.vegan {
        query = query.filter(dsl::vegan.eq(true));
    }
    if filter.diets.vegetarian {
        query = query.filter(dsl::vegetarian.eq(true));
    }
    if filter.diets.gluten_free {
        query = query.filter(dsl::gluten_free.eq(true));
    }
    if filter.diets.dairy_free {
        query = query.filter(dsl::dairy_free.eq(true));
    }
    if filter.diets.organic {
        query = query.filter(dsl::organic.eq(true));
    }
    if let Some(limit) = pagination.limit {
        query = query.limit(limit as i64);
    }
    if let Some(offset) = pagination.offset {
        query = query.offset(offset as i64);
    }
    let entities = query
        .load::<models::PlaceEntity>(conn)
        .map_err(from_diesel_err)?;
    let ids: Vec<&str> = entities.iter().map(|e| e.id.as_str()).collect();
    let mut tags = load_tags(conn, &ids)?;
    entities
        .into_iter()
        .map(|entity| {
            let entity_tags = tags.remove(&entity.id).unwrap_or_default();
            place_from_entity(entity, entity_tags).map(|(place, _)| place)
        })
        .collect()
}

fn moderate_places(
    conn: &mut SqliteConnection,
    ids: &[&str],
    status: ModerationStatus,
    log: &ModerationLog,
) -> Result<usize> {
    use schema::places::dsl;
    diesel::update(
        dsl::places
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

fn count_places(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::places::dsl;
    Ok(dsl::places
        .select(diesel::dsl::count(dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}
