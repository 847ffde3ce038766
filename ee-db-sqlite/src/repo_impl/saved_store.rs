use super::*;

impl<'a> SavedStoreRepo for DbReadOnly<'a> {
    fn create_saved_store(&self, _saved: &SavedStore) -> Result<()> {
        unreachable!();
    }
    fn delete_saved_store(&self, _user_id: &Id, _place_id: &str) -> Result<usize> {
        unreachable!();
    }

    fn saved_stores_of_user(&self, user_id: &Id) -> Result<Vec<(SavedStore, Place)>> {
        saved_stores_of_user(&mut self.conn.borrow_mut(), user_id)
    }
}

impl<'a> SavedStoreRepo for DbReadWrite<'a> {
    fn create_saved_store(&self, saved: &SavedStore) -> Result<()> {
        create_saved_store(&mut self.conn.borrow_mut(), saved)
    }
    fn delete_saved_store(&self, user_id: &Id, place_id: &str) -> Result<usize> {
        delete_saved_store(&mut self.conn.borrow_mut(), user_id, place_id)
    }

    fn saved_stores_of_user(&self, user_id: &Id) -> Result<Vec<(SavedStore, Place)>> {
        saved_stores_of_user(&mut self.conn.borrow_mut(), user_id)
    }
}

impl<'a> SavedStoreRepo for DbConnection<'a> {
    fn create_saved_store(&self, saved: &SavedStore) -> Result<()> {
        create_saved_store(&mut self.conn.borrow_mut(), saved)
    }
    fn delete_saved_store(&self, user_id: &Id, place_id: &str) -> Result<usize> {
        delete_saved_store(&mut self.conn.borrow_mut(), user_id, place_id)
    }

    fn saved_stores_of_user(&self, user_id: &Id) -> Result<Vec<(SavedStore, Place)>> {
        saved_stores_of_user(&mut self.conn.borrow_mut(), user_id)
    }
}

fn create_saved_store(conn: &mut SqliteConnection, saved: &SavedStore) -> Result<()> {
    let new_saved_store = models::NewSavedStore {
        user_id: saved.user_id.as_str(),
        place_id: saved.place_id.as_str(),
        created_at: saved.created_at.as_secs(),
    };
    diesel::insert_into(schema::saved_stores::table)
        .values(&new_saved_store)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn delete_saved_store(conn: &mut SqliteConnection, user_id: &Id, place_id: &str) -> Result<usize> {
    use schema::saved_stores::dsl;
    diesel::delete(
        dsl::saved_stores
            .filter(dsl::user_id.eq(user_id.as_str()))
            .filter(dsl::place_id.eq(place_id)),
    )
    .execute(conn)
    .map_err(from_diesel_err)
}

fn saved_stores_of_user(
    conn: &mut SqliteConnection,
    user_id: &Id,
) -> Result<Vec<(SavedStore, Place)>> {
    use schema::{places, saved_stores::dsl};
    let rows = dsl::saved_stores
        .inner_join(places::table)
        .filter(dsl::user_id.eq(user_id.as_str()))
        .order(dsl::created_at.desc())
        .load::<(models::SavedStoreEntity, models::PlaceEntity)>(conn)
        .map_err(from_diesel_err)?;
    let place_ids: Vec<String> = rows.iter().map(|(_, p)| p.id.clone()).collect();
    let place_id_refs: Vec<&str> = place_ids.iter().map(String::as_str).collect();
    let mut tags = super::place::load_tags(conn, &place_id_refs)?;
    rows.into_iter()
        .map(|(saved, place_entity)| {
            let place_tags = tags.remove(&place_entity.id).unwrap_or_default();
            let (place, _) = place_from_entity(place_entity, place_tags)?;
            let saved = SavedStore {
                user_id: saved.user_id.into(),
                place_id: saved.place_id.into(),
                created_at: Timestamp::from_secs(saved.created_at),
            };
            Ok((saved, place))
        })
        .collect()
}
