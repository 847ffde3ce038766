use super::prelude::*;

/// Bookmarks an approved place for the user. Saving the same place
/// twice fails with [`crate::RepoError::AlreadyExists`].
pub fn save_store<R>(repo: &R, user: &User, place_id: &str, now: Timestamp) -> Result<SavedStore>
where
    R: SavedStoreRepo + PlaceRepo,
{
    let (place, status) = repo.get_place(place_id)?;
    if status != ModerationStatus::Approved {
        return Err(Error::Repo(crate::RepoError::NotFound));
    }
    let saved = SavedStore {
        user_id: user.id.clone(),
        place_id: place.id,
        created_at: now,
    };
    repo.create_saved_store(&saved)?;
    Ok(saved)
}

pub fn saved_stores<R: SavedStoreRepo>(repo: &R, user: &User) -> Result<Vec<(SavedStore, Place)>> {
    Ok(repo.saved_stores_of_user(&user.id)?)
}

pub fn delete_saved_store<R: SavedStoreRepo>(repo: &R, user: &User, place_id: &str) -> Result<()> {
    if repo.delete_saved_store(&user.id, place_id)? == 0 {
        return Err(Error::Repo(crate::RepoError::NotFound));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        super::{
            create_place, moderate_place, register,
            tests::{default_new_place, MockDb},
            ModerationDecision, NewUser,
        },
        *,
    };

    fn setup() -> (MockDb, User, Place) {
        let db = MockDb::default();
        let user = register(
            &db,
            NewUser {
                username: "maria".into(),
                email: "maria@example.com".parse().unwrap(),
                password: "secret1".into(),
            },
            Timestamp::from_secs(0),
        )
        .unwrap();
        let place = create_place(&db, default_new_place(), None).unwrap();
        moderate_place(
            &db,
            place.id.as_str(),
            ModerationDecision {
                status: ModerationStatus::Approved,
                notes: None,
                reviewer: Id::new(),
            },
            Timestamp::from_secs(0),
        )
        .unwrap();
        (db, user, place)
    }

    #[test]
    fn saving_twice_is_a_conflict() {
        let (db, user, place) = setup();
        let now = Timestamp::from_secs(10);
        assert!(save_store(&db, &user, place.id.as_str(), now).is_ok());
        assert!(matches!(
            save_store(&db, &user, place.id.as_str(), now),
            Err(Error::Repo(crate::RepoError::AlreadyExists))
        ));
        assert_eq!(1, saved_stores(&db, &user).unwrap().len());
    }

    #[test]
    fn delete_removes_the_bookmark() {
        let (db, user, place) = setup();
        save_store(&db, &user, place.id.as_str(), Timestamp::from_secs(10)).unwrap();
        delete_saved_store(&db, &user, place.id.as_str()).unwrap();
        assert!(saved_stores(&db, &user).unwrap().is_empty());
        assert!(delete_saved_store(&db, &user, place.id.as_str()).is_err());
    }

    #[test]
    fn cannot_save_pending_places() {
        let (db, user, _) = setup();
        let pending = create_place(&db, default_new_place(), None).unwrap();
        assert!(save_store(&db, &user, pending.id.as_str(), Timestamp::from_secs(10)).is_err());
    }
}
