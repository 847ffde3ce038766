use super::prelude::*;

#[derive(Debug, Clone)]
pub struct NewPlaceRating {
    pub place_id: String,
    pub value: u8,
    pub comment: Option<String>,
}

/// Stores a new rating for an approved place and recomputes the
/// place's average rating. Callers are expected to wrap this in a
/// database transaction so the rating and the recomputed average
/// never diverge.
pub fn rate_place<R>(repo: &R, user: &User, new_rating: NewPlaceRating, now: Timestamp) -> Result<Rating>
where
    R: PlaceRepo + RatingRepo,
{
    let NewPlaceRating {
        place_id,
        value,
        comment,
    } = new_rating;
    let value = RatingValue::from(value);
    if !value.is_valid() {
        return Err(Error::RatingValue);
    }
    let (mut place, status) = repo.get_place(&place_id)?;
    if status != ModerationStatus::Approved {
        return Err(Error::Repo(crate::RepoError::NotFound));
    }
    let rating = Rating {
        id: Id::new(),
        place_id: place.id.clone(),
        user_id: user.id.clone(),
        created_at: now,
        value,
        comment: comment.filter(|c| !c.trim().is_empty()),
    };
    repo.create_rating(&rating)?;

    let mut builder = AvgRatingBuilder::default();
    for r in repo.load_ratings_of_place(place.id.as_str())? {
        builder += r.value;
    }
    place.avg_rating = builder.build();
    repo.update_place(&place)?;
    log::debug!(
        "Rated place {} with {} (new average: {:?})",
        place.id,
        u8::from(value),
        place.avg_rating
    );
    Ok(rating)
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

    fn rating(place: &Place, value: u8) -> NewPlaceRating {
        NewPlaceRating {
            place_id: place.id.to_string(),
            value,
            comment: None,
        }
    }

    #[test]
    fn rating_updates_the_average() {
        let (db, user, place) = setup();
        let now = Timestamp::from_secs(10);
        rate_place(&db, &user, rating(&place, 4), now).unwrap();
        rate_place(&db, &user, rating(&place, 5), now).unwrap();
        let (place, _) = db.get_place(place.id.as_str()).unwrap();
        // (4 + 5) / 2 = 4.5, rounded to 5
        assert_eq!(Some(5), place.avg_rating);
    }

    #[test]
    fn reject_out_of_range_values() {
        let (db, user, place) = setup();
        let now = Timestamp::from_secs(10);
        assert!(matches!(
            rate_place(&db, &user, rating(&place, 0), now),
            Err(Error::RatingValue)
        ));
        assert!(matches!(
            rate_place(&db, &user, rating(&place, 6), now),
            Err(Error::RatingValue)
        ));
    }

    #[test]
    fn cannot_rate_pending_places() {
        let (db, user, _) = setup();
        let pending = create_place(&db, default_new_place(), None).unwrap();
        assert!(rate_place(&db, &user, rating(&pending, 3), Timestamp::from_secs(10)).is_err());
    }
}
