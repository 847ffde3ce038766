// All timestamps with the `_at` postfix are stored as unix
// timestamps in seconds.

use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use ee_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod comment;
mod event;
mod like;
mod place;
mod post;
mod rating;
mod saved_store;
mod user;
mod user_token;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn user_from_entity(entity: models::UserEntity) -> Result<User> {
    let models::UserEntity {
        id,
        username,
        email,
        password,
        role,
        failed_login_attempts,
        locked_until,
        last_login_at,
        created_at,
    } = entity;
    let role = Role::try_from(role).map_err(|err| repo::Error::Other(anyhow!(err)))?;
    Ok(User {
        id: id.into(),
        username,
        email: EmailAddress::new_unchecked(email),
        password: Password::from_hash(password),
        role,
        failed_login_attempts: failed_login_attempts.max(0) as u16,
        locked_until: locked_until.map(Timestamp::from_secs),
        last_login_at: last_login_at.map(Timestamp::from_secs),
        created_at: Timestamp::from_secs(created_at),
    })
}

fn place_from_entity(
    entity: models::PlaceEntity,
    tags: Vec<String>,
) -> Result<(Place, ModerationStatus)> {
    let models::PlaceEntity {
        id,
        name,
        description,
        street,
        city,
        region,
        country,
        lat,
        lng,
        category,
        vegan,
        vegetarian,
        gluten_free,
        dairy_free,
        organic,
        status,
        avg_rating,
        created_at,
        created_by,
        reviewed_at: _,
        reviewed_by: _,
        review_notes: _,
    } = entity;
    let status =
        ModerationStatus::try_from(status).map_err(|err| repo::Error::Other(anyhow!(err)))?;
    let pos = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(MapPoint::from_lat_lng_deg(lat, lng)),
        _ => None,
    };
    let place = Place {
        id: id.into(),
        name,
        description,
        address: Address {
            street,
            city,
            region,
            country,
        },
        pos,
        category,
        tags,
        diets: DietaryFlags {
            vegan,
            vegetarian,
            gluten_free,
            dairy_free,
            organic,
        },
        avg_rating: avg_rating.map(|r| r.max(0) as u8),
        created: Activity {
            at: Timestamp::from_secs(created_at),
            by: created_by.map(Into::into),
        },
    };
    Ok((place, status))
}

fn event_from_entity(entity: models::EventEntity) -> Result<(Event, ModerationStatus)> {
    let models::EventEntity {
        id,
        title,
        description,
        city,
        category,
        start_at,
        status,
        created_at,
        created_by,
        reviewed_at: _,
        reviewed_by: _,
        review_notes: _,
    } = entity;
    let status =
        ModerationStatus::try_from(status).map_err(|err| repo::Error::Other(anyhow!(err)))?;
    let event = Event {
        id: id.into(),
        title,
        description,
        city,
        category,
        start: Timestamp::from_secs(start_at),
        created: Activity {
            at: Timestamp::from_secs(created_at),
            by: created_by.map(Into::into),
        },
    };
    Ok((event, status))
}

fn post_from_entity(entity: models::PostEntity) -> Result<Post> {
    let models::PostEntity {
        id,
        author_id,
        title,
        body,
        section,
        status,
        created_at,
    } = entity;
    let section = section
        .parse::<PostSection>()
        .map_err(|err| repo::Error::Other(anyhow!(err)))?;
    let status = PostStatus::try_from(status).map_err(|err| repo::Error::Other(anyhow!(err)))?;
    Ok(Post {
        id: id.into(),
        author_id: author_id.into(),
        title,
        body,
        section,
        status,
        created_at: Timestamp::from_secs(created_at),
    })
}

fn comment_from_entity(entity: models::PostCommentEntity) -> Result<PostComment> {
    let models::PostCommentEntity {
        id,
        post_id,
        author_id,
        body,
        status,
        created_at,
    } = entity;
    let status = PostStatus::try_from(status).map_err(|err| repo::Error::Other(anyhow!(err)))?;
    Ok(PostComment {
        id: id.into(),
        post_id: post_id.into(),
        author_id: author_id.into(),
        body,
        status,
        created_at: Timestamp::from_secs(created_at),
    })
}

fn rating_from_entity(entity: models::RatingEntity) -> Rating {
    let models::RatingEntity {
        id,
        place_id,
        user_id,
        created_at,
        value,
        comment,
    } = entity;
    Rating {
        id: id.into(),
        place_id: place_id.into(),
        user_id: user_id.into(),
        created_at: Timestamp::from_secs(created_at),
        value: RatingValue::from(value.clamp(0, u8::MAX as i16) as u8),
        comment,
    }
}

