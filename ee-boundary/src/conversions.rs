use ee_entities::{place, post, rating, saved, user};

use super::*;

impl From<user::User> for User {
    fn from(from: user::User) -> Self {
        // The password hash must never cross the API boundary.
        let user::User {
            id,
            username,
            email,
            password: _,
            role,
            failed_login_attempts: _,
            locked_until: _,
            last_login_at,
            created_at,
        } = from;
        Self {
            id: id.into(),
            username,
            email: email.into_string(),
            role: match role {
                user::Role::User => "user",
                user::Role::Admin => "admin",
            }
            .to_string(),
            last_login_at: last_login_at.map(|t| t.as_secs()),
            created_at: created_at.as_secs(),
        }
    }
}

impl From<place::DietaryFlags> for DietaryFlags {
    fn from(from: place::DietaryFlags) -> Self {
        let place::DietaryFlags {
            vegan,
            vegetarian,
            gluten_free,
            dairy_free,
            organic,
        } = from;
        Self {
            vegan,
            vegetarian,
            gluten_free,
            dairy_free,
            organic,
        }
    }
}

impl From<DietaryFlags> for place::DietaryFlags {
    fn from(from: DietaryFlags) -> Self {
        let DietaryFlags {
            vegan,
            vegetarian,
            gluten_free,
            dairy_free,
            organic,
        } = from;
        Self {
            vegan,
            vegetarian,
            gluten_free,
            dairy_free,
            organic,
        }
    }
}

impl From<place::Place> for Place {
    fn from(from: place::Place) -> Self {
        let place::Place {
            id,
            name,
            description,
            address,
            pos,
            category,
            tags,
            diets,
            avg_rating,
            created: _,
        } = from;
        Self {
            id: id.into(),
            name,
            description,
            street: address.street,
            city: address.city,
            region: address.region,
            country: address.country,
            lat: pos.map(|p| p.lat()),
            lng: pos.map(|p| p.lng()),
            category,
            tags,
            diets: diets.into(),
            avg_rating,
        }
    }
}

impl From<ee_entities::event::Event> for Event {
    fn from(from: ee_entities::event::Event) -> Self {
        let ee_entities::event::Event {
            id,
            title,
            description,
            city,
            category,
            start,
            created: _,
        } = from;
        Self {
            id: id.into(),
            title,
            description,
            city,
            category,
            start: start.as_secs(),
        }
    }
}

impl From<rating::Rating> for Rating {
    fn from(from: rating::Rating) -> Self {
        let rating::Rating {
            id,
            place_id,
            user_id,
            created_at,
            value,
            comment,
        } = from;
        Self {
            id: id.into(),
            place_id: place_id.into(),
            user_id: user_id.into(),
            created_at: created_at.as_secs(),
            value: value.into(),
            comment,
        }
    }
}

impl From<post::Post> for Post {
    fn from(from: post::Post) -> Self {
        let post::Post {
            id,
            author_id,
            title,
            body,
            section,
            status: _,
            created_at,
        } = from;
        Self {
            id: id.into(),
            author_id: author_id.into(),
            title,
            body,
            section: section.to_string(),
            created_at: created_at.as_secs(),
        }
    }
}

impl From<post::PostComment> for Comment {
    fn from(from: post::PostComment) -> Self {
        let post::PostComment {
            id,
            post_id,
            author_id,
            body,
            status: _,
            created_at,
        } = from;
        Self {
            id: id.into(),
            post_id: post_id.into(),
            author_id: author_id.into(),
            body,
            created_at: created_at.as_secs(),
        }
    }
}

impl From<(saved::SavedStore, place::Place)> for SavedStore {
    fn from((saved, place): (saved::SavedStore, place::Place)) -> Self {
        Self {
            place: place.into(),
            saved_at: saved.created_at.as_secs(),
        }
    }
}
