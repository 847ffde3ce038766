use super::prelude::*;
use crate::util::{self, validate};

#[derive(Debug, Clone, Default)]
pub struct NewPlace {
    pub name: String,
    pub description: String,
    pub street: Option<String>,
    pub city: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category: String,
    pub tags: Vec<String>,
    pub diets: DietaryFlags,
}

/// Stores a publicly submitted place. It starts out pending and
/// stays invisible until approved.
pub fn create_place<R: PlaceRepo>(
    repo: &R,
    new_place: NewPlace,
    submitter: Option<&Id>,
) -> Result<Place> {
    let NewPlace {
        name,
        description,
        street,
        city,
        region,
        country,
        lat,
        lng,
        category,
        tags,
        diets,
    } = new_place;
    if !validate::is_valid_title(&name) {
        return Err(Error::Title);
    }
    if city.trim().is_empty() || category.trim().is_empty() {
        return Err(Error::Text);
    }
    let pos = match (lat, lng) {
        (Some(lat), Some(lng)) => {
            let pos = MapPoint::from_lat_lng_deg(lat, lng);
            if !pos.is_valid() {
                return Err(Error::InvalidPosition);
            }
            Some(pos)
        }
        (None, None) => None,
        _ => return Err(Error::InvalidPosition),
    };
    let place = Place {
        id: Id::new(),
        name: name.trim().to_string(),
        description,
        address: Address {
            street,
            city,
            region,
            country: country.unwrap_or_else(|| "Portugal".to_string()),
        },
        pos,
        category,
        tags: util::prepare_tag_list(tags.iter().map(String::as_str)),
        diets,
        avg_rating: None,
        created: Activity::now(submitter.cloned()),
    };
    log::debug!("Creating place {} ({})", place.name, place.id);
    repo.create_place(&place, ModerationStatus::Pending)?;
    Ok(place)
}

/// Loads a single place, visible to the public only once approved.
pub fn get_approved_place<R: PlaceRepo>(repo: &R, id: &str) -> Result<Place> {
    let (place, status) = repo.get_place(id)?;
    if status != ModerationStatus::Approved {
        return Err(Error::Repo(crate::RepoError::NotFound));
    }
    Ok(place)
}

/// Searches approved places.
pub fn search_places<R: PlaceRepo>(
    repo: &R,
    filter: &PlaceFilter,
    pagination: &Pagination,
) -> Result<Vec<Place>> {
    Ok(repo.query_places(filter, ModerationStatus::Approved, pagination)?)
}
