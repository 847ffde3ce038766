use ee_core::{
    gateways::geocode::GeocodingRequest,
    repositories::PlaceFilter,
};
use ee_entities::{moderation::ModerationStatus, place::DietaryFlags};

use super::*;

#[allow(clippy::too_many_arguments)]
#[get("/places?<city>&<category>&<tag>&<vegan>&<vegetarian>&<gluten_free>&<dairy_free>&<organic>&<offset>&<limit>")]
pub fn get_places(
    db: sqlite::Connections,
    city: Option<String>,
    category: Option<String>,
    tag: Vec<String>,
    vegan: Option<bool>,
    vegetarian: Option<bool>,
    gluten_free: Option<bool>,
    dairy_free: Option<bool>,
    organic: Option<bool>,
    offset: Option<u64>,
    limit: Option<u64>,
    _api_limit: GeneralRateLimit,
) -> Result<Vec<json::Place>> {
    let filter = PlaceFilter {
        city,
        category,
        tags: tag,
        diets: DietaryFlags {
            vegan: vegan.unwrap_or_default(),
            vegetarian: vegetarian.unwrap_or_default(),
            gluten_free: gluten_free.unwrap_or_default(),
            dairy_free: dairy_free.unwrap_or_default(),
            organic: organic.unwrap_or_default(),
        },
    };
    let pagination = Pagination { offset, limit };
    let places = usecases::search_places(&db.shared()?, &filter, &pagination)?;
    Ok(Json(places.into_iter().map(Into::into).collect()))
}

#[get("/places/<id>")]
pub fn get_place(
    db: sqlite::Connections,
    id: String,
    _api_limit: GeneralRateLimit,
) -> Result<json::Place> {
    let place = usecases::get_approved_place(&db.shared()?, &id)?;
    Ok(Json(place.into()))
}

#[post("/places", format = "application/json", data = "<new_place>")]
pub fn post_place(
    db: sqlite::Connections,
    geo: &State<GeoCoding>,
    account: Option<Account>,
    new_place: JsonResult<json::NewPlace>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<json::Place> {
    let json::NewPlace {
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
    } = new_place?.into_inner();
    let mut new_place = usecases::NewPlace {
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
        diets: diets.into(),
    };
    if new_place.lat.is_none() && new_place.lng.is_none() {
        resolve_address(geo, &mut new_place);
    }
    let submitter = account.map(|account| account.user_id());
    let place = usecases::create_place(&db.exclusive()?, new_place, submitter.as_ref())?;
    Ok(Json(place.into()))
}

/// Best effort: a submission without coordinates is still accepted
/// when the address cannot be resolved.
fn resolve_address(geo: &State<GeoCoding>, new_place: &mut usecases::NewPlace) {
    let Some(gateway) = &geo.0 else {
        log::debug!("No geocoding gateway configured, skipping address resolution");
        return;
    };
    let request = GeocodingRequest::new(
        new_place.street.clone(),
        new_place.city.clone(),
        new_place.region.clone(),
    );
    match gateway.geocode(&request) {
        Ok(resolved) => {
            log::debug!(
                "Resolved '{}' to {} (confidence {})",
                request.query_line(),
                resolved.pos,
                resolved.confidence
            );
            new_place.lat = Some(resolved.pos.lat());
            new_place.lng = Some(resolved.pos.lng());
        }
        Err(failure) => {
            log::warn!(
                "Could not geocode '{}': {failure}",
                request.query_line()
            );
        }
    }
}

#[post("/places/<id>/ratings", format = "application/json", data = "<rating>")]
pub fn post_place_rating(
    db: sqlite::Connections,
    user: AuthenticatedUser,
    id: String,
    rating: JsonResult<json::NewPlaceRating>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<json::Rating> {
    let json::NewPlaceRating { value, comment } = rating?.into_inner();
    let new_rating = usecases::NewPlaceRating {
        place_id: id,
        value,
        comment,
    };
    let rating = flows::rate_place(&db, &user.0, new_rating, Timestamp::now())?;
    Ok(Json(rating.into()))
}

fn moderate_place(
    db: &sqlite::Connections,
    account: &Account,
    id: &str,
    status: ModerationStatus,
    notes: Option<String>,
) -> std::result::Result<(), ApiError> {
    let admin = {
        let shared = db.shared()?;
        account.user_with_min_role(&shared, Role::Admin)?
    };
    let decision = usecases::ModerationDecision {
        status,
        notes,
        reviewer: admin.id,
    };
    flows::moderate_place(db, id, decision, Timestamp::now())?;
    Ok(())
}

#[post("/admin/approve-place/<id>", format = "application/json", data = "<req>")]
pub fn post_approve_place(
    db: sqlite::Connections,
    account: Account,
    id: String,
    req: Option<Json<json::ModerationRequest>>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<()> {
    let notes = req.and_then(|req| req.into_inner().notes);
    moderate_place(&db, &account, &id, ModerationStatus::Approved, notes)?;
    Ok(Json(()))
}

#[post("/admin/reject-place/<id>", format = "application/json", data = "<req>")]
pub fn post_reject_place(
    db: sqlite::Connections,
    account: Account,
    id: String,
    req: Option<Json<json::ModerationRequest>>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<()> {
    let notes = req.and_then(|req| req.into_inner().notes);
    moderate_place(&db, &account, &id, ModerationStatus::Rejected, notes)?;
    Ok(Json(()))
}
