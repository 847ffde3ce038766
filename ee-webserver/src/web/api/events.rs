use ee_entities::moderation::ModerationStatus;

use super::*;

#[get("/events?<city>&<category>&<when>&<offset>&<limit>")]
pub fn get_events(
    db: sqlite::Connections,
    city: Option<String>,
    category: Option<String>,
    when: Option<String>,
    offset: Option<u64>,
    limit: Option<u64>,
    _api_limit: GeneralRateLimit,
) -> Result<Vec<json::Event>> {
    let time_filter = when
        .as_deref()
        .map(usecases::EventTimeFilter::try_from_param)
        .transpose()?;
    let pagination = Pagination { offset, limit };
    let events = usecases::query_events(
        &db.shared()?,
        city,
        category,
        time_filter,
        &pagination,
        Timestamp::now(),
    )?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

#[post("/events", format = "application/json", data = "<new_event>")]
pub fn post_event(
    db: sqlite::Connections,
    account: Option<Account>,
    new_event: JsonResult<json::NewEvent>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<json::Event> {
    let json::NewEvent {
        title,
        description,
        city,
        category,
        start,
    } = new_event?.into_inner();
    let new_event = usecases::NewEvent {
        title,
        description,
        city,
        category,
        start,
    };
    let submitter = account.map(|account| account.user_id());
    let event = usecases::store_event(&db.exclusive()?, new_event, submitter.as_ref())?;
    Ok(Json(event.into()))
}

fn moderate_event(
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
    flows::moderate_event(db, id, decision, Timestamp::now())?;
    Ok(())
}

#[post("/admin/approve-event/<id>", format = "application/json", data = "<req>")]
pub fn post_approve_event(
    db: sqlite::Connections,
    account: Account,
    id: String,
    req: Option<Json<json::ModerationRequest>>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<()> {
    let notes = req.and_then(|req| req.into_inner().notes);
    moderate_event(&db, &account, &id, ModerationStatus::Approved, notes)?;
    Ok(Json(()))
}

#[post("/admin/reject-event/<id>", format = "application/json", data = "<req>")]
pub fn post_reject_event(
    db: sqlite::Connections,
    account: Account,
    id: String,
    req: Option<Json<json::ModerationRequest>>,
    _csrf: Csrf,
    _api_limit: GeneralRateLimit,
) -> Result<()> {
    let notes = req.and_then(|req| req.into_inner().notes);
    moderate_event(&db, &account, &id, ModerationStatus::Rejected, notes)?;
    Ok(Json(()))
}
