use super::*;

pub mod prelude {
    pub use crate::web::tests::prelude::*;

    use super::super::{self as api};
    pub use rocket::local::blocking::Client;

    pub fn setup() -> (Client, ee_db_sqlite::Connections) {
        crate::web::tests::setup(vec![("/api", api::routes())])
    }

    pub fn test_json(res: &LocalResponse) {
        assert_eq!(
            res.headers().get("Content-Type").collect::<Vec<_>>()[0],
            "application/json"
        );
    }
}

use self::prelude::*;

use ee_core::{repositories::UserRepo as _, usecases};
use ee_entities::{time::Timestamp, user::Role};

fn csrf_token(client: &Client) -> String {
    let res = client.get("/api/csrf-token").dispatch();
    assert_eq!(Status::Ok, res.status());
    let body: json::CsrfToken = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    body.token
}

fn register_user(db: &ee_db_sqlite::Connections, username: &str, password: &str, role: Role) {
    let conn = db.exclusive().unwrap();
    let mut user = usecases::register(
        &conn,
        usecases::NewUser {
            username: username.into(),
            email: format!("{username}@example.com").parse().unwrap(),
            password: password.into(),
        },
        Timestamp::now(),
    )
    .unwrap();
    if user.role != role {
        user.role = role;
        conn.update_user(&user).unwrap();
    }
}

fn login(client: &Client, token: &str, username_or_email: &str, password: &str) -> Status {
    let body = format!(
        r#"{{"username_or_email":"{username_or_email}","password":"{password}"}}"#
    );
    client
        .post("/api/auth/login")
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.to_string()))
        .body(body)
        .dispatch()
        .status()
}

fn submit_place(client: &Client, token: &str, name: &str, city: &str) -> String {
    let body = format!(
        r#"{{"name":"{name}","description":"Test place","city":"{city}","category":"grocery","tags":["bio"]}}"#
    );
    let res = client
        .post("/api/places")
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.to_string()))
        .body(body)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let place: json::Place = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    place.id
}

// --- CSRF --- //

#[test]
fn reject_mutations_without_csrf_token() {
    let (client, _db) = setup();
    let res = client
        .post("/api/places")
        .header(ContentType::JSON)
        .body(r#"{"name":"x","city":"Lisboa","category":"grocery"}"#)
        .dispatch();
    assert_eq!(Status::Forbidden, res.status());
    let body: json::Error = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert_eq!(Some("EBADCSRFTOKEN".to_string()), body.code);
}

#[test]
fn accept_mutations_with_fresh_csrf_token() {
    let (client, _db) = setup();
    let token = csrf_token(&client);
    submit_place(&client, &token, "Mercearia", "Lisboa");
}

#[test]
fn reject_csrf_token_of_another_session() {
    let (client, _db) = setup();
    // Establishes this session's secret
    let _ = csrf_token(&client);
    // A token bound to some other session's secret
    let state = client
        .rocket()
        .state::<csrf::CsrfState>()
        .unwrap();
    let foreign_token = state.generate_token("another-session-secret").unwrap();
    let res = client
        .post("/api/places")
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, foreign_token))
        .body(r#"{"name":"x","city":"Lisboa","category":"grocery"}"#)
        .dispatch();
    assert_eq!(Status::Forbidden, res.status());
}

#[test]
fn safe_methods_bypass_csrf() {
    let (client, _db) = setup();
    let res = client.get("/api/places").dispatch();
    assert_eq!(Status::Ok, res.status());
    test_json(&res);
}

// --- auth --- //

#[test]
fn register_login_and_current_user() {
    let (client, _db) = setup();
    let token = csrf_token(&client);

    let res = client
        .post("/api/auth/register")
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body(r#"{"username":"maria","email":"maria@example.com","password":"secret1"}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let user: json::User = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert_eq!("maria", user.username);
    assert_eq!("user", user.role);

    // Duplicate username
    let res = client
        .post("/api/auth/register")
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body(r#"{"username":"maria","email":"other@example.com","password":"secret1"}"#)
        .dispatch();
    assert_eq!(Status::Conflict, res.status());

    // Not logged in yet
    let res = client.get("/api/users/current").dispatch();
    assert_eq!(Status::Unauthorized, res.status());

    assert_eq!(Status::Ok, login(&client, &token, "maria", "secret1"));

    let res = client.get("/api/users/current").dispatch();
    assert_eq!(Status::Ok, res.status());
    let user: json::User = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert_eq!("maria", user.username);

    // Login by e-mail works as well
    assert_eq!(
        Status::Ok,
        login(&client, &token, "maria@example.com", "secret1")
    );

    // Logout destroys the session
    let res = client
        .post("/api/auth/logout")
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let res = client.get("/api/users/current").dispatch();
    assert_eq!(Status::Unauthorized, res.status());
}

#[test]
fn failed_login_reports_remaining_attempts() {
    let (client, db) = setup();
    register_user(&db, "maria", "secret1", Role::User);
    let token = csrf_token(&client);
    let res = client
        .post("/api/auth/login")
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token))
        .body(r#"{"username_or_email":"maria","password":"wrong"}"#)
        .dispatch();
    assert_eq!(Status::Unauthorized, res.status());
    let body: json::Error = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert!(body.message.contains("attempt(s) remaining"));
}

#[test]
fn lock_account_after_repeated_failures() {
    let (client, db) = setup();
    register_user(&db, "maria", "secret1", Role::User);
    let token = csrf_token(&client);

    // The login rate limit is per IP, the lockout is per account.
    // Spread the attempts over distinct addresses to exercise the
    // lockout in isolation.
    for i in 0..5 {
        let res = client
            .post("/api/auth/login")
            .header(ContentType::JSON)
            .header(Header::new(csrf::CSRF_HEADER, token.clone()))
            .remote(format!("192.0.2.{}:443", i + 1).parse().unwrap())
            .body(r#"{"username_or_email":"maria","password":"wrong"}"#)
            .dispatch();
        assert_eq!(Status::Unauthorized, res.status());
    }

    // Even the correct password is rejected now
    let res = client
        .post("/api/auth/login")
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token))
        .remote("192.0.2.77:443".parse().unwrap())
        .body(r#"{"username_or_email":"maria","password":"secret1"}"#)
        .dispatch();
    assert_eq!(Status::Unauthorized, res.status());
    let body: json::Error = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert_eq!(Some("ACCOUNT_LOCKED".to_string()), body.code);
}

// --- rate limiting --- //

#[test]
fn login_attempts_are_rate_limited_per_ip() {
    let (client, db) = setup();
    register_user(&db, "maria", "secret1", Role::User);
    let token = csrf_token(&client);

    for _ in 0..3 {
        let status = login(&client, &token, "maria", "wrong");
        assert_eq!(Status::Unauthorized, status);
    }
    // The 4th attempt from the same address is rejected even though
    // the credentials are correct
    let res = client
        .post("/api/auth/login")
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body(r#"{"username_or_email":"maria","password":"secret1"}"#)
        .dispatch();
    assert_eq!(Status::TooManyRequests, res.status());
    let body: json::Error = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert_eq!(Some("RATE_LIMITED".to_string()), body.code);

    // A different address still gets through
    let res = client
        .post("/api/auth/login")
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token))
        .remote("203.0.113.9:443".parse().unwrap())
        .body(r#"{"username_or_email":"maria","password":"secret1"}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
}

// --- moderation --- //

#[test]
fn moderation_scenario() {
    let (client, db) = setup();
    register_user(&db, "root", "secret1", Role::Admin);
    let token = csrf_token(&client);

    let approved_id = submit_place(&client, &token, "Mercearia Bio", "Lisboa");
    let rejected_id = submit_place(&client, &token, "Spam Shop", "Lisboa");

    // Pending submissions are invisible to the public
    let res = client.get("/api/places?city=Lisboa").dispatch();
    let places: Vec<json::Place> = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert!(places.is_empty());
    let res = client.get(format!("/api/places/{approved_id}")).dispatch();
    assert_eq!(Status::NotFound, res.status());

    // Moderation requires an admin session
    let res = client
        .post(format!("/api/admin/approve-place/{approved_id}"))
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body(r#"{"notes":"looks good"}"#)
        .dispatch();
    assert_eq!(Status::Unauthorized, res.status());

    assert_eq!(Status::Ok, login(&client, &token, "root", "secret1"));
    let res = client
        .post(format!("/api/admin/approve-place/{approved_id}"))
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body(r#"{"notes":"looks good"}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());

    // Rejection requires notes
    let res = client
        .post(format!("/api/admin/reject-place/{rejected_id}"))
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body("{}")
        .dispatch();
    assert_eq!(Status::BadRequest, res.status());
    let res = client
        .post(format!("/api/admin/reject-place/{rejected_id}"))
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body(r#"{"notes":"spam"}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());

    // Only the approved place is publicly visible
    let res = client.get("/api/places?city=Lisboa").dispatch();
    let places: Vec<json::Place> = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert_eq!(1, places.len());
    assert_eq!("Mercearia Bio", places[0].name);
    let res = client.get(format!("/api/places/{rejected_id}")).dispatch();
    assert_eq!(Status::NotFound, res.status());

    // Decisions are terminal
    let res = client
        .post(format!("/api/admin/approve-place/{rejected_id}"))
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body("{}")
        .dispatch();
    assert_eq!(Status::Conflict, res.status());
}

// --- saved stores --- //

#[test]
fn saving_the_same_place_twice_is_a_conflict() {
    let (client, db) = setup();
    register_user(&db, "root", "secret1", Role::Admin);
    register_user(&db, "maria", "secret1", Role::User);
    let token = csrf_token(&client);

    let place_id = submit_place(&client, &token, "Mercearia Bio", "Lisboa");
    assert_eq!(Status::Ok, login(&client, &token, "root", "secret1"));
    let res = client
        .post(format!("/api/admin/approve-place/{place_id}"))
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body("{}")
        .dispatch();
    assert_eq!(Status::Ok, res.status());

    assert_eq!(Status::Ok, login(&client, &token, "maria", "secret1"));
    let body = format!(r#"{{"place_id":"{place_id}"}}"#);
    let res = client
        .post("/api/user/saved-stores")
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body(body.clone())
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let res = client
        .post("/api/user/saved-stores")
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body(body)
        .dispatch();
    assert_eq!(Status::Conflict, res.status());

    let res = client.get("/api/user/saved-stores").dispatch();
    let saved: Vec<json::SavedStore> = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert_eq!(1, saved.len());

    let res = client
        .delete(format!("/api/user/saved-stores/{place_id}"))
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let res = client.get("/api/user/saved-stores").dispatch();
    let saved: Vec<json::SavedStore> = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert!(saved.is_empty());
}

// --- community --- //

#[test]
fn community_post_lifecycle() {
    let (client, db) = setup();
    register_user(&db, "maria", "secret1", Role::User);
    let token = csrf_token(&client);
    assert_eq!(Status::Ok, login(&client, &token, "maria", "secret1"));

    let res = client
        .post("/api/community/posts")
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body(r#"{"title":"Where to buy tempeh?","body":"Any tips?","section":"food-finds"}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let post: json::Post = serde_json::from_str(&res.into_string().unwrap()).unwrap();

    // Commenting and liking
    let res = client
        .post(format!("/api/community/posts/{}/comments", post.id))
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body(r#"{"body":"Try the market hall"}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let res = client
        .post(format!("/api/community/posts/{}/like", post.id))
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let like: json::LikeState = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert!(like.liked);
    assert_eq!(1, like.like_count);

    // The listing carries the aggregate counts and the viewer's
    // like state
    let res = client.get("/api/community/posts?section=food-finds").dispatch();
    let posts: Vec<json::PostSummary> =
        serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert_eq!(1, posts.len());
    assert_eq!(1, posts[0].like_count);
    assert_eq!(1, posts[0].comment_count);
    assert!(posts[0].liked_by_me);

    // Toggling the like again removes it
    let res = client
        .post(format!("/api/community/posts/{}/like", post.id))
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .dispatch();
    let like: json::LikeState = serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert!(!like.liked);
    assert_eq!(0, like.like_count);

    // Deleting hides the post and its thread
    let res = client
        .delete(format!("/api/community/posts/{}", post.id))
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let res = client
        .get(format!("/api/community/posts/{}", post.id))
        .dispatch();
    assert_eq!(Status::NotFound, res.status());
    let res = client.get("/api/community/posts").dispatch();
    let posts: Vec<json::PostSummary> =
        serde_json::from_str(&res.into_string().unwrap()).unwrap();
    assert!(posts.is_empty());
}

#[test]
fn only_the_author_or_an_admin_may_delete_a_post() {
    let (client, db) = setup();
    register_user(&db, "maria", "secret1", Role::User);
    register_user(&db, "joao", "secret1", Role::User);
    let token = csrf_token(&client);

    assert_eq!(Status::Ok, login(&client, &token, "maria", "secret1"));
    let res = client
        .post("/api/community/posts")
        .header(ContentType::JSON)
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .body(r#"{"title":"A post","body":"content","section":"general"}"#)
        .dispatch();
    let post: json::Post = serde_json::from_str(&res.into_string().unwrap()).unwrap();

    assert_eq!(Status::Ok, login(&client, &token, "joao", "secret1"));
    let res = client
        .delete(format!("/api/community/posts/{}", post.id))
        .header(Header::new(csrf::CSRF_HEADER, token.clone()))
        .dispatch();
    assert_eq!(Status::Forbidden, res.status());
}
