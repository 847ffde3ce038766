use super::{error::*, prelude::*, *};

pub struct BackendFixture {
    pub db_connections: sqlite::Connections,
}

impl BackendFixture {
    pub fn new() -> Self {
        let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
        ee_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap());
        Self { db_connections }
    }

    fn register_user(&self, username: &str, role: Role) -> User {
        let db = self.db_connections.exclusive().unwrap();
        let mut user = usecases::register(
            &db,
            usecases::NewUser {
                username: username.into(),
                email: format!("{username}@example.com").parse().unwrap(),
                password: "secret1".into(),
            },
            Timestamp::from_secs(0),
        )
        .unwrap();
        if user.role != role {
            user.role = role;
            db.update_user(&user).unwrap();
        }
        user
    }

    fn create_approved_place(&self, name: &str) -> Place {
        let db = self.db_connections.exclusive().unwrap();
        let place = usecases::create_place(
            &db,
            usecases::NewPlace {
                name: name.into(),
                description: "A place".into(),
                city: "Lisboa".into(),
                category: "grocery".into(),
                ..Default::default()
            },
            None,
        )
        .unwrap();
        drop(db);
        moderate_place(
            &self.db_connections,
            place.id.as_str(),
            usecases::ModerationDecision {
                status: ModerationStatus::Approved,
                notes: None,
                reviewer: Id::new(),
            },
            Timestamp::from_secs(1),
        )
        .unwrap();
        place
    }

    fn create_post_with_thread(&self, author: &User, liker: &User) -> Post {
        let db = self.db_connections.exclusive().unwrap();
        let post = usecases::create_post(
            &db,
            author,
            usecases::NewPost {
                title: "Where to buy tempeh?".into(),
                body: "Looking for a store in Lisbon".into(),
                section: "food-finds".into(),
            },
            Timestamp::from_secs(10),
        )
        .unwrap();
        usecases::create_comment(
            &db,
            liker,
            post.id.as_str(),
            "Try the market hall".into(),
            Timestamp::from_secs(11),
        )
        .unwrap();
        usecases::toggle_like(&db, liker, post.id.as_str(), Timestamp::from_secs(12)).unwrap();
        post
    }
}

#[test]
fn delete_post_cascades_atomically() {
    let fixture = BackendFixture::new();
    let author = fixture.register_user("maria", Role::User);
    let liker = fixture.register_user("joao", Role::User);
    let post = fixture.create_post_with_thread(&author, &liker);

    delete_post(&fixture.db_connections, &author, post.id.as_str()).unwrap();

    let db = fixture.db_connections.shared().unwrap();
    // The post is soft-deleted but retained
    let stored = db.get_post(post.id.as_str()).unwrap();
    assert_eq!(PostStatus::Deleted, stored.status);
    // Its comments are soft-deleted
    assert!(db.load_comments_of_post(post.id.as_str()).unwrap().is_empty());
    // Its likes are gone for good
    assert_eq!(0, db.count_likes_of_post(post.id.as_str()).unwrap());
    // And it no longer shows up anywhere
    assert!(db
        .list_posts(None, &Pagination::default(), None)
        .unwrap()
        .is_empty());
}

#[test]
fn delete_post_requires_ownership_or_admin() {
    let fixture = BackendFixture::new();
    let author = fixture.register_user("maria", Role::User);
    let liker = fixture.register_user("joao", Role::User);
    let admin = fixture.register_user("root", Role::Admin);
    let post = fixture.create_post_with_thread(&author, &liker);

    let denied = delete_post(&fixture.db_connections, &liker, post.id.as_str());
    assert!(matches!(
        denied,
        Err(AppError::Business(BError::Parameter(
            usecases::Error::Forbidden
        )))
    ));
    // Nothing must have been touched by the failed attempt
    let db = fixture.db_connections.shared().unwrap();
    assert_eq!(1, db.count_likes_of_post(post.id.as_str()).unwrap());
    assert_eq!(1, db.load_comments_of_post(post.id.as_str()).unwrap().len());
    drop(db);

    delete_post(&fixture.db_connections, &admin, post.id.as_str()).unwrap();
}

#[test]
fn failed_cascade_leaves_no_partial_state() {
    let fixture = BackendFixture::new();
    let author = fixture.register_user("maria", Role::User);
    let liker = fixture.register_user("joao", Role::User);
    let post = fixture.create_post_with_thread(&author, &liker);

    // Run the same cascade as delete_post but fail after the last
    // step. The rollback must restore likes, comments and the post.
    let mut connection = fixture.db_connections.exclusive().unwrap();
    let result: std::result::Result<(), usecases::Error> = connection.transaction(|conn| {
        conn.delete_likes_of_post(post.id.as_str())?;
        conn.mark_comments_of_post_deleted(post.id.as_str())?;
        conn.mark_post_deleted(post.id.as_str())?;
        Err(usecases::Error::Repo(RepoError::NotFound))
    });
    assert!(result.is_err());
    drop(connection);

    let db = fixture.db_connections.shared().unwrap();
    assert_eq!(PostStatus::Active, db.get_post(post.id.as_str()).unwrap().status);
    assert_eq!(1, db.count_likes_of_post(post.id.as_str()).unwrap());
    assert_eq!(1, db.load_comments_of_post(post.id.as_str()).unwrap().len());
}

#[test]
fn rating_a_place_updates_its_average() {
    let fixture = BackendFixture::new();
    let user = fixture.register_user("maria", Role::User);
    let place = fixture.create_approved_place("Mercearia Bio");

    rate_place(
        &fixture.db_connections,
        &user,
        usecases::NewPlaceRating {
            place_id: place.id.to_string(),
            value: 4,
            comment: Some("Great selection".into()),
        },
        Timestamp::from_secs(20),
    )
    .unwrap();
    rate_place(
        &fixture.db_connections,
        &user,
        usecases::NewPlaceRating {
            place_id: place.id.to_string(),
            value: 5,
            comment: None,
        },
        Timestamp::from_secs(21),
    )
    .unwrap();

    let db = fixture.db_connections.shared().unwrap();
    let (stored, _) = db.get_place(place.id.as_str()).unwrap();
    assert_eq!(Some(5), stored.avg_rating);
    assert_eq!(2, db.load_ratings_of_place(place.id.as_str()).unwrap().len());
}

#[test]
fn moderation_is_terminal() {
    let fixture = BackendFixture::new();
    let admin = fixture.register_user("root", Role::Admin);
    let db = fixture.db_connections.exclusive().unwrap();
    let place = usecases::create_place(
        &db,
        usecases::NewPlace {
            name: "Pending store".into(),
            description: "".into(),
            city: "Porto".into(),
            category: "grocery".into(),
            ..Default::default()
        },
        None,
    )
    .unwrap();
    drop(db);

    moderate_place(
        &fixture.db_connections,
        place.id.as_str(),
        usecases::ModerationDecision {
            status: ModerationStatus::Rejected,
            notes: Some("spam".into()),
            reviewer: admin.id.clone(),
        },
        Timestamp::from_secs(5),
    )
    .unwrap();

    let again = moderate_place(
        &fixture.db_connections,
        place.id.as_str(),
        usecases::ModerationDecision {
            status: ModerationStatus::Approved,
            notes: None,
            reviewer: admin.id.clone(),
        },
        Timestamp::from_secs(6),
    );
    assert!(matches!(
        again,
        Err(AppError::Business(BError::Parameter(
            usecases::Error::AlreadyModerated
        )))
    ));
}

#[test]
fn reset_password_flow() {
    let fixture = BackendFixture::new();
    let user = fixture.register_user("maria", Role::User);
    let now = Timestamp::from_secs(100);

    struct CaptureNonce(std::cell::RefCell<Option<EmailNonce>>);
    impl ee_core::gateways::notify::NotificationGateway for CaptureNonce {
        fn user_registered(&self, _: &User) {}
        fn user_reset_password_requested(&self, email_nonce: &EmailNonce) {
            *self.0.borrow_mut() = Some(email_nonce.clone());
        }
    }

    let capture = CaptureNonce(std::cell::RefCell::new(None));
    reset_password_request(&fixture.db_connections, &capture, &user.email, now).unwrap();
    let email_nonce = capture.0.borrow().clone().unwrap();

    reset_password_with_email_nonce(
        &fixture.db_connections,
        email_nonce,
        "newsecret".parse().unwrap(),
        now,
    )
    .unwrap();

    let db = fixture.db_connections.exclusive().unwrap();
    let logged_in = usecases::login(
        &db,
        &usecases::Credentials {
            username_or_email: "maria",
            password: "newsecret",
        },
        now,
    );
    assert!(logged_in.is_ok());
}
