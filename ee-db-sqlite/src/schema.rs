table! {
    users (id) {
        id -> Text,
        username -> Text,
        email -> Text,
        password -> Text,
        role -> SmallInt,
        failed_login_attempts -> SmallInt,
        locked_until -> Nullable<BigInt>,
        last_login_at -> Nullable<BigInt>,
        created_at -> BigInt,
    }
}

table! {
    places (id) {
        id -> Text,
        name -> Text,
        description -> Text,
        street -> Nullable<Text>,
        city -> Text,
        region -> Nullable<Text>,
        country -> Text,
        lat -> Nullable<Double>,
        lng -> Nullable<Double>,
        category -> Text,
        vegan -> Bool,
        vegetarian -> Bool,
        gluten_free -> Bool,
        dairy_free -> Bool,
        organic -> Bool,
        status -> SmallInt,
        avg_rating -> Nullable<SmallInt>,
        created_at -> BigInt,
        created_by -> Nullable<Text>,
        reviewed_at -> Nullable<BigInt>,
        reviewed_by -> Nullable<Text>,
        review_notes -> Nullable<Text>,
    }
}

table! {
    place_tags (place_id, tag) {
        place_id -> Text,
        tag -> Text,
    }
}

joinable!(place_tags -> places (place_id));

table! {
    events (id) {
        id -> Text,
        title -> Text,
        description -> Nullable<Text>,
        city -> Text,
        category -> Text,
        start_at -> BigInt,
        status -> SmallInt,
        created_at -> BigInt,
        created_by -> Nullable<Text>,
        reviewed_at -> Nullable<BigInt>,
        reviewed_by -> Nullable<Text>,
        review_notes -> Nullable<Text>,
    }
}

table! {
    ratings (id) {
        id -> Text,
        place_id -> Text,
        user_id -> Text,
        created_at -> BigInt,
        value -> SmallInt,
        comment -> Nullable<Text>,
    }
}

table! {
    posts (id) {
        id -> Text,
        author_id -> Text,
        title -> Text,
        body -> Text,
        section -> Text,
        status -> SmallInt,
        created_at -> BigInt,
    }
}

table! {
    post_comments (id) {
        id -> Text,
        post_id -> Text,
        author_id -> Text,
        body -> Text,
        status -> SmallInt,
        created_at -> BigInt,
    }
}

table! {
    post_likes (user_id, post_id) {
        user_id -> Text,
        post_id -> Text,
        created_at -> BigInt,
    }
}

joinable!(post_likes -> posts (post_id));

table! {
    saved_stores (user_id, place_id) {
        user_id -> Text,
        place_id -> Text,
        created_at -> BigInt,
    }
}

joinable!(saved_stores -> places (place_id));

table! {
    user_tokens (email) {
        email -> Text,
        nonce -> Text,
        expires_at -> BigInt,
    }
}

allow_tables_to_appear_in_same_query!(places, place_tags, saved_stores);
allow_tables_to_appear_in_same_query!(posts, post_comments, post_likes);
