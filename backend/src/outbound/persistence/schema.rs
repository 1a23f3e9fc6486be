//! Diesel table definitions.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        email -> Text,
        mobile -> Varchar,
        location -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Rental listings.
    listings (id) {
        id -> Uuid,
        owner_id -> Uuid,
        title -> Text,
        description -> Text,
        price -> Int4,
        location -> Text,
        country -> Text,
        /// Category labels, stored by their display text.
        categories -> Array<Text>,
        image_url -> Nullable<Text>,
        image_filename -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reviews; removed with their listing.
    reviews (id) {
        id -> Uuid,
        listing_id -> Uuid,
        author_id -> Uuid,
        rating -> Int2,
        comment -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Interested-buyer inbox entries, unique per
    /// (owner_id, listing_id, interested_user_id).
    notifications (id) {
        id -> Uuid,
        /// Insertion order within the table.
        position -> Int8,
        owner_id -> Uuid,
        listing_id -> Uuid,
        listing_title -> Text,
        interested_user_id -> Uuid,
        interested_user_name -> Text,
        interested_user_email -> Text,
        interested_user_location -> Text,
        interested_user_mobile -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(listings -> users (owner_id));
diesel::joinable!(reviews -> listings (listing_id));

diesel::allow_tables_to_appear_in_same_query!(users, listings, reviews, notifications);
