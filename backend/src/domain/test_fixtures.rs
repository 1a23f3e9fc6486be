//! Shared builders and test doubles for domain service tests.

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Mutex;

use crate::domain::{
    Listing, ListingDraft, ListingFields, ListingId, Rating, Review, ReviewId, User, UserId,
};

pub fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
}

/// Clock that only moves when told to.
pub struct SteppingClock(Mutex<DateTime<Utc>>);

impl SteppingClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

pub fn user_named(username: &str) -> User {
    User::try_from_strings(
        UserId::random().to_string(),
        username,
        format!("{username}@example.com"),
        "+91 98765 43210",
        "Mumbai",
    )
    .expect("fixture user is valid")
}

pub fn listing_owned_by(owner: &UserId, title: &str) -> Listing {
    let draft = ListingDraft::try_from_fields(
        ListingFields {
            title,
            description: "A lovely place to stay",
            price: 3200,
            location: "Calangute",
            country: "India",
            categories: &[],
        },
        None,
    )
    .expect("fixture listing is valid");
    Listing::create(ListingId::random(), owner.clone(), draft, epoch())
}

pub fn review_by(author: &UserId, listing_id: ListingId) -> Review {
    Review {
        id: ReviewId::random(),
        listing_id,
        author: author.clone(),
        rating: Rating::new(5).expect("valid rating"),
        comment: "Wonderful".to_owned(),
        created_at: epoch(),
    }
}
