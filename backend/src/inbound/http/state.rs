//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only see driving
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountsCommand, InterestCommand, ListingRepository, ListingsCommand, ListingsQuery,
    NotificationInbox, NotificationRepository, PasswordHasher, PriceEstimateQuery,
    PricePredictor, ReviewRepository, ReviewsCommand, UserRepository, UsersQuery,
};
use crate::domain::{
    AccountService, InterestRegistrationService, ListingService, NotificationInboxService,
    PriceEstimateService, ReviewService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup and login.
    pub accounts: Arc<dyn AccountsCommand>,
    /// Profile lookups for the signed-in user.
    pub users: Arc<dyn UsersQuery>,
    /// Listing reads.
    pub listings: Arc<dyn ListingsQuery>,
    /// Listing writes, guarded by ownership.
    pub listings_command: Arc<dyn ListingsCommand>,
    /// Review writes.
    pub reviews: Arc<dyn ReviewsCommand>,
    /// Interest registration.
    pub interest: Arc<dyn InterestCommand>,
    /// Owner notification inbox.
    pub inbox: Arc<dyn NotificationInbox>,
    /// Price estimates.
    pub prices: Arc<dyn PriceEstimateQuery>,
}

/// Driven adapters the domain services are built over.
pub struct HttpStateAdapters<U, L, R, N, H, P> {
    /// User store.
    pub users: Arc<U>,
    /// Listing store.
    pub listings: Arc<L>,
    /// Review store.
    pub reviews: Arc<R>,
    /// Notification inbox store.
    pub notifications: Arc<N>,
    /// Password hasher.
    pub hasher: Arc<H>,
    /// Price-prediction client.
    pub predictor: Arc<P>,
    /// Time source for created/updated stamps.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Wire every domain service over `adapters`.
    #[must_use]
    pub fn from_adapters<U, L, R, N, H, P>(adapters: HttpStateAdapters<U, L, R, N, H, P>) -> Self
    where
        U: UserRepository + 'static,
        L: ListingRepository + 'static,
        R: ReviewRepository + 'static,
        N: NotificationRepository + 'static,
        H: PasswordHasher + 'static,
        P: PricePredictor + 'static,
    {
        let HttpStateAdapters {
            users,
            listings,
            reviews,
            notifications,
            hasher,
            predictor,
            clock,
        } = adapters;

        let accounts = Arc::new(AccountService::new(Arc::clone(&users), hasher));
        let listing_service = Arc::new(ListingService::new(
            Arc::clone(&listings),
            Arc::clone(&users),
            Arc::clone(&reviews),
            Arc::clone(&clock),
        ));
        let review_service = Arc::new(ReviewService::new(
            Arc::clone(&listings),
            Arc::clone(&users),
            reviews,
            Arc::clone(&clock),
        ));
        let interest = Arc::new(InterestRegistrationService::new(
            listings,
            users,
            Arc::clone(&notifications),
            clock,
        ));

        Self {
            accounts: accounts.clone(),
            users: accounts,
            listings: listing_service.clone(),
            listings_command: listing_service,
            reviews: review_service,
            interest,
            inbox: Arc::new(NotificationInboxService::new(notifications)),
            prices: Arc::new(PriceEstimateService::new(predictor)),
        }
    }
}

#[cfg(test)]
impl HttpState {
    /// State whose every port is a fresh, expectation-free mock.
    ///
    /// Tests replace the ports they exercise; calling any other port panics.
    pub(crate) fn unconfigured() -> Self {
        use crate::domain::ports::{
            MockAccountsCommand, MockInterestCommand, MockListingsCommand, MockListingsQuery,
            MockNotificationInbox, MockPriceEstimateQuery, MockReviewsCommand, MockUsersQuery,
        };
        Self {
            accounts: Arc::new(MockAccountsCommand::new()),
            users: Arc::new(MockUsersQuery::new()),
            listings: Arc::new(MockListingsQuery::new()),
            listings_command: Arc::new(MockListingsCommand::new()),
            reviews: Arc::new(MockReviewsCommand::new()),
            interest: Arc::new(MockInterestCommand::new()),
            inbox: Arc::new(MockNotificationInbox::new()),
            prices: Arc::new(MockPriceEstimateQuery::new()),
        }
    }
}
