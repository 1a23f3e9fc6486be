//! Reviews left on listings.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::listing::ListingId;
use super::user::{User, UserId};

/// Validation errors for review inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    /// Identifier was not a UUID.
    InvalidId,
    /// Rating outside 1 to 5.
    RatingOutOfRange {
        /// Lowest accepted rating.
        min: u8,
        /// Highest accepted rating.
        max: u8,
    },
    /// Comment blank once trimmed.
    EmptyComment,
}

impl fmt::Display for ReviewValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "review id must be a valid UUID"),
            Self::RatingOutOfRange { min, max } => {
                write!(f, "rating must be between {min} and {max}")
            }
            Self::EmptyComment => write!(f, "comment must not be empty"),
        }
    }
}

impl std::error::Error for ReviewValidationError {}

/// Review identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(Uuid);

impl ReviewId {
    /// Parse a review identifier from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ReviewValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| ReviewValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Star rating between [`Rating::MIN`] and [`Rating::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating.
    pub const MIN: u8 = 1;
    /// Highest rating.
    pub const MAX: u8 = 5;

    /// Validate a rating.
    pub fn new(value: i64) -> Result<Self, ReviewValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(ReviewValidationError::RatingOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
            })
    }

    /// Raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Validated review content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    /// Star rating.
    pub rating: Rating,
    /// Free-text comment.
    pub comment: String,
}

impl ReviewDraft {
    /// Validate raw review fields.
    pub fn try_from_parts(rating: i64, comment: &str) -> Result<Self, ReviewValidationError> {
        let rating = Rating::new(rating)?;
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(ReviewValidationError::EmptyComment);
        }
        Ok(Self {
            rating,
            comment: comment.to_owned(),
        })
    }
}

/// Persisted review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Review identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: ReviewId,
    /// Reviewed listing.
    #[schema(value_type = String, format = Uuid)]
    pub listing_id: ListingId,
    /// Author.
    #[schema(value_type = String, format = Uuid)]
    pub author: UserId,
    /// Star rating.
    #[schema(value_type = u8, minimum = 1, maximum = 5)]
    pub rating: Rating,
    /// Free-text comment.
    pub comment: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Review with its author's profile resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithAuthor {
    /// The review itself.
    #[serde(flatten)]
    pub review: Review,
    /// Author profile; absent when the account is gone.
    pub author_profile: Option<User>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    #[case(300)]
    fn rating_rejects_out_of_range(#[case] raw: i64) {
        assert_eq!(
            Rating::new(raw),
            Err(ReviewValidationError::RatingOutOfRange { min: 1, max: 5 })
        );
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    fn rating_accepts_bounds(#[case] raw: i64) {
        let rating = Rating::new(raw).expect("in range");
        assert_eq!(i64::from(rating.value()), raw);
    }

    #[rstest]
    fn draft_trims_comment() {
        let draft = ReviewDraft::try_from_parts(4, "  Lovely stay  ").expect("valid");
        assert_eq!(draft.comment, "Lovely stay");
    }

    #[rstest]
    fn draft_rejects_blank_comment() {
        assert_eq!(
            ReviewDraft::try_from_parts(4, "   "),
            Err(ReviewValidationError::EmptyComment)
        );
    }
}
