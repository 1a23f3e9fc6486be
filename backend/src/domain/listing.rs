//! Listing aggregate: a rentable property owned by exactly one user.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::review::ReviewWithAuthor;
use super::user::{User, UserId};

/// Validation errors for listing inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingValidationError {
    /// Identifier is not a UUID.
    InvalidId,
    /// Title is blank.
    EmptyTitle,
    /// Description is blank.
    EmptyDescription,
    /// Price is zero or negative.
    NonPositivePrice,
    /// Price exceeds the storable maximum.
    PriceTooLarge {
        /// Largest accepted price.
        max: u32,
    },
    /// Location is blank.
    EmptyLocation,
    /// Country is blank.
    EmptyCountry,
    /// Category label is not one of the known categories.
    UnknownCategory {
        /// Label as supplied.
        value: String,
    },
    /// Image URL is blank.
    EmptyImageUrl,
    /// Search term is blank.
    EmptySearchTerm,
}

impl fmt::Display for ListingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "listing id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::NonPositivePrice => write!(f, "price must be a positive whole number"),
            Self::PriceTooLarge { max } => write!(f, "price must be at most {max}"),
            Self::EmptyLocation => write!(f, "location must not be empty"),
            Self::EmptyCountry => write!(f, "country must not be empty"),
            Self::UnknownCategory { value } => write!(f, "unknown category: {value}"),
            Self::EmptyImageUrl => write!(f, "image url must not be empty"),
            Self::EmptySearchTerm => write!(f, "destination must not be empty"),
        }
    }
}

impl std::error::Error for ListingValidationError {}

/// Listing identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(Uuid);

impl ListingId {
    /// Parse a listing identifier from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ListingValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| ListingValidationError::InvalidId)
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

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Browsing category a listing may be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    /// Popular right now.
    Trending,
    /// Private rooms.
    Rooms,
    /// City breaks.
    #[serde(rename = "Iconic Cities")]
    IconicCities,
    /// Hill and mountain stays.
    Mountains,
    /// Castles and forts.
    Castles,
    /// Places with a notable pool.
    #[serde(rename = "Amazing Pools")]
    AmazingPools,
    /// Campsites.
    Camping,
    /// Farm stays.
    Farms,
    /// Cold-climate stays.
    Arctic,
    /// Houseboats.
    Boats,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 10] = [
        Self::Trending,
        Self::Rooms,
        Self::IconicCities,
        Self::Mountains,
        Self::Castles,
        Self::AmazingPools,
        Self::Camping,
        Self::Farms,
        Self::Arctic,
        Self::Boats,
    ];

    /// Human-readable label, also the stored form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Trending => "Trending",
            Self::Rooms => "Rooms",
            Self::IconicCities => "Iconic Cities",
            Self::Mountains => "Mountains",
            Self::Castles => "Castles",
            Self::AmazingPools => "Amazing Pools",
            Self::Camping => "Camping",
            Self::Farms => "Farms",
            Self::Arctic => "Arctic",
            Self::Boats => "Boats",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ListingValidationError;

    /// Accepts the label in any case, with spaces, dashes or underscores
    /// between words (`"iconic-cities"` parses as [`Category::IconicCities`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalise = |text: &str| -> String {
            text.chars()
                .filter(|c| !matches!(c, ' ' | '-' | '_'))
                .flat_map(char::to_lowercase)
                .collect()
        };
        let wanted = normalise(s.trim());
        Self::ALL
            .into_iter()
            .find(|category| normalise(category.label()) == wanted)
            .ok_or_else(|| ListingValidationError::UnknownCategory {
                value: s.to_owned(),
            })
    }
}

/// Nightly price in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// Largest accepted price; matches the storage column.
    pub const MAX: u32 = i32::MAX.unsigned_abs();

    /// Validate a price.
    pub fn new(value: i64) -> Result<Self, ListingValidationError> {
        if value <= 0 {
            return Err(ListingValidationError::NonPositivePrice);
        }
        u32::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or(ListingValidationError::PriceTooLarge { max: Self::MAX })
    }

    /// Raw value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Reference to an already-stored image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageRef {
    /// Public URL.
    pub url: String,
    /// Storage-side filename.
    pub filename: String,
}

impl ImageRef {
    /// Validate an image reference. A blank filename is replaced by the last
    /// URL path segment.
    pub fn new(
        url: impl Into<String>,
        filename: impl Into<String>,
    ) -> Result<Self, ListingValidationError> {
        let url = url.into().trim().to_owned();
        if url.is_empty() {
            return Err(ListingValidationError::EmptyImageUrl);
        }
        let filename = filename.into().trim().to_owned();
        let filename = if filename.is_empty() {
            url.rsplit('/').next().unwrap_or_default().to_owned()
        } else {
            filename
        };
        Ok(Self { url, filename })
    }
}

/// Raw listing fields borrowed from an inbound request.
#[derive(Debug, Clone, Copy)]
pub struct ListingFields<'a> {
    /// Headline.
    pub title: &'a str,
    /// Long-form description.
    pub description: &'a str,
    /// Nightly price.
    pub price: i64,
    /// Town or region.
    pub location: &'a str,
    /// Country.
    pub country: &'a str,
    /// Category labels.
    pub categories: &'a [String],
}

/// Validated, owner-independent listing content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDraft {
    /// Headline.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Nightly price.
    pub price: Price,
    /// Town or region.
    pub location: String,
    /// Country.
    pub country: String,
    /// Tags, deduplicated in first-seen order.
    pub categories: Vec<Category>,
    /// New image reference, if one was supplied.
    pub image: Option<ImageRef>,
}

fn non_empty(value: &str, err: ListingValidationError) -> Result<String, ListingValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(err)
    } else {
        Ok(trimmed.to_owned())
    }
}

impl ListingDraft {
    /// Validate raw listing fields.
    pub fn try_from_fields(
        fields: ListingFields<'_>,
        image: Option<ImageRef>,
    ) -> Result<Self, ListingValidationError> {
        let mut categories = Vec::with_capacity(fields.categories.len());
        for raw in fields.categories {
            let category: Category = raw.parse()?;
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        Ok(Self {
            title: non_empty(fields.title, ListingValidationError::EmptyTitle)?,
            description: non_empty(fields.description, ListingValidationError::EmptyDescription)?,
            price: Price::new(fields.price)?,
            location: non_empty(fields.location, ListingValidationError::EmptyLocation)?,
            country: non_empty(fields.country, ListingValidationError::EmptyCountry)?,
            categories,
            image,
        })
    }
}

/// Persisted listing.
///
/// ## Invariants
/// - `owner` is fixed at creation.
/// - `price` is positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Listing identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: ListingId,
    /// Headline.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Nightly price in whole currency units.
    #[schema(value_type = u32, minimum = 1)]
    pub price: Price,
    /// Town or region.
    pub location: String,
    /// Country.
    pub country: String,
    /// Category tags.
    #[serde(rename = "category")]
    pub categories: Vec<Category>,
    /// Stored image reference.
    pub image: Option<ImageRef>,
    /// Owning user.
    #[schema(value_type = String, format = Uuid)]
    pub owner: UserId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Build a new listing from a draft.
    #[must_use]
    pub fn create(
        id: ListingId,
        owner: UserId,
        draft: ListingDraft,
        now: DateTime<Utc>,
    ) -> Self {
        let ListingDraft {
            title,
            description,
            price,
            location,
            country,
            categories,
            image,
        } = draft;
        Self {
            id,
            title,
            description,
            price,
            location,
            country,
            categories,
            image,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit. The owner and creation time never change; the image is
    /// kept unless the draft carries a new one.
    #[must_use]
    pub fn revise(self, draft: ListingDraft, now: DateTime<Utc>) -> Self {
        let ListingDraft {
            title,
            description,
            price,
            location,
            country,
            categories,
            image,
        } = draft;
        Self {
            title,
            description,
            price,
            location,
            country,
            categories,
            image: image.or(self.image),
            updated_at: now,
            ..self
        }
    }
}

/// Case-insensitive destination search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Validate a search term.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ListingValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ListingValidationError::EmptySearchTerm);
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Lowercased needle.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the listing's title, location, or country contains the term.
    ///
    /// # Examples
    /// ```
    /// use rentease::domain::SearchTerm;
    ///
    /// let term = SearchTerm::new("GOA").unwrap();
    /// assert!(term.matches_text("Goa Beach House"));
    /// assert!(!term.matches_text("Amsterdam Canal Loft"));
    /// ```
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        [&listing.title, &listing.location, &listing.country]
            .into_iter()
            .any(|field| self.matches_text(field))
    }

    /// Whether `text` contains the term, ignoring case.
    #[must_use]
    pub fn matches_text(&self, text: &str) -> bool {
        text.to_lowercase().contains(self.0.as_str())
    }
}

/// Listing with its owner and reviews resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetail {
    /// The listing itself.
    #[serde(flatten)]
    pub listing: Listing,
    /// Owner profile; absent when the owner account is gone.
    pub owner_profile: Option<User>,
    /// Reviews, oldest first.
    pub reviews: Vec<ReviewWithAuthor>,
}
