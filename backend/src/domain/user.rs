//! User data model.
//!
//! A user owns listings, writes reviews, and holds an inbox of
//! interested-buyer notifications. The contact fields (email, mobile,
//! location) are what a listing owner sees when somebody registers interest.

use std::fmt;
use std::hash::{Hash, Hasher};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the user field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Identifier is blank.
    EmptyId,
    /// Identifier is not a UUID.
    InvalidId,
    /// Username is blank.
    EmptyUsername,
    /// Username is shorter than allowed.
    UsernameTooShort {
        /// Minimum length.
        min: usize,
    },
    /// Username is longer than allowed.
    UsernameTooLong {
        /// Maximum length.
        max: usize,
    },
    /// Username holds a character that is not allowed.
    UsernameInvalidCharacters,
    /// Email address is malformed.
    InvalidEmail,
    /// Mobile number is malformed.
    InvalidMobile,
    /// Location is blank.
    EmptyLocation,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, dots, dashes, or underscores",
            ),
            Self::InvalidEmail => write!(f, "email must look like name@domain"),
            Self::InvalidMobile => write!(
                f,
                "mobile must be {MOBILE_MIN}-{MOBILE_MAX} digits, spaces, '+' or '-'",
            ),
            Self::EmptyLocation => write!(f, "location must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
///
/// The original text is retained for display, but equality and hashing use
/// the parsed UUID only, so `"3FA85F64-…"` and `"3fa85f64-…"` name the same
/// user.
///
/// # Examples
/// ```
/// use rentease::domain::UserId;
///
/// let upper = UserId::new("3FA85F64-5717-4562-B3FC-2C963F66AFA6").unwrap();
/// let lower = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
/// assert_eq!(upper, lower);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl PartialEq for UserId {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for UserId {}

impl Hash for UserId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;
/// Minimum allowed length for a mobile number.
pub const MOBILE_MIN: usize = 7;
/// Maximum allowed length for a mobile number.
pub const MOBILE_MAX: usize = 20;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static MOBILE_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z0-9_.-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

fn mobile_regex() -> &'static Regex {
    MOBILE_RE.get_or_init(|| {
        Regex::new(r"^\+?[0-9][0-9 -]*$")
            .unwrap_or_else(|error| panic!("mobile regex failed to compile: {error}"))
    })
}

/// Unique login name, also shown to listing owners.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`]. Surrounding whitespace is
    /// trimmed.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }

        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(trimmed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }
}

/// Contact email address. Only the `local@domain` shape is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        let mut parts = trimmed.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(UserValidationError::InvalidEmail);
        };
        if local.is_empty() || domain.is_empty() || trimmed.contains(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Contact phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Validate and construct a [`MobileNumber`].
    pub fn new(mobile: impl Into<String>) -> Result<Self, UserValidationError> {
        let mobile = mobile.into();
        let trimmed = mobile.trim();
        let length = trimmed.chars().count();
        if !(MOBILE_MIN..=MOBILE_MAX).contains(&length) || !mobile_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidMobile);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Free-text home location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location(String);

impl Location {
    /// Validate and construct a [`Location`].
    pub fn new(location: impl Into<String>) -> Result<Self, UserValidationError> {
        let location = location.into();
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyLocation);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

macro_rules! string_newtype_impls {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_ref())
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl TryFrom<String> for $ty {
                type Error = UserValidationError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }
        )+
    };
}

string_newtype_impls!(Username, EmailAddress, MobileNumber, Location);

/// Application user as seen by other users.
///
/// ## Invariants
/// - `id` must be a valid UUID string.
/// - `username` is 3–32 characters of letters, digits, `_`, `-`, or `.`.
/// - `email`, `mobile`, and `location` satisfy their newtype checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "ada_l")]
    username: Username,
    #[schema(value_type = String, example = "ada@example.com")]
    email: EmailAddress,
    #[schema(value_type = String, example = "+91 98765 43210")]
    mobile: MobileNumber,
    #[schema(value_type = String, example = "Panaji, Goa")]
    location: Location,
}

/// Validated contact details shared by signup and the [`User`] aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Unique login name.
    pub username: Username,
    /// Contact email.
    pub email: EmailAddress,
    /// Contact phone number.
    pub mobile: MobileNumber,
    /// Home location.
    pub location: Location,
}

impl User {
    /// Build a new [`User`] from validated components.
    #[must_use]
    pub fn new(id: UserId, profile: UserProfile) -> Self {
        let UserProfile {
            username,
            email,
            mobile,
            location,
        } = profile;
        Self {
            id,
            username,
            email,
            mobile,
            location,
        }
    }

    /// Fallible constructor from raw strings.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        username: impl Into<String>,
        email: impl Into<String>,
        mobile: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let profile = UserProfile {
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
            mobile: MobileNumber::new(mobile)?,
            location: Location::new(location)?,
        };
        Ok(Self::new(UserId::new(id)?, profile))
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Contact email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Contact phone number.
    #[must_use]
    pub const fn mobile(&self) -> &MobileNumber {
        &self.mobile
    }

    /// Home location.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    username: String,
    email: String,
    mobile: String,
    location: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            username,
            email,
            mobile,
            location,
        } = value;
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            mobile: mobile.into(),
            location: location.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        Self::try_from_strings(
            value.id,
            value.username,
            value.email,
            value.mobile,
            value.location,
        )
    }
}

#[cfg(test)]
mod tests;
