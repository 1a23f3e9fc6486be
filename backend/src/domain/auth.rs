//! Authentication primitives: login credentials, signup details, and the
//! opaque password hash stored alongside a user.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{
    EmailAddress, Location, MobileNumber, User, UserProfile, UserValidationError, Username,
};

/// Minimum password length accepted at signup.
pub const PASSWORD_MIN: usize = 8;

/// Domain error returned when login or signup payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
    /// Password shorter than [`PASSWORD_MIN`].
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// A profile field failed validation.
    Profile(UserValidationError),
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::Profile(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl From<UserValidationError> for CredentialsValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Profile(value)
    }
}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use rentease::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada_l", "password").unwrap();
/// assert_eq!(creds.username(), "ada_l");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Raw signup payload fields, borrowed from the inbound request.
#[derive(Debug, Clone, Copy)]
pub struct SignupFields<'a> {
    /// Requested username.
    pub username: &'a str,
    /// Contact email.
    pub email: &'a str,
    /// Plain-text password.
    pub password: &'a str,
    /// Contact phone number.
    pub mobile: &'a str,
    /// Home location.
    pub location: &'a str,
}

/// Validated signup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    profile: UserProfile,
    password: Zeroizing<String>,
}

impl SignupDetails {
    /// Validate every signup field.
    pub fn try_from_fields(fields: SignupFields<'_>) -> Result<Self, CredentialsValidationError> {
        let profile = UserProfile {
            username: Username::new(fields.username)?,
            email: EmailAddress::new(fields.email)?,
            mobile: MobileNumber::new(fields.mobile)?,
            location: Location::new(fields.location)?,
        };
        if fields.password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        if fields.password.chars().count() < PASSWORD_MIN {
            return Err(CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            profile,
            password: Zeroizing::new(fields.password.to_owned()),
        })
    }

    /// Contact details of the new account.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Plain-text password to hash.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Split into the profile and the password.
    #[must_use]
    pub fn into_parts(self) -> (UserProfile, Zeroizing<String>) {
        (self.profile, self.password)
    }
}

/// Opaque password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a PHC string produced by a [`crate::domain::ports::PasswordHasher`].
    #[must_use]
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// User record together with its stored password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// Public profile.
    pub user: User,
    /// Stored hash.
    pub password_hash: PasswordHash,
}
