//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn ada() -> User {
    User::try_from_strings(VALID_ID, "ada_l", "ada@example.com", "+44 7700 900123", "London")
        .expect("fixture values are valid")
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_bad_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_equality_ignores_textual_case() {
    let upper = UserId::new(VALID_ID.to_uppercase()).expect("valid uuid");
    let lower = UserId::new(VALID_ID).expect("valid uuid");
    assert_eq!(upper, lower);

    let mut seen = std::collections::HashSet::new();
    seen.insert(upper);
    assert!(seen.contains(&lower));
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("ab", UserValidationError::UsernameTooShort { min: USERNAME_MIN })]
#[case(
    "abcdefghijklmnopqrstuvwxyz0123456",
    UserValidationError::UsernameTooLong { max: USERNAME_MAX }
)]
#[case("bad$name", UserValidationError::UsernameInvalidCharacters)]
#[case("two words", UserValidationError::UsernameInvalidCharacters)]
fn username_validation(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
#[case("  sea.view-host_1  ", "sea.view-host_1")]
#[case("bob", "bob")]
fn username_trims_surrounding_whitespace(#[case] raw: &str, #[case] expected: &str) {
    let username = Username::new(raw).expect("valid username");
    assert_eq!(username.as_ref(), expected);
}

#[rstest]
#[case("plain")]
#[case("@example.com")]
#[case("ada@")]
#[case("a@b@c")]
#[case("ada lovelace@example.com")]
fn email_rejects_malformed_addresses(#[case] raw: &str) {
    assert_eq!(EmailAddress::new(raw), Err(UserValidationError::InvalidEmail));
}

#[rstest]
#[case("12345")]
#[case("phone-number")]
#[case("123456789012345678901")]
fn mobile_rejects_malformed_numbers(#[case] raw: &str) {
    assert_eq!(MobileNumber::new(raw), Err(UserValidationError::InvalidMobile));
}

#[rstest]
#[case("+91 98765-43210")]
#[case("0207946000")]
fn mobile_accepts_common_formats(#[case] raw: &str) {
    assert!(MobileNumber::new(raw).is_ok());
}

#[rstest]
fn location_rejects_blank() {
    assert_eq!(Location::new("   "), Err(UserValidationError::EmptyLocation));
}

#[rstest]
fn serialises_to_camel_case_json(ada: User) {
    let value = serde_json::to_value(&ada).expect("user serialises");
    assert_eq!(
        value,
        json!({
            "id": VALID_ID,
            "username": "ada_l",
            "email": "ada@example.com",
            "mobile": "+44 7700 900123",
            "location": "London",
        })
    );
}

#[rstest]
fn deserialisation_validates_fields() {
    let payload = json!({
        "id": VALID_ID,
        "username": "x",
        "email": "ada@example.com",
        "mobile": "+44 7700 900123",
        "location": "London",
    });
    assert!(serde_json::from_value::<User>(payload).is_err());
}
