//! User identity as resolved by the user directory.
//!
//! Users are owned by the directory and never mutated by the tender or bid
//! lifecycles. Usernames are trusted bearer identifiers; no credentials are
//! checked.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::identifier::define_identifier;

define_identifier! {
    /// Stable user identifier stored as a UUID.
    UserId => "user id"
}

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsernameValidationError {
    /// The username was empty once trimmed.
    #[error("username must not be empty")]
    Empty,
}

/// Unique login name, trimmed of surrounding whitespace.
///
/// # Examples
/// ```
/// use tender_backend::domain::Username;
///
/// let name = Username::new("  user1 ").expect("valid username");
/// assert_eq!(name.as_ref(), "user1");
/// assert!(Username::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UsernameValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UsernameValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A known user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    username: Username,
}

impl User {
    /// Build a user from validated parts.
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_usernames_are_rejected(#[case] raw: &str) {
        assert_eq!(Username::new(raw), Err(UsernameValidationError::Empty));
    }

    #[rstest]
    fn usernames_deserialise_trimmed() {
        let name: Username = serde_json::from_str("\" test_user \"").expect("valid username");
        assert_eq!(name.as_ref(), "test_user");
    }

    #[rstest]
    fn user_serialises_in_camel_case() {
        let id = UserId::new("550e8400-e29b-41d4-a716-446655440000").expect("valid id");
        let user = User::new(id, Username::new("user1").expect("valid username"));
        let value = serde_json::to_value(&user).expect("user serialises");
        assert_eq!(
            value,
            serde_json::json!({
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "username": "user1"
            })
        );
    }
}
