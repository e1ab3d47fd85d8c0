//! UUID-backed identifier newtypes.
//!
//! Every entity identifier keeps the caller's original text alongside the
//! parsed UUID so it can be echoed back unchanged. A malformed identifier
//! cannot be constructed, which keeps format validation ahead of any store
//! access. Equality and hashing compare the UUID only.

use uuid::Uuid;

/// Validation errors raised while parsing an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// The input was empty.
    #[error("{kind} must not be empty")]
    Empty {
        /// Human readable identifier kind, e.g. `tender id`.
        kind: &'static str,
    },
    /// The input was not a canonical UUID.
    #[error("{kind} must be a valid UUID")]
    Invalid {
        /// Human readable identifier kind.
        kind: &'static str,
    },
}

pub(crate) fn parse_uuid(raw: &str, kind: &'static str) -> Result<Uuid, IdentifierError> {
    if raw.is_empty() {
        return Err(IdentifierError::Empty { kind });
    }
    if raw.trim() != raw {
        return Err(IdentifierError::Invalid { kind });
    }
    Uuid::parse_str(raw).map_err(|_| IdentifierError::Invalid { kind })
}

macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(uuid::Uuid, String);

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl $name {
            /// Validate and construct the identifier from borrowed input.
            pub fn new(
                id: impl AsRef<str>,
            ) -> Result<Self, $crate::domain::identifier::IdentifierError> {
                Self::from_owned(id.as_ref().to_owned())
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self::from_uuid(uuid::Uuid::new_v4())
            }

            /// Wrap an already parsed UUID.
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid, uuid.to_string())
            }

            fn from_owned(
                id: String,
            ) -> Result<Self, $crate::domain::identifier::IdentifierError> {
                let parsed = $crate::domain::identifier::parse_uuid(&id, $kind)?;
                Ok(Self(parsed, id))
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.1.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.1
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::identifier::IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }
    };
}

pub(crate) use define_identifier;
