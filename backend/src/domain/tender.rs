//! Tender entities, their versioned history and edit values.
//!
//! A tender is owned by an organization and carries a monotonically
//! increasing [`TenderVersion`]. Every persisted mutation records the prior
//! state as a [`TenderHistory`] snapshot so it can be restored later.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identifier::define_identifier;
use super::organization::OrganizationId;
use super::user::UserId;

define_identifier! {
    /// Identifier of a tender.
    TenderId => "tender id"
}

/// Validation errors raised while building tender values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TenderValidationError {
    /// The tender name was blank.
    #[error("tender name must not be empty")]
    EmptyName,
    /// The service type was blank.
    #[error("service type must not be empty")]
    EmptyServiceType,
    /// The status string is not a known tender status.
    #[error("unknown tender status: {value}")]
    UnknownStatus {
        /// Rejected input.
        value: String,
    },
    /// The version was not a positive integer.
    #[error("tender version must be a positive integer, got {value}")]
    InvalidVersion {
        /// Rejected input.
        value: String,
    },
}

/// Lifecycle status of a tender.
///
/// Any status may follow any other; only the value itself is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenderStatus {
    /// Drafted but not yet visible to bidders.
    Created,
    /// Open for bids.
    Published,
    /// No longer accepting bids.
    Closed,
}

impl TenderStatus {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Published => "PUBLISHED",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenderStatus {
    type Err = TenderValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(Self::Created),
            "PUBLISHED" => Ok(Self::Published),
            "CLOSED" => Ok(Self::Closed),
            other => Err(TenderValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Positive tender version, starting at [`TenderVersion::INITIAL`].
///
/// # Examples
/// ```
/// use tender_backend::domain::TenderVersion;
///
/// let version: TenderVersion = "3".parse().expect("positive version");
/// assert_eq!(version.get(), 3);
/// assert!("0".parse::<TenderVersion>().is_err());
/// assert!("latest".parse::<TenderVersion>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct TenderVersion(i32);

impl TenderVersion {
    /// Version assigned to newly created tenders.
    pub const INITIAL: Self = Self(1);

    /// Validate a raw version number.
    pub fn new(value: i32) -> Result<Self, TenderValidationError> {
        if value <= 0 {
            return Err(TenderValidationError::InvalidVersion {
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Raw version number.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// The version that follows this one, if it fits.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for TenderVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TenderVersion {
    type Err = TenderValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TenderValidationError::InvalidVersion {
            value: s.to_owned(),
        };
        let value = s.parse::<i32>().map_err(|_| invalid())?;
        Self::new(value).map_err(|_| invalid())
    }
}

impl TryFrom<i32> for TenderVersion {
    type Error = TenderValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TenderVersion> for i32 {
    fn from(value: TenderVersion) -> Self {
        value.0
    }
}

macro_rules! non_blank_text {
    ($(#[$meta:meta])* $name:ident, $error:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the value.
            pub fn new(raw: impl Into<String>) -> Result<Self, TenderValidationError> {
                let raw = raw.into();
                if raw.trim().is_empty() {
                    return Err($error);
                }
                Ok(Self(raw))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = TenderValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

non_blank_text! {
    /// Display name of a tender.
    TenderName, TenderValidationError::EmptyName
}

non_blank_text! {
    /// Free-form service category tag, e.g. `Construction`.
    ServiceType, TenderValidationError::EmptyServiceType
}

/// A persisted tender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    /// Stable identifier.
    pub id: TenderId,
    /// Display name.
    pub name: TenderName,
    /// Free-form description.
    pub description: String,
    /// Service category tag.
    pub service_type: ServiceType,
    /// Current lifecycle status.
    pub status: TenderStatus,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// User who created the tender.
    pub creator_id: UserId,
    /// Current version.
    pub version: TenderVersion,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Tender {
    /// Whether `user_id` created this tender.
    pub fn is_created_by(&self, user_id: &UserId) -> bool {
        &self.creator_id == user_id
    }

    /// Apply the present fields of `edit`.
    pub fn apply_edit(&mut self, edit: &TenderEdit) {
        if let Some(name) = &edit.name {
            self.name = name.clone();
        }
        if let Some(description) = &edit.description {
            self.description = description.clone();
        }
        if let Some(service_type) = &edit.service_type {
            self.service_type = service_type.clone();
        }
    }

    /// Copy the mutable fields recorded in `snapshot` onto this tender.
    pub fn restore(&mut self, snapshot: &TenderHistory) {
        self.name = snapshot.name.clone();
        self.description = snapshot.description.clone();
        self.service_type = snapshot.service_type.clone();
        self.status = snapshot.status;
    }
}

/// Caller-supplied fields for a new tender; the creator is resolved later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenderDraft {
    /// Display name.
    pub name: TenderName,
    /// Free-form description.
    pub description: String,
    /// Service category tag.
    pub service_type: ServiceType,
    /// Initial status.
    pub status: TenderStatus,
    /// Owning organization.
    pub organization_id: OrganizationId,
}

impl TenderDraft {
    /// Attach the resolved creator, producing the value handed to the store.
    pub fn with_creator(self, creator_id: UserId) -> NewTender {
        NewTender {
            name: self.name,
            description: self.description,
            service_type: self.service_type,
            status: self.status,
            organization_id: self.organization_id,
            creator_id,
        }
    }
}

/// A tender ready to be persisted. The store assigns id, version and
/// timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTender {
    /// Display name.
    pub name: TenderName,
    /// Free-form description.
    pub description: String,
    /// Service category tag.
    pub service_type: ServiceType,
    /// Initial status.
    pub status: TenderStatus,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Resolved creator.
    pub creator_id: UserId,
}

/// Partial update of a tender's descriptive fields.
///
/// # Examples
/// ```
/// use tender_backend::domain::TenderEdit;
///
/// let edit = TenderEdit::new(Some("Road works".into()), None, None).expect("valid edit");
/// assert!(!edit.is_empty());
/// assert!(TenderEdit::new(Some("  ".into()), None, None).is_err());
/// assert!(TenderEdit::new(None, Some(String::new()), None).is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenderEdit {
    name: Option<TenderName>,
    description: Option<String>,
    service_type: Option<ServiceType>,
}

impl TenderEdit {
    /// Validate raw optional fields. A present name or service type must not
    /// be blank; the description is free-form and may be empty.
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        service_type: Option<String>,
    ) -> Result<Self, TenderValidationError> {
        let name = name.map(TenderName::new).transpose()?;
        let service_type = service_type.map(ServiceType::new).transpose()?;
        Ok(Self {
            name,
            description,
            service_type,
        })
    }

    /// Whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.service_type.is_none()
    }
}

/// Immutable snapshot of a tender at a prior version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderHistory {
    /// Tender the snapshot belongs to.
    pub tender_id: TenderId,
    /// Version the tender had when the snapshot was taken.
    pub version: TenderVersion,
    /// Name at that version.
    pub name: TenderName,
    /// Description at that version.
    pub description: String,
    /// Service type at that version.
    pub service_type: ServiceType,
    /// Status at that version.
    pub status: TenderStatus,
    /// Owning organization at that version.
    pub organization_id: OrganizationId,
    /// Creator at that version.
    pub creator_id: UserId,
    /// When the snapshot was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl TenderHistory {
    /// Capture the current state of `tender`.
    pub fn snapshot(tender: &Tender, recorded_at: DateTime<Utc>) -> Self {
        Self {
            tender_id: tender.id.clone(),
            version: tender.version,
            name: tender.name.clone(),
            description: tender.description.clone(),
            service_type: tender.service_type.clone(),
            status: tender.status,
            organization_id: tender.organization_id.clone(),
            creator_id: tender.creator_id.clone(),
            recorded_at,
        }
    }
}

#[cfg(test)]
mod tests;
