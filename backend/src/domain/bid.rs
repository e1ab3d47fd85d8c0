//! Bids submitted against tenders, their edits and feedback records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::identifier::define_identifier;
use super::organization::OrganizationId;
use super::tender::TenderId;
use super::user::UserId;

define_identifier! {
    /// Identifier of a bid.
    BidId => "bid id"
}

define_identifier! {
    /// Identifier of a feedback record left on a bid.
    BidFeedbackId => "feedback id"
}

/// Columns a bid edit may touch.
pub const EDITABLE_BID_FIELDS: [&str; 2] = ["description", "status"];

/// Validation errors raised while building bid values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BidValidationError {
    /// The status string is not a known bid status.
    #[error("unknown bid status: {value}")]
    UnknownStatus {
        /// Rejected input.
        value: String,
    },
    /// The author type is neither `User` nor `Organization`.
    #[error("unknown author type: {value}")]
    UnknownAuthorType {
        /// Rejected input.
        value: String,
    },
    /// An edit named a column outside [`EDITABLE_BID_FIELDS`].
    #[error("field `{field}` cannot be edited")]
    UnknownField {
        /// Offending field name.
        field: String,
    },
    /// An edit supplied a value of the wrong JSON type.
    #[error("field `{field}` must be a string")]
    WrongFieldType {
        /// Offending field name.
        field: String,
    },
    /// An edit carried no fields at all.
    #[error("edit must change at least one field")]
    EmptyEdit,
    /// Feedback text was blank.
    #[error("feedback must not be empty")]
    EmptyFeedback,
}

/// Lifecycle status of a bid. Transitions are not constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidStatus {
    /// Submitted but not yet visible.
    Created,
    /// Visible to the tender owner.
    Published,
    /// Withdrawn by its author.
    Canceled,
}

impl BidStatus {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Published => "PUBLISHED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BidStatus {
    type Err = BidValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(Self::Created),
            "PUBLISHED" => Ok(Self::Published),
            "CANCELED" => Ok(Self::Canceled),
            other => Err(BidValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Who a bid is submitted on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BidAuthorType {
    /// Submitted by an individual user.
    User,
    /// Submitted on behalf of an organization.
    Organization,
}

impl BidAuthorType {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Organization => "Organization",
        }
    }
}

impl fmt::Display for BidAuthorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BidAuthorType {
    type Err = BidValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Self::User),
            "Organization" => Ok(Self::Organization),
            other => Err(BidValidationError::UnknownAuthorType {
                value: other.to_owned(),
            }),
        }
    }
}

/// A persisted bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    /// Stable identifier.
    pub id: BidId,
    /// Tender the bid answers.
    pub tender_id: TenderId,
    /// Organization the bid is made for.
    pub organization_id: OrganizationId,
    /// Submitting user; the only user allowed to see or change the bid.
    pub user_id: UserId,
    /// Whether the bid speaks for a user or an organization.
    pub author_type: BidAuthorType,
    /// Free-form proposal text.
    pub description: String,
    /// Current lifecycle status.
    pub status: BidStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Bid {
    /// Whether `user_id` submitted this bid.
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Apply the present fields of `edit`.
    pub fn apply_edit(&mut self, edit: &BidEdit) {
        if let Some(description) = edit.description() {
            self.description = description.to_owned();
        }
        if let Some(status) = edit.status() {
            self.status = status;
        }
    }
}

/// A bid ready to be persisted. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBid {
    /// Tender the bid answers.
    pub tender_id: TenderId,
    /// Organization the bid is made for.
    pub organization_id: OrganizationId,
    /// Submitting user.
    pub user_id: UserId,
    /// Author kind.
    pub author_type: BidAuthorType,
    /// Proposal text.
    pub description: String,
    /// Initial status.
    pub status: BidStatus,
}

/// Structured partial update of a bid, built from an allow-listed field map.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use tender_backend::domain::{BidEdit, BidStatus};
///
/// let fields = json!({ "status": "PUBLISHED" });
/// let edit = BidEdit::from_fields(fields.as_object().expect("object")).expect("valid edit");
/// assert_eq!(edit.status(), Some(BidStatus::Published));
///
/// let unknown = json!({ "tender_id": "x" });
/// assert!(BidEdit::from_fields(unknown.as_object().expect("object")).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidEdit {
    description: Option<String>,
    status: Option<BidStatus>,
}

impl BidEdit {
    /// Validate a raw field map against [`EDITABLE_BID_FIELDS`].
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, BidValidationError> {
        if fields.is_empty() {
            return Err(BidValidationError::EmptyEdit);
        }
        let mut edit = Self::default();
        for (field, value) in fields {
            if !EDITABLE_BID_FIELDS.contains(&field.as_str()) {
                return Err(BidValidationError::UnknownField {
                    field: field.clone(),
                });
            }
            let text = || {
                value
                    .as_str()
                    .ok_or_else(|| BidValidationError::WrongFieldType {
                        field: field.clone(),
                    })
            };
            if field == "status" {
                edit.status = Some(text()?.parse()?);
            } else {
                edit.description = Some(text()?.to_owned());
            }
        }
        Ok(edit)
    }

    /// New description, if present.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// New status, if present.
    pub fn status(&self) -> Option<BidStatus> {
        self.status
    }
}

/// Non-blank feedback text left on a bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeedbackText(String);

impl FeedbackText {
    /// Validate and construct feedback text.
    pub fn new(raw: impl Into<String>) -> Result<Self, BidValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(BidValidationError::EmptyFeedback);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for FeedbackText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<FeedbackText> for String {
    fn from(value: FeedbackText) -> Self {
        value.0
    }
}

impl TryFrom<String> for FeedbackText {
    type Error = BidValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Append-only feedback record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidFeedback {
    /// Record identifier.
    pub id: BidFeedbackId,
    /// Bid the feedback refers to.
    pub bid_id: BidId,
    /// Feedback text.
    pub feedback: FeedbackText,
    /// When the feedback was recorded.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[rstest]
    #[case("CREATED", BidStatus::Created)]
    #[case("PUBLISHED", BidStatus::Published)]
    #[case("CANCELED", BidStatus::Canceled)]
    fn parses_bid_statuses(#[case] raw: &str, #[case] expected: BidStatus) {
        assert_eq!(raw.parse::<BidStatus>(), Ok(expected));
    }

    #[rstest]
    fn rejects_tender_only_status() {
        assert!(matches!(
            "CLOSED".parse::<BidStatus>(),
            Err(BidValidationError::UnknownStatus { .. })
        ));
    }

    #[rstest]
    #[case("User", BidAuthorType::User)]
    #[case("Organization", BidAuthorType::Organization)]
    fn parses_author_types(#[case] raw: &str, #[case] expected: BidAuthorType) {
        assert_eq!(raw.parse::<BidAuthorType>(), Ok(expected));
        assert_eq!(expected.to_string(), raw);
    }

    #[rstest]
    fn edit_accepts_both_allowed_fields() {
        let edit = BidEdit::from_fields(&fields(json!({
            "description": "Cheaper offer",
            "status": "CANCELED"
        })))
        .expect("valid edit");
        assert_eq!(edit.description(), Some("Cheaper offer"));
        assert_eq!(edit.status(), Some(BidStatus::Canceled));
    }

    #[rstest]
    fn every_listed_field_is_editable() {
        for field in EDITABLE_BID_FIELDS {
            let edit = BidEdit::from_fields(&fields(json!({ field: "PUBLISHED" })));
            assert!(edit.is_ok(), "{field} should be editable");
        }
    }

    #[rstest]
    fn edit_accepts_empty_description() {
        let edit = BidEdit::from_fields(&fields(json!({ "description": "" }))).expect("valid edit");
        assert_eq!(edit.description(), Some(""));
    }

    #[rstest]
    #[case(json!({}), BidValidationError::EmptyEdit)]
    #[case(
        json!({ "user_id": "someone" }),
        BidValidationError::UnknownField { field: "user_id".into() }
    )]
    #[case(
        json!({ "description": 5 }),
        BidValidationError::WrongFieldType { field: "description".into() }
    )]
    #[case(
        json!({ "status": "DONE" }),
        BidValidationError::UnknownStatus { value: "DONE".into() }
    )]
    fn edit_rejects_invalid_maps(#[case] raw: Value, #[case] expected: BidValidationError) {
        assert_eq!(BidEdit::from_fields(&fields(raw)), Err(expected));
    }

    #[rstest]
    fn apply_edit_updates_present_fields() {
        let mut bid = crate::domain::test_fixtures::sample_bid();
        let edit = BidEdit::from_fields(&fields(json!({ "status": "PUBLISHED" })))
            .expect("valid edit");
        bid.apply_edit(&edit);
        assert_eq!(bid.status, BidStatus::Published);
        assert_eq!(bid.description, "Lowest price");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_feedback_is_rejected(#[case] raw: &str) {
        assert_eq!(FeedbackText::new(raw), Err(BidValidationError::EmptyFeedback));
    }
}
