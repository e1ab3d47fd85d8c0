//! Diesel table definitions for the tender database.
//!
//! These mirror the embedded migrations under `backend/migrations/` and are
//! internal to the persistence layer.

diesel::table! {
    /// Registered employees acting as users of the service.
    employee (id) {
        /// Primary key.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Optional given name.
        first_name -> Nullable<Varchar>,
        /// Optional family name.
        last_name -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Membership granting a user authority over an organization.
    organization_responsible (id) {
        /// Primary key.
        id -> Uuid,
        /// Organization the user answers for.
        organization_id -> Uuid,
        /// Responsible employee.
        user_id -> Uuid,
    }
}

diesel::table! {
    /// Live tender rows.
    tender (id) {
        /// Primary key.
        id -> Uuid,
        /// Tender title.
        name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Service category tag.
        service_type -> Varchar,
        /// `CREATED`, `PUBLISHED` or `CLOSED`.
        status -> Varchar,
        /// Owning organization.
        organization_id -> Uuid,
        /// Creating employee.
        creator_id -> Uuid,
        /// Optimistic concurrency version, starting at 1.
        version -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only snapshots of prior tender versions.
    tender_history (tender_id, version) {
        /// Tender the snapshot belongs to.
        tender_id -> Uuid,
        /// Version the tender had when the snapshot was taken.
        version -> Int4,
        /// Snapshot title.
        name -> Varchar,
        /// Snapshot description.
        description -> Text,
        /// Snapshot service category.
        service_type -> Varchar,
        /// Snapshot status.
        status -> Varchar,
        /// Owning organization at the time.
        organization_id -> Uuid,
        /// Creating employee.
        creator_id -> Uuid,
        /// When the snapshot was written.
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bids submitted against tenders.
    bid (id) {
        /// Primary key.
        id -> Uuid,
        /// Tender the bid answers.
        tender_id -> Uuid,
        /// Organization the bid is made for.
        organization_id -> Uuid,
        /// Submitting employee.
        user_id -> Uuid,
        /// `User` or `Organization`.
        author_type -> Varchar,
        /// Offer description.
        description -> Text,
        /// `CREATED`, `PUBLISHED` or `CANCELED`.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only feedback left on bids.
    bid_review (id) {
        /// Primary key.
        id -> Uuid,
        /// Reviewed bid.
        bid_id -> Uuid,
        /// Feedback text.
        description -> Text,
        /// When the feedback was recorded.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(bid -> tender (tender_id));
diesel::joinable!(bid_review -> bid (bid_id));
diesel::joinable!(tender_history -> tender (tender_id));

diesel::allow_tables_to_appear_in_same_query!(
    bid,
    bid_review,
    employee,
    organization_responsible,
    tender,
    tender_history,
);
