//! Shared fixtures for unit tests across the domain and its adapters.

use chrono::{DateTime, TimeZone, Utc};

use super::{
    Bid, BidAuthorType, BidId, BidStatus, OrganizationId, ServiceType, Tender, TenderId,
    TenderName, TenderStatus, TenderVersion, User, UserId, Username,
};

pub const USER_1: &str = "550e8400-e29b-41d4-a716-446655440000";
pub const USER_2: &str = "550e8400-e29b-41d4-a716-446655440001";
pub const ORG_1: &str = "550e8400-e29b-41d4-a716-446655440020";
pub const ORG_2: &str = "550e8400-e29b-41d4-a716-446655440021";
pub const TENDER_1: &str = "d3bab548-a6bf-4838-9127-b40f77ec7812";
pub const BID_1: &str = "550e8400-e29b-41d4-a716-446655440008";

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("fixture user id")
}

pub fn user(raw_id: &str, name: &str) -> User {
    User::new(user_id(raw_id), Username::new(name).expect("fixture username"))
}

pub fn user1() -> User {
    user(USER_1, "user1")
}

pub fn user2() -> User {
    user(USER_2, "user2")
}

pub fn tender_id() -> TenderId {
    TenderId::new(TENDER_1).expect("fixture tender id")
}

pub fn org_id(raw: &str) -> OrganizationId {
    OrganizationId::new(raw).expect("fixture organization id")
}

pub fn bid_id() -> BidId {
    BidId::new(BID_1).expect("fixture bid id")
}

/// Tender created by `user1` for `ORG_1`, at version 1.
pub fn sample_tender() -> Tender {
    Tender {
        id: tender_id(),
        name: TenderName::new("Bridge repair").expect("fixture name"),
        description: "Repair the river bridge".to_owned(),
        service_type: ServiceType::new("Construction").expect("fixture service type"),
        status: TenderStatus::Created,
        organization_id: org_id(ORG_1),
        creator_id: user_id(USER_1),
        version: TenderVersion::INITIAL,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

/// Bid by `user1` against [`sample_tender`].
pub fn sample_bid() -> Bid {
    Bid {
        id: bid_id(),
        tender_id: tender_id(),
        organization_id: org_id(ORG_1),
        user_id: user_id(USER_1),
        author_type: BidAuthorType::User,
        description: "Lowest price".to_owned(),
        status: BidStatus::Created,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}
