//! Query-string shapes shared by tender and bid handlers.
//!
//! Every field is optional so that a missing parameter reaches the handler
//! and is reported through the domain error payload.

use serde::Deserialize;

/// Query string carrying the acting username.
#[derive(Debug, Default, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

/// Query string for status changes.
#[derive(Debug, Default, Deserialize)]
pub struct StatusChangeQuery {
    pub status: Option<String>,
    pub username: Option<String>,
}
