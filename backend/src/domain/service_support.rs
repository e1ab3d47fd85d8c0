//! Helpers shared by the tender and bid services.
//!
//! Input parsing maps validation failures to `invalid_request` with the
//! offending field in `details`. Identity resolution maps a missing user to
//! `user_not_found` regardless of whether the caller was named by username or
//! by id.

use std::fmt::Display;

use serde_json::json;
use tracing::debug;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{Error, OrganizationId, User, UserId, Username};

pub(crate) fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

/// Build an `invalid_request` error naming `field`.
pub(crate) fn invalid_field(field: &'static str, error: impl Display) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

/// Parse caller input with `parse`, tagging failures with `field`.
pub(crate) fn parse_input<T, E, F>(field: &'static str, raw: &str, parse: F) -> Result<T, Error>
where
    F: FnOnce(&str) -> Result<T, E>,
    E: Display,
{
    parse(raw).map_err(|err| invalid_field(field, err))
}

pub(crate) fn parse_username(raw: &str) -> Result<Username, Error> {
    parse_input("username", raw, |raw| Username::new(raw))
}

pub(crate) async fn resolve_username<D>(directory: &D, username: &Username) -> Result<User, Error>
where
    D: UserDirectory + ?Sized,
{
    debug!(%username, "resolving user by username");
    directory
        .find_by_username(username)
        .await
        .map_err(map_directory_error)?
        .ok_or_else(|| Error::user_not_found(format!("user {username} not found")))
}

pub(crate) async fn resolve_user_id<D>(directory: &D, user_id: &UserId) -> Result<User, Error>
where
    D: UserDirectory + ?Sized,
{
    debug!(%user_id, "resolving user by id");
    directory
        .find_by_id(user_id)
        .await
        .map_err(map_directory_error)?
        .ok_or_else(|| Error::user_not_found(format!("user {user_id} not found")))
}

pub(crate) async fn is_responsible<D>(
    directory: &D,
    user_id: &UserId,
    organization_id: &OrganizationId,
) -> Result<bool, Error>
where
    D: UserDirectory + ?Sized,
{
    directory
        .is_organization_responsible(user_id, organization_id)
        .await
        .map_err(map_directory_error)
}
