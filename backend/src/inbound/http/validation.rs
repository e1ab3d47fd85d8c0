//! Shared validation helpers for inbound HTTP adapters.

use pagination::{PageRequest, PageRequestError};
use serde_json::json;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    Error::invalid_request(format!("{} is required", field.as_str())).with_details(json!({
        "field": field.as_str(),
        "code": "missing_field",
    }))
}

/// Unwrap a required field, treating absence as `invalid_request`.
pub(crate) fn require(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

fn invalid_integer(field: &'static str, value: &str) -> Error {
    Error::invalid_request(format!("{field} must be an integer")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_integer",
    }))
}

fn parse_optional_integer(field: &'static str, raw: Option<&str>) -> Result<Option<i64>, Error> {
    raw.map(|value| {
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid_integer(field, value))
    })
    .transpose()
}

fn map_page_error(err: PageRequestError) -> Error {
    let field = match err {
        PageRequestError::LimitOutOfRange { .. } => "limit",
        PageRequestError::InvalidOffset { .. } => "offset",
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_page",
    }))
}

/// Build a page window from raw `limit` and `offset` query values.
pub(crate) fn parse_page(limit: Option<&str>, offset: Option<&str>) -> Result<PageRequest, Error> {
    let limit = parse_optional_integer("limit", limit)?;
    let offset = parse_optional_integer("offset", offset)?;
    PageRequest::try_from_params(limit, offset).map_err(map_page_error)
}

#[cfg(test)]
mod tests {
    //! Unit tests for HTTP validation helpers.

    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn absent_page_params_use_defaults() {
        let page = parse_page(None, None).expect("defaults");
        assert_eq!(page, PageRequest::default());
    }

    #[rstest]
    fn explicit_page_params_are_kept() {
        let page = parse_page(Some("5"), Some("20")).expect("valid page");
        assert_eq!((page.limit(), page.offset()), (5, 20));
    }

    #[rstest]
    #[case(Some("abc"), None, "limit")]
    #[case(Some("0"), None, "limit")]
    #[case(Some("101"), None, "limit")]
    #[case(None, Some("-1"), "offset")]
    #[case(None, Some("1.5"), "offset")]
    fn bad_page_params_are_rejected(
        #[case] limit: Option<&str>,
        #[case] offset: Option<&str>,
        #[case] field: &str,
    ) {
        let err = parse_page(limit, offset).expect_err("invalid page");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["field"], field);
    }

    #[rstest]
    fn missing_field_names_the_field() {
        let err = require(None, FieldName::new("username")).expect_err("missing");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "username is required");
        assert_eq!(err.details().expect("details")["code"], "missing_field");
    }
}
