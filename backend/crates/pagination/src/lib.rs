//! Limit/offset pagination primitives shared by list endpoints.
//!
//! List endpoints accept optional `limit` and `offset` query parameters. This
//! crate validates them once at the boundary so adapters and repositories can
//! rely on a [`PageRequest`] always holding sane bounds:
//!
//! - `limit` defaults to [`DEFAULT_LIMIT`] and must lie in
//!   `1..=`[`MAX_LIMIT`].
//! - `offset` defaults to zero and must not be negative.
//!
//! # Examples
//!
//! ```
//! use pagination::PageRequest;
//!
//! let page = PageRequest::try_from_params(Some(5), None).expect("valid page");
//! assert_eq!(page.limit(), 5);
//! assert_eq!(page.offset(), 0);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of items returned when the caller does not supply a limit.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Validation failures raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The limit was zero, negative, or above [`MAX_LIMIT`].
    #[error("limit must be between 1 and {max}, got {value}")]
    LimitOutOfRange {
        /// Rejected limit.
        value: i64,
        /// Upper bound in force.
        max: u32,
    },
    /// The offset was negative or does not fit the supported range.
    #[error("offset must be a non-negative integer, got {value}")]
    InvalidOffset {
        /// Rejected offset.
        value: i64,
    },
}

/// Validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest", into = "RawPageRequest")]
pub struct PageRequest {
    limit: u32,
    offset: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PageRequest {
    /// Build a page window from optional raw query values.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when either value is out of range.
    pub fn try_from_params(
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Self, PageRequestError> {
        let checked_limit = match limit {
            None => DEFAULT_LIMIT,
            Some(value) => u32::try_from(value)
                .ok()
                .filter(|candidate| (1..=MAX_LIMIT).contains(candidate))
                .ok_or(PageRequestError::LimitOutOfRange {
                    value,
                    max: MAX_LIMIT,
                })?,
        };
        let checked_offset = match offset {
            None => 0,
            Some(value) => {
                u32::try_from(value).map_err(|_| PageRequestError::InvalidOffset { value })?
            }
        };
        Ok(Self {
            limit: checked_limit,
            offset: checked_offset,
        })
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items skipped before the page starts.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Limit widened for SQL `LIMIT` clauses.
    #[must_use]
    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }

    /// Offset widened for SQL `OFFSET` clauses.
    #[must_use]
    pub fn offset_i64(&self) -> i64 {
        i64::from(self.offset)
    }

    /// Apply the window to an in-memory sequence.
    pub fn apply<I>(&self, items: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
    {
        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPageRequest {
    limit: Option<i64>,
    offset: Option<i64>,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::try_from_params(value.limit, value.offset)
    }
}

impl From<PageRequest> for RawPageRequest {
    fn from(value: PageRequest) -> Self {
        Self {
            limit: Some(i64::from(value.limit)),
            offset: Some(i64::from(value.offset)),
        }
    }
}
