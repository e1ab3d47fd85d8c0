//! Organization identity.
//!
//! Organizations themselves are not modelled beyond their identifier; the
//! directory only answers whether a user is responsible for one.

use super::identifier::define_identifier;

define_identifier! {
    /// Identifier of an organization that owns tenders and bids.
    OrganizationId => "organization id"
}
