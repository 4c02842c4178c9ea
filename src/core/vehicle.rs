//! The vehicle record held under each ledger key.
//!
//! A `Vehicle` is the in-memory form of the single current state record of
//! an asset. All methods are pure; persistence goes through
//! [`codec`](super::codec).

use super::codec::DOC_TYPE;

/// Owner assigned to every vehicle at creation.
pub const INITIAL_OWNER: &str = "Manufacturer";

/// Lifecycle stage assigned to every vehicle at creation.
pub const INITIAL_STATUS: &str = "New";

/// Current state record of a vehicle.
///
/// `owner` and `status` are open strings: creation fixes them to
/// [`INITIAL_OWNER`] and [`INITIAL_STATUS`], transfers may set any value.
///
/// # Example
///
/// ```rust
/// use vehicle_ledger::core::{Vehicle, INITIAL_OWNER, INITIAL_STATUS};
///
/// let vehicle = Vehicle::manufactured("V1", "2024-01-01");
/// assert_eq!(vehicle.owner, INITIAL_OWNER);
/// assert_eq!(vehicle.status, INITIAL_STATUS);
/// assert!(vehicle.last_modified_at.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vehicle {
    /// Ledger key; never changes after creation
    pub id: String,
    /// Current holder
    pub owner: String,
    /// Current lifecycle stage
    pub status: String,
    /// Caller-supplied creation date
    pub created_at: String,
    /// Caller-supplied date of the latest transfer, empty until the first one
    pub last_modified_at: String,
}

impl Vehicle {
    /// Record for a freshly created vehicle, still with its manufacturer.
    pub fn manufactured(id: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner: INITIAL_OWNER.to_string(),
            status: INITIAL_STATUS.to_string(),
            created_at: created_at.into(),
            last_modified_at: String::new(),
        }
    }

    /// Record replacing the current one after a transfer.
    ///
    /// Every field comes from the caller, including `created_at`.
    pub fn transferred(
        id: impl Into<String>,
        owner: impl Into<String>,
        status: impl Into<String>,
        created_at: impl Into<String>,
        last_modified_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            status: status.into(),
            created_at: created_at.into(),
            last_modified_at: last_modified_at.into(),
        }
    }

    /// Document discriminator written alongside every record.
    pub fn kind(&self) -> &'static str {
        DOC_TYPE
    }
}
