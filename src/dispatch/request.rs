//! Typed requests, one per ledger operation.
//!
//! Each request owns its operation name and its arity rule, and is the only
//! place positional arguments are interpreted.

use crate::error::{LedgerError, LedgerResult};
use std::fmt;

/// Number of positional arguments an operation accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Any number, all ignored
    Any,
    Exactly(usize),
    /// At least this many; extras are ignored
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, found: usize) -> bool {
        match *self {
            Self::Any => true,
            Self::Exactly(n) => found == n,
            Self::AtLeast(n) => found >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any number"),
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// A ledger operation's typed argument tuple.
pub trait Request: Sized {
    /// Operation name on the wire
    const NAME: &'static str;

    const ARITY: Arity;

    /// Build from arguments already checked against [`Self::ARITY`].
    fn from_checked_args(args: &[String]) -> Self;

    /// Check arity, then build.
    fn from_args(args: &[String]) -> LedgerResult<Self> {
        if !Self::ARITY.accepts(args.len()) {
            return Err(LedgerError::BadArity {
                operation: Self::NAME,
                expected: Self::ARITY,
                found: args.len(),
            });
        }
        Ok(Self::from_checked_args(args))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateVehicle {
    pub id: String,
    pub created_at: String,
}

impl Request for CreateVehicle {
    const NAME: &'static str = "createVehicles";
    const ARITY: Arity = Arity::Exactly(2);

    fn from_checked_args(args: &[String]) -> Self {
        Self {
            id: args[0].clone(),
            created_at: args[1].clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryCreatedVehicles;

impl Request for QueryCreatedVehicles {
    const NAME: &'static str = "queryCreatedVehicles";
    const ARITY: Arity = Arity::Any;

    fn from_checked_args(_args: &[String]) -> Self {
        Self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuerySpecificVehicle {
    pub id: String,
}

impl Request for QuerySpecificVehicle {
    const NAME: &'static str = "querySpecificVehicle";
    const ARITY: Arity = Arity::AtLeast(1);

    fn from_checked_args(args: &[String]) -> Self {
        Self {
            id: args[0].clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferOwnership {
    pub id: String,
    pub owner: String,
    pub status: String,
    pub created_at: String,
    pub last_modified_at: String,
}

impl Request for TransferOwnership {
    const NAME: &'static str = "transferOwnership";
    const ARITY: Arity = Arity::Exactly(5);

    fn from_checked_args(args: &[String]) -> Self {
        Self {
            id: args[0].clone(),
            owner: args[1].clone(),
            status: args[2].clone(),
            created_at: args[3].clone(),
            last_modified_at: args[4].clone(),
        }
    }
}

/// Vehicles still with the manufacturer. The wire name keeps its historical
/// spelling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryVehiclesByManufacturer;

impl Request for QueryVehiclesByManufacturer {
    const NAME: &'static str = "queryCraetedVehicleByManufacturer";
    const ARITY: Arity = Arity::Any;

    fn from_checked_args(_args: &[String]) -> Self {
        Self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetVehicleHistory {
    pub id: String,
}

impl Request for GetVehicleHistory {
    const NAME: &'static str = "getVehicleHistory";
    const ARITY: Arity = Arity::AtLeast(1);

    fn from_checked_args(args: &[String]) -> Self {
        Self {
            id: args[0].clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn arity_rules() {
        assert!(Arity::Any.accepts(0));
        assert!(Arity::Any.accepts(7));
        assert!(Arity::Exactly(2).accepts(2));
        assert!(!Arity::Exactly(2).accepts(3));
        assert!(Arity::AtLeast(1).accepts(4));
        assert!(!Arity::AtLeast(1).accepts(0));
    }

    #[test]
    fn create_requires_exactly_two_arguments() {
        let request = CreateVehicle::from_args(&args(&["V1", "2024-01-01"])).unwrap();
        assert_eq!(request.id, "V1");
        assert_eq!(request.created_at, "2024-01-01");

        for bad in [args(&["V1"]), args(&["V1", "2024-01-01", "extra"])] {
            match CreateVehicle::from_args(&bad) {
                Err(LedgerError::BadArity {
                    operation,
                    expected,
                    found,
                }) => {
                    assert_eq!(operation, "createVehicles");
                    assert_eq!(expected, Arity::Exactly(2));
                    assert_eq!(found, bad.len());
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn transfer_maps_positions_to_fields() {
        let request =
            TransferOwnership::from_args(&args(&["V1", "Dealer", "Sold", "c", "m"])).unwrap();
        assert_eq!(
            request,
            TransferOwnership {
                id: "V1".into(),
                owner: "Dealer".into(),
                status: "Sold".into(),
                created_at: "c".into(),
                last_modified_at: "m".into(),
            }
        );
        assert!(TransferOwnership::from_args(&args(&["V1", "Dealer", "Sold", "c"])).is_err());
    }

    #[test]
    fn lookups_ignore_extra_arguments() {
        let request = QuerySpecificVehicle::from_args(&args(&["V1", "ignored"])).unwrap();
        assert_eq!(request.id, "V1");
        assert!(GetVehicleHistory::from_args(&[]).is_err());
    }

    #[test]
    fn list_queries_take_no_arguments() {
        assert!(QueryCreatedVehicles::from_args(&[]).is_ok());
        assert!(QueryVehiclesByManufacturer::from_args(&args(&["anything"])).is_ok());
    }
}
