//! The closed set of ledger operations.

use super::request::{
    CreateVehicle, GetVehicleHistory, QueryCreatedVehicles, QuerySpecificVehicle,
    QueryVehiclesByManufacturer, Request, TransferOwnership,
};
use crate::core::Vehicle;
use crate::effects::{lifecycle, LedgerEnv};
use crate::error::{LedgerError, LedgerResult};
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;

/// A ledger operation with its typed arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    CreateVehicle(CreateVehicle),
    QueryCreatedVehicles(QueryCreatedVehicles),
    QuerySpecificVehicle(QuerySpecificVehicle),
    TransferOwnership(TransferOwnership),
    QueryVehiclesByManufacturer(QueryVehiclesByManufacturer),
    GetVehicleHistory(GetVehicleHistory),
}

impl Operation {
    /// Resolve an operation name and its positional arguments.
    ///
    /// Unknown names fail with [`LedgerError::UnknownOperation`]; arity is
    /// checked by the named operation's request type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vehicle_ledger::dispatch::Operation;
    /// use vehicle_ledger::error::LedgerError;
    ///
    /// let args = vec!["V1".to_string(), "2024-01-01".to_string()];
    /// let op = Operation::parse("createVehicles", &args).unwrap();
    /// assert_eq!(op.name(), "createVehicles");
    ///
    /// assert!(matches!(
    ///     Operation::parse("burnVehicles", &args),
    ///     Err(LedgerError::UnknownOperation { .. })
    /// ));
    /// ```
    pub fn parse(name: &str, args: &[String]) -> LedgerResult<Self> {
        match name {
            CreateVehicle::NAME => CreateVehicle::from_args(args).map(Self::CreateVehicle),
            QueryCreatedVehicles::NAME => {
                QueryCreatedVehicles::from_args(args).map(Self::QueryCreatedVehicles)
            }
            QuerySpecificVehicle::NAME => {
                QuerySpecificVehicle::from_args(args).map(Self::QuerySpecificVehicle)
            }
            TransferOwnership::NAME => {
                TransferOwnership::from_args(args).map(Self::TransferOwnership)
            }
            QueryVehiclesByManufacturer::NAME => {
                QueryVehiclesByManufacturer::from_args(args).map(Self::QueryVehiclesByManufacturer)
            }
            GetVehicleHistory::NAME => {
                GetVehicleHistory::from_args(args).map(Self::GetVehicleHistory)
            }
            other => Err(LedgerError::UnknownOperation {
                name: other.to_string(),
            }),
        }
    }

    /// Wire name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateVehicle(_) => CreateVehicle::NAME,
            Self::QueryCreatedVehicles(_) => QueryCreatedVehicles::NAME,
            Self::QuerySpecificVehicle(_) => QuerySpecificVehicle::NAME,
            Self::TransferOwnership(_) => TransferOwnership::NAME,
            Self::QueryVehiclesByManufacturer(_) => QueryVehiclesByManufacturer::NAME,
            Self::GetVehicleHistory(_) => GetVehicleHistory::NAME,
        }
    }

    /// True for operations that never write.
    pub fn is_read_only(&self) -> bool {
        !matches!(self, Self::CreateVehicle(_) | Self::TransferOwnership(_))
    }

    /// The lifecycle effect for this operation, producing the response
    /// payload. Writes produce an empty payload.
    pub fn into_effect(self) -> BoxedEffect<Vec<u8>, LedgerError, LedgerEnv> {
        match self {
            Self::CreateVehicle(CreateVehicle { id, created_at }) => {
                lifecycle::create_vehicle(id, created_at)
                    .map(|()| Vec::new())
                    .boxed()
            }
            Self::QueryCreatedVehicles(_) => lifecycle::query_created_vehicles().boxed(),
            Self::QuerySpecificVehicle(QuerySpecificVehicle { id }) => {
                lifecycle::query_specific_vehicle(id).boxed()
            }
            Self::TransferOwnership(TransferOwnership {
                id,
                owner,
                status,
                created_at,
                last_modified_at,
            }) => lifecycle::transfer_ownership(Vehicle::transferred(
                id,
                owner,
                status,
                created_at,
                last_modified_at,
            ))
            .map(|()| Vec::new())
            .boxed(),
            Self::QueryVehiclesByManufacturer(_) => {
                lifecycle::query_vehicles_by_manufacturer().boxed()
            }
            Self::GetVehicleHistory(GetVehicleHistory { id }) => {
                lifecycle::vehicle_history_payload(id).boxed()
            }
        }
    }
}
