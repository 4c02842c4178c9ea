//! Named-operation dispatch.
//!
//! Maps an operation name and its positional arguments onto exactly one
//! lifecycle effect:
//! - [`Request`] types own each operation's name and arity
//! - [`Operation`] is the closed set of requests
//! - [`VehicleLedger`] runs operations and folds outcomes into [`Response`]s

mod ledger;
mod operation;
mod request;
mod response;

pub use ledger::VehicleLedger;
pub use operation::Operation;
pub use request::{
    Arity, CreateVehicle, GetVehicleHistory, QueryCreatedVehicles, QuerySpecificVehicle,
    QueryVehiclesByManufacturer, Request, TransferOwnership,
};
pub use response::Response;
