//! Entry point the host runtime invokes.

use super::operation::Operation;
use super::response::Response;
use crate::core::{Vehicle, VehicleHistory};
use crate::effects::{lifecycle, LedgerEnv};
use crate::error::LedgerResult;
use stillwater::effect::Effect;
use tracing::{info, warn};

/// Routes named invocations to lifecycle effects.
///
/// Holds no state of its own beyond the environment; every invocation
/// starts from a fresh store read.
#[derive(Clone)]
pub struct VehicleLedger {
    env: LedgerEnv,
}

impl VehicleLedger {
    pub fn new(env: LedgerEnv) -> Self {
        Self { env }
    }

    /// Instantiation hook; there is nothing to initialise.
    pub fn init(&self) -> Response {
        Response::success(Vec::new())
    }

    /// Execute a named operation and fold the outcome into a [`Response`].
    pub async fn invoke(&self, function: &str, args: &[String]) -> Response {
        let result = match Operation::parse(function, args) {
            Ok(op) => {
                info!(function, read_only = op.is_read_only(), "Invoke is running {function}");
                self.execute(op).await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(payload) => Response::success(payload),
            Err(err) => {
                warn!(function, code = err.code(), error = %err, "invocation failed");
                Response::from(err)
            }
        }
    }

    /// Execute a typed operation, returning its payload.
    pub async fn execute(&self, op: Operation) -> LedgerResult<Vec<u8>> {
        op.into_effect().run(&self.env).await
    }

    /// Current decoded record of `id`.
    pub async fn vehicle(&self, id: &str) -> LedgerResult<Option<Vehicle>> {
        lifecycle::read_vehicle(id.to_string()).run(&self.env).await
    }

    /// Decoded history of `id`.
    pub async fn history(&self, id: &str) -> LedgerResult<VehicleHistory> {
        lifecycle::vehicle_history(id.to_string()).run(&self.env).await
    }
}
