//! Vehicle lifecycle operations.
//!
//! Creation and transfer enforce the record invariants; rich queries and
//! history reads drain their store cursor into an intermediate collection
//! and only serialize once the cursor is exhausted, so a failure part way
//! through never produces a truncated payload.

use crate::core::codec::{self, FIELD_OWNERSHIP, FIELD_STATUS, FIELD_VEHICLE_ID};
use crate::core::{QueryRecord, Selector, Vehicle, VehicleHistory, INITIAL_OWNER, INITIAL_STATUS};
use crate::effects::env::LedgerEnv;
use crate::error::{LedgerError, LedgerResult};
use crate::store::StateStore;
use stillwater::effect::Effect;
use stillwater::prelude::*;
use tracing::{debug, info, warn};

/// Vehicles still at their creation-time status.
pub fn created_vehicles_selector() -> Selector {
    Selector::vehicles().field_eq(FIELD_STATUS, INITIAL_STATUS)
}

/// The vehicle stored under `id`.
pub fn vehicle_selector(id: &str) -> Selector {
    Selector::vehicles().field_eq(FIELD_VEHICLE_ID, id)
}

/// Vehicles still held by their creation-time owner.
pub fn manufacturer_selector() -> Selector {
    Selector::vehicles().field_eq(FIELD_OWNERSHIP, INITIAL_OWNER)
}

/// Create a vehicle under `id`, owned by the manufacturer with status new.
///
/// Fails with [`LedgerError::DuplicateKey`] when `id` already holds a
/// document. Writes exactly once on success and never on failure.
pub fn create_vehicle(
    id: String,
    created_at: String,
) -> impl Effect<Output = (), Error = LedgerError, Env = LedgerEnv> {
    from_fn(move |env: &LedgerEnv| -> LedgerResult<()> {
        info!(vehicle_id = %id, "- start create vehicle");

        if id.is_empty() {
            return Err(LedgerError::InvalidArgument {
                operation: "create vehicle",
                reason: "vehicle id must not be empty".to_string(),
            });
        }

        let store = env.store();
        if store.get_state(&id)?.is_some() {
            warn!(vehicle_id = %id, "vehicle id already exists");
            return Err(LedgerError::DuplicateKey { id: id.clone() });
        }

        let vehicle = Vehicle::manufactured(id.clone(), created_at.clone());
        store.put_state(&id, codec::encode(&vehicle)?)?;

        info!(vehicle_id = %id, "- end create vehicle");
        Ok(())
    })
}

/// Replace the record of an existing vehicle wholesale.
///
/// Every field of `replacement` is written, `created_at` included; nothing
/// is carried over from the previous document, which is never decoded.
/// Fails with [`LedgerError::UnknownKey`] when the vehicle does not exist.
pub fn transfer_ownership(
    replacement: Vehicle,
) -> impl Effect<Output = (), Error = LedgerError, Env = LedgerEnv> {
    from_fn(move |env: &LedgerEnv| -> LedgerResult<()> {
        info!(
            vehicle_id = %replacement.id,
            owner = %replacement.owner,
            status = %replacement.status,
            "- start transfer ownership"
        );

        let store = env.store();
        if store.get_state(&replacement.id)?.is_none() {
            warn!(vehicle_id = %replacement.id, "vehicle id does not exist");
            return Err(LedgerError::UnknownKey {
                id: replacement.id.clone(),
            });
        }

        store.put_state(&replacement.id, codec::encode(&replacement)?)?;

        info!(vehicle_id = %replacement.id, "- end transfer ownership");
        Ok(())
    })
}

/// Run a rich query and serialize the matches as `[{Key, Record}]`.
///
/// Records are embedded exactly as stored. Results keep the store's order.
pub fn query_vehicles(
    selector: Selector,
) -> impl Effect<Output = Vec<u8>, Error = LedgerError, Env = LedgerEnv> {
    from_fn(move |env: &LedgerEnv| -> LedgerResult<Vec<u8>> {
        debug!(query = %selector.to_query_string(), "running rich query");

        let records = collect_records(env.store(), &selector)?;
        let payload = serde_json::to_vec(&records).map_err(|e| LedgerError::MalformedRecord {
            reason: e.to_string(),
        })?;

        info!(matches = records.len(), "rich query complete");
        if env.config().trace_payloads {
            debug!(payload = %String::from_utf8_lossy(&payload), "rich query result");
        }
        Ok(payload)
    })
}

/// Vehicles whose current status is still new.
pub fn query_created_vehicles() -> impl Effect<Output = Vec<u8>, Error = LedgerError, Env = LedgerEnv>
{
    query_vehicles(created_vehicles_selector())
}

/// The vehicle stored under `id`, as a zero- or one-element query result.
pub fn query_specific_vehicle(
    id: String,
) -> impl Effect<Output = Vec<u8>, Error = LedgerError, Env = LedgerEnv> {
    query_vehicles(vehicle_selector(&id))
}

/// Vehicles still held by the manufacturer.
pub fn query_vehicles_by_manufacturer(
) -> impl Effect<Output = Vec<u8>, Error = LedgerError, Env = LedgerEnv> {
    query_vehicles(manufacturer_selector())
}

/// Full history of `id`, oldest first.
pub fn vehicle_history(
    id: String,
) -> impl Effect<Output = VehicleHistory, Error = LedgerError, Env = LedgerEnv> {
    from_fn(move |env: &LedgerEnv| -> LedgerResult<VehicleHistory> {
        read_history(env.store(), &id)
    })
}

/// Full history of `id` serialized as `[{TxId, Value, Timestamp, IsDelete}]`.
pub fn vehicle_history_payload(
    id: String,
) -> impl Effect<Output = Vec<u8>, Error = LedgerError, Env = LedgerEnv> {
    from_fn(move |env: &LedgerEnv| -> LedgerResult<Vec<u8>> {
        let history = read_history(env.store(), &id)?;
        let payload = history.to_payload()?;

        info!(vehicle_id = %id, entries = history.len(), "- end vehicle history");
        if env.config().trace_payloads {
            debug!(payload = %String::from_utf8_lossy(&payload), "vehicle history");
        }
        Ok(payload)
    })
}

/// Current record of `id`, decoded; `None` when absent.
pub fn read_vehicle(
    id: String,
) -> impl Effect<Output = Option<Vehicle>, Error = LedgerError, Env = LedgerEnv> {
    from_fn(move |env: &LedgerEnv| -> LedgerResult<Option<Vehicle>> {
        env.store()
            .get_state(&id)?
            .map(|bytes| codec::decode(&bytes))
            .transpose()
    })
}

fn collect_records(store: &dyn StateStore, selector: &Selector) -> LedgerResult<Vec<QueryRecord>> {
    let cursor = store.get_query_result(selector)?;
    cursor
        .map(|item| -> LedgerResult<QueryRecord> {
            let found = item?;
            QueryRecord::new(found.key, found.value)
        })
        .collect()
}

fn read_history(store: &dyn StateStore, id: &str) -> LedgerResult<VehicleHistory> {
    info!(vehicle_id = %id, "- start vehicle history");

    let cursor = store.get_history_for_key(id)?;
    let mut history = VehicleHistory::new();
    for modification in cursor {
        history.record(modification?)?;
    }
    Ok(history)
}
