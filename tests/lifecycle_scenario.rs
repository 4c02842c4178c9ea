//! End-to-end lifecycle scenarios driven through the named-invocation
//! surface.

use serde_json::{json, Value};
use std::sync::Arc;
use vehicle_ledger::core::codec;
use vehicle_ledger::core::{INITIAL_OWNER, INITIAL_STATUS};
use vehicle_ledger::store::{Fault, MemoryStore, StateStore};
use vehicle_ledger::{LedgerEnv, Response, VehicleLedger};

struct Harness {
    store: Arc<MemoryStore>,
    ledger: VehicleLedger,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let ledger = VehicleLedger::new(LedgerEnv::new(store.clone()));
        Self { store, ledger }
    }

    async fn call(&self, function: &str, args: &[&str]) -> Response {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.ledger.invoke(function, &args).await
    }

    async fn records(&self, function: &str, args: &[&str]) -> Vec<Value> {
        let response = self.call(function, args).await;
        assert!(response.is_success(), "{function} failed: {}", response.message);
        match serde_json::from_slice(&response.payload).unwrap() {
            Value::Array(records) => records,
            other => panic!("expected array payload, got {other}"),
        }
    }

    fn stored(&self, id: &str) -> Value {
        let bytes = self.store.get_state(id).unwrap().unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[tokio::test]
async fn full_ownership_lifecycle() {
    let h = Harness::new();

    assert!(h.call("createVehicles", &["V1", "2024-01-01"]).await.is_success());

    let duplicate = h.call("createVehicles", &["V1", "2024-01-02"]).await;
    assert_eq!(duplicate.status, Response::ERROR);
    assert_eq!(duplicate.message, "vehicle id already exists: V1");

    let lookup = h.records("querySpecificVehicle", &["V1"]).await;
    assert_eq!(lookup.len(), 1);
    assert_eq!(lookup[0]["Key"], "V1");
    assert_eq!(lookup[0]["Record"]["status"], INITIAL_STATUS);
    assert_eq!(lookup[0]["Record"]["ownership"], INITIAL_OWNER);

    let transfer = h
        .call(
            "transferOwnership",
            &["V1", "Dealer", "Sold", "2024-01-01", "2024-02-01"],
        )
        .await;
    assert!(transfer.is_success());
    assert!(transfer.payload.is_empty());

    let lookup = h.records("querySpecificVehicle", &["V1"]).await;
    assert_eq!(lookup.len(), 1);
    assert_eq!(lookup[0]["Record"]["ownership"], "Dealer");
    assert_eq!(lookup[0]["Record"]["status"], "Sold");

    assert!(h.records("queryCreatedVehicles", &[]).await.is_empty());

    let history = h.records("getVehicleHistory", &["V1"]).await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["Value"]["ownership"], INITIAL_OWNER);
    assert_eq!(history[1]["Value"]["ownership"], "Dealer");
    for entry in &history {
        assert_eq!(entry["IsDelete"], "false");
        assert!(entry["TxId"].as_str().is_some_and(|tx| !tx.is_empty()));
        assert!(entry["Timestamp"].as_str().is_some_and(|ts| ts.ends_with("+0000 UTC")));
    }
}

#[tokio::test]
async fn first_create_survives_a_duplicate() {
    let h = Harness::new();
    h.call("createVehicles", &["V1", "2024-01-01"]).await;
    let before = h.stored("V1");

    h.call("createVehicles", &["V1", "2024-01-02"]).await;

    assert_eq!(h.stored("V1"), before);
    assert_eq!(before["createdDate"], "2024-01-01");
    assert_eq!(h.store.write_count(), 1);
}

#[tokio::test]
async fn transfer_of_unknown_vehicle_writes_nothing() {
    let h = Harness::new();
    let response = h
        .call(
            "transferOwnership",
            &["V9", "Dealer", "Sold", "2024-01-01", "2024-02-01"],
        )
        .await;

    assert_eq!(response.message, "vehicle id does not exist: V9");
    assert_eq!(h.store.write_count(), 0);
    assert_eq!(h.store.get_state("V9").unwrap(), None);
}

#[tokio::test]
async fn transfer_replaces_the_whole_document() {
    let h = Harness::new();
    h.call("createVehicles", &["V1", "2024-01-01"]).await;
    h.call(
        "transferOwnership",
        &["V1", "Dealer", "Sold", "2023-12-31", "2024-02-01"],
    )
    .await;

    assert_eq!(
        h.stored("V1"),
        json!({
            "docType": codec::DOC_TYPE,
            "vehicleID": "V1",
            "ownership": "Dealer",
            "status": "Sold",
            "createdDate": "2023-12-31",
            "lastModifiedDate": "2024-02-01",
        })
    );
}

#[tokio::test]
async fn list_queries_are_scoped_by_current_state() {
    let h = Harness::new();
    for id in ["V1", "V2", "V3"] {
        h.call("createVehicles", &[id, "2024-01-01"]).await;
    }
    h.call(
        "transferOwnership",
        &["V2", "Dealer", "Sold", "2024-01-01", "2024-02-01"],
    )
    .await;
    h.call(
        "transferOwnership",
        &["V3", INITIAL_OWNER, "Recalled", "2024-01-01", "2024-03-01"],
    )
    .await;

    let keys = |records: Vec<Value>| -> Vec<String> {
        records
            .iter()
            .map(|r| r["Key"].as_str().unwrap().to_string())
            .collect()
    };

    assert_eq!(keys(h.records("queryCreatedVehicles", &[]).await), ["V1"]);
    assert_eq!(
        keys(h.records("queryCraetedVehicleByManufacturer", &[]).await),
        ["V1", "V3"]
    );
    assert_eq!(keys(h.records("querySpecificVehicle", &["V2"]).await), ["V2"]);
    assert!(h.records("querySpecificVehicle", &["V4"]).await.is_empty());
}

#[tokio::test]
async fn foreign_documents_are_invisible_to_queries() {
    let h = Harness::new();
    h.store
        .put_state(
            "P1",
            br#"{"docType":"parts","vehicleID":"P1","status":"New","ownership":"Manufacturer"}"#
                .to_vec(),
        )
        .unwrap();
    h.call("createVehicles", &["V1", "2024-01-01"]).await;

    let created = h.records("queryCreatedVehicles", &[]).await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["Key"], "V1");
    assert!(h.records("querySpecificVehicle", &["P1"]).await.is_empty());
}

#[tokio::test]
async fn history_of_unknown_vehicle_is_empty() {
    let h = Harness::new();
    assert!(h.records("getVehicleHistory", &["V404"]).await.is_empty());
}

#[tokio::test]
async fn failed_cursor_yields_no_partial_payload() {
    let h = Harness::new();
    for id in ["V1", "V2", "V3"] {
        h.call("createVehicles", &[id, "2024-01-01"]).await;
    }
    h.store.inject(Fault::QueryAdvance { after: 2 });

    let response = h.call("queryCreatedVehicles", &[]).await;

    assert_eq!(response.status, Response::ERROR);
    assert!(response.payload.is_empty());
    assert_eq!(h.store.open_cursors(), 0);

    // fault is one-shot
    assert_eq!(h.records("queryCreatedVehicles", &[]).await.len(), 3);
}

#[tokio::test]
async fn arity_is_checked_per_operation() {
    let h = Harness::new();

    let create = h.call("createVehicles", &["V1"]).await;
    assert_eq!(create.status, Response::ERROR);

    let transfer = h.call("transferOwnership", &["V1", "Dealer"]).await;
    assert_eq!(transfer.status, Response::ERROR);

    let history = h.call("getVehicleHistory", &[]).await;
    assert_eq!(history.status, Response::ERROR);

    // list queries ignore extra arguments
    assert!(h.call("queryCreatedVehicles", &["ignored"]).await.is_success());
    assert_eq!(h.store.write_count(), 0);
}
