//! Vehicle Lifecycle
//!
//! This example walks one vehicle through its ownership lifecycle on an
//! in-memory ledger.
//!
//! Key concepts:
//! - Named invocations returning status/message/payload responses
//! - Duplicate creation rejected without touching the stored record
//! - Rich queries scoped to vehicle documents
//! - Key history in store order, with transaction ids and timestamps
//! - Checkpointing the store and restoring it elsewhere
//!
//! Run with: cargo run --example vehicle_lifecycle
//! Set RUST_LOG=vehicle_ledger=debug to see rendered queries.

use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vehicle_ledger::checkpoint::StoreCheckpoint;
use vehicle_ledger::config::LedgerConfig;
use vehicle_ledger::{LedgerEnv, MemoryStore, Response, VehicleLedger};

fn show(label: &str, response: &Response) {
    if response.is_success() {
        let payload = String::from_utf8_lossy(&response.payload);
        println!("  {label}: ok {payload}");
    } else {
        println!("  {label}: error ({})", response.message);
    }
}

async fn call(ledger: &VehicleLedger, label: &str, function: &str, args: &[&str]) -> Response {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let response = ledger.invoke(function, &args).await;
    show(label, &response);
    response
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    println!("=== Vehicle Lifecycle ===\n");

    let store = Arc::new(MemoryStore::new());
    let config = LedgerConfig::builder().trace_payloads(true).build();
    let ledger = VehicleLedger::new(LedgerEnv::new(store.clone()).with_config(config));
    show("init", &ledger.init());

    println!("\n1. Manufacture");
    call(&ledger, "create V1", "createVehicles", &["V1", "2024-01-01"]).await;
    call(&ledger, "create V2", "createVehicles", &["V2", "2024-01-03"]).await;
    call(&ledger, "create V1 again", "createVehicles", &["V1", "2024-01-02"]).await;

    println!("\n2. Look up");
    call(&ledger, "V1", "querySpecificVehicle", &["V1"]).await;
    call(&ledger, "new vehicles", "queryCreatedVehicles", &[]).await;

    println!("\n3. Transfer");
    call(
        &ledger,
        "V1 -> Dealer",
        "transferOwnership",
        &["V1", "Dealer", "Sold", "2024-01-01", "2024-02-01"],
    )
    .await;
    call(
        &ledger,
        "V9 -> Dealer",
        "transferOwnership",
        &["V9", "Dealer", "Sold", "2024-01-01", "2024-02-01"],
    )
    .await;
    call(&ledger, "V1", "querySpecificVehicle", &["V1"]).await;
    call(&ledger, "new vehicles", "queryCreatedVehicles", &[]).await;
    call(
        &ledger,
        "at manufacturer",
        "queryCraetedVehicleByManufacturer",
        &[],
    )
    .await;

    println!("\n4. History");
    call(&ledger, "V1 history", "getVehicleHistory", &["V1"]).await;

    let history = ledger.history("V1").await?;
    println!("  owners over time: {}", history.owners()?.join(" -> "));

    println!("\n5. Checkpoint and restore");
    let checkpoint = store.checkpoint();
    let json = checkpoint.to_json()?;
    let binary = checkpoint.to_binary()?;
    println!("  json: {} bytes, binary: {} bytes", json.len(), binary.len());

    let restored = MemoryStore::from_checkpoint(StoreCheckpoint::from_binary(&binary)?)?;
    let replica = VehicleLedger::new(LedgerEnv::new(Arc::new(restored)));
    let replica_history = replica.history("V1").await?;
    println!(
        "  restored history entries for V1: {}",
        replica_history.len()
    );

    println!("\n=== Done ===");
    Ok(())
}
