//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire config, logging, db bootstrap and the parcel service end to end.
//! - Walk one parcel through its lifecycle and print each step.

use log::error;
use parcel_tracker_core::db::open_db;
use parcel_tracker_core::{
    core_version, init_logging, ParcelService, SqliteParcelRepository, TrackerConfig,
};
use std::error::Error;
use std::process::ExitCode;

const DEMO_CLIENT: i64 = 1;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("parcel_tracker: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = TrackerConfig::from_env()?;
    if let Some(logging) = config.logging() {
        init_logging(&logging)?;
    }

    println!("parcel_tracker_core version={}", core_version());

    let conn = open_db(&config.db_path)?;
    let service = ParcelService::new(SqliteParcelRepository::new(&conn));

    let parcel = service.register(DEMO_CLIENT, "Pskov, d. Pushkina, 10")?;
    println!(
        "registered number={} address={} created_at={}",
        parcel.number, parcel.address, parcel.created_at
    );

    service.change_address(parcel.number, "Saratov, d. Verkhnie Zori, 5")?;
    println!("address changed number={}", parcel.number);

    if let Some(status) = service.next_status(parcel.number)? {
        println!("status advanced number={} status={status}", parcel.number);
    }

    for stored in service.client_parcels(DEMO_CLIENT)? {
        println!(
            "client={} number={} status={} address={}",
            stored.client, stored.number, stored.status, stored.address
        );
    }

    // Only registered parcels are removed; the one above has been sent.
    let extra = service.register(DEMO_CLIENT, "Moscow, Lenina, 1")?;
    service.delete(extra.number)?;
    println!("deleted number={}", extra.number);

    Ok(())
}
