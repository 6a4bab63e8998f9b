//! Inspection entry point: seeds an in-memory service and prints its state.

use carpool::{telemetry, Config, RideService, RideView, UserView};
use serde::Serialize;
use std::error::Error;
use tracing::{info, warn};

#[derive(Serialize)]
struct Dump {
    users: Vec<UserView>,
    rides: Vec<RideView>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env();
    if let Err(e) = telemetry::init_tracing(&config.log_filter) {
        eprintln!("tracing init failed: {e}");
    }

    let seed = config.load_seed()?;
    let service = RideService::in_memory(&seed)?;

    let users = service.list_users();
    let mut rides = Vec::new();
    for user in &users {
        match service.list_user_rides(&user.alias) {
            Ok(created) => rides.extend(created),
            Err(e) => warn!(alias = %user.alias, error = %e, "skipping rides"),
        }
    }
    rides.sort_by_key(|ride| ride.id);
    info!(users = users.len(), rides = rides.len(), "Store loaded");

    println!("{}", serde_json::to_string_pretty(&Dump { users, rides })?);
    Ok(())
}
