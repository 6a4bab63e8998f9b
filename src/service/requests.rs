//! Request payloads accepted by [`RideService`](super::RideService).
//!
//! Field names follow the JSON a request layer receives.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub alias: String,
    pub name: String,
    #[serde(default)]
    pub car_plate: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub destination: String,
    pub occupied_spaces: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRide {
    /// Aliases the driver sees at the pickup point.
    pub present_participants: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnloadRequest {
    pub participant_alias: String,
}
