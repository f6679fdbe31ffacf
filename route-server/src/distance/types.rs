//! OSRM route service response types.
//!
//! Only the fields the planner needs are modelled; everything else in the
//! response is ignored.

use serde::Deserialize;

/// Response of `GET /route/v1/{profile}/{coordinates}`.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmRouteResponse {
    /// "Ok" on success, otherwise an error code such as "NoRoute"
    pub code: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// One route alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmRoute {
    /// Meters
    pub distance: f64,
    /// Seconds
    pub duration: f64,
}

impl OsrmRouteResponse {
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}
