//! Names of the factor tables and columns the cache reads.

use serde::{Deserialize, Serialize};

/// Table names used by [`crate::LookupCache`].
///
/// Every field has a default matching the production factor database, so a
/// configuration file only needs to name the tables it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableNames {
    /// Fuel tables are split per physical state: `<prefix>_<state>`.
    pub fuel_table_prefix: String,
    /// Passenger travel factors per vehicle type (distance based).
    pub travel_table: String,
    /// Vehicle table used for allowlists when the caller does not name one.
    pub vehicle_table: String,
    pub grid_table: String,
    pub freight_table: String,
    pub waste_table: String,
    pub refrigerant_table: String,
    pub country_table: String,
    pub state_table: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            fuel_table_prefix: "s1sc".to_string(),
            travel_table: "s3c6_travel_factors".to_string(),
            vehicle_table: "s1mc_v2".to_string(),
            grid_table: "s2ie_gef".to_string(),
            freight_table: "s3c4_freight_factors".to_string(),
            waste_table: "s3c5_waste_factors".to_string(),
            refrigerant_table: "ghg_refrigerants_gwp_v2".to_string(),
            country_table: "locations_country_code".to_string(),
            state_table: "locations_states".to_string(),
        }
    }
}

impl TableNames {
    pub fn fuel_table(&self, fuel_state: &str) -> String {
        format!("{}_{}", self.fuel_table_prefix, fuel_state)
    }
}
