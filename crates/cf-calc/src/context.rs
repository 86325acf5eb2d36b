//! Factor access shared by all calculators.

use crate::error::CalcResult;
use cf_factors::{FactorRow, GwpTable, LookupCache, co2e_for_unit, get_relevant_factors};
use cf_records::FuelState;
use tracing::warn;

/// Unit suffix of per-activity factors (per km, per kg of waste, per tonne-km).
pub const ACTIVITY_UNIT: &str = "unit";

/// Unit suffix of grid electricity factors.
pub const GRID_UNIT: &str = "kwh";

/// Freight rows whose factors are per tonne-kilometre.
pub const TONNE_KM_UNITS: &str = "mton-km";

/// Everything a calculator may touch besides the record itself.
pub struct CalcContext<'a> {
    pub cache: &'a mut LookupCache,
    pub gwp: &'a GwpTable,
}

impl<'a> CalcContext<'a> {
    pub fn new(cache: &'a mut LookupCache, gwp: &'a GwpTable) -> Self {
        Self { cache, gwp }
    }

    /// kg CO2e for `quantity` of fuel measured in `unit`.
    pub fn fuel_co2e(
        &mut self,
        fuel_state: FuelState,
        fuel_type: &str,
        unit: &str,
        quantity: f64,
    ) -> CalcResult<Option<f64>> {
        let Some(row) = self.cache.fuel_factors(fuel_state.as_str(), fuel_type)? else {
            warn!(fuel_type, fuel_state = fuel_state.as_str(), "no fuel factors");
            return Ok(None);
        };
        Ok(self.co2e(&row, unit, quantity))
    }

    /// kg CO2e for `distance` km in a vehicle from the passenger travel table.
    pub fn travel_co2e(&mut self, vehicle_type: &str, distance: f64) -> CalcResult<Option<f64>> {
        let Some(row) = self.cache.vehicle_factors(None, vehicle_type, None)? else {
            warn!(vehicle_type, "no vehicle factors");
            return Ok(None);
        };
        Ok(self.co2e(&row, ACTIVITY_UNIT, distance))
    }

    pub fn freight_factors(&mut self, freight_type: &str) -> CalcResult<Option<FactorRow>> {
        let row = self.cache.freight_factors(freight_type)?;
        if row.is_none() {
            warn!(freight_type, "no freight factors");
        }
        Ok(row)
    }

    pub fn waste_factors(
        &mut self,
        waste_type: &str,
        treatment: Option<&str>,
    ) -> CalcResult<Option<FactorRow>> {
        let row = self.cache.waste_factors(waste_type, treatment)?;
        if row.is_none() {
            warn!(waste_type, treatment, "no waste factors");
        }
        Ok(row)
    }

    /// 100-year GWP of a refrigerant.
    pub fn refrigerant_gwp(&mut self, refrigerant_type: &str) -> CalcResult<Option<f64>> {
        let gwp = self
            .cache
            .refrigerant_gwp(refrigerant_type)?
            .and_then(|row| row.number("gwp_100yr").or_else(|| row.number("gwp_100")));
        if gwp.is_none() {
            warn!(refrigerant_type, "no refrigerant GWP");
        }
        Ok(gwp)
    }

    /// kg CO2e per kWh for a location.
    ///
    /// A location without grid factor rows is an error. A row without any kWh gas
    /// column yields `None`.
    pub fn grid_factor(&mut self, country: &str, state: Option<&str>) -> CalcResult<Option<f64>> {
        let row = self.cache.grid_factors(None, country, state, None)?;
        if get_relevant_factors(&row, GRID_UNIT).is_empty() {
            warn!(country, state, "grid factor row has no kWh columns");
            return Ok(None);
        }
        Ok(Some(co2e_for_unit(&row, GRID_UNIT, 1.0, self.gwp)))
    }

    pub fn co2e(&self, row: &FactorRow, unit: &str, quantity: f64) -> Option<f64> {
        if get_relevant_factors(row, unit).is_empty() {
            warn!(unit, "factor row has no columns for unit");
            return None;
        }
        Some(co2e_for_unit(row, unit, quantity, self.gwp))
    }
}
