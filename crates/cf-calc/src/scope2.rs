//! Scope 2 calculator: purchased electricity.

use crate::context::CalcContext;
use crate::error::CalcResult;
use crate::method::{BEST_QUALITY, Method, MethodSet, WORST_QUALITY};
use cf_core::{clamp, round2};
use cf_records::PurchasedPower;

pub const MISSING_COORDINATES_PENALTY: f64 = 0.5;
pub const MISSING_SPEND_PENALTY: f64 = 0.5;

/// Location-based electricity emissions.
///
/// Only electricity is supported; other energy types yield no methods. The grid
/// factor for the record's country is required: a location without factors is an
/// error rather than a silent zero.
pub fn purchased_power(r: &PurchasedPower, ctx: &mut CalcContext<'_>) -> CalcResult<MethodSet> {
    let mut set = MethodSet::emissions();

    if !r.energy_type.eq_ignore_ascii_case("electric") {
        return Ok(set);
    }
    let (Some(energy_use), Some(country)) = (r.energy_use, &r.country) else {
        return Ok(set);
    };

    if r.lat.is_none() || r.lon.is_none() {
        set.penalize(MISSING_COORDINATES_PENALTY);
    }
    if r.energy_spend.is_none() || r.currency.is_none() {
        set.penalize(MISSING_SPEND_PENALTY);
    }

    if let Some(factor) = ctx.grid_factor(country, r.state.as_deref())? {
        set.evaluate(
            Method::PhysicalEmissions,
            2.0,
            energy_use * factor,
            &["energy_use", "grid_emission_factor"],
        );
    }

    set.set_quality(round2(clamp(set.data_quality, BEST_QUALITY, WORST_QUALITY)));
    Ok(set)
}
