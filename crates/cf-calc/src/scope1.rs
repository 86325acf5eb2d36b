//! Scope 1 calculators: direct emissions.

use crate::context::CalcContext;
use crate::error::CalcResult;
use crate::method::{Method, MethodSet, WORST_QUALITY};
use cf_core::clamp;
use cf_records::{FugitiveEmission, MobileCombustion, StationaryCombustion};

/// Score credit for answering fields the physical method does not need.
pub const ANSWERED_FIELD_CREDIT: f64 = 0.75;

pub fn stationary_combustion(
    r: &StationaryCombustion,
    ctx: &mut CalcContext<'_>,
) -> CalcResult<MethodSet> {
    let mut set = MethodSet::emissions();

    if r.fuel_spend.is_some() {
        set.penalize(ANSWERED_FIELD_CREDIT);
    }
    if r.heating_value.is_some() {
        set.penalize(ANSWERED_FIELD_CREDIT);
    }

    if let (Some(fuel_type), Some(fuel_use), Some(unit)) = (&r.fuel_type, r.fuel_use, &r.fuel_unit)
        && let Some(co2e) = ctx.fuel_co2e(r.fuel_state, fuel_type, unit, fuel_use)?
    {
        set.evaluate(
            Method::PhysicalEmissions,
            2.0,
            co2e,
            &["fuel_use", "fuel_type", "fuel_unit"],
        );
    }

    Ok(set)
}

pub fn mobile_combustion(r: &MobileCombustion, ctx: &mut CalcContext<'_>) -> CalcResult<MethodSet> {
    let mut set = MethodSet::emissions();

    if let (Some(vehicle_type), Some(distance)) = (&r.vehicle_type, r.distance_traveled)
        && let Some(co2e) = ctx.travel_co2e(vehicle_type, distance)?
    {
        set.evaluate(
            Method::DistanceBasedEmissions,
            1.0,
            co2e,
            &["vehicle_type", "distance_traveled"],
        );
    }

    if let (Some(fuel_type), Some(fuel_use), Some(unit)) = (&r.fuel_type, r.fuel_use, &r.fuel_unit)
        && let Some(co2e) = ctx.fuel_co2e(r.fuel_state, fuel_type, unit, fuel_use)?
    {
        set.evaluate(
            Method::UseBasedEmissions,
            1.0,
            co2e,
            &["fuel_use", "fuel_type", "fuel_unit"],
        );
    }

    Ok(set)
}

/// Refrigerant lost over the equipment's life, implied by its loss parameters.
///
/// `None` without a capacity or without any loss parameter. The annual leak only
/// counts when the number of years is known. The result is clamped to
/// `[0, refrigerant_capacity]`.
pub fn derived_refrigerant_use(r: &FugitiveEmission) -> Option<(f64, Vec<&'static str>)> {
    let capacity = r.refrigerant_capacity?;
    let mut fields = vec!["refrigerant_capacity"];
    let mut loss = 0.0;

    if let Some(rate) = r.install_loss_rate {
        loss += rate * capacity;
        fields.push("install_loss_rate");
    }
    if let Some(rate) = r.recovery_rate {
        loss += (1.0 - rate) * capacity;
        fields.push("recovery_rate");
    }
    if let (Some(rate), Some(years)) = (r.annual_leak_rate, r.number_of_year) {
        loss += years * rate * capacity;
        fields.push("annual_leak_rate");
        fields.push("number_of_year");
    }

    if fields.len() == 1 {
        return None;
    }
    Some((clamp(loss, 0.0, capacity), fields))
}

pub fn fugitive_emission(r: &FugitiveEmission, ctx: &mut CalcContext<'_>) -> CalcResult<MethodSet> {
    let mut set = MethodSet::emissions();
    let Some(refrigerant_type) = &r.refrigerant_type else {
        return Ok(set);
    };
    let Some(gwp) = ctx.refrigerant_gwp(refrigerant_type)? else {
        return Ok(set);
    };

    if let Some(used) = r.refrigerant_use {
        set.evaluate(
            Method::ReportedEmissions,
            2.0,
            used * gwp,
            &["refrigerant_use", "refrigerant_type"],
        );
    }

    if let Some((used, mut fields)) = derived_refrigerant_use(r) {
        fields.insert(0, "refrigerant_type");
        set.set_quality(WORST_QUALITY);
        set.evaluate(Method::CalculatedEmissions, 3.0, used * gwp, &fields);
    }

    Ok(set)
}
