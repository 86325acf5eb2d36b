//! Scope 3 calculators: value-chain categories 1 to 14.

use crate::context::{ACTIVITY_UNIT, CalcContext, TONNE_KM_UNITS};
use crate::error::CalcResult;
use crate::method::{Method, MethodSet};
use cf_core::round2;
use cf_records::{
    BusinessStay, BusinessTravel, EmployeeCommute, EnergyRelated, FuelState, LeasedAuto, Premises,
    ProcessingProducts, SupplierGoods, Transport, UseOfSold, Waste,
};

/// Score of a reported figure for leased assets, franchises and processing.
pub const REPORTED_QUALITY: f64 = 1.5;

/// Quantity-based cost for purchased (C1) versus capital (C2) goods.
pub const PURCHASED_GOODS_COST: f64 = 2.0;
pub const CAPITAL_GOODS_COST: f64 = 1.0;

/// Partial physical emissions summed into one `physical_emissions` method.
#[derive(Default)]
struct PhysicalParts {
    total: f64,
    fields: Vec<&'static str>,
}

impl PhysicalParts {
    fn add(&mut self, co2e: f64, fields: &[&'static str]) {
        self.total += co2e;
        self.fields.extend_from_slice(fields);
    }

    fn record(self, set: &mut MethodSet) {
        if !self.fields.is_empty() {
            set.evaluate(Method::PhysicalEmissions, 2.0, self.total, &self.fields);
        }
    }
}

fn fuel_part(
    ctx: &mut CalcContext<'_>,
    state: FuelState,
    fuel_type: Option<&str>,
    unit: Option<&str>,
    quantity: Option<f64>,
) -> CalcResult<Option<f64>> {
    match (fuel_type, unit, quantity) {
        (Some(fuel_type), Some(unit), Some(quantity)) => {
            ctx.fuel_co2e(state, fuel_type, unit, quantity)
        }
        _ => Ok(None),
    }
}

fn refrigerant_part(
    ctx: &mut CalcContext<'_>,
    refrigerant_type: Option<&str>,
    quantity: Option<f64>,
) -> CalcResult<Option<f64>> {
    match (refrigerant_type, quantity) {
        (Some(refrigerant_type), Some(quantity)) => Ok(ctx
            .refrigerant_gwp(refrigerant_type)?
            .map(|gwp| quantity * gwp)),
        _ => Ok(None),
    }
}

fn reported(set: &mut MethodSet, reported_emissions: Option<f64>) {
    if let Some(amount) = reported_emissions {
        set.set_quality(REPORTED_QUALITY);
        set.record(Method::ReportedEmissions, amount, &["reported_emissions"]);
    }
}

/// C1 purchased goods and C2 capital goods; only the quantity cost differs.
pub fn supplier_goods(r: &SupplierGoods, quantity_cost: f64) -> MethodSet {
    let mut set = MethodSet::emissions();

    if let Some(amount) = r.supplier_incurred_emissions {
        set.record(
            Method::ReportedEmissions1,
            round2(amount),
            &["supplier_incurred_emissions"],
        );
    }
    if let (Some(quantity), Some(factor)) = (r.purchased_quantity, r.quantity_emission_factor) {
        set.evaluate(
            Method::ReportedEmissions2,
            quantity_cost,
            round2(quantity * factor),
            &["purchased_quantity", "quantity_emission_factor"],
        );
    }
    set
}

/// C3 upstream emissions of purchased electricity.
pub fn energy_related(r: &EnergyRelated) -> MethodSet {
    let mut set = MethodSet::emissions();

    if let (Some(factor), Some(used)) = (r.upstream_emission_factor, r.electric_use) {
        set.evaluate(
            Method::ReportedEmissions1,
            1.5,
            round2(factor * used),
            &["upstream_emission_factor", "electric_use"],
        );
    }

    if let (Some(used), Some(lifecycle), Some(combustion), Some(loss)) = (
        r.electric_use,
        r.lifecycle_emission_factor,
        r.combustion_emission_factor,
        r.energy_loss_rate,
    ) && loss < 1.0
    {
        // Strip the loss inflation from the lifecycle factor, then the combustion share.
        let inflation = 1.0 - 1.0 / (1.0 - loss);
        let upstream = lifecycle * (1.0 - inflation) - combustion;
        set.evaluate(
            Method::ReportedEmissions2,
            1.5,
            round2(used * upstream),
            &[
                "electric_use",
                "lifecycle_emission_factor",
                "combustion_emission_factor",
                "energy_loss_rate",
            ],
        );
    }
    set
}

/// C4 upstream and C9 downstream transportation.
pub fn transport(r: &Transport, ctx: &mut CalcContext<'_>) -> CalcResult<MethodSet> {
    let mut set = MethodSet::emissions();

    if let (Some(distance), Some(_), Some(freight_type)) =
        (r.distance_traveled, &r.distance_unit, &r.freight_type)
        && let Some(row) = ctx.freight_factors(freight_type)?
    {
        let mut fields = vec!["distance_traveled", "distance_unit", "freight_type"];
        let per_tonne_km = row.text("units") == Some(TONNE_KM_UNITS);
        let activity = match r.freight_weight {
            Some(weight) if weight > 0.0 && per_tonne_km => {
                fields.push("freight_weight");
                distance * weight
            }
            _ => distance,
        };
        if let Some(co2e) = ctx.co2e(&row, ACTIVITY_UNIT, activity) {
            set.evaluate(Method::DistanceBasedEmissions, 1.0, co2e, &fields);
        }
    }

    if let Some(co2e) = fuel_part(
        ctx,
        r.fuel_state,
        r.fuel_type.as_deref(),
        r.fuel_unit.as_deref(),
        r.fuel_use,
    )? {
        set.evaluate(
            Method::UseBasedEmissions,
            2.0,
            co2e,
            &["fuel_use", "fuel_type", "fuel_unit"],
        );
    }

    Ok(set)
}

/// C5 waste generated and C12 end-of-life treatment.
///
/// Without a treatment method the most recent factor row for the waste type is used.
pub fn waste(r: &Waste, ctx: &mut CalcContext<'_>) -> CalcResult<MethodSet> {
    let mut set = MethodSet::emissions();
    let (Some(waste_type), Some(quantity)) = (&r.waste_type, r.waste_quantity) else {
        return Ok(set);
    };

    let treatment = r.waste_treatment_method.as_deref().filter(|t| !t.is_empty());
    let Some(row) = ctx.waste_factors(waste_type, treatment)? else {
        return Ok(set);
    };
    let Some(co2e) = ctx.co2e(&row, ACTIVITY_UNIT, quantity) else {
        return Ok(set);
    };

    let mut fields = vec!["waste_type", "waste_quantity"];
    if treatment.is_some() {
        fields.push("waste_treatment_method");
        set.penalize(1.0);
    }
    set.evaluate(Method::PhysicalEmissions, 1.0, co2e, &fields);
    Ok(set)
}

/// C6.1 business travel.
pub fn business_travel(r: &BusinessTravel, ctx: &mut CalcContext<'_>) -> CalcResult<MethodSet> {
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

    if let Some(co2e) = fuel_part(
        ctx,
        r.fuel_state,
        r.fuel_type.as_deref(),
        r.fuel_unit.as_deref(),
        r.fuel_use,
    )? {
        set.evaluate(
            Method::UseBasedEmissions,
            1.0,
            co2e,
            &["fuel_use", "fuel_type", "fuel_unit"],
        );
    }

    Ok(set)
}

/// C6.2 hotel stays.
pub fn business_stay(r: &BusinessStay) -> MethodSet {
    let mut set = MethodSet::emissions();
    if let (Some(nights), Some(factor)) = (r.no_of_nights, r.hotel_emission_factor) {
        set.record(
            Method::ReportedEmissions1,
            nights * factor,
            &["no_of_nights", "hotel_emission_factor"],
        );
    }
    set
}

/// C7 employee commuting.
pub fn employee_commute(r: &EmployeeCommute, ctx: &mut CalcContext<'_>) -> CalcResult<MethodSet> {
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
    Ok(set)
}

/// C8.1 and C13.1 leased buildings, C14 franchises.
///
/// Electricity uses the supplied grid factor, or looks one up by location. A
/// location without grid factors is an error.
pub fn premises(r: &Premises, ctx: &mut CalcContext<'_>) -> CalcResult<MethodSet> {
    let mut set = MethodSet::emissions();
    let mut parts = PhysicalParts::default();

    if let Some(used) = r.electric_use {
        let factor = match (r.grid_emission_factor, &r.country) {
            (Some(factor), _) => Some(factor),
            (None, Some(country)) => ctx.grid_factor(country, r.state.as_deref())?,
            (None, None) => None,
        };
        if let Some(factor) = factor {
            parts.add(used * factor, &["electric_use", "grid_emission_factor"]);
        }
    }
    if let Some(co2e) = refrigerant_part(ctx, r.refrigerant_type.as_deref(), r.refrigerant_use)? {
        parts.add(co2e, &["refrigerant_use", "refrigerant_type"]);
    }
    parts.record(&mut set);

    reported(&mut set, r.reported_emissions);
    Ok(set)
}

/// C8.2 and C13.2 leased vehicles.
pub fn leased_auto(r: &LeasedAuto, ctx: &mut CalcContext<'_>) -> CalcResult<MethodSet> {
    let mut set = MethodSet::emissions();
    let mut parts = PhysicalParts::default();

    if let Some(co2e) = fuel_part(
        ctx,
        r.fuel_state,
        r.fuel_type.as_deref(),
        r.fuel_unit.as_deref(),
        r.fuel_use,
    )? {
        parts.add(co2e, &["fuel_use", "fuel_type", "fuel_unit"]);
    }
    if let Some(co2e) = refrigerant_part(ctx, r.refrigerant_type.as_deref(), r.refrigerant_use)? {
        parts.add(co2e, &["refrigerant_use", "refrigerant_type"]);
    }
    parts.record(&mut set);

    reported(&mut set, r.reported_emissions);
    Ok(set)
}

/// C10 processing of sold products.
pub fn processing_products(
    r: &ProcessingProducts,
    ctx: &mut CalcContext<'_>,
) -> CalcResult<MethodSet> {
    let mut set = MethodSet::emissions();
    let mut parts = PhysicalParts::default();

    if let Some(co2e) = fuel_part(
        ctx,
        r.fuel_state,
        r.fuel_type.as_deref(),
        r.fuel_unit.as_deref(),
        r.fuel_use,
    )? {
        parts.add(co2e, &["fuel_use", "fuel_type", "fuel_unit"]);
    }
    if let Some(co2e) = refrigerant_part(ctx, r.refrigerant_type.as_deref(), r.refrigerant_use)? {
        parts.add(co2e, &["refrigerant_use", "refrigerant_type"]);
    }
    if let (Some(factor), Some(used)) = (r.grid_emission_factor, r.electric_use) {
        parts.add(factor * used, &["grid_emission_factor", "electric_use"]);
    }
    parts.record(&mut set);

    reported(&mut set, r.reported_emissions);
    Ok(set)
}

/// C11 use of sold products, over every unit's lifetime.
pub fn use_of_sold(r: &UseOfSold, ctx: &mut CalcContext<'_>) -> CalcResult<MethodSet> {
    let mut set = MethodSet::emissions();
    let (Some(frequency), Some(sold)) = (r.lifetime_usage_freq, r.number_sold) else {
        return Ok(set);
    };
    let uses = frequency * sold;
    let mut parts = PhysicalParts::default();

    if let Some(co2e) = fuel_part(
        ctx,
        r.fuel_state,
        r.fuel_type.as_deref(),
        r.fuel_unit.as_deref(),
        r.fuel_per_use,
    )? {
        parts.add(uses * co2e, &["fuel_per_use", "fuel_type", "fuel_unit"]);
    }
    if let (Some(per_use), Some(factor)) = (r.electric_per_use, r.grid_emission_factor) {
        parts.add(
            uses * per_use * factor,
            &["electric_per_use", "grid_emission_factor"],
        );
    }
    if let Some(co2e) = refrigerant_part(ctx, r.refrigerant_type.as_deref(), r.refrigerant_per_use)?
    {
        parts.add(uses * co2e, &["refrigerant_per_use", "refrigerant_type"]);
    }

    if !parts.fields.is_empty() {
        let mut fields = vec!["lifetime_usage_freq", "number_sold"];
        fields.append(&mut parts.fields);
        parts.fields = fields;
    }
    parts.record(&mut set);
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capital_goods_cost_less_than_purchased_goods() {
        let r = SupplierGoods {
            purchased_quantity: Some(10.0),
            quantity_emission_factor: Some(1.234),
            ..SupplierGoods::default()
        };
        let purchased = supplier_goods(&r, PURCHASED_GOODS_COST);
        let capital = supplier_goods(&r, CAPITAL_GOODS_COST);
        assert_eq!(purchased.amounts[&Method::ReportedEmissions2], 12.34);
        assert_eq!(purchased.data_quality, 3.0);
        assert_eq!(capital.data_quality, 4.0);
    }

    #[test]
    fn supplier_figure_keeps_worst_score() {
        let r = SupplierGoods {
            supplier_incurred_emissions: Some(99.999),
            ..SupplierGoods::default()
        };
        let set = supplier_goods(&r, PURCHASED_GOODS_COST);
        assert_eq!(set.amounts[&Method::ReportedEmissions1], 100.0);
        assert_eq!(set.metadata[0].data_quality, 5.0);
    }

    #[test]
    fn upstream_share_removes_loss_and_combustion() {
        let r = EnergyRelated {
            electric_use: Some(1000.0),
            lifecycle_emission_factor: Some(0.8),
            combustion_emission_factor: Some(0.6),
            energy_loss_rate: Some(0.2),
            ..EnergyRelated::default()
        };
        let set = energy_related(&r);
        // inflation = 1 - 1/0.8 = -0.25, so the real factor is 0.8 * 1.25 = 1.0.
        assert_eq!(set.amounts[&Method::ReportedEmissions2], 400.0);
        assert_eq!(set.data_quality, 3.5);
    }

    #[test]
    fn upstream_factor_gives_first_reported_figure() {
        let r = EnergyRelated {
            electric_use: Some(1000.0),
            upstream_emission_factor: Some(0.05),
            ..EnergyRelated::default()
        };
        let set = energy_related(&r);
        assert_eq!(set.amounts[&Method::ReportedEmissions1], 50.0);
        assert_eq!(set.metadata.len(), 1);
        assert_eq!(set.metadata[0].fields_used, ["upstream_emission_factor", "electric_use"]);
        assert_eq!(set.data_quality, 3.5);
    }

    #[test]
    fn total_loss_rate_skips_upstream_method() {
        let r = EnergyRelated {
            electric_use: Some(1000.0),
            lifecycle_emission_factor: Some(0.8),
            combustion_emission_factor: Some(0.6),
            energy_loss_rate: Some(1.0),
            ..EnergyRelated::default()
        };
        assert!(energy_related(&r).is_empty());
    }

    use cf_factors::{FactorRow, GwpTable, InMemorySource, LookupCache};
    use std::sync::Arc;

    fn cache() -> LookupCache {
        let source = InMemorySource::default()
            .with_table(
                "s3c5_waste_factors",
                vec![
                    FactorRow::new()
                        .with_text("waste_type", "Paper")
                        .with_text("waste_treatment_method", "Landfill")
                        .with_number("kgCO2_unit", 1.2)
                        .with_number("year", 2023.0),
                    FactorRow::new()
                        .with_text("waste_type", "Paper")
                        .with_text("waste_treatment_method", "Recycled")
                        .with_number("kgCO2_unit", 0.02)
                        .with_number("year", 2022.0),
                ],
            )
            .with_table(
                "s3c4_freight_factors",
                vec![
                    FactorRow::new()
                        .with_text("freight_type", "HGV")
                        .with_text("units", "mton-km")
                        .with_number("kgCO2_unit", 0.1)
                        .with_number("year", 2023.0),
                ],
            )
            .with_table(
                "s3c6_travel_factors",
                vec![
                    FactorRow::new()
                        .with_text("vehicle_type", "Car")
                        .with_number("kgCO2_unit", 0.2)
                        .with_number("year", 2023.0),
                ],
            )
            .with_table(
                "s1sc_liquid",
                vec![
                    FactorRow::new()
                        .with_text("fuel_type", "Diesel")
                        .with_number("kgCO2_litre", 2.5)
                        .with_number("year", 2023.0),
                ],
            )
            .with_table(
                "ghg_refrigerants_gwp_v2",
                vec![
                    FactorRow::new()
                        .with_text("ashrae_number", "R-32")
                        .with_number("gwp_100yr", 675.0),
                ],
            );
        LookupCache::new(Arc::new(source))
    }

    #[test]
    fn waste_treatment_costs_an_extra_point() {
        let mut cache = cache();
        let gwp = GwpTable::default();
        let mut ctx = CalcContext::new(&mut cache, &gwp);

        let untreated = Waste {
            waste_type: Some("Paper".into()),
            waste_quantity: Some(100.0),
            ..Waste::default()
        };
        let set = waste(&untreated, &mut ctx).unwrap();
        assert!((set.amounts[&Method::PhysicalEmissions] - 120.0).abs() < 1e-9);
        assert_eq!(set.data_quality, 4.0);

        let treated = Waste {
            waste_treatment_method: Some("Recycled".into()),
            ..untreated
        };
        let set = waste(&treated, &mut ctx).unwrap();
        assert!((set.amounts[&Method::PhysicalEmissions] - 2.0).abs() < 1e-9);
        assert_eq!(set.data_quality, 3.0);
    }

    #[test]
    fn freight_weight_scales_tonne_km_factors() {
        let mut cache = cache();
        let gwp = GwpTable::default();
        let mut ctx = CalcContext::new(&mut cache, &gwp);
        let r = Transport {
            freight_type: Some("HGV".into()),
            freight_weight: Some(5.0),
            distance_traveled: Some(200.0),
            distance_unit: Some("km".into()),
            ..Transport::default()
        };
        let set = transport(&r, &mut ctx).unwrap();
        assert!((set.amounts[&Method::DistanceBasedEmissions] - 100.0).abs() < 1e-9);
        assert!(set.metadata[0].fields_used.contains(&"freight_weight"));
    }

    #[test]
    fn premises_sum_parts_and_prefer_reported_figure() {
        let mut cache = cache();
        let gwp = GwpTable::default();
        let mut ctx = CalcContext::new(&mut cache, &gwp);
        let r = Premises {
            electric_use: Some(1000.0),
            grid_emission_factor: Some(0.5),
            refrigerant_type: Some("R-32".into()),
            refrigerant_use: Some(2.0),
            reported_emissions: Some(1800.0),
            ..Premises::default()
        };
        let set = premises(&r, &mut ctx).unwrap();
        assert_eq!(set.amounts[&Method::PhysicalEmissions], 1850.0);
        assert_eq!(set.metadata.len(), 2);
        assert_eq!(set.metadata[0].data_quality, 3.0);
        assert_eq!(set.metadata[1].data_quality, REPORTED_QUALITY);
        assert_eq!(set.best(), Some(1));
    }

    #[test]
    fn use_of_sold_counts_every_lifetime_use() {
        let mut cache = cache();
        let gwp = GwpTable::default();
        let mut ctx = CalcContext::new(&mut cache, &gwp);
        let r = UseOfSold {
            lifetime_usage_freq: Some(100.0),
            number_sold: Some(10.0),
            electric_per_use: Some(0.5),
            grid_emission_factor: Some(0.4),
            ..UseOfSold::default()
        };
        let set = use_of_sold(&r, &mut ctx).unwrap();
        assert!((set.amounts[&Method::PhysicalEmissions] - 200.0).abs() < 1e-9);
        assert_eq!(set.metadata[0].fields_used[..2], ["lifetime_usage_freq", "number_sold"]);
    }

    #[test]
    fn hotel_nights_use_supplied_factor() {
        let r = BusinessStay {
            no_of_nights: Some(3.0),
            hotel_emission_factor: Some(20.5),
            ..BusinessStay::default()
        };
        let set = business_stay(&r);
        assert_eq!(set.amounts[&Method::ReportedEmissions1], 61.5);
        assert_eq!(set.data_quality, 5.0);
    }

    #[test]
    fn business_travel_fuel_use_beats_distance() {
        let mut cache = cache();
        let gwp = GwpTable::default();
        let mut ctx = CalcContext::new(&mut cache, &gwp);
        let r = BusinessTravel {
            vehicle_type: Some("Car".into()),
            distance_traveled: Some(100.0),
            fuel_type: Some("Diesel".into()),
            fuel_use: Some(10.0),
            fuel_unit: Some("litre".into()),
            ..BusinessTravel::default()
        };
        let set = business_travel(&r, &mut ctx).unwrap();
        assert!((set.amounts[&Method::DistanceBasedEmissions] - 20.0).abs() < 1e-9);
        assert!((set.amounts[&Method::UseBasedEmissions] - 25.0).abs() < 1e-9);
        assert_eq!(set.metadata[0].data_quality, 4.0);
        assert_eq!(set.metadata[1].data_quality, 3.0);
        assert_eq!(set.best(), Some(1));
    }

    #[test]
    fn commute_distance_uses_travel_factors() {
        let mut cache = cache();
        let gwp = GwpTable::default();
        let mut ctx = CalcContext::new(&mut cache, &gwp);
        let r = EmployeeCommute {
            vehicle_type: Some("Car".into()),
            distance_traveled: Some(50.0),
            distance_unit: Some("km".into()),
            ..EmployeeCommute::default()
        };
        let set = employee_commute(&r, &mut ctx).unwrap();
        assert!((set.amounts[&Method::DistanceBasedEmissions] - 10.0).abs() < 1e-9);
        assert_eq!(set.data_quality, 4.0);
        assert_eq!(set.metadata[0].fields_used, ["vehicle_type", "distance_traveled"]);

        let unknown = EmployeeCommute {
            vehicle_type: Some("Gondola".into()),
            ..r
        };
        assert!(employee_commute(&unknown, &mut ctx).unwrap().is_empty());
    }

    #[test]
    fn leased_vehicle_sums_fuel_and_refrigerant() {
        let mut cache = cache();
        let gwp = GwpTable::default();
        let mut ctx = CalcContext::new(&mut cache, &gwp);
        let r = LeasedAuto {
            fuel_type: Some("Diesel".into()),
            fuel_use: Some(10.0),
            fuel_unit: Some("litre".into()),
            refrigerant_type: Some("R-32".into()),
            refrigerant_use: Some(1.0),
            reported_emissions: Some(650.0),
            ..LeasedAuto::default()
        };
        let set = leased_auto(&r, &mut ctx).unwrap();
        assert!((set.amounts[&Method::PhysicalEmissions] - 700.0).abs() < 1e-9);
        assert_eq!(set.metadata[0].data_quality, 3.0);
        assert_eq!(set.metadata[1].data_quality, REPORTED_QUALITY);
        assert_eq!(set.best(), Some(1));

        let reported_only = LeasedAuto {
            reported_emissions: Some(650.0),
            ..LeasedAuto::default()
        };
        let set = leased_auto(&reported_only, &mut ctx).unwrap();
        assert_eq!(set.metadata.len(), 1);
        assert_eq!(set.metadata[0].method, Method::ReportedEmissions);
    }

    #[test]
    fn processing_prefers_reported_over_physical() {
        let mut cache = cache();
        let gwp = GwpTable::default();
        let mut ctx = CalcContext::new(&mut cache, &gwp);
        let physical = ProcessingProducts {
            fuel_type: Some("Diesel".into()),
            fuel_use: Some(10.0),
            fuel_unit: Some("litre".into()),
            electric_use: Some(1000.0),
            grid_emission_factor: Some(0.4),
            ..ProcessingProducts::default()
        };
        let set = processing_products(&physical, &mut ctx).unwrap();
        assert!((set.amounts[&Method::PhysicalEmissions] - 425.0).abs() < 1e-9);
        assert_eq!(set.data_quality, 3.0);
        assert_eq!(set.best(), Some(0));
        assert_eq!(
            set.metadata[0].fields_used,
            ["fuel_use", "fuel_type", "fuel_unit", "grid_emission_factor", "electric_use"]
        );

        let both = ProcessingProducts {
            reported_emissions: Some(500.0),
            ..physical
        };
        let set = processing_products(&both, &mut ctx).unwrap();
        assert_eq!(set.amounts[&Method::ReportedEmissions], 500.0);
        assert_eq!(set.metadata[1].data_quality, REPORTED_QUALITY);
        assert_eq!(set.best(), Some(1));
    }
}
