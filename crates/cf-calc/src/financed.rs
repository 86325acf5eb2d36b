//! Financed emissions (C15): attribution of counterparty emissions by exposure.
//!
//! Every asset class follows the same ladder:
//! 1. `reported_emissions_1`: attribution share times the reported figure
//! 2. `reported_emissions_2`: outstanding amount over the class's allocation base,
//!    times the reported figure
//! 3. `physical_emissions`: activity data scaled by the same ratio (where the class
//!    has activity data)
//! 4. `estimated_emissions`: the client's own estimate, only without a reported figure
//!
//! Amounts are rounded to two decimals. An unusable allocation base (missing, zero,
//! negative or non-finite) skips the method.

use crate::method::{Method, MethodSet};
use cf_core::{checked_ratio, round2};
use cf_records::{
    BusinessLoan, CorporateFinance, EmissionRemoval, Exposure, ListedEquity, ProjectFinance,
    PropertyLoan, SovereignDebt, VehicleLoan,
};

pub const RATIO_COST: f64 = 1.0;
pub const PHYSICAL_COST: f64 = 2.0;
/// Extra cost when the asset value was taken at origination.
pub const VALUE_AT_ORIGIN_COST: f64 = 0.5;

/// The attributed figure and its field name: reported, project or removed emissions.
#[derive(Clone, Copy)]
struct Figure {
    value: Option<f64>,
    field: &'static str,
}

impl Figure {
    fn reported(exposure: &Exposure) -> Self {
        Self {
            value: exposure.reported_emissions,
            field: "reported_emissions",
        }
    }
}

/// Outstanding amount over `base`, if both are usable.
fn exposure_ratio(exposure: &Exposure, base: Option<f64>) -> Option<f64> {
    checked_ratio(exposure.outstanding_amount?, base?)
}

fn attributed(set: &mut MethodSet, exposure: &Exposure, figure: Figure) {
    if let (Some(share), Some(value)) = (exposure.attribution_share, figure.value) {
        set.record(
            Method::ReportedEmissions1,
            round2(share * value),
            &["attribution_share", figure.field],
        );
    }
}

fn ratio_scaled(
    set: &mut MethodSet,
    exposure: &Exposure,
    base: Option<f64>,
    base_fields: &[&'static str],
    figure: Figure,
    extra_cost: f64,
) {
    if let (Some(ratio), Some(value)) = (exposure_ratio(exposure, base), figure.value) {
        let mut fields = vec!["outstanding_amount"];
        fields.extend_from_slice(base_fields);
        fields.push(figure.field);
        set.evaluate(
            Method::ReportedEmissions2,
            RATIO_COST + extra_cost,
            round2(ratio * value),
            &fields,
        );
    }
}

fn estimated(set: &mut MethodSet, exposure: &Exposure, figure: Figure) {
    if figure.value.is_none()
        && let Some(estimate) = exposure.estimated_emissions
    {
        set.record(Method::EstimatedEmissions, estimate, &["estimated_emissions"]);
    }
}

fn equity_plus_debt(equity: Option<f64>, debt: Option<f64>) -> Option<f64> {
    Some(equity? + debt?)
}

fn origin_cost(value_at_origin: Option<bool>) -> f64 {
    if value_at_origin == Some(true) {
        VALUE_AT_ORIGIN_COST
    } else {
        0.0
    }
}

pub fn listed_equity(r: &ListedEquity) -> MethodSet {
    let mut set = MethodSet::emissions();
    let figure = Figure::reported(&r.exposure);
    attributed(&mut set, &r.exposure, figure);
    ratio_scaled(
        &mut set,
        &r.exposure,
        r.enterprise_value,
        &["enterprise_value"],
        figure,
        0.0,
    );
    estimated(&mut set, &r.exposure, figure);
    set
}

/// Unlisted equity and corporate bonds.
pub fn corporate_finance(r: &CorporateFinance) -> MethodSet {
    let mut set = MethodSet::emissions();
    let figure = Figure::reported(&r.exposure);
    attributed(&mut set, &r.exposure, figure);
    ratio_scaled(
        &mut set,
        &r.exposure,
        equity_plus_debt(r.total_equity, r.total_debt),
        &["total_equity", "total_debt"],
        figure,
        0.0,
    );
    estimated(&mut set, &r.exposure, figure);
    set
}

/// Business loans use enterprise value when listed and equity plus debt when not.
/// Unknown listing status skips the ratio method.
pub fn business_loan(r: &BusinessLoan) -> MethodSet {
    let mut set = MethodSet::emissions();
    let figure = Figure::reported(&r.exposure);
    attributed(&mut set, &r.exposure, figure);
    match r.is_listed {
        Some(true) => ratio_scaled(
            &mut set,
            &r.exposure,
            r.enterprise_value,
            &["enterprise_value"],
            figure,
            0.0,
        ),
        Some(false) => ratio_scaled(
            &mut set,
            &r.exposure,
            equity_plus_debt(r.total_equity, r.total_debt),
            &["total_equity", "total_debt"],
            figure,
            0.0,
        ),
        None => {}
    }
    estimated(&mut set, &r.exposure, figure);
    set
}

/// Commercial real estate and mortgages.
pub fn property_loan(r: &PropertyLoan) -> MethodSet {
    let mut set = MethodSet::emissions();
    let figure = Figure::reported(&r.exposure);
    attributed(&mut set, &r.exposure, figure);
    ratio_scaled(
        &mut set,
        &r.exposure,
        r.property_value,
        &["property_value"],
        figure,
        origin_cost(r.value_at_origin),
    );

    if let (Some(ratio), Some(energy), Some(factor)) = (
        exposure_ratio(&r.exposure, r.property_value),
        r.building_energy_use,
        r.building_emission_factor,
    ) {
        set.evaluate(
            Method::PhysicalEmissions,
            PHYSICAL_COST,
            round2(ratio * energy * factor),
            &[
                "building_energy_use",
                "building_emission_factor",
                "outstanding_amount",
                "property_value",
            ],
        );
    }

    estimated(&mut set, &r.exposure, figure);
    set
}

pub fn vehicle_loan(r: &VehicleLoan) -> MethodSet {
    let mut set = MethodSet::emissions();
    let figure = Figure::reported(&r.exposure);
    attributed(&mut set, &r.exposure, figure);
    ratio_scaled(
        &mut set,
        &r.exposure,
        r.vehicle_value,
        &["vehicle_value"],
        figure,
        origin_cost(r.value_at_origin),
    );

    if let (Some(ratio), Some(distance), Some(factor)) = (
        exposure_ratio(&r.exposure, r.vehicle_value),
        r.distance_traveled,
        r.distance_emission_factor,
    ) {
        set.evaluate(
            Method::PhysicalEmissions,
            PHYSICAL_COST,
            round2(ratio * distance * factor),
            &[
                "distance_traveled",
                "distance_emission_factor",
                "outstanding_amount",
                "vehicle_value",
            ],
        );
    }

    estimated(&mut set, &r.exposure, figure);
    set
}

/// Project finance attributes the project's own emissions.
pub fn project_finance(r: &ProjectFinance) -> MethodSet {
    let mut set = MethodSet::emissions();
    let figure = Figure {
        value: r.project_emissions,
        field: "project_emissions",
    };
    attributed(&mut set, &r.exposure, figure);
    ratio_scaled(
        &mut set,
        &r.exposure,
        equity_plus_debt(r.total_equity, r.total_debt),
        &["total_equity", "total_debt"],
        figure,
        0.0,
    );
    estimated(&mut set, &r.exposure, figure);
    set
}

/// Removals offset the footprint; the result is credited to the removal ledger.
pub fn emission_removal(r: &EmissionRemoval) -> MethodSet {
    let mut set = MethodSet::removals();
    let figure = Figure {
        value: r.emissions_removed,
        field: "emissions_removed",
    };
    attributed(&mut set, &r.exposure, figure);
    ratio_scaled(
        &mut set,
        &r.exposure,
        r.enterprise_value,
        &["enterprise_value"],
        figure,
        0.0,
    );
    estimated(&mut set, &r.exposure, figure);
    set
}

pub fn sovereign_debt(r: &SovereignDebt) -> MethodSet {
    let mut set = MethodSet::emissions();
    let figure = Figure::reported(&r.exposure);
    attributed(&mut set, &r.exposure, figure);
    ratio_scaled(
        &mut set,
        &r.exposure,
        r.ppp_adjusted_gdp,
        &["ppp_adjusted_gdp"],
        figure,
        0.0,
    );

    if let (Some(share), Some(consumption)) =
        (r.exposure.attribution_share, r.consumption_emissions)
    {
        set.evaluate(
            Method::PhysicalEmissions,
            PHYSICAL_COST,
            round2(share * consumption),
            &["attribution_share", "consumption_emissions"],
        );
    }

    estimated(&mut set, &r.exposure, figure);
    set
}
