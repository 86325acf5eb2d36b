//! Activity record schema definitions.
//!
//! Every category-specific field is optional: an absent field is `None` and
//! calculators simply evaluate fewer methods. Only the fields that select a
//! factor table or a unit carry defaults.

use cf_core::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fields shared by every record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordMeta {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Physical state of a fuel; selects the fuel factor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelState {
    Gas,
    #[default]
    Liquid,
    Solid,
}

impl FuelState {
    pub fn as_str(self) -> &'static str {
        match self {
            FuelState::Gas => "gas",
            FuelState::Liquid => "liquid",
            FuelState::Solid => "solid",
        }
    }
}

impl std::str::FromStr for FuelState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gas" => Ok(FuelState::Gas),
            "liquid" => Ok(FuelState::Liquid),
            "solid" => Ok(FuelState::Solid),
            other => Err(format!("unknown fuel state '{other}', expected gas, liquid or solid")),
        }
    }
}

fn default_energy_type() -> String {
    "electric".to_string()
}

fn default_energy_unit() -> String {
    "kwh".to_string()
}

// ── Scope 1 ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StationaryCombustion {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub branch: Option<String>,
    pub sector: Option<String>,
    #[serde(default)]
    pub fuel_state: FuelState,
    pub fuel_type: Option<String>,
    pub fuel_use: Option<f64>,
    pub fuel_unit: Option<String>,
    pub heating_value: Option<f64>,
    pub fuel_spend: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MobileCombustion {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub branch: Option<String>,
    pub sector: Option<String>,
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub fuel_state: FuelState,
    pub fuel_type: Option<String>,
    pub fuel_use: Option<f64>,
    pub fuel_unit: Option<String>,
    pub distance_traveled: Option<f64>,
    pub distance_unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FugitiveEmission {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub branch: Option<String>,
    pub equipment_name: Option<String>,
    pub refrigerant_capacity: Option<f64>,
    pub refrigerant_use: Option<f64>,
    pub refrigerant_type: Option<String>,
    pub refrigerant_unit: Option<String>,
    /// Fraction of capacity lost when the equipment was installed.
    pub install_loss_rate: Option<f64>,
    /// Fraction of capacity leaking per year; paired with `number_of_year`.
    pub annual_leak_rate: Option<f64>,
    /// Fraction of the charge recovered at decommissioning.
    pub recovery_rate: Option<f64>,
    pub number_of_year: Option<f64>,
}

// ── Scope 2 ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasedPower {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub branch: Option<String>,
    pub department: Option<String>,
    pub owned: Option<bool>,
    pub energy_provider: Option<String>,
    #[serde(default = "default_energy_type")]
    pub energy_type: String,
    pub energy_use: Option<f64>,
    #[serde(default = "default_energy_unit")]
    pub energy_unit: String,
    pub energy_spend: Option<f64>,
    pub currency: Option<String>,
}

impl Default for PurchasedPower {
    fn default() -> Self {
        Self {
            meta: RecordMeta::default(),
            lat: None,
            lon: None,
            state: None,
            country: None,
            branch: None,
            department: None,
            owned: None,
            energy_provider: None,
            energy_type: default_energy_type(),
            energy_use: None,
            energy_unit: default_energy_unit(),
            energy_spend: None,
            currency: None,
        }
    }
}

// ── Scope 3 ─────────────────────────────────────────────────────────────

/// Purchased goods (C1) and capital goods (C2).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SupplierGoods {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub supplier_name: Option<String>,
    pub product_name: Option<String>,
    pub supplier_incurred_emissions: Option<f64>,
    pub purchased_quantity: Option<f64>,
    pub quantity_unit: Option<String>,
    pub quantity_emission_factor: Option<f64>,
}

/// Fuel- and energy-related activities (C3).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnergyRelated {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub electric_use: Option<f64>,
    pub grid_emission_factor: Option<f64>,
    pub upstream_emission_factor: Option<f64>,
    #[serde(alias = "life_cycle_emission_factor")]
    pub lifecycle_emission_factor: Option<f64>,
    pub combustion_emission_factor: Option<f64>,
    /// Transmission and distribution loss, as a fraction of generated energy.
    pub energy_loss_rate: Option<f64>,
}

/// Upstream (C4) and downstream (C9) transportation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transport {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub freight_type: Option<String>,
    pub freight_weight: Option<f64>,
    pub distance_traveled: Option<f64>,
    pub distance_unit: Option<String>,
    #[serde(default)]
    pub fuel_state: FuelState,
    pub fuel_type: Option<String>,
    pub fuel_use: Option<f64>,
    pub fuel_unit: Option<String>,
}

/// Waste generated in operations (C5) and end-of-life treatment (C12).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Waste {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub waste_type: Option<String>,
    pub waste_quantity: Option<f64>,
    pub waste_unit: Option<String>,
    pub waste_treatment_method: Option<String>,
}

/// Business travel (C6.1).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BusinessTravel {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub travel_mode: Option<String>,
    pub vehicle_type: Option<String>,
    pub distance_traveled: Option<f64>,
    pub distance_unit: Option<String>,
    #[serde(default)]
    pub fuel_state: FuelState,
    pub fuel_type: Option<String>,
    pub fuel_use: Option<f64>,
    pub fuel_unit: Option<String>,
}

/// Hotel stays during business travel (C6.2).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BusinessStay {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub hotel_name: Option<String>,
    pub no_of_nights: Option<f64>,
    pub hotel_emission_factor: Option<f64>,
}

/// Employee commuting (C7).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmployeeCommute {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub vehicle_type: Option<String>,
    pub distance_traveled: Option<f64>,
    pub distance_unit: Option<String>,
}

/// Leased buildings (C8.1, C13.1) and franchises (C14).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Premises {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub electric_use: Option<f64>,
    /// Supplied factor; looked up from `country`/`state` when absent.
    pub grid_emission_factor: Option<f64>,
    pub refrigerant_type: Option<String>,
    pub refrigerant_use: Option<f64>,
    pub reported_emissions: Option<f64>,
}

/// Leased vehicles (C8.2, C13.2).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LeasedAuto {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub fuel_state: FuelState,
    pub fuel_type: Option<String>,
    pub fuel_use: Option<f64>,
    pub fuel_unit: Option<String>,
    pub refrigerant_type: Option<String>,
    pub refrigerant_use: Option<f64>,
    pub reported_emissions: Option<f64>,
}

/// Processing of sold products (C10).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessingProducts {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub fuel_state: FuelState,
    pub fuel_type: Option<String>,
    pub fuel_use: Option<f64>,
    pub fuel_unit: Option<String>,
    pub refrigerant_type: Option<String>,
    pub refrigerant_use: Option<f64>,
    pub electric_use: Option<f64>,
    pub grid_emission_factor: Option<f64>,
    pub reported_emissions: Option<f64>,
}

/// Use of sold products (C11). Quantities are per single use of one unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UseOfSold {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub product_name: Option<String>,
    /// Uses of one unit over its lifetime.
    pub lifetime_usage_freq: Option<f64>,
    pub number_sold: Option<f64>,
    #[serde(default)]
    pub fuel_state: FuelState,
    pub fuel_type: Option<String>,
    pub fuel_unit: Option<String>,
    pub fuel_per_use: Option<f64>,
    pub electric_per_use: Option<f64>,
    pub grid_emission_factor: Option<f64>,
    pub refrigerant_type: Option<String>,
    pub refrigerant_per_use: Option<f64>,
}

// ── Financed emissions (C15) ────────────────────────────────────────────

/// Exposure fields common to every financed asset class.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Exposure {
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub outstanding_amount: Option<f64>,
    /// Share of the counterparty's emissions attributed to the reporting entity.
    pub attribution_share: Option<f64>,
    pub reported_emissions: Option<f64>,
    pub estimated_emissions: Option<f64>,
    pub emission_estimation_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListedEquity {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(flatten)]
    pub exposure: Exposure,
    /// Enterprise value including cash.
    pub enterprise_value: Option<f64>,
}

/// Unlisted equity (C15.1B) and corporate bonds (C15.1C).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorporateFinance {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(flatten)]
    pub exposure: Exposure,
    pub total_equity: Option<f64>,
    pub total_debt: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BusinessLoan {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(flatten)]
    pub exposure: Exposure,
    /// Selects the allocation base: enterprise value when listed, equity plus
    /// debt otherwise.
    pub is_listed: Option<bool>,
    pub enterprise_value: Option<f64>,
    pub total_equity: Option<f64>,
    pub total_debt: Option<f64>,
}

/// Commercial real estate (C15.1E) and mortgages (C15.2A).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyLoan {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(flatten)]
    pub exposure: Exposure,
    pub property_value: Option<f64>,
    /// Property value taken at loan origination rather than current value.
    pub value_at_origin: Option<bool>,
    pub building_energy_use: Option<f64>,
    pub building_emission_factor: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VehicleLoan {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(flatten)]
    pub exposure: Exposure,
    pub vehicle_value: Option<f64>,
    pub value_at_origin: Option<bool>,
    pub distance_traveled: Option<f64>,
    pub distance_emission_factor: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectFinance {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(flatten)]
    pub exposure: Exposure,
    pub project_emissions: Option<f64>,
    pub total_equity: Option<f64>,
    pub total_debt: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmissionRemoval {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(flatten)]
    pub exposure: Exposure,
    pub emissions_removed: Option<f64>,
    pub enterprise_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SovereignDebt {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(flatten)]
    pub exposure: Exposure,
    pub country_code: Option<String>,
    #[serde(alias = "PPP_adj_GDP")]
    pub ppp_adjusted_gdp: Option<f64>,
    pub total_government_debt: Option<f64>,
    pub consumption_emissions: Option<f64>,
}
