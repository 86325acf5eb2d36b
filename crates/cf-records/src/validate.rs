//! Record validation: ranges, units and location requirements.
//!
//! Validation never fills in or corrects values. A record either passes as-is or
//! is rejected with the first offending field.

use crate::record::ActivityRecord;
use crate::schema::*;
use cf_core::RecordId;
use std::collections::HashSet;

pub const MAX_DESCRIPTION_CHARS: usize = 1600;

const SUPPORTED_DISTANCE_UNITS: &[&str] = &["km"];
const SUPPORTED_ENERGY_TYPES: &[&str] = &["electric"];
const SUPPORTED_ENERGY_UNITS: &[&str] = &["kwh"];
const SUPPORTED_CURRENCIES: &[&str] = &["usd", "myr", "sgd"];

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate record id: {id}")]
    DuplicateId { id: RecordId },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Missing location: {reason}")]
    MissingLocation { reason: &'static str },

    #[error("Unsupported {field}: {value} (supported: {supported})")]
    Unsupported {
        field: &'static str,
        value: String,
        supported: String,
    },
}

type Checked = Result<(), ValidationError>;

fn non_negative(field: &'static str, value: Option<f64>) -> Checked {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(ValidationError::InvalidValue {
            field,
            value: v.to_string(),
            reason: "must be a finite, non-negative number",
        }),
        _ => Ok(()),
    }
}

fn within(field: &'static str, value: Option<f64>, lo: f64, hi: f64) -> Checked {
    match value {
        Some(v) if !(lo..=hi).contains(&v) => Err(ValidationError::InvalidValue {
            field,
            value: v.to_string(),
            reason: "out of range",
        }),
        _ => Ok(()),
    }
}

fn fraction(field: &'static str, value: Option<f64>) -> Checked {
    within(field, value, 0.0, 1.0)
}

fn supported(field: &'static str, value: Option<&str>, allowed: &[&str]) -> Checked {
    match value {
        Some(v) if !allowed.iter().any(|a| a.eq_ignore_ascii_case(v)) => {
            Err(ValidationError::Unsupported {
                field,
                value: v.to_string(),
                supported: allowed.join(", "),
            })
        }
        _ => Ok(()),
    }
}

fn all_non_negative(fields: &[(&'static str, Option<f64>)]) -> Checked {
    fields.iter().try_for_each(|&(f, v)| non_negative(f, v))
}

fn validate_meta(meta: &RecordMeta) -> Checked {
    if let Some(description) = &meta.description
        && description.chars().count() > MAX_DESCRIPTION_CHARS
    {
        return Err(ValidationError::InvalidValue {
            field: "description",
            value: format!("{} chars", description.chars().count()),
            reason: "exceeds 1600 characters",
        });
    }
    Ok(())
}

fn validate_coordinates(lat: Option<f64>, lon: Option<f64>) -> Checked {
    within("lat", lat, -90.0, 90.0)?;
    within("lon", lon, -180.0, 180.0)
}

fn validate_exposure(exposure: &Exposure) -> Checked {
    all_non_negative(&[("outstanding_amount", exposure.outstanding_amount)])?;
    fraction("attribution_share", exposure.attribution_share)
}

pub fn validate_record(record: &ActivityRecord) -> Checked {
    use ActivityRecord as R;
    validate_meta(record.meta())?;
    match record {
        R::StationaryCombustion(r) => all_non_negative(&[
            ("fuel_use", r.fuel_use),
            ("fuel_spend", r.fuel_spend),
        ]),
        R::MobileCombustion(r) => {
            all_non_negative(&[
                ("fuel_use", r.fuel_use),
                ("distance_traveled", r.distance_traveled),
            ])?;
            supported("distance_unit", r.distance_unit.as_deref(), SUPPORTED_DISTANCE_UNITS)
        }
        R::FugitiveEmission(r) => {
            all_non_negative(&[
                ("refrigerant_capacity", r.refrigerant_capacity),
                ("refrigerant_use", r.refrigerant_use),
                ("number_of_year", r.number_of_year),
            ])?;
            fraction("install_loss_rate", r.install_loss_rate)?;
            fraction("annual_leak_rate", r.annual_leak_rate)?;
            fraction("recovery_rate", r.recovery_rate)
        }
        R::PurchasedPower(r) => validate_purchased_power(r),
        R::PurchasedGoods(r) | R::CapitalGoods(r) => all_non_negative(&[
            ("supplier_incurred_emissions", r.supplier_incurred_emissions),
            ("purchased_quantity", r.purchased_quantity),
        ]),
        R::EnergyRelated(r) => {
            all_non_negative(&[("electric_use", r.electric_use)])?;
            fraction("energy_loss_rate", r.energy_loss_rate)
        }
        R::UpstreamTransport(r) | R::DownstreamTransport(r) => {
            all_non_negative(&[
                ("freight_weight", r.freight_weight),
                ("distance_traveled", r.distance_traveled),
                ("fuel_use", r.fuel_use),
            ])?;
            supported("distance_unit", r.distance_unit.as_deref(), SUPPORTED_DISTANCE_UNITS)
        }
        R::WasteGenerated(r) | R::EndOfLifeTreatment(r) => {
            all_non_negative(&[("waste_quantity", r.waste_quantity)])
        }
        R::BusinessTravel(r) => {
            all_non_negative(&[
                ("distance_traveled", r.distance_traveled),
                ("fuel_use", r.fuel_use),
            ])?;
            supported("distance_unit", r.distance_unit.as_deref(), SUPPORTED_DISTANCE_UNITS)
        }
        R::BusinessStay(r) => all_non_negative(&[("no_of_nights", r.no_of_nights)]),
        R::EmployeeCommute(r) => {
            all_non_negative(&[("distance_traveled", r.distance_traveled)])?;
            supported("distance_unit", r.distance_unit.as_deref(), SUPPORTED_DISTANCE_UNITS)
        }
        R::UpstreamLeasedEstate(r) | R::DownstreamLeasedEstate(r) | R::Franchise(r) => {
            validate_coordinates(r.lat, r.lon)?;
            all_non_negative(&[
                ("electric_use", r.electric_use),
                ("refrigerant_use", r.refrigerant_use),
            ])
        }
        R::UpstreamLeasedAuto(r) | R::DownstreamLeasedAuto(r) => all_non_negative(&[
            ("fuel_use", r.fuel_use),
            ("refrigerant_use", r.refrigerant_use),
        ]),
        R::ProcessingProducts(r) => all_non_negative(&[
            ("fuel_use", r.fuel_use),
            ("refrigerant_use", r.refrigerant_use),
            ("electric_use", r.electric_use),
        ]),
        R::UseOfSold(r) => all_non_negative(&[
            ("lifetime_usage_freq", r.lifetime_usage_freq),
            ("number_sold", r.number_sold),
            ("fuel_per_use", r.fuel_per_use),
            ("electric_per_use", r.electric_per_use),
            ("refrigerant_per_use", r.refrigerant_per_use),
        ]),
        R::ListedEquity(r) => validate_exposure(&r.exposure),
        R::UnlistedEquity(r) | R::CorporateBonds(r) => validate_exposure(&r.exposure),
        R::BusinessLoans(r) => validate_exposure(&r.exposure),
        R::CommercialRealEstate(r) | R::Mortgage(r) => {
            validate_exposure(&r.exposure)?;
            all_non_negative(&[("building_energy_use", r.building_energy_use)])
        }
        R::VehicleLoans(r) => {
            validate_exposure(&r.exposure)?;
            all_non_negative(&[("distance_traveled", r.distance_traveled)])
        }
        R::ProjectFinance(r) => validate_exposure(&r.exposure),
        R::EmissionRemovals(r) => {
            validate_exposure(&r.exposure)?;
            all_non_negative(&[("emissions_removed", r.emissions_removed)])
        }
        R::SovereignDebt(r) => validate_exposure(&r.exposure),
    }
}

fn validate_purchased_power(r: &PurchasedPower) -> Checked {
    validate_coordinates(r.lat, r.lon)?;
    if r.country.is_none() && r.state.is_none() && (r.lat.is_none() || r.lon.is_none()) {
        return Err(ValidationError::MissingLocation {
            reason: "provide country or state, or both lat and lon",
        });
    }
    all_non_negative(&[
        ("energy_use", r.energy_use),
        ("energy_spend", r.energy_spend),
    ])?;
    supported("energy_type", Some(r.energy_type.as_str()), SUPPORTED_ENERGY_TYPES)?;
    supported("energy_unit", Some(r.energy_unit.as_str()), SUPPORTED_ENERGY_UNITS)?;
    if r.energy_spend.is_some_and(|s| s > 0.0) {
        supported("currency", r.currency.as_deref(), SUPPORTED_CURRENCIES)?;
    }
    Ok(())
}

/// Validate every record and reject repeated ids.
pub fn validate_records(records: &[ActivityRecord]) -> Checked {
    let mut ids = HashSet::new();
    for record in records {
        validate_record(record)?;
        if !ids.insert(record.id()) {
            return Err(ValidationError::DuplicateId { id: record.id() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn power() -> PurchasedPower {
        PurchasedPower {
            country: Some("Malaysia".to_string()),
            energy_use: Some(1200.0),
            ..PurchasedPower::default()
        }
    }

    #[test]
    fn accepts_minimal_purchased_power() {
        assert!(validate_record(&ActivityRecord::PurchasedPower(power())).is_ok());
    }

    #[test]
    fn purchased_power_needs_a_location() {
        let r = PurchasedPower {
            country: None,
            lat: Some(2.2),
            ..power()
        };
        assert!(matches!(
            validate_record(&ActivityRecord::PurchasedPower(r)),
            Err(ValidationError::MissingLocation { .. })
        ));
    }

    #[test]
    fn energy_unit_is_case_insensitive_but_restricted() {
        let ok = PurchasedPower {
            energy_unit: "kWh".to_string(),
            ..power()
        };
        assert!(validate_record(&ActivityRecord::PurchasedPower(ok)).is_ok());

        let bad = PurchasedPower {
            energy_unit: "GJ".to_string(),
            ..power()
        };
        assert!(matches!(
            validate_record(&ActivityRecord::PurchasedPower(bad)),
            Err(ValidationError::Unsupported { field: "energy_unit", .. })
        ));
    }

    #[test]
    fn currency_checked_only_when_spend_given() {
        let r = PurchasedPower {
            currency: Some("EUR".to_string()),
            ..power()
        };
        assert!(validate_record(&ActivityRecord::PurchasedPower(r.clone())).is_ok());
        let r = PurchasedPower {
            energy_spend: Some(300.0),
            ..r
        };
        assert!(validate_record(&ActivityRecord::PurchasedPower(r)).is_err());
    }

    #[test]
    fn rates_must_be_fractions() {
        let r = FugitiveEmission {
            refrigerant_capacity: Some(10.0),
            annual_leak_rate: Some(1.5),
            ..FugitiveEmission::default()
        };
        let err = validate_record(&ActivityRecord::FugitiveEmission(r)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidValue {
                field: "annual_leak_rate",
                ..
            }
        ));
    }

    #[test]
    fn negative_quantities_rejected() {
        let r = StationaryCombustion {
            fuel_use: Some(-1.0),
            ..StationaryCombustion::default()
        };
        assert!(validate_record(&ActivityRecord::StationaryCombustion(r)).is_err());
    }

    #[test]
    fn only_kilometres_for_distance() {
        let r = EmployeeCommute {
            distance_unit: Some("miles".to_string()),
            ..EmployeeCommute::default()
        };
        assert!(validate_record(&ActivityRecord::EmployeeCommute(r)).is_err());
    }

    #[test]
    fn long_descriptions_rejected() {
        let mut r = BusinessStay::default();
        r.meta.description = Some("x".repeat(MAX_DESCRIPTION_CHARS + 1));
        assert!(validate_record(&ActivityRecord::BusinessStay(r)).is_err());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let stay = BusinessStay::default();
        let records = vec![
            ActivityRecord::BusinessStay(stay.clone()),
            ActivityRecord::BusinessStay(stay),
        ];
        assert!(matches!(
            validate_records(&records),
            Err(ValidationError::DuplicateId { .. })
        ));
    }
}
